//! [`Collection`] definitions.

use std::collections::BTreeMap;

use crate::domain::{Order, Product, Store};

/// All the [`Collection`]s of a [`Memory`] database.
///
/// [`Memory`]: super::Memory
#[derive(Clone, Debug, Default)]
pub struct Collections {
    /// [`Product`]s [`Collection`].
    pub products: Collection<Product>,

    /// [`Store`]s [`Collection`].
    pub stores: Collection<Store>,

    /// [`Order`]s [`Collection`].
    pub orders: Collection<Order>,
}

/// Collection of records keyed by an auto-incremented integer key.
///
/// Keys are never reused, even after the record holding them is removed.
#[derive(Clone, Debug)]
pub struct Collection<T> {
    /// Records of this [`Collection`] in key order.
    records: BTreeMap<i64, T>,

    /// Key to be assigned to the next inserted record.
    next_key: i64,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            next_key: 1,
        }
    }
}

impl<T> Collection<T> {
    /// Restores a [`Collection`] from the provided keyed records.
    ///
    /// The next key is advanced past every restored key, even if the
    /// provided `next_key` lags behind.
    pub fn restore(
        records: impl IntoIterator<Item = (i64, T)>,
        next_key: i64,
    ) -> Self {
        let mut c = Self {
            records: BTreeMap::new(),
            next_key: next_key.max(1),
        };
        for (key, record) in records {
            c.put(key, record);
        }
        c
    }

    /// Returns the key to be assigned to the next inserted record.
    #[must_use]
    pub fn next_key(&self) -> i64 {
        self.next_key
    }

    /// Inserts the record built by the provided function from its assigned
    /// key, returning that key.
    pub fn insert_with(&mut self, record: impl FnOnce(i64) -> T) -> i64 {
        let key = self.next_key;
        self.next_key += 1;
        _ = self.records.insert(key, record(key));
        key
    }

    /// Puts the provided `record` at the provided `key`, replacing any
    /// existing one.
    pub fn put(&mut self, key: i64, record: T) {
        if key >= self.next_key {
            self.next_key = key + 1;
        }
        _ = self.records.insert(key, record);
    }

    /// Removes the record at the provided `key`, if any.
    pub fn remove(&mut self, key: i64) -> Option<T> {
        self.records.remove(&key)
    }

    /// Returns the record at the provided `key`, if any.
    #[must_use]
    pub fn get(&self, key: i64) -> Option<&T> {
        self.records.get(&key)
    }

    /// Iterates over all the records of this [`Collection`] in key order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.records.values()
    }

    /// Indicates whether this [`Collection`] holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod spec {
    use super::Collection;

    #[test]
    fn never_reuses_keys() {
        let mut c = Collection::default();

        let a = c.insert_with(|k| k * 10);
        let b = c.insert_with(|k| k * 10);
        assert_eq!((a, b), (1, 2));

        assert_eq!(c.remove(b), Some(20));
        assert_eq!(c.insert_with(|k| k * 10), 3);
        assert_eq!(c.values().copied().collect::<Vec<_>>(), [10, 30]);
    }

    #[test]
    fn advances_keys_past_put_records() {
        let mut c = Collection::default();

        c.put(7, "seven");
        assert_eq!(c.insert_with(|_| "eight"), 8);
        assert_eq!(c.get(7), Some(&"seven"));
        assert!(!c.is_empty());
    }

    #[test]
    fn restores_past_largest_key() {
        let c = Collection::restore([(2, "two"), (5, "five")], 3);
        assert_eq!(c.next_key(), 6);

        let mut c = Collection::restore([(2, "two")], 9);
        assert_eq!(c.insert_with(|_| "nine"), 9);
        assert_eq!(c.values().copied().collect::<Vec<_>>(), ["two", "nine"]);
    }
}
