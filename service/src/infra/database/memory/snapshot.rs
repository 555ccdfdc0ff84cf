//! JSON snapshot [`File`] of the [`Collections`].

use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
};

use common::{Date, Money};
use derive_more::{Display, Error as StdError};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::fs;

use crate::domain::{order, product, store, Order, Product, Store};

use super::{Collection, Collections};

/// Version of the snapshot layout written by this [`File`].
pub const VERSION: u32 = 1;

/// Snapshot file the [`Collections`] are persisted into.
#[derive(Clone, Debug)]
pub struct File {
    /// Path to this [`File`].
    path: PathBuf,
}

impl File {
    /// Creates a new [`File`] at the provided `path`.
    ///
    /// Nothing is read or written until [`File::load()`] or [`File::save()`]
    /// is called.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of this [`File`].
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the [`Collections`] from this [`File`].
    ///
    /// Empty [`Collections`] are returned if this [`File`] doesn't exist yet.
    ///
    /// # Errors
    ///
    /// If this [`File`] cannot be read, or doesn't hold a valid snapshot.
    pub async fn load(&self) -> Result<Collections, Error> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Collections::default());
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot = serde_json::from_slice::<Snapshot>(&bytes)?;
        if snapshot.version != VERSION {
            return Err(Error::UnsupportedVersion(snapshot.version));
        }
        Ok(Collections {
            products: snapshot.products.restore()?,
            stores: snapshot.stores.restore()?,
            orders: snapshot.orders.restore()?,
        })
    }

    /// Saves the provided [`Collections`] into this [`File`].
    ///
    /// The snapshot is written into a sibling temporary file first and then
    /// renamed over this [`File`], so a failed save keeps the previous one.
    ///
    /// # Errors
    ///
    /// If the snapshot cannot be written.
    pub async fn save(&self, collections: &Collections) -> Result<(), Error> {
        let snapshot = Snapshot {
            version: VERSION,
            products: Table::of(&collections.products),
            stores: Table::of(&collections.stores),
            orders: Table::of(&collections.orders),
        };
        let bytes = serde_json::to_vec_pretty(&snapshot)?;

        let dir = self.path.parent().filter(|d| !d.as_os_str().is_empty());
        if let Some(dir) = dir {
            fs::create_dir_all(dir).await?;
        }
        let tmp = {
            let mut tmp = OsString::from(self.path.as_os_str());
            tmp.push(".tmp");
            PathBuf::from(tmp)
        };
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// Error of a snapshot [`File`].
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// Reading or writing the [`File`] failed.
    #[display("snapshot I/O failed: {_0}")]
    Io(io::Error),

    /// The [`File`] is not a well-formed snapshot.
    #[display("malformed snapshot: {_0}")]
    Malformed(serde_json::Error),

    /// The [`File`] was written with an unknown layout.
    #[display("unsupported snapshot version `{_0}`")]
    UnsupportedVersion(#[error(not(source))] u32),

    /// A record of the [`File`] doesn't hold a valid entity.
    #[display("invalid `{collection}` record with key `{key}`")]
    InvalidRecord {
        /// Name of the collection holding the record.
        collection: &'static str,

        /// Key of the record.
        key: i64,
    },
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Malformed(e)
    }
}

/// Serialized layout of the [`Collections`].
#[derive(Deserialize, Serialize)]
struct Snapshot {
    /// Layout version, always [`VERSION`] when written.
    version: u32,

    /// [`Product`]s [`Table`].
    products: Table<ProductRecord>,

    /// [`Store`]s [`Table`].
    stores: Table<StoreRecord>,

    /// [`Order`]s [`Table`].
    orders: Table<OrderRecord>,
}

/// Serialized [`Collection`].
#[derive(Deserialize, Serialize)]
struct Table<R> {
    /// Key to be assigned to the next inserted record.
    next_key: i64,

    /// Records in key order.
    records: Vec<R>,
}

impl<R: Record> Table<R> {
    /// Serializes the provided [`Collection`].
    fn of(collection: &Collection<R::Entity>) -> Self {
        Self {
            next_key: collection.next_key(),
            records: collection.values().map(R::of).collect(),
        }
    }

    /// Restores the [`Collection`] serialized in this [`Table`].
    fn restore(self) -> Result<Collection<R::Entity>, Error> {
        let records = self
            .records
            .into_iter()
            .map(|r| {
                let key = r.key();
                r.into_entity()
                    .map(|e| (key, e))
                    .ok_or(Error::InvalidRecord {
                        collection: R::COLLECTION,
                        key,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Collection::restore(records, self.next_key))
    }
}

/// Serialized form of a [`Collection`] entity.
trait Record: DeserializeOwned + Serialize {
    /// Entity this [`Record`] represents.
    type Entity;

    /// Name of the [`Collection`] holding this [`Record`].
    const COLLECTION: &'static str;

    /// Serializes the provided entity.
    fn of(entity: &Self::Entity) -> Self;

    /// Returns the key of this [`Record`].
    fn key(&self) -> i64;

    /// Validates this [`Record`] back into its entity.
    fn into_entity(self) -> Option<Self::Entity>;
}

/// Serialized [`Product`].
#[derive(Deserialize, Serialize)]
struct ProductRecord {
    id: i64,
    name: String,
    store: String,
    unit_price: Money,
    is_egg: bool,
}

impl Record for ProductRecord {
    type Entity = Product;

    const COLLECTION: &'static str = "products";

    fn of(p: &Product) -> Self {
        Self {
            id: p.id.into(),
            name: p.name.to_string(),
            store: p.store.to_string(),
            unit_price: p.unit_price,
            is_egg: p.is_egg,
        }
    }

    fn key(&self) -> i64 {
        self.id
    }

    fn into_entity(self) -> Option<Product> {
        Some(Product {
            id: self.id.into(),
            name: product::Name::new(self.name)?,
            store: store::Name::new(self.store)?,
            unit_price: self.unit_price,
            is_egg: self.is_egg,
        })
    }
}

/// Serialized [`Store`].
#[derive(Deserialize, Serialize)]
struct StoreRecord {
    id: i64,
    name: String,
}

impl Record for StoreRecord {
    type Entity = Store;

    const COLLECTION: &'static str = "stores";

    fn of(s: &Store) -> Self {
        Self {
            id: s.id.into(),
            name: s.name.to_string(),
        }
    }

    fn key(&self) -> i64 {
        self.id
    }

    fn into_entity(self) -> Option<Store> {
        Some(Store {
            id: self.id.into(),
            name: store::Name::new(self.name)?,
        })
    }
}

/// Serialized [`Order`].
#[derive(Deserialize, Serialize)]
struct OrderRecord {
    id: i64,
    date: Date,
    description: String,
    gift_message: Option<String>,
    servings: u16,
    last_name: String,
    first_name: String,
    phone: String,
    price: Money,
    payment: u8,
    deposit: Money,
    note: Option<String>,
}

impl Record for OrderRecord {
    type Entity = Order;

    const COLLECTION: &'static str = "orders";

    fn of(o: &Order) -> Self {
        let d = &o.details;
        Self {
            id: o.id.into(),
            date: d.date,
            description: d.description.to_string(),
            gift_message: d.gift_message.as_ref().map(ToString::to_string),
            servings: d.servings.get(),
            last_name: d.customer.last_name.to_string(),
            first_name: d.customer.first_name.to_string(),
            phone: d.customer.phone.to_string(),
            price: d.price,
            payment: d.payment.u8(),
            deposit: d.deposit,
            note: d.note.as_ref().map(ToString::to_string),
        }
    }

    fn key(&self) -> i64 {
        self.id
    }

    fn into_entity(self) -> Option<Order> {
        let details = order::Details {
            date: self.date,
            description: order::Description::new(self.description)?,
            gift_message: self
                .gift_message
                .map(|m| order::GiftMessage::new(m).ok_or(()))
                .transpose()
                .ok()?,
            servings: order::Servings::new(self.servings)?,
            customer: order::Customer {
                last_name: order::LastName::new(self.last_name)?,
                first_name: order::FirstName::new(self.first_name)?,
                phone: order::Phone::new(self.phone)?,
            },
            price: self.price,
            payment: order::PaymentStatus::from_u8(self.payment)?,
            deposit: self.deposit,
            note: self
                .note
                .map(|n| order::Note::new(n).ok_or(()))
                .transpose()
                .ok()?,
        };
        Some(details.with_consistent_deposit().with_id(self.id.into()))
    }
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Commit, Delete, Insert, Select, Transact},
        Money,
    };

    use crate::{
        command::seed,
        domain::{store, Store},
        infra::{database::memory::Collections, Database as _, Memory},
    };

    use super::{Error, File};

    fn new_store(name: &str) -> store::New {
        store::New {
            name: store::Name::new(name).unwrap(),
        }
    }

    async fn store_names(db: &Memory) -> Vec<String> {
        db.execute(Select(By::<Vec<Store>, _>::all()))
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name.to_string())
            .collect()
    }

    fn seeded() -> Collections {
        let mut c = Collections::default();
        for p in seed::products() {
            _ = c.products.insert_with(|key| p.with_id(key.into()));
        }
        for s in seed::stores() {
            _ = c.stores.insert_with(|key| s.with_id(key.into()));
        }
        for o in seed::orders() {
            _ = c.orders.insert_with(|key| o.with_id(key.into()));
        }
        c
    }

    #[tokio::test]
    async fn loads_empty_collections_when_missing() {
        let dir = tempfile::tempdir().unwrap();

        let file = File::new(dir.path().join("bakery.json"));
        let c = file.load().await.unwrap();

        assert!(c.products.is_empty());
        assert!(c.stores.is_empty());
        assert!(c.orders.is_empty());
    }

    #[tokio::test]
    async fn restores_saved_collections() {
        let dir = tempfile::tempdir().unwrap();
        let file = File::new(dir.path().join("data").join("bakery.json"));
        let mut saved = seeded();
        _ = saved.stores.remove(3);

        file.save(&saved).await.unwrap();
        let mut loaded = file.load().await.unwrap();

        assert_eq!(
            loaded.products.values().collect::<Vec<_>>(),
            saved.products.values().collect::<Vec<_>>(),
        );
        assert_eq!(
            loaded.orders.values().collect::<Vec<_>>(),
            saved.orders.values().collect::<Vec<_>>(),
        );
        assert_eq!(loaded.stores.get(3), None);
        let key = loaded.stores.insert_with(|key| {
            store::New {
                name: store::Name::new("Netto").unwrap(),
            }
            .with_id(key.into())
        });
        assert_eq!(key, saved.stores.next_key());
    }

    #[tokio::test]
    async fn keeps_exact_amounts() {
        let dir = tempfile::tempdir().unwrap();
        let file = File::new(dir.path().join("bakery.json"));
        let mut c = seeded();
        let mut butter = c.products.get(1).unwrap().clone();
        butter.unit_price = "9.405".parse::<Money>().unwrap();
        c.products.put(1, butter);

        file.save(&c).await.unwrap();

        let loaded = file.load().await.unwrap();
        assert_eq!(
            loaded.products.get(1).unwrap().unit_price.amount(),
            "9.405".parse().unwrap(),
        );
    }

    #[tokio::test]
    async fn rejects_invalid_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bakery.json");
        tokio::fs::write(
            &path,
            r#"{
                "version": 1,
                "products": {"next_key": 1, "records": []},
                "stores": {"next_key": 2, "records": [{"id": 1, "name": " "}]},
                "orders": {"next_key": 1, "records": []}
            }"#,
        )
        .await
        .unwrap();

        let err = File::new(&path).load().await.unwrap_err();

        assert!(matches!(
            err,
            Error::InvalidRecord {
                collection: "stores",
                key: 1,
            },
        ));
    }

    #[tokio::test]
    async fn rejects_unknown_versions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bakery.json");
        let file = File::new(&path);
        file.save(&Collections::default()).await.unwrap();
        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        tokio::fs::write(&path, raw.replace("\"version\": 1", "\"version\": 2"))
            .await
            .unwrap();

        assert!(matches!(
            file.load().await.unwrap_err(),
            Error::UnsupportedVersion(2),
        ));
    }

    #[tokio::test]
    async fn persists_only_committed_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bakery.json");

        let db = Memory::open(File::new(&path)).await.unwrap();
        let lidl = db.execute(Insert(new_store("LIDL"))).await.unwrap();
        assert!(db.execute(Insert(new_store("LIDL"))).await.is_err());

        let tx = db.execute(Transact).await.unwrap();
        _ = tx.execute(Insert(new_store("Netto"))).await.unwrap();
        drop(tx);

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Delete(By::<Store, _>::new(lidl))).await.unwrap();
        _ = tx.execute(Insert(new_store("Carrefour"))).await.unwrap();
        tx.execute(Commit).await.unwrap();

        let reopened = Memory::open(File::new(&path)).await.unwrap();
        assert_eq!(store_names(&reopened).await, ["Carrefour"]);
    }

    #[tokio::test]
    async fn keeps_state_when_save_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bakery.json");
        let db = Memory::open(File::new(&path)).await.unwrap();
        _ = db.execute(Insert(new_store("LIDL"))).await.unwrap();

        tokio::fs::create_dir(dir.path().join("bakery.json.tmp"))
            .await
            .unwrap();
        assert!(db.execute(Insert(new_store("Netto"))).await.is_err());

        let tx = db.execute(Transact).await.unwrap();
        _ = tx.execute(Insert(new_store("Netto"))).await.unwrap();
        assert!(tx.execute(Commit).await.is_err());
        drop(tx);

        assert_eq!(store_names(&db).await, ["LIDL"]);
        let reopened = Memory::open(File::new(&path)).await.unwrap();
        assert_eq!(store_names(&reopened).await, ["LIDL"]);
    }
}
