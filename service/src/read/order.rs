//! [`Order`] read definitions.

use common::date::Month;

use crate::domain::Order;

/// Sorts the provided [`Order`]s by their date, latest first.
///
/// [`Order`]s of the same date keep their relative order.
pub fn sort_by_date_desc(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.details.date.cmp(&a.details.date));
}

/// [`Order`]s of a year split by a target month.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MonthPartition {
    /// [`Order`]s due in the target month.
    pub current: Vec<Order>,

    /// [`Order`]s due in the other months of the target year.
    pub others: Vec<Order>,
}

impl MonthPartition {
    /// Splits the provided [`Order`]s of the provided `year` by the provided
    /// `month`, keeping their order.
    ///
    /// [`Order`]s of other years are left out.
    #[must_use]
    pub fn new<'a>(
        orders: impl IntoIterator<Item = &'a Order>,
        year: i32,
        month: Month,
    ) -> Self {
        let (current, others) = orders
            .into_iter()
            .filter(|o| o.details.date.year() == year)
            .cloned()
            .partition(|o| o.details.date.is_in(year, month));
        Self { current, others }
    }
}

#[cfg(test)]
mod spec {
    use common::{date::Month, Date};

    use crate::{command::seed, domain::Order};

    use super::{sort_by_date_desc, MonthPartition};

    fn orders(dates: &[&str]) -> Vec<Order> {
        let template = seed::orders().remove(0);
        dates
            .iter()
            .zip(1_i64..)
            .map(|(date, id)| {
                let mut details = template.clone();
                details.date = Date::from_iso8601(date).unwrap();
                details.with_id(id.into())
            })
            .collect()
    }

    #[test]
    fn sorts_latest_first() {
        let mut list = orders(&["2025-01-15", "2025-02-05", "2025-01-20"]);

        sort_by_date_desc(&mut list);

        let ids = list.iter().map(|o| i64::from(o.id)).collect::<Vec<_>>();
        assert_eq!(ids, [2, 3, 1]);
    }

    #[test]
    fn keeps_same_date_order() {
        let mut list = orders(&["2025-01-15", "2025-03-01", "2025-01-15"]);

        sort_by_date_desc(&mut list);

        let ids = list.iter().map(|o| i64::from(o.id)).collect::<Vec<_>>();
        assert_eq!(ids, [2, 1, 3]);
    }

    #[test]
    fn partitions_by_month_of_year() {
        let list = orders(&[
            "2025-09-03",
            "2025-01-15",
            "2024-09-10",
            "2025-09-28",
            "2026-02-01",
        ]);

        let p = MonthPartition::new(&list, 2025, Month::September);

        let ids = |v: &[Order]| v.iter().map(|o| i64::from(o.id)).collect::<Vec<_>>();
        assert_eq!(ids(&p.current), [1, 4]);
        assert_eq!(ids(&p.others), [2]);
    }

    #[test]
    fn partitions_empty_month() {
        let list = orders(&["2025-01-15"]);

        let p = MonthPartition::new(&list, 2025, Month::September);

        assert!(p.current.is_empty());
        assert_eq!(p.others.len(), 1);
    }
}
