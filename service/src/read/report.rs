//! Report read definitions.

use common::{date::Month, Money};

use crate::domain::Order;

/// Revenue of every month of a year.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MonthlyRevenue {
    /// Year the revenue is calculated for.
    pub year: i32,

    /// Total [`Order`] prices per month, January first.
    totals: [Money; 12],
}

impl MonthlyRevenue {
    /// Rolls up prices of the provided [`Order`]s due in the provided `year`.
    ///
    /// [`Order`]s of other years are ignored.
    #[must_use]
    pub fn new<'a>(
        year: i32,
        orders: impl IntoIterator<Item = &'a Order>,
    ) -> Self {
        let mut totals = [Money::ZERO; 12];
        for o in orders {
            if o.details.date.year() == year {
                totals[month_index(o.details.date.month())] += o.details.price;
            }
        }
        Self { year, totals }
    }

    /// Returns the total of the provided `month`.
    #[must_use]
    pub fn total(&self, month: Month) -> Money {
        self.totals[month_index(month)]
    }

    /// Iterates over all the months of the year with their totals, January
    /// first.
    pub fn iter(&self) -> impl Iterator<Item = (Month, Money)> + '_ {
        std::iter::successors(Some(Month::January), |m| {
            (*m != Month::December).then(|| m.next())
        })
        .zip(self.totals.iter().copied())
    }
}

/// Returns the zero-based index of the provided [`Month`].
fn month_index(month: Month) -> usize {
    usize::from(u8::from(month) - 1)
}

#[cfg(test)]
mod spec {
    use common::{date::Month, Money};
    use rust_decimal::Decimal;

    use crate::{command::seed, domain::Order};

    use super::MonthlyRevenue;

    fn seeded() -> Vec<Order> {
        seed::orders()
            .into_iter()
            .zip(1_i64..)
            .map(|(d, id)| d.with_id(id.into()))
            .collect()
    }

    #[test]
    fn rolls_up_by_month() {
        let report = MonthlyRevenue::new(2025, &seeded());

        assert_eq!(report.total(Month::January), Money::cents(7350));
        assert_eq!(report.total(Month::February), Money::cents(5200));
        for m in [Month::March, Month::September, Month::December] {
            assert_eq!(report.total(m), Money::ZERO);
        }
    }

    #[test]
    fn lists_twelve_months_in_order() {
        let report = MonthlyRevenue::new(2025, &seeded());

        let rows = report.iter().collect::<Vec<_>>();

        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0], (Month::January, Money::cents(7350)));
        assert_eq!(rows[1], (Month::February, Money::cents(5200)));
        assert_eq!(rows[11], (Month::December, Money::ZERO));
    }

    #[test]
    fn saturates_huge_totals() {
        let huge = Money::new(Decimal::MAX).unwrap();
        let orders = seeded()
            .into_iter()
            .map(|mut o| {
                o.details.price = huge;
                o
            })
            .collect::<Vec<_>>();

        let report = MonthlyRevenue::new(2025, &orders);

        assert_eq!(report.total(Month::January), huge);
        assert_eq!(report.iter().map(|(_, t)| t).sum::<Money>(), huge);
    }

    #[test]
    fn ignores_other_years() {
        let report = MonthlyRevenue::new(2024, &seeded());

        assert!(report.iter().all(|(_, total)| total.is_zero()));
    }
}
