//! Calendar date utilities.

use std::str::FromStr;

use derive_more::{Display, Error};
use time::macros::format_description;

pub use time::Month;

/// Calendar date without a time of day or an offset.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date(time::Date);

impl Date {
    /// Creates a new [`Date`] from the provided calendar components.
    ///
    /// [`None`] is returned if the components don't form a valid date.
    #[must_use]
    pub fn from_calendar_date(year: i32, month: Month, day: u8) -> Option<Self> {
        time::Date::from_calendar_date(year, month, day).ok().map(Self)
    }

    /// Creates a new [`Date`] from the provided `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid `YYYY-MM-DD` date.
    pub fn from_iso8601(input: &str) -> Result<Self, ParseError> {
        time::Date::parse(
            input.trim(),
            format_description!("[year]-[month]-[day]"),
        )
        .map(Self)
        .map_err(ParseError)
    }

    /// Returns this [`Date`] as a `YYYY-MM-DD` string.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        self.0
            .format(format_description!("[year]-[month]-[day]"))
            .unwrap_or_else(|e| panic!("cannot format `Date` as ISO 8601: {e}"))
    }

    /// Returns the year of this [`Date`].
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the [`Month`] of this [`Date`].
    #[must_use]
    pub fn month(&self) -> Month {
        self.0.month()
    }

    /// Returns the day of the month of this [`Date`].
    #[must_use]
    pub fn day(&self) -> u8 {
        self.0.day()
    }

    /// Checks whether this [`Date`] falls into the provided `month` of the
    /// provided `year`.
    #[must_use]
    pub fn is_in(&self, year: i32, month: Month) -> bool {
        self.year() == year && self.month() == month
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_iso8601(s)
    }
}

impl From<time::Date> for Date {
    fn from(date: time::Date) -> Self {
        Self(date)
    }
}

impl From<Date> for time::Date {
    fn from(date: Date) -> Self {
        date.0
    }
}

/// Error of parsing a [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("invalid `YYYY-MM-DD` date: {_0}")]
pub struct ParseError(time::error::Parse);

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

    use super::Date;

    impl Serialize for Date {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.serialize_str(&self.to_iso8601())
        }
    }

    impl<'de> Deserialize<'de> for Date {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let raw = String::deserialize(d)?;
            Self::from_iso8601(&raw).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Date, Month};

    #[test]
    fn parses_iso8601() {
        let date = Date::from_iso8601("2025-01-15").unwrap();

        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), Month::January);
        assert_eq!(date.day(), 15);

        assert_eq!(
            "2025-02-05".parse::<Date>().unwrap(),
            Date::from_calendar_date(2025, Month::February, 5).unwrap(),
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(Date::from_iso8601("").is_err());
        assert!(Date::from_iso8601("15/01/2025").is_err());
        assert!(Date::from_iso8601("2025-13-01").is_err());
        assert!(Date::from_iso8601("2025-02-30").is_err());
    }

    #[test]
    fn formats_iso8601() {
        let date = Date::from_calendar_date(2025, Month::September, 3).unwrap();

        assert_eq!(date.to_string(), "2025-09-03");
        assert_eq!(date.to_iso8601(), "2025-09-03");
    }

    #[test]
    fn orders_chronologically() {
        let jan = Date::from_iso8601("2025-01-20").unwrap();
        let feb = Date::from_iso8601("2025-02-05").unwrap();
        let prev = Date::from_iso8601("2024-12-31").unwrap();

        assert!(prev < jan);
        assert!(jan < feb);
        assert!(feb.is_in(2025, Month::February));
        assert!(!prev.is_in(2025, Month::December));
    }
}
