//! Read entities definitions.

pub mod order;
pub mod report;

pub use self::report::MonthlyRevenue;
