//! [`Query`] collection related to multiple [`Order`]s.

use common::operations::By;

use crate::domain::Order;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Order`]s in their insertion order.
pub type List = DatabaseQuery<By<Vec<Order>, ()>>;
