//! [`Query`] collection related to multiple [`Store`]s.

use common::operations::By;

use crate::domain::Store;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Store`]s in their insertion order.
pub type List = DatabaseQuery<By<Vec<Store>, ()>>;
