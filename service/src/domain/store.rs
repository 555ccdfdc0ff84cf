//! [`Store`] definitions.

use common::define_text;
use derive_more::{Display, From, FromStr, Into};

#[cfg(doc)]
use crate::domain::Product;

/// Store where [`Product`]s are bought.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Store {
    /// ID of this [`Store`].
    pub id: Id,

    /// [`Name`] of this [`Store`], unique among all [`Store`]s.
    pub name: Name,
}

/// [`Store`] which is not stored yet.
#[derive(Clone, Debug, Eq, From, PartialEq)]
pub struct New {
    /// [`Name`] of the new [`Store`].
    pub name: Name,
}

impl New {
    /// Converts this [`New`] into a [`Store`] with the provided [`Id`].
    #[must_use]
    pub fn with_id(self, id: Id) -> Store {
        Store {
            id,
            name: self.name,
        }
    }
}

/// ID of a [`Store`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct Id(i64);

define_text! {
    #[doc = "Name of a [`Store`]."]
    struct Name;
}
