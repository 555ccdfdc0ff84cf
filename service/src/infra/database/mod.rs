//! [`Database`]-related implementations.

pub mod memory;

use derive_more::{Display, Error as StdError, From};

pub use self::memory::Memory;

/// Database operation.
pub use common::Handler as Database;

/// Name of the unique index of [`Store`] names.
///
/// [`Store`]: crate::domain::Store
pub const STORE_NAME_INDEX: &str = "stores_name_idx";

/// [`Database`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Memory`] error.
    Memory(memory::Error),
}

impl Error {
    /// Checks if the error is a unique violation of the specified index.
    #[must_use]
    pub fn is_unique_violation(&self, index: Option<&str>) -> bool {
        match self {
            Self::Memory(e) => e.is_unique_violation(index),
        }
    }
}
