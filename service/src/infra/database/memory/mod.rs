//! In-memory [`Database`] implementation.

pub mod client;
pub mod collection;
mod impls;
#[cfg(feature = "snapshot")]
pub mod snapshot;

use std::future::Future;

use derive_more::{Deref, Display, Error as StdError};
use tracerr::Traced;

use crate::infra::database;
#[cfg(doc)]
use crate::infra::Database;

pub use self::{
    client::{NonTx, Tx},
    collection::{Collection, Collections},
};

/// In-memory [`Database`] client.
///
/// All the clones of a [`Memory`] client share the same [`Collections`].
/// Opened with a [`snapshot::File`], every committed write is persisted
/// into it.
#[derive(Clone, Debug, Default, Deref)]
pub struct Memory<T = NonTx>(T);

impl Memory {
    /// Creates a new [`Memory`] database with empty [`Collections`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a [`Memory`] database persisted into the provided snapshot
    /// [`snapshot::File`], restoring the [`Collections`] saved in it.
    ///
    /// # Errors
    ///
    /// If the [`snapshot::File`] cannot be loaded.
    #[cfg(feature = "snapshot")]
    pub async fn open(
        file: snapshot::File,
    ) -> Result<Self, Traced<database::Error>> {
        let collections = file
            .load()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        Ok(Self(NonTx::persisted(collections, file)))
    }
}

/// In-memory database [`Error`].
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// Unique index violation.
    #[display("Unique index `{_0}` violated")]
    UniqueViolation(#[error(not(source))] &'static str),

    /// Operation on an already committed transaction.
    #[display("Transaction is already committed")]
    TxFinished,

    /// Snapshot [`snapshot::File`] failure.
    #[cfg(feature = "snapshot")]
    #[display("Snapshot failed: {_0}")]
    Snapshot(snapshot::Error),
}

#[cfg(feature = "snapshot")]
impl From<snapshot::Error> for Error {
    fn from(e: snapshot::Error) -> Self {
        Self::Snapshot(e)
    }
}

impl Error {
    /// Checks if the error is a unique violation of the specified index.
    #[must_use]
    pub fn is_unique_violation(&self, index: Option<&str>) -> bool {
        match self {
            Self::UniqueViolation(i) => index.map_or(true, |idx| idx == *i),
            Self::TxFinished => false,
            #[cfg(feature = "snapshot")]
            Self::Snapshot(_) => false,
        }
    }
}

/// Generic in-memory database connection.
pub trait Connection {
    /// Reads the [`Collections`] visible to this [`Connection`] with the
    /// provided function.
    ///
    /// # Errors
    ///
    /// If this [`Connection`] cannot be used anymore.
    fn read<F, R>(
        &self,
        f: F,
    ) -> impl Future<Output = Result<R, Traced<database::Error>>>
    where
        F: FnOnce(&Collections) -> R;

    /// Modifies the [`Collections`] visible to this [`Connection`] with the
    /// provided function.
    ///
    /// The function must check every constraint before modifying anything,
    /// so a failed write leaves the [`Collections`] intact. A write that
    /// cannot be persisted leaves them intact too.
    ///
    /// # Errors
    ///
    /// If this [`Connection`] cannot be used anymore, or the provided
    /// function fails.
    fn write<F, R>(
        &self,
        f: F,
    ) -> impl Future<Output = Result<R, Traced<database::Error>>>
    where
        F: FnOnce(&mut Collections) -> Result<R, Error>;
}
