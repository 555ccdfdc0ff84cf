//! In-memory database client definitions.

use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tracerr::Traced;

#[cfg(feature = "snapshot")]
use crate::infra::database::memory::snapshot;
use crate::infra::database::{
    self,
    memory::{self, Collections, Connection},
};

/// Non-transactional in-memory database client.
///
/// Every operation locks the shared [`Collections`] for its own duration
/// only.
#[derive(Clone, Debug, Default)]
pub struct NonTx {
    /// Shared [`Collections`] of the database.
    collections: Arc<Mutex<Collections>>,

    /// [`snapshot::File`] every write is persisted into, if any.
    #[cfg(feature = "snapshot")]
    snapshot: Option<Arc<snapshot::File>>,
}

#[cfg(feature = "snapshot")]
impl NonTx {
    /// Creates a new [`NonTx`] client over the provided [`Collections`],
    /// persisting every write into the provided [`snapshot::File`].
    pub(super) fn persisted(
        collections: Collections,
        file: snapshot::File,
    ) -> Self {
        Self {
            collections: Arc::new(Mutex::new(collections)),
            snapshot: Some(Arc::new(file)),
        }
    }
}

/// Saves the provided [`Collections`] into the provided [`snapshot::File`],
/// if any.
#[cfg(feature = "snapshot")]
async fn persist(
    file: Option<&snapshot::File>,
    collections: &Collections,
) -> Result<(), memory::Error> {
    if let Some(file) = file {
        file.save(collections).await?;
    }
    Ok(())
}

impl Connection for NonTx {
    async fn read<F, R>(&self, f: F) -> Result<R, Traced<database::Error>>
    where
        F: FnOnce(&Collections) -> R,
    {
        Ok(f(&*self.collections.lock().await))
    }

    async fn write<F, R>(&self, f: F) -> Result<R, Traced<database::Error>>
    where
        F: FnOnce(&mut Collections) -> Result<R, memory::Error>,
    {
        let mut collections = self.collections.lock().await;

        #[cfg(feature = "snapshot")]
        if let Some(file) = self.snapshot.as_deref() {
            let mut working = collections.clone();
            let res = f(&mut working)
                .map_err(tracerr::from_and_wrap!(=> memory::Error))
                .map_err(tracerr::map_from)?;
            persist(Some(file), &working)
                .await
                .map_err(tracerr::from_and_wrap!(=> memory::Error))
                .map_err(tracerr::map_from)?;
            *collections = working;
            return Ok(res);
        }

        f(&mut *collections)
            .map_err(tracerr::from_and_wrap!(=> memory::Error))
            .map_err(tracerr::map_from)
    }
}

/// Transactional in-memory database client.
///
/// Holds the lock of the shared [`Collections`] until committed or dropped,
/// staging all the writes in a working copy. Dropping an uncommitted [`Tx`]
/// discards the working copy, and so does a commit failing to persist it.
#[derive(Clone, Debug)]
pub struct Tx {
    /// Staged state of this [`Tx`], if not committed yet.
    staged: Arc<Mutex<Option<Staged>>>,
}

/// Staged state of a [`Tx`].
#[derive(Debug)]
struct Staged {
    /// Lock of the shared [`Collections`].
    guard: OwnedMutexGuard<Collections>,

    /// Working copy of the [`Collections`] receiving all the writes.
    working: Collections,

    /// [`snapshot::File`] the working copy is persisted into on commit.
    #[cfg(feature = "snapshot")]
    snapshot: Option<Arc<snapshot::File>>,
}

impl Tx {
    /// Starts a new [`Tx`] over the [`Collections`] of the provided [`NonTx`]
    /// client, waiting for any other [`Tx`] to finish.
    pub async fn begin(client: &NonTx) -> Self {
        let guard = Arc::clone(&client.collections).lock_owned().await;
        let working = guard.clone();
        Self {
            staged: Arc::new(Mutex::new(Some(Staged {
                guard,
                working,
                #[cfg(feature = "snapshot")]
                snapshot: client.snapshot.clone(),
            }))),
        }
    }

    /// Commits this [`Tx`], publishing its working copy.
    ///
    /// # Errors
    ///
    /// If this [`Tx`] is committed already, or its working copy cannot be
    /// persisted.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let staged = self
            .staged
            .lock()
            .await
            .take()
            .ok_or(memory::Error::TxFinished)
            .map_err(tracerr::from_and_wrap!(=> memory::Error))
            .map_err(tracerr::map_from)?;

        #[cfg(feature = "snapshot")]
        persist(staged.snapshot.as_deref(), &staged.working)
            .await
            .map_err(tracerr::from_and_wrap!(=> memory::Error))
            .map_err(tracerr::map_from)?;

        let Staged {
            mut guard, working, ..
        } = staged;
        *guard = working;
        Ok(())
    }
}

impl Connection for Tx {
    async fn read<F, R>(&self, f: F) -> Result<R, Traced<database::Error>>
    where
        F: FnOnce(&Collections) -> R,
    {
        self.staged
            .lock()
            .await
            .as_ref()
            .map(|s| f(&s.working))
            .ok_or(memory::Error::TxFinished)
            .map_err(tracerr::from_and_wrap!(=> memory::Error))
            .map_err(tracerr::map_from)
    }

    async fn write<F, R>(&self, f: F) -> Result<R, Traced<database::Error>>
    where
        F: FnOnce(&mut Collections) -> Result<R, memory::Error>,
    {
        self.staged
            .lock()
            .await
            .as_mut()
            .ok_or(memory::Error::TxFinished)
            .and_then(|s| f(&mut s.working))
            .map_err(tracerr::from_and_wrap!(=> memory::Error))
            .map_err(tracerr::map_from)
    }
}
