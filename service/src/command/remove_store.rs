//! [`Command`] for removing a [`Store`].

use common::operations::{By, Commit, Delete, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{store, Product, Store},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for removing a [`Store`].
///
/// A [`Store`] cannot be removed while any [`Product`] is bought in it.
#[derive(Clone, Copy, Debug, From)]
pub struct RemoveStore {
    /// ID of the [`Store`] to be removed.
    pub store_id: store::Id,
}

impl<Db> Command<RemoveStore> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Store>, store::Id>>,
            Ok = Option<Store>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Product>, store::Name>>,
            Ok = Vec<Product>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Store, store::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Store;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: RemoveStore) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RemoveStore { store_id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let store = tx
            .execute(Select(By::<Option<Store>, _>::new(store_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::StoreNotExists(store_id))
            .map_err(tracerr::wrap!())?;

        let products = tx
            .execute(Select(By::<Vec<Product>, _>::new(store.name.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !products.is_empty() {
            return Err(tracerr::new!(E::StoreInUse {
                name: store.name,
                products: products.len(),
            }));
        }

        tx.execute(Delete(By::new(store_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(store)
    }
}

/// Error of [`RemoveStore`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Store`] doesn't exist.
    #[display("`Store(id: {_0})` does not exist")]
    #[from(ignore)]
    StoreNotExists(#[error(not(source))] store::Id),

    /// [`Store`] is referenced by [`Product`]s.
    #[display("`Store(name: {name})` is used by {products} product(s)")]
    #[from(ignore)]
    StoreInUse {
        /// [`store::Name`] of the [`Store`].
        name: store::Name,

        /// Number of [`Product`]s bought in the [`Store`].
        products: usize,
    },
}
