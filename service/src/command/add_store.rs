//! [`Command`] for adding a new [`Store`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{store, Store},
    infra::{
        database::{self, STORE_NAME_INDEX},
        Database,
    },
    Service,
};

use super::Command;

/// [`Command`] for adding a new [`Store`].
#[derive(Clone, Debug, From)]
pub struct AddStore {
    /// [`store::Name`] of the new [`Store`].
    pub name: store::Name,
}

impl<Db> Command<AddStore> for Service<Db>
where
    Db: Database<
        Insert<store::New>,
        Ok = store::Id,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Store;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: AddStore) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let new = store::New { name: cmd.name };

        let id = self
            .database()
            .execute(Insert(new.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map_err(|e| {
                let occupied = matches!(
                    e.as_ref(),
                    E::Db(db)
                        if db.is_unique_violation(Some(STORE_NAME_INDEX)),
                );
                if occupied {
                    tracerr::new!(E::NameOccupied(new.name.clone()))
                } else {
                    e
                }
            })?;

        Ok(new.with_id(id))
    }
}

/// Error of [`AddStore`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`store::Name`] is occupied by another [`Store`].
    #[display("`Store(name: {_0})` already exists")]
    #[from(ignore)]
    NameOccupied(#[error(not(source))] store::Name),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::store, infra::Memory, query, Command as _, Config,
        Query as _, Service,
    };

    use super::{AddStore, ExecutionError};

    fn cmd(name: &str) -> AddStore {
        AddStore {
            name: store::Name::new(name).unwrap(),
        }
    }

    #[tokio::test]
    async fn adds_store() {
        let svc = Service::new(Config::default(), Memory::new());

        let added = svc.execute(cmd("Carrefour")).await.unwrap();

        let stores = svc.execute(query::stores::List::all()).await.unwrap();
        assert_eq!(stores, [added]);
    }

    #[tokio::test]
    async fn refuses_occupied_name() {
        let svc = Service::new(Config::default(), Memory::new());
        _ = svc.execute(cmd("LIDL")).await.unwrap();

        let err = svc.execute(cmd("LIDL")).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::NameOccupied(n) if n.as_str() == "LIDL",
        ));
        let stores = svc.execute(query::stores::List::all()).await.unwrap();
        assert_eq!(stores.len(), 1);
    }
}
