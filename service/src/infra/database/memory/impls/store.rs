//! [`Store`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{store, Store},
    infra::{
        database::{
            self,
            memory::{self, Collection, Connection, Memory},
            STORE_NAME_INDEX,
        },
        Database,
    },
};

/// Ensures no [`Store`] is named as `name` yet.
fn check_unique_name(
    stores: &Collection<Store>,
    name: &store::Name,
) -> Result<(), memory::Error> {
    if stores.values().any(|s| s.name == *name) {
        Err(memory::Error::UniqueViolation(STORE_NAME_INDEX))
    } else {
        Ok(())
    }
}

impl<C> Database<Select<By<Vec<Store>, ()>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<Store>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Store>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.read(|c| c.stores.values().cloned().collect())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Option<Store>, store::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<Store>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Store>, store::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|c| c.stores.get(id.into()).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<store::New>> for Memory<C>
where
    C: Connection,
{
    type Ok = store::Id;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<store::New>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|c| {
            check_unique_name(&c.stores, &new.name)?;
            let key = c.stores.insert_with(|key| new.with_id(key.into()));
            Ok(store::Id::from(key))
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Delete<By<Store, store::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Store, store::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.write(|c| {
            _ = c.stores.remove(id.into());
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Insert, Select};

    use crate::{
        domain::{store, Store},
        infra::{database::STORE_NAME_INDEX, Database as _, Memory},
    };

    fn new(name: &str) -> store::New {
        store::New {
            name: store::Name::new(name).unwrap(),
        }
    }

    #[tokio::test]
    async fn refuses_duplicate_names() {
        let db = Memory::new();
        _ = db.execute(Insert(new("LIDL"))).await.unwrap();

        let err = db.execute(Insert(new("LIDL"))).await.unwrap_err();

        assert!(err.as_ref().is_unique_violation(Some(STORE_NAME_INDEX)));
        let stores = db
            .execute(Select(By::<Vec<Store>, _>::all()))
            .await
            .unwrap();
        assert_eq!(stores.len(), 1);
    }
}
