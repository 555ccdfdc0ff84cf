//! [`Product`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{product, store, Product},
    infra::{
        database::{
            self,
            memory::{Connection, Memory},
        },
        Database,
    },
};

impl<C> Database<Select<By<Vec<Product>, ()>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<Product>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Product>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.read(|c| c.products.values().cloned().collect())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Vec<Product>, store::Name>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<Product>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Product>, store::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        let store = by.into_inner();
        self.read(|c| {
            c.products
                .values()
                .filter(|p| p.store == store)
                .cloned()
                .collect()
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<product::New>> for Memory<C>
where
    C: Connection,
{
    type Ok = product::Id;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<product::New>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|c| {
            let key = c.products.insert_with(|key| new.with_id(key.into()));
            Ok(product::Id::from(key))
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Delete<By<Product, product::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Product, product::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.write(|c| {
            _ = c.products.remove(id.into());
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}
