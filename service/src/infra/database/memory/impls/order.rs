//! [`Order`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{order, Order},
    infra::{
        database::{
            self,
            memory::{Connection, Memory},
        },
        Database,
    },
};

impl<C> Database<Select<By<Vec<Order>, ()>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<Order>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Order>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.read(|c| c.orders.values().cloned().collect())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Option<Order>, order::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<Order>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Order>, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|c| c.orders.get(id.into()).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<order::Details>> for Memory<C>
where
    C: Connection,
{
    type Ok = order::Id;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(details): Insert<order::Details>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|c| {
            let key = c.orders.insert_with(|key| details.with_id(key.into()));
            Ok(order::Id::from(key))
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Order>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(order): Update<Order>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|c| {
            c.orders.put(order.id.into(), order);
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Delete<By<Order, order::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Order, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.write(|c| {
            _ = c.orders.remove(id.into());
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}
