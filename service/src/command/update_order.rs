//! [`Command`] for updating an [`Order`].

use common::operations::{
    By, Commit, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{order, Order},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for fully replacing an existing [`Order`].
///
/// The deposit is zeroed unless the [`order::PaymentStatus`] is
/// [`order::PaymentStatus::Deposit`].
#[derive(Clone, Debug)]
pub struct UpdateOrder {
    /// ID of the [`Order`] to be updated.
    pub order_id: order::Id,

    /// New [`order::Details`] of the [`Order`].
    pub details: order::Details,
}

impl<Db> Command<UpdateOrder> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Order>, order::Id>>,
            Ok = Option<Order>,
            Err = Traced<database::Error>,
        > + Database<Update<Order>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Order;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateOrder) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateOrder { order_id, details } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Select(By::<Option<Order>, _>::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OrderNotExists(order_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let order = details.with_consistent_deposit().with_id(order_id);
        tx.execute(Update(order.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(order)
    }
}

/// Error of [`UpdateOrder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Order`] doesn't exist.
    #[display("`Order(id: {_0})` does not exist")]
    #[from(ignore)]
    OrderNotExists(#[error(not(source))] order::Id),
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::{
        command::Seed,
        domain::order::{self, PaymentStatus},
        infra::Memory,
        query, Command as _, Config, Query as _, Service,
    };

    use super::{ExecutionError, UpdateOrder};

    #[tokio::test]
    async fn replaces_only_updated_order() {
        let svc = Service::new(Config::default(), Memory::new());
        _ = svc.execute(Seed).await.unwrap();
        let before = svc.execute(query::orders::List::all()).await.unwrap();
        let mut details = before[0].details.clone();
        details.servings = order::Servings::new(20).unwrap();
        details.note = None;

        let updated = svc
            .execute(UpdateOrder {
                order_id: before[0].id,
                details,
            })
            .await
            .unwrap();

        let after = svc.execute(query::orders::List::all()).await.unwrap();
        assert_eq!(after.len(), before.len());
        assert_eq!(after[0], updated);
        assert_eq!(after[0].details.servings.get(), 20);
        assert_eq!(after[0].details.note, None);
        assert_eq!(after[1..], before[1..]);
    }

    #[tokio::test]
    async fn zeroes_deposit_of_paid_status() {
        let svc = Service::new(Config::default(), Memory::new());
        _ = svc.execute(Seed).await.unwrap();
        let before = svc.execute(query::orders::List::all()).await.unwrap();
        let tart = &before[1];
        assert_eq!(tart.details.deposit, Money::cents(1500));
        let mut details = tart.details.clone();
        details.payment = PaymentStatus::Paid;

        let updated = svc
            .execute(UpdateOrder {
                order_id: tart.id,
                details,
            })
            .await
            .unwrap();

        assert_eq!(updated.details.deposit, Money::ZERO);
    }

    #[tokio::test]
    async fn reports_missing_order() {
        let svc = Service::new(Config::default(), Memory::new());
        _ = svc.execute(Seed).await.unwrap();
        let before = svc.execute(query::orders::List::all()).await.unwrap();

        let err = svc
            .execute(UpdateOrder {
                order_id: order::Id::from(77_i64),
                details: before[0].details.clone(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::OrderNotExists(_)));
        let after = svc.execute(query::orders::List::all()).await.unwrap();
        assert_eq!(after, before);
    }
}
