//! [`Command`] for changing an [`order::PaymentStatus`].

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

/// [`Command`] for changing an [`order::PaymentStatus`] of an [`Order`].
///
/// Only the [`order::PaymentStatus`] is replaced, while the stored deposit is
/// kept as is, whatever the new status is.
#[derive(Clone, Copy, Debug)]
pub struct ChangePaymentStatus {
    /// ID of the [`Order`] to change the [`order::PaymentStatus`] of.
    pub order_id: order::Id,

    /// New [`order::PaymentStatus`] of the [`Order`].
    pub status: order::PaymentStatus,
}

impl<Db> Command<ChangePaymentStatus> for Service<Db>
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

    async fn execute(
        &self,
        cmd: ChangePaymentStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ChangePaymentStatus { order_id, status } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut order = tx
            .execute(Select(By::<Option<Order>, _>::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OrderNotExists(order_id))
            .map_err(tracerr::wrap!())?;
        if order.details.payment == status {
            return Ok(order);
        }

        order.details.payment = status;
        tx.execute(Update(order.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(order)
    }
}

/// Error of [`ChangePaymentStatus`] [`Command`] execution.
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

    use super::{ChangePaymentStatus, ExecutionError};

    #[tokio::test]
    async fn keeps_stored_deposit() {
        let svc = Service::new(Config::default(), Memory::new());
        _ = svc.execute(Seed).await.unwrap();
        let tart = svc.execute(query::orders::List::all()).await.unwrap()[1]
            .clone();
        assert_eq!(tart.details.payment, PaymentStatus::Deposit);

        let changed = svc
            .execute(ChangePaymentStatus {
                order_id: tart.id,
                status: PaymentStatus::Paid,
            })
            .await
            .unwrap();

        assert_eq!(changed.details.payment, PaymentStatus::Paid);
        assert_eq!(changed.details.deposit, Money::cents(1500));
        assert_eq!(changed.details.shown_deposit(), None);
        let stored = svc.execute(query::orders::List::all()).await.unwrap()[1]
            .clone();
        assert_eq!(stored, changed);
        assert_eq!(stored.details.description, tart.details.description);
    }

    #[tokio::test]
    async fn reports_missing_order() {
        let svc = Service::new(Config::default(), Memory::new());

        let err = svc
            .execute(ChangePaymentStatus {
                order_id: order::Id::from(1_i64),
                status: PaymentStatus::Paid,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::OrderNotExists(_)));
    }
}
