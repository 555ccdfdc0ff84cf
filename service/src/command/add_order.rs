//! [`Command`] for adding a new [`Order`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{order, Order},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for adding a new [`Order`].
///
/// The deposit is zeroed unless the [`order::PaymentStatus`] is
/// [`order::PaymentStatus::Deposit`].
#[derive(Clone, Debug, From)]
pub struct AddOrder {
    /// [`order::Details`] of the new [`Order`].
    pub details: order::Details,
}

impl<Db> Command<AddOrder> for Service<Db>
where
    Db: Database<
        Insert<order::Details>,
        Ok = order::Id,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Order;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: AddOrder) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let details = cmd.details.with_consistent_deposit();

        let id = self
            .database()
            .execute(Insert(details.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(details.with_id(id))
    }
}

/// Error of [`AddOrder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
