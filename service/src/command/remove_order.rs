//! [`Command`] for removing an [`Order`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{order, Order},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for removing an [`Order`].
///
/// Removing a missing [`Order`] does nothing.
#[derive(Clone, Copy, Debug, From)]
pub struct RemoveOrder {
    /// ID of the [`Order`] to be removed.
    pub order_id: order::Id,
}

impl<Db> Command<RemoveOrder> for Service<Db>
where
    Db: Database<
        Delete<By<Order, order::Id>>,
        Ok = (),
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: RemoveOrder) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.database()
            .execute(Delete(By::new(cmd.order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`RemoveOrder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
