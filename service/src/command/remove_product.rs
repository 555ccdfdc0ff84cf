//! [`Command`] for removing a [`Product`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{product, Product},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for removing a [`Product`].
///
/// Removing a missing [`Product`] does nothing.
#[derive(Clone, Copy, Debug, From)]
pub struct RemoveProduct {
    /// ID of the [`Product`] to be removed.
    pub product_id: product::Id,
}

impl<Db> Command<RemoveProduct> for Service<Db>
where
    Db: Database<
        Delete<By<Product, product::Id>>,
        Ok = (),
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RemoveProduct,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.database()
            .execute(Delete(By::new(cmd.product_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`RemoveProduct`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
