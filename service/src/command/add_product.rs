//! [`Command`] for adding a new [`Product`].

use common::{operations::Insert, Money};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Store;
use crate::{
    domain::{product, store, Product},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for adding a new [`Product`].
///
/// Whether the [`Product`] is an egg product is decided by its
/// [`product::Name`] once, here.
#[derive(Clone, Debug)]
pub struct AddProduct {
    /// [`product::Name`] of the new [`Product`].
    pub name: product::Name,

    /// [`store::Name`] of the [`Store`] the new [`Product`] is bought in.
    pub store: store::Name,

    /// Price of the new [`Product`] per its [`product::Pricing`] unit.
    pub unit_price: Money,
}

impl<Db> Command<AddProduct> for Service<Db>
where
    Db: Database<
        Insert<product::New>,
        Ok = product::Id,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Product;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: AddProduct) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AddProduct {
            name,
            store,
            unit_price,
        } = cmd;
        let new = product::New::new(name, store, unit_price);

        let id = self
            .database()
            .execute(Insert(new.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(new.with_id(id))
    }
}

/// Error of [`AddProduct`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::{
        domain::{product, store},
        infra::Memory,
        query, Command as _, Config, Query as _, Service,
    };

    use super::AddProduct;

    fn cmd(name: &str, store: &str, cents: u32) -> AddProduct {
        AddProduct {
            name: product::Name::new(name).unwrap(),
            store: store::Name::new(store).unwrap(),
            unit_price: Money::cents(cents),
        }
    }

    #[tokio::test]
    async fn adds_exactly_one_product() {
        let svc = Service::new(Config::default(), Memory::new());
        let first = svc.execute(cmd("Farine", "LIDL", 560)).await.unwrap();

        let added = svc.execute(cmd("Œufs bio", "LECLERC", 320)).await.unwrap();

        assert_ne!(added.id, first.id);
        assert!(added.is_egg);
        let products = svc.execute(query::products::List::all()).await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(
            products.iter().filter(|p| p.id == added.id).count(),
            1,
        );
        assert_eq!(products[1], added);
    }

    #[tokio::test]
    async fn classifies_regular_products() {
        let svc = Service::new(Config::default(), Memory::new());

        let added = svc.execute(cmd("Farine", "LIDL", 560)).await.unwrap();

        assert!(!added.is_egg);
        assert_eq!(added.pricing(), product::Pricing::PerKilogram);
    }
}
