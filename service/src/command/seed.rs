//! [`Command`] for populating empty collections with the default records.

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    Date, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{order, product, store, Order, Product, Store},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for populating empty collections with the default records.
///
/// Every collection is checked and populated in its own transaction, and
/// only if it holds no records at all. Does nothing if
/// [`Config::seed_defaults`] is disabled.
///
/// [`Config::seed_defaults`]: crate::Config::seed_defaults
#[derive(Clone, Copy, Debug)]
pub struct Seed;

/// Numbers of records inserted by the [`Seed`] [`Command`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Seeded {
    /// Number of inserted [`Product`]s.
    pub products: usize,

    /// Number of inserted [`Store`]s.
    pub stores: usize,

    /// Number of inserted [`Order`]s.
    pub orders: usize,
}

impl<Db> Command<Seed> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Vec<Product>, ()>>,
            Ok = Vec<Product>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Store>, ()>>,
            Ok = Vec<Store>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Order>, ()>>,
            Ok = Vec<Order>,
            Err = Traced<database::Error>,
        > + Database<
            Insert<product::New>,
            Ok = product::Id,
            Err = Traced<database::Error>,
        > + Database<
            Insert<store::New>,
            Ok = store::Id,
            Err = Traced<database::Error>,
        > + Database<
            Insert<order::Details>,
            Ok = order::Id,
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Seeded;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: Seed) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        if !self.config().seed_defaults {
            return Ok(Seeded::default());
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let mut products = 0;
        if tx
            .execute(Select(By::<Vec<Product>, _>::all()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .is_empty()
        {
            for p in self::products() {
                _ = tx
                    .execute(Insert(p))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?;
                products += 1;
            }
        }
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let mut stores = 0;
        if tx
            .execute(Select(By::<Vec<Store>, _>::all()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .is_empty()
        {
            for s in self::stores() {
                _ = tx
                    .execute(Insert(s))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?;
                stores += 1;
            }
        }
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let mut orders = 0;
        if tx
            .execute(Select(By::<Vec<Order>, _>::all()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .is_empty()
        {
            for o in self::orders() {
                _ = tx
                    .execute(Insert(o))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?;
                orders += 1;
            }
        }
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let seeded = Seeded {
            products,
            stores,
            orders,
        };
        if seeded != Seeded::default() {
            log::info!(
                products = seeded.products,
                stores = seeded.stores,
                orders = seeded.orders,
                "populated empty collections with default records"
            );
        }
        Ok(seeded)
    }
}

/// Error of [`Seed`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

/// Returns the default [`Product`]s.
#[expect(clippy::missing_panics_doc, reason = "infallible")]
#[must_use]
pub fn products() -> Vec<product::New> {
    [
        ("Beurre", "LECLERC", 940),
        ("Farine", "LIDL", 560),
        ("Sucre glace", "Netto", 460),
        ("Œufs", "LECLERC", 250),
    ]
    .into_iter()
    .map(|(name, store, cents)| {
        product::New::new(
            product::Name::new(name).expect("valid default `product::Name`"),
            store::Name::new(store).expect("valid default `store::Name`"),
            Money::cents(cents),
        )
    })
    .collect()
}

/// Returns the default [`Store`]s.
#[expect(clippy::missing_panics_doc, reason = "infallible")]
#[must_use]
pub fn stores() -> Vec<store::New> {
    ["LECLERC", "LIDL", "Netto"]
        .into_iter()
        .map(|name| store::New {
            name: store::Name::new(name).expect("valid default `store::Name`"),
        })
        .collect()
}

/// Returns the default [`Order`]s.
#[expect(clippy::missing_panics_doc, reason = "infallible")]
#[must_use]
pub fn orders() -> Vec<order::Details> {
    /// Raw default [`Order`].
    struct Raw {
        date: &'static str,
        description: &'static str,
        gift_message: Option<&'static str>,
        servings: u16,
        last_name: &'static str,
        first_name: &'static str,
        phone: &'static str,
        price: u32,
        payment: order::PaymentStatus,
        deposit: u32,
        note: &'static str,
    }

    [
        Raw {
            date: "2025-01-15",
            description: "Gâteau au chocolat",
            gift_message: Some("Joyeux Anniversaire"),
            servings: 12,
            last_name: "Dupont",
            first_name: "Marie",
            phone: "06 12 34 56 78",
            price: 4500,
            payment: order::PaymentStatus::Paid,
            deposit: 0,
            note: "À livrer avant 16h",
        },
        Raw {
            date: "2025-01-20",
            description: "Tarte aux pommes",
            gift_message: None,
            servings: 8,
            last_name: "Martin",
            first_name: "Pierre",
            phone: "07 89 45 12 36",
            price: 2850,
            payment: order::PaymentStatus::Deposit,
            deposit: 1500,
            note: "Sans gluten",
        },
        Raw {
            date: "2025-02-05",
            description: "Cheesecake framboise",
            gift_message: Some("Félicitations"),
            servings: 10,
            last_name: "Leroy",
            first_name: "Sophie",
            phone: "06 98 76 54 32",
            price: 5200,
            payment: order::PaymentStatus::Paid,
            deposit: 0,
            note: "Sans sucre ajouté",
        },
    ]
    .into_iter()
    .map(|raw| order::Details {
        date: Date::from_iso8601(raw.date).expect("valid default `Date`"),
        description: order::Description::new(raw.description)
            .expect("valid default `order::Description`"),
        gift_message: raw.gift_message.and_then(order::GiftMessage::new),
        servings: order::Servings::new(raw.servings)
            .expect("valid default `order::Servings`"),
        customer: order::Customer {
            last_name: order::LastName::new(raw.last_name)
                .expect("valid default `order::LastName`"),
            first_name: order::FirstName::new(raw.first_name)
                .expect("valid default `order::FirstName`"),
            phone: order::Phone::new(raw.phone)
                .expect("valid default `order::Phone`"),
        },
        price: Money::cents(raw.price),
        payment: raw.payment,
        deposit: Money::cents(raw.deposit),
        note: order::Note::new(raw.note),
    })
    .collect()
}
