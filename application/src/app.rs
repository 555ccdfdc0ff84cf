//! [`App`] controller definitions.

use std::fmt;

use futures::future;
use service::{
    command::{
        self, add_order, add_product, add_store, change_payment_status,
        remove_order, remove_product, remove_store, seed, Command,
    },
    domain::{order, product, store, Order, Product, Recipe, Store},
    infra::database,
    query::{self, Query},
    Service,
};
use tracerr::Traced;
use tracing as log;

use crate::{
    define_error,
    error::Kind,
    forms::{self, OrderForm, ProductForm},
    AsError, Error,
};

define_error! {
    enum RecipeError {
        #[code = "RECIPE_LINE_NOT_EXISTS"]
        #[kind = Validation]
        #[message = "Recipe line does not exist"]
        LineNotExists,

        #[code = "PRODUCT_NOT_EXISTS"]
        #[kind = Validation]
        #[message = "`Product` does not exist"]
        ProductNotExists,
    }
}

/// [`Service`] able to execute every [`Command`] and [`Query`] the [`App`]
/// issues.
pub trait Backend:
    Command<seed::Seed, Ok = seed::Seeded, Err = Traced<seed::ExecutionError>>
    + Command<
        command::AddProduct,
        Ok = Product,
        Err = Traced<add_product::ExecutionError>,
    > + Command<
        command::RemoveProduct,
        Ok = (),
        Err = Traced<remove_product::ExecutionError>,
    > + Command<
        command::AddStore,
        Ok = Store,
        Err = Traced<add_store::ExecutionError>,
    > + Command<
        command::RemoveStore,
        Ok = Store,
        Err = Traced<remove_store::ExecutionError>,
    > + Command<
        command::AddOrder,
        Ok = Order,
        Err = Traced<add_order::ExecutionError>,
    > + Command<
        command::UpdateOrder,
        Ok = Order,
        Err = Traced<command::update_order::ExecutionError>,
    > + Command<
        command::ChangePaymentStatus,
        Ok = Order,
        Err = Traced<change_payment_status::ExecutionError>,
    > + Command<
        command::RemoveOrder,
        Ok = (),
        Err = Traced<remove_order::ExecutionError>,
    > + Query<
        query::products::List,
        Ok = Vec<Product>,
        Err = Traced<database::Error>,
    > + Query<
        query::stores::List,
        Ok = Vec<Store>,
        Err = Traced<database::Error>,
    > + Query<
        query::orders::List,
        Ok = Vec<Order>,
        Err = Traced<database::Error>,
    >
{
}

impl<S> Backend for S where
    S: Command<
            seed::Seed,
            Ok = seed::Seeded,
            Err = Traced<seed::ExecutionError>,
        > + Command<
            command::AddProduct,
            Ok = Product,
            Err = Traced<add_product::ExecutionError>,
        > + Command<
            command::RemoveProduct,
            Ok = (),
            Err = Traced<remove_product::ExecutionError>,
        > + Command<
            command::AddStore,
            Ok = Store,
            Err = Traced<add_store::ExecutionError>,
        > + Command<
            command::RemoveStore,
            Ok = Store,
            Err = Traced<remove_store::ExecutionError>,
        > + Command<
            command::AddOrder,
            Ok = Order,
            Err = Traced<add_order::ExecutionError>,
        > + Command<
            command::UpdateOrder,
            Ok = Order,
            Err = Traced<command::update_order::ExecutionError>,
        > + Command<
            command::ChangePaymentStatus,
            Ok = Order,
            Err = Traced<change_payment_status::ExecutionError>,
        > + Command<
            command::RemoveOrder,
            Ok = (),
            Err = Traced<remove_order::ExecutionError>,
        > + Query<
            query::products::List,
            Ok = Vec<Product>,
            Err = Traced<database::Error>,
        > + Query<
            query::stores::List,
            Ok = Vec<Store>,
            Err = Traced<database::Error>,
        > + Query<
            query::orders::List,
            Ok = Vec<Order>,
            Err = Traced<database::Error>,
        >
{
}

/// Last loaded copy of all the collections.
#[derive(Clone, Debug, Default)]
pub struct State {
    /// All the [`Product`]s, in their insertion order.
    pub products: Vec<Product>,

    /// All the [`Store`]s, in their insertion order.
    pub stores: Vec<Store>,

    /// All the [`Order`]s, in their insertion order.
    pub orders: Vec<Order>,
}

/// Interactive confirmation of destructive [`Intent`]s.
pub trait Confirm {
    /// Asks the user the provided `question`, returning whether they agreed.
    fn confirm(&self, question: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, question: &str) -> bool {
        self(question)
    }
}

/// User action routed into the [`App`].
#[derive(Clone, Debug)]
pub enum Intent {
    /// Add a new [`Product`].
    AddProduct(ProductForm),

    /// Remove the [`Product`] with the provided ID, once confirmed.
    RemoveProduct(product::Id),

    /// Check whether the product name being typed denotes eggs.
    PreviewProductName(String),

    /// Add a new [`Store`] with the provided raw name.
    AddStore(String),

    /// Remove the [`Store`] with the provided ID, once confirmed.
    ///
    /// Refused while any [`Product`] is bought in it.
    RemoveStore(store::Id),

    /// Add a new [`Order`].
    AddOrder(OrderForm),

    /// Replace the [`Order`] with the provided ID.
    UpdateOrder(order::Id, OrderForm),

    /// Change only the payment status of the [`Order`] with the provided ID.
    ChangePaymentStatus(order::Id, order::PaymentStatus),

    /// Remove the [`Order`] with the provided ID, once confirmed.
    RemoveOrder(order::Id),

    /// Append a blank [`Recipe`] line.
    AddRecipeLine,

    /// Remove the [`Recipe`] line at the provided index.
    RemoveRecipeLine(usize),

    /// Select a [`Product`] (or clear the selection) in a [`Recipe`] line.
    SelectRecipeProduct {
        /// Index of the line.
        line: usize,

        /// ID of the [`Product`] to select.
        product: Option<product::Id>,
    },

    /// Enter a raw quantity in a [`Recipe`] line.
    SetRecipeQuantity {
        /// Index of the line.
        line: usize,

        /// Raw quantity, blank to clear.
        quantity: String,
    },
}

impl Intent {
    /// Returns the name of this [`Intent`] for diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddProduct(_) => "add_product",
            Self::RemoveProduct(_) => "remove_product",
            Self::PreviewProductName(_) => "preview_product_name",
            Self::AddStore(_) => "add_store",
            Self::RemoveStore(_) => "remove_store",
            Self::AddOrder(_) => "add_order",
            Self::UpdateOrder(..) => "update_order",
            Self::ChangePaymentStatus(..) => "change_payment_status",
            Self::RemoveOrder(_) => "remove_order",
            Self::AddRecipeLine => "add_recipe_line",
            Self::RemoveRecipeLine(_) => "remove_recipe_line",
            Self::SelectRecipeProduct { .. } => "select_recipe_product",
            Self::SetRecipeQuantity { .. } => "set_recipe_quantity",
        }
    }
}

/// Result of a successfully dispatched [`Intent`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// [`Intent`] is applied.
    Done,

    /// User declined the confirmation, nothing is changed.
    Cancelled,

    /// Indicator whether the previewed product name denotes eggs.
    EggPreview(bool),
}

/// Converts the provided `err` into an [`Error`], logging storage failures.
fn report<E: AsError + fmt::Display>(err: E) -> Error {
    let error = err.as_error();
    if error.kind == Kind::Storage {
        log::error!(code = error.code, "storage operation failed: {err}");
    }
    error
}

/// Controller owning the [`State`] and the [`Recipe`] simulator.
///
/// Mutated through [`App::dispatch()`] only.
#[derive(Debug)]
pub struct App<Db> {
    /// [`Service`] executing [`Command`]s and [`Query`]s.
    service: Service<Db>,

    /// Last loaded [`State`].
    state: State,

    /// [`Recipe`] being simulated.
    recipe: Recipe,
}

impl<Db> App<Db>
where
    Service<Db>: Backend,
{
    /// Opens a new [`App`] on top of the provided [`Service`], seeding empty
    /// collections and loading the [`State`].
    ///
    /// # Errors
    ///
    /// With a [`Kind::Storage`] [`Error`] if seeding or loading fails.
    #[tracing::instrument(skip_all)]
    pub async fn open(service: Service<Db>) -> Result<Self, Error> {
        _ = service.execute(seed::Seed).await.map_err(report)?;

        let (products, stores, orders) = future::try_join3(
            service.execute(query::products::List::all()),
            service.execute(query::stores::List::all()),
            service.execute(query::orders::List::all()),
        )
        .await
        .map_err(report)?;

        log::debug!(
            products = products.len(),
            stores = stores.len(),
            orders = orders.len(),
            "loaded state"
        );

        Ok(Self {
            service,
            state: State {
                products,
                stores,
                orders,
            },
            recipe: Recipe::default(),
        })
    }

    /// Returns the current [`State`] of this [`App`].
    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Returns the [`Recipe`] simulated by this [`App`].
    #[must_use]
    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Returns the [`Service`] of this [`App`].
    #[must_use]
    pub fn service(&self) -> &Service<Db> {
        &self.service
    }

    /// Applies the provided [`Intent`].
    ///
    /// Destructive [`Intent`]s ask the provided [`Confirm`] first. The
    /// affected collection is reloaded after each successful mutation.
    ///
    /// # Errors
    ///
    /// - With a [`Kind::Validation`] [`Error`] if the input is invalid;
    /// - with a [`Kind::Guard`] [`Error`] if the mutation is refused;
    /// - with a [`Kind::Storage`] [`Error`] if storage fails.
    ///
    /// The [`State`] is left untouched on any [`Error`].
    ///
    /// [`Kind::Validation`]: crate::error::Kind::Validation
    /// [`Kind::Guard`]: crate::error::Kind::Guard
    #[tracing::instrument(skip_all, fields(intent = intent.name()))]
    pub async fn dispatch(
        &mut self,
        intent: Intent,
        confirm: &impl Confirm,
    ) -> Result<Outcome, Error> {
        match intent {
            Intent::AddProduct(form) => {
                let cmd = form.parse()?;
                _ = self.service.execute(cmd).await.map_err(report)?;
                self.reload_products().await?;
            }
            Intent::RemoveProduct(product_id) => {
                if !confirm.confirm("Remove this product?") {
                    return Ok(Outcome::Cancelled);
                }
                self.service
                    .execute(command::RemoveProduct { product_id })
                    .await
                    .map_err(report)?;
                self.reload_products().await?;
            }
            Intent::PreviewProductName(name) => {
                return Ok(Outcome::EggPreview(product::is_egg_name(&name)));
            }
            Intent::AddStore(name) => {
                let cmd = forms::new_store(&name)?;
                _ = self.service.execute(cmd).await.map_err(report)?;
                self.reload_stores().await?;
            }
            Intent::RemoveStore(store_id) => {
                if let Some(store) =
                    self.state.stores.iter().find(|s| s.id == store_id)
                {
                    let products = self
                        .state
                        .products
                        .iter()
                        .filter(|p| p.store == store.name)
                        .count();
                    if products > 0 {
                        return Err(remove_store::ExecutionError::StoreInUse {
                            name: store.name.clone(),
                            products,
                        }
                        .into_error());
                    }
                }
                if !confirm.confirm("Remove this store?") {
                    return Ok(Outcome::Cancelled);
                }
                _ = self
                    .service
                    .execute(command::RemoveStore { store_id })
                    .await
                    .map_err(report)?;
                self.reload_stores().await?;
            }
            Intent::AddOrder(form) => {
                let details = form.parse()?;
                _ = self
                    .service
                    .execute(command::AddOrder { details })
                    .await
                    .map_err(report)?;
                self.reload_orders().await?;
            }
            Intent::UpdateOrder(order_id, form) => {
                let details = form.parse()?;
                _ = self
                    .service
                    .execute(command::UpdateOrder { order_id, details })
                    .await
                    .map_err(report)?;
                self.reload_orders().await?;
            }
            Intent::ChangePaymentStatus(order_id, status) => {
                _ = self
                    .service
                    .execute(command::ChangePaymentStatus { order_id, status })
                    .await
                    .map_err(report)?;
                self.reload_orders().await?;
            }
            Intent::RemoveOrder(order_id) => {
                if !confirm.confirm("Remove this order?") {
                    return Ok(Outcome::Cancelled);
                }
                self.service
                    .execute(command::RemoveOrder { order_id })
                    .await
                    .map_err(report)?;
                self.reload_orders().await?;
            }
            Intent::AddRecipeLine => {
                _ = self.recipe.add_line();
            }
            Intent::RemoveRecipeLine(line) => {
                _ = self
                    .recipe
                    .remove_line(line)
                    .ok_or(RecipeError::LineNotExists)?;
            }
            Intent::SelectRecipeProduct { line, product } => {
                let product = product
                    .map(|id| {
                        self.state
                            .products
                            .iter()
                            .find(|p| p.id == id)
                            .cloned()
                            .ok_or(RecipeError::ProductNotExists)
                    })
                    .transpose()?;
                self.recipe
                    .line_mut(line)
                    .ok_or(RecipeError::LineNotExists)?
                    .select(product);
            }
            Intent::SetRecipeQuantity { line, quantity } => {
                let quantity = forms::quantity(&quantity)?;
                self.recipe
                    .line_mut(line)
                    .ok_or(RecipeError::LineNotExists)?
                    .set_quantity(quantity);
            }
        }
        Ok(Outcome::Done)
    }

    /// Reloads [`State::products`] from the storage.
    async fn reload_products(&mut self) -> Result<(), Error> {
        self.state.products = self
            .service
            .execute(query::products::List::all())
            .await
            .map_err(report)?;
        Ok(())
    }

    /// Reloads [`State::stores`] from the storage.
    async fn reload_stores(&mut self) -> Result<(), Error> {
        self.state.stores = self
            .service
            .execute(query::stores::List::all())
            .await
            .map_err(report)?;
        Ok(())
    }

    /// Reloads [`State::orders`] from the storage.
    async fn reload_orders(&mut self) -> Result<(), Error> {
        self.state.orders = self
            .service
            .execute(query::orders::List::all())
            .await
            .map_err(report)?;
        Ok(())
    }
}
