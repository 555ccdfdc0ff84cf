//! View models built from the [`State`].
//!
//! Rendering them into markup is up to the caller, the models only carry
//! display-ready values.

use common::{Month, Money};
use serde::Serialize;
use service::{
    domain::{order, recipe, Order, Product, Recipe, Store},
    read::{self, order::MonthPartition},
};

use crate::State;

/// Everything displayed on the main screen.
#[derive(Clone, Debug, Serialize)]
pub struct Dashboard {
    /// Rows of the products table.
    pub products: Vec<ProductRow>,

    /// Rows of the stores table.
    pub stores: Vec<StoreRow>,

    /// Options of the store select of the product form.
    pub store_options: Vec<SelectOption>,

    /// Rows of the orders table, latest first.
    pub orders: Vec<OrderRow>,

    /// Revenue of every month of the year, January first.
    pub revenue: Vec<RevenueCard>,

    /// [`Order`]s due in the highlighted month.
    pub current_month: MonthCards,

    /// [`Order`]s due in the other months of the year.
    pub other_months: MonthCards,
}

impl Dashboard {
    /// Builds a new [`Dashboard`] of the provided [`State`] for the provided
    /// `year`, highlighting the provided `month`.
    #[must_use]
    pub fn new(state: &State, year: i32, month: Month) -> Self {
        let mut sorted = state.orders.clone();
        read::order::sort_by_date_desc(&mut sorted);

        let MonthPartition { current, others } =
            MonthPartition::new(&sorted, year, month);

        Self {
            products: state.products.iter().map(ProductRow::new).collect(),
            stores: state.stores.iter().map(StoreRow::new).collect(),
            store_options: state
                .stores
                .iter()
                .map(|s| SelectOption {
                    value: s.name.to_string(),
                    label: s.name.to_string(),
                })
                .collect(),
            orders: sorted.iter().map(OrderRow::new).collect(),
            revenue: read::MonthlyRevenue::new(year, &state.orders)
                .iter()
                .map(|(month, total)| RevenueCard {
                    month: month.to_string(),
                    total: total.to_string(),
                })
                .collect(),
            current_month: MonthCards::new(
                format!("{month} {year}"),
                &current,
                "No orders this month",
            ),
            other_months: MonthCards::new(
                format!("Other months of {year}"),
                &others,
                "No orders in other months",
            ),
        }
    }
}

/// Row of the products table.
#[derive(Clone, Debug, Serialize)]
pub struct ProductRow {
    /// ID of the [`Product`].
    pub id: i64,

    /// Name of the [`Product`].
    pub name: String,

    /// Name of the [`Store`] the [`Product`] is bought in.
    pub store: String,

    /// Unit price with its currency.
    pub unit_price: String,
}

impl ProductRow {
    fn new(product: &Product) -> Self {
        Self {
            id: product.id.into(),
            name: product.name.to_string(),
            store: product.store.to_string(),
            unit_price: product.unit_price.to_string(),
        }
    }
}

/// Row of the stores table.
#[derive(Clone, Debug, Serialize)]
pub struct StoreRow {
    /// ID of the [`Store`].
    pub id: i64,

    /// Name of the [`Store`].
    pub name: String,
}

impl StoreRow {
    fn new(store: &Store) -> Self {
        Self {
            id: store.id.into(),
            name: store.name.to_string(),
        }
    }
}

/// Option of a select input.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,

    /// Displayed label.
    pub label: String,
}

/// Color tone of a payment status badge.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Paid in full.
    Success,

    /// Deposit paid.
    Warning,

    /// Nothing paid.
    Danger,
}

impl Tone {
    /// Returns the [`Tone`] of the provided [`order::PaymentStatus`].
    #[must_use]
    pub fn of(status: order::PaymentStatus) -> Self {
        match status {
            order::PaymentStatus::Paid => Self::Success,
            order::PaymentStatus::Deposit => Self::Warning,
            order::PaymentStatus::Unpaid => Self::Danger,
        }
    }
}

/// Returns the display label of the provided [`order::PaymentStatus`].
fn status_label(status: order::PaymentStatus) -> &'static str {
    match status {
        order::PaymentStatus::Paid => "Paid",
        order::PaymentStatus::Deposit => "Deposit",
        order::PaymentStatus::Unpaid => "Unpaid",
    }
}

/// Row of the orders table.
#[derive(Clone, Debug, Serialize)]
pub struct OrderRow {
    /// ID of the [`Order`].
    pub id: i64,

    /// Due date in `YYYY-MM-DD` format.
    pub date: String,

    /// Number of servings.
    pub servings: u16,

    /// Price with its currency.
    pub price: String,

    /// Payment status label.
    pub status: &'static str,

    /// [`Tone`] of the payment status badge.
    pub tone: Tone,

    /// Deposit with its currency, for deposit-paid [`Order`]s only.
    pub deposit: Option<String>,

    /// Expandable details of the [`Order`].
    pub details: OrderDetails,
}

impl OrderRow {
    fn new(order: &Order) -> Self {
        let d = &order.details;
        Self {
            id: order.id.into(),
            date: d.date.to_iso8601(),
            servings: d.servings.get(),
            price: d.price.to_string(),
            status: status_label(d.payment),
            tone: Tone::of(d.payment),
            deposit: d.shown_deposit().map(|m| m.to_string()),
            details: OrderDetails {
                description: d.description.to_string(),
                gift_message: d
                    .gift_message
                    .as_ref()
                    .map_or_else(|| "None".to_owned(), ToString::to_string),
                customer: d.customer.full_name(),
                phone: d.customer.phone.to_string(),
                note: d.note.as_ref().map(ToString::to_string),
            },
        }
    }
}

/// Expandable details of an [`OrderRow`].
#[derive(Clone, Debug, Serialize)]
pub struct OrderDetails {
    /// Description of the ordered cake.
    pub description: String,

    /// Gift message, or `None` if there is none.
    pub gift_message: String,

    /// Full name of the customer.
    pub customer: String,

    /// Phone of the customer.
    pub phone: String,

    /// Note about the [`Order`], if any.
    pub note: Option<String>,
}

/// Card of a monthly revenue.
#[derive(Clone, Debug, Serialize)]
pub struct RevenueCard {
    /// Name of the month.
    pub month: String,

    /// Total price of the month's [`Order`]s with its currency.
    pub total: String,
}

/// Group of [`OrderCard`]s.
#[derive(Clone, Debug, Serialize)]
pub struct MonthCards {
    /// Title of the group.
    pub title: String,

    /// Cards of the group, latest first.
    pub cards: Vec<OrderCard>,

    /// Text displayed instead of the cards if there are none.
    pub placeholder: Option<&'static str>,
}

impl MonthCards {
    fn new(title: String, orders: &[Order], placeholder: &'static str) -> Self {
        Self {
            title,
            cards: orders.iter().map(OrderCard::new).collect(),
            placeholder: orders.is_empty().then_some(placeholder),
        }
    }
}

/// Card of an [`Order`] in a [`MonthCards`] group.
#[derive(Clone, Debug, Serialize)]
pub struct OrderCard {
    /// ID of the [`Order`].
    pub id: i64,

    /// Due date in `YYYY-MM-DD` format.
    pub date: String,

    /// Description of the ordered cake.
    pub description: String,

    /// Full name of the customer.
    pub customer: String,

    /// Phone of the customer.
    pub phone: String,

    /// Price with its currency.
    pub price: String,

    /// Paid deposit with its currency, if any.
    pub deposit: Option<String>,

    /// Gift message, if any.
    pub gift_message: Option<String>,
}

impl OrderCard {
    fn new(order: &Order) -> Self {
        let d = &order.details;
        Self {
            id: order.id.into(),
            date: d.date.to_iso8601(),
            description: d.description.to_string(),
            customer: d.customer.full_name(),
            phone: d.customer.phone.to_string(),
            price: d.price.to_string(),
            deposit: (!d.deposit.is_zero()).then(|| d.deposit.to_string()),
            gift_message: d.gift_message.as_ref().map(ToString::to_string),
        }
    }
}

/// Recipe-cost simulator screen.
#[derive(Clone, Debug, Serialize)]
pub struct Simulator {
    /// Options of the product select of every line.
    pub product_options: Vec<SelectOption>,

    /// Lines of the [`Recipe`].
    pub lines: Vec<SimulatorLine>,

    /// Total cost of the [`Recipe`] with its currency.
    pub total: String,
}

impl Simulator {
    /// Builds a new [`Simulator`] of the provided [`Recipe`], offering the
    /// [`Product`]s of the provided [`State`].
    #[must_use]
    pub fn new(recipe: &Recipe, state: &State) -> Self {
        Self {
            product_options: state
                .products
                .iter()
                .map(|p| SelectOption {
                    value: p.id.to_string(),
                    label: p.name.to_string(),
                })
                .collect(),
            lines: recipe.lines().iter().map(SimulatorLine::new).collect(),
            total: recipe.total().to_string(),
        }
    }
}

/// Line of a [`Simulator`].
#[derive(Clone, Debug, Serialize)]
pub struct SimulatorLine {
    /// ID of the selected [`Product`], if any.
    pub product: Option<i64>,

    /// Name of the [`Store`] the selected [`Product`] is bought in.
    pub store: Option<String>,

    /// Unit price of the selected [`Product`] with its currency.
    pub unit_price: Option<String>,

    /// Unit the quantity is entered in.
    pub quantity_hint: &'static str,

    /// Cost of the line with its currency, once complete.
    pub cost: Option<String>,
}

impl SimulatorLine {
    fn new(line: &recipe::Line) -> Self {
        Self {
            product: line.product().map(|p| p.id.into()),
            store: line.store().map(ToString::to_string),
            unit_price: line.unit_price().map(|m| m.to_string()),
            quantity_hint: line.quantity_hint(),
            cost: line
                .cost()
                .and_then(Money::new)
                .map(|m| m.to_string()),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::Month;
    use service::{
        command::seed,
        domain::{order::PaymentStatus, Recipe},
    };

    use crate::State;

    use super::{Dashboard, Simulator, Tone};

    fn state() -> State {
        State {
            products: seed::products()
                .into_iter()
                .zip(1_i64..)
                .map(|(p, id)| p.with_id(id.into()))
                .collect(),
            stores: seed::stores()
                .into_iter()
                .zip(1_i64..)
                .map(|(s, id)| s.with_id(id.into()))
                .collect(),
            orders: seed::orders()
                .into_iter()
                .zip(1_i64..)
                .map(|(o, id)| o.with_id(id.into()))
                .collect(),
        }
    }

    #[test]
    fn lists_orders_latest_first() {
        let view = Dashboard::new(&state(), 2025, Month::January);

        let ids = view.orders.iter().map(|o| o.id).collect::<Vec<_>>();
        assert_eq!(ids, [3, 2, 1]);
        assert_eq!(view.orders[1].tone, Tone::Warning);
        assert_eq!(view.orders[1].deposit.as_deref(), Some("15.00 €"));
        assert_eq!(view.orders[0].deposit, None);
        assert_eq!(view.orders[1].details.gift_message, "None");
        assert_eq!(view.orders[2].details.customer, "Marie Dupont");
    }

    #[test]
    fn hides_retained_deposit_of_paid_order() {
        let mut state = state();
        state.orders[1].details.payment = PaymentStatus::Paid;

        let view = Dashboard::new(&state, 2025, Month::January);

        assert_eq!(view.orders[1].status, "Paid");
        assert_eq!(view.orders[1].deposit, None);
    }

    #[test]
    fn presents_twelve_revenue_cards() {
        let view = Dashboard::new(&state(), 2025, Month::September);

        assert_eq!(view.revenue.len(), 12);
        assert_eq!(view.revenue[0].month, "January");
        assert_eq!(view.revenue[0].total, "73.50 €");
        assert_eq!(view.revenue[1].total, "52.00 €");
        assert_eq!(view.revenue[11].total, "0.00 €");
    }

    #[test]
    fn partitions_month_cards() {
        let view = Dashboard::new(&state(), 2025, Month::September);
        assert!(view.current_month.cards.is_empty());
        assert!(view.current_month.placeholder.is_some());
        assert_eq!(view.other_months.cards.len(), 3);
        assert_eq!(view.other_months.placeholder, None);

        let view = Dashboard::new(&state(), 2025, Month::January);
        let ids = view
            .current_month
            .cards
            .iter()
            .map(|c| c.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, [2, 1]);
        assert_eq!(view.current_month.cards[0].deposit.as_deref(), Some("15.00 €"));
        assert_eq!(view.other_months.cards.len(), 1);
    }

    #[test]
    fn offers_store_options() {
        let view = Dashboard::new(&state(), 2025, Month::September);

        let labels = view
            .store_options
            .iter()
            .map(|o| o.label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(labels, ["LECLERC", "LIDL", "Netto"]);
        assert_eq!(view.products[0].unit_price, "9.40 €");
    }

    #[test]
    fn serializes_to_json() {
        let view = Dashboard::new(&state(), 2025, Month::January);

        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["orders"][0]["tone"], "success");
        assert_eq!(json["current_month"]["title"], "January 2025");
    }

    #[test]
    fn presents_simulator_lines() {
        let state = state();
        let mut recipe = Recipe::default();
        let line = recipe.line_mut(0).unwrap();
        line.select(Some(state.products[3].clone()));
        line.set_quantity(Some("4".parse().unwrap()));

        let view = Simulator::new(&recipe, &state);

        assert_eq!(view.product_options.len(), 4);
        assert_eq!(view.lines[0].quantity_hint, "eggs");
        assert_eq!(view.lines[0].store.as_deref(), Some("LECLERC"));
        assert_eq!(view.lines[0].cost.as_deref(), Some("1.00 €"));
        assert_eq!(view.total, "1.00 €");
    }
}
