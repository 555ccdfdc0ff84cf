//! [`Recipe`] cost simulation definitions.

use std::str::FromStr;

use common::Money;
use rust_decimal::Decimal;

use crate::domain::{product, store, Product};

/// Scratch recipe composing [`Product`]s and their quantities into a total
/// ingredient cost.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Recipe {
    /// [`Line`]s of this [`Recipe`], in the order they were added.
    lines: Vec<Line>,
}

impl Default for Recipe {
    /// A fresh [`Recipe`] starts with a single blank [`Line`].
    fn default() -> Self {
        Self {
            lines: vec![Line::default()],
        }
    }
}

impl Recipe {
    /// Returns [`Line`]s of this [`Recipe`].
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Appends a blank [`Line`], returning its index.
    pub fn add_line(&mut self) -> usize {
        self.lines.push(Line::default());
        self.lines.len() - 1
    }

    /// Removes the [`Line`] at the provided `index`, if any.
    pub fn remove_line(&mut self, index: usize) -> Option<Line> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    /// Returns a mutable reference to the [`Line`] at the provided `index`.
    pub fn line_mut(&mut self, index: usize) -> Option<&mut Line> {
        self.lines.get_mut(index)
    }

    /// Calculates the total cost of all complete [`Line`]s.
    #[must_use]
    pub fn total(&self) -> Money {
        self.lines
            .iter()
            .filter_map(Line::cost)
            .filter_map(Money::new)
            .sum()
    }
}

/// Line of a [`Recipe`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Line {
    /// Selected [`Product`], if any.
    product: Option<Product>,

    /// Entered [`Quantity`], if any.
    quantity: Option<Quantity>,
}

impl Line {
    /// Returns the selected [`Product`] of this [`Line`], if any.
    #[must_use]
    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    /// Selects the provided [`Product`] (or clears the selection).
    pub fn select(&mut self, product: Option<Product>) {
        self.product = product;
    }

    /// Returns the entered [`Quantity`] of this [`Line`], if any.
    #[must_use]
    pub fn quantity(&self) -> Option<Quantity> {
        self.quantity
    }

    /// Enters the provided [`Quantity`] (or clears it).
    pub fn set_quantity(&mut self, quantity: Option<Quantity>) {
        self.quantity = quantity;
    }

    /// Returns the [`store::Name`] of the selected [`Product`], if any.
    #[must_use]
    pub fn store(&self) -> Option<&store::Name> {
        self.product.as_ref().map(|p| &p.store)
    }

    /// Returns the unit price of the selected [`Product`], if any.
    #[must_use]
    pub fn unit_price(&self) -> Option<Money> {
        self.product.as_ref().map(|p| p.unit_price)
    }

    /// Returns the [`product::Pricing`] the [`Quantity`] is measured by.
    ///
    /// Defaults to [`product::Pricing::PerKilogram`] while nothing is
    /// selected.
    #[must_use]
    pub fn pricing(&self) -> product::Pricing {
        self.product
            .as_ref()
            .map_or(product::Pricing::PerKilogram, Product::pricing)
    }

    /// Returns the unit the [`Quantity`] of this [`Line`] is entered in.
    #[must_use]
    pub fn quantity_hint(&self) -> &'static str {
        self.pricing().quantity_unit()
    }

    /// Calculates the cost of this [`Line`].
    ///
    /// [`None`] is returned unless both a [`Product`] and a [`Quantity`] are
    /// set.
    #[must_use]
    pub fn cost(&self) -> Option<Decimal> {
        let product = self.product.as_ref()?;
        let Quantity(quantity) = self.quantity?;
        Some(product.pricing().cost(product.unit_price, quantity))
    }
}

/// Non-negative quantity of a [`Product`] in a [`Line`], not exceeding
/// [`Quantity::MAX`].
///
/// Measured in grams for [`product::Pricing::PerKilogram`] and in units for
/// [`product::Pricing::PerTenUnits`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Quantity(Decimal);

impl Quantity {
    /// Largest [`Quantity`] (a thousand tonnes in grams).
    pub const MAX: Self =
        Self(Decimal::from_parts(1_000_000_000, 0, 0, false, 0));

    /// Creates a new [`Quantity`] if the provided `value` is not negative and
    /// doesn't exceed [`Quantity::MAX`].
    #[must_use]
    pub fn new(value: Decimal) -> Option<Self> {
        (Decimal::ZERO..=Self::MAX.0)
            .contains(&value)
            .then_some(Self(value))
    }

    /// Returns the value of this [`Quantity`].
    #[must_use]
    pub fn get(self) -> Decimal {
        self.0
    }
}

impl FromStr for Quantity {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim()).map_err(|_| "invalid `Quantity`")?;
        Self::new(value).ok_or("out of range `Quantity`")
    }
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::domain::{product, store, Product};

    use super::{Quantity, Recipe};

    fn product(id: i64, name: &str, price_cents: u32) -> Product {
        product::New::new(
            product::Name::new(name).unwrap(),
            store::Name::new("LECLERC").unwrap(),
            Money::cents(price_cents),
        )
        .with_id(id.into())
    }

    #[test]
    fn starts_with_single_blank_line() {
        let recipe = Recipe::default();

        assert_eq!(recipe.lines().len(), 1);
        assert_eq!(recipe.lines()[0].product(), None);
        assert_eq!(recipe.total(), Money::ZERO);
    }

    #[test]
    fn sums_lines_by_pricing_rule() {
        let mut recipe = Recipe::default();

        let butter = recipe.line_mut(0).unwrap();
        butter.select(Some(product(1, "Beurre", 940)));
        butter.set_quantity(Some("250".parse().unwrap()));
        assert_eq!(recipe.total(), Money::cents(235));

        let i = recipe.add_line();
        let eggs = recipe.line_mut(i).unwrap();
        eggs.select(Some(product(4, "Œufs", 250)));
        eggs.set_quantity(Some("4".parse().unwrap()));
        assert_eq!(recipe.lines()[i].cost(), Some(Money::cents(100).amount()));
        assert_eq!(recipe.total(), Money::cents(335));
    }

    #[test]
    fn ignores_incomplete_lines() {
        let mut recipe = Recipe::default();
        recipe
            .line_mut(0)
            .unwrap()
            .set_quantity(Some("100".parse().unwrap()));

        let i = recipe.add_line();
        recipe.line_mut(i).unwrap().select(Some(product(2, "Farine", 560)));

        assert_eq!(recipe.total(), Money::ZERO);
        assert_eq!(recipe.lines()[i].store().unwrap().as_str(), "LECLERC");
        assert_eq!(recipe.lines()[i].unit_price(), Some(Money::cents(560)));
    }

    #[test]
    fn recomputes_on_removal() {
        let mut recipe = Recipe::default();
        let butter = recipe.line_mut(0).unwrap();
        butter.select(Some(product(1, "Beurre", 940)));
        butter.set_quantity(Some("250".parse().unwrap()));
        let i = recipe.add_line();
        let eggs = recipe.line_mut(i).unwrap();
        eggs.select(Some(product(4, "Œufs", 250)));
        eggs.set_quantity(Some("4".parse().unwrap()));

        assert!(recipe.remove_line(0).is_some());
        assert_eq!(recipe.total(), Money::cents(100));
        assert!(recipe.remove_line(5).is_none());
    }

    #[test]
    fn hints_quantity_unit() {
        let mut recipe = Recipe::default();
        assert_eq!(recipe.lines()[0].quantity_hint(), "g");

        let line = recipe.line_mut(0).unwrap();
        line.select(Some(product(4, "Œufs bio", 250)));
        assert_eq!(line.quantity_hint(), "eggs");

        line.select(None);
        assert_eq!(line.quantity_hint(), "g");
    }

    #[test]
    fn stays_finite_for_largest_inputs() {
        let price = "1000000000".parse::<Money>().unwrap();
        let mut recipe = Recipe::default();
        let butter = recipe.line_mut(0).unwrap();
        butter.select(Some(Product {
            unit_price: price,
            ..product(1, "Beurre", 0)
        }));
        butter.set_quantity(Some(Quantity::MAX));
        let i = recipe.add_line();
        let eggs = recipe.line_mut(i).unwrap();
        eggs.select(Some(Product {
            unit_price: price,
            ..product(4, "Œufs", 0)
        }));
        eggs.set_quantity(Some(Quantity::MAX));

        assert_eq!(
            recipe.total().amount(),
            "101000000000000000".parse().unwrap(),
        );
    }

    #[test]
    fn rejects_out_of_range_quantity() {
        assert!("1000000000.5".parse::<Quantity>().is_err());
        assert!("79228162514264337593543950335".parse::<Quantity>().is_err());
        assert_eq!("1000000000".parse::<Quantity>(), Ok(Quantity::MAX));
        assert!("-1".parse::<Quantity>().is_err());
        assert!("abc".parse::<Quantity>().is_err());
        assert_eq!(
            "2.5".parse::<Quantity>().unwrap().get(),
            "2.5".parse().unwrap(),
        );
    }
}
