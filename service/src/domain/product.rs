//! [`Product`] definitions.

use common::{define_text, Money};
use derive_more::{Display, From, FromStr, Into};
use rust_decimal::Decimal;

use crate::domain::store;
#[cfg(doc)]
use crate::domain::Store;

/// Raw material bought in a [`Store`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Product {
    /// ID of this [`Product`].
    pub id: Id,

    /// [`Name`] of this [`Product`].
    pub name: Name,

    /// [`store::Name`] of the [`Store`] this [`Product`] is bought in.
    pub store: store::Name,

    /// Price of this [`Product`] per its [`Pricing`] unit.
    pub unit_price: Money,

    /// Indicator whether this [`Product`] is sold by ten units (eggs).
    ///
    /// Classified once by [`Name::is_egg()`] on creation.
    pub is_egg: bool,
}

impl Product {
    /// Returns [`Pricing`] of this [`Product`].
    #[must_use]
    pub fn pricing(&self) -> Pricing {
        Pricing::of(self.is_egg)
    }
}

/// [`Product`] which is not stored yet.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct New {
    /// [`Name`] of the new [`Product`].
    pub name: Name,

    /// [`store::Name`] of the [`Store`] the new [`Product`] is bought in.
    pub store: store::Name,

    /// Price of the new [`Product`] per its [`Pricing`] unit.
    pub unit_price: Money,

    /// Indicator whether the new [`Product`] is sold by ten units.
    pub is_egg: bool,
}

impl New {
    /// Creates a new [`Product`] description, classifying it by its [`Name`].
    #[must_use]
    pub fn new(name: Name, store: store::Name, unit_price: Money) -> Self {
        Self {
            is_egg: name.is_egg(),
            name,
            store,
            unit_price,
        }
    }

    /// Converts this [`New`] into a [`Product`] with the provided [`Id`].
    #[must_use]
    pub fn with_id(self, id: Id) -> Product {
        let Self {
            name,
            store,
            unit_price,
            is_egg,
        } = self;
        Product {
            id,
            name,
            store,
            unit_price,
            is_egg,
        }
    }
}

/// ID of a [`Product`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct Id(i64);

define_text! {
    #[doc = "Name of a [`Product`]."]
    struct Name;
}

impl Name {
    /// Checks whether this [`Name`] denotes an egg product.
    #[must_use]
    pub fn is_egg(&self) -> bool {
        is_egg_name(self.as_str())
    }
}

/// Folded tokens denoting an egg product.
const EGG_TOKENS: &[&str] = &["oeuf", "egg"];

/// Checks whether the provided raw product `name` denotes an egg product.
///
/// Matching is case-insensitive and accent-insensitive, so `Œufs bio`,
/// `oeufs` and `Eggs` all match.
#[must_use]
pub fn is_egg_name(name: &str) -> bool {
    let folded = fold(name);
    EGG_TOKENS.iter().any(|token| folded.contains(token))
}

/// Lowercases the provided `text` and strips diacritics from Latin letters,
/// expanding ligatures.
fn fold(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_lowercase) {
        match c {
            'œ' => folded.push_str("oe"),
            'æ' => folded.push_str("ae"),
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => folded.push('a'),
            'ç' => folded.push('c'),
            'è' | 'é' | 'ê' | 'ë' => folded.push('e'),
            'ì' | 'í' | 'î' | 'ï' => folded.push('i'),
            'ñ' => folded.push('n'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => folded.push('o'),
            'ù' | 'ú' | 'û' | 'ü' => folded.push('u'),
            'ý' | 'ÿ' => folded.push('y'),
            c => folded.push(c),
        }
    }
    folded
}

/// Pricing rule of a [`Product`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Pricing {
    /// Price is given per kilogram, quantities are in grams.
    PerKilogram,

    /// Price is given per ten units, quantities are in units.
    PerTenUnits,
}

impl Pricing {
    /// Returns [`Pricing`] of a [`Product`] by its egg indicator.
    #[must_use]
    pub fn of(is_egg: bool) -> Self {
        if is_egg {
            Self::PerTenUnits
        } else {
            Self::PerKilogram
        }
    }

    /// Returns the number of quantity units the price is given for.
    #[must_use]
    pub fn units_per_price(self) -> Decimal {
        match self {
            Self::PerKilogram => Decimal::ONE_THOUSAND,
            Self::PerTenUnits => Decimal::TEN,
        }
    }

    /// Returns the unit quantities are entered in.
    #[must_use]
    pub fn quantity_unit(self) -> &'static str {
        match self {
            Self::PerKilogram => "g",
            Self::PerTenUnits => "eggs",
        }
    }

    /// Calculates the cost of the provided `quantity` at the provided
    /// `unit_price`.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    #[must_use]
    pub fn cost(self, unit_price: Money, quantity: Decimal) -> Decimal {
        (unit_price.amount() / self.units_per_price()).saturating_mul(quantity)
    }
}

#[cfg(test)]
mod spec {
    use common::Money;
    use rust_decimal::Decimal;

    use crate::domain::store;

    use super::{is_egg_name, Name, New, Pricing};

    #[test]
    fn classifies_egg_products() {
        assert!(is_egg_name("Œufs bio"));
        assert!(is_egg_name("Œufs"));
        assert!(is_egg_name("oeufs plein air"));
        assert!(is_egg_name("OEUF"));
        assert!(is_egg_name("Free range eggs"));

        assert!(!is_egg_name("Farine"));
        assert!(!is_egg_name("Beurre"));
        assert!(!is_egg_name("Sucre glace"));
    }

    #[test]
    fn classifies_on_creation() {
        let eggs = New::new(
            Name::new("Œufs bio").unwrap(),
            store::Name::new("LECLERC").unwrap(),
            Money::cents(250),
        );
        let flour = New::new(
            Name::new("Farine").unwrap(),
            store::Name::new("LIDL").unwrap(),
            Money::cents(560),
        );

        assert!(eggs.is_egg);
        assert!(!flour.is_egg);
        assert_eq!(
            eggs.with_id(1_i64.into()).pricing(),
            Pricing::PerTenUnits,
        );
        assert_eq!(
            flour.with_id(2_i64.into()).pricing(),
            Pricing::PerKilogram,
        );
    }

    #[test]
    fn prices_by_pricing_rule() {
        assert_eq!(
            Pricing::PerKilogram.cost(Money::cents(940), Decimal::from(250)),
            "2.35".parse::<Decimal>().unwrap(),
        );
        assert_eq!(
            Pricing::PerTenUnits.cost(Money::cents(250), Decimal::from(4)),
            Decimal::ONE,
        );
    }

    #[test]
    fn saturates_huge_cost() {
        let huge = Money::new(Decimal::MAX).unwrap();

        assert_eq!(
            Pricing::PerKilogram.cost(huge, Decimal::from(2000)),
            Decimal::MAX,
        );
    }
}
