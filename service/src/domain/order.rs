//! [`Order`] definitions.

use common::{define_kind, define_text, Date, Money};
use derive_more::{Display, From, FromStr, Into};

/// Customer order of a cake.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Order {
    /// ID of this [`Order`].
    pub id: Id,

    /// [`Details`] of this [`Order`].
    pub details: Details,
}

/// Everything an [`Order`] consists of, except its [`Id`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Details {
    /// [`Date`] the [`Order`] is due.
    pub date: Date,

    /// [`Description`] of the ordered cake.
    pub description: Description,

    /// [`GiftMessage`] to be written on the cake, if any.
    pub gift_message: Option<GiftMessage>,

    /// Number of [`Servings`] of the cake.
    pub servings: Servings,

    /// [`Customer`] who placed the [`Order`].
    pub customer: Customer,

    /// Total price of the [`Order`].
    pub price: Money,

    /// [`PaymentStatus`] of the [`Order`].
    pub payment: PaymentStatus,

    /// Amount paid in advance.
    ///
    /// Meaningful for [`PaymentStatus::Deposit`] only.
    pub deposit: Money,

    /// Free-form [`Note`] about the [`Order`], if any.
    pub note: Option<Note>,
}

impl Details {
    /// Zeroes the [`Details::deposit`] unless the [`Details::payment`] is
    /// [`PaymentStatus::Deposit`].
    #[must_use]
    pub fn with_consistent_deposit(mut self) -> Self {
        if self.payment != PaymentStatus::Deposit {
            self.deposit = Money::ZERO;
        }
        self
    }

    /// Returns the deposit to be displayed, if the [`Details::payment`] is
    /// [`PaymentStatus::Deposit`].
    #[must_use]
    pub fn shown_deposit(&self) -> Option<Money> {
        (self.payment == PaymentStatus::Deposit).then_some(self.deposit)
    }

    /// Converts these [`Details`] into an [`Order`] with the provided [`Id`].
    #[must_use]
    pub fn with_id(self, id: Id) -> Order {
        Order { id, details: self }
    }
}

/// Customer placing an [`Order`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Customer {
    /// [`LastName`] of this [`Customer`].
    pub last_name: LastName,

    /// [`FirstName`] of this [`Customer`].
    pub first_name: FirstName,

    /// [`Phone`] of this [`Customer`].
    pub phone: Phone,
}

impl Customer {
    /// Returns the full name of this [`Customer`], first name first.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// ID of an [`Order`].
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

/// Number of servings of an [`Order`], always positive.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd)]
pub struct Servings(u16);

impl Servings {
    /// Creates new [`Servings`] if the provided `count` is positive.
    #[must_use]
    pub fn new(count: u16) -> Option<Self> {
        (count > 0).then_some(Self(count))
    }

    /// Returns the number of these [`Servings`].
    #[must_use]
    pub fn get(self) -> u16 {
        self.0
    }
}

impl std::str::FromStr for Servings {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count = s.trim().parse().map_err(|_| "invalid `Servings`")?;
        Self::new(count).ok_or("`Servings` must be positive")
    }
}

define_text! {
    #[doc = "Description of an [`Order`]ed cake."]
    struct Description;
}

define_text! {
    #[doc = "Message to be written on an [`Order`]ed cake."]
    struct GiftMessage;
}

define_text! {
    #[doc = "Last name of a [`Customer`]."]
    struct LastName;
}

define_text! {
    #[doc = "First name of a [`Customer`]."]
    struct FirstName;
}

define_text! {
    #[doc = "Phone number of a [`Customer`]."]
    struct Phone;
}

define_text! {
    #[doc = "Free-form note about an [`Order`]."]
    struct Note;
}

define_kind! {
    #[doc = "Payment status of an [`Order`]."]
    enum PaymentStatus {
        #[doc = "Fully paid."]
        Paid = 1,

        #[doc = "Partially paid in advance."]
        Deposit = 2,

        #[doc = "Not paid yet."]
        Unpaid = 3,
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Unpaid
    }
}
