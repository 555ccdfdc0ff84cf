//! Raw user input forms.

use common::{Date, Money};
use service::{
    command,
    domain::{order, product, store},
};

use crate::{define_error, Error};

define_error! {
    enum FormError {
        #[code = "PRODUCT_NAME_REQUIRED"]
        #[kind = Validation]
        #[message = "Product name is required"]
        ProductNameRequired,

        #[code = "STORE_NAME_REQUIRED"]
        #[kind = Validation]
        #[message = "Store name is required"]
        StoreNameRequired,

        #[code = "INVALID_UNIT_PRICE"]
        #[kind = Validation]
        #[message = "Unit price must be a non-negative amount up to \
                     1 000 000 000"]
        InvalidUnitPrice,

        #[code = "DATE_REQUIRED"]
        #[kind = Validation]
        #[message = "Date must be provided as `YYYY-MM-DD`"]
        DateRequired,

        #[code = "DESCRIPTION_REQUIRED"]
        #[kind = Validation]
        #[message = "Description is required"]
        DescriptionRequired,

        #[code = "SERVINGS_REQUIRED"]
        #[kind = Validation]
        #[message = "Number of servings must be a positive integer"]
        ServingsRequired,

        #[code = "LAST_NAME_REQUIRED"]
        #[kind = Validation]
        #[message = "Last name is required"]
        LastNameRequired,

        #[code = "FIRST_NAME_REQUIRED"]
        #[kind = Validation]
        #[message = "First name is required"]
        FirstNameRequired,

        #[code = "PHONE_REQUIRED"]
        #[kind = Validation]
        #[message = "Phone is required"]
        PhoneRequired,

        #[code = "INVALID_PRICE"]
        #[kind = Validation]
        #[message = "Price must be a non-negative amount up to \
                     1 000 000 000"]
        InvalidPrice,

        #[code = "INVALID_DEPOSIT"]
        #[kind = Validation]
        #[message = "Deposit must be a non-negative amount up to \
                     1 000 000 000"]
        InvalidDeposit,

        #[code = "INVALID_PAYMENT_STATUS"]
        #[kind = Validation]
        #[message = "Payment status must be one of `PAID`, `DEPOSIT` or \
                     `UNPAID`"]
        InvalidPaymentStatus,

        #[code = "INVALID_QUANTITY"]
        #[kind = Validation]
        #[message = "Quantity must be a non-negative number up to \
                     1 000 000 000"]
        InvalidQuantity,
    }
}

/// Parses an optional amount of [`Money`], treating blank input as zero.
fn amount(raw: &str, err: FormError) -> Result<Money, Error> {
    if raw.trim().is_empty() {
        return Ok(Money::ZERO);
    }
    raw.parse().map_err(|_| err.into())
}

/// Form adding a new product.
#[derive(Clone, Debug, Default)]
pub struct ProductForm {
    /// Raw product name.
    pub name: String,

    /// Raw name of the store the product is bought in.
    pub store: String,

    /// Raw unit price.
    pub unit_price: String,
}

impl ProductForm {
    /// Parses this [`ProductForm`] into a [`command::AddProduct`].
    ///
    /// # Errors
    ///
    /// With a [`Kind::Validation`] [`Error`] if any field is blank or the
    /// unit price is not a valid amount.
    ///
    /// [`Kind::Validation`]: crate::error::Kind::Validation
    pub fn parse(&self) -> Result<command::AddProduct, Error> {
        let name = product::Name::new(self.name.trim())
            .ok_or(FormError::ProductNameRequired)?;
        let store = store::Name::new(self.store.trim())
            .ok_or(FormError::StoreNameRequired)?;
        let unit_price = self
            .unit_price
            .parse()
            .map_err(|_| FormError::InvalidUnitPrice)?;

        Ok(command::AddProduct {
            name,
            store,
            unit_price,
        })
    }
}

/// Parses a raw store name into a [`command::AddStore`].
///
/// # Errors
///
/// With a [`Kind::Validation`] [`Error`] if the name is blank.
///
/// [`Kind::Validation`]: crate::error::Kind::Validation
pub fn new_store(name: &str) -> Result<command::AddStore, Error> {
    let name =
        store::Name::new(name.trim()).ok_or(FormError::StoreNameRequired)?;
    Ok(command::AddStore { name })
}

/// Form adding or editing an order.
#[derive(Clone, Debug, Default)]
pub struct OrderForm {
    /// Raw due date in `YYYY-MM-DD` format.
    pub date: String,

    /// Raw cake description.
    pub description: String,

    /// Raw gift message, blank for none.
    pub gift_message: String,

    /// Raw number of servings.
    pub servings: String,

    /// Raw customer last name.
    pub last_name: String,

    /// Raw customer first name.
    pub first_name: String,

    /// Raw customer phone.
    pub phone: String,

    /// Raw price, blank for zero.
    pub price: String,

    /// Raw payment status, blank for unpaid.
    pub payment_status: String,

    /// Raw deposit amount, blank for zero.
    pub deposit: String,

    /// Raw note, blank for none.
    pub note: String,
}

impl OrderForm {
    /// Fills a new [`OrderForm`] with the provided [`order::Details`] for
    /// editing.
    #[must_use]
    pub fn edit(details: &order::Details) -> Self {
        Self {
            date: details.date.to_iso8601(),
            description: details.description.to_string(),
            gift_message: details
                .gift_message
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            servings: details.servings.to_string(),
            last_name: details.customer.last_name.to_string(),
            first_name: details.customer.first_name.to_string(),
            phone: details.customer.phone.to_string(),
            price: details.price.rounded().to_string(),
            payment_status: details.payment.to_string(),
            deposit: details.deposit.rounded().to_string(),
            note: details
                .note
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }

    /// Parses this [`OrderForm`] into [`order::Details`].
    ///
    /// The deposit is zeroed unless the payment status is
    /// [`order::PaymentStatus::Deposit`].
    ///
    /// # Errors
    ///
    /// With a [`Kind::Validation`] [`Error`] if any required field is blank
    /// or any field is malformed.
    ///
    /// [`Kind::Validation`]: crate::error::Kind::Validation
    pub fn parse(&self) -> Result<order::Details, Error> {
        let date = Date::from_iso8601(&self.date)
            .map_err(|_| FormError::DateRequired)?;
        let description = order::Description::new(self.description.trim())
            .ok_or(FormError::DescriptionRequired)?;
        let servings = self
            .servings
            .parse()
            .map_err(|_| FormError::ServingsRequired)?;
        let last_name = order::LastName::new(self.last_name.trim())
            .ok_or(FormError::LastNameRequired)?;
        let first_name = order::FirstName::new(self.first_name.trim())
            .ok_or(FormError::FirstNameRequired)?;
        let phone = order::Phone::new(self.phone.trim())
            .ok_or(FormError::PhoneRequired)?;
        let price = amount(&self.price, FormError::InvalidPrice)?;
        let payment = match self.payment_status.trim() {
            "" => order::PaymentStatus::default(),
            raw => raw
                .parse()
                .map_err(|_| FormError::InvalidPaymentStatus)?,
        };
        let deposit = amount(&self.deposit, FormError::InvalidDeposit)?;

        Ok(order::Details {
            date,
            description,
            gift_message: order::GiftMessage::new(self.gift_message.trim()),
            servings,
            customer: order::Customer {
                last_name,
                first_name,
                phone,
            },
            price,
            payment,
            deposit,
            note: order::Note::new(self.note.trim()),
        }
        .with_consistent_deposit())
    }
}

/// Parses a raw recipe quantity, treating blank input as no quantity.
///
/// # Errors
///
/// With a [`Kind::Validation`] [`Error`] if the quantity is not a
/// non-negative number.
///
/// [`Kind::Validation`]: crate::error::Kind::Validation
pub fn quantity(
    raw: &str,
) -> Result<Option<service::domain::recipe::Quantity>, Error> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| FormError::InvalidQuantity.into())
}

#[cfg(test)]
mod spec {
    use common::Money;
    use service::domain::order::PaymentStatus;

    use crate::error::Kind;

    use super::{new_store, quantity, OrderForm, ProductForm};

    fn order_form() -> OrderForm {
        OrderForm {
            date: "2025-01-20".into(),
            description: "Tarte aux pommes".into(),
            servings: "8".into(),
            last_name: "Martin".into(),
            first_name: "Pierre".into(),
            phone: "07 89 45 12 36".into(),
            ..OrderForm::default()
        }
    }

    #[test]
    fn parses_product() {
        let cmd = ProductForm {
            name: " Œufs bio ".into(),
            store: "LECLERC".into(),
            unit_price: "2.50".into(),
        }
        .parse()
        .unwrap();

        assert_eq!(cmd.name.as_str(), "Œufs bio");
        assert_eq!(cmd.unit_price, Money::cents(250));
    }

    #[test]
    fn rejects_incomplete_product() {
        let form = ProductForm {
            name: "Farine".into(),
            store: "LIDL".into(),
            unit_price: "5,60".into(),
        };
        let err = form.parse().unwrap_err();
        assert_eq!(err.code, "INVALID_UNIT_PRICE");
        assert_eq!(err.kind, Kind::Validation);

        let err = ProductForm {
            name: "  ".into(),
            ..form
        }
        .parse()
        .unwrap_err();
        assert_eq!(err.code, "PRODUCT_NAME_REQUIRED");
    }

    #[test]
    fn rejects_blank_store() {
        assert_eq!(new_store(" ").unwrap_err().code, "STORE_NAME_REQUIRED");
        assert_eq!(new_store(" Netto ").unwrap().name.as_str(), "Netto");
    }

    #[test]
    fn defaults_order_price_and_status() {
        let details = order_form().parse().unwrap();

        assert_eq!(details.price, Money::ZERO);
        assert_eq!(details.payment, PaymentStatus::Unpaid);
        assert_eq!(details.gift_message, None);
        assert_eq!(details.note, None);
    }

    #[test]
    fn keeps_deposit_only_for_deposit_status() {
        let form = OrderForm {
            price: "28.50".into(),
            payment_status: "DEPOSIT".into(),
            deposit: "12.50".into(),
            ..order_form()
        };
        assert_eq!(form.parse().unwrap().deposit, Money::cents(1250));

        let form = OrderForm {
            payment_status: "PAID".into(),
            ..form
        };
        assert_eq!(form.parse().unwrap().deposit, Money::ZERO);
    }

    #[test]
    fn requires_positive_servings() {
        for servings in ["", "0", "-2", "many"] {
            let err = OrderForm {
                servings: servings.into(),
                ..order_form()
            }
            .parse()
            .unwrap_err();

            assert_eq!(err.code, "SERVINGS_REQUIRED");
        }
    }

    #[test]
    fn requires_customer() {
        let err = OrderForm {
            phone: String::new(),
            ..order_form()
        }
        .parse()
        .unwrap_err();

        assert_eq!(err.code, "PHONE_REQUIRED");
    }

    #[test]
    fn round_trips_edited_order() {
        let details = OrderForm {
            gift_message: "Félicitations".into(),
            price: "52".into(),
            payment_status: "PAID".into(),
            note: "Sans sucre ajouté".into(),
            ..order_form()
        }
        .parse()
        .unwrap();

        assert_eq!(OrderForm::edit(&details).parse().unwrap(), details);
    }

    #[test]
    fn parses_optional_quantity() {
        assert_eq!(quantity(" ").unwrap(), None);
        assert!(quantity("250").unwrap().is_some());
        assert_eq!(quantity("-1").unwrap_err().code, "INVALID_QUANTITY");
    }

    #[test]
    fn rejects_oversized_amounts() {
        const HUGE: &str = "79228162514264337593543950335";

        let err = ProductForm {
            name: "Beurre".into(),
            store: "LECLERC".into(),
            unit_price: HUGE.into(),
        }
        .parse()
        .unwrap_err();
        assert_eq!(err.code, "INVALID_UNIT_PRICE");

        let err = OrderForm {
            price: HUGE.into(),
            ..order_form()
        }
        .parse()
        .unwrap_err();
        assert_eq!(err.code, "INVALID_PRICE");

        let err = OrderForm {
            payment_status: "DEPOSIT".into(),
            deposit: "1000000000.01".into(),
            ..order_form()
        }
        .parse()
        .unwrap_err();
        assert_eq!(err.code, "INVALID_DEPOSIT");

        assert_eq!(quantity(HUGE).unwrap_err().code, "INVALID_QUANTITY");
        assert!(quantity("1000000000").unwrap().is_some());
    }
}
