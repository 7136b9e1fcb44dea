//! Checkout
//!
//! Validation of the shipping form and construction of the order payload sent
//! to `POST /api/orders/create`.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::{
    cart::Cart,
    catalog::CatalogSnapshot,
    pricing::{self, DELIVERY_FEE_MINOR},
    products::ProductId,
};

/// Reasons an order is not sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Nobody is logged in.
    #[error("log in to place an order")]
    NotLoggedIn,

    /// The cart has no lines.
    #[error("your cart is empty")]
    EmptyCart,

    /// A required shipping field is blank.
    #[error("please fill in your {0}")]
    MissingField(ShippingField),

    /// A cart line refers to a product missing from the catalog snapshot.
    #[error("product {0} is no longer available")]
    UnknownProduct(ProductId),
}

/// Fields of the shipping form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShippingField {
    /// First name
    FirstName,
    /// Last name
    LastName,
    /// Email address
    Email,
    /// Street and number
    Street,
    /// City
    City,
    /// State or region
    State,
    /// Postal code
    Zipcode,
    /// Country
    Country,
    /// Phone number
    Phone,
}

impl ShippingField {
    /// Every field, in display order.
    pub const ALL: [Self; 9] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Street,
        Self::City,
        Self::State,
        Self::Zipcode,
        Self::Country,
        Self::Phone,
    ];

    /// Human-readable name used in validation messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "first name",
            Self::LastName => "last name",
            Self::Email => "email",
            Self::Street => "street",
            Self::City => "city",
            Self::State => "state",
            Self::Zipcode => "zip code",
            Self::Country => "country",
            Self::Phone => "phone number",
        }
    }
}

impl fmt::Display for ShippingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Delivery information entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingForm {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Street and number
    pub street: String,
    /// City
    pub city: String,
    /// State or region
    pub state: String,
    /// Postal code
    pub zipcode: String,
    /// Country
    pub country: String,
    /// Phone number
    pub phone: String,
}

impl ShippingForm {
    /// Value of a field.
    pub fn field(&self, field: ShippingField) -> &str {
        match field {
            ShippingField::FirstName => &self.first_name,
            ShippingField::LastName => &self.last_name,
            ShippingField::Email => &self.email,
            ShippingField::Street => &self.street,
            ShippingField::City => &self.city,
            ShippingField::State => &self.state,
            ShippingField::Zipcode => &self.zipcode,
            ShippingField::Country => &self.country,
            ShippingField::Phone => &self.phone,
        }
    }

    /// Checks every field is filled, reporting the first blank one.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingField`] for the first blank field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        match ShippingField::ALL
            .into_iter()
            .find(|field| self.field(*field).trim().is_empty())
        {
            Some(field) => Err(CheckoutError::MissingField(field)),
            None => Ok(()),
        }
    }

    /// Single-line address: `street, city, state zipcode, country`.
    pub fn shipping_address(&self) -> String {
        format!(
            "{}, {}, {} {}, {}",
            self.street.trim(),
            self.city.trim(),
            self.state.trim(),
            self.zipcode.trim(),
            self.country.trim()
        )
    }
}

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// PayPal
    #[default]
    Paypal,

    /// Wave mobile money
    Wave,

    /// Cash on delivery
    Cod,
}

/// Unknown payment method name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment method `{0}`; expected paypal, wave or cod")]
pub struct UnknownPaymentMethod(String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "paypal" => Ok(Self::Paypal),
            "wave" => Ok(Self::Wave),
            "cod" => Ok(Self::Cod),
            _ => Err(UnknownPaymentMethod(value.to_owned())),
        }
    }
}

/// Order line sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    /// Product identifier
    pub product_id: ProductId,

    /// Product name from the snapshot
    pub name: String,

    /// Unit price from the snapshot
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Units ordered
    pub quantity: u32,

    /// First product image
    pub image: Option<String>,
}

/// Payload of `POST /api/orders/create`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Lines, one per cart entry
    pub items: Vec<NewOrderItem>,

    /// Subtotal plus delivery fee
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,

    /// Single-line address
    pub shipping_address: String,

    /// Chosen payment method
    pub payment_method: PaymentMethod,
}

impl NewOrder {
    /// Builds the payload from the cart joined against the snapshot.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: the cart has no lines.
    /// - [`CheckoutError::MissingField`]: a shipping field is blank.
    /// - [`CheckoutError::UnknownProduct`]: a line is missing from the snapshot.
    pub fn from_cart(
        cart: &Cart,
        catalog: &CatalogSnapshot,
        form: &ShippingForm,
        payment_method: PaymentMethod,
    ) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        form.validate()?;

        let items = cart
            .lines()
            .map(|(product_id, quantity)| {
                let product = catalog
                    .get(product_id.as_str())
                    .ok_or_else(|| CheckoutError::UnknownProduct(product_id.clone()))?;

                Ok(NewOrderItem {
                    product_id: product_id.clone(),
                    name: product.name.clone(),
                    price: product.price,
                    quantity: quantity.get(),
                    image: product.thumbnail().map(str::to_owned),
                })
            })
            .collect::<Result<Vec<_>, CheckoutError>>()?;

        let subtotal = cart.subtotal_minor(catalog);
        let total_minor = subtotal.saturating_add(DELIVERY_FEE_MINOR);

        Ok(Self {
            items,
            total_amount: Decimal::new(total_minor, pricing::currency().exponent),
            shipping_address: form.shipping_address(),
            payment_method,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::fixtures::{catalog, product};

    use super::*;

    fn filled_form() -> ShippingForm {
        ShippingForm {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            street: "12 Analytical Row".to_owned(),
            city: "London".to_owned(),
            state: "Greater London".to_owned(),
            zipcode: "NW1".to_owned(),
            country: "UK".to_owned(),
            phone: "+44 20 0000 0000".to_owned(),
        }
    }

    #[test]
    fn first_blank_field_is_reported() {
        let form = ShippingForm {
            city: "   ".to_owned(),
            phone: String::new(),
            ..filled_form()
        };

        assert_eq!(
            form.validate(),
            Err(CheckoutError::MissingField(ShippingField::City))
        );
    }

    #[test]
    fn formats_single_line_address() {
        assert_eq!(
            filled_form().shipping_address(),
            "12 Analytical Row, London, Greater London NW1, UK"
        );
    }

    #[test]
    fn empty_cart_is_rejected_before_form() {
        let result = NewOrder::from_cart(
            &Cart::new(),
            &catalog(vec![]),
            &ShippingForm::default(),
            PaymentMethod::Paypal,
        );

        assert_eq!(result, Err(CheckoutError::EmptyCart));
    }

    #[test]
    fn builds_payload_with_delivery_fee() -> TestResult {
        let snapshot = catalog(vec![product("a", Decimal::new(999, 2))]);
        let mut cart = Cart::new();
        cart.set_quantity("a".into(), 3);

        let order = NewOrder::from_cart(&cart, &snapshot, &filled_form(), PaymentMethod::Cod)?;

        assert_eq!(order.total_amount, Decimal::new(3_997, 2));
        assert_eq!(order.items.len(), 1);
        let item = order.items.first().ok_or("Expected an order line")?;
        assert_eq!(item.quantity, 3);
        assert_eq!(item.image.as_deref(), Some("https://cdn.example/a.png"));

        let json = serde_json::to_value(&order)?;
        assert_eq!(json["paymentMethod"], "cod");
        assert_eq!(json["items"][0]["productId"], "a");
        assert_eq!(json["totalAmount"], 39.97);

        Ok(())
    }

    #[test]
    fn unknown_product_is_rejected() {
        let snapshot = catalog(vec![product("a", Decimal::ONE)]);
        let mut cart = Cart::new();
        cart.add_line("a".into());
        cart.add_line("gone".into());

        let result = NewOrder::from_cart(&cart, &snapshot, &filled_form(), PaymentMethod::Wave);

        assert_eq!(
            result,
            Err(CheckoutError::UnknownProduct(ProductId::new("gone")))
        );
    }

    #[test]
    fn parses_payment_methods() {
        assert_eq!("PayPal".parse(), Ok(PaymentMethod::Paypal));
        assert_eq!("cod".parse(), Ok(PaymentMethod::Cod));
        assert!("card".parse::<PaymentMethod>().is_err());
    }
}
