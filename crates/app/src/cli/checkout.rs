use clap::Args;
use storefront::checkout::{PaymentMethod, ShippingForm};
use storefront_app::shop::checkout::place_order;

use super::{CliError, Context};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// First name
    #[arg(long, default_value = "")]
    first_name: String,

    /// Last name
    #[arg(long, default_value = "")]
    last_name: String,

    /// Email address
    #[arg(long, default_value = "")]
    email: String,

    /// Street and number
    #[arg(long, default_value = "")]
    street: String,

    /// City
    #[arg(long, default_value = "")]
    city: String,

    /// State or region
    #[arg(long, default_value = "")]
    state: String,

    /// Postal code
    #[arg(long, default_value = "")]
    zipcode: String,

    /// Country
    #[arg(long, default_value = "")]
    country: String,

    /// Phone number
    #[arg(long, default_value = "")]
    phone: String,

    /// Payment method (paypal, wave, cod)
    #[arg(long, default_value = "paypal")]
    payment: PaymentMethod,
}

impl CheckoutArgs {
    fn into_form(self) -> (ShippingForm, PaymentMethod) {
        let form = ShippingForm {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            street: self.street,
            city: self.city,
            state: self.state,
            zipcode: self.zipcode,
            country: self.country,
            phone: self.phone,
        };

        (form, self.payment)
    }
}

pub(crate) async fn run(context: &mut Context, args: CheckoutArgs) -> Result<(), CliError> {
    context.load_catalog("place-order").await;

    let summary = context.session.cart_summary();
    let (form, payment_method) = args.into_form();

    place_order(&mut context.session, &*context.api, &form, payment_method).await?;

    println!("charged: {}", summary.total);

    Ok(())
}
