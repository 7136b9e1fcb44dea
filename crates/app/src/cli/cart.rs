use clap::{Args, Subcommand};
use storefront::products::ProductId;
use storefront_app::shop::catalog::buy_now;

use super::{CliError, Context};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show cart lines and totals
    Show,

    /// Add one unit of a product
    Add(AddArgs),

    /// Set the quantity of a line; zero or less removes it
    Set(SetArgs),

    /// Remove a line
    Remove(RemoveArgs),

    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product identifier
    id: String,

    /// Check the product is available and require a login, as "buy now" does
    #[arg(long)]
    buy_now: bool,
}

#[derive(Debug, Args)]
struct SetArgs {
    /// Product identifier
    id: String,

    /// New quantity
    #[arg(allow_negative_numbers = true)]
    quantity: i64,
}

#[derive(Debug, Args)]
struct RemoveArgs {
    /// Product identifier
    id: String,
}

pub(crate) async fn run(context: &mut Context, command: CartCommand) -> Result<(), CliError> {
    match command.command {
        CartSubcommand::Show => {
            context.load_catalog("cart").await;
            show(context);
        }
        CartSubcommand::Add(args) if args.buy_now => {
            context.load_catalog("product").await;
            buy_now(&mut context.session, &ProductId::new(args.id))?;
        }
        CartSubcommand::Add(args) => {
            let quantity = context.session.add_line(ProductId::new(args.id));
            println!("quantity: {quantity}");
        }
        CartSubcommand::Set(args) => {
            context
                .session
                .set_quantity(ProductId::new(args.id), args.quantity);
        }
        CartSubcommand::Remove(args) => context.session.remove_line(&args.id),
        CartSubcommand::Clear => context.session.clear(),
    }

    Ok(())
}

fn show(context: &Context) {
    let session = &context.session;

    if session.cart().is_empty() {
        println!("your cart is empty");
        return;
    }

    for (id, quantity) in session.cart().lines() {
        match session.product(id.as_str()) {
            Some(product) => println!(
                "{id}\t{quantity} x {}\t{}",
                product.unit_price(),
                product.name
            ),
            None => println!("{id}\t{quantity} x ?\t(unavailable)"),
        }
    }

    let summary = session.cart_summary();

    println!();
    println!("items: {}", session.line_count());
    println!("subtotal: {}", summary.subtotal);
    println!("delivery: {}", summary.delivery_fee);
    println!("total: {}", summary.total);
}
