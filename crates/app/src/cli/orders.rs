use clap::{Args, Subcommand};
use storefront::orders::{Order, OrderId};
use storefront_app::shop::orders::{cancel_order, edit_address, list_orders};

use super::{CliError, Context};

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List your orders
    List,

    /// Change the shipping address of an order that has not shipped
    EditAddress(EditAddressArgs),

    /// Cancel a pending order
    Cancel(CancelArgs),
}

#[derive(Debug, Args)]
struct EditAddressArgs {
    /// Order identifier
    id: String,

    /// New single-line shipping address
    #[arg(long)]
    address: String,
}

#[derive(Debug, Args)]
struct CancelArgs {
    /// Order identifier
    id: String,
}

pub(crate) async fn run(context: &mut Context, command: OrdersCommand) -> Result<(), CliError> {
    let api = &*context.api;

    match command.command {
        OrdersSubcommand::List => {
            let orders = list_orders(&context.session, api).await?;
            print_orders(&orders);
        }
        OrdersSubcommand::EditAddress(args) => {
            edit_address(&context.session, api, &OrderId::new(args.id), &args.address).await?;
        }
        OrdersSubcommand::Cancel(args) => {
            let orders = cancel_order(&context.session, api, &OrderId::new(args.id)).await?;
            print_orders(&orders);
        }
    }

    Ok(())
}

pub(crate) fn print_orders<'o>(orders: impl IntoIterator<Item = &'o Order>) {
    let mut empty = true;

    for order in orders {
        empty = false;

        let date = order
            .date
            .map_or_else(|| "-".to_owned(), |date| date.to_string());

        println!(
            "{}\t{}\t{}\t{}\t{}",
            order.id,
            date,
            order.status,
            storefront::pricing::money(order.total_amount),
            order.payment_method
        );

        for item in &order.items {
            println!(
                "  {} x {}\t{}",
                item.quantity,
                storefront::pricing::money(item.price),
                item.name
            );
        }

        if !order.shipping_address.is_empty() {
            println!("  ship to: {}", order.shipping_address);
        }
    }

    if empty {
        println!("no orders found");
    }
}
