use clap::{Args, Subcommand};
use storefront::orders::{OrderId, OrderStatus, StatusFilter};
use storefront_app::console::orders::{delete_order, list_orders, set_status};

use crate::cli::{CliError, Context, orders::print_orders};

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List every order
    List(ListArgs),

    /// Change the status of an order
    Status(StatusArgs),

    /// Delete an order
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Status filter (all, pending, processing, shipped, delivered, cancelled)
    #[arg(long, default_value = "all")]
    status: StatusFilter,
}

#[derive(Debug, Args)]
struct StatusArgs {
    /// Order identifier
    id: String,

    /// New status
    status: OrderStatus,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// Order identifier
    id: String,
}

pub(crate) async fn run(context: &mut Context, command: OrdersCommand) -> Result<(), CliError> {
    let api = &*context.api;

    match command.command {
        OrdersSubcommand::List(args) => {
            let orders = list_orders(&context.session, api, args.status).await?;
            print_orders(&orders);
        }
        OrdersSubcommand::Status(args) => {
            set_status(&context.session, api, &OrderId::new(args.id), &args.status).await?;
        }
        OrdersSubcommand::Delete(args) => {
            let orders = delete_order(&context.session, api, &OrderId::new(args.id)).await?;
            print_orders(&orders);
        }
    }

    Ok(())
}
