use clap::{Args, Subcommand};

use super::{CliError, Context};

mod orders;
mod products;

#[derive(Debug, Args)]
pub(crate) struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    /// Manage products
    Products(products::ProductsCommand),

    /// Manage orders
    Orders(orders::OrdersCommand),
}

pub(crate) async fn run(context: &mut Context, command: AdminCommand) -> Result<(), CliError> {
    match command.command {
        AdminSubcommand::Products(command) => products::run(context, command).await,
        AdminSubcommand::Orders(command) => orders::run(context, command).await,
    }
}
