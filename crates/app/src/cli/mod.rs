use std::{io, path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use storefront::storage::{FileStore, StorageError};
use storefront_app::{
    api::{ApiError, HttpStorefrontApi},
    config::StorefrontConfig,
    errors::WorkflowError,
    notify::{ToastKind, Toasts},
    scope::ViewScope,
    session::Session,
    shop::catalog::{apply_next, spawn_refresh},
};
use thiserror::Error;

mod account;
mod admin;
mod cart;
mod catalog;
mod checkout;
mod orders;
mod profile;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront client", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: StorefrontConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the catalog
    Catalog(catalog::CatalogCommand),

    /// Inspect and edit the cart
    Cart(cart::CartCommand),

    /// Store a session token
    Login(account::LoginArgs),

    /// Forget the session token and the cart
    Logout,

    /// Place an order for the cart
    Checkout(checkout::CheckoutArgs),

    /// Review your orders
    Orders(orders::OrdersCommand),

    /// Show or edit your profile
    Profile(profile::ProfileCommand),

    /// Admin console
    Admin(admin::AdminCommand),
}

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("failed to open data directory: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to build http client: {0}")]
    Client(#[from] ApiError),

    #[error("failed to read image `{}`: {source}", .path.display())]
    Image {
        path: PathBuf,

        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// Workflow failures were already shown as toasts.
    pub(crate) fn already_reported(&self) -> bool {
        matches!(self, Self::Workflow(_))
    }
}

/// Everything a command needs: the restored session, the backend client and
/// the toast buffer.
pub(crate) struct Context {
    session: Session<FileStore>,
    api: Arc<HttpStorefrontApi>,
    toasts: Arc<Toasts>,
}

impl Context {
    fn open(config: &StorefrontConfig) -> Result<Self, CliError> {
        let store = config.storage.open()?;
        let api = Arc::new(config.backend.client()?);
        let toasts = Arc::new(Toasts::new());
        let session = Session::restore(store, toasts.clone());

        Ok(Self {
            session,
            api,
            toasts,
        })
    }

    /// Loads the catalog through a view scope, the way a view would on mount.
    async fn load_catalog(&mut self, view: &'static str) {
        let mut scope = ViewScope::new(view);

        spawn_refresh(&mut scope, self.api.clone());
        apply_next(&mut self.session, &mut scope).await;
    }

    fn print_toasts(&self) {
        for toast in self.toasts.drain() {
            match toast.kind {
                ToastKind::Success => eprintln!("✔ {}", toast.message),
                ToastKind::Error => eprintln!("✘ {}", toast.message),
            }
        }
    }
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), CliError> {
        let mut context = Context::open(&self.config)?;

        let result = match self.command {
            Commands::Catalog(command) => catalog::run(&mut context, command).await,
            Commands::Cart(command) => cart::run(&mut context, command).await,
            Commands::Login(args) => account::login(&mut context, args),
            Commands::Logout => {
                account::logout(&mut context);
                Ok(())
            }
            Commands::Checkout(args) => checkout::run(&mut context, args).await,
            Commands::Orders(command) => orders::run(&mut context, command).await,
            Commands::Profile(command) => profile::run(&mut context, command).await,
            Commands::Admin(command) => admin::run(&mut context, command).await,
        };

        context.print_toasts();

        result
    }
}
