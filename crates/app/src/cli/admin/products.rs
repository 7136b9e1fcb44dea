use std::{fs, path::PathBuf};

use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use storefront::{
    admin::{DEFAULT_CATEGORY, DEFAULT_SUB_CATEGORY, IMAGE_SLOTS, ImageUpload, ProductDraft},
    products::{Product, ProductId},
};
use storefront_app::console::products::{
    add_product, edit_form, list_products, remove_product, update_product,
};

use crate::cli::{CliError, Context, catalog::print_products};

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List every product
    List,

    /// Upload a new product
    Add(AddArgs),

    /// Edit a product
    Update(UpdateArgs),

    /// Remove a product
    Remove(RemoveArgs),
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product name
    #[arg(long, default_value = "")]
    name: String,

    /// Product description
    #[arg(long, default_value = "")]
    description: String,

    /// Unit price
    #[arg(long, default_value = "")]
    price: String,

    /// Category
    #[arg(long, default_value = DEFAULT_CATEGORY)]
    category: String,

    /// Sub-category
    #[arg(long, default_value = DEFAULT_SUB_CATEGORY)]
    sub_category: String,

    /// Brand
    #[arg(long, default_value = "")]
    brand: String,

    /// Colour
    #[arg(long, default_value = "")]
    color: String,

    /// Feature as bestseller
    #[arg(long)]
    bestseller: bool,

    /// Image file; up to four, uploaded in slot order
    #[arg(long = "image")]
    images: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// Product identifier
    id: String,

    /// New name
    #[arg(long)]
    name: Option<String>,

    /// New description
    #[arg(long)]
    description: Option<String>,

    /// New unit price
    #[arg(long)]
    price: Option<Decimal>,

    /// New category
    #[arg(long)]
    category: Option<String>,
}

#[derive(Debug, Args)]
struct RemoveArgs {
    /// Product identifier
    id: String,
}

pub(crate) async fn run(context: &mut Context, command: ProductsCommand) -> Result<(), CliError> {
    let api = &*context.api;

    match command.command {
        ProductsSubcommand::List => {
            let products = list_products(&context.session, api).await?;
            print_listing(&products);
        }
        ProductsSubcommand::Add(args) => {
            let mut draft = draft(args)?;
            add_product(&context.session, api, &mut draft).await?;
        }
        ProductsSubcommand::Update(args) => {
            let id = ProductId::new(args.id);
            let mut form = edit_form(&context.session, api, &id).await?;

            if let Some(name) = args.name {
                form.name = name;
            }

            if let Some(description) = args.description {
                form.description = description;
            }

            if let Some(price) = args.price {
                form.price = price;
            }

            if let Some(category) = args.category {
                form.category = category;
            }

            update_product(&context.session, api, &id, &form).await?;
        }
        ProductsSubcommand::Remove(args) => {
            let products =
                remove_product(&context.session, api, &ProductId::new(args.id)).await?;
            print_listing(&products);
        }
    }

    Ok(())
}

fn draft(args: AddArgs) -> Result<ProductDraft, CliError> {
    if args.images.len() > IMAGE_SLOTS {
        return Err(CliError::Usage(format!(
            "at most {IMAGE_SLOTS} images can be uploaded"
        )));
    }

    let mut draft = ProductDraft {
        name: args.name,
        description: args.description,
        price: args.price,
        category: args.category,
        sub_category: args.sub_category,
        brand: args.brand,
        color: args.color,
        bestseller: args.bestseller,
        ..ProductDraft::default()
    };

    for (slot, path) in args.images.into_iter().enumerate() {
        let bytes = fs::read(&path).map_err(|source| CliError::Image {
            path: path.clone(),
            source,
        })?;

        let file_name = path.file_name().map_or_else(
            || format!("image{}", slot + 1),
            |name| name.to_string_lossy().into_owned(),
        );

        draft
            .images
            .set(slot, ImageUpload::new(file_name, bytes))
            .map_err(|error| CliError::Usage(error.to_string()))?;
    }

    Ok(draft)
}

fn print_listing(products: &[Product]) {
    print_products(&products.iter().collect::<Vec<_>>());
}
