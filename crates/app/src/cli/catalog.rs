use clap::{Args, Subcommand};
use storefront::{
    catalog::{CollectionQuery, SortOrder},
    products::{Product, ProductId},
};
use storefront_app::shop::catalog::{
    BESTSELLER_LIMIT, LATEST_LIMIT, collection, product_page,
};

use super::{CliError, Context};

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// List products
    List(ListArgs),

    /// Show one product with related suggestions
    Show(ShowArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Case-insensitive name search
    #[arg(long)]
    search: Option<String>,

    /// Accepted category; repeatable
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Accepted sub-category; repeatable
    #[arg(long = "sub-category")]
    sub_categories: Vec<String>,

    /// Sort order (relevant, low-high, high-low)
    #[arg(long, default_value = "relevant")]
    sort: SortOrder,

    /// Only bestsellers
    #[arg(long, conflicts_with = "latest")]
    bestsellers: bool,

    /// Only the latest additions
    #[arg(long)]
    latest: bool,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Product identifier
    id: String,
}

pub(crate) async fn run(context: &mut Context, command: CatalogCommand) -> Result<(), CliError> {
    context.load_catalog("collection").await;

    match command.command {
        CatalogSubcommand::List(args) => {
            list(context, args);
            Ok(())
        }
        CatalogSubcommand::Show(args) => show(context, &ProductId::new(args.id)),
    }
}

fn list(context: &mut Context, args: ListArgs) {
    let catalog = context.session.catalog();

    if args.bestsellers {
        print_products(&catalog.bestsellers(BESTSELLER_LIMIT));
        return;
    }

    if args.latest {
        print_products(&catalog.latest(LATEST_LIMIT));
        return;
    }

    let mut query = CollectionQuery::new().sorted(args.sort);

    if let Some(search) = args.search {
        context.session.set_search(search);
    }

    for category in args.categories {
        query = query.with_category(category);
    }

    for sub_category in args.sub_categories {
        query = query.with_sub_category(sub_category);
    }

    print_products(&collection(&mut context.session, query));
}

fn show(context: &Context, id: &ProductId) -> Result<(), CliError> {
    let (product, related) = product_page(&context.session, id)?;

    println!("{}", product.name);
    println!("id: {}", product.id);
    println!("price: {}", product.unit_price());
    println!("category: {} / {}", product.category, product.sub_category);

    if !product.brand.is_empty() {
        println!("brand: {}", product.brand);
    }

    if !product.color.is_empty() {
        println!("color: {}", product.color);
    }

    if product.bestseller {
        println!("bestseller");
    }

    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }

    for image in &product.images {
        println!("image: {image}");
    }

    if !related.is_empty() {
        println!();
        println!("related products:");
        print_products(&related);
    }

    Ok(())
}

pub(crate) fn print_products(products: &[&Product]) {
    if products.is_empty() {
        println!("no products found");
        return;
    }

    for product in products {
        println!(
            "{}\t{}\t{}",
            product.id,
            product.unit_price(),
            product.name
        );
    }
}
