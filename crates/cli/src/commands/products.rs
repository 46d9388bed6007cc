//! `catalog products` subcommands.

use catalog_core::{CATEGORIES, Product, ProductDraft, PropertyDraft};
use catalog_storefront::api::HttpProductApi;
use catalog_storefront::gateway::ProductGateway;
use catalog_storefront::views::{detail, form, list};

use super::CommandError;

/// Flags of `catalog products create`.
#[derive(clap::Args)]
pub struct CreateArgs {
    /// Product name (at least 3 characters)
    #[arg(long)]
    name: String,

    /// Product description (at least 10 characters)
    #[arg(long)]
    description: String,

    /// Price (at least 50)
    #[arg(long)]
    price: String,

    /// Image URL (http or https)
    #[arg(long)]
    image_url: String,

    /// Category
    #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(CATEGORIES.iter().copied()))]
    category: Option<String>,

    /// Mark the product as out of stock
    #[arg(long)]
    out_of_stock: bool,

    /// Rating between 0 and 5
    #[arg(long, default_value = "0")]
    rating: String,

    /// Physical property as COLOR:WEIGHT (repeatable)
    #[arg(long = "property", value_parser = parse_property)]
    properties: Vec<PropertyDraft>,
}

impl From<CreateArgs> for ProductDraft {
    fn from(args: CreateArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            price: args.price,
            category: args.category.unwrap_or_default(),
            image_url: args.image_url,
            in_stock: !args.out_of_stock,
            rating: args.rating,
            properties: args.properties,
        }
    }
}

fn parse_property(raw: &str) -> Result<PropertyDraft, String> {
    let (color, weight) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected COLOR:WEIGHT, got {raw:?}"))?;
    Ok(PropertyDraft {
        color: color.trim().to_owned(),
        weight: weight.trim().to_owned(),
    })
}

/// One-line rendering of a product.
fn product_line(product: &Product, in_cart: bool) -> String {
    let marker = if in_cart { "*" } else { " " };
    format!(
        "{marker} {:>4}  {:<30}  {:>10}",
        product.id,
        product.name,
        product.price.to_string()
    )
}

/// List products, optionally filtered.
///
/// # Errors
///
/// Returns an error if the product list cannot be fetched.
#[allow(clippy::print_stdout)]
pub async fn list(
    gateway: &ProductGateway<HttpProductApi>,
    search: &str,
) -> Result<(), CommandError> {
    let products = gateway.get_all_products().await?;
    let state = gateway.state().current_state();

    let shown = list::filter_products(&products, search);
    if shown.is_empty() {
        println!("No products found.");
        return Ok(());
    }
    for product in shown {
        println!("{}", product_line(product, state.is_in_cart(product.id)));
    }
    println!("\n{} item(s) in cart", state.cart_count());
    Ok(())
}

/// Show one product.
///
/// # Errors
///
/// Returns [`CommandError::NotFound`] if the id is invalid or the product
/// cannot be fetched.
#[allow(clippy::print_stdout)]
pub async fn show(gateway: &ProductGateway<HttpProductApi>, id: &str) -> Result<(), CommandError> {
    let detail = detail::load_product(gateway, Some(id)).await?;
    let product = &detail.product;

    println!("{} (#{})", product.name, product.id);
    println!("  {}", product.description);
    println!("  Price:    {}", product.price);
    println!("  Category: {}", detail.category());
    if let Some(in_stock) = product.in_stock {
        println!("  In stock: {}", if in_stock { "yes" } else { "no" });
    }
    if let Some(rating) = product.rating {
        println!("  Rating:   {rating}/5");
    }
    for property in &product.properties {
        println!("  Property: {} / {}", property.color, property.weight);
    }
    println!("  Image:    {}", product.image_url);
    println!(
        "  {}",
        if detail.in_cart { "In cart" } else { "Not in cart" }
    );
    Ok(())
}

/// Validate and create a product.
///
/// # Errors
///
/// Returns an error if validation or the request fails.
#[allow(clippy::print_stdout)]
pub async fn create(
    gateway: &ProductGateway<HttpProductApi>,
    args: CreateArgs,
) -> Result<(), CommandError> {
    match form::submit(gateway, &args.into()).await {
        form::FormOutcome::Created { product, message } => {
            println!("{message}");
            println!("{}", product_line(&product, false));
            Ok(())
        }
        form::FormOutcome::Invalid(errors) => Err(CommandError::Invalid(errors)),
        form::FormOutcome::Failed { message } => Err(CommandError::CreateFailed(message)),
    }
}
