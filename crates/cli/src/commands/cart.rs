//! `catalog cart` subcommands.

use catalog_core::ProductId;
use catalog_storefront::api::HttpProductApi;
use catalog_storefront::gateway::ProductGateway;
use catalog_storefront::views::cart::load_cart_view;

use super::CommandError;

type Gateway = ProductGateway<HttpProductApi>;

/// Print the cart contents and total.
///
/// # Errors
///
/// Returns an error if the product list has to be fetched and the request
/// fails.
#[allow(clippy::print_stdout)]
pub async fn show(gateway: &Gateway) -> Result<(), CommandError> {
    let summary = load_cart_view(gateway).await?;
    if summary.is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }
    for product in &summary.items {
        println!("  {:>4}  {:<30}  {:>10}", product.id, product.name, product.price.to_string());
    }
    println!("Total ({} item(s)): {}", summary.count(), summary.total);
    Ok(())
}

/// # Errors
///
/// Returns an error if the cart cannot be persisted.
#[allow(clippy::print_stdout)]
pub fn add(gateway: &Gateway, id: ProductId) -> Result<(), CommandError> {
    gateway.add_to_cart(id)?;
    println!("Added {id} ({} item(s) in cart)", gateway.state().cart_count());
    Ok(())
}

/// # Errors
///
/// Returns an error if the cart cannot be persisted.
#[allow(clippy::print_stdout)]
pub fn remove(gateway: &Gateway, id: ProductId) -> Result<(), CommandError> {
    gateway.remove_from_cart(id)?;
    println!("Removed {id} ({} item(s) in cart)", gateway.state().cart_count());
    Ok(())
}

/// # Errors
///
/// Returns an error if the cart cannot be persisted.
#[allow(clippy::print_stdout)]
pub fn toggle(gateway: &Gateway, id: ProductId) -> Result<(), CommandError> {
    let verb = if gateway.toggle_cart(id)? { "Added" } else { "Removed" };
    println!("{verb} {id} ({} item(s) in cart)", gateway.state().cart_count());
    Ok(())
}

/// # Errors
///
/// Returns an error if the stored cart cannot be removed.
#[allow(clippy::print_stdout)]
pub fn clear(gateway: &Gateway) -> Result<(), CommandError> {
    gateway.clear_cart()?;
    println!("Cart cleared.");
    Ok(())
}
