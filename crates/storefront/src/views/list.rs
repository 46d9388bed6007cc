//! Product list screen.

use catalog_core::Product;

/// Products whose name or description contains `term`, ignoring case.
///
/// An empty term keeps every product.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    if term.is_empty() {
        return products.iter().collect();
    }
    let term = term.to_lowercase();
    products
        .iter()
        .filter(|p| p.matches_lowercase(&term))
        .collect()
}
