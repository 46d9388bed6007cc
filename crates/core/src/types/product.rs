//! Product records as exchanged with the product API.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A physical attribute pair attached by the creation form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductProperty {
    pub color: String,
    pub weight: String,
}

/// A catalog product.
///
/// Immutable once fetched; replaced wholesale by a re-fetch or creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned identifier.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Image URL.
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    /// Rating on a 0-5 scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<ProductProperty>,
}

impl Product {
    /// Case-insensitive match of `term` against the name or description.
    ///
    /// `term` must already be lowercase.
    #[must_use]
    pub fn matches_lowercase(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term) || self.description.to_lowercase().contains(term)
    }
}

/// Request body for creating a product: a [`Product`] without its identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<ProductProperty>,
}

impl NewProduct {
    /// Attach a server-assigned identifier.
    #[must_use]
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
            category: self.category,
            in_stock: self.in_stock,
            rating: self.rating,
            properties: self.properties,
        }
    }
}
