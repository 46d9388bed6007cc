//! Field-level validation for the product creation form.
//!
//! A [`ProductDraft`] holds raw form input. [`ProductDraft::validate`] either
//! produces a [`NewProduct`] ready to submit or every failing field at once.
//! Validation is pure; a failed draft never reaches the product API.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::types::{NewProduct, Price, ProductProperty};

/// Categories offered by the creation form.
pub const CATEGORIES: &[&str] = &[
    "Electronics",
    "Clothing",
    "Food",
    "Books",
    "Home & Garden",
    "Sports",
];

const NAME_MIN_LENGTH: usize = 3;
const DESCRIPTION_MIN_LENGTH: usize = 10;
const PRICE_MIN: i64 = 50;
const RATING_MIN: f64 = 0.0;
const RATING_MAX: f64 = 5.0;

/// A single failing form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field path, e.g. `name` or `properties[0].color`.
    pub field: String,
    /// Human-readable message shown next to the field.
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn required(field: &str) -> Self {
        Self::new(field, format!("{field} is required"))
    }
}

/// All field errors of a rejected draft, in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// The failing fields.
    #[must_use]
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    /// Message for one field, if it failed.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw input of one property row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyDraft {
    pub color: String,
    pub weight: String,
}

/// Raw product creation form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    /// Price as typed.
    pub price: String,
    /// Empty means no category.
    pub category: String,
    pub image_url: String,
    pub in_stock: bool,
    /// Rating as typed; empty means unrated.
    pub rating: String,
    pub properties: Vec<PropertyDraft>,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category: String::new(),
            image_url: String::new(),
            in_stock: true,
            rating: "0".to_string(),
            properties: Vec::new(),
        }
    }
}

impl ProductDraft {
    /// Validate the draft and build the creation request.
    ///
    /// # Errors
    ///
    /// Returns every failing field when any rule is violated.
    pub fn validate(&self) -> Result<NewProduct, ValidationErrors> {
        let mut errors = Vec::new();

        check_min_length(&mut errors, "name", &self.name, NAME_MIN_LENGTH);
        check_min_length(
            &mut errors,
            "description",
            &self.description,
            DESCRIPTION_MIN_LENGTH,
        );
        let price = parse_price(&mut errors, &self.price);
        check_image_url(&mut errors, &self.image_url);
        let rating = parse_rating(&mut errors, &self.rating);

        for (i, property) in self.properties.iter().enumerate() {
            if property.color.is_empty() {
                errors.push(FieldError::required(&format!("properties[{i}].color")));
            }
            if property.weight.is_empty() {
                errors.push(FieldError::required(&format!("properties[{i}].weight")));
            }
        }

        match price {
            Some(price) if errors.is_empty() => Ok(NewProduct {
                name: self.name.clone(),
                description: self.description.clone(),
                price,
                image_url: self.image_url.clone(),
                category: (!self.category.is_empty()).then(|| self.category.clone()),
                in_stock: Some(self.in_stock),
                rating,
                properties: self
                    .properties
                    .iter()
                    .map(|p| ProductProperty {
                        color: p.color.clone(),
                        weight: p.weight.clone(),
                    })
                    .collect(),
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}

fn check_min_length(errors: &mut Vec<FieldError>, field: &str, value: &str, min: usize) {
    if value.is_empty() {
        errors.push(FieldError::required(field));
    } else if value.chars().count() < min {
        errors.push(FieldError::new(
            field,
            format!("{field} must be at least {min} characters"),
        ));
    }
}

fn parse_price(errors: &mut Vec<FieldError>, value: &str) -> Option<Price> {
    let value = value.trim();
    if value.is_empty() {
        errors.push(FieldError::required("price"));
        return None;
    }
    let Ok(amount) = Decimal::from_str(value) else {
        errors.push(FieldError::new("price", "price must be a number"));
        return None;
    };
    if amount < Decimal::from(PRICE_MIN) {
        errors.push(FieldError::new(
            "price",
            format!("price must be at least {PRICE_MIN}"),
        ));
        return None;
    }
    Price::new(amount).ok()
}

fn check_image_url(errors: &mut Vec<FieldError>, value: &str) {
    if value.is_empty() {
        errors.push(FieldError::required("imageUrl"));
        return;
    }
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    if rest.is_none_or(str::is_empty) {
        errors.push(FieldError::new("imageUrl", "imageUrl must be a valid URL"));
    }
}

fn parse_rating(errors: &mut Vec<FieldError>, value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let rating = match value.parse::<f64>() {
        Ok(rating) if rating.is_finite() => rating,
        _ => {
            errors.push(FieldError::new("rating", "rating must be a number"));
            return None;
        }
    };
    if rating < RATING_MIN {
        errors.push(FieldError::new(
            "rating",
            format!("rating must be at least {RATING_MIN}"),
        ));
    } else if rating > RATING_MAX {
        errors.push(FieldError::new(
            "rating",
            format!("rating cannot exceed {RATING_MAX}"),
        ));
    }
    Some(rating)
}
