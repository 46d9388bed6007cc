//! Catalog Core - Shared domain types.
//!
//! This crate provides the types used across all catalog components:
//! - `storefront` - State container, product gateway, and cart persistence
//! - `cli` - Command-line front-end for browsing products and managing the cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure validation - no I/O, no
//! storage access, no HTTP clients. This keeps it lightweight and allows it to
//! be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, and product records
//! - [`validation`] - Field-level rules for the product creation form

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{CATEGORIES, FieldError, ProductDraft, PropertyDraft, ValidationErrors};
