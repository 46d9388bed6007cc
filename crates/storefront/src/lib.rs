//! Catalog Storefront library.
//!
//! Everything between the product REST API and whatever renders the catalog:
//!
//! - [`state`] - the application state container (copy-on-write snapshots
//!   broadcast to observers)
//! - [`gateway`] - product operations that drive the container and persist the
//!   cart
//! - [`api`] - the product API capability and its `reqwest` implementation
//! - [`error`] - classification of transport failures into user-facing text
//! - [`cart_store`], [`session`], [`storage`] - durable key-value state
//! - [`views`] - view models for the list, detail, cart, and form screens
//!
//! # Control flow
//!
//! A view calls a [`gateway::ProductGateway`] operation. The gateway marks the
//! container as loading, awaits the [`api::ProductApi`], then writes either the
//! result or a classified error back into the container. Observers re-render
//! from the snapshots they are handed. Cart mutations go gateway → container →
//! [`cart_store::CartStore`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart_store;
pub mod config;
pub mod error;
pub mod gateway;
pub mod session;
pub mod state;
pub mod storage;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;
