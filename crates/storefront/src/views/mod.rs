//! View models for the storefront screens.
//!
//! Rendering is left to the caller. Each module turns state snapshots and
//! gateway results into the data a screen displays, and forwards user intents
//! (search, select, submit) to the gateway.

pub mod cart;
pub mod detail;
pub mod form;
pub mod list;
