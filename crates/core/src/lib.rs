//! Frosteva Core - Shared domain types.
//!
//! This crate provides the types shared by every Frosteva component:
//! - `storefront` - Catalog, checkout, and back-office HTTP service
//! - `cli` - Command-line tools for administrators
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no locking,
//! no HTTP. Repositories and services live in the storefront crate and build
//! on the records defined here.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, stock levels, and order statuses
//! - [`model`] - Product and order records, inputs, and patches
//! - [`cart`] - Pricing a cart against the catalog
//! - [`embedded`] - Serde helpers for fields that arrive as serialized JSON text

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod embedded;
pub mod model;
pub mod types;

pub use cart::{CartError, CartLine, CartQuote};
pub use model::*;
pub use types::*;
