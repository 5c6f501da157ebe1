//! Core types for the Frosteva storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod status;
pub mod stock;

pub use id::*;
pub use price::{Price, PriceError};
pub use status::{OrderStatus, UnknownStatus};
pub use stock::{Stock, StockError};
