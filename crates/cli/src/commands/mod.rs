//! Command implementations.
//!
//! Each command writes human-readable output to the writer it is given.

pub mod catalog;
pub mod orders;
pub mod products;
pub mod summary;
