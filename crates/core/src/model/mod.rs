//! Catalog and order records.
//!
//! Records are what repositories store and hand back. Inputs carry everything
//! but the fields a repository assigns itself (ids, timestamps, initial status);
//! patches carry only the fields an update touches.

pub mod order;
pub mod product;

pub use order::{LineItem, Order, OrderInput, items_total};
pub use product::{Product, ProductInput, ProductPatch, Variant};
