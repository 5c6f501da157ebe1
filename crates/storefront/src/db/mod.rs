//! Repositories for catalog and order data.
//!
//! # Storage
//!
//! Both repositories keep their records in memory, each behind a single
//! `tokio::sync::RwLock` guarding the whole map. Records are created,
//! read, and changed only through the repository traits, which are the
//! seam for substituting a durable backend.
//!
//! ## Persisted layout (durable backends)
//!
//! - `products` - keyed by product id
//! - `orders` - keyed by order id
//!
//! # Failure policy
//!
//! "Not found" is never an error: lookups return `Option`, deletes return
//! `bool`. `RepositoryError` is reserved for the backend itself failing.
//! Repositories perform no validation; callers validate first.

pub mod orders;
pub mod products;

use async_trait::async_trait;
use thiserror::Error;

use frosteva_core::{
    Order, OrderId, OrderInput, OrderStatus, Product, ProductId, ProductInput, ProductPatch,
};

pub use orders::MemoryOrderRepository;
pub use products::MemoryProductRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing store could not be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Authoritative store of all products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products in insertion order.
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Look up a product.
    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Store a new product under a fresh id that has never been issued before.
    async fn create(&self, input: ProductInput) -> Result<Product, RepositoryError>;

    /// Merge `patch` over an existing product. Returns `None` if `id` is
    /// unknown; never creates.
    async fn update(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, RepositoryError>;

    /// Remove a product. Returns whether a record existed.
    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError>;
}

/// Authoritative store of all orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// All orders, newest first. Orders created at the same instant are
    /// listed in reverse insertion order.
    async fn list_all(&self) -> Result<Vec<Order>, RepositoryError>;

    /// Look up an order.
    async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError>;

    /// Store a new order with a fresh id, the current time, and status
    /// `pending`, whatever status the input carries.
    async fn create(&self, input: OrderInput) -> Result<Order, RepositoryError>;

    /// Replace an order's status. Returns `None` if `id` is unknown.
    ///
    /// Any status may replace any other; lifecycle rules belong to callers.
    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError>;
}
