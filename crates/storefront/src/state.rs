//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::db::{
    MemoryOrderRepository, MemoryProductRepository, OrderRepository, ProductRepository,
};
use crate::services::{CatalogService, OrderService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and owns the repositories
/// through the services built on top of them. There is no process-global
/// store: two states never share data unless built over the same repositories.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: CatalogService,
    orders: OrderService,
}

impl AppState {
    /// Create application state over fresh in-memory repositories.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self::with_repositories(
            config,
            Arc::new(MemoryProductRepository::new()),
            Arc::new(MemoryOrderRepository::new()),
        )
    }

    /// Create application state over the given repositories.
    ///
    /// Order policies are taken from `config`.
    #[must_use]
    pub fn with_repositories(
        config: &StorefrontConfig,
        products: Arc<dyn ProductRepository>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        let catalog = CatalogService::new(Arc::clone(&products));
        let orders = OrderService::new(orders, products)
            .with_transitions(config.transitions)
            .with_totals(config.totals);

        Self {
            inner: Arc::new(AppStateInner { catalog, orders }),
        }
    }

    /// Get a reference to the catalog service.
    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }

    /// Get a reference to the order service.
    #[must_use]
    pub fn orders(&self) -> &OrderService {
        &self.inner.orders
    }
}
