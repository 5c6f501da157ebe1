//! In-memory product repository.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use frosteva_core::{Product, ProductId, ProductInput, ProductPatch};

use super::{ProductRepository, RepositoryError};

/// Product repository holding the catalog in memory.
#[derive(Debug, Default)]
pub struct MemoryProductRepository {
    table: RwLock<ProductTable>,
}

#[derive(Debug, Default)]
struct ProductTable {
    records: HashMap<ProductId, Product>,
    /// Live ids in insertion order.
    order: Vec<ProductId>,
    /// Every id ever handed out, including deleted ones.
    issued: HashSet<ProductId>,
}

impl ProductTable {
    fn fresh_id(&mut self) -> ProductId {
        loop {
            let id = ProductId::generate();
            if self.issued.insert(id) {
                return id;
            }
        }
    }
}

impl MemoryProductRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of products currently stored.
    pub async fn len(&self) -> usize {
        self.table.read().await.records.len()
    }

    /// Whether the catalog is empty.
    pub async fn is_empty(&self) -> bool {
        self.table.read().await.records.is_empty()
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table
            .order
            .iter()
            .filter_map(|id| table.records.get(id))
            .cloned()
            .collect())
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.table.read().await.records.get(&id).cloned())
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    async fn create(&self, input: ProductInput) -> Result<Product, RepositoryError> {
        let mut table = self.table.write().await;
        let id = table.fresh_id();
        let product = Product::new(id, input);

        table.records.insert(id, product.clone());
        table.order.push(id);

        debug!(product_id = %id, "Stored product");
        Ok(product)
    }

    #[instrument(skip(self, patch))]
    async fn update(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut table = self.table.write().await;
        let Some(product) = table.records.get_mut(&id) else {
            return Ok(None);
        };

        product.apply(patch);
        debug!(product_id = %id, "Updated product");
        Ok(Some(product.clone()))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let mut table = self.table.write().await;
        if table.records.remove(&id).is_none() {
            return Ok(false);
        }

        table.order.retain(|existing| *existing != id);
        debug!(product_id = %id, "Deleted product");
        Ok(true)
    }
}
