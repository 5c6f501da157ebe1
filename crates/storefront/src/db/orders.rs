//! In-memory order repository.

use std::collections::{HashMap, HashSet};
use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use frosteva_core::{Order, OrderId, OrderInput, OrderStatus};

use super::{OrderRepository, RepositoryError};

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Order repository holding all orders in memory.
pub struct MemoryOrderRepository {
    table: RwLock<OrderTable>,
    clock: Clock,
}

#[derive(Debug, Default)]
struct OrderTable {
    records: HashMap<OrderId, Order>,
    /// Ids in insertion order.
    order: Vec<OrderId>,
    issued: HashSet<OrderId>,
    /// Timestamp of the most recent order; new orders never sort before it.
    latest: Option<DateTime<Utc>>,
}

impl OrderTable {
    fn fresh_id(&mut self) -> OrderId {
        loop {
            let id = OrderId::generate();
            if self.issued.insert(id) {
                return id;
            }
        }
    }

    fn stamp(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        let created_at = self.latest.map_or(now, |latest| latest.max(now));
        self.latest = Some(created_at);
        created_at
    }
}

impl MemoryOrderRepository {
    /// Create an empty repository stamping orders with the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Create an empty repository with a custom time source.
    #[must_use]
    pub fn with_clock<F>(clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            table: RwLock::new(OrderTable::default()),
            clock: Box::new(clock),
        }
    }
}

impl Default for MemoryOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryOrderRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryOrderRepository")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl OrderRepository for MemoryOrderRepository {
    async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let table = self.table.read().await;
        let mut orders: Vec<Order> = table
            .order
            .iter()
            .rev()
            .filter_map(|id| table.records.get(id))
            .cloned()
            .collect();
        // Stable sort: equal timestamps keep reverse insertion order.
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self.table.read().await.records.get(&id).cloned())
    }

    #[instrument(skip(self, input), fields(items = input.items.len(), total = %input.total))]
    async fn create(&self, input: OrderInput) -> Result<Order, RepositoryError> {
        let now = (self.clock)();
        let mut table = self.table.write().await;
        let id = table.fresh_id();
        let created_at = table.stamp(now);
        let order = Order::new(id, input, created_at);

        table.records.insert(id, order.clone());
        table.order.push(id);

        debug!(order_id = %id, "Stored order");
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut table = self.table.write().await;
        let Some(order) = table.records.get_mut(&id) else {
            return Ok(None);
        };

        let previous = order.status;
        order.status = status;
        debug!(order_id = %id, from = %previous, to = %status, "Updated order status");
        Ok(Some(order.clone()))
    }
}
