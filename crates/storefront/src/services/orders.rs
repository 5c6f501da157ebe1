//! Order service.
//!
//! Checkout and back-office order handling. Two policies are configurable:
//!
//! - [`TransitionPolicy`] decides whether status changes follow the order
//!   lifecycle or may jump anywhere.
//! - [`TotalPolicy`] decides whether the submitted total is stored as-is or
//!   checked against the line items and the current catalog.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use frosteva_core::{Order, OrderId, OrderInput, Price, items_total};

use super::ServiceError;
use super::dashboard::{self, DashboardSummary};
use super::error::ValidationErrors;
use super::validation::{OrderForm, StatusForm};
use crate::db::{OrderRepository, ProductRepository};

/// How status updates are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Any status may replace any other.
    #[default]
    Permissive,
    /// Only moves along the order lifecycle are allowed.
    Strict,
}

/// How submitted order totals are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TotalPolicy {
    /// Store the client's total verbatim.
    #[default]
    Trusted,
    /// Recompute the total from the line items, which must name existing
    /// products at a price the product offers.
    Verify { tolerance: Decimal },
}

impl TotalPolicy {
    /// Allowed difference between submitted and computed totals (0.01).
    pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

    /// Verification with the default tolerance.
    #[must_use]
    pub const fn verify() -> Self {
        Self::Verify {
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }
}

/// Order operations exposed to the HTTP boundary.
#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    products: Arc<dyn ProductRepository>,
    transitions: TransitionPolicy,
    totals: TotalPolicy,
    // Serializes read-check-write in strict mode.
    status_lock: Arc<Mutex<()>>,
}

impl OrderService {
    /// Create an order service with permissive transitions and trusted totals.
    #[must_use]
    pub fn new(orders: Arc<dyn OrderRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self {
            orders,
            products,
            transitions: TransitionPolicy::default(),
            totals: TotalPolicy::default(),
            status_lock: Arc::new(Mutex::new(())),
        }
    }

    #[must_use]
    pub fn with_transitions(mut self, transitions: TransitionPolicy) -> Self {
        self.transitions = transitions;
        self
    }

    #[must_use]
    pub fn with_totals(mut self, totals: TotalPolicy) -> Self {
        self.totals = totals;
        self
    }

    /// All orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn list_orders(&self) -> Result<Vec<Order>, ServiceError> {
        Ok(self.orders.list_all().await?)
    }

    /// Look up an order.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn get_order(&self, id: OrderId) -> Result<Option<Order>, ServiceError> {
        Ok(self.orders.get(id).await?)
    }

    /// Validate and place an order. The stored order is always `pending`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for malformed payloads, and, when
    /// totals are verified, for items naming unknown products or prices the
    /// product does not offer. Returns `ServiceError::TotalMismatch` if the
    /// submitted total is off by more than the tolerance.
    #[instrument(skip(self, form))]
    pub async fn create_order(&self, form: OrderForm) -> Result<Order, ServiceError> {
        let input = form.into_input()?;

        if let TotalPolicy::Verify { tolerance } = self.totals {
            self.verify_total(&input, tolerance).await?;
        }

        let order = self.orders.create(input).await?;
        info!(
            order_id = %order.id,
            items = order.items.len(),
            total = %order.total,
            "Created order"
        );
        Ok(order)
    }

    async fn verify_total(
        &self,
        input: &OrderInput,
        tolerance: Decimal,
    ) -> Result<(), ServiceError> {
        let mut errors = ValidationErrors::default();
        for (i, item) in input.items.iter().enumerate() {
            match self.products.get(item.product_id).await? {
                None => errors.push(format!("items[{i}].productId"), "unknown product"),
                Some(product) if !product.offers_price(&item.price) => {
                    errors.push(format!("items[{i}].price"), "does not match the catalog");
                }
                Some(_) => {}
            }
        }
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let computed = items_total(&input.items)
            .map_err(|e| ValidationErrors::single("items", e.to_string()))?;
        let submitted = input
            .total
            .amount()
            .map_err(|e| ValidationErrors::single("total", e.to_string()))?;

        let within_tolerance = submitted
            .checked_sub(computed)
            .is_some_and(|difference| difference.abs() <= tolerance);
        if !within_tolerance {
            warn!(%submitted, %computed, "Order total mismatch");
            return Err(ServiceError::TotalMismatch {
                submitted: input.total.clone(),
                computed: Price::from_amount(computed),
            });
        }
        Ok(())
    }

    /// Change an order's status.
    ///
    /// Returns `Ok(None)` if the order does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if the status is missing or unknown,
    /// and `ServiceError::Transition` if the strict lifecycle forbids the move.
    #[instrument(skip(self, form), fields(order_id = %id))]
    pub async fn update_status(
        &self,
        id: OrderId,
        form: StatusForm,
    ) -> Result<Option<Order>, ServiceError> {
        let status = form.into_status()?;

        let order = match self.transitions {
            TransitionPolicy::Permissive => self.orders.update_status(id, status).await?,
            TransitionPolicy::Strict => {
                let _guard = self.status_lock.lock().await;
                let Some(current) = self.orders.get(id).await? else {
                    return Ok(None);
                };
                if !current.status.can_transition_to(status) {
                    return Err(ServiceError::Transition {
                        from: current.status,
                        to: status,
                    });
                }
                self.orders.update_status(id, status).await?
            }
        };

        if order.is_some() {
            info!(%status, "Updated order status");
        }
        Ok(order)
    }

    /// Dashboard figures over every order as of `now`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn dashboard_summary(
        &self,
        now: DateTime<Utc>,
    ) -> Result<DashboardSummary, ServiceError> {
        let orders = self.orders.list_all().await?;
        Ok(dashboard::summarize(&orders, now))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use frosteva_core::{OrderStatus, Product, ProductId, ProductInput, Stock};

    use super::*;
    use crate::db::{MemoryOrderRepository, MemoryProductRepository};
    use crate::services::validation::LineItemForm;

    struct Fixture {
        products: Arc<MemoryProductRepository>,
        orders: Arc<MemoryOrderRepository>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                products: Arc::new(MemoryProductRepository::new()),
                orders: Arc::new(MemoryOrderRepository::new()),
            }
        }

        fn service(&self) -> OrderService {
            OrderService::new(self.orders.clone(), self.products.clone())
        }

        async fn product(&self, price: &str) -> Product {
            self.products
                .create(ProductInput {
                    name: "Premium Ghee".to_string(),
                    description: "Pure cow ghee".to_string(),
                    price: Price::new(price),
                    category: "Dairy".to_string(),
                    image_url: "/images/ghee.png".to_string(),
                    stock: Stock::new("50"),
                    variants: Vec::new(),
                })
                .await
                .unwrap()
        }
    }

    fn form(product_id: ProductId, price: &str, quantity: i64, total: &str) -> OrderForm {
        OrderForm {
            customer_name: Some("Asha".to_string()),
            customer_email: Some("asha@example.com".to_string()),
            customer_phone: Some("9800000000".to_string()),
            customer_address: Some("Lakeside, Pokhara".to_string()),
            items: Some(vec![LineItemForm {
                product_id: Some(product_id.to_string()),
                product_name: Some("Premium Ghee".to_string()),
                quantity: Some(quantity),
                price: Some(price.to_string()),
            }]),
            total: Some(total.to_string()),
            status: None,
        }
    }

    fn status(s: &str) -> StatusForm {
        StatusForm {
            status: Some(s.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_order_is_pending_and_total_verbatim() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let id = ProductId::generate();

        let mut submitted = form(id, "10.00", 2, "25.50");
        submitted.status = Some("shipped".to_string());
        let order = service.create_order(submitted).await.unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, Price::new("25.50"));
        assert_eq!(service.list_orders().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_order_not_stored() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let id = ProductId::generate();

        let err = service
            .create_order(form(id, "10.00", 0, "0"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(service.list_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_permissive_allows_any_transition() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let id = ProductId::generate();
        let order = service
            .create_order(form(id, "10", 1, "10"))
            .await
            .unwrap();

        service
            .update_status(order.id, status("completed"))
            .await
            .unwrap()
            .unwrap();
        let reverted = service
            .update_status(order.id, status("pending"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reverted.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_unknown_status_rejected() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let id = ProductId::generate();
        let order = service
            .create_order(form(id, "10", 1, "10"))
            .await
            .unwrap();

        let err = service
            .update_status(order.id, status("lost"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref e) if e.contains("status")));
        let stored = service.get_order(order.id).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_update_unknown_order() {
        let fixture = Fixture::new();
        for policy in [TransitionPolicy::Permissive, TransitionPolicy::Strict] {
            let service = fixture.service().with_transitions(policy);
            let result = service
                .update_status(OrderId::generate(), status("shipped"))
                .await
                .unwrap();
            assert!(result.is_none());
        }
    }

    #[tokio::test]
    async fn test_strict_lifecycle() {
        let fixture = Fixture::new();
        let service = fixture.service().with_transitions(TransitionPolicy::Strict);
        let id = ProductId::generate();
        let order = service
            .create_order(form(id, "10", 1, "10"))
            .await
            .unwrap();

        let err = service
            .update_status(order.id, status("shipped"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Transition {
                from: OrderStatus::Pending,
                to: OrderStatus::Shipped
            }
        ));

        for next in ["processing", "shipped", "completed"] {
            service
                .update_status(order.id, status(next))
                .await
                .unwrap()
                .unwrap();
        }

        let err = service
            .update_status(order.id, status("pending"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Transition { .. }));
    }

    #[tokio::test]
    async fn test_verified_totals() {
        let fixture = Fixture::new();
        let service = fixture.service().with_totals(TotalPolicy::verify());
        let product = fixture.product("450").await;

        let order = service
            .create_order(form(product.id, "450", 2, "900.00"))
            .await
            .unwrap();
        assert_eq!(order.total, Price::new("900.00"));

        let err = service
            .create_order(form(product.id, "450", 2, "100"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::TotalMismatch { ref computed, .. } if *computed == Price::new("900.00")
        ));

        let err = service
            .create_order(form(product.id, "1", 2, "2"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref e) if e.contains("items[0].price")));

        let err = service
            .create_order(form(ProductId::generate(), "450", 1, "450"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, ServiceError::Validation(ref e) if e.contains("items[0].productId"))
        );

        assert_eq!(service.list_orders().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_overflowing_items_total_rejected() {
        let fixture = Fixture::new();
        let service = fixture.service().with_totals(TotalPolicy::verify());
        let max = Decimal::MAX.to_string();
        let product = fixture.product(&max).await;

        let err = service
            .create_order(form(product.id, &max, 2, &max))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref e) if e.contains("items")));
        assert!(service.list_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_trusted_totals_accept_anything() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let product = fixture.product("450").await;

        let order = service
            .create_order(form(product.id, "450", 2, "1"))
            .await
            .unwrap();
        assert_eq!(order.total, Price::new("1"));
    }

    #[tokio::test]
    async fn test_dashboard_summary() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let id = ProductId::generate();
        service.create_order(form(id, "10", 1, "10")).await.unwrap();
        service.create_order(form(id, "5", 1, "5.50")).await.unwrap();

        let summary = service.dashboard_summary(Utc::now()).await.unwrap();
        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.total_sales, Price::new("15.50"));
    }
}
