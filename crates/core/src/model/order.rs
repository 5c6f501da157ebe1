//! Order records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::embedded;
use crate::types::{OrderId, OrderStatus, Price, PriceError, ProductId};

/// One product/quantity/price entry of an order.
///
/// A snapshot taken at checkout: later edits to (or deletion of) the product
/// do not change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    /// Unit price paid (base or variant price).
    pub price: Price,
}

impl LineItem {
    /// `price × quantity`.
    ///
    /// # Errors
    ///
    /// Returns an error if the unit price is not a valid amount or the
    /// product does not fit in a `Decimal`.
    pub fn line_total(&self) -> Result<Decimal, PriceError> {
        self.price
            .amount()?
            .checked_mul(Decimal::from(self.quantity))
            .ok_or(PriceError::Overflow)
    }
}

/// Sum of `price × quantity` over `items`.
///
/// # Errors
///
/// Returns the first unit price that is not a valid amount, or
/// `PriceError::Overflow` if the sum does not fit in a `Decimal`.
pub fn items_total(items: &[LineItem]) -> Result<Decimal, PriceError> {
    items.iter().try_fold(Decimal::ZERO, |sum, item| {
        sum.checked_add(item.line_total()?).ok_or(PriceError::Overflow)
    })
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    #[serde(deserialize_with = "embedded::deserialize")]
    pub items: Vec<LineItem>,
    /// Total as submitted at checkout.
    pub total: Price,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Everything a checkout submits.
///
/// `status` is accepted for wire compatibility but ignored: every order is
/// created as [`OrderStatus::Pending`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    #[serde(deserialize_with = "embedded::deserialize")]
    pub items: Vec<LineItem>,
    pub total: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

impl Order {
    /// Build a pending order from checkout input.
    #[must_use]
    pub fn new(id: OrderId, input: OrderInput, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            customer_name: input.customer_name,
            customer_email: input.customer_email,
            customer_phone: input.customer_phone,
            customer_address: input.customer_address,
            items: input.items,
            total: input.total,
            status: OrderStatus::Pending,
            created_at,
        }
    }

    /// Total number of units across all line items.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(price: &str, quantity: u32) -> LineItem {
        LineItem {
            product_id: ProductId::generate(),
            product_name: "Milk".to_string(),
            quantity,
            price: Price::new(price),
        }
    }

    fn input(status: Option<OrderStatus>) -> OrderInput {
        OrderInput {
            customer_name: "Asha".to_string(),
            customer_email: "asha@example.com".to_string(),
            customer_phone: "9800000000".to_string(),
            customer_address: "Kathmandu".to_string(),
            items: vec![item("10.00", 2), item("5.50", 1)],
            total: Price::new("25.50"),
            status,
        }
    }

    #[test]
    fn test_items_total() {
        let items = vec![item("10.00", 2), item("5.50", 1)];
        assert_eq!(items_total(&items).unwrap(), Decimal::new(2550, 2));
        assert_eq!(items_total(&[]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_items_total_reports_bad_price() {
        let items = vec![item("10.00", 1), item("n/a", 1)];
        assert!(matches!(
            items_total(&items),
            Err(PriceError::NotANumber(_))
        ));
    }

    #[test]
    fn test_overflowing_totals_are_errors() {
        let max = Decimal::MAX.to_string();
        assert_eq!(item(&max, 2).line_total(), Err(PriceError::Overflow));
        assert_eq!(item(&max, 1).line_total().unwrap(), Decimal::MAX);
        assert_eq!(
            items_total(&[item(&max, 1), item(&max, 1)]),
            Err(PriceError::Overflow)
        );
    }

    #[test]
    fn test_new_order_is_pending_whatever_was_supplied() {
        let order = Order::new(
            OrderId::generate(),
            input(Some(OrderStatus::Completed)),
            Utc::now(),
        );
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, Price::new("25.50"));
    }

    #[test]
    fn test_item_count() {
        let order = Order::new(OrderId::generate(), input(None), Utc::now());
        assert_eq!(order.item_count(), 3);
    }

    #[test]
    fn test_items_accept_embedded_json_text() {
        let product_id = ProductId::generate();
        let json = format!(
            r#"{{
                "customerName": "Asha",
                "customerEmail": "asha@example.com",
                "customerPhone": "9800000000",
                "customerAddress": "Kathmandu",
                "items": "[{{\"productId\":\"{product_id}\",\"productName\":\"Milk\",\"quantity\":2,\"price\":\"60\"}}]",
                "total": "120.00",
                "status": "pending"
            }}"#
        );
        let input: OrderInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input.items.len(), 1);
        assert_eq!(input.items[0].product_id, product_id);
        assert_eq!(input.status, Some(OrderStatus::Pending));
    }
}
