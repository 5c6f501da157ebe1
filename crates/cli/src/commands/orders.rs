//! Order commands.

use std::io::Write;

use serde_json::json;

use frosteva_core::{Order, OrderStatus};

use crate::client::ApiClient;
use crate::error::CliError;

/// List every order, newest first.
pub async fn list(api: &ApiClient, out: &mut impl Write) -> Result<(), CliError> {
    let orders: Vec<Order> = api.get("/api/orders").await?;
    for order in &orders {
        write_order(order, out)?;
    }
    writeln!(out, "{} orders", orders.len())?;
    Ok(())
}

/// Set an order's status.
///
/// The status is checked locally first so typos fail without a round trip.
pub async fn set_status(
    api: &ApiClient,
    id: &str,
    status: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let status: OrderStatus = status.parse()?;
    let order: Order = api
        .patch(&format!("/api/orders/{id}"), &json!({ "status": status }))
        .await?;
    tracing::info!(order_id = %order.id, %status, "Order updated");
    write_order(&order, out)?;
    Ok(())
}

fn write_order(order: &Order, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(
        out,
        "{}  {}  {:<10}  {:>10}  {} ({} items)",
        order.id,
        order.created_at.format("%Y-%m-%d %H:%M"),
        order.status,
        order.total,
        order.customer_name,
        order.item_count()
    )
}
