//! Dashboard command.

use std::io::Write;

use frosteva_storefront::services::DashboardSummary;

use crate::client::ApiClient;
use crate::error::CliError;

/// Print dashboard figures.
pub async fn show(api: &ApiClient, out: &mut impl Write) -> Result<(), CliError> {
    let summary: DashboardSummary = api.get("/api/admin/summary").await?;
    write_summary(&summary, out)?;
    Ok(())
}

fn write_summary(summary: &DashboardSummary, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Total sales:    {}", summary.total_sales)?;
    writeln!(out, "Orders:         {}", summary.total_orders)?;
    writeln!(out, "Orders today:   {}", summary.orders_today)?;
    writeln!(out, "Average order:  {}", summary.average_order_value)?;
    writeln!(out)?;
    for day in &summary.daily_sales {
        writeln!(out, "{} {}  {:>10}", day.weekday, day.date, day.sales)?;
    }
    if !summary.recent_orders.is_empty() {
        writeln!(out)?;
        writeln!(out, "Recent orders:")?;
        for order in &summary.recent_orders {
            writeln!(
                out,
                "  {}  {:<10}  {:>10}  {}",
                order.id, order.status, order.total, order.customer_name
            )?;
        }
    }
    Ok(())
}
