//! Back-office dashboard figures.

use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use frosteva_core::{Order, Price};

/// How many of the newest orders the dashboard lists.
pub const RECENT_ORDERS: usize = 5;

/// How many days the sales series covers, ending today.
pub const SALES_WINDOW_DAYS: u64 = 7;

/// Sales figures for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_sales: Price,
    pub total_orders: usize,
    /// Orders placed on the current UTC day.
    pub orders_today: usize,
    pub average_order_value: Price,
    /// Oldest day first.
    pub daily_sales: Vec<DailySales>,
    pub recent_orders: Vec<Order>,
}

/// Sales total for one UTC day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    pub date: NaiveDate,
    /// Short weekday name, e.g. `Mon`.
    pub weekday: String,
    pub sales: Price,
}

/// Summarize `orders` (newest first) as of `now`.
///
/// Orders whose stored total is not a valid amount, or would push total
/// sales past what a `Decimal` holds, count toward order numbers but not
/// toward sales.
#[must_use]
pub fn summarize(orders: &[Order], now: DateTime<Utc>) -> DashboardSummary {
    let today = now.date_naive();

    let mut amounts: Vec<(NaiveDate, Decimal)> = Vec::with_capacity(orders.len());
    let mut total_sales = Decimal::ZERO;
    for order in orders {
        let amount = match order.total.amount() {
            Ok(amount) => amount,
            Err(e) => {
                warn!(
                    order_id = %order.id,
                    error = %e,
                    "Skipping order with unreadable total"
                );
                continue;
            }
        };
        let Some(sum) = total_sales.checked_add(amount) else {
            warn!(
                order_id = %order.id,
                total = %order.total,
                "Skipping order whose total overflows sales"
            );
            continue;
        };
        total_sales = sum;
        amounts.push((order.created_at.date_naive(), amount));
    }

    let total_orders = orders.len();
    let orders_today = orders
        .iter()
        .filter(|order| order.created_at.date_naive() == today)
        .count();

    let average_order_value = if total_orders == 0 {
        Decimal::ZERO
    } else {
        total_sales / Decimal::from(total_orders)
    };

    let daily_sales = (0..SALES_WINDOW_DAYS)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| {
            // A subset of the amounts already summed into total_sales.
            let sales = amounts
                .iter()
                .filter(|(day, _)| *day == date)
                .fold(Decimal::ZERO, |sum, (_, amount)| sum.saturating_add(*amount));
            DailySales {
                date,
                weekday: date.format("%a").to_string(),
                sales: Price::from_amount(sales),
            }
        })
        .collect();

    DashboardSummary {
        total_sales: Price::from_amount(total_sales),
        total_orders,
        orders_today,
        average_order_value: Price::from_amount(average_order_value),
        daily_sales,
        recent_orders: orders.iter().take(RECENT_ORDERS).cloned().collect(),
    }
}
