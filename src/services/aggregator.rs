//! Aggregator service for computing sales statistics

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::bucketing;
use super::windows::{PeriodWindows, Window};
use crate::types::{
    validate_batch, BucketOrder, ChartSeries, OrderRecord, RawOrder, Result, SalesSummary, TopItem,
};

/// Number of items the top-sellers list shows by default
pub const DEFAULT_TOP_ITEMS: usize = 5;

/// Aggregator for computing sales statistics
pub struct Aggregator;

impl Aggregator {
    /// Summary and chart series for a batch, evaluated at `now`.
    ///
    /// Orders that are not completed are ignored. Chart buckets keep
    /// first-seen order.
    pub fn aggregate(orders: &[OrderRecord], now: DateTime<Utc>) -> (SalesSummary, ChartSeries) {
        Self::aggregate_with(orders, now, BucketOrder::FirstSeen)
    }

    pub fn aggregate_with(
        orders: &[OrderRecord],
        now: DateTime<Utc>,
        order: BucketOrder,
    ) -> (SalesSummary, ChartSeries) {
        (Self::summary(orders, now), bucketing::chart(orders, order))
    }

    /// Validate raw backend documents, then aggregate
    pub fn aggregate_raw(
        raws: Vec<RawOrder>,
        now: DateTime<Utc>,
    ) -> Result<(SalesSummary, ChartSeries)> {
        let orders = validate_batch(raws)?;
        Ok(Self::aggregate(&orders, now))
    }

    /// Cumulative and windowed totals over completed orders
    pub fn summary(orders: &[OrderRecord], now: DateTime<Utc>) -> SalesSummary {
        let windows = PeriodWindows::anchored_at(now);
        let mut summary = SalesSummary::default();

        for order in orders.iter().filter(|o| o.is_completed()) {
            let at = order.created_at;
            let sales = order.sales();
            let products = order.products_sold();

            summary.total_sales = summary.total_sales.saturating_add(sales);
            summary.total_products = summary.total_products.saturating_add(order.line_count());
            summary.total_orders = summary.total_orders.saturating_add(1);

            if windows.today.contains(at) {
                summary.today_sales = summary.today_sales.saturating_add(sales);
                summary.today_orders = summary.today_orders.saturating_add(1);
                summary.today_products_sold = summary.today_products_sold.saturating_add(products);
            } else if windows.yesterday.contains(at) {
                summary.yesterday_sales = summary.yesterday_sales.saturating_add(sales);
                summary.yesterday_orders = summary.yesterday_orders.saturating_add(1);
                summary.yesterday_products_sold =
                    summary.yesterday_products_sold.saturating_add(products);
            }

            add_within(&mut summary.this_week_sales, &windows.this_week, at, sales);
            add_within(&mut summary.last_week_sales, &windows.last_week, at, sales);
            add_within(&mut summary.this_month_sales, &windows.this_month, at, sales);
            add_within(&mut summary.last_month_sales, &windows.last_month, at, sales);
            add_within(&mut summary.this_year_sales, &windows.this_year, at, sales);
            add_within(&mut summary.last_year_sales, &windows.last_year, at, sales);
        }

        summary
    }

    /// Units and revenue per menu item over completed orders
    pub fn by_item(orders: &[OrderRecord]) -> HashMap<String, TopItem> {
        let mut item_map: HashMap<String, TopItem> = HashMap::new();

        for order in orders.iter().filter(|o| o.is_completed()) {
            for item in &order.items {
                let entry = item_map
                    .entry(item.menu_item_id.clone())
                    .or_insert_with(|| TopItem {
                        menu_item_id: item.menu_item_id.clone(),
                        name: item.name.clone(),
                        sold: 0,
                        revenue: Decimal::ZERO,
                    });
                entry.sold = entry.sold.saturating_add(u64::from(item.quantity));
                entry.revenue = entry.revenue.saturating_add(item.line_total());
            }
        }

        item_map
    }

    /// Best sellers: most units first, then revenue, then name
    pub fn top_items(orders: &[OrderRecord], limit: usize) -> Vec<TopItem> {
        let mut items: Vec<TopItem> = Self::by_item(orders).into_values().collect();
        items.sort_by(|a, b| {
            b.sold
                .cmp(&a.sold)
                .then_with(|| b.revenue.cmp(&a.revenue))
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.menu_item_id.cmp(&b.menu_item_id))
        });
        items.truncate(limit);
        items
    }
}

fn add_within(acc: &mut Decimal, window: &Window, at: DateTime<Utc>, amount: Decimal) {
    if window.contains(at) {
        *acc = acc.saturating_add(amount);
    }
}
