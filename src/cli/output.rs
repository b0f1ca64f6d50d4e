//! Plain-text renderings for the non-interactive commands

use rust_decimal::Decimal;
use std::fmt::Write;

use crate::format::{bar_len, format_money, format_number};
use crate::services::{day_over_day, HistoryPage};
use crate::types::{ChartSeries, SalesSummary, TopItem};

/// Widest bar in `chart_text`
const CHART_BAR_WIDTH: usize = 40;

pub fn summary_text(summary: &SalesSummary, currency: &str) -> String {
    let money = |d: Decimal| format_money(d, currency);
    let mut out = String::new();

    let _ = writeln!(out, "Total sales     {}", money(summary.total_sales));
    let _ = writeln!(out, "Total orders    {}", format_number(summary.total_orders));
    let _ = writeln!(out, "Total products  {}", format_number(summary.total_products));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Today           {}  ({} orders, {} products sold)",
        money(summary.today_sales),
        format_number(summary.today_orders),
        format_number(summary.today_products_sold)
    );
    let _ = writeln!(
        out,
        "Yesterday       {}  ({} orders, {} products sold)",
        money(summary.yesterday_sales),
        format_number(summary.yesterday_orders),
        format_number(summary.yesterday_products_sold)
    );
    let _ = writeln!(
        out,
        "                {}",
        day_over_day(summary.today_sales, summary.yesterday_sales)
    );
    let _ = writeln!(out);

    for cmp in summary.comparisons() {
        let _ = writeln!(
            out,
            "{:<6} {} this, {} last {}",
            cmp.period,
            money(cmp.current),
            money(cmp.previous),
            cmp.trend().arrow()
        );
    }

    out
}

pub fn chart_text(series: &ChartSeries, currency: &str) -> String {
    let Some(granularity) = series.granularity else {
        return "No sales data\n".to_string();
    };

    let mut out = format!("{} sales\n\n", granularity.label());
    let label_width = series
        .points
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0);
    let max = series.max_total();

    for point in &series.points {
        let _ = writeln!(
            out,
            "{:<width$}  {:<bar$}  {}",
            point.label,
            "█".repeat(bar_len(point.total, max, CHART_BAR_WIDTH)),
            format_money(point.total, currency),
            width = label_width,
            bar = CHART_BAR_WIDTH
        );
    }

    out
}

pub fn top_items_text(items: &[TopItem], currency: &str) -> String {
    if items.is_empty() {
        return "No items sold\n".to_string();
    }

    let name_width = items
        .iter()
        .map(|i| i.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut out = format!(
        "{:>2}  {:<width$}  {:>6}  Revenue\n",
        "#",
        "Item",
        "Sold",
        width = name_width
    );
    for (rank, item) in items.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}  {:<width$}  {:>6}  {}",
            rank + 1,
            item.name,
            format_number(item.sold),
            format_money(item.revenue, currency),
            width = name_width
        );
    }
    out
}

pub fn history_text(page: &HistoryPage<'_>, currency: &str) -> String {
    if page.orders.is_empty() {
        return "No orders\n".to_string();
    }

    let mut out = String::new();
    for order in &page.orders {
        let _ = writeln!(
            out,
            "{}  {}  {:>3} items  {}",
            order.created_at.format("%Y-%m-%d %H:%M"),
            order.id,
            order.products_sold(),
            format_money(order.sales(), currency)
        );
    }
    if let Some(cursor) = &page.next_cursor {
        let _ = writeln!(out, "\nMore orders: --after {}", cursor);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{history_page, HistoryQuery};
    use crate::types::{ChartPoint, Granularity, OrderItem, OrderRecord, OrderStatus};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_summary_text_lines() {
        let summary = SalesSummary {
            total_sales: Decimal::from(1500),
            total_orders: 3,
            today_sales: Decimal::from(250),
            yesterday_sales: Decimal::from(200),
            this_week_sales: Decimal::from(450),
            ..Default::default()
        };
        let text = summary_text(&summary, "₱");
        assert!(text.contains("Total sales     ₱1,500.00"));
        assert!(text.contains("25% from yesterday"));
        assert!(text.contains("Week   ₱450.00 this, ₱0.00 last ▲"));
        assert!(text.contains("Year   ₱0.00 this, ₱0.00 last ▼"));
    }

    #[test]
    fn test_chart_text_empty() {
        assert_eq!(chart_text(&ChartSeries::default(), "₱"), "No sales data\n");
    }

    #[test]
    fn test_chart_text_bars() {
        let series = ChartSeries {
            granularity: Some(Granularity::Month),
            points: vec![
                ChartPoint {
                    label: "January 2024".into(),
                    total: Decimal::from(100),
                },
                ChartPoint {
                    label: "February 2024".into(),
                    total: Decimal::from(50),
                },
            ],
        };
        let text = chart_text(&series, "₱");
        assert!(text.starts_with("Monthly sales\n\n"));
        let lines: Vec<&str> = text.lines().skip(2).collect();
        assert_eq!(lines[0].matches('█').count(), CHART_BAR_WIDTH);
        assert_eq!(lines[1].matches('█').count(), CHART_BAR_WIDTH / 2);
    }

    #[test]
    fn test_top_items_text() {
        let items = vec![TopItem {
            menu_item_id: "m1".into(),
            name: "Sisig".into(),
            sold: 12,
            revenue: Decimal::from(1200),
        }];
        let text = top_items_text(&items, "₱");
        assert!(text.contains(" 1  Sisig      12  ₱1,200.00"));
        assert_eq!(top_items_text(&[], "₱"), "No items sold\n");
    }

    // ========== History tests ==========

    fn order(id: &str, minutes: i64, price: i64, quantity: u32) -> OrderRecord {
        OrderRecord {
            id: id.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
                + Duration::minutes(minutes),
            status: OrderStatus::Completed,
            items: vec![OrderItem {
                menu_item_id: "sisig".into(),
                name: "Sisig".into(),
                price: Decimal::from(price),
                quantity,
            }],
            customer_id: Some("u1".into()),
            order_number: None,
            table_number: None,
            branch: None,
            dine_in_or_takeout: None,
        }
    }

    #[test]
    fn test_history_text_empty_page() {
        let page = history_page(&[], &HistoryQuery::default());
        assert_eq!(history_text(&page, "₱"), "No orders\n");
    }

    #[test]
    fn test_history_text_rows_without_cursor() {
        let orders = vec![order("o1", 0, 250, 2), order("o2", 30, 1200, 1)];
        let page = history_page(&orders, &HistoryQuery::default());
        let text = history_text(&page, "₱");

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "2024-01-15 09:30  o2    1 items  ₱1,200.00");
        assert_eq!(lines[1], "2024-01-15 09:00  o1    2 items  ₱500.00");
        assert!(!text.contains("More orders"));
    }

    #[test]
    fn test_history_text_prints_next_cursor() {
        let orders: Vec<OrderRecord> = (0..12)
            .map(|i| order(&format!("o{:02}", i), i, 100, 1))
            .collect();
        let query = HistoryQuery {
            page_size: 5,
            ..Default::default()
        };
        let page = history_page(&orders, &query);
        let text = history_text(&page, "₱");

        assert_eq!(text.lines().filter(|l| l.starts_with("2024-")).count(), 5);
        assert!(text.ends_with("\nMore orders: --after o07\n"));
    }
}
