//! Aggregation output types

use rust_decimal::Decimal;
use serde::Serialize;

/// Sales totals for one aggregation run.
///
/// Field names serialize in camelCase to match the dashboard's shape.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_sales: Decimal,
    /// Line items across all completed orders
    pub total_products: u64,
    pub total_orders: u64,

    pub today_sales: Decimal,
    pub yesterday_sales: Decimal,
    pub today_orders: u64,
    pub yesterday_orders: u64,
    pub today_products_sold: u64,
    pub yesterday_products_sold: u64,

    pub this_week_sales: Decimal,
    pub last_week_sales: Decimal,
    pub this_month_sales: Decimal,
    pub last_month_sales: Decimal,
    pub this_year_sales: Decimal,
    pub last_year_sales: Decimal,
}

/// Chart bucket size, chosen from the span of the order dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Week,
    Month,
    Quarter,
}

impl Granularity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Week => "Weekly",
            Self::Month => "Monthly",
            Self::Quarter => "Quarterly",
        }
    }
}

/// How chart buckets are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BucketOrder {
    /// Order in which each label was first produced while scanning the batch
    #[default]
    FirstSeen,
    /// Ascending bucket start
    Chronological,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChartPoint {
    pub label: String,
    pub total: Decimal,
}

/// Labeled sales time-series for the bar chart
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct ChartSeries {
    /// `None` when there were no completed orders
    pub granularity: Option<Granularity>,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn total(&self) -> Decimal {
        self.points
            .iter()
            .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.total))
    }

    pub fn max_total(&self) -> Decimal {
        self.points
            .iter()
            .map(|p| p.total)
            .max()
            .unwrap_or(Decimal::ZERO)
    }
}

/// Units and revenue for one menu item across completed orders
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TopItem {
    pub menu_item_id: String,
    pub name: String,
    pub sold: u64,
    pub revenue: Decimal,
}
