//! Tabular sales reports and their PDF export

mod pdf;

pub use pdf::{render_pdf, write_pdf, PdfStyle};

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::types::{SalesError, SalesSummary};

/// Placeholder for values the summary cannot supply
pub const MISSING: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportPeriod {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Overall,
}

impl ReportPeriod {
    pub const ALL: [ReportPeriod; 5] = [
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Yearly,
        Self::Overall,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
            Self::Overall => "Overall",
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportPeriod {
    type Err = SalesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SalesError::InvalidPeriod(s.to_string()))
    }
}

/// Which report to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Sales(ReportPeriod),
    OrdersAndProducts,
}

impl ReportKind {
    pub fn file_name(self) -> String {
        match self {
            Self::Sales(period) => format!("{}_sales_report.pdf", period.name().to_lowercase()),
            Self::OrdersAndProducts => "orders_products_report.pdf".to_string(),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Sales(_) => "Sales Report",
            Self::OrdersAndProducts => "Report for total orders and product sold",
        }
    }

    pub fn table(self, summary: Option<&SalesSummary>) -> ReportTable {
        match self {
            Self::Sales(period) => ReportTable::sales(period, summary),
            Self::OrdersAndProducts => ReportTable::orders_and_products(summary),
        }
    }
}

impl FromStr for ReportKind {
    type Err = SalesError;

    /// `orders` (or `orders-products`) selects the orders table, anything
    /// else must name a period
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orders" | "orders-products" | "orders_products" => Ok(Self::OrdersAndProducts),
            _ => s.parse().map(Self::Sales),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub label: String,
    /// `None` prints as "-"
    pub value: Option<String>,
}

impl ReportRow {
    fn new(label: &str, value: Option<String>) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }

    pub fn value_text(&self) -> &str {
        self.value.as_deref().unwrap_or(MISSING)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTable {
    pub title: String,
    pub header: [&'static str; 2],
    pub rows: Vec<ReportRow>,
}

impl ReportTable {
    /// Current and previous period sales for one report period
    pub fn sales(period: ReportPeriod, summary: Option<&SalesSummary>) -> Self {
        let amount = |pick: fn(&SalesSummary) -> Decimal| summary.map(|s| money(pick(s)));

        let rows = match period {
            ReportPeriod::Daily => vec![
                ReportRow::new("Today", amount(|s| s.today_sales)),
                ReportRow::new("Yesterday", amount(|s| s.yesterday_sales)),
            ],
            ReportPeriod::Weekly => vec![
                ReportRow::new("This Week", amount(|s| s.this_week_sales)),
                ReportRow::new("Last Week", amount(|s| s.last_week_sales)),
            ],
            ReportPeriod::Monthly => vec![
                ReportRow::new("This Month", amount(|s| s.this_month_sales)),
                ReportRow::new("Last Month", amount(|s| s.last_month_sales)),
            ],
            ReportPeriod::Yearly => vec![
                ReportRow::new("This Year", amount(|s| s.this_year_sales)),
                ReportRow::new("Last Year", amount(|s| s.last_year_sales)),
            ],
            ReportPeriod::Overall => {
                vec![ReportRow::new("Overall Sales", amount(|s| s.total_sales))]
            }
        };

        Self {
            title: ReportKind::Sales(period).title().to_string(),
            header: ["Period", "Total Sales"],
            rows,
        }
    }

    pub fn orders_and_products(summary: Option<&SalesSummary>) -> Self {
        Self {
            title: ReportKind::OrdersAndProducts.title().to_string(),
            header: ["Category", "Total"],
            rows: vec![
                ReportRow::new("Total Orders", summary.map(|s| s.total_orders.to_string())),
                ReportRow::new(
                    "Total Products Sold",
                    summary.map(|s| s.total_products.to_string()),
                ),
            ],
        }
    }

    /// Sales table for a period given by name; an unrecognised name gives a
    /// single placeholder row
    pub fn for_name(name: &str, summary: Option<&SalesSummary>) -> Self {
        match name.parse::<ReportPeriod>() {
            Ok(period) => Self::sales(period, summary),
            Err(_) => Self {
                title: "Sales Report".to_string(),
                header: ["Period", "Total Sales"],
                rows: vec![ReportRow {
                    label: MISSING.to_string(),
                    value: None,
                }],
            },
        }
    }

    /// Plain-text rendering for the terminal
    pub fn to_text(&self) -> String {
        let width = self
            .rows
            .iter()
            .map(|r| r.label.chars().count())
            .chain(std::iter::once(self.header[0].chars().count()))
            .max()
            .unwrap_or(0);

        let mut out = format!("{}\n\n", self.title);
        out.push_str(&format!(
            "{:<width$}  {}\n",
            self.header[0],
            self.header[1],
            width = width
        ));
        for row in &self.rows {
            out.push_str(&format!(
                "{:<width$}  {}\n",
                row.label,
                row.value_text(),
                width = width
            ));
        }
        out
    }
}

/// Amount without trailing zeros, e.g. `250` rather than `250.00`
fn money(value: Decimal) -> String {
    value.normalize().to_string()
}
