//! Period-over-period comparisons for the dashboard cards

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::SalesSummary;

/// Direction of the comparison arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
        }
    }
}

/// Current period against the one before it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodComparison {
    /// "Week", "Month", "Year"
    pub period: &'static str,
    pub current: Decimal,
    pub previous: Decimal,
}

impl PeriodComparison {
    pub fn new(period: &'static str, current: Decimal, previous: Decimal) -> Self {
        Self {
            period,
            current,
            previous,
        }
    }

    /// Up only when strictly higher; a tie shows as down
    pub fn trend(&self) -> Trend {
        if self.current > self.previous {
            Trend::Up
        } else {
            Trend::Down
        }
    }
}

/// Change relative to yesterday, e.g. "25% from yesterday".
///
/// Yesterday at zero has no meaningful ratio.
pub fn day_over_day(today: Decimal, yesterday: Decimal) -> String {
    if yesterday.is_zero() {
        return "No sales data for yesterday".to_string();
    }
    let change = (today - yesterday) / yesterday.abs() * Decimal::ONE_HUNDRED;
    let rounded = change
        .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default();
    format!("{}% from yesterday", rounded)
}

impl SalesSummary {
    /// Week, month and year comparisons in display order
    pub fn comparisons(&self) -> [PeriodComparison; 3] {
        [
            PeriodComparison::new("Week", self.this_week_sales, self.last_week_sales),
            PeriodComparison::new("Month", self.this_month_sales, self.last_month_sales),
            PeriodComparison::new("Year", self.this_year_sales, self.last_year_sales),
        ]
    }
}
