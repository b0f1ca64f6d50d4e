//! Order types: loosely typed backend documents and validated records

use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::str::FromStr;

use super::{Result, SalesError};

/// Status value the backend writes once a checkout has been paid and served
pub const COMPLETED_STATUS: &str = "completed";

/// Timestamp shapes produced by the document backend and its exporters.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BackendTimestamp {
    /// Native document timestamp (`{"seconds": .., "nanoseconds": ..}`,
    /// or the admin SDK's `_seconds` / `_nanoseconds` spelling)
    Native {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(alias = "_nanoseconds", default)]
        nanoseconds: u32,
    },
    /// Epoch milliseconds
    Millis(i64),
    /// RFC 3339 string
    Text(String),
}

impl BackendTimestamp {
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Native {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(*seconds, *nanoseconds),
            Self::Millis(ms) => DateTime::from_timestamp_millis(*ms),
            Self::Text(s) => DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

/// A number as it may appear in a document: integer, float, or numeric string.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawNumber {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

impl RawNumber {
    /// Decimal value, `None` when the value is not a finite number
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Unsigned(u) => Some(Decimal::from(*u)),
            Self::Signed(i) => Some(Decimal::from(*i)),
            Self::Float(f) => Decimal::from_f64(*f),
            Self::Text(s) => Decimal::from_str(s.trim()).ok(),
        }
    }

    /// Whole non-negative count, `None` for fractions, negatives and garbage
    pub fn to_count(&self) -> Option<u32> {
        match self {
            Self::Unsigned(u) => u32::try_from(*u).ok(),
            Self::Signed(i) => u32::try_from(*i).ok(),
            Self::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64 {
                    Some(*f as u32)
                } else {
                    None
                }
            }
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Line item exactly as fetched from the backend
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub menu_item_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<RawNumber>,
    #[serde(default)]
    pub quantity: Option<RawNumber>,
}

/// Checkout document exactly as fetched from the backend.
///
/// Every field is optional; [`OrderRecord::from_raw`] decides what is
/// actually required.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub created_at: Option<BackendTimestamp>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<RawItem>>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub order_number: Option<RawNumber>,
    #[serde(default)]
    pub table_number: Option<RawNumber>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub dine_in_or_takeout: Option<String>,
}

impl RawOrder {
    pub fn is_completed(&self) -> bool {
        self.status.as_deref() == Some(COMPLETED_STATUS)
    }

    /// Identifier used in error messages: the document id, or the batch position
    pub fn label(&self, position: usize) -> String {
        self.id.clone().unwrap_or_else(|| format!("#{}", position))
    }
}

/// Order status. Only [`OrderStatus::Completed`] orders count toward sales.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    Completed,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Completed => COMPLETED_STATUS,
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        if s == COMPLETED_STATUS {
            Self::Completed
        } else {
            Self::Other(s.to_string())
        }
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub menu_item_id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// A validated order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub customer_id: Option<String>,
    pub order_number: Option<u32>,
    pub table_number: Option<u32>,
    pub branch: Option<String>,
    pub dine_in_or_takeout: Option<String>,
}

impl OrderRecord {
    /// Validate a backend document.
    ///
    /// `position` is the document's index in its batch and names the record
    /// in errors when the document carries no id.
    pub fn from_raw(raw: RawOrder, position: usize) -> Result<Self> {
        let label = raw.label(position);

        let created_at = match &raw.created_at {
            None => return Err(SalesError::malformed(label, "missing createdAt")),
            Some(ts) => ts.to_utc().ok_or_else(|| {
                SalesError::malformed(label.clone(), format!("unreadable createdAt {:?}", ts))
            })?,
        };

        let raw_items = raw
            .items
            .ok_or_else(|| SalesError::malformed(label.clone(), "missing items"))?;

        let mut items = Vec::with_capacity(raw_items.len());
        for (n, item) in raw_items.into_iter().enumerate() {
            items.push(Self::item_from_raw(item, &label, n)?);
        }

        Ok(Self {
            id: label,
            created_at,
            status: raw
                .status
                .as_deref()
                .map(OrderStatus::from)
                .unwrap_or_else(|| OrderStatus::Other(String::new())),
            items,
            customer_id: raw.customer_id,
            order_number: raw.order_number.as_ref().and_then(RawNumber::to_count),
            table_number: raw.table_number.as_ref().and_then(RawNumber::to_count),
            branch: raw.branch,
            dine_in_or_takeout: raw.dine_in_or_takeout,
        })
    }

    fn item_from_raw(item: RawItem, label: &str, n: usize) -> Result<OrderItem> {
        let price = match &item.price {
            None => return Err(SalesError::malformed(label, format!("item {} has no price", n))),
            Some(p) => p.to_decimal().ok_or_else(|| {
                SalesError::malformed(label, format!("item {} price {:?} is not a number", n, p))
            })?,
        };
        if price.is_sign_negative() && !price.is_zero() {
            return Err(SalesError::malformed(
                label,
                format!("item {} has negative price {}", n, price),
            ));
        }

        let quantity = match &item.quantity {
            None => {
                return Err(SalesError::malformed(
                    label,
                    format!("item {} has no quantity", n),
                ))
            }
            Some(q) => q.to_count().ok_or_else(|| {
                SalesError::malformed(
                    label,
                    format!("item {} quantity {:?} is not a whole non-negative number", n, q),
                )
            })?,
        };

        let name = item.name.unwrap_or_default();
        let menu_item_id = item
            .menu_item_id
            .or(item.id)
            .unwrap_or_else(|| name.clone());

        Ok(OrderItem {
            menu_item_id,
            name,
            price,
            quantity,
        })
    }

    pub fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed
    }

    /// Sum of price x quantity over all items
    pub fn sales(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.line_total()))
    }

    /// Sum of quantities over all items
    pub fn products_sold(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |acc, item| acc.saturating_add(u64::from(item.quantity)))
    }

    /// Number of line items
    pub fn line_count(&self) -> u64 {
        self.items.len() as u64
    }
}

/// Validate a fetched batch.
///
/// Documents that are not completed are dropped before validation: they never
/// contribute to sales, and open carts are routinely half-filled. The first
/// malformed completed document aborts the batch.
pub fn validate_batch(raws: Vec<RawOrder>) -> Result<Vec<OrderRecord>> {
    raws.into_iter()
        .enumerate()
        .filter(|(_, raw)| raw.is_completed())
        .map(|(position, raw)| OrderRecord::from_raw(raw, position))
        .collect()
}
