//! Completed-order history, newest first, paged with a start-after cursor

use serde::Serialize;

use crate::types::OrderRecord;

/// Orders shown per history page
pub const HISTORY_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Only orders placed by this customer
    pub customer_id: Option<String>,
    /// Id of the last order on the previous page
    pub after: Option<String>,
    pub page_size: usize,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            customer_id: None,
            after: None,
            page_size: HISTORY_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage<'a> {
    pub orders: Vec<&'a OrderRecord>,
    /// Cursor for the next page; only set when this page came back full
    pub next_cursor: Option<String>,
}

/// One page of completed orders, newest first (ties broken by id).
///
/// An `after` cursor that matches no order in the filtered history yields an
/// empty page.
pub fn history_page<'a>(orders: &'a [OrderRecord], query: &HistoryQuery) -> HistoryPage<'a> {
    let mut matching: Vec<&OrderRecord> = orders
        .iter()
        .filter(|o| o.is_completed())
        .filter(|o| match &query.customer_id {
            Some(customer) => o.customer_id.as_deref() == Some(customer.as_str()),
            None => true,
        })
        .collect();

    matching.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });

    let start = match &query.after {
        None => 0,
        Some(cursor) => match matching.iter().position(|o| &o.id == cursor) {
            Some(i) => i + 1,
            None => matching.len(),
        },
    };

    let page_size = query.page_size.max(1);
    let page: Vec<&OrderRecord> = matching.into_iter().skip(start).take(page_size).collect();

    let next_cursor = if page.len() == page_size {
        page.last().map(|o| o.id.clone())
    } else {
        None
    };

    HistoryPage {
        orders: page,
        next_cursor,
    }
}
