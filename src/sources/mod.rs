//! Order sources: where completed-order snapshots come from

mod file;
mod remote;

pub use file::FileSource;
pub use remote::RemoteSource;

use crate::types::{validate_batch, OrderRecord, RawOrder, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// Trait for fetching checkout documents from an upstream store
pub trait OrderSource: Send + Sync {
    /// Source name for logs (path or URL)
    fn name(&self) -> &str;

    /// Fetch every document the source currently holds
    fn fetch(&self) -> Result<Vec<RawOrder>>;
}

/// Snapshot layouts accepted from files and endpoints
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Snapshot {
    /// Bare array of documents
    List(Vec<RawOrder>),
    /// Export wrapper, e.g. `{"checkouts": [...]}`
    Export {
        #[serde(alias = "checkouts", alias = "documents")]
        orders: Vec<RawOrder>,
    },
}

impl Snapshot {
    pub(crate) fn into_orders(self) -> Vec<RawOrder> {
        match self {
            Self::List(orders) | Self::Export { orders } => orders,
        }
    }
}

/// Build a source from a path or an http(s) URL
pub fn open_source(location: &str) -> Box<dyn OrderSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(RemoteSource::new(location))
    } else {
        Box::new(FileSource::new(PathBuf::from(location)))
    }
}

/// Drop documents whose id was already seen (first one wins).
/// Documents without an id are always kept.
pub fn dedup_by_id(raws: Vec<RawOrder>) -> Vec<RawOrder> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut deduped: Vec<RawOrder> = Vec::with_capacity(raws.len());

    for raw in raws {
        match &raw.id {
            Some(id) => {
                if seen.insert(id.clone()) {
                    deduped.push(raw);
                }
            }
            None => deduped.push(raw),
        }
    }

    deduped
}

/// Fetch, de-duplicate and validate orders from a source
pub fn load_orders(source: &dyn OrderSource) -> Result<Vec<OrderRecord>> {
    let raws = source.fetch()?;
    let fetched = raws.len();
    let raws = dedup_by_id(raws);
    if raws.len() < fetched {
        tracing::debug!(
            source = source.name(),
            duplicates = fetched - raws.len(),
            "dropped duplicate documents"
        );
    }

    let orders = validate_batch(raws)?;
    tracing::info!(
        source = source.name(),
        documents = fetched,
        completed = orders.len(),
        "loaded orders"
    );
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SalesError;

    struct StaticSource(serde_json::Value);

    impl OrderSource for StaticSource {
        fn name(&self) -> &str {
            "static"
        }

        fn fetch(&self) -> Result<Vec<RawOrder>> {
            serde_json::from_value(self.0.clone()).map_err(|e| SalesError::Parse(e.to_string()))
        }
    }

    fn doc(id: Option<&str>, status: &str) -> RawOrder {
        RawOrder {
            id: id.map(String::from),
            status: Some(status.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_open_source_picks_remote_for_urls() {
        assert_eq!(
            open_source("https://example.com/orders.json").name(),
            "https://example.com/orders.json"
        );
        assert_eq!(open_source("orders.json").name(), "orders.json");
    }

    #[test]
    fn test_dedup_first_wins() {
        let mut first = doc(Some("a"), "completed");
        first.branch = Some("first".into());
        let mut second = doc(Some("a"), "completed");
        second.branch = Some("second".into());

        let deduped = dedup_by_id(vec![first, doc(None, "pending"), second, doc(None, "pending")]);
        assert_eq!(deduped.len(), 3);
        assert_eq!(deduped[0].branch.as_deref(), Some("first"));
    }

    #[test]
    fn test_load_orders_validates_completed_only() {
        let source = StaticSource(serde_json::json!([
            {"id": "a", "status": "completed", "createdAt": "2024-01-15T10:00:00Z", "items": []},
            {"id": "a", "status": "completed", "createdAt": "2024-01-16T10:00:00Z", "items": []},
            {"id": "b", "status": "pending"}
        ]));
        let orders = load_orders(&source).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, "a");
    }

    #[test]
    fn test_load_orders_propagates_malformed() {
        let source = StaticSource(serde_json::json!([
            {"id": "bad", "status": "completed", "createdAt": "yesterday", "items": []}
        ]));
        let err = load_orders(&source).unwrap_err();
        assert!(matches!(err, SalesError::MalformedRecord { ref record, .. } if record == "bad"));
    }

    #[test]
    fn test_snapshot_layouts() {
        let list: Snapshot = serde_json::from_str(r#"[{"id": "a"}]"#).unwrap();
        assert_eq!(list.into_orders().len(), 1);

        let export: Snapshot =
            serde_json::from_str(r#"{"checkouts": [{"id": "a"}, {"id": "b"}]}"#).unwrap();
        assert_eq!(export.into_orders().len(), 2);
    }
}
