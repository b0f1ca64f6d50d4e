//! Services for sales aggregation and order history

pub mod aggregator;
pub mod bucketing;
pub mod comparison;
pub mod history;
pub mod windows;

pub use aggregator::{Aggregator, DEFAULT_TOP_ITEMS};
pub use bucketing::{bucket_of, chart, granularity_for, Bucket};
pub use comparison::{day_over_day, PeriodComparison, Trend};
pub use history::{history_page, HistoryPage, HistoryQuery, HISTORY_PAGE_SIZE};
pub use windows::{PeriodWindows, Window};
