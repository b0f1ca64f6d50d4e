//! Chart bucketing with granularity picked from the order date span

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::windows::{start_of_month, start_of_week_sunday};
use crate::types::{BucketOrder, ChartPoint, ChartSeries, Granularity, OrderRecord};

/// Spans up to this long are bucketed by week
const WEEKLY_MAX_SPAN_DAYS: i64 = 90;
/// Spans up to this long (and over the weekly limit) are bucketed by month
const MONTHLY_MAX_SPAN_DAYS: i64 = 180;

/// Pick bucket size from the distance between the first and last order
pub fn granularity_for(first: DateTime<Utc>, last: DateTime<Utc>) -> Granularity {
    let span = last - first;
    if span <= Duration::days(WEEKLY_MAX_SPAN_DAYS) {
        Granularity::Week
    } else if span <= Duration::days(MONTHLY_MAX_SPAN_DAYS) {
        Granularity::Month
    } else {
        Granularity::Quarter
    }
}

/// Bucket an instant falls into: its first day and display label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub start: NaiveDate,
    pub label: String,
}

/// Chart weeks run Sunday through Saturday.
pub fn bucket_of(at: DateTime<Utc>, granularity: Granularity) -> Bucket {
    let date = at.date_naive();
    match granularity {
        Granularity::Week => {
            let start = start_of_week_sunday(date);
            let end = start + Days::new(6);
            Bucket {
                start,
                label: format!("{} - {}", start.format("%b %d"), end.format("%b %d")),
            }
        }
        Granularity::Month => Bucket {
            start: start_of_month(date),
            label: date.format("%B %Y").to_string(),
        },
        Granularity::Quarter => {
            let quarter = date.month0() / 3;
            let start = NaiveDate::from_ymd_opt(date.year(), quarter * 3 + 1, 1)
                .unwrap_or_else(|| start_of_month(date));
            Bucket {
                start,
                label: format!("Q{} {}", quarter + 1, date.year()),
            }
        }
    }
}

/// Sum completed-order sales per bucket.
///
/// Buckets appear in first-seen order unless `order` asks for chronological.
pub fn chart(orders: &[OrderRecord], order: BucketOrder) -> ChartSeries {
    let completed: Vec<&OrderRecord> = orders.iter().filter(|o| o.is_completed()).collect();

    let (first, last) = match (
        completed.iter().map(|o| o.created_at).min(),
        completed.iter().map(|o| o.created_at).max(),
    ) {
        (Some(first), Some(last)) => (first, last),
        _ => return ChartSeries::default(),
    };

    let granularity = granularity_for(first, last);

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(NaiveDate, ChartPoint)> = Vec::new();

    for record in completed {
        let bucket = bucket_of(record.created_at, granularity);
        let sales = record.sales();

        match index.get(&bucket.label) {
            Some(&i) => {
                let point = &mut buckets[i].1;
                point.total = point.total.saturating_add(sales);
            }
            None => {
                index.insert(bucket.label.clone(), buckets.len());
                buckets.push((
                    bucket.start,
                    ChartPoint {
                        label: bucket.label,
                        total: Decimal::ZERO.saturating_add(sales),
                    },
                ));
            }
        }
    }

    if order == BucketOrder::Chronological {
        // Stable: equal starts keep first-seen order
        buckets.sort_by_key(|(start, _)| *start);
    }

    ChartSeries {
        granularity: Some(granularity),
        points: buckets.into_iter().map(|(_, point)| point).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderItem, OrderStatus};
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn order(id: &str, created_at: DateTime<Utc>, price: i64, quantity: u32) -> OrderRecord {
        OrderRecord {
            id: id.to_string(),
            created_at,
            status: OrderStatus::Completed,
            items: vec![OrderItem {
                menu_item_id: "m1".into(),
                name: "Sisig".into(),
                price: Decimal::from(price),
                quantity,
            }],
            customer_id: None,
            order_number: None,
            table_number: None,
            branch: None,
            dine_in_or_takeout: None,
        }
    }

    // ========== granularity_for() tests ==========

    #[test]
    fn test_granularity_exactly_90_days_is_week() {
        let first = at(2024, 1, 1);
        assert_eq!(
            granularity_for(first, first + Duration::days(90)),
            Granularity::Week
        );
    }

    #[test]
    fn test_granularity_91_to_180_days_is_month() {
        let first = at(2024, 1, 1);
        assert_eq!(
            granularity_for(first, first + Duration::days(91)),
            Granularity::Month
        );
        assert_eq!(
            granularity_for(first, first + Duration::days(180)),
            Granularity::Month
        );
    }

    #[test]
    fn test_granularity_181_days_is_quarter() {
        let first = at(2024, 1, 1);
        assert_eq!(
            granularity_for(first, first + Duration::days(181)),
            Granularity::Quarter
        );
    }

    #[test]
    fn test_granularity_just_over_90_days_is_month() {
        let first = at(2024, 1, 1);
        assert_eq!(
            granularity_for(first, first + Duration::days(90) + Duration::seconds(1)),
            Granularity::Month
        );
    }

    // ========== bucket_of() tests ==========

    #[test]
    fn test_week_label_spans_sunday_to_saturday() {
        // Wednesday 2024-01-31
        let bucket = bucket_of(at(2024, 1, 31), Granularity::Week);
        assert_eq!(bucket.label, "Jan 28 - Feb 03");
        assert_eq!(bucket.start, NaiveDate::from_ymd_opt(2024, 1, 28).unwrap());
    }

    #[test]
    fn test_month_label() {
        let bucket = bucket_of(at(2024, 9, 3), Granularity::Month);
        assert_eq!(bucket.label, "September 2024");
    }

    #[test]
    fn test_quarter_label() {
        assert_eq!(bucket_of(at(2024, 3, 31), Granularity::Quarter).label, "Q1 2024");
        assert_eq!(bucket_of(at(2024, 4, 1), Granularity::Quarter).label, "Q2 2024");
        let q4 = bucket_of(at(2023, 11, 20), Granularity::Quarter);
        assert_eq!(q4.label, "Q4 2023");
        assert_eq!(q4.start, NaiveDate::from_ymd_opt(2023, 10, 1).unwrap());
    }

    // ========== chart() tests ==========

    #[test]
    fn test_chart_empty() {
        let series = chart(&[], BucketOrder::FirstSeen);
        assert!(series.is_empty());
        assert!(series.granularity.is_none());
    }

    #[test]
    fn test_chart_eight_days_apart_across_month_boundary() {
        let orders = vec![
            order("a", at(2024, 1, 29), 100, 1),
            order("b", at(2024, 2, 6), 50, 2),
        ];
        let series = chart(&orders, BucketOrder::FirstSeen);

        assert_eq!(series.granularity, Some(Granularity::Week));
        assert_eq!(series.len(), 2);
        assert_eq!(series.points[0].label, "Jan 28 - Feb 03");
        assert_eq!(series.points[0].total, Decimal::from(100));
        assert_eq!(series.points[1].label, "Feb 04 - Feb 10");
        assert_eq!(series.points[1].total, Decimal::from(100));
    }

    #[test]
    fn test_chart_sums_same_bucket() {
        let orders = vec![
            order("a", at(2024, 1, 15), 100, 2),
            order("b", at(2024, 1, 16), 30, 1),
        ];
        let series = chart(&orders, BucketOrder::FirstSeen);
        assert_eq!(series.len(), 1);
        assert_eq!(series.points[0].total, Decimal::from(230));
    }

    #[test]
    fn test_chart_keeps_first_seen_order() {
        let orders = vec![
            order("late", at(2024, 8, 10), 10, 1),
            order("early", at(2024, 1, 10), 20, 1),
            order("mid", at(2024, 4, 10), 30, 1),
        ];
        let series = chart(&orders, BucketOrder::FirstSeen);
        assert_eq!(series.granularity, Some(Granularity::Quarter));
        let labels: Vec<&str> = series.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Q3 2024", "Q1 2024", "Q2 2024"]);
    }

    #[test]
    fn test_chart_chronological_order() {
        let orders = vec![
            order("late", at(2024, 8, 10), 10, 1),
            order("early", at(2024, 1, 10), 20, 1),
            order("mid", at(2024, 4, 10), 30, 1),
        ];
        let series = chart(&orders, BucketOrder::Chronological);
        let labels: Vec<&str> = series.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Q1 2024", "Q2 2024", "Q3 2024"]);
    }

    #[test]
    fn test_chart_skips_non_completed() {
        let mut pending = order("p", at(2023, 1, 1), 999, 1);
        pending.status = OrderStatus::from("pending");
        let orders = vec![pending, order("a", at(2024, 1, 15), 100, 1)];

        let series = chart(&orders, BucketOrder::FirstSeen);
        // Pending order would have widened the span to a quarter view
        assert_eq!(series.granularity, Some(Granularity::Week));
        assert_eq!(series.total(), Decimal::from(100));
    }

    #[test]
    fn test_chart_conserves_sales() {
        let orders: Vec<OrderRecord> = (0..40)
            .map(|i| order(&format!("o{}", i), at(2024, 1, 1) + Duration::days(i * 5), i + 1, 2))
            .collect();
        let expected = orders
            .iter()
            .fold(Decimal::ZERO, |acc, o| acc + o.sales());

        let series = chart(&orders, BucketOrder::FirstSeen);
        assert_eq!(series.granularity, Some(Granularity::Quarter));
        assert_eq!(series.total(), expected);
    }
}
