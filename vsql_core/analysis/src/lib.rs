//! Column summaries for the visualization layer: five-number stats over the
//! numeric reading of a column, and histogram buckets for charting.

use common::types::{ColumnDefinition, Entity};
use serde::Serialize;
use serde_json::Value as Json;
use std::collections::HashMap;

const BUCKET_COUNT: usize = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ColumnStats {
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
}

/// Summary statistics over every value of `column` that reads as a number.
/// Rows without the column or with non-numeric values are skipped; if nothing
/// is left the stats are all zero.
pub fn column_stats(rows: &[Entity], column: &str) -> ColumnStats {
    let values = numeric_values(rows, column);
    if values.is_empty() {
        return ColumnStats::default();
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;

    let mut sorted = values.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let middle = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[middle - 1] + sorted[middle]) / 2.0
    } else {
        sorted[middle]
    };

    // Mode: first value unless something actually repeats more often.
    let mut counts: HashMap<u64, usize> = HashMap::new();
    let mut mode = values[0];
    let mut max_count = 1;
    for &value in &values {
        let count = counts.entry(value.to_bits()).or_insert(0);
        *count += 1;
        if *count > max_count {
            max_count = *count;
            mode = value;
        }
    }

    ColumnStats {
        mean,
        median,
        mode,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
    }
}

/// Chart data for one column: numeric columns bucket into five equal ranges
/// between min and max, everything else counts distinct values.
pub fn histogram(rows: &[Entity], column: &ColumnDefinition) -> Vec<Bucket> {
    if column.column_type.is_numeric() {
        numeric_histogram(rows, &column.name)
    } else {
        value_counts(rows, &column.name)
    }
}

fn numeric_histogram(rows: &[Entity], column: &str) -> Vec<Bucket> {
    let values = numeric_values(rows, column);
    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let bucket_size = (max - min) / BUCKET_COUNT as f64;

    let mut buckets: Vec<Bucket> = (0..BUCKET_COUNT)
        .map(|i| {
            let lo = min + bucket_size * i as f64;
            let hi = min + bucket_size * (i + 1) as f64;
            Bucket {
                label: format!("{lo} - {hi}"),
                count: 0,
            }
        })
        .collect();

    for value in values {
        // A degenerate range (all values equal) lands in the first bucket.
        let index = if bucket_size == 0.0 {
            0
        } else {
            (((value - min) / bucket_size) as usize).min(BUCKET_COUNT - 1)
        };
        buckets[index].count += 1;
    }

    buckets
}

fn value_counts(rows: &[Entity], column: &str) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = Vec::new();
    for row in rows {
        let Some(value) = row.field(column) else {
            continue;
        };
        let label = match value {
            Json::String(s) => s.clone(),
            other => other.to_string(),
        };
        match buckets.iter_mut().find(|b| b.label == label) {
            Some(bucket) => bucket.count += 1,
            None => buckets.push(Bucket { label, count: 1 }),
        }
    }
    buckets
}

fn numeric_values(rows: &[Entity], column: &str) -> Vec<f64> {
    rows.iter()
        .filter_map(|row| row.field(column))
        .filter_map(|value| match value {
            Json::Number(n) => n.as_f64(),
            Json::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .filter(|f| f.is_finite())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::types::ColumnType;
    use serde_json::json;
    use test_utils::{person_row, row_with_id};

    fn ages(values: &[Json]) -> Vec<Entity> {
        values
            .iter()
            .map(|v| {
                let mut row = person_row(1, "x", 0, "x@example.com");
                row.data.insert("age".to_string(), v.clone());
                row
            })
            .collect()
    }

    #[test]
    fn stats_over_a_small_sample() {
        let rows = ages(&[json!(10), json!(20), json!(20), json!(50)]);
        let stats = column_stats(&rows, "age");
        assert_eq!(stats.mean, 25.0);
        assert_eq!(stats.median, 20.0);
        assert_eq!(stats.mode, 20.0);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 50.0);
    }

    #[test]
    fn numeric_strings_participate() {
        let rows = ages(&[json!("10"), json!(30)]);
        let stats = column_stats(&rows, "age");
        assert_eq!(stats.mean, 20.0);
    }

    #[test]
    fn unparseable_values_are_skipped() {
        let rows = ages(&[json!("young"), json!(40)]);
        let stats = column_stats(&rows, "age");
        assert_eq!(stats.mean, 40.0);
        assert_eq!(stats.min, 40.0);
    }

    #[test]
    fn no_numeric_values_means_zeroed_stats() {
        let rows = ages(&[json!("young"), json!("old")]);
        assert_eq!(column_stats(&rows, "age"), ColumnStats::default());
        assert_eq!(column_stats(&[], "age"), ColumnStats::default());
    }

    #[test]
    fn mode_without_repeats_is_the_first_value() {
        let rows = ages(&[json!(7), json!(3), json!(9)]);
        assert_eq!(column_stats(&rows, "age").mode, 7.0);
    }

    #[test]
    fn numeric_histogram_has_five_buckets_spanning_the_range() {
        let rows = ages(&[json!(0), json!(25), json!(50), json!(75), json!(100)]);
        let column = ColumnDefinition::new("age", ColumnType::Integer);
        let buckets = histogram(&rows, &column);
        assert_eq!(buckets.len(), 5);
        assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), 5);
        // max value falls in the last bucket, not past it
        assert_eq!(buckets[4].count, 1);
        assert_eq!(buckets[0].count, 1);
    }

    #[test]
    fn degenerate_range_lands_in_the_first_bucket() {
        let rows = ages(&[json!(5), json!(5), json!(5)]);
        let column = ColumnDefinition::new("age", ColumnType::Integer);
        let buckets = histogram(&rows, &column);
        assert_eq!(buckets[0].count, 3);
    }

    #[test]
    fn non_numeric_columns_count_distinct_values() {
        let rows = vec![
            person_row(1, "Ada", 36, "a@example.com"),
            person_row(2, "Ada", 37, "b@example.com"),
            person_row(3, "Alan", 41, "c@example.com"),
        ];
        let column = ColumnDefinition::new("name", ColumnType::String);
        let buckets = histogram(&rows, &column);
        assert_eq!(
            buckets,
            vec![
                Bucket {
                    label: "Ada".to_string(),
                    count: 2
                },
                Bucket {
                    label: "Alan".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn missing_fields_are_ignored() {
        let rows = vec![row_with_id(json!(1))];
        assert!(histogram(&rows, &ColumnDefinition::new("age", ColumnType::Integer)).is_empty());
    }
}
