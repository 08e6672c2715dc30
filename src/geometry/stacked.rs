//! Cumulative offsets for stacked time-series charts.

use serde::{Deserialize, Serialize};

use crate::aggregate::timeseries::TimeBucket;

/// One group's segment at one bucket: from `y0` up to `y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackedPoint {
    pub bucket: i64,
    pub y0: f64,
    pub y1: f64,
}

/// One group's full stacked series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackedSeries {
    pub label: String,
    pub points: Vec<StackedPoint>,
}

/// Accumulate per-bucket offsets across groups (stack-from-zero).
///
/// Groups must share an aligned bucket domain, as produced by
/// [`grouped_bucket_counts`](crate::aggregate::timeseries::grouped_bucket_counts).
/// The first group sits on the baseline; each later group's segment starts
/// at the running total of everything beneath it.
pub fn stack_series(groups: &[(String, Vec<TimeBucket>)]) -> Vec<StackedSeries> {
    let Some(domain_len) = groups.first().map(|(_, series)| series.len()) else {
        return Vec::new();
    };

    let mut running = vec![0.0; domain_len];
    groups
        .iter()
        .map(|(label, series)| {
            let points: Vec<StackedPoint> = series
                .iter()
                .enumerate()
                .map(|(i, bucket)| {
                    let y0 = running[i];
                    let y1 = y0 + bucket.count as f64;
                    running[i] = y1;
                    StackedPoint {
                        bucket: bucket.start,
                        y0,
                        y1,
                    }
                })
                .collect();
            StackedSeries {
                label: label.clone(),
                points,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn series(counts: &[usize]) -> Vec<TimeBucket> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| TimeBucket {
                start: 60 * i as i64,
                count,
            })
            .collect()
    }

    #[test]
    fn offsets_accumulate_from_zero() {
        let groups = vec![
            ("ERROR".to_string(), series(&[2, 0, 1])),
            ("INFO".to_string(), series(&[3, 4, 0])),
        ];
        let stacked = stack_series(&groups);

        assert_eq!(stacked[0].points[0].y0, 0.0);
        assert_eq!(stacked[0].points[0].y1, 2.0);
        assert_eq!(stacked[1].points[0].y0, 2.0);
        assert_eq!(stacked[1].points[0].y1, 5.0);

        // Bucket with a zero in the first group: the second starts at 0.
        assert_eq!(stacked[0].points[1].y1, 0.0);
        assert_eq!(stacked[1].points[1].y0, 0.0);
        assert_eq!(stacked[1].points[1].y1, 4.0);
    }

    #[test]
    fn top_of_stack_is_bucket_total() {
        let groups = vec![
            ("a".to_string(), series(&[1, 2])),
            ("b".to_string(), series(&[3, 4])),
            ("c".to_string(), series(&[5, 6])),
        ];
        let stacked = stack_series(&groups);
        assert_eq!(stacked[2].points[0].y1, 9.0);
        assert_eq!(stacked[2].points[1].y1, 12.0);
    }

    #[test]
    fn empty_groups_are_empty() {
        assert!(stack_series(&[]).is_empty());
    }
}
