//! Fixed-width time bucketing with zero-filled gaps.

use std::collections::HashMap;

use crate::model::LogRecord;

// ---------------------------------------------------------------------------
// Bucket widths
// ---------------------------------------------------------------------------

/// Fixed bucket width for a time-series view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketWidth {
    Minute,
    FiveMinutes,
    TenMinutes,
    Hour,
}

impl BucketWidth {
    pub fn seconds(self) -> i64 {
        match self {
            Self::Minute => 60,
            Self::FiveMinutes => 300,
            Self::TenMinutes => 600,
            Self::Hour => 3600,
        }
    }

    /// Parse a width from seconds; unknown values fall back to one minute.
    pub fn from_seconds(secs: i64) -> Self {
        match secs {
            300 => Self::FiveMinutes,
            600 => Self::TenMinutes,
            3600 => Self::Hour,
            _ => Self::Minute,
        }
    }
}

/// One `(bucket start, count)` pair. The start is epoch seconds aligned to
/// the bucket width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeBucket {
    pub start: i64,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Bucketing
// ---------------------------------------------------------------------------

/// Epoch-aligned bucket start for a timestamp.
pub fn bucket_start(epoch_secs: i64, width: BucketWidth) -> i64 {
    epoch_secs.div_euclid(width.seconds()) * width.seconds()
}

/// Bucket records into fixed-width intervals across the full observed span.
///
/// Every bucket between `min(timestamp)` and `max(timestamp)` is
/// materialized, so gaps render as true zeros rather than missing points.
/// Records whose timestamps fail to parse are ignored. Output is sorted
/// ascending by bucket start.
pub fn bucket_counts(records: &[LogRecord], width: BucketWidth) -> Vec<TimeBucket> {
    let stamps: Vec<i64> = records.iter().filter_map(LogRecord::epoch_seconds).collect();
    let Some(&min) = stamps.iter().min() else {
        return Vec::new();
    };
    let max = *stamps.iter().max().unwrap_or(&min);

    let mut counts: HashMap<i64, usize> = HashMap::new();
    let step = width.seconds();
    let mut start = bucket_start(min, width);
    let last = bucket_start(max, width);
    while start <= last {
        counts.insert(start, 0);
        start += step;
    }

    for stamp in stamps {
        *counts.entry(bucket_start(stamp, width)).or_default() += 1;
    }

    let mut buckets: Vec<TimeBucket> = counts
        .into_iter()
        .map(|(start, count)| TimeBucket { start, count })
        .collect();
    buckets.sort_by_key(|b| b.start);
    buckets
}

/// Bucket records per distinct value of `field`, all groups sharing one
/// zero-filled bucket domain so they can be stacked.
///
/// Groups are ordered by total count descending (ties keep grouping order).
pub fn grouped_bucket_counts(
    records: &[LogRecord],
    field: &str,
    width: BucketWidth,
) -> Vec<(String, Vec<TimeBucket>)> {
    let domain = bucket_counts(records, width);
    if domain.is_empty() {
        return Vec::new();
    }

    let mut per_group: HashMap<String, HashMap<i64, usize>> = HashMap::new();
    for record in records {
        let Some(stamp) = record.epoch_seconds() else {
            continue;
        };
        *per_group
            .entry(record.field(field))
            .or_default()
            .entry(bucket_start(stamp, width))
            .or_default() += 1;
    }

    let mut groups: Vec<(String, Vec<TimeBucket>)> = per_group
        .into_iter()
        .map(|(label, counts)| {
            let series: Vec<TimeBucket> = domain
                .iter()
                .map(|b| TimeBucket {
                    start: b.start,
                    count: counts.get(&b.start).copied().unwrap_or(0),
                })
                .collect();
            (label, series)
        })
        .collect();

    groups.sort_by(|a, b| {
        let total_a: usize = a.1.iter().map(|p| p.count).sum();
        let total_b: usize = b.1.iter().map(|p| p.count).sum();
        total_b.cmp(&total_a)
    });
    groups
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
