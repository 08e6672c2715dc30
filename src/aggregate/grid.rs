//! Hour-of-week activity grid: a 7×24 day-by-hour matrix in local time.

use chrono::{Datelike, Local, Timelike};

use crate::model::LogRecord;

/// Number of intensity steps in the heat scale.
pub const INTENSITY_STEPS: u8 = 5;

/// A 7×24 matrix of record counts, day-of-week (Sunday = 0) by hour-of-day,
/// in the viewer's local timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourOfWeekGrid {
    pub cells: [[usize; 24]; 7],
    /// Highest single-cell count, drives the intensity scale.
    pub peak: usize,
}

impl HourOfWeekGrid {
    /// Build the grid from a record sequence. Records with unparseable
    /// timestamps are ignored.
    pub fn from_records(records: &[LogRecord]) -> Self {
        let mut cells = [[0usize; 24]; 7];
        for record in records {
            let Some(ts) = record.parsed_timestamp() else {
                continue;
            };
            let local = ts.with_timezone(&Local);
            let day = local.weekday().num_days_from_sunday() as usize;
            let hour = local.hour() as usize;
            cells[day][hour] += 1;
        }

        let peak = cells.iter().flatten().copied().max().unwrap_or(0);
        Self { cells, peak }
    }

    pub fn cell(&self, day: usize, hour: usize) -> usize {
        self.cells[day][hour]
    }

    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }

    /// Map a cell count onto the five-step intensity scale.
    ///
    /// Thresholds sit at 20/40/60/80% of the peak cell value: below 20%
    /// is step 0, at or above 80% is step 4. A grid with no records maps
    /// everything to 0.
    pub fn intensity(&self, count: usize) -> u8 {
        if self.peak == 0 || count == 0 {
            return 0;
        }
        let share = count as f64 / self.peak as f64;
        if share >= 0.8 {
            4
        } else if share >= 0.6 {
            3
        } else if share >= 0.4 {
            2
        } else if share >= 0.2 {
            1
        } else {
            0
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use serde_json::json;

    fn record_at(time: String) -> LogRecord {
        serde_json::from_value(json!({"_time": time, "_msg": "m"}))
            .unwrap()
    }

    /// RFC 3339 string for a known local wall-clock instant, so the
    /// expected cell is independent of the host timezone.
    fn local_rfc3339(y: i32, mo: u32, d: u32, h: u32) -> String {
        Local
            .with_ymd_and_hms(y, mo, d, h, 15, 0)
            .single()
            .unwrap()
            .to_rfc3339()
    }

    #[test]
    fn counts_land_in_local_cells() {
        // 2025-06-01 is a Sunday
        let records = vec![
            record_at(local_rfc3339(2025, 6, 1, 9)),
            record_at(local_rfc3339(2025, 6, 1, 9)),
            record_at(local_rfc3339(2025, 6, 2, 14)), // Monday
        ];
        let grid = HourOfWeekGrid::from_records(&records);
        assert_eq!(grid.cell(0, 9), 2);
        assert_eq!(grid.cell(1, 14), 1);
        assert_eq!(grid.total(), 3);
        assert_eq!(grid.peak, 2);
    }

    #[test]
    fn empty_grid_is_all_zero() {
        let grid = HourOfWeekGrid::from_records(&[]);
        assert_eq!(grid.peak, 0);
        assert_eq!(grid.total(), 0);
        assert_eq!(grid.intensity(0), 0);
    }

    #[test]
    fn intensity_thresholds() {
        let mut grid = HourOfWeekGrid::from_records(&[]);
        grid.peak = 100;
        assert_eq!(grid.intensity(0), 0);
        assert_eq!(grid.intensity(19), 0);
        assert_eq!(grid.intensity(20), 1);
        assert_eq!(grid.intensity(40), 2);
        assert_eq!(grid.intensity(60), 3);
        assert_eq!(grid.intensity(80), 4);
        assert_eq!(grid.intensity(100), 4);
    }
}
