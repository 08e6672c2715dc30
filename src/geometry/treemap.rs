//! Greedy row-fill treemap layout.
//!
//! Not a squarified treemap: items flow left-to-right and wrap into rows,
//! trading aspect ratio for simplicity. The layout does guarantee that each
//! rectangle's area is exactly proportional to its share of the total value,
//! that the rectangles tile the container without overlap, and that their
//! areas sum to the container area.

use serde::{Deserialize, Serialize};

/// One laid-out rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapRect {
    pub label: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Lay out `(label, value)` items in a `width × height` container.
///
/// Items are walked in input order (callers usually pass them sorted
/// descending). Each item gets a provisional width of `share × width × √n`;
/// a row wraps when the running provisional width would exceed the
/// container width. A closed row spans the full container width with height
/// equal to its value share of the container height, and items inside it
/// are widened to fill it — which makes every rectangle's area exactly
/// `share × width × height`.
///
/// Zero and negative values are dropped; an empty or all-zero input
/// produces no rectangles.
pub fn layout(items: &[(String, f64)], width: f64, height: f64) -> Vec<TreemapRect> {
    let positive: Vec<&(String, f64)> = items.iter().filter(|(_, v)| *v > 0.0).collect();
    let total: f64 = positive.iter().map(|(_, v)| v).sum();
    if total <= 0.0 || width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }

    let inflation = (positive.len() as f64).sqrt();

    // Pass 1: partition into rows by provisional width.
    let mut rows: Vec<Vec<&(String, f64)>> = Vec::new();
    let mut row: Vec<&(String, f64)> = Vec::new();
    let mut cursor = 0.0;
    for item in positive {
        let provisional = item.1 / total * width * inflation;
        if !row.is_empty() && cursor + provisional > width {
            rows.push(std::mem::take(&mut row));
            cursor = 0.0;
        }
        cursor += provisional;
        row.push(item);
    }
    if !row.is_empty() {
        rows.push(row);
    }

    // Pass 2: each row spans the full width; heights and widths follow the
    // value shares exactly.
    let mut rects = Vec::new();
    let mut y = 0.0;
    for row in rows {
        let row_total: f64 = row.iter().map(|(_, v)| v).sum();
        let row_height = row_total / total * height;
        let mut x = 0.0;
        for (label, value) in row {
            let w = value / row_total * width;
            rects.push(TreemapRect {
                label: label.clone(),
                value: *value,
                x,
                y,
                w,
                h: row_height,
            });
            x += w;
        }
        y += row_height;
    }
    rects
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn named(pairs: &[(&str, f64)]) -> Vec<(String, f64)> {
        pairs.iter().map(|(l, v)| (l.to_string(), *v)).collect()
    }

    fn overlaps(a: &TreemapRect, b: &TreemapRect) -> bool {
        let eps = 1e-9;
        a.x + eps < b.x + b.w && b.x + eps < a.x + a.w && a.y + eps < b.y + b.h && b.y + eps < a.y + a.h
    }

    #[test]
    fn areas_are_proportional_and_sum_to_container() {
        let items = named(&[("a", 50.0), ("b", 30.0), ("c", 15.0), ("d", 5.0)]);
        let rects = layout(&items, 400.0, 300.0);
        assert_eq!(rects.len(), 4);

        let container = 400.0 * 300.0;
        let total_area: f64 = rects.iter().map(|r| r.w * r.h).sum();
        assert!((total_area - container).abs() < 1e-6);

        for rect in &rects {
            let share = rect.value / 100.0;
            assert!((rect.w * rect.h - share * container).abs() < 1e-6);
        }
    }

    #[test]
    fn no_rectangle_overlaps_another() {
        let items = named(&[
            ("a", 40.0),
            ("b", 25.0),
            ("c", 15.0),
            ("d", 10.0),
            ("e", 6.0),
            ("f", 4.0),
        ]);
        let rects = layout(&items, 200.0, 200.0);
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!overlaps(a, b), "{} overlaps {}", a.label, b.label);
            }
        }
    }

    #[test]
    fn rects_stay_inside_the_container() {
        let items = named(&[("a", 7.0), ("b", 5.0), ("c", 3.0), ("d", 1.0)]);
        let rects = layout(&items, 120.0, 80.0);
        for rect in &rects {
            assert!(rect.x >= -1e-9 && rect.y >= -1e-9);
            assert!(rect.x + rect.w <= 120.0 + 1e-6);
            assert!(rect.y + rect.h <= 80.0 + 1e-6);
        }
    }

    #[test]
    fn single_item_fills_everything() {
        let items = named(&[("only", 42.0)]);
        let rects = layout(&items, 100.0, 50.0);
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].w, 100.0);
        assert_eq!(rects[0].h, 50.0);
    }

    #[test]
    fn many_items_wrap_into_rows() {
        let items: Vec<(String, f64)> = (0..9)
            .map(|i| (format!("s{i}"), 10.0))
            .collect();
        let rects = layout(&items, 300.0, 300.0);
        let distinct_y: std::collections::BTreeSet<i64> =
            rects.iter().map(|r| (r.y * 1000.0) as i64).collect();
        // Nine equal items with a 3x inflation factor land in three rows.
        assert_eq!(distinct_y.len(), 3);
    }

    #[test]
    fn zero_and_negative_values_are_dropped() {
        let items = named(&[("a", 0.0), ("b", -3.0), ("c", 9.0)]);
        let rects = layout(&items, 100.0, 100.0);
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].label, "c");
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(layout(&[], 100.0, 100.0).is_empty());
    }
}
