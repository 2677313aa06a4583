// Contour-based phrase segmentation

use imageproc::contours::{BorderType, Contour, find_contours};
use tracing::debug;

use super::BoundingBox;
use crate::imaging::binarize::BinaryMask;

/// Maximum difference (exclusive) between top edges for two boxes to be
/// merged into one phrase block.
///
/// Tunable heuristic: only the top edge is compared, horizontal distance is
/// ignored, so blocks starting at the same height are merged even when far
/// apart on the page.
pub const DEFAULT_MERGE_PROXIMITY: u32 = 15;

/// Bounding box of every external contour in the mask.
///
/// Only top-level outer borders are kept; components nested inside the hole
/// of another component are ignored. Output order follows the contour
/// tracer and is not sorted.
pub fn contour_boxes(mask: &BinaryMask) -> Vec<BoundingBox> {
    let contours: Vec<Contour<u32>> = find_contours(mask.as_gray());
    contours
        .iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .filter_map(contour_bounds)
        .collect()
}

/// Axis-aligned bounds of a contour's points, exclusive on the far edges.
fn contour_bounds(contour: &Contour<u32>) -> Option<BoundingBox> {
    let first = contour.points.first()?;
    let init = BoundingBox {
        x1: first.x,
        y1: first.y,
        x2: first.x + 1,
        y2: first.y + 1,
    };
    Some(contour.points.iter().fold(init, |b, p| BoundingBox {
        x1: b.x1.min(p.x),
        y1: b.y1.min(p.y),
        x2: b.x2.max(p.x + 1),
        y2: b.y2.max(p.y + 1),
    }))
}

/// Sort boxes by (top, left) and merge runs whose top edges are within
/// `proximity` of the running accumulator's top.
pub fn merge_by_top_proximity(mut boxes: Vec<BoundingBox>, proximity: u32) -> Vec<BoundingBox> {
    boxes.sort_by_key(|b| (b.y1, b.x1));

    let mut merged = Vec::new();
    let mut iter = boxes.into_iter();
    let Some(mut current) = iter.next() else {
        return merged;
    };

    for next in iter {
        if next.y1.abs_diff(current.y1) < proximity {
            current = current.union(&next);
        } else {
            merged.push(current);
            current = next;
        }
    }
    merged.push(current);
    merged
}

/// Split a mask into phrase blocks in reading order.
pub fn segment_phrases(mask: &BinaryMask, proximity: u32) -> Vec<BoundingBox> {
    let boxes = contour_boxes(mask);
    let contour_count = boxes.len();
    let merged = merge_by_top_proximity(boxes, proximity);
    debug!(
        contours = contour_count,
        blocks = merged.len(),
        proximity,
        "phrase segmentation"
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(x1: u32, y1: u32, x2: u32, y2: u32) -> BoundingBox {
        BoundingBox { x1, y1, x2, y2 }
    }

    #[test]
    fn test_merge_sorts_before_merging() {
        let boxes = vec![bbox(50, 40, 60, 50), bbox(0, 0, 10, 10), bbox(30, 5, 40, 12)];
        let merged = merge_by_top_proximity(boxes, 15);
        assert_eq!(merged, vec![bbox(0, 0, 40, 12), bbox(50, 40, 60, 50)]);
    }

    #[test]
    fn test_merge_threshold_is_exclusive() {
        let boxes = vec![bbox(0, 0, 5, 5), bbox(0, 15, 5, 20)];
        assert_eq!(merge_by_top_proximity(boxes, 15).len(), 2);

        let boxes = vec![bbox(0, 0, 5, 5), bbox(0, 14, 5, 20)];
        assert_eq!(merge_by_top_proximity(boxes, 15), vec![bbox(0, 0, 5, 20)]);
    }

    #[test]
    fn test_merge_compares_against_accumulator_top() {
        // 0 -> 10 merges, 10 -> 20 would be close to its neighbour but not
        // to the accumulator's top (0)
        let boxes = vec![bbox(0, 0, 5, 5), bbox(0, 10, 5, 15), bbox(0, 20, 5, 25)];
        let merged = merge_by_top_proximity(boxes, 15);
        assert_eq!(merged, vec![bbox(0, 0, 5, 15), bbox(0, 20, 5, 25)]);
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_by_top_proximity(Vec::new(), 15).is_empty());
    }
}
