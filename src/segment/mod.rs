pub mod lines;
pub mod phrases;

use serde::Serialize;

/// Row interval `[top, bottom)` spanning the full page width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineBand {
    pub top: u32,
    pub bottom: u32,
}

/// Axis-aligned rectangle `[x1, x2) x [y1, y2)` in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }
}

/// A region of interest produced by one segmentation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    Line(LineBand),
    Phrase(BoundingBox),
    Whole(BoundingBox),
}

impl Segment {
    /// Rectangular bounds of the segment on a page of the given width.
    pub fn bounds(&self, page_width: u32) -> BoundingBox {
        match self {
            Segment::Line(band) => BoundingBox {
                x1: 0,
                y1: band.top,
                x2: page_width,
                y2: band.bottom,
            },
            Segment::Phrase(bbox) | Segment::Whole(bbox) => *bbox,
        }
    }

    /// Top edge, used for reading-order checks.
    pub fn top(&self) -> u32 {
        match self {
            Segment::Line(band) => band.top,
            Segment::Phrase(bbox) | Segment::Whole(bbox) => bbox.y1,
        }
    }
}
