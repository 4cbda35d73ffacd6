// Axis-aligned rectangles in screen space and the overlap test used for hit-testing.

use serde::{Deserialize, Serialize};

use crate::types::ScreenPoint;

/// Rectangle in CSS pixels, shaped like a DOMRect (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ScreenRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl ScreenRect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        ScreenRect {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        ScreenRect::new(x, y, x + width, y + height)
    }

    /// Square of side `size` centred on `center`. Mirrors how the cursor
    /// element is translated by -50% on both axes.
    pub fn centered(center: ScreenPoint, size: f32) -> Self {
        let half = size / 2.0;
        ScreenRect::new(
            center.x - half,
            center.y - half,
            center.x + half,
            center.y + half,
        )
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Rectangles overlap unless one lies entirely to one side of the other.
    /// Shared edges count as overlapping.
    pub fn overlaps(&self, other: &ScreenRect) -> bool {
        !(self.right < other.left
            || self.left > other.right
            || self.bottom < other.top
            || self.top > other.bottom)
    }
}
