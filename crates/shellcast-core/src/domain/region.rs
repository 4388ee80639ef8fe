use serde::{Deserialize, Serialize};

/// Screen-space rectangle in device-independent pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the point lies inside (right and bottom edges exclusive)
    pub fn contains(&self, x: i32, y: i32) -> bool {
        !self.is_empty()
            && x >= self.x
            && y >= self.y
            && x < self.x.saturating_add(self.width)
            && y < self.y.saturating_add(self.height)
    }
}

/// One area of a window's content that can (or explicitly cannot) be used
/// to drag the window.
///
/// `draggable: false` regions carve holes out of draggable ones, e.g. a
/// button inside a custom title bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraggableRegion {
    pub draggable: bool,
    pub bounds: Rect,
}

impl DraggableRegion {
    pub fn draggable(bounds: Rect) -> Self {
        Self {
            draggable: true,
            bounds,
        }
    }

    pub fn no_drag(bounds: Rect) -> Self {
        Self {
            draggable: false,
            bounds,
        }
    }
}

/// Whether `(x, y)` drags the window given an ordered region list.
///
/// Later regions take precedence over earlier ones, so a `no_drag` region
/// listed after a draggable one punches a hole in it.
pub fn is_draggable_at(regions: &[DraggableRegion], x: i32, y: i32) -> bool {
    regions
        .iter()
        .rev()
        .find(|r| r.bounds.contains(x, y))
        .map(|r| r.draggable)
        .unwrap_or(false)
}
