//! Cell-space geometry primitives.
//!
//! Coordinates are signed because windows and clipped children may be
//! positioned partially off-screen while being dragged or scrolled; anything
//! outside the visible buffer is discarded by the [`Canvas`](crate::canvas::Canvas).

use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum.
    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }
}

/// Signed rectangle with an origin and extent. Used for clip regions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ClipRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ClipRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(pos: Point, size: Size) -> Self {
        Self::new(pos.x, pos.y, size.width, size.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        !self.is_empty() && x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlap of two rectangles; empty rectangles collapse to a zero extent
    /// anchored at the clamped origin.
    pub fn intersection(&self, other: ClipRect) -> ClipRect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        ClipRect::new(x, y, (right - x).max(0), (bottom - y).max(0))
    }

    /// Shrink by `px` columns and `py` rows on every side.
    pub fn inset(&self, px: i32, py: i32) -> ClipRect {
        ClipRect::new(
            self.x + px,
            self.y + py,
            (self.width - 2 * px).max(0),
            (self.height - 2 * py).max(0),
        )
    }

    /// Convert to an unsigned ratatui rectangle, dropping anything left of or
    /// above the origin.
    pub fn to_rect(&self) -> Rect {
        let visible = self.intersection(ClipRect::new(0, 0, u16::MAX as i32, u16::MAX as i32));
        Rect {
            x: visible.x as u16,
            y: visible.y as u16,
            width: visible.width as u16,
            height: visible.height as u16,
        }
    }
}

impl From<Rect> for ClipRect {
    fn from(rect: Rect) -> Self {
        ClipRect::new(
            rect.x as i32,
            rect.y as i32,
            rect.width as i32,
            rect.height as i32,
        )
    }
}
