//! Integer play-field geometry.
//!
//! Coordinates are logical pixels with the origin at the top-left corner of
//! the field and y growing downward. Spans are half-open: a rect covers
//! `[x, x + width)` horizontally and `[y, y + height)` vertically.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.x < other.right() && other.x < self.right()
    }

    pub fn overlaps_y(&self, other: &Rect) -> bool {
        self.y < other.bottom() && other.y < self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }

    pub fn is_within(&self, field: &Field) -> bool {
        self.x >= 0 && self.y >= 0 && self.right() <= field.width && self.bottom() <= field.height
    }
}

/// Dimensions of the play field every sprite lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub width: i32,
    pub height: i32,
}

impl Field {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Clamp a sprite size so it can fit inside the field.
    pub fn clamp_size(&self, width: i32, height: i32) -> (i32, i32) {
        (width.clamp(0, self.width), height.clamp(0, self.height))
    }

    /// Move `rect` by `(dx, dy)` and clip it to the field in one pass.
    ///
    /// Each axis is handled independently: a trailing edge past the field
    /// snaps to the last in-bounds position, a leading edge below zero snaps
    /// to zero, otherwise the delta is applied unchanged.
    pub fn step_clamped(&self, rect: Rect, dx: i32, dy: i32) -> Rect {
        Rect {
            x: clamp_axis(rect.x, dx, rect.width, self.width),
            y: clamp_axis(rect.y, dy, rect.height, self.height),
            ..rect
        }
    }

    /// Left position that centres a span of `width` horizontally.
    pub fn centered_x(&self, width: i32) -> i32 {
        (self.width - width) / 2
    }

    /// Top position that centres a span of `height` vertically.
    pub fn centered_y(&self, height: i32) -> i32 {
        (self.height - height) / 2
    }
}

fn clamp_axis(pos: i32, delta: i32, extent: i32, limit: i32) -> i32 {
    let candidate = pos + delta;
    if candidate + extent > limit {
        limit - extent
    } else if candidate < 0 {
        0
    } else {
        candidate
    }
}
