//! Page geometry.
//!
//! All values are in page points with the origin at the top-left corner of
//! the page. Sizes are allowed to go negative while moving between the
//! margin, border, padding and content boxes; painting code treats a
//! non-positive width or height as "nothing to paint".

use crate::spacing::Spacing;

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The other axis.
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// Width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size::new(0.0, 0.0);

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Length along `axis`.
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Copy with the length along `axis` replaced.
    pub fn with(mut self, axis: Axis, value: f64) -> Self {
        self.set(axis, value);
        self
    }

    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
    }

    /// Add `value` to the length along `axis`.
    pub fn add(&mut self, axis: Axis, value: f64) {
        self.set(axis, self.get(axis) + value);
    }

    /// Grow by the given edges (inner size -> outer size).
    pub fn expand(self, spacing: &Spacing) -> Self {
        Self {
            width: self.width + spacing.horizontal(),
            height: self.height + spacing.vertical(),
        }
    }

    /// Shrink by the given edges (outer size -> inner size). Not clamped.
    pub fn shrink(self, spacing: &Spacing) -> Self {
        Self {
            width: self.width - spacing.horizontal(),
            height: self.height - spacing.vertical(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Axis-aligned rectangle in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle at the origin with the given size.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Position along `axis`.
    pub fn pos(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    pub fn set_pos(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Horizontal => self.x = value,
            Axis::Vertical => self.y = value,
        }
    }

    /// Length along `axis`.
    pub fn len(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn set_len(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
    }

    /// Move the top-left corner inwards by `(left, top)` and reduce the size
    /// by both sides of each axis. Not clamped.
    pub fn shrink(&self, spacing: &Spacing) -> Self {
        Self {
            x: self.x + spacing.left,
            y: self.y + spacing.top,
            width: self.width - spacing.horizontal(),
            height: self.height - spacing.vertical(),
        }
    }

    /// Inverse of [`Rect::shrink`].
    pub fn expand(&self, spacing: &Spacing) -> Self {
        Self {
            x: self.x - spacing.left,
            y: self.y - spacing.top,
            width: self.width + spacing.horizontal(),
            height: self.height + spacing.vertical(),
        }
    }

    /// True when there is no area to paint.
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }
}
