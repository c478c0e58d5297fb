//! Geometric primitives: Size, Rect, Insets.
//!
//! All quantities are whole pixels. Layout never produces negative
//! coordinates, so everything is unsigned.

use serde::{Deserialize, Serialize};

/// A 2D size with width and height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl Size {
    /// Zero size
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// The largest representable size, used for "no upper bound".
    pub const UNBOUNDED: Self = Self {
        width: u32::MAX,
        height: u32::MAX,
    };

    /// Create a new size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }
}

/// A rectangle defined by position and size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// X position of top-left corner
    pub x: u32,
    /// Y position of top-left corner
    pub y: u32,
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create from size at origin.
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Get the size.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge.
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Check if another rectangle lies entirely inside this one.
    #[must_use]
    pub const fn contains_rect(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Space reserved between a container's border and its content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Insets {
    /// Space above the first row
    pub top: u32,
    /// Space before the first column
    pub left: u32,
    /// Space below the last row
    pub bottom: u32,
    /// Space after the last column
    pub right: u32,
}

impl Insets {
    /// No insets.
    pub const ZERO: Self = Self {
        top: 0,
        left: 0,
        bottom: 0,
        right: 0,
    };

    /// Create insets in top, left, bottom, right order.
    #[must_use]
    pub const fn new(top: u32, left: u32, bottom: u32, right: u32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Same inset on every side.
    #[must_use]
    pub const fn uniform(value: u32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Combined left and right insets.
    #[must_use]
    pub const fn horizontal(&self) -> u32 {
        self.left.saturating_add(self.right)
    }

    /// Combined top and bottom insets.
    #[must_use]
    pub const fn vertical(&self) -> u32 {
        self.top.saturating_add(self.bottom)
    }
}
