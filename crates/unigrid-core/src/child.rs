//! The `LayoutChild` trait and a plain box implementation.
//!
//! A layout child is anything a container arranges: it reports a preferred
//! size and a visibility flag, and accepts the bounds the layout assigns.
//! The container owns its children; a layout only borrows them for the
//! duration of one pass.

use crate::geometry::{Rect, Size};
use serde::{Deserialize, Serialize};

/// A box placed by a grid layout.
///
/// # Examples
///
/// ```
/// use unigrid_core::{GridBox, LayoutChild, Rect, Size};
///
/// let mut child = GridBox::new(100, 50);
/// assert!(child.is_visible());
/// assert_eq!(child.preferred_size(), Size::new(100, 50));
///
/// child.set_bounds(Rect::new(10, 10, 100, 50));
/// assert_eq!(child.bounds(), Rect::new(10, 10, 100, 50));
/// ```
pub trait LayoutChild {
    /// Size the child would like to occupy.
    fn preferred_size(&self) -> Size;

    /// Hidden children take no space and keep their previous bounds.
    fn is_visible(&self) -> bool;

    /// Receive the bounds computed by the layout.
    fn set_bounds(&mut self, bounds: Rect);
}

impl<T: LayoutChild + ?Sized> LayoutChild for Box<T> {
    fn preferred_size(&self) -> Size {
        (**self).preferred_size()
    }

    fn is_visible(&self) -> bool {
        (**self).is_visible()
    }

    fn set_bounds(&mut self, bounds: Rect) {
        (**self).set_bounds(bounds);
    }
}

/// A rectangular child with a fixed preferred size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBox {
    /// Optional label, used by previews and reports
    #[serde(default)]
    pub label: Option<String>,
    /// Preferred size
    pub preferred: Size,
    /// Visibility flag
    pub visible: bool,
    /// Bounds from the most recent layout pass
    #[serde(skip)]
    pub bounds: Rect,
}

impl GridBox {
    /// Create a visible box with the given preferred size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            label: None,
            preferred: Size::new(width, height),
            visible: true,
            bounds: Rect::new(0, 0, 0, 0),
        }
    }

    /// Set the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set visibility.
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Change the preferred size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.preferred = Size::new(width, height);
    }

    /// Bounds from the most recent layout pass.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl LayoutChild for GridBox {
    fn preferred_size(&self) -> Size {
        self.preferred
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }
}
