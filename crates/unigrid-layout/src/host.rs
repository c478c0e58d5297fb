//! Host integration.
//!
//! A host toolkit plugs the grid in through two narrow traits:
//! [`Container`] exposes the children and the container's width, and
//! [`LayoutManager`] is the protocol the host calls for size queries and
//! layout passes. The engine itself never sees toolkit types.
//!
//! The host must keep the child list unchanged for the whole of each call.
//! Within one thread the `&`/`&mut` borrows enforce that; across threads,
//! [`SharedContainer`] holds a lock for the duration of every operation.

use std::iter;
use std::sync::{Mutex, MutexGuard};

use unigrid_core::{GridBox, LayoutChild, Size};

use crate::engine::UniformGridLayout;
use crate::error::LayoutError;
use crate::metrics::AvailableWidth;

/// A container whose children a [`LayoutManager`] arranges.
pub trait Container {
    /// Child type.
    type Child: LayoutChild;

    /// Children in layout order.
    fn children(&self) -> &[Self::Child];

    /// Mutable children in layout order.
    fn children_mut(&mut self) -> &mut [Self::Child];

    /// Current width, 0 while the host has not sized the container.
    fn width(&self) -> u32;

    /// Widths of the enclosing containers, nearest first.
    fn ancestor_widths(&self) -> Vec<u32> {
        Vec::new()
    }

    /// Whether the container sits inside a scrollable viewport.
    fn in_scroll_viewport(&self) -> bool {
        false
    }

    /// Whether the container has been laid out since it last changed.
    fn is_laid_out(&self) -> bool {
        false
    }

    /// Width the layout should fill.
    fn available_width(&self) -> AvailableWidth {
        resolve_width(iter::once(self.width()).chain(self.ancestor_widths()))
    }
}

/// The protocol a host uses to drive a layout.
pub trait LayoutManager<C: Container> {
    /// Smallest size at which the container is still usable.
    fn minimum_layout_size(&self, container: &C) -> Size;

    /// Size the container would like.
    fn preferred_layout_size(&self, container: &C) -> Size;

    /// Largest size the container can use.
    fn maximum_layout_size(&self, container: &C) -> Size;

    /// Assign bounds to the container's children.
    fn layout_container(&mut self, container: &mut C);

    /// Horizontal alignment relative to siblings, 0.0 to 1.0.
    fn layout_alignment_x(&self, _container: &C) -> f32 {
        0.5
    }

    /// Vertical alignment relative to siblings, 0.0 to 1.0.
    fn layout_alignment_y(&self, _container: &C) -> f32 {
        0.5
    }
}

impl<C: Container> LayoutManager<C> for UniformGridLayout {
    fn minimum_layout_size(&self, container: &C) -> Size {
        self.minimum_size(container.available_width(), container.children())
    }

    fn preferred_layout_size(&self, container: &C) -> Size {
        let size = self.preferred_size(container.available_width(), container.children());
        adjust_for_viewport(
            size,
            container.in_scroll_viewport() && container.is_laid_out(),
        )
    }

    fn maximum_layout_size(&self, _container: &C) -> Size {
        self.maximum_size()
    }

    fn layout_container(&mut self, container: &mut C) {
        let width = container.available_width();
        let _ = self.perform_layout(width, container.children_mut());
    }
}

/// First non-zero width among the container and its ancestors.
///
/// Unbounded when none of them has been sized yet.
pub fn resolve_width(widths: impl IntoIterator<Item = u32>) -> AvailableWidth {
    widths
        .into_iter()
        .find(|&width| width > 0)
        .map_or(AvailableWidth::Unbounded, AvailableWidth::Bounded)
}

/// Shrink the preferred width by one pixel once the container is inside a
/// scrollable viewport and already laid out.
///
/// Without this, a viewport that tracks its content keeps the container at
/// the width it asked for and never lets it narrow again.
#[must_use]
pub fn adjust_for_viewport(size: Size, in_laid_out_viewport: bool) -> Size {
    if in_laid_out_viewport {
        Size::new(size.width.saturating_sub(1), size.height)
    } else {
        size
    }
}

/// A plain container holding its children in a `Vec`.
#[derive(Debug, Clone)]
pub struct Panel<B = GridBox> {
    children: Vec<B>,
    width: u32,
    ancestor_widths: Vec<u32>,
    in_scroll_viewport: bool,
    laid_out: bool,
}

impl<B> Default for Panel<B> {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            width: 0,
            ancestor_widths: Vec::new(),
            in_scroll_viewport: false,
            laid_out: false,
        }
    }
}

impl<B: LayoutChild> Panel<B> {
    /// Create an empty, unsized panel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a panel holding `children`.
    #[must_use]
    pub fn with_children(children: impl IntoIterator<Item = B>) -> Self {
        Self {
            children: children.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Set the width.
    #[must_use]
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the enclosing containers' widths, nearest first.
    #[must_use]
    pub fn with_ancestor_widths(mut self, widths: impl IntoIterator<Item = u32>) -> Self {
        self.ancestor_widths = widths.into_iter().collect();
        self
    }

    /// Mark the panel as living inside a scrollable viewport.
    #[must_use]
    pub fn in_viewport(mut self, in_scroll_viewport: bool) -> Self {
        self.in_scroll_viewport = in_scroll_viewport;
        self
    }

    /// Resize the panel; this invalidates the previous layout.
    pub fn set_width(&mut self, width: u32) {
        self.width = width;
        self.laid_out = false;
    }

    /// Append a child.
    pub fn push(&mut self, child: B) {
        self.children.push(child);
        self.laid_out = false;
    }

    /// Remove the child at `index`.
    pub fn remove(&mut self, index: usize) -> Option<B> {
        if index >= self.children.len() {
            return None;
        }
        self.laid_out = false;
        Some(self.children.remove(index))
    }

    /// Forget the previous layout, e.g. after mutating a child in place.
    pub fn invalidate(&mut self) {
        self.laid_out = false;
    }

    /// Lay the panel out with `layout` and mark it valid.
    pub fn validate<L: LayoutManager<Self>>(&mut self, layout: &mut L) {
        layout.layout_container(self);
        self.laid_out = true;
    }

    /// Consume the panel and return its children.
    #[must_use]
    pub fn into_children(self) -> Vec<B> {
        self.children
    }
}

impl<B: LayoutChild> Container for Panel<B> {
    type Child = B;

    fn children(&self) -> &[B] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [B] {
        &mut self.children
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn ancestor_widths(&self) -> Vec<u32> {
        self.ancestor_widths.clone()
    }

    fn in_scroll_viewport(&self) -> bool {
        self.in_scroll_viewport
    }

    fn is_laid_out(&self) -> bool {
        self.laid_out
    }
}

/// A container shared between threads behind a tree lock.
///
/// Every operation holds the lock from the first metrics scan to the last
/// assigned bound.
#[derive(Debug, Default)]
pub struct SharedContainer<C> {
    tree: Mutex<C>,
}

impl<C: Container> SharedContainer<C> {
    /// Wrap `container`.
    pub const fn new(container: C) -> Self {
        Self {
            tree: Mutex::new(container),
        }
    }

    /// Lock the tree for direct mutation.
    pub fn lock(&self) -> Result<MutexGuard<'_, C>, LayoutError> {
        self.tree.lock().map_err(|_| LayoutError::TreeLockPoisoned)
    }

    /// Minimum size under the lock.
    pub fn minimum_size<L: LayoutManager<C>>(&self, layout: &L) -> Result<Size, LayoutError> {
        Ok(layout.minimum_layout_size(&*self.lock()?))
    }

    /// Preferred size under the lock.
    pub fn preferred_size<L: LayoutManager<C>>(&self, layout: &L) -> Result<Size, LayoutError> {
        Ok(layout.preferred_layout_size(&*self.lock()?))
    }

    /// Maximum size under the lock.
    pub fn maximum_size<L: LayoutManager<C>>(&self, layout: &L) -> Result<Size, LayoutError> {
        Ok(layout.maximum_layout_size(&*self.lock()?))
    }

    /// Layout pass under the lock.
    pub fn layout<L: LayoutManager<C>>(&self, layout: &mut L) -> Result<(), LayoutError> {
        layout.layout_container(&mut *self.lock()?);
        Ok(())
    }

    /// Unwrap the container.
    pub fn into_inner(self) -> Result<C, LayoutError> {
        self.tree
            .into_inner()
            .map_err(|_| LayoutError::TreeLockPoisoned)
    }
}
