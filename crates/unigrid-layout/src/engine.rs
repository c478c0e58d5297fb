//! Uniform grid layout engine.

use log::debug;
use unigrid_core::{Insets, LayoutChild, Rect, Size};

use crate::error::LayoutError;
use crate::metrics::{
    saturate, AvailableWidth, GridMetrics, GridMetricsCalculator, HorizontalGap,
};

/// Arranges children in a grid of equally sized cells.
///
/// The cell is as large as the largest visible child. Each row holds as
/// many cells as fit in the available width; children are centred inside
/// their cell at their preferred size. With [`HorizontalGap::Dynamic`] the
/// free width is shared between the columns and the two edges so rows are
/// justified.
///
/// Configuration changes only affect the next size query or layout pass.
///
/// # Examples
///
/// ```
/// use unigrid_core::{GridBox, Insets, Rect};
/// use unigrid_layout::{AvailableWidth, UniformGridLayout};
///
/// let mut layout = UniformGridLayout::new().with_v_gap(5).with_insets(Insets::uniform(10));
/// let mut boxes = vec![GridBox::new(100, 50); 5];
///
/// let metrics = layout.perform_layout(AvailableWidth::Bounded(460), &mut boxes);
/// assert_eq!((metrics.cols, metrics.rows), (4, 2));
/// assert_eq!(boxes[0].bounds(), Rect::new(18, 10, 100, 50));
/// assert_eq!(boxes[4].bounds(), Rect::new(18, 65, 100, 50));
/// ```
#[derive(Debug, Clone, Default)]
pub struct UniformGridLayout {
    h_gap: HorizontalGap,
    v_gap: u32,
    insets: Insets,
    calculator: GridMetricsCalculator,
}

impl UniformGridLayout {
    /// Dynamic horizontal gap, zero vertical gap, zero insets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the legacy signed encoding.
    ///
    /// A negative `h_gap` selects the dynamic policy. Negative vertical gap
    /// or insets are rejected.
    pub fn from_raw(
        h_gap: i32,
        v_gap: i32,
        top: i32,
        left: i32,
        bottom: i32,
        right: i32,
    ) -> Result<Self, LayoutError> {
        Ok(Self::new()
            .with_h_gap(HorizontalGap::from_raw(h_gap))
            .with_v_gap(non_negative("v_gap", v_gap)?)
            .with_insets(insets_from_signed(top, left, bottom, right)?))
    }

    /// Set the horizontal gap policy.
    #[must_use]
    pub const fn with_h_gap(mut self, h_gap: HorizontalGap) -> Self {
        self.h_gap = h_gap;
        self
    }

    /// Set the vertical gap.
    #[must_use]
    pub const fn with_v_gap(mut self, v_gap: u32) -> Self {
        self.v_gap = v_gap;
        self
    }

    /// Set the insets.
    #[must_use]
    pub const fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    /// Horizontal gap policy.
    #[must_use]
    pub const fn h_gap(&self) -> HorizontalGap {
        self.h_gap
    }

    /// Change the horizontal gap policy.
    pub fn set_h_gap(&mut self, h_gap: HorizontalGap) {
        self.h_gap = h_gap;
    }

    /// Space between rows.
    #[must_use]
    pub const fn v_gap(&self) -> u32 {
        self.v_gap
    }

    /// Change the space between rows.
    pub fn set_v_gap(&mut self, v_gap: u32) {
        self.v_gap = v_gap;
    }

    /// Space between the container border and the grid.
    #[must_use]
    pub const fn insets(&self) -> Insets {
        self.insets
    }

    /// Change the insets.
    pub fn set_insets(&mut self, insets: Insets) {
        self.insets = insets;
    }

    /// Resolve the grid metrics for `children` at `width`.
    #[must_use]
    pub fn metrics<C: LayoutChild>(&self, width: AvailableWidth, children: &[C]) -> GridMetrics {
        GridMetricsCalculator::compute(children, width, self.insets, self.h_gap)
    }

    /// Smallest useful container size.
    ///
    /// Wide enough for one column and tall enough to stack every visible
    /// child in its own row.
    ///
    /// `width` only matters under [`HorizontalGap::Dynamic`]: it sets the
    /// leading and trailing gaps added around that single column. Pass
    /// [`AvailableWidth::Unbounded`] when no width is known; the result is
    /// then the bare column plus insets.
    #[must_use]
    pub fn minimum_size<C: LayoutChild>(&self, width: AvailableWidth, children: &[C]) -> Size {
        let m = self.metrics(width, children);
        self.outer_size(m.single_column_width(), m.stacked_height(self.v_gap))
    }

    /// Size that fits the packed grid at `width`.
    #[must_use]
    pub fn preferred_size<C: LayoutChild>(&self, width: AvailableWidth, children: &[C]) -> Size {
        let m = self.metrics(width, children);
        self.outer_size(m.content_width(), m.content_height(self.v_gap))
    }

    /// The layout accepts any amount of extra space.
    #[must_use]
    pub const fn maximum_size(&self) -> Size {
        Size::UNBOUNDED
    }

    /// Assign bounds to every visible child, in order, row by row.
    ///
    /// Hidden children keep whatever bounds they had. Returns the metrics
    /// used for the pass.
    pub fn perform_layout<C: LayoutChild>(
        &mut self,
        width: AvailableWidth,
        children: &mut [C],
    ) -> GridMetrics {
        let m = self
            .calculator
            .measure(children, width, self.insets, self.h_gap);
        let cell = m.cell;
        let row_start = u64::from(self.insets.left) + u64::from(m.leading_gap);
        let column_stride = u64::from(cell.width) + u64::from(m.inner_gap);
        let row_stride = u64::from(cell.height) + u64::from(self.v_gap);

        let mut x = row_start;
        let mut y = u64::from(self.insets.top);
        let mut column = 0;
        let visible = children.iter_mut().filter(|child| child.is_visible());
        for (child, &size) in visible.zip(self.calculator.visible_sizes()) {
            if column >= m.cols {
                x = row_start;
                y += row_stride;
                column = 0;
            }

            let cx = x + u64::from((cell.width - size.width) / 2);
            let cy = y + u64::from((cell.height - size.height) / 2);
            child.set_bounds(Rect::new(
                saturate(cx),
                saturate(cy),
                size.width,
                size.height,
            ));

            x += column_stride;
            column += 1;
        }

        debug!(
            "laid out {} cells in {}x{} grid of {}x{} at {width:?}",
            m.visible_count, m.cols, m.rows, cell.width, cell.height
        );
        m
    }

    fn outer_size(&self, content_width: u32, content_height: u32) -> Size {
        Size::new(
            content_width.saturating_add(self.insets.horizontal()),
            content_height.saturating_add(self.insets.vertical()),
        )
    }
}

fn non_negative(field: &'static str, value: i32) -> Result<u32, LayoutError> {
    u32::try_from(value).map_err(|_| LayoutError::Negative {
        field,
        value: i64::from(value),
    })
}

/// Validate signed insets given in top, left, bottom, right order.
pub fn insets_from_signed(
    top: i32,
    left: i32,
    bottom: i32,
    right: i32,
) -> Result<Insets, LayoutError> {
    Ok(Insets::new(
        non_negative("top", top)?,
        non_negative("left", left)?,
        non_negative("bottom", bottom)?,
        non_negative("right", right)?,
    ))
}
