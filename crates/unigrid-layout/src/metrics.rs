//! Uniform grid metrics.
//!
//! Given the visible children's preferred sizes, the available width, the
//! insets and a horizontal gap policy, this module resolves:
//! - the cell size (largest preferred width and height)
//! - the column and row counts
//! - the inner, leading and trailing horizontal gaps
//!
//! Metrics are plain values. Nothing here survives between calls except the
//! optional scratch buffer owned by [`GridMetricsCalculator`].

use log::trace;
use serde::{Deserialize, Serialize};
use unigrid_core::{Insets, LayoutChild, Size};

/// Horizontal gap policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalGap {
    /// Constant gap between columns, none before the first or after the last
    Fixed(u32),
    /// Gap computed per pass so the row is justified within the available width
    #[default]
    Dynamic,
}

impl HorizontalGap {
    /// Decode the legacy integer encoding, where any negative value is dynamic.
    #[must_use]
    pub fn from_raw(raw: i32) -> Self {
        u32::try_from(raw).map_or(Self::Dynamic, Self::Fixed)
    }

    /// Check for the dynamic policy.
    #[must_use]
    pub const fn is_dynamic(self) -> bool {
        matches!(self, Self::Dynamic)
    }
}

/// Width available to the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailableWidth {
    /// A known width in pixels
    Bounded(u32),
    /// The host has not sized the container yet
    Unbounded,
}

impl AvailableWidth {
    /// Map a host width to an available width; zero means "not yet known".
    #[must_use]
    pub const fn from_host(width: u32) -> Self {
        if width == 0 {
            Self::Unbounded
        } else {
            Self::Bounded(width)
        }
    }

    /// Width with the horizontal insets removed, `None` when unbounded.
    #[must_use]
    pub fn usable(self, insets: Insets) -> Option<u32> {
        match self {
            Self::Bounded(width) => Some(width.saturating_sub(insets.horizontal())),
            Self::Unbounded => None,
        }
    }
}

impl From<Option<u32>> for AvailableWidth {
    fn from(width: Option<u32>) -> Self {
        width.map_or(Self::Unbounded, Self::from_host)
    }
}

/// Resolved grid metrics for one layout pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMetrics {
    /// Uniform cell size
    pub cell: Size,
    /// Number of visible children
    pub visible_count: usize,
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
    /// Gap between adjacent columns
    pub inner_gap: u32,
    /// Space before the first column
    pub leading_gap: u32,
    /// Space after the last column
    pub trailing_gap: u32,
}

impl GridMetrics {
    /// Check for the all-zero metrics of an empty grid.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.visible_count == 0
    }

    /// Width of the packed grid, leading and trailing gaps included.
    #[must_use]
    pub fn content_width(&self) -> u32 {
        if self.is_empty() {
            return 0;
        }
        let width = u64::from(self.leading_gap)
            + track_span(self.cols, self.cell.width, self.inner_gap)
            + u64::from(self.trailing_gap);
        saturate(width)
    }

    /// Height of the packed grid for the given row gap.
    #[must_use]
    pub fn content_height(&self, v_gap: u32) -> u32 {
        saturate(track_span(self.rows, self.cell.height, v_gap))
    }

    /// Width of a single column with the leading and trailing gaps.
    #[must_use]
    pub fn single_column_width(&self) -> u32 {
        if self.is_empty() {
            return 0;
        }
        let width = u64::from(self.leading_gap)
            + u64::from(self.cell.width)
            + u64::from(self.trailing_gap);
        saturate(width)
    }

    /// Height of one visible child per row.
    #[must_use]
    pub fn stacked_height(&self, v_gap: u32) -> u32 {
        saturate(track_span(self.visible_count, self.cell.height, v_gap))
    }
}

/// Total extent of `count` tracks of `size` separated by `gap`.
pub(crate) fn track_span(count: usize, size: u32, gap: u32) -> u64 {
    if count == 0 {
        return 0;
    }
    let count = count as u64;
    u64::from(size) * count + u64::from(gap) * (count - 1)
}

pub(crate) fn saturate(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Number of `stride`-wide columns that fit in `space`, clamped to `1..=max`.
///
/// A zero stride means every column is empty; all `max` columns fit.
fn fit_columns(space: u64, stride: u64, max: u64) -> u64 {
    space.checked_div(stride).map_or_else(
        || {
            trace!("zero column stride, packing all {max} cells in one row");
            max
        },
        |cols| cols.clamp(1, max),
    )
}

/// Computes [`GridMetrics`] and optionally keeps the visible sizes around.
#[derive(Debug, Clone, Default)]
pub struct GridMetricsCalculator {
    scratch: Vec<Size>,
}

impl GridMetricsCalculator {
    /// Create a calculator with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute metrics for `children`, skipping hidden ones.
    #[must_use]
    pub fn compute<C: LayoutChild>(
        children: &[C],
        width: AvailableWidth,
        insets: Insets,
        h_gap: HorizontalGap,
    ) -> GridMetrics {
        Self::compute_sizes(
            children
                .iter()
                .filter(|child| child.is_visible())
                .map(LayoutChild::preferred_size),
            width,
            insets,
            h_gap,
        )
    }

    /// Compute metrics from the preferred sizes of the visible children.
    #[must_use]
    pub fn compute_sizes(
        sizes: impl IntoIterator<Item = Size>,
        width: AvailableWidth,
        insets: Insets,
        h_gap: HorizontalGap,
    ) -> GridMetrics {
        let (cell, visible_count) = sizes
            .into_iter()
            .fold((Size::ZERO, 0usize), |(cell, count), size| {
                (cell.max(size), count + 1)
            });

        if visible_count == 0 {
            return GridMetrics::default();
        }

        let visible = visible_count as u64;
        let cell_width = u64::from(cell.width);
        let usable = width.usable(insets).map(u64::from);

        let (inner_gap, leading_gap, trailing_gap) = match (h_gap, usable) {
            (HorizontalGap::Fixed(gap), _) => (u64::from(gap), 0, 0),
            // No finite free space to share out.
            (HorizontalGap::Dynamic, None) => (0, 0, 0),
            (HorizontalGap::Dynamic, Some(usable)) => {
                let guess = fit_columns(usable, cell_width, visible);
                let rest = usable.saturating_sub(cell_width * guess);
                let inner = rest / (guess + 1);
                let rest = rest.saturating_sub(inner * (guess - 1));
                let leading = rest / 2;
                (inner, leading, rest - leading)
            }
        };

        let cols = usable.map_or(visible, |usable| {
            let usable = usable.saturating_sub(leading_gap + trailing_gap);
            fit_columns(usable + inner_gap, cell_width + inner_gap, visible)
        });
        let rows = visible.div_ceil(cols);

        let metrics = GridMetrics {
            cell,
            visible_count,
            rows: rows as usize,
            cols: cols as usize,
            inner_gap: saturate(inner_gap),
            leading_gap: saturate(leading_gap),
            trailing_gap: saturate(trailing_gap),
        };
        trace!("grid metrics at {width:?}: {metrics:?}");
        metrics
    }

    /// Compute metrics and remember the visible preferred sizes in order.
    ///
    /// The sizes stay available through [`Self::visible_sizes`] until the
    /// next call; the buffer's allocation is reused.
    pub fn measure<C: LayoutChild>(
        &mut self,
        children: &[C],
        width: AvailableWidth,
        insets: Insets,
        h_gap: HorizontalGap,
    ) -> GridMetrics {
        self.scratch.clear();
        self.scratch.extend(
            children
                .iter()
                .filter(|child| child.is_visible())
                .map(LayoutChild::preferred_size),
        );
        Self::compute_sizes(self.scratch.iter().copied(), width, insets, h_gap)
    }

    /// Preferred sizes of the visible children from the last [`Self::measure`].
    #[must_use]
    pub fn visible_sizes(&self) -> &[Size] {
        &self.scratch
    }
}
