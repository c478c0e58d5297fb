#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]
//! Uniform grid layout.
//!
//! Arranges children in rows of equally sized cells. The cell is as large as
//! the largest visible child, each row holds as many cells as fit in the
//! container width, and the horizontal gap is either fixed or computed so
//! rows are justified.
//!
//! - [`GridMetricsCalculator`] resolves cell size, column/row counts and gaps
//! - [`UniformGridLayout`] answers size queries and places children
//! - [`LayoutManager`] and [`Container`] connect the layout to a host toolkit

mod engine;
mod error;
mod host;
mod metrics;

pub use engine::{insets_from_signed, UniformGridLayout};
pub use error::LayoutError;
pub use host::{
    adjust_for_viewport, resolve_width, Container, LayoutManager, Panel, SharedContainer,
};
pub use metrics::{AvailableWidth, GridMetrics, GridMetricsCalculator, HorizontalGap};
