//! Core types for the unigrid layout workspace.
//!
//! This crate provides the foundational types shared by the layout engine,
//! the scene loader and the CLI:
//! - Geometric primitives: [`Size`], [`Rect`], [`Insets`]
//! - Layout children: [`LayoutChild`] and the plain [`GridBox`]

mod child;
mod geometry;

pub use child::{GridBox, LayoutChild};
pub use geometry::{Insets, Rect, Size};
