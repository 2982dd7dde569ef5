//! Core types for the flexpage layout engine.
//!
//! This crate provides the foundational types used across the other
//! flexpage crates:
//! - Page geometry (axes, sizes, rectangles) and box-model edges
//! - Colors and borders
//! - The [`Renderer`] contract layout draws through
//! - Error types

pub mod border;
pub mod color;
pub mod errors;
pub mod geometry;
pub mod renderer;
pub mod spacing;

pub use border::{Border, BorderSide, BorderStyle};
pub use color::Color;
pub use errors::*;
pub use geometry::{Axis, Rect, Size};
pub use renderer::Renderer;
pub use spacing::{Spacing, Trbl};
