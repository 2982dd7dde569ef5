//! In-memory rendering for flexpage layouts.
//!
//! [`Scene`] implements the [`Renderer`](flexpage_core::Renderer) contract by
//! recording every paint call as a [`RenderCommand`]. Fonts are simulated
//! with [`FixedMetrics`], which makes measurements exact and predictable.
//! It is what the layout tests draw into, and what the SVG exporter
//! serializes.

mod metrics;
pub mod primitives;
mod scene;

pub use metrics::FixedMetrics;
pub use primitives::*;
pub use scene::Scene;
