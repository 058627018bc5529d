//! bar3d-chart: pseudo-3D bar chart rendering.
//!
//! Chart geometry is authored in a small fixed data space and mapped onto any
//! surface that implements [`render::DrawingSurface`]. Each paint pass is
//! materialized as an ordered [`render::RenderFrame`] before it reaches the
//! surface, so invalid input never produces a partial chart.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartRenderer, ChartStyle};
pub use error::{ChartError, ChartResult};
