pub mod bar_geometry;
pub mod grid;
pub mod mapper;
pub mod series;
pub mod types;

pub use bar_geometry::{BarGeometry, BarShape, DataSegment};
pub use grid::{GridSpec, RenderConfig};
pub use mapper::CoordinateMapper;
pub use series::{
    BarLayout, DEFAULT_COLORS, DEFAULT_VALUES, MAX_ROUNDING_STEP, Series, SeriesEntry, max_rounded,
};
pub use types::{DataPoint, PixelPoint, SurfaceSize};
