use crate::core::{DataPoint, GridSpec, PixelPoint, RenderConfig, SurfaceSize};
use crate::error::ChartResult;

/// Converts data-space coordinates into integer surface pixels.
///
/// The y axis is inverted: larger data y maps to a smaller pixel row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    config: RenderConfig,
}

impl CoordinateMapper {
    pub fn new(size: SurfaceSize, grid: GridSpec) -> ChartResult<Self> {
        Ok(Self {
            config: RenderConfig::new(size, grid)?,
        })
    }

    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    #[must_use]
    pub fn map_x(&self, x: f64) -> i32 {
        round_half_up(self.config.center_x + x / self.config.pixel_size)
    }

    #[must_use]
    pub fn map_y(&self, y: f64) -> i32 {
        round_half_up(self.config.center_y - y / self.config.pixel_size)
    }

    #[must_use]
    pub fn map_point(&self, point: DataPoint) -> PixelPoint {
        PixelPoint::new(self.map_x(point.x), self.map_y(point.y))
    }

    #[must_use]
    pub fn map_points(&self, points: &[DataPoint]) -> Vec<PixelPoint> {
        points.iter().map(|point| self.map_point(*point)).collect()
    }
}

/// Rounds ties towards positive infinity, so `-2.5` becomes `-2`.
fn round_half_up(value: f64) -> i32 {
    // `as` saturates on overflow and maps NaN to 0.
    (value + 0.5).floor() as i32
}
