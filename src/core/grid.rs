use serde::{Deserialize, Serialize};

use crate::core::SurfaceSize;
use crate::error::{ChartError, ChartResult};

/// Logical extents of the data-space grid and the placement of its origin.
///
/// The origin sits one column in from the left edge and one row up from the
/// bottom edge, where the surface is divided into `origin_columns` columns and
/// `origin_rows` rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub logical_width: f64,
    pub logical_height: f64,
    pub axis_x_extent: f64,
    pub axis_y_extent: f64,
    pub origin_columns: f64,
    pub origin_rows: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            logical_width: 12.0,
            logical_height: 8.0,
            axis_x_extent: 9.0,
            axis_y_extent: 8.0,
            origin_columns: 12.0,
            origin_rows: 8.0,
        }
    }
}

impl GridSpec {
    pub fn validate(self) -> ChartResult<()> {
        for (name, value) in [
            ("logical_width", self.logical_width),
            ("logical_height", self.logical_height),
            ("axis_x_extent", self.axis_x_extent),
            ("axis_y_extent", self.axis_y_extent),
            ("origin_columns", self.origin_columns),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "grid `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.origin_rows.is_finite() || self.origin_rows <= 1.0 {
            return Err(ChartError::InvalidData(
                "grid `origin_rows` must be finite and > 1".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Scale constants derived once from the surface size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderConfig {
    pub logical_width: f64,
    pub logical_height: f64,
    pub max_x: f64,
    pub max_y: f64,
    /// Data units per pixel, uniform on both axes.
    pub pixel_size: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl RenderConfig {
    pub fn new(size: SurfaceSize, grid: GridSpec) -> ChartResult<Self> {
        if !size.is_valid() {
            return Err(ChartError::InvalidSurface {
                width: size.width,
                height: size.height,
            });
        }
        grid.validate()?;

        let max_x = f64::from(size.width) - 1.0;
        let max_y = f64::from(size.height) - 1.0;
        // A 1px edge gives an infinite pixel size; every point then collapses
        // onto the origin instead of producing NaN.
        let pixel_size = (grid.logical_width / max_x).max(grid.logical_height / max_y);

        Ok(Self {
            logical_width: grid.logical_width,
            logical_height: grid.logical_height,
            max_x,
            max_y,
            pixel_size,
            center_x: max_x / grid.origin_columns,
            center_y: max_y / grid.origin_rows * (grid.origin_rows - 1.0),
        })
    }
}
