use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};

/// Fixed offsets that shape the pseudo-3D bar silhouette, in data units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarShape {
    /// Distance from the bar center to each side edge.
    pub half_width: f64,
    /// How far the top center dips below the top corners.
    pub top_fold_depth: f64,
    /// Height of the side edges' lower ends above the baseline.
    pub base_lift: f64,
    /// Distance of the outer light beams' ceiling below the logical top.
    pub projection_ceiling_offset: f64,
    /// Distance of the center light beam's ceiling below the logical top.
    pub projection_center_offset: f64,
    /// Distance of the platform's upper apex below the logical top.
    pub base_apex_offset: f64,
    /// Data y where the center guide line starts, just under the axis.
    pub guide_line_floor: f64,
}

impl Default for BarShape {
    fn default() -> Self {
        Self {
            half_width: 0.5,
            top_fold_depth: 0.5,
            base_lift: 0.5,
            projection_ceiling_offset: 2.0,
            projection_center_offset: 2.5,
            base_apex_offset: 1.5,
            guide_line_floor: -0.001,
        }
    }
}

impl BarShape {
    pub fn validate(self) -> ChartResult<()> {
        for (name, value) in [
            ("half_width", self.half_width),
            ("top_fold_depth", self.top_fold_depth),
            ("base_lift", self.base_lift),
            ("projection_ceiling_offset", self.projection_ceiling_offset),
            ("projection_center_offset", self.projection_center_offset),
            ("base_apex_offset", self.base_apex_offset),
            ("guide_line_floor", self.guide_line_floor),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "bar shape `{name}` must be finite"
                )));
            }
        }
        if self.half_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "bar shape `half_width` must be > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// A straight segment in data space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataSegment {
    pub from: DataPoint,
    pub to: DataPoint,
}

impl DataSegment {
    #[must_use]
    pub const fn new(from: DataPoint, to: DataPoint) -> Self {
        Self { from, to }
    }
}

/// Derived data-space points of one bar standing on y = 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarGeometry {
    pub center_x: f64,
    pub height: f64,
    pub bottom_center: DataPoint,
    pub bottom_left: DataPoint,
    pub top_left: DataPoint,
    pub top_fold: DataPoint,
    pub top_right: DataPoint,
    pub bottom_right: DataPoint,
    pub guide_floor: DataPoint,
    pub ceiling_left: DataPoint,
    pub ceiling_center: DataPoint,
    pub ceiling_right: DataPoint,
    pub platform_apex: DataPoint,
}

impl BarGeometry {
    /// Builds the geometry of a bar centered at `center_x` with `height`.
    ///
    /// The light beams and platform hang from `logical_height` and do not
    /// depend on `height`.
    #[must_use]
    pub fn new(center_x: f64, height: f64, shape: &BarShape, logical_height: f64) -> Self {
        let left = center_x - shape.half_width;
        let right = center_x + shape.half_width;
        let ceiling = logical_height - shape.projection_ceiling_offset;
        let center_ceiling = logical_height - shape.projection_center_offset;

        Self {
            center_x,
            height,
            bottom_center: DataPoint::new(center_x, 0.0),
            bottom_left: DataPoint::new(left, shape.base_lift),
            top_left: DataPoint::new(left, height),
            top_fold: DataPoint::new(center_x, height - shape.top_fold_depth),
            top_right: DataPoint::new(right, height),
            bottom_right: DataPoint::new(right, shape.base_lift),
            guide_floor: DataPoint::new(center_x, shape.guide_line_floor),
            ceiling_left: DataPoint::new(left, ceiling),
            ceiling_center: DataPoint::new(center_x, center_ceiling),
            ceiling_right: DataPoint::new(right, ceiling),
            platform_apex: DataPoint::new(center_x, logical_height - shape.base_apex_offset),
        }
    }

    /// Rejects bars whose derived points are not finite.
    pub fn validate(&self) -> ChartResult<()> {
        let points = self
            .body_outline()
            .into_iter()
            .chain([
                self.guide_floor,
                self.ceiling_left,
                self.ceiling_center,
                self.ceiling_right,
                self.platform_apex,
            ]);
        for point in points {
            if !point.x.is_finite() || !point.y.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "bar at x={} has non-finite geometry (height {})",
                    self.center_x, self.height
                )));
            }
        }
        Ok(())
    }

    /// Closed hexagon of the bar body, counter-clockwise from the bottom center.
    #[must_use]
    pub fn body_outline(&self) -> [DataPoint; 6] {
        [
            self.bottom_center,
            self.bottom_left,
            self.top_left,
            self.top_fold,
            self.top_right,
            self.bottom_right,
        ]
    }

    /// Vertical line separating the front face from the folded top.
    #[must_use]
    pub fn guide_line(&self) -> DataSegment {
        DataSegment::new(self.guide_floor, self.top_fold)
    }

    /// Left, center and right light beams rising from the top corners.
    #[must_use]
    pub fn projection_lines(&self) -> [DataSegment; 3] {
        [
            DataSegment::new(self.top_left, self.ceiling_left),
            DataSegment::new(self.top_fold, self.ceiling_center),
            DataSegment::new(self.top_right, self.ceiling_right),
        ]
    }

    /// Four edges of the flattened rhombus capping the light beams.
    #[must_use]
    pub fn base_lines(&self) -> [DataSegment; 4] {
        [
            DataSegment::new(self.ceiling_left, self.platform_apex),
            DataSegment::new(self.ceiling_right, self.platform_apex),
            DataSegment::new(self.ceiling_left, self.ceiling_center),
            DataSegment::new(self.ceiling_right, self.ceiling_center),
        ]
    }
}
