use serde::{Deserialize, Serialize};

use crate::core::{BarLayout, BarShape, GridSpec};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, FontSpec, Shadow};

/// Colors used by every chart element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background_top: Color,
    pub background_bottom: Color,
    pub axis: Color,
    pub axis_shadow: Color,
    pub bar_stroke: Color,
    pub bar_shadow: Color,
    pub projection: Color,
    pub base: Color,
    pub label: Color,
    pub label_shadow: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background_top: Color::rgba8(0xF0, 0xF8, 0xFF, 1.0),
            background_bottom: Color::rgba8(0xD0, 0xE8, 0xFF, 1.0),
            axis: Color::BLACK,
            axis_shadow: Color::rgba8(0, 100, 255, 0.2),
            bar_stroke: Color::BLACK,
            bar_shadow: Color::rgba8(238, 255, 0, 1.0),
            projection: Color::rgba8(234, 0, 255, 0.97),
            base: Color::rgba8(255, 0, 255, 1.0),
            label: Color::BLACK,
            label_shadow: Color::WHITE,
        }
    }
}

impl Palette {
    pub fn validate(self) -> ChartResult<()> {
        for color in [
            self.background_top,
            self.background_bottom,
            self.axis,
            self.axis_shadow,
            self.bar_stroke,
            self.bar_shadow,
            self.projection,
            self.base,
            self.label,
            self.label_shadow,
        ] {
            color.validate()?;
        }
        Ok(())
    }
}

/// Immutable look-and-geometry configuration of a [`crate::api::ChartRenderer`].
///
/// This type is serializable so hosts can ship alternate themes or grids as
/// JSON. Missing fields fall back to the stock chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub grid: GridSpec,
    pub shape: BarShape,
    pub layout: BarLayout,
    pub palette: Palette,
    pub axis_width: f64,
    pub bar_stroke_width: f64,
    pub projection_width: f64,
    pub base_width: f64,
    pub label_font: FontSpec,
    pub axis_shadow_blur: f64,
    pub bar_shadow_blur: f64,
    pub label_shadow_blur: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            shape: BarShape::default(),
            layout: BarLayout::default(),
            palette: Palette::default(),
            axis_width: 1.5,
            bar_stroke_width: 2.5,
            projection_width: 1.0,
            base_width: 1.0,
            label_font: FontSpec::default(),
            axis_shadow_blur: 5.0,
            bar_shadow_blur: 15.0,
            label_shadow_blur: 8.0,
        }
    }
}

impl ChartStyle {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let style: Self = serde_json::from_str(input)
            .map_err(|err| ChartError::InvalidData(format!("failed to parse chart style: {err}")))?;
        style.validate()?;
        Ok(style)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| ChartError::InvalidData(format!("failed to serialize chart style: {err}")))
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.grid.validate()?;
        self.shape.validate()?;
        self.layout.validate()?;
        self.palette.validate()?;
        self.label_font.validate()?;

        for (name, value) in [
            ("axis_width", self.axis_width),
            ("bar_stroke_width", self.bar_stroke_width),
            ("projection_width", self.projection_width),
            ("base_width", self.base_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "style `{name}` must be finite and > 0"
                )));
            }
        }

        for shadow in [
            self.axis_shadow(),
            self.bar_shadow(),
            self.label_shadow(),
        ] {
            shadow.validate()?;
        }

        if self.layout.top_padding >= self.grid.logical_height {
            return Err(ChartError::InvalidData(
                "layout `top_padding` must leave room below the logical height".to_owned(),
            ));
        }

        Ok(())
    }

    #[must_use]
    pub fn axis_shadow(&self) -> Shadow {
        Shadow::new(self.palette.axis_shadow, self.axis_shadow_blur)
    }

    #[must_use]
    pub fn bar_shadow(&self) -> Shadow {
        Shadow::new(self.palette.bar_shadow, self.bar_shadow_blur)
    }

    #[must_use]
    pub fn label_shadow(&self) -> Shadow {
        Shadow::new(self.palette.label_shadow, self.label_shadow_blur)
    }
}
