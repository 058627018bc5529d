use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PixelPoint;
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Serializes as a `#RRGGBB` / `#RRGGBBAA` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels and a normalized alpha.
    #[must_use]
    pub const fn rgba8(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self::rgba(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
            alpha,
        )
    }

    /// Parses `#RGB`, `#RRGGBB` or `#RRGGBBAA`. The leading `#` is optional.
    pub fn from_hex(input: &str) -> ChartResult<Self> {
        let invalid = || ChartError::InvalidColor(input.to_owned());
        let digits = input.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };

        match digits.len() {
            3 => {
                let expand = |index: usize| channel(index..index + 1).map(|v| v * 17);
                Ok(Self::rgba8(expand(0)?, expand(1)?, expand(2)?, 1.0))
            }
            6 => Ok(Self::rgba8(channel(0..2)?, channel(2..4)?, channel(4..6)?, 1.0)),
            8 => Ok(Self::rgba8(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                f64::from(channel(6..8)?) / 255.0,
            )),
            _ => Err(invalid()),
        }
    }

    /// Formats as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    #[must_use]
    pub fn to_hex(self) -> String {
        let to_u8 = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (
            to_u8(self.red),
            to_u8(self.green),
            to_u8(self.blue),
            to_u8(self.alpha),
        );
        if a == u8::MAX {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Glow drawn around subsequent primitives until cleared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub color: Color,
    pub blur_radius: f64,
}

impl Shadow {
    #[must_use]
    pub const fn new(color: Color, blur_radius: f64) -> Self {
        Self { color, blur_radius }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.blur_radius.is_finite() || self.blur_radius < 0.0 {
            return Err(ChartError::InvalidData(
                "shadow blur radius must be finite and >= 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinePrimitive {
    pub from: PixelPoint,
    pub to: PixelPoint,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(from: PixelPoint, to: PixelPoint, stroke_width: f64, color: Color) -> Self {
        Self {
            from,
            to,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        validate_stroke_width(self.stroke_width, "line")?;
        self.color.validate()
    }
}

/// Closed polygon that is filled, then stroked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolygonPrimitive {
    pub points: SmallVec<[PixelPoint; 6]>,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f64,
}

impl PolygonPrimitive {
    #[must_use]
    pub fn new(
        points: impl IntoIterator<Item = PixelPoint>,
        fill: Color,
        stroke: Color,
        stroke_width: f64,
    ) -> Self {
        Self {
            points: points.into_iter().collect(),
            fill,
            stroke,
            stroke_width,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.points.len() < 3 {
            return Err(ChartError::InvalidData(
                "polygon needs at least 3 points".to_owned(),
            ));
        }
        validate_stroke_width(self.stroke_width, "polygon")?;
        self.fill.validate()?;
        self.stroke.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Font family and pixel size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size_px: f64,
}

impl FontSpec {
    #[must_use]
    pub fn new(family: impl Into<String>, size_px: f64) -> Self {
        Self {
            family: family.into(),
            size_px,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.family.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "font family must not be empty".to_owned(),
            ));
        }
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("Arial", 35.0)
    }
}

/// Draw command for one label; `position` is the baseline anchor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPrimitive {
    pub text: String,
    pub position: PixelPoint,
    pub font: FontSpec,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        position: PixelPoint,
        font: FontSpec,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            position,
            font,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        self.font.validate()?;
        self.color.validate()
    }
}

/// Vertical linear gradient covering the rectangle `(0, 0)..(width, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientPrimitive {
    pub top: Color,
    pub bottom: Color,
    pub width: u32,
    pub height: u32,
}

impl GradientPrimitive {
    pub fn validate(self) -> ChartResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ChartError::InvalidSurface {
                width: self.width,
                height: self.height,
            });
        }
        self.top.validate()?;
        self.bottom.validate()
    }
}

fn validate_stroke_width(width: f64, what: &str) -> ChartResult<()> {
    if !width.is_finite() || width <= 0.0 {
        return Err(ChartError::InvalidData(format!(
            "{what} stroke width must be finite and > 0"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Color, PolygonPrimitive, Shadow};
    use crate::core::PixelPoint;
    use crate::error::ChartError;

    #[test]
    fn color_parses_short_long_and_alpha_hex() {
        assert_eq!(Color::from_hex("#fff").expect("short"), Color::WHITE);
        assert_eq!(Color::from_hex("000000").expect("no hash"), Color::BLACK);
        assert_eq!(Color::from_hex("#00000000").expect("clear"), Color::TRANSPARENT);
        let translucent = Color::from_hex("#0064FF33").expect("alpha");
        assert_eq!(translucent.alpha, 0.2);
        assert_eq!(translucent.to_hex(), "#0064FF33");
    }

    #[test]
    fn color_rejects_malformed_hex() {
        for input in ["", "#12", "#12345", "#GGGGGG", "#ééé"] {
            assert!(matches!(
                Color::from_hex(input),
                Err(ChartError::InvalidColor(_))
            ));
        }
    }

    #[test]
    fn color_serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::rgba8(255, 99, 132, 1.0)).expect("json");
        assert_eq!(json, "\"#FF6384\"");
        let back: Color = serde_json::from_str(&json).expect("parse");
        assert_eq!(back.to_hex(), "#FF6384");
    }

    #[test]
    fn polygon_requires_three_points() {
        let polygon = PolygonPrimitive::new(
            [PixelPoint::new(0, 0), PixelPoint::new(1, 1)],
            Color::WHITE,
            Color::BLACK,
            1.0,
        );
        assert!(polygon.validate().is_err());
    }

    #[test]
    fn shadow_rejects_negative_blur() {
        assert!(Shadow::new(Color::WHITE, -1.0).validate().is_err());
        assert!(Shadow::new(Color::WHITE, 0.0).validate().is_ok());
    }
}
