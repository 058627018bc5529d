use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Values painted when the caller does not supply a series.
pub const DEFAULT_VALUES: [f64; 5] = [10.0, 55.0, 20.0, 25.0, 66.0];

/// Colors paired with [`DEFAULT_VALUES`] (`#FF6384`, `#36A2EB`, `#FFCE56`,
/// `#4BC0C0`, `#9966FF`).
pub const DEFAULT_COLORS: [Color; 5] = [
    Color::rgba8(255, 99, 132, 1.0),
    Color::rgba8(54, 162, 235, 1.0),
    Color::rgba8(255, 206, 86, 1.0),
    Color::rgba8(75, 192, 192, 1.0),
    Color::rgba8(153, 102, 255, 1.0),
];

/// Granularity used when rounding the series maximum up.
pub const MAX_ROUNDING_STEP: f64 = 10.0;

/// One bar: a non-negative value and its fill color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesEntry {
    pub value: f64,
    pub color: Color,
}

/// Non-empty ordered sequence of bars.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    entries: SmallVec<[SeriesEntry; 8]>,
}

impl Series {
    /// Pairs parallel value/color slices.
    ///
    /// Lengths are compared before anything else, then emptiness, then each
    /// value must be finite and non-negative.
    pub fn new(values: &[f64], colors: &[Color]) -> ChartResult<Self> {
        if values.len() != colors.len() {
            return Err(ChartError::LengthMismatch {
                values: values.len(),
                colors: colors.len(),
            });
        }
        Self::from_entries(
            values
                .iter()
                .zip(colors)
                .map(|(value, color)| SeriesEntry {
                    value: *value,
                    color: *color,
                })
                .collect(),
        )
    }

    /// Like [`Series::new`] with colors given as hex strings.
    pub fn from_hex(values: &[f64], colors: &[&str]) -> ChartResult<Self> {
        if values.len() != colors.len() {
            return Err(ChartError::LengthMismatch {
                values: values.len(),
                colors: colors.len(),
            });
        }
        let colors = colors
            .iter()
            .map(|hex| Color::from_hex(hex))
            .collect::<ChartResult<Vec<_>>>()?;
        Self::new(values, &colors)
    }

    pub fn from_entries(entries: Vec<SeriesEntry>) -> ChartResult<Self> {
        if entries.is_empty() {
            return Err(ChartError::EmptySeries);
        }
        for (index, entry) in entries.iter().enumerate() {
            if !entry.value.is_finite() || entry.value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "series value at index {index} must be finite and >= 0"
                )));
            }
            entry.color.validate()?;
        }
        Ok(Self {
            entries: SmallVec::from_vec(entries),
        })
    }

    #[must_use]
    pub fn entries(&self) -> &[SeriesEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|entry| entry.value)
    }

    /// Rounded maximum used as the top of the value axis.
    #[must_use]
    pub fn max_rounded(&self) -> f64 {
        max_rounded(&self.values().collect::<SmallVec<[f64; 8]>>())
    }

    /// Data-space x of each bar center, left to right.
    #[must_use]
    pub fn positions(&self, layout: &BarLayout) -> Vec<f64> {
        let spacing = layout.spacing(self.len());
        let mut x = layout.start_x;
        let mut positions = Vec::with_capacity(self.len());
        for _ in 0..self.len() {
            positions.push(x);
            x += spacing;
        }
        positions
    }
}

impl Default for Series {
    fn default() -> Self {
        let entries = DEFAULT_VALUES
            .iter()
            .zip(DEFAULT_COLORS)
            .map(|(value, color)| SeriesEntry {
                value: *value,
                color,
            })
            .collect();
        Self { entries }
    }
}

/// Rounds the largest value up to the next multiple of ten.
///
/// The result never drops below one step, so an all-zero (or empty) input
/// still yields a usable divisor. Near `f64::MAX` the rounding would overflow
/// and the maximum itself is returned.
#[must_use]
pub fn max_rounded(values: &[f64]) -> f64 {
    let max = values
        .iter()
        .copied()
        .filter(|value| value.is_finite())
        .map(OrderedFloat)
        .max()
        .map_or(0.0, |value| value.0);
    let rounded = (max / MAX_ROUNDING_STEP).ceil() * MAX_ROUNDING_STEP;
    if rounded.is_finite() {
        rounded.max(MAX_ROUNDING_STEP)
    } else {
        max
    }
}

/// Horizontal placement and vertical budget of bars in data space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarLayout {
    pub start_x: f64,
    /// Total horizontal span shared by all bars.
    pub span: f64,
    /// Headroom kept between the tallest bar and the logical top.
    pub top_padding: f64,
    pub label_y: f64,
}

impl Default for BarLayout {
    fn default() -> Self {
        Self {
            start_x: 1.0,
            span: 8.1,
            top_padding: 2.0,
            label_y: -0.8,
        }
    }
}

impl BarLayout {
    #[must_use]
    pub fn spacing(&self, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        self.span / count as f64
    }

    /// Height in data units of a bar with `value` against `max_value`.
    ///
    /// Never exceeds `logical_height - top_padding`, however large `value` is.
    #[must_use]
    pub fn scaled_height(&self, value: f64, max_value: f64, logical_height: f64) -> f64 {
        (value / max_value).min(1.0) * (logical_height - self.top_padding)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (name, value) in [
            ("start_x", self.start_x),
            ("span", self.span),
            ("top_padding", self.top_padding),
            ("label_y", self.label_y),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "bar layout `{name}` must be finite"
                )));
            }
        }
        if self.span <= 0.0 {
            return Err(ChartError::InvalidData(
                "bar layout `span` must be > 0".to_owned(),
            ));
        }
        Ok(())
    }
}
