use tracing::{debug, trace, warn};

use crate::api::ChartStyle;
use crate::core::{
    BarGeometry, CoordinateMapper, DataPoint, DataSegment, PixelPoint, Series, SurfaceSize,
};
use crate::error::ChartResult;
use crate::render::{
    Color, DrawingSurface, FrameBuilder, GradientPrimitive, LinePrimitive, PolygonPrimitive,
    RenderFrame, TextHAlign, TextPrimitive,
};

/// Paints pseudo-3D bar charts onto a [`DrawingSurface`].
///
/// The surface size is read once at construction; every `paint*` call is an
/// independent pass that starts by repainting the full background.
#[derive(Debug)]
pub struct ChartRenderer<S: DrawingSurface> {
    surface: S,
    size: SurfaceSize,
    mapper: CoordinateMapper,
    style: ChartStyle,
}

impl<S: DrawingSurface> ChartRenderer<S> {
    pub fn new(surface: S) -> ChartResult<Self> {
        Self::with_style(surface, ChartStyle::default())
    }

    pub fn with_style(surface: S, style: ChartStyle) -> ChartResult<Self> {
        style.validate()?;
        let size = surface.size();
        let mapper = CoordinateMapper::new(size, style.grid)?;
        debug!(
            width = size.width,
            height = size.height,
            pixel_size = mapper.config().pixel_size,
            "chart renderer ready"
        );
        Ok(Self {
            surface,
            size,
            mapper,
            style,
        })
    }

    #[must_use]
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    #[must_use]
    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    #[must_use]
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Paints parallel value/color slices.
    pub fn paint(&mut self, values: &[f64], colors: &[Color]) -> ChartResult<()> {
        let series = Series::new(values, colors).inspect_err(|err| {
            warn!(error = %err, "rejected chart series");
        })?;
        self.paint_series(&series)
    }

    /// Paints values with `#RRGGBB` color strings.
    pub fn paint_hex(&mut self, values: &[f64], colors: &[&str]) -> ChartResult<()> {
        let series = Series::from_hex(values, colors).inspect_err(|err| {
            warn!(error = %err, "rejected chart series");
        })?;
        self.paint_series(&series)
    }

    /// Paints the stock five-bar data set.
    pub fn paint_default(&mut self) -> ChartResult<()> {
        self.paint_series(&Series::default())
    }

    pub fn paint_series(&mut self, series: &Series) -> ChartResult<()> {
        let frame = self.build_frame(series)?;
        frame.validate()?;
        debug!(
            bars = series.len(),
            commands = frame.commands.len(),
            "painting chart"
        );
        frame.replay(&mut self.surface)
    }

    /// Materializes the full, ordered draw pass for `series` without touching
    /// the surface.
    pub fn build_frame(&self, series: &Series) -> ChartResult<RenderFrame> {
        let style = &self.style;
        let palette = &style.palette;
        let grid = &style.grid;
        let logical_height = self.mapper.config().logical_height;
        let max_value = series.max_rounded();

        let mut builder = FrameBuilder::new(self.size);
        builder.background(GradientPrimitive {
            top: palette.background_top,
            bottom: palette.background_bottom,
            width: self.size.width,
            height: self.size.height,
        });

        builder.with_shadow(style.axis_shadow(), |b| {
            let origin = DataPoint::new(0.0, 0.0);
            b.line(self.line(
                DataSegment::new(origin, DataPoint::new(grid.axis_x_extent, 0.0)),
                style.axis_width,
                palette.axis,
            ));
            b.line(self.line(
                DataSegment::new(origin, DataPoint::new(0.0, grid.axis_y_extent)),
                style.axis_width,
                palette.axis,
            ));
            Ok(())
        })?;

        let positions = series.positions(&style.layout);
        for (index, (entry, x)) in series.entries().iter().zip(positions).enumerate() {
            let height = style
                .layout
                .scaled_height(entry.value, max_value, logical_height);
            let geometry = BarGeometry::new(x, height, &style.shape, logical_height);
            trace!(index, x, height, value = entry.value, "bar geometry");
            geometry.validate()?;

            self.push_bar(&mut builder, &geometry, entry.color)?;
            self.push_value_label(&mut builder, entry.value, x)?;
        }

        Ok(builder.finish())
    }

    fn push_bar(
        &self,
        builder: &mut FrameBuilder,
        geometry: &BarGeometry,
        fill: Color,
    ) -> ChartResult<()> {
        let style = &self.style;
        let palette = &style.palette;

        builder.with_shadow(style.bar_shadow(), |b| {
            b.polygon(PolygonPrimitive::new(
                geometry
                    .body_outline()
                    .into_iter()
                    .map(|point| self.mapper.map_point(point)),
                fill,
                palette.bar_stroke,
                style.bar_stroke_width,
            ));
            Ok(())
        })?;

        builder.line(self.line(geometry.guide_line(), style.axis_width, palette.axis));
        for segment in geometry.projection_lines() {
            builder.line(self.line(segment, style.projection_width, palette.projection));
        }
        for segment in geometry.base_lines() {
            builder.line(self.line(segment, style.base_width, palette.base));
        }
        Ok(())
    }

    fn push_value_label(&self, builder: &mut FrameBuilder, value: f64, x: f64) -> ChartResult<()> {
        let style = &self.style;
        let position = PixelPoint::new(
            self.mapper.map_x(x),
            self.mapper.map_y(style.layout.label_y),
        );
        builder.with_shadow(style.label_shadow(), |b| {
            b.text(TextPrimitive::new(
                format_value(value),
                position,
                style.label_font.clone(),
                style.palette.label,
                TextHAlign::Center,
            ));
            Ok(())
        })
    }

    fn line(&self, segment: DataSegment, width: f64, color: Color) -> LinePrimitive {
        LinePrimitive::new(
            self.mapper.map_point(segment.from),
            self.mapper.map_point(segment.to),
            width,
            color,
        )
    }
}

/// Shortest form that reads back as `value` (`10`, `2.5`).
///
/// Magnitudes of at least `1e21` or below `1e-6` switch to exponent form with
/// a signed exponent (`1e+21`, `1.5e-7`), like ECMAScript number strings.
fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if value != 0.0 && !(1e-6..1e21).contains(&magnitude) {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }
    format!("{value}")
}
