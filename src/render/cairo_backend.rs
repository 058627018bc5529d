use std::fmt;
use std::io::Write;

use cairo::{Context, Format, ImageSurface, LineCap, LineJoin, LinearGradient};
use pango::FontDescription;

use crate::core::{PixelPoint, SurfaceSize};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingSurface, FontSpec, Shadow, TextHAlign};

/// Opacity multiplier applied to the shadow color when painting its halo.
const SHADOW_HALO_ALPHA: f64 = 0.45;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub polygons_drawn: usize,
    pub texts_drawn: usize,
}

/// Cairo + Pango + PangoCairo drawing surface.
///
/// Works either offscreen on its own `ImageSurface` (see [`CairoSurface::new`])
/// or in place on an external Cairo context, for example a GTK `DrawingArea`
/// callback (see [`CairoSurface::for_context`]).
///
/// Cairo has no shadow state, so an active shadow is approximated by a
/// translucent halo stroked under each primitive, `blur_radius` wider than
/// the primitive's own stroke.
pub struct CairoSurface {
    image: Option<ImageSurface>,
    context: Context,
    size: SurfaceSize,
    shadow: Option<Shadow>,
    stats: CairoRenderStats,
}

impl fmt::Debug for CairoSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CairoSurface")
            .field("offscreen", &self.image.is_some())
            .field("size", &self.size)
            .field("shadow", &self.shadow)
            .field("stats", &self.stats)
            .finish()
    }
}

impl CairoSurface {
    pub fn new(width: u32, height: u32) -> ChartResult<Self> {
        let size = checked_size(width, height)?;
        let image = ImageSurface::create(Format::ARgb32, size.0, size.1)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&image)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self::from_parts(
            Some(image),
            context,
            SurfaceSize::new(width, height),
        ))
    }

    /// Draws on an externally owned context whose target is `width` x `height`.
    pub fn for_context(context: Context, width: u32, height: u32) -> ChartResult<Self> {
        checked_size(width, height)?;
        Ok(Self::from_parts(
            None,
            context,
            SurfaceSize::new(width, height),
        ))
    }

    fn from_parts(image: Option<ImageSurface>, context: Context, size: SurfaceSize) -> Self {
        context.set_line_join(LineJoin::Miter);
        context.set_line_cap(LineCap::Butt);
        Self {
            image,
            context,
            size,
            shadow: None,
            stats: CairoRenderStats::default(),
        }
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn image_surface(&self) -> Option<&ImageSurface> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> CairoRenderStats {
        self.stats
    }

    /// Encodes the offscreen surface as PNG.
    pub fn write_png<W: Write>(&self, writer: &mut W) -> ChartResult<()> {
        let image = self.image.as_ref().ok_or_else(|| {
            ChartError::Backend("PNG export needs an offscreen surface".to_owned())
        })?;
        image.flush();
        image
            .write_to_png(writer)
            .map_err(|err| ChartError::Backend(format!("failed to write png: {err}")))
    }

    /// Strokes the current path as a translucent halo when a shadow is active.
    fn paint_shadow_halo(&self, base_width: f64) -> ChartResult<()> {
        let Some(shadow) = self.shadow else {
            return Ok(());
        };
        if shadow.blur_radius <= 0.0 || shadow.color.alpha <= 0.0 {
            return Ok(());
        }

        let halo = Color {
            alpha: shadow.color.alpha * SHADOW_HALO_ALPHA,
            ..shadow.color
        };
        apply_color(&self.context, halo);
        self.context.set_line_width(base_width + shadow.blur_radius);
        self.context.set_line_join(LineJoin::Round);
        let result = self
            .context
            .stroke_preserve()
            .map_err(|err| map_backend_error("failed to paint shadow halo", err));
        self.context.set_line_join(LineJoin::Miter);
        result
    }
}

impl DrawingSurface for CairoSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn stroke_line(
        &mut self,
        from: PixelPoint,
        to: PixelPoint,
        color: Color,
        width: f64,
    ) -> ChartResult<()> {
        self.context.new_path();
        self.context.move_to(f64::from(from.x), f64::from(from.y));
        self.context.line_to(f64::from(to.x), f64::from(to.y));
        self.paint_shadow_halo(width)?;

        apply_color(&self.context, color);
        self.context.set_line_width(width);
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))?;
        self.stats.lines_drawn += 1;
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        position: PixelPoint,
        font: &FontSpec,
        color: Color,
        align: TextHAlign,
    ) -> ChartResult<()> {
        let layout = pangocairo::functions::create_layout(&self.context);
        let font_description =
            FontDescription::from_string(&format!("{} {}px", font.family, font.size_px));
        layout.set_font_description(Some(&font_description));
        layout.set_text(text);

        let (text_width, _text_height) = layout.pixel_size();
        let anchor_x = f64::from(position.x);
        let x = match align {
            TextHAlign::Left => anchor_x,
            TextHAlign::Center => anchor_x - f64::from(text_width) / 2.0,
            TextHAlign::Right => anchor_x - f64::from(text_width),
        };
        // `position.y` is the alphabetic baseline; pango lays out from the top.
        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
        let y = f64::from(position.y) - baseline;

        if self.shadow.is_some() {
            self.context.new_path();
            self.context.move_to(x, y);
            pangocairo::functions::layout_path(&self.context, &layout);
            self.paint_shadow_halo(0.0)?;
            self.context.new_path();
        }

        apply_color(&self.context, color);
        self.context.move_to(x, y);
        pangocairo::functions::show_layout(&self.context, &layout);
        self.stats.texts_drawn += 1;
        Ok(())
    }

    fn set_shadow(&mut self, color: Color, blur_radius: f64) -> ChartResult<()> {
        let shadow = Shadow::new(color, blur_radius);
        shadow.validate()?;
        self.shadow = Some(shadow);
        Ok(())
    }

    fn clear_shadow(&mut self) -> ChartResult<()> {
        self.shadow = None;
        Ok(())
    }

    fn fill_background_gradient(
        &mut self,
        top: Color,
        bottom: Color,
        width: u32,
        height: u32,
    ) -> ChartResult<()> {
        let bottom_y = f64::from(height.saturating_sub(1));
        let gradient = LinearGradient::new(0.0, 0.0, 0.0, bottom_y);
        gradient.add_color_stop_rgba(0.0, top.red, top.green, top.blue, top.alpha);
        gradient.add_color_stop_rgba(1.0, bottom.red, bottom.green, bottom.blue, bottom.alpha);

        self.context.new_path();
        self.context
            .set_source(&gradient)
            .map_err(|err| map_backend_error("failed to set gradient source", err))?;
        self.context
            .rectangle(0.0, 0.0, f64::from(width), f64::from(height));
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill background", err))
    }

    fn begin_polygon(&mut self) -> ChartResult<()> {
        self.context.new_path();
        Ok(())
    }

    fn line_to(&mut self, point: PixelPoint) -> ChartResult<()> {
        // Without a current point cairo treats `line_to` as `move_to`.
        self.context
            .line_to(f64::from(point.x), f64::from(point.y));
        Ok(())
    }

    fn close_polygon(&mut self) -> ChartResult<()> {
        self.context.close_path();
        Ok(())
    }

    fn fill(&mut self, color: Color) -> ChartResult<()> {
        self.paint_shadow_halo(0.0)?;
        apply_color(&self.context, color);
        self.context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill polygon", err))?;
        self.stats.polygons_drawn += 1;
        Ok(())
    }

    fn stroke(&mut self, color: Color, width: f64) -> ChartResult<()> {
        apply_color(&self.context, color);
        self.context.set_line_width(width);
        self.context
            .stroke_preserve()
            .map_err(|err| map_backend_error("failed to stroke polygon", err))
    }
}

fn checked_size(width: u32, height: u32) -> ChartResult<(i32, i32)> {
    match (i32::try_from(width), i32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(ChartError::InvalidSurface { width, height }),
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
