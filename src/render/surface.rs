use crate::core::{PixelPoint, SurfaceSize};
use crate::error::ChartResult;
use crate::render::{Color, FontSpec, TextHAlign};

/// Drawing capability a chart paints onto.
///
/// Calls are order-sensitive: later draws cover earlier ones where they
/// overlap. Shadow state is global to the surface and stays active until
/// `clear_shadow` is called.
///
/// Polygon paths follow canvas semantics: the first `line_to` after
/// `begin_polygon` only positions the pen.
pub trait DrawingSurface {
    fn size(&self) -> SurfaceSize;

    fn stroke_line(
        &mut self,
        from: PixelPoint,
        to: PixelPoint,
        color: Color,
        width: f64,
    ) -> ChartResult<()>;

    fn fill_text(
        &mut self,
        text: &str,
        position: PixelPoint,
        font: &FontSpec,
        color: Color,
        align: TextHAlign,
    ) -> ChartResult<()>;

    fn set_shadow(&mut self, color: Color, blur_radius: f64) -> ChartResult<()>;

    fn clear_shadow(&mut self) -> ChartResult<()>;

    fn fill_background_gradient(
        &mut self,
        top: Color,
        bottom: Color,
        width: u32,
        height: u32,
    ) -> ChartResult<()>;

    fn begin_polygon(&mut self) -> ChartResult<()>;

    fn line_to(&mut self, point: PixelPoint) -> ChartResult<()>;

    fn close_polygon(&mut self) -> ChartResult<()>;

    fn fill(&mut self, color: Color) -> ChartResult<()>;

    fn stroke(&mut self, color: Color, width: f64) -> ChartResult<()>;
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for &mut S {
    fn size(&self) -> SurfaceSize {
        (**self).size()
    }

    fn stroke_line(
        &mut self,
        from: PixelPoint,
        to: PixelPoint,
        color: Color,
        width: f64,
    ) -> ChartResult<()> {
        (**self).stroke_line(from, to, color, width)
    }

    fn fill_text(
        &mut self,
        text: &str,
        position: PixelPoint,
        font: &FontSpec,
        color: Color,
        align: TextHAlign,
    ) -> ChartResult<()> {
        (**self).fill_text(text, position, font, color, align)
    }

    fn set_shadow(&mut self, color: Color, blur_radius: f64) -> ChartResult<()> {
        (**self).set_shadow(color, blur_radius)
    }

    fn clear_shadow(&mut self) -> ChartResult<()> {
        (**self).clear_shadow()
    }

    fn fill_background_gradient(
        &mut self,
        top: Color,
        bottom: Color,
        width: u32,
        height: u32,
    ) -> ChartResult<()> {
        (**self).fill_background_gradient(top, bottom, width, height)
    }

    fn begin_polygon(&mut self) -> ChartResult<()> {
        (**self).begin_polygon()
    }

    fn line_to(&mut self, point: PixelPoint) -> ChartResult<()> {
        (**self).line_to(point)
    }

    fn close_polygon(&mut self) -> ChartResult<()> {
        (**self).close_polygon()
    }

    fn fill(&mut self, color: Color) -> ChartResult<()> {
        (**self).fill(color)
    }

    fn stroke(&mut self, color: Color, width: f64) -> ChartResult<()> {
        (**self).stroke(color, width)
    }
}
