use crate::core::{PixelPoint, SurfaceSize};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingSurface, FontSpec, Shadow, TextHAlign};

/// One capability call observed by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    StrokeLine {
        from: PixelPoint,
        to: PixelPoint,
        color: Color,
        width: f64,
        shadow: Option<Shadow>,
    },
    FillText {
        text: String,
        position: PixelPoint,
        font: FontSpec,
        color: Color,
        align: TextHAlign,
        shadow: Option<Shadow>,
    },
    SetShadow(Shadow),
    ClearShadow,
    FillBackgroundGradient {
        top: Color,
        bottom: Color,
        width: u32,
        height: u32,
    },
    BeginPolygon,
    LineTo(PixelPoint),
    ClosePolygon,
    Fill {
        color: Color,
        shadow: Option<Shadow>,
    },
    Stroke {
        color: Color,
        width: f64,
        shadow: Option<Shadow>,
    },
}

/// Headless surface that records every call instead of drawing.
///
/// Used by tests and by hosts that want to inspect a draw pass. Each drawing
/// call is stamped with the shadow active at the time it was issued.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: SurfaceSize,
    calls: Vec<SurfaceCall>,
    shadow: Option<Shadow>,
    fail_at_call: Option<usize>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: SurfaceSize::new(width, height),
            calls: Vec::new(),
            shadow: None,
            fail_at_call: None,
        }
    }

    /// Makes the call with zero-based index `index` fail with a backend error.
    #[must_use]
    pub fn failing_at_call(mut self, index: usize) -> Self {
        self.fail_at_call = Some(index);
        self
    }

    #[must_use]
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }

    #[must_use]
    pub fn active_shadow(&self) -> Option<Shadow> {
        self.shadow
    }

    #[must_use]
    pub fn lines_stroked(&self) -> usize {
        self.count(|call| matches!(call, SurfaceCall::StrokeLine { .. }))
    }

    #[must_use]
    pub fn polygons_filled(&self) -> usize {
        self.count(|call| matches!(call, SurfaceCall::Fill { .. }))
    }

    #[must_use]
    pub fn texts_drawn(&self) -> usize {
        self.count(|call| matches!(call, SurfaceCall::FillText { .. }))
    }

    fn count(&self, predicate: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    fn record(&mut self, call: SurfaceCall) -> ChartResult<()> {
        if self.fail_at_call == Some(self.calls.len()) {
            self.fail_at_call = None;
            return Err(ChartError::Backend(format!(
                "injected failure at call {}",
                self.calls.len()
            )));
        }
        self.calls.push(call);
        Ok(())
    }
}

impl DrawingSurface for RecordingSurface {
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
        let shadow = self.shadow;
        self.record(SurfaceCall::StrokeLine {
            from,
            to,
            color,
            width,
            shadow,
        })
    }

    fn fill_text(
        &mut self,
        text: &str,
        position: PixelPoint,
        font: &FontSpec,
        color: Color,
        align: TextHAlign,
    ) -> ChartResult<()> {
        let shadow = self.shadow;
        self.record(SurfaceCall::FillText {
            text: text.to_owned(),
            position,
            font: font.clone(),
            color,
            align,
            shadow,
        })
    }

    fn set_shadow(&mut self, color: Color, blur_radius: f64) -> ChartResult<()> {
        let shadow = Shadow::new(color, blur_radius);
        self.record(SurfaceCall::SetShadow(shadow))?;
        self.shadow = Some(shadow);
        Ok(())
    }

    fn clear_shadow(&mut self) -> ChartResult<()> {
        self.shadow = None;
        self.record(SurfaceCall::ClearShadow)
    }

    fn fill_background_gradient(
        &mut self,
        top: Color,
        bottom: Color,
        width: u32,
        height: u32,
    ) -> ChartResult<()> {
        self.record(SurfaceCall::FillBackgroundGradient {
            top,
            bottom,
            width,
            height,
        })
    }

    fn begin_polygon(&mut self) -> ChartResult<()> {
        self.record(SurfaceCall::BeginPolygon)
    }

    fn line_to(&mut self, point: PixelPoint) -> ChartResult<()> {
        self.record(SurfaceCall::LineTo(point))
    }

    fn close_polygon(&mut self) -> ChartResult<()> {
        self.record(SurfaceCall::ClosePolygon)
    }

    fn fill(&mut self, color: Color) -> ChartResult<()> {
        let shadow = self.shadow;
        self.record(SurfaceCall::Fill { color, shadow })
    }

    fn stroke(&mut self, color: Color, width: f64) -> ChartResult<()> {
        let shadow = self.shadow;
        self.record(SurfaceCall::Stroke {
            color,
            width,
            shadow,
        })
    }
}
