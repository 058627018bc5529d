mod frame;
mod primitives;
mod recording_surface;
mod surface;

pub use frame::{DrawCommand, FrameBuilder, RenderFrame};
pub use primitives::{
    Color, FontSpec, GradientPrimitive, LinePrimitive, PolygonPrimitive, Shadow, TextHAlign,
    TextPrimitive,
};
pub use recording_surface::{RecordingSurface, SurfaceCall};
pub use surface::DrawingSurface;

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoSurface};
