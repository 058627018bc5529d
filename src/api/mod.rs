mod chart_renderer;
mod chart_style;

pub use chart_renderer::ChartRenderer;
pub use chart_style::{ChartStyle, Palette};
