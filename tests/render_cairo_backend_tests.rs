#![cfg(feature = "cairo-backend")]

use bar3d_chart::ChartError;
use bar3d_chart::api::ChartRenderer;
use bar3d_chart::render::CairoSurface;
use cairo::{Context, Format, ImageSurface};

fn render_png(width: u32, height: u32) -> Vec<u8> {
    let surface = CairoSurface::new(width, height).expect("surface");
    let mut renderer = ChartRenderer::new(surface).expect("renderer");
    renderer.paint_default().expect("paint");
    let mut png = Vec::new();
    renderer
        .surface()
        .write_png(&mut png)
        .expect("png export");
    png
}

#[test]
fn cairo_surface_rejects_invalid_size() {
    let err = CairoSurface::new(0, 480).expect_err("invalid width must fail");
    assert_eq!(
        err,
        ChartError::InvalidSurface {
            width: 0,
            height: 480
        }
    );
}

#[test]
fn cairo_surface_draws_bars_labels_and_lines() {
    let surface = CairoSurface::new(900, 500).expect("surface");
    let mut renderer = ChartRenderer::new(surface).expect("renderer");
    renderer.paint_default().expect("paint");

    let surface = renderer.surface();
    assert_eq!(surface.backend_name(), "cairo+pango+pangocairo");
    let image = surface.image_surface().expect("offscreen image");
    assert_eq!((image.width(), image.height()), (900, 500));

    let stats = surface.stats();
    assert_eq!(stats.polygons_drawn, 5);
    assert_eq!(stats.texts_drawn, 5);
    assert_eq!(stats.lines_drawn, 2 + 5 * 8);
}

#[test]
fn identical_paints_produce_identical_pixels() {
    let first = render_png(640, 400);
    let second = render_png(640, 400);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn cairo_surface_can_draw_on_external_context() {
    let image = ImageSurface::create(Format::ARgb32, 600, 320).expect("image");
    let context = Context::new(&image).expect("context");
    let surface = CairoSurface::for_context(context, 600, 320).expect("surface");
    let mut renderer = ChartRenderer::new(surface).expect("renderer");
    renderer
        .paint(&[3.0, 9.0], &[bar3d_chart::render::Color::BLACK; 2])
        .expect("paint");

    let surface = renderer.into_surface();
    assert!(surface.image_surface().is_none());
    assert_eq!(surface.stats().polygons_drawn, 2);
    let err = surface.write_png(&mut Vec::new()).expect_err("no offscreen image");
    assert!(matches!(err, ChartError::Backend(_)));
}
