use bar3d_chart::ChartError;
use bar3d_chart::api::{ChartRenderer, ChartStyle};
use bar3d_chart::core::{DEFAULT_COLORS, DEFAULT_VALUES, PixelPoint, Series};
use bar3d_chart::render::{Color, RecordingSurface, SurfaceCall, TextHAlign};

fn renderer() -> ChartRenderer<RecordingSurface> {
    ChartRenderer::new(RecordingSurface::new(1201, 401)).expect("renderer init")
}

fn colors(count: usize) -> Vec<Color> {
    DEFAULT_COLORS.iter().cycle().take(count).copied().collect()
}

fn label_calls(calls: &[SurfaceCall]) -> Vec<(String, PixelPoint)> {
    calls
        .iter()
        .filter_map(|call| match call {
            SurfaceCall::FillText { text, position, .. } => Some((text.clone(), *position)),
            _ => None,
        })
        .collect()
}

#[test]
fn construction_rejects_zero_sized_surface() {
    let err = ChartRenderer::new(RecordingSurface::new(0, 600)).expect_err("zero width");
    assert_eq!(
        err,
        ChartError::InvalidSurface {
            width: 0,
            height: 600
        }
    );
    let err = ChartRenderer::new(RecordingSurface::new(800, 0)).expect_err("zero height");
    assert!(matches!(err, ChartError::InvalidSurface { .. }));
}

#[test]
fn empty_series_fails_before_drawing() {
    let mut renderer = renderer();
    let err = renderer.paint(&[], &[]).expect_err("empty series");
    assert_eq!(err, ChartError::EmptySeries);
    assert!(renderer.surface().calls().is_empty());
}

#[test]
fn mismatched_lengths_fail_before_drawing() {
    let mut renderer = renderer();
    let err = renderer
        .paint(&[1.0, 2.0], &colors(1))
        .expect_err("length mismatch");
    assert_eq!(
        err,
        ChartError::LengthMismatch {
            values: 2,
            colors: 1
        }
    );
    assert!(renderer.surface().calls().is_empty());
}

#[test]
fn invalid_hex_color_fails_before_drawing() {
    let mut renderer = renderer();
    let err = renderer
        .paint_hex(&[1.0], &["not-a-color"])
        .expect_err("bad color");
    assert!(matches!(err, ChartError::InvalidColor(_)));
    assert!(renderer.surface().calls().is_empty());
}

#[test]
fn default_series_draws_five_bars_and_labels_left_to_right() {
    let mut renderer = renderer();
    renderer.paint_default().expect("paint");
    let surface = renderer.surface();

    assert_eq!(surface.polygons_filled(), 5);
    assert_eq!(surface.texts_drawn(), 5);
    // two axes plus guide, three beams and four platform edges per bar
    assert_eq!(surface.lines_stroked(), 2 + 5 * 8);

    let labels = label_calls(surface.calls());
    let expected_x = [150, 231, 312, 393, 474];
    for ((text, position), (value, x)) in labels.iter().zip(DEFAULT_VALUES.iter().zip(expected_x))
    {
        assert_eq!(text, &value.to_string());
        assert_eq!(*position, PixelPoint::new(x, 390));
    }
}

#[test]
fn first_call_is_full_surface_background() {
    let mut renderer = renderer();
    renderer.paint_default().expect("paint");
    let style = ChartStyle::default();
    assert_eq!(
        renderer.surface().calls()[0],
        SurfaceCall::FillBackgroundGradient {
            top: style.palette.background_top,
            bottom: style.palette.background_bottom,
            width: 1201,
            height: 401,
        }
    );
}

#[test]
fn bar_sequence_follows_layering_order() {
    let mut renderer = renderer();
    let fill = Color::from_hex("#36A2EB").expect("color");
    renderer.paint(&[40.0], &[fill]).expect("paint");
    let style = ChartStyle::default();
    let calls = renderer.surface().calls();

    // background + axes scope (set, 2 lines, clear)
    let bar = &calls[5..];
    assert_eq!(bar[0], SurfaceCall::SetShadow(style.bar_shadow()));
    assert_eq!(bar[1], SurfaceCall::BeginPolygon);
    let outline: Vec<PixelPoint> = bar[2..8]
        .iter()
        .map(|call| match call {
            SurfaceCall::LineTo(point) => *point,
            other => panic!("expected polygon vertex, got {other:?}"),
        })
        .collect();
    // x = 1 -> px 150; height = 40 * 6 / 40 = 6 -> row 50
    assert_eq!(
        outline,
        vec![
            PixelPoint::new(150, 350),
            PixelPoint::new(125, 325),
            PixelPoint::new(125, 50),
            PixelPoint::new(150, 75),
            PixelPoint::new(175, 50),
            PixelPoint::new(175, 325),
        ]
    );
    assert_eq!(bar[8], SurfaceCall::ClosePolygon);
    assert_eq!(
        bar[9],
        SurfaceCall::Fill {
            color: fill,
            shadow: Some(style.bar_shadow())
        }
    );
    assert_eq!(
        bar[10],
        SurfaceCall::Stroke {
            color: Color::BLACK,
            width: 2.5,
            shadow: Some(style.bar_shadow())
        }
    );
    assert_eq!(bar[11], SurfaceCall::ClearShadow);

    let SurfaceCall::StrokeLine {
        from, to, width, shadow, ..
    } = &bar[12]
    else {
        panic!("expected guide line");
    };
    assert_eq!((*from, *to), (PixelPoint::new(150, 350), PixelPoint::new(150, 75)));
    assert_eq!(*width, 1.5);
    assert!(shadow.is_none());

    let beams: Vec<_> = bar[13..16].to_vec();
    for beam in &beams {
        let SurfaceCall::StrokeLine {
            color,
            width,
            shadow,
            ..
        } = beam
        else {
            panic!("expected projection line");
        };
        assert_eq!(*color, style.palette.projection);
        assert_eq!(*width, 1.0);
        assert!(shadow.is_none());
    }

    for edge in &bar[16..20] {
        let SurfaceCall::StrokeLine { color, .. } = edge else {
            panic!("expected platform edge");
        };
        assert_eq!(*color, style.palette.base);
    }

    assert_eq!(bar[20], SurfaceCall::SetShadow(style.label_shadow()));
    assert!(matches!(
        &bar[21],
        SurfaceCall::FillText {
            align: TextHAlign::Center,
            ..
        }
    ));
    assert_eq!(bar[22], SurfaceCall::ClearShadow);
    assert_eq!(bar.len(), 23);
}

#[test]
fn every_shadow_is_cleared_before_paint_returns() {
    let mut renderer = renderer();
    renderer.paint_default().expect("paint");
    let surface = renderer.surface();

    assert!(surface.active_shadow().is_none());
    let mut active = false;
    for call in surface.calls() {
        match call {
            SurfaceCall::SetShadow(_) => {
                assert!(!active, "shadow activated twice");
                active = true;
            }
            SurfaceCall::ClearShadow => active = false,
            SurfaceCall::StrokeLine {
                shadow: Some(_), ..
            }
            | SurfaceCall::Fill {
                shadow: Some(_), ..
            } => assert!(active),
            _ => {}
        }
    }
    assert!(!active);
}

#[test]
fn surface_failure_mid_bar_still_clears_shadow() {
    // 0 background, 1..=4 axes scope, 5 bar shadow, 6 begin, 7 first vertex
    let surface = RecordingSurface::new(800, 600).failing_at_call(7);
    let mut renderer = ChartRenderer::new(surface).expect("renderer");
    let err = renderer.paint_default().expect_err("injected failure");
    assert!(matches!(err, ChartError::Backend(_)));

    let surface = renderer.surface();
    assert_eq!(surface.calls().last(), Some(&SurfaceCall::ClearShadow));
    assert!(surface.active_shadow().is_none());
}

#[test]
fn repainting_is_deterministic() {
    let mut first = ChartRenderer::new(RecordingSurface::new(640, 480)).expect("renderer");
    let mut second = ChartRenderer::new(RecordingSurface::new(640, 480)).expect("renderer");
    first.paint_default().expect("paint first");
    second.paint_default().expect("paint second");
    assert_eq!(first.surface().calls(), second.surface().calls());

    let one_pass = first.surface_mut().take_calls();
    first.paint_default().expect("repaint");
    assert_eq!(first.surface().calls(), one_pass.as_slice());
}

#[test]
fn all_zero_series_renders_flat_bars() {
    let mut renderer = renderer();
    renderer
        .paint(&[0.0, 0.0, 0.0], &colors(3))
        .expect("zero series paints");
    let labels = label_calls(renderer.surface().calls());
    assert_eq!(
        labels.iter().map(|(text, _)| text.as_str()).collect::<Vec<_>>(),
        vec!["0", "0", "0"]
    );

    let frame = renderer
        .build_frame(&Series::new(&[0.0], &colors(1)).expect("series"))
        .expect("frame");
    frame.validate().expect("finite geometry");
}

#[test]
fn huge_value_bar_stops_at_padded_ceiling() {
    let mut renderer = renderer();
    renderer.paint(&[1e308], &colors(1)).expect("paint");
    let calls = renderer.surface().calls();

    let vertices: Vec<PixelPoint> = calls
        .iter()
        .filter_map(|call| match call {
            SurfaceCall::LineTo(point) => Some(*point),
            _ => None,
        })
        .collect();
    // y = 6 -> row 50 on a 1201x401 surface
    assert_eq!(vertices[2], PixelPoint::new(125, 50));
    assert_eq!(vertices[4], PixelPoint::new(175, 50));
    assert!(vertices.iter().all(|point| point.y >= 50));

    let labels = label_calls(calls);
    assert_eq!(labels[0].0, "1e+308");
}

#[test]
fn projection_ceiling_is_shared_by_short_and_tall_bars() {
    let mut renderer = renderer();
    renderer.paint(&[5.0, 70.0], &colors(2)).expect("paint");
    let projection = ChartStyle::default().palette.projection;
    let ceilings: Vec<i32> = renderer
        .surface()
        .calls()
        .iter()
        .filter_map(|call| match call {
            SurfaceCall::StrokeLine { to, color, .. } if *color == projection => Some(to.y),
            _ => None,
        })
        .collect();
    // rows for y = 6, 5.5, 6 on both bars
    assert_eq!(ceilings, vec![50, 75, 50, 50, 75, 50]);
}

#[test]
fn custom_style_changes_theme_without_changing_geometry() {
    let mut style = ChartStyle::default();
    style.palette.axis = Color::from_hex("#444444").expect("color");
    style.bar_stroke_width = 4.0;
    let mut themed =
        ChartRenderer::with_style(RecordingSurface::new(1201, 401), style).expect("renderer");
    let mut stock = renderer();
    themed.paint_default().expect("themed");
    stock.paint_default().expect("stock");

    assert_eq!(
        label_calls(themed.surface().calls()),
        label_calls(stock.surface().calls())
    );
    assert!(themed.surface().calls().iter().any(|call| matches!(
        call,
        SurfaceCall::Stroke { width, .. } if *width == 4.0
    )));
}

#[test]
fn renderer_works_through_mutable_borrow() {
    let mut surface = RecordingSurface::new(320, 240);
    {
        let mut renderer = ChartRenderer::new(&mut surface).expect("renderer");
        renderer.paint_default().expect("paint");
    }
    assert_eq!(surface.texts_drawn(), 5);
}
