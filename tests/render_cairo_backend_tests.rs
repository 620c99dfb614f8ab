#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use scpp_charts::ChartError;
use scpp_charts::api::{
    Dataset, DonutChart, DonutChartProps, DonutChartStyle, LineChart, LineChartProps,
    LineChartStyle,
};
use scpp_charts::core::{NumberFormat, Viewport};
use scpp_charts::render::{CairoContextRenderer, CairoRenderer, Color};

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_line_chart_primitives() {
    let mut chart = LineChart::new(
        LineChartProps {
            datasets: vec![Dataset::new(vec![10.0, 25.0, 15.0], Color::from_rgb8(4, 162, 235))],
            labels: vec!["Ene".to_owned(), "Feb".to_owned(), "Mar".to_owned()],
            viewport: Viewport::new(600, 320),
            label_color: Color::rgb(0.1, 0.1, 0.1),
            number_format: NumberFormat::default(),
        },
        LineChartStyle::default(),
    )
    .expect("chart");
    chart.advance(1.0).expect("advance");

    let mut renderer = CairoRenderer::new(600, 320).expect("renderer");
    chart.render(&mut renderer).expect("render");
    let stats = renderer.last_stats();

    assert_eq!(stats.lines_drawn, 2);
    assert_eq!(stats.paths_drawn, 1);
    assert_eq!(stats.circles_drawn, 3);
    assert_eq!(stats.texts_drawn, 8);
}

#[test]
fn cairo_renderer_can_draw_donut_on_external_context() {
    let mut chart = DonutChart::new(
        DonutChartProps::new(65.0, "Gastado").with_size(150.0, 20.0),
        DonutChartStyle::default(),
    )
    .expect("donut");
    chart.advance(1.0).expect("advance");
    let frame = chart.build_render_frame().expect("frame");

    let surface = ImageSurface::create(Format::ARgb32, 150, 150).expect("surface");
    let context = Context::new(&surface).expect("context");
    let mut renderer = CairoRenderer::new(150, 150).expect("renderer");
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("render on external context");

    let stats = renderer.last_stats();
    assert_eq!(stats.circles_drawn, 2);
    assert_eq!(stats.texts_drawn, 2);
}
