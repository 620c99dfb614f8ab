use criterion::{Criterion, criterion_group, criterion_main};
use scpp_charts::api::{Dataset, LineChart, LineChartProps, LineChartStyle};
use scpp_charts::core::{NumberFormat, ValueScale, Viewport, map_points, shared_max};
use scpp_charts::render::{Color, NullRenderer};
use std::hint::black_box;

fn synthetic_series(len: usize, phase: f64) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let t = i as f64;
            1_000.0 + (t * 0.05 + phase).sin() * 400.0 + t * 0.1
        })
        .collect()
}

fn bench_map_points_10k(c: &mut Criterion) {
    let series = synthetic_series(10_000, 0.0);
    let scale = ValueScale::new(shared_max([series.as_slice()]));

    c.bench_function("map_points_10k", |b| {
        b.iter(|| {
            let last = map_points(black_box(&series), 1_920.0, 1_080.0, scale).last();
            black_box(last)
        })
    });
}

fn bench_line_chart_frame_12_months(c: &mut Criterion) {
    let labels: Vec<String> = ["Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic"]
        .iter()
        .map(|label| (*label).to_owned())
        .collect();
    let props = LineChartProps {
        datasets: vec![
            Dataset::new(synthetic_series(12, 0.0), Color::from_rgb8(255, 99, 132)),
            Dataset::new(synthetic_series(12, 1.0), Color::from_rgb8(4, 162, 235)),
            Dataset::new(synthetic_series(12, 2.0), Color::from_rgb8(255, 205, 86)),
        ],
        labels,
        viewport: Viewport::new(390, 250),
        label_color: Color::rgb(0.1, 0.1, 0.1),
        number_format: NumberFormat::default(),
    };
    let mut chart = LineChart::new(props, LineChartStyle::default()).expect("chart");
    chart.advance(0.4).expect("advance");
    let mut renderer = NullRenderer::default();

    c.bench_function("line_chart_frame_12_months", |b| {
        b.iter(|| chart.render(black_box(&mut renderer)).expect("render"))
    });
}

criterion_group!(
    benches,
    bench_map_points_10k,
    bench_line_chart_frame_12_months
);
criterion_main!(benches);
