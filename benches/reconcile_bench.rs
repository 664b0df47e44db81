use chart_separators::api::{GridChart, GridChartConfig};
use chart_separators::axis::nice_ticks;
use chart_separators::core::{AxisDirection, PlotArea, Viewport};
use chart_separators::render::NullRenderer;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

fn bench_nice_ticks(c: &mut Criterion) {
    c.bench_function("nice_ticks_16", |b| {
        b.iter(|| {
            let _ = nice_ticks(black_box(-1_234.5), black_box(98_765.4), 16).expect("ticks");
        })
    });
}

fn bench_pan_refresh_cycle(c: &mut Criterion) {
    let config = GridChartConfig::new(
        Viewport::new(1920, 1080),
        PlotArea::new(80.0, 20.0, 1800.0, 1000.0),
        (0.0, 1_000.0),
        (0.0, 100.0),
    );
    let mut chart = GridChart::new(NullRenderer::default(), config).expect("chart");
    chart.refresh().expect("initial refresh");
    let mut offset = 0.0;

    c.bench_function("pan_refresh_advance_render", |b| {
        b.iter(|| {
            offset += 37.0;
            chart
                .set_axis_range(AxisDirection::X, 0, offset, offset + 1_000.0)
                .expect("pan");
            let report = chart.refresh().expect("refresh");
            let _ = chart.advance(Duration::from_millis(16));
            chart.render().expect("render");
            black_box(report);
        })
    });
}

fn bench_render_frame_build(c: &mut Criterion) {
    let config = GridChartConfig::new(
        Viewport::new(1920, 1080),
        PlotArea::new(80.0, 20.0, 1800.0, 1000.0),
        (0.0, 1_000.0),
        (0.0, 100.0),
    )
    .with_stacked_axis(AxisDirection::Y, -50.0, 50.0)
    .with_tick_spacing(AxisDirection::X, 24.0)
    .with_tick_spacing(AxisDirection::Y, 24.0);
    let mut chart = GridChart::new(NullRenderer::default(), config).expect("chart");
    chart.refresh().expect("initial refresh");

    c.bench_function("render_frame_build", |b| {
        b.iter(|| black_box(chart.build_render_frame()))
    });
}

criterion_group!(
    benches,
    bench_nice_ticks,
    bench_pan_refresh_cycle,
    bench_render_frame_build
);
criterion_main!(benches);
