use tracing::debug;

use crate::axis::AxisSeparators;
use crate::core::AxisDirection;
use crate::error::ChartResult;
use crate::render::Renderer;
use crate::scene::Scene;

use super::{ChartSurface, GridChart, GridChartConfig, StackedAxis};

impl<R: Renderer> GridChart<R> {
    /// Creates a chart with no separators; the first [`Self::refresh`]
    /// places them with `InitialAdd`.
    pub fn new(renderer: R, config: GridChartConfig) -> ChartResult<Self> {
        config.validate()?;
        config.style.line_color.validate()?;
        config.style.label_color.validate()?;

        let x_axes = build_axes(&config.x_axes)?;
        let y_axes = build_axes(&config.y_axes)?;
        let x_separators = build_separator_sets(AxisDirection::X, x_axes.len(), &config);
        let y_separators = build_separator_sets(AxisDirection::Y, y_axes.len(), &config);
        debug!(
            x_axes = x_axes.len(),
            y_axes = y_axes.len(),
            identity = ?config.identity,
            disable_animation = config.animation.disable_animation,
            "grid chart initialized"
        );

        Ok(Self {
            renderer,
            surface: ChartSurface {
                viewport: config.viewport,
                plot_area: config.plot_area,
                animation: config.animation,
                scene: Scene::new(),
                x_axes,
                y_axes,
            },
            style: config.style,
            labeler: Box::new(config.labeler),
            x_separators,
            y_separators,
            x_tick_spacing_px: config.x_tick_spacing_px,
            y_tick_spacing_px: config.y_tick_spacing_px,
            axis_label_band_px: config.axis_label_band_px,
        })
    }
}

fn build_axes(ranges: &[super::AxisRangeConfig]) -> ChartResult<Vec<StackedAxis>> {
    ranges
        .iter()
        .map(|range| StackedAxis::new(range.min, range.max))
        .collect()
}

fn build_separator_sets(
    direction: AxisDirection,
    count: usize,
    config: &GridChartConfig,
) -> Vec<AxisSeparators> {
    (0..count)
        .map(|axis_index| AxisSeparators::new(direction, axis_index).with_identity(config.identity))
        .collect()
}
