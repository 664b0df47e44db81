use crate::core::{AxisDirection, PlotArea, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::scene::Scene;
use crate::separator::{SeparatorAnimationConfig, SeparatorChart};

use super::StackedAxis;

/// Chart state separators are placed against: geometry, stacked axes,
/// animation settings and the retained scene.
///
/// Kept apart from the per-axis separator sets so a reconciliation pass can
/// borrow both mutably.
#[derive(Debug)]
pub struct ChartSurface {
    pub(super) viewport: Viewport,
    pub(super) plot_area: PlotArea,
    pub(super) animation: SeparatorAnimationConfig,
    pub(super) scene: Scene,
    pub(super) x_axes: Vec<StackedAxis>,
    pub(super) y_axes: Vec<StackedAxis>,
}

impl ChartSurface {
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn axes(&self, direction: AxisDirection) -> &[StackedAxis] {
        match direction {
            AxisDirection::X => &self.x_axes,
            AxisDirection::Y => &self.y_axes,
        }
    }

    pub fn axis(&self, direction: AxisDirection, axis_index: usize) -> ChartResult<&StackedAxis> {
        self.axes(direction)
            .get(axis_index)
            .ok_or_else(|| missing_axis(direction, axis_index))
    }

    pub(super) fn axis_mut(
        &mut self,
        direction: AxisDirection,
        axis_index: usize,
    ) -> ChartResult<&mut StackedAxis> {
        let axes = match direction {
            AxisDirection::X => &mut self.x_axes,
            AxisDirection::Y => &mut self.y_axes,
        };
        axes.get_mut(axis_index)
            .ok_or_else(|| missing_axis(direction, axis_index))
    }
}

impl SeparatorChart for ChartSurface {
    fn to_plot_area(
        &self,
        value: f64,
        direction: AxisDirection,
        axis_index: usize,
    ) -> ChartResult<f64> {
        self.axis(direction, axis_index)?
            .scale()
            .value_to_pixel(value, self.plot_area, direction)
    }

    fn plot_area(&self) -> PlotArea {
        self.plot_area
    }

    fn animation(&self) -> SeparatorAnimationConfig {
        self.animation
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }
}

fn missing_axis(direction: AxisDirection, axis_index: usize) -> ChartError {
    ChartError::InvalidData(format!(
        "no {direction:?} axis at stacked position {axis_index}"
    ))
}
