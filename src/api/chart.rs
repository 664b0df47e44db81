use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::axis::{
    AXIS_MAX_TICKS, AXIS_MIN_TICKS, AxisSeparators, ReconcileReport, TickLabeler, nice_ticks,
    tick_target_count,
};
use crate::core::{AxisDirection, PlotArea, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{GridStyle, RenderFrame, Renderer};
use crate::scene::{Scene, TaskRunReport};
use crate::separator::{SeparatorAnimationConfig, SeparatorChart};

use super::ChartSurface;

/// Outcome of one [`GridChart::refresh`] call for a single stacked axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisPassReport {
    pub direction: AxisDirection,
    pub axis_index: usize,
    pub report: ReconcileReport,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshReport {
    pub passes: Vec<AxisPassReport>,
}

impl RefreshReport {
    /// Sums the per-axis counts.
    #[must_use]
    pub fn total(&self) -> ReconcileReport {
        self.passes
            .iter()
            .fold(ReconcileReport::default(), |mut acc, pass| {
                acc.initial += pass.report.initial;
                acc.added += pass.report.added;
                acc.kept += pass.report.kept;
                acc.revived += pass.report.revived;
                acc.removed += pass.report.removed;
                acc.pruned += pass.report.pruned;
                acc
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceReport {
    pub animations_finished: usize,
    pub tasks: TaskRunReport,
    pub pruned: usize,
}

/// Grid-line host coordinating stacked axes, separator sets, the animation
/// clock and a renderer.
pub struct GridChart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) surface: ChartSurface,
    pub(super) style: GridStyle,
    pub(super) labeler: Box<dyn TickLabeler>,
    pub(super) x_separators: Vec<AxisSeparators>,
    pub(super) y_separators: Vec<AxisSeparators>,
    pub(super) x_tick_spacing_px: f64,
    pub(super) y_tick_spacing_px: f64,
    pub(super) axis_label_band_px: f64,
}

impl<R: Renderer> GridChart<R> {
    #[must_use]
    pub fn surface(&self) -> &ChartSurface {
        &self.surface
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.surface.scene
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.surface.viewport
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.surface.plot_area
    }

    #[must_use]
    pub fn style(&self) -> GridStyle {
        self.style
    }

    pub fn set_style(&mut self, style: GridStyle) -> ChartResult<()> {
        style.line_color.validate()?;
        style.label_color.validate()?;
        self.style = style;
        Ok(())
    }

    #[must_use]
    pub fn animation(&self) -> SeparatorAnimationConfig {
        self.surface.animation
    }

    /// Takes effect for placements issued by the next refresh.
    pub fn set_animation(&mut self, animation: SeparatorAnimationConfig) -> ChartResult<()> {
        animation.validate()?;
        self.surface.animation = animation;
        Ok(())
    }

    pub fn set_labeler(&mut self, labeler: Box<dyn TickLabeler>) {
        self.labeler = labeler;
    }

    #[must_use]
    pub fn axis_count(&self, direction: AxisDirection) -> usize {
        self.surface.axes(direction).len()
    }

    pub fn axis_range(&self, direction: AxisDirection, axis_index: usize) -> ChartResult<(f64, f64)> {
        Ok(self.surface.axis(direction, axis_index)?.range())
    }

    /// Changes the visible range of one stacked axis. Separators follow on the
    /// next [`Self::refresh`].
    pub fn set_axis_range(
        &mut self,
        direction: AxisDirection,
        axis_index: usize,
        min: f64,
        max: f64,
    ) -> ChartResult<()> {
        self.surface
            .axis_mut(direction, axis_index)?
            .set_range(min, max)?;
        trace!(?direction, axis_index, min, max, "axis range updated");
        Ok(())
    }

    pub fn resize(&mut self, viewport: Viewport, plot_area: PlotArea) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidData(format!(
                "invalid viewport: width={}, height={}",
                viewport.width, viewport.height
            )));
        }
        plot_area.validate()?;
        self.surface.viewport = viewport;
        self.surface.plot_area = plot_area;
        Ok(())
    }

    pub fn separators(
        &self,
        direction: AxisDirection,
        axis_index: usize,
    ) -> ChartResult<&AxisSeparators> {
        let sets = match direction {
            AxisDirection::X => &self.x_separators,
            AxisDirection::Y => &self.y_separators,
        };
        sets.get(axis_index).ok_or_else(|| {
            ChartError::InvalidData(format!(
                "no {direction:?} axis at stacked position {axis_index}"
            ))
        })
    }

    /// Runs one reconciliation pass over every stacked axis, X first.
    pub fn refresh(&mut self) -> ChartResult<RefreshReport> {
        let mut passes = Vec::with_capacity(self.x_separators.len() + self.y_separators.len());
        for direction in [AxisDirection::X, AxisDirection::Y] {
            for axis_index in 0..self.surface.axes(direction).len() {
                let report = self.refresh_axis(direction, axis_index)?;
                passes.push(AxisPassReport {
                    direction,
                    axis_index,
                    report,
                });
            }
        }
        let report = RefreshReport { passes };
        let total = report.total();
        debug!(
            placements = total.placements(),
            removed = total.removed,
            "grid refresh completed"
        );
        Ok(report)
    }

    fn refresh_axis(
        &mut self,
        direction: AxisDirection,
        axis_index: usize,
    ) -> ChartResult<ReconcileReport> {
        let plot_area = self.surface.plot_area;
        let axis = *self.surface.axis(direction, axis_index)?;
        let (along_start, along_end) = plot_area.along_span(direction);
        let spacing = match direction {
            AxisDirection::X => self.x_tick_spacing_px,
            AxisDirection::Y => self.y_tick_spacing_px,
        };
        let target = tick_target_count(
            along_end - along_start,
            spacing,
            AXIS_MIN_TICKS,
            AXIS_MAX_TICKS,
        );
        let (min, max) = axis.range();
        let ticks = nice_ticks(min.min(max), min.max(max), target)?;
        let anchor = self.label_anchor(direction, axis_index);

        let sets = match direction {
            AxisDirection::X => &mut self.x_separators,
            AxisDirection::Y => &mut self.y_separators,
        };
        let separators = sets.get_mut(axis_index).ok_or_else(|| {
            ChartError::InvalidData(format!(
                "no {direction:?} separator set at stacked position {axis_index}"
            ))
        })?;
        separators.set_label_anchor(Some(anchor));
        let report =
            separators.reconcile(&ticks, &mut self.surface, &axis, self.labeler.as_ref())?;

        self.surface.axis_mut(direction, axis_index)?.commit();
        Ok(report)
    }

    /// Label coordinate across `direction`: Y labels sit left of the plot
    /// area, X labels below it, one band per stacked position.
    fn label_anchor(&self, direction: AxisDirection, axis_index: usize) -> f64 {
        let plot_area = self.surface.plot_area;
        let band = self.axis_label_band_px;
        match direction {
            AxisDirection::Y => plot_area.x - band * (axis_index as f64 + 1.0),
            AxisDirection::X => plot_area.y + plot_area.height + band * axis_index as f64,
        }
    }

    /// Steps the animation clock, runs posted render tasks, then releases
    /// separators whose removal completed.
    pub fn advance(&mut self, dt: Duration) -> AdvanceReport {
        let scene = self.surface.scene_mut();
        let animations_finished = scene.advance(dt);
        let tasks = scene.run_pending_tasks();
        let pruned: usize = self
            .x_separators
            .iter_mut()
            .chain(self.y_separators.iter_mut())
            .map(|set| set.prune_detached(&mut self.surface.scene))
            .sum();
        if pruned > 0 {
            trace!(pruned, "released retired separators");
        }
        AdvanceReport {
            animations_finished,
            tasks,
            pruned,
        }
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.surface.scene.active_animation_count() > 0
    }

    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        RenderFrame::from_scene(self.surface.viewport, &self.surface.scene, &self.style)
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame();
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
