//! Grid-line separators and their placement/transition state machine.
//!
//! A [`Separator`] owns one line and one label in a [`Scene`]. Each
//! reconciliation pass the axis manager classifies it and calls
//! [`Separator::place`] exactly once:
//!
//! - `InitialAdd`: geometry is set directly, no slide and no fade.
//! - `DrawOrKeep`: kept separators slide from their previous on-screen pose,
//!   new ones slide in from the axis entry point and fade in.
//! - `Remove`: the separator slides to where its value maps now, fades out,
//!   and a guarded detach task is queued for the render thread.
//!
//! With animation disabled every state applies its final result synchronously.

mod config;
mod geometry;
mod state;

use std::time::Duration;

use smallvec::smallvec;
use tracing::trace;

use crate::animation::{Easing, Tween};
use crate::core::{AxisDirection, LabelSize, PlotArea};
use crate::error::{ChartError, ChartResult};
use crate::scene::{
    AnimatedProperty, LineGeometry, PrimitiveId, RenderTask, RevisionedPrimitive, Scene,
};

pub use config::{
    DEFAULT_LABEL_FADE_IN_MS, DEFAULT_LINE_FADE_IN_MS, DEFAULT_MOVE_DURATION_MS,
    SeparatorAnimationConfig,
};
pub use geometry::{SeparatorPose, separator_pose};
pub use state::SeparatorState;

/// Chart collaborator consumed by [`Separator::place`].
pub trait SeparatorChart {
    /// Maps `value` to a pixel along `direction` for the given stacked axis.
    fn to_plot_area(
        &self,
        value: f64,
        direction: AxisDirection,
        axis_index: usize,
    ) -> ChartResult<f64>;

    fn plot_area(&self) -> PlotArea;

    fn animation(&self) -> SeparatorAnimationConfig;

    fn scene(&self) -> &Scene;

    fn scene_mut(&mut self) -> &mut Scene;

    fn disable_animation(&self) -> bool {
        self.animation().disable_animation
    }
}

/// Axis collaborator providing the entry point new separators slide in from.
pub trait AxisOrigin {
    fn from_last_axis(
        &self,
        value: f64,
        direction: AxisDirection,
        chart: &dyn SeparatorChart,
    ) -> ChartResult<f64>;
}

/// Primitive revisions captured when a fade-out was scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalTicket {
    pub line_revision: u64,
    pub label_revision: u64,
}

/// One tick/grid line on one axis.
///
/// Not `Clone`: the separator is the only owner of its two primitives.
#[derive(Debug, PartialEq)]
pub struct Separator {
    value: f64,
    line: PrimitiveId,
    label: PrimitiveId,
    state: Option<SeparatorState>,
    is_new: bool,
    axis_position: usize,
    removal: Option<RemovalTicket>,
}

impl Separator {
    /// Creates the separator's primitives in `scene`. The separator starts as new.
    pub fn new(
        scene: &mut Scene,
        value: f64,
        text: impl Into<String>,
        label_size: LabelSize,
        axis_position: usize,
    ) -> ChartResult<Self> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData(
                "separator value must be finite".to_owned(),
            ));
        }
        let label = scene.insert_label(text, label_size, 0.0, 0.0)?;
        let line = scene.insert_line(LineGeometry::default());
        Ok(Self {
            value,
            line,
            label,
            state: None,
            is_new: true,
            axis_position,
            removal: None,
        })
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Retargets the separator to a changed tick value.
    pub fn set_value(&mut self, value: f64) -> ChartResult<()> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData(
                "separator value must be finite".to_owned(),
            ));
        }
        self.value = value;
        Ok(())
    }

    #[must_use]
    pub fn line(&self) -> PrimitiveId {
        self.line
    }

    #[must_use]
    pub fn label(&self) -> PrimitiveId {
        self.label
    }

    /// Classification used by the most recent placement.
    #[must_use]
    pub fn state(&self) -> Option<SeparatorState> {
        self.state
    }

    #[must_use]
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn set_new(&mut self, is_new: bool) {
        self.is_new = is_new;
    }

    #[must_use]
    pub fn axis_position(&self) -> usize {
        self.axis_position
    }

    pub fn set_axis_position(&mut self, axis_position: usize) {
        self.axis_position = axis_position;
    }

    /// Pending fade-out, if the last placement removed the separator.
    #[must_use]
    pub fn removal(&self) -> Option<RemovalTicket> {
        self.removal
    }

    /// Whether both primitives have left the render tree.
    #[must_use]
    pub fn is_detached(&self, scene: &Scene) -> bool {
        !scene.is_attached(self.line) && !scene.is_attached(self.label)
    }

    /// Pins the label coordinate that does not follow the separator value
    /// (label `left` for `Y` separators, `top` for `X` separators).
    pub fn pin_label(
        &self,
        scene: &mut Scene,
        direction: AxisDirection,
        cross_px: f64,
    ) -> ChartResult<()> {
        scene.set_property(
            self.label,
            AnimatedProperty::label_along(direction.other()),
            cross_px,
        )
    }

    /// Frees both primitives.
    pub fn release(self, scene: &mut Scene) {
        scene.release(self.line);
        scene.release(self.label);
    }

    /// Applies `state` to this separator for the current chart geometry.
    ///
    /// `Remove` combined with `is_new` is rejected as an invalid state: a
    /// separator that never reached the screen cannot be removed.
    pub fn place<C, A>(
        &mut self,
        state: SeparatorState,
        chart: &mut C,
        direction: AxisDirection,
        axis_index: usize,
        axis: &A,
    ) -> ChartResult<()>
    where
        C: SeparatorChart,
        A: AxisOrigin + ?Sized,
    {
        if state == SeparatorState::Remove && self.is_new {
            return Err(ChartError::InvalidState(format!(
                "separator {} cannot be removed while new",
                self.value
            )));
        }
        trace!(
            value = self.value,
            %state,
            is_new = self.is_new,
            ?direction,
            axis_index,
            "place separator"
        );

        match state {
            SeparatorState::Remove => self.move_and_fade_out(chart, direction, axis_index)?,
            SeparatorState::DrawOrKeep => self.draw_or_keep(chart, direction, axis_index, axis)?,
            SeparatorState::InitialAdd => self.place_directly(chart, direction, axis_index)?,
        }
        self.state = Some(state);
        Ok(())
    }

    fn place_directly<C: SeparatorChart>(
        &mut self,
        chart: &mut C,
        direction: AxisDirection,
        axis_index: usize,
    ) -> ChartResult<()> {
        let target = self.target_pose(chart, direction, axis_index)?;
        let scene = chart.scene_mut();
        let revived = self.reclaim(scene)?;
        self.apply_pose(scene, direction, target)?;
        if revived {
            self.set_opacity(scene, 1.0)?;
        }
        Ok(())
    }

    fn draw_or_keep<C, A>(
        &mut self,
        chart: &mut C,
        direction: AxisDirection,
        axis_index: usize,
        axis: &A,
    ) -> ChartResult<()>
    where
        C: SeparatorChart,
        A: AxisOrigin + ?Sized,
    {
        let target = self.target_pose(chart, direction, axis_index)?;
        let config = chart.animation();

        if config.disable_animation {
            let scene = chart.scene_mut();
            self.reclaim(scene)?;
            self.apply_pose(scene, direction, target)?;
            return self.set_opacity(scene, 1.0);
        }

        let entry = if self.is_new {
            let entry_px = axis.from_last_axis(self.value, direction, &*chart)?;
            let label_size = self.label_size(chart.scene())?;
            Some(separator_pose(
                entry_px,
                chart.plot_area(),
                direction,
                label_size,
            ))
        } else {
            None
        };

        let scene = chart.scene_mut();
        let revived = self.reclaim(scene)?;
        let start = match entry {
            Some(entry) => entry,
            None => self.current_pose(scene, direction)?,
        };
        self.slide(scene, direction, start, target, &config)?;

        if self.is_new {
            fade(scene, self.label, 0.0, 1.0, config.label_fade_in(), None, config.easing)?;
            fade(scene, self.line, 0.0, 1.0, config.line_fade_in(), None, config.easing)?;
        } else if revived {
            for id in [self.label, self.line] {
                let from = scene.opacity(id).unwrap_or(0.0);
                fade(scene, id, from, 1.0, config.move_duration(), None, config.easing)?;
            }
        }
        Ok(())
    }

    fn move_and_fade_out<C: SeparatorChart>(
        &mut self,
        chart: &mut C,
        direction: AxisDirection,
        axis_index: usize,
    ) -> ChartResult<()> {
        let config = chart.animation();
        if config.disable_animation {
            let scene = chart.scene_mut();
            scene.detach(self.line)?;
            scene.detach(self.label)?;
            self.removal = None;
            return Ok(());
        }

        let target = self.target_pose(chart, direction, axis_index)?;
        let scene = chart.scene_mut();
        let current = self.current_pose(scene, direction)?;
        self.slide(scene, direction, current, target, &config)?;

        let ticket = RemovalTicket {
            line_revision: scene.claim(self.line)?,
            label_revision: scene.claim(self.label)?,
        };
        let detach = RenderTask::DetachIfCurrent {
            targets: smallvec![
                RevisionedPrimitive {
                    id: self.line,
                    revision: ticket.line_revision,
                },
                RevisionedPrimitive {
                    id: self.label,
                    revision: ticket.label_revision,
                },
            ],
        };

        let duration = config.move_duration();
        let label_from = scene.opacity(self.label).unwrap_or(1.0);
        let line_from = scene.opacity(self.line).unwrap_or(1.0);
        fade(scene, self.label, label_from, 0.0, duration, Some(detach), config.easing)?;
        fade(scene, self.line, line_from, 0.0, duration, None, config.easing)?;
        self.removal = Some(ticket);
        Ok(())
    }

    fn target_pose<C: SeparatorChart>(
        &self,
        chart: &C,
        direction: AxisDirection,
        axis_index: usize,
    ) -> ChartResult<SeparatorPose> {
        let pixel = chart.to_plot_area(self.value, direction, axis_index)?;
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "separator {} mapped to a non-finite pixel",
                self.value
            )));
        }
        let label_size = self.label_size(chart.scene())?;
        Ok(separator_pose(pixel, chart.plot_area(), direction, label_size))
    }

    fn label_size(&self, scene: &Scene) -> ChartResult<LabelSize> {
        scene.label(self.label).map(|label| label.size).ok_or_else(|| {
            ChartError::InvalidData(format!("separator {} lost its label", self.value))
        })
    }

    fn current_pose(&self, scene: &Scene, direction: AxisDirection) -> ChartResult<SeparatorPose> {
        let line = scene.line(self.line).ok_or_else(|| {
            ChartError::InvalidData(format!("separator {} lost its line", self.value))
        })?;
        let label_along = scene.property(self.label, AnimatedProperty::label_along(direction))?;
        Ok(SeparatorPose { line, label_along })
    }

    /// Invalidates any pending detach and puts both primitives back in the
    /// render tree. Returns `true` when a removal was in flight.
    fn reclaim(&mut self, scene: &mut Scene) -> ChartResult<bool> {
        scene.claim(self.line)?;
        scene.claim(self.label)?;
        scene.attach(self.line)?;
        scene.attach(self.label)?;
        Ok(self.removal.take().is_some())
    }

    fn apply_pose(
        &self,
        scene: &mut Scene,
        direction: AxisDirection,
        pose: SeparatorPose,
    ) -> ChartResult<()> {
        scene.set_line(self.line, pose.line)?;
        scene.set_property(
            self.label,
            AnimatedProperty::label_along(direction),
            pose.label_along,
        )
    }

    fn set_opacity(&self, scene: &mut Scene, opacity: f64) -> ChartResult<()> {
        scene.set_opacity(self.line, opacity)?;
        scene.set_opacity(self.label, opacity)
    }

    fn slide(
        &self,
        scene: &mut Scene,
        direction: AxisDirection,
        from: SeparatorPose,
        to: SeparatorPose,
        config: &SeparatorAnimationConfig,
    ) -> ChartResult<()> {
        let duration = config.move_duration();
        let along = AnimatedProperty::line_along(direction);
        let cross = AnimatedProperty::line_cross(direction);
        for property in along.into_iter().chain(cross) {
            let start = from.line.get(property).unwrap_or_default();
            let end = to.line.get(property).unwrap_or_default();
            scene.animate(
                self.line,
                property,
                Tween::new(start, end, duration).with_easing(config.easing),
                None,
            )?;
        }
        scene.animate(
            self.label,
            AnimatedProperty::label_along(direction),
            Tween::new(from.label_along, to.label_along, duration).with_easing(config.easing),
            None,
        )
    }
}

fn fade(
    scene: &mut Scene,
    id: PrimitiveId,
    from: f64,
    to: f64,
    duration: Duration,
    on_complete: Option<RenderTask>,
    easing: Easing,
) -> ChartResult<()> {
    scene.animate(
        id,
        AnimatedProperty::Opacity,
        Tween::new(from, to, duration).with_easing(easing),
        on_complete,
    )
}
