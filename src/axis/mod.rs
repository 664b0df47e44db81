//! Reconciliation of separator sets against freshly computed tick values.
//!
//! [`AxisSeparators`] owns the separators of one stacked axis instance. Every
//! pass it matches the new tick values against the existing separators, tags
//! each one (`InitialAdd` on the first pass, `DrawOrKeep` for new and kept
//! values, `Remove` for values that disappeared) and places each exactly once.
//! Removed separators stay in a retiring list until their fade-out detaches
//! them, so a value that comes back in the meantime revives the same
//! primitives instead of stacking a second line on top of a fading one.

mod labeler;
mod ticks;

use indexmap::{IndexMap, IndexSet};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::AxisDirection;
use crate::error::{ChartError, ChartResult};
use crate::scene::Scene;
use crate::separator::{AxisOrigin, Separator, SeparatorChart, SeparatorState};

pub use labeler::{FixedPrecisionLabeler, TickLabeler};
pub use ticks::{
    AXIS_MAX_TICKS, AXIS_MIN_TICKS, AXIS_X_TARGET_SPACING_PX, AXIS_Y_TARGET_SPACING_PX,
    nice_step, nice_ticks, tick_target_count,
};

/// How separators are matched to tick values across passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SeparatorIdentity {
    /// A separator survives while its exact value stays among the ticks.
    #[default]
    Value,
    /// The k-th separator is reused for the k-th tick and retargeted to its value.
    Index,
}

/// Per-pass classification counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub initial: usize,
    pub added: usize,
    pub kept: usize,
    pub revived: usize,
    pub removed: usize,
    /// Retiring separators released because their fade-out had completed.
    pub pruned: usize,
}

impl ReconcileReport {
    /// Total `place` calls issued by the pass.
    #[must_use]
    pub fn placements(&self) -> usize {
        self.initial + self.added + self.kept + self.revived + self.removed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Match {
    Created,
    Kept,
    Revived,
}

/// Where the separator for one tick comes from.
enum Slot {
    Active(usize),
    Retiring(usize),
    Created(Separator),
}

#[derive(Debug)]
pub struct AxisSeparators {
    direction: AxisDirection,
    axis_index: usize,
    identity: SeparatorIdentity,
    label_anchor: Option<f64>,
    active: Vec<Separator>,
    retiring: Vec<Separator>,
    initialized: bool,
}

impl AxisSeparators {
    #[must_use]
    pub fn new(direction: AxisDirection, axis_index: usize) -> Self {
        Self {
            direction,
            axis_index,
            identity: SeparatorIdentity::Value,
            label_anchor: None,
            active: Vec::new(),
            retiring: Vec::new(),
            initialized: false,
        }
    }

    #[must_use]
    pub fn with_identity(mut self, identity: SeparatorIdentity) -> Self {
        self.identity = identity;
        self
    }

    #[must_use]
    pub fn direction(&self) -> AxisDirection {
        self.direction
    }

    #[must_use]
    pub fn axis_index(&self) -> usize {
        self.axis_index
    }

    #[must_use]
    pub fn identity(&self) -> SeparatorIdentity {
        self.identity
    }

    /// Sets the fixed label coordinate across the separator direction
    /// (label `left` for `Y` axes, `top` for `X` axes).
    pub fn set_label_anchor(&mut self, anchor_px: Option<f64>) {
        self.label_anchor = anchor_px;
    }

    /// Separators matching the current tick set, in tick order.
    #[must_use]
    pub fn separators(&self) -> &[Separator] {
        &self.active
    }

    /// Removed separators whose fade-out has not detached them yet.
    #[must_use]
    pub fn retiring(&self) -> &[Separator] {
        &self.retiring
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Runs one reconciliation pass against `ticks`.
    ///
    /// Separators are created before the tracked sets are touched, and every
    /// separator is tracked again before the first placement. A failing pass
    /// therefore never leaves primitives in the scene without an owner.
    pub fn reconcile<C, A, L>(
        &mut self,
        ticks: &[f64],
        chart: &mut C,
        axis: &A,
        labeler: &L,
    ) -> ChartResult<ReconcileReport>
    where
        C: SeparatorChart,
        A: AxisOrigin + ?Sized,
        L: TickLabeler + ?Sized,
    {
        let mut report = ReconcileReport {
            pruned: self.prune_detached(chart.scene_mut()),
            ..ReconcileReport::default()
        };
        let ticks = canonical_ticks(ticks)?;
        let slots = self.resolve_slots(&ticks, chart.scene_mut(), labeler)?;
        let first_pass = !self.initialized;

        let mut previous: Vec<Option<Separator>> = std::mem::take(&mut self.active)
            .into_iter()
            .map(Some)
            .collect();
        let mut retiring: Vec<Option<Separator>> = std::mem::take(&mut self.retiring)
            .into_iter()
            .map(Some)
            .collect();
        let mut matched = Vec::with_capacity(slots.len());
        for (slot, &value) in slots.into_iter().zip(&ticks) {
            let entry = match slot {
                Slot::Active(index) => previous
                    .get_mut(index)
                    .and_then(Option::take)
                    .map(|separator| (separator, Match::Kept)),
                Slot::Retiring(index) => retiring
                    .get_mut(index)
                    .and_then(Option::take)
                    .map(|separator| (separator, Match::Revived)),
                Slot::Created(separator) => Some((separator, Match::Created)),
            };
            matched.extend(entry.map(|(separator, matched_as)| (separator, matched_as, value)));
        }

        self.retiring = retiring.into_iter().flatten().collect();
        let mut removing = Vec::new();
        for mut separator in previous.into_iter().flatten() {
            if separator.state().is_none() {
                // Never reached the screen; nothing to fade.
                separator.release(chart.scene_mut());
                continue;
            }
            separator.set_new(false);
            removing.push(self.retiring.len());
            self.retiring.push(separator);
        }
        let mut targets = Vec::with_capacity(matched.len());
        for (mut separator, matched_as, value) in matched {
            if matched_as != Match::Created {
                separator.set_new(false);
            }
            targets.push((matched_as, value));
            self.active.push(separator);
        }

        for index in removing {
            self.retiring[index].place(
                SeparatorState::Remove,
                chart,
                self.direction,
                self.axis_index,
                axis,
            )?;
            report.removed += 1;
        }

        let state = if first_pass {
            SeparatorState::InitialAdd
        } else {
            SeparatorState::DrawOrKeep
        };
        for (index, (matched_as, value)) in targets.into_iter().enumerate() {
            match matched_as {
                Match::Created if first_pass => report.initial += 1,
                Match::Created => report.added += 1,
                Match::Kept => report.kept += 1,
                Match::Revived => report.revived += 1,
            }
            let separator = &mut self.active[index];
            if matched_as != Match::Created {
                if separator.value() != value {
                    separator.set_value(value)?;
                }
                relabel(separator, chart.scene_mut(), labeler)?;
            }
            if let Some(anchor) = self.label_anchor {
                separator.pin_label(chart.scene_mut(), self.direction, anchor)?;
            }
            separator.place(state, chart, self.direction, self.axis_index, axis)?;
        }

        self.initialized = true;
        debug!(
            direction = ?self.direction,
            axis_index = self.axis_index,
            ticks = ticks.len(),
            initial = report.initial,
            added = report.added,
            kept = report.kept,
            revived = report.revived,
            removed = report.removed,
            pruned = report.pruned,
            "reconciled separators"
        );
        Ok(report)
    }

    /// Picks the separator each tick reuses, creating the missing ones. On
    /// failure the separators created so far are released.
    fn resolve_slots<L: TickLabeler + ?Sized>(
        &self,
        ticks: &[f64],
        scene: &mut Scene,
        labeler: &L,
    ) -> ChartResult<Vec<Slot>> {
        let mut by_value: IndexMap<OrderedFloat<f64>, usize> = match self.identity {
            SeparatorIdentity::Value => self
                .active
                .iter()
                .enumerate()
                .map(|(index, separator)| (OrderedFloat(separator.value()), index))
                .collect(),
            SeparatorIdentity::Index => IndexMap::new(),
        };

        let mut slots = Vec::with_capacity(ticks.len());
        for (position, &value) in ticks.iter().enumerate() {
            let reused = match self.identity {
                SeparatorIdentity::Value => by_value
                    .shift_remove(&OrderedFloat(value))
                    .map(Slot::Active)
                    .or_else(|| {
                        self.retiring
                            .iter()
                            .position(|separator| {
                                OrderedFloat(separator.value()) == OrderedFloat(value)
                            })
                            .map(Slot::Retiring)
                    }),
                SeparatorIdentity::Index => {
                    (position < self.active.len()).then_some(Slot::Active(position))
                }
            };
            let slot = match reused {
                Some(slot) => slot,
                None => match create_separator(scene, value, self.axis_index, labeler) {
                    Ok(separator) => Slot::Created(separator),
                    Err(err) => {
                        for slot in slots {
                            if let Slot::Created(separator) = slot {
                                separator.release(scene);
                            }
                        }
                        return Err(err);
                    }
                },
            };
            slots.push(slot);
        }
        Ok(slots)
    }

    /// Releases retiring separators whose primitives are detached.
    pub fn prune_detached(&mut self, scene: &mut Scene) -> usize {
        let before = self.retiring.len();
        let (detached, still_fading): (Vec<_>, Vec<_>) = std::mem::take(&mut self.retiring)
            .into_iter()
            .partition(|separator| separator.is_detached(scene));
        self.retiring = still_fading;
        for separator in detached {
            separator.release(scene);
        }
        before - self.retiring.len()
    }

    /// Drops every separator immediately and forgets the first-pass state.
    pub fn clear(&mut self, scene: &mut Scene) {
        for separator in self.active.drain(..).chain(self.retiring.drain(..)) {
            separator.release(scene);
        }
        self.initialized = false;
    }
}

fn create_separator<L: TickLabeler + ?Sized>(
    scene: &mut Scene,
    value: f64,
    axis_position: usize,
    labeler: &L,
) -> ChartResult<Separator> {
    let text = labeler.text(value);
    let size = labeler.measure(&text);
    Separator::new(scene, value, text, size, axis_position)
}

/// Rewrites the label when the labeler's output for the current value differs
/// from what the scene shows.
fn relabel<L: TickLabeler + ?Sized>(
    separator: &Separator,
    scene: &mut Scene,
    labeler: &L,
) -> ChartResult<()> {
    let text = labeler.text(separator.value());
    let size = labeler.measure(&text);
    let unchanged = scene
        .label(separator.label())
        .is_some_and(|label| label.text == text && label.size == size);
    if unchanged {
        return Ok(());
    }
    scene.set_label_text(separator.label(), text, size)
}

/// Rejects non-finite ticks and drops duplicates, keeping first occurrences.
fn canonical_ticks(ticks: &[f64]) -> ChartResult<Vec<f64>> {
    let mut unique = IndexSet::with_capacity(ticks.len());
    for &value in ticks {
        if !value.is_finite() {
            return Err(ChartError::InvalidData(
                "tick values must be finite".to_owned(),
            ));
        }
        unique.insert(OrderedFloat(value));
    }
    Ok(unique.into_iter().map(|value| value.0).collect())
}

#[cfg(test)]
mod tests {
    use super::canonical_ticks;

    #[test]
    fn canonical_ticks_dedupe_in_order() {
        let ticks = canonical_ticks(&[3.0, 1.0, 3.0, 2.0, 1.0]).expect("ticks");
        assert_eq!(ticks, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn canonical_ticks_reject_nan() {
        assert!(canonical_ticks(&[1.0, f64::NAN]).is_err());
    }
}
