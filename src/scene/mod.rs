//! Retained-mode scene holding separator lines and labels.
//!
//! The scene owns primitive storage, the property animations currently in
//! flight and the render-thread task queue their completions are posted to.
//! Primitives stay stored after [`Scene::detach`] so their owner can revive
//! them; [`Scene::release`] frees them for good.

mod node;
mod task_queue;

use std::time::Duration;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::animation::Tween;
use crate::core::LabelSize;
use crate::error::{ChartError, ChartResult};

pub use node::{AnimatedProperty, LabelNode, LineGeometry, NodeShape, PrimitiveId, SceneNode};
pub use task_queue::{RenderTask, RenderTaskSender, RevisionedPrimitive, TaskRunReport};

use task_queue::RenderTaskQueue;

#[derive(Debug)]
struct ActiveAnimation {
    target: PrimitiveId,
    property: AnimatedProperty,
    tween: Tween,
    on_complete: Option<RenderTask>,
}

#[derive(Debug)]
pub struct Scene {
    nodes: IndexMap<PrimitiveId, SceneNode>,
    animations: Vec<ActiveAnimation>,
    tasks: RenderTaskQueue,
    next_id: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            animations: Vec::new(),
            tasks: RenderTaskQueue::new(),
            next_id: 1,
        }
    }

    /// Inserts an attached, fully opaque line.
    pub fn insert_line(&mut self, geometry: LineGeometry) -> PrimitiveId {
        self.insert(NodeShape::Line(geometry))
    }

    /// Inserts an attached, fully opaque label.
    pub fn insert_label(
        &mut self,
        text: impl Into<String>,
        size: LabelSize,
        left: f64,
        top: f64,
    ) -> ChartResult<PrimitiveId> {
        size.validate()?;
        Ok(self.insert(NodeShape::Label(LabelNode {
            text: text.into(),
            left,
            top,
            size,
        })))
    }

    fn insert(&mut self, shape: NodeShape) -> PrimitiveId {
        let id = PrimitiveId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, SceneNode::new(shape));
        id
    }

    #[must_use]
    pub fn contains(&self, id: PrimitiveId) -> bool {
        self.nodes.contains_key(&id)
    }

    #[must_use]
    pub fn node(&self, id: PrimitiveId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// Stored primitives in insertion order, attached or not.
    pub fn nodes(&self) -> impl Iterator<Item = (PrimitiveId, &SceneNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    #[must_use]
    pub fn line(&self, id: PrimitiveId) -> Option<LineGeometry> {
        match self.nodes.get(&id).map(|node| &node.shape) {
            Some(NodeShape::Line(line)) => Some(*line),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(&self, id: PrimitiveId) -> Option<&LabelNode> {
        match self.nodes.get(&id).map(|node| &node.shape) {
            Some(NodeShape::Label(label)) => Some(label),
            _ => None,
        }
    }

    #[must_use]
    pub fn opacity(&self, id: PrimitiveId) -> Option<f64> {
        self.nodes.get(&id).map(|node| node.opacity)
    }

    #[must_use]
    pub fn is_attached(&self, id: PrimitiveId) -> bool {
        self.nodes.get(&id).is_some_and(|node| node.attached)
    }

    #[must_use]
    pub fn attached_count(&self) -> usize {
        self.nodes.values().filter(|node| node.attached).count()
    }

    /// Current (possibly mid-animation) value of `property`.
    pub fn property(&self, id: PrimitiveId, property: AnimatedProperty) -> ChartResult<f64> {
        self.node_ref(id)?.property(property).ok_or_else(|| {
            ChartError::InvalidData(format!(
                "property {property:?} does not apply to primitive {}",
                id.raw()
            ))
        })
    }

    /// Sets `property` immediately, cancelling any animation of it.
    pub fn set_property(
        &mut self,
        id: PrimitiveId,
        property: AnimatedProperty,
        value: f64,
    ) -> ChartResult<()> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "{property:?} value must be finite"
            )));
        }
        self.cancel_animation(id, property);
        if !self.node_mut(id)?.set_property(property, value) {
            return Err(ChartError::InvalidData(format!(
                "property {property:?} does not apply to primitive {}",
                id.raw()
            )));
        }
        Ok(())
    }

    pub fn set_line(&mut self, id: PrimitiveId, geometry: LineGeometry) -> ChartResult<()> {
        for property in [
            AnimatedProperty::LineX1,
            AnimatedProperty::LineY1,
            AnimatedProperty::LineX2,
            AnimatedProperty::LineY2,
        ] {
            let value = geometry.get(property).unwrap_or_default();
            self.set_property(id, property, value)?;
        }
        Ok(())
    }

    pub fn set_opacity(&mut self, id: PrimitiveId, opacity: f64) -> ChartResult<()> {
        self.set_property(id, AnimatedProperty::Opacity, opacity.clamp(0.0, 1.0))
    }

    pub fn set_label_text(
        &mut self,
        id: PrimitiveId,
        text: impl Into<String>,
        size: LabelSize,
    ) -> ChartResult<()> {
        size.validate()?;
        match &mut self.node_mut(id)?.shape {
            NodeShape::Label(label) => {
                label.text = text.into();
                label.size = size;
                Ok(())
            }
            NodeShape::Line(_) => Err(ChartError::InvalidData(format!(
                "primitive {} is not a label",
                id.raw()
            ))),
        }
    }

    /// Starts animating `property`, replacing any animation already running on
    /// it. The replaced animation's completion task is dropped.
    ///
    /// The tween's start value is applied immediately.
    pub fn animate(
        &mut self,
        id: PrimitiveId,
        property: AnimatedProperty,
        tween: Tween,
        on_complete: Option<RenderTask>,
    ) -> ChartResult<()> {
        if !tween.from().is_finite() || !tween.to().is_finite() {
            return Err(ChartError::InvalidData(format!(
                "{property:?} animation endpoints must be finite"
            )));
        }
        self.cancel_animation(id, property);
        if !self.node_mut(id)?.set_property(property, tween.value()) {
            return Err(ChartError::InvalidData(format!(
                "property {property:?} does not apply to primitive {}",
                id.raw()
            )));
        }
        trace!(
            primitive = id.raw(),
            ?property,
            from = tween.from(),
            to = tween.to(),
            duration_ms = tween.duration().as_millis() as u64,
            "start animation"
        );
        self.animations.push(ActiveAnimation {
            target: id,
            property,
            tween,
            on_complete,
        });
        Ok(())
    }

    fn cancel_animation(&mut self, id: PrimitiveId, property: AnimatedProperty) {
        self.animations
            .retain(|animation| animation.target != id || animation.property != property);
    }

    /// Drops every animation targeting `id` without firing completions.
    pub fn cancel_animations(&mut self, id: PrimitiveId) -> usize {
        let before = self.animations.len();
        self.animations.retain(|animation| animation.target != id);
        before - self.animations.len()
    }

    #[must_use]
    pub fn is_animating(&self, id: PrimitiveId) -> bool {
        self.animations.iter().any(|animation| animation.target == id)
    }

    #[must_use]
    pub fn is_animating_property(&self, id: PrimitiveId, property: AnimatedProperty) -> bool {
        self.animations
            .iter()
            .any(|animation| animation.target == id && animation.property == property)
    }

    #[must_use]
    pub fn active_animation_count(&self) -> usize {
        self.animations.len()
    }

    /// Target value of a running animation, if any.
    #[must_use]
    pub fn animation_target(&self, id: PrimitiveId, property: AnimatedProperty) -> Option<f64> {
        self.animations
            .iter()
            .find(|animation| animation.target == id && animation.property == property)
            .map(|animation| animation.tween.to())
    }

    /// Adds the primitive back to the render tree. Returns `true` when it was detached.
    pub fn attach(&mut self, id: PrimitiveId) -> ChartResult<bool> {
        let node = self.node_mut(id)?;
        let changed = !node.attached;
        node.attached = true;
        Ok(changed)
    }

    /// Removes the primitive from the render tree and stops its animations.
    /// Returns `true` when it was attached.
    pub fn detach(&mut self, id: PrimitiveId) -> ChartResult<bool> {
        let node = self.node_mut(id)?;
        let changed = node.attached;
        node.attached = false;
        self.cancel_animations(id);
        Ok(changed)
    }

    /// Bumps the primitive revision, invalidating render tasks queued against
    /// earlier revisions. Returns the new revision.
    pub fn claim(&mut self, id: PrimitiveId) -> ChartResult<u64> {
        let node = self.node_mut(id)?;
        node.revision += 1;
        Ok(node.revision)
    }

    /// Frees the primitive and its animations.
    pub fn release(&mut self, id: PrimitiveId) -> Option<SceneNode> {
        self.cancel_animations(id);
        self.nodes.shift_remove(&id)
    }

    /// Handle for posting render tasks from another execution context.
    #[must_use]
    pub fn task_sender(&self) -> RenderTaskSender {
        self.tasks.sender()
    }

    /// Advances every running animation by `dt` on the compositor clock.
    ///
    /// Completion tasks are queued, not executed; they run on the next
    /// [`Scene::run_pending_tasks`]. Returns the number of animations that
    /// finished.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let mut finished = Vec::new();
        let mut index = 0;
        while index < self.animations.len() {
            let animation = &mut self.animations[index];
            animation.tween.advance(dt);
            let value = animation.tween.value();
            let complete = animation.tween.is_complete();
            let (target, property) = (animation.target, animation.property);

            if let Some(node) = self.nodes.get_mut(&target) {
                node.set_property(property, value);
            }
            if complete {
                finished.push(self.animations.remove(index));
            } else {
                index += 1;
            }
        }

        let sender = self.tasks.sender();
        for animation in &mut finished {
            if let Some(task) = animation.on_complete.take() {
                if let Err(err) = sender.post(task) {
                    warn!(error = %err, "dropping animation completion task");
                }
            }
        }
        finished.len()
    }

    /// Runs queued render tasks. Must be called from the render thread.
    pub fn run_pending_tasks(&mut self) -> TaskRunReport {
        let mut report = TaskRunReport::default();
        for task in self.tasks.drain() {
            match task {
                RenderTask::DetachIfCurrent { targets } => {
                    let current = targets.iter().all(|target| {
                        self.nodes
                            .get(&target.id)
                            .is_some_and(|node| node.revision == target.revision)
                    });
                    if !current {
                        debug!(
                            targets = targets.len(),
                            "skipping detach for reclaimed primitives"
                        );
                        report.skipped_stale += 1;
                        continue;
                    }
                    for target in &targets {
                        if let Some(node) = self.nodes.get_mut(&target.id) {
                            node.attached = false;
                        }
                        self.cancel_animations(target.id);
                    }
                    report.executed += 1;
                }
            }
        }
        report
    }

    fn node_ref(&self, id: PrimitiveId) -> ChartResult<&SceneNode> {
        self.nodes
            .get(&id)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown primitive {}", id.raw())))
    }

    fn node_mut(&mut self, id: PrimitiveId) -> ChartResult<&mut SceneNode> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown primitive {}", id.raw())))
    }
}
