use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

use super::PrimitiveId;

/// Primitive handle paired with the revision observed when a task was queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionedPrimitive {
    pub id: PrimitiveId,
    pub revision: u64,
}

/// Continuation executed on the render thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderTask {
    /// Detaches every target, but only if none of them was reclaimed since
    /// the task was queued.
    DetachIfCurrent {
        targets: SmallVec<[RevisionedPrimitive; 2]>,
    },
}

/// Outcome of one drain of the render task queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskRunReport {
    pub executed: usize,
    pub skipped_stale: usize,
}

/// Cloneable, `Send` handle used by animation clocks to post completions.
///
/// Whatever context signals completion, the task itself only runs when the
/// owning scene drains its queue on the render thread.
#[derive(Debug, Clone)]
pub struct RenderTaskSender {
    inner: Sender<RenderTask>,
}

impl RenderTaskSender {
    pub fn post(&self, task: RenderTask) -> ChartResult<()> {
        self.inner
            .send(task)
            .map_err(|_| ChartError::InvalidData("render task queue is closed".to_owned()))
    }
}

#[derive(Debug)]
pub(super) struct RenderTaskQueue {
    sender: Sender<RenderTask>,
    receiver: Receiver<RenderTask>,
}

impl RenderTaskQueue {
    pub(super) fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    pub(super) fn sender(&self) -> RenderTaskSender {
        RenderTaskSender {
            inner: self.sender.clone(),
        }
    }

    /// Takes every task posted so far, in posting order.
    pub(super) fn drain(&self) -> Vec<RenderTask> {
        self.receiver.try_iter().collect()
    }
}
