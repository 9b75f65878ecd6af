//! Funnel instrumentation hooks.
//!
//! Collectors are opaque collaborators: the navigator fires lifecycle
//! events at them as side effects of navigation requests and host commits,
//! and never looks at a return value.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Lifecycle events emitted across a wizard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FunnelEvent {
    /// The wizard became visible
    Started,
    /// A step became the active step
    StepStarted { index: usize },
    /// A step was left in the forward direction
    StepCompleted { index: usize },
    /// The host reported a validation error on a step
    StepError { index: usize },
    /// The user abandoned the flow
    Cancelled,
    /// The user submitted from the final step
    Submitted,
}

/// Sink for funnel events. Implementations must not block.
pub trait FunnelCollector: Send {
    fn record(&mut self, event: FunnelEvent);
}

/// Collector that forwards events to `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingCollector;

impl FunnelCollector for TracingCollector {
    fn record(&mut self, event: FunnelEvent) {
        tracing::info!(event = ?event, "wizard funnel event");
    }
}

/// Collector that buffers events behind a shared handle.
///
/// Clones share the same buffer, so a host can hand one clone to the
/// navigator and keep another to inspect the sequence afterwards.
#[derive(Debug, Default, Clone)]
pub struct RecordingCollector {
    events: Arc<Mutex<Vec<FunnelEvent>>>,
}

impl RecordingCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<FunnelEvent> {
        self.events.lock().expect("funnel buffer poisoned").clone()
    }
}

impl FunnelCollector for RecordingCollector {
    fn record(&mut self, event: FunnelEvent) {
        self.events.lock().expect("funnel buffer poisoned").push(event);
    }
}
