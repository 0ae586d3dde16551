//! Pointer sink implementations.
//!
//! The OS-level pointer backend is supplied by the host application.
//! These sinks cover dry runs and tests.

use std::sync::{Arc, Mutex, MutexGuard};

use pinchpoint_common::error::PinchpointResult;
use pinchpoint_gesture_model::{PointerIntent, ScreenPoint};

use crate::PointerSink;

/// Logs every command through `tracing` instead of moving the real pointer.
#[derive(Debug, Default)]
pub struct LogSink {
    held: bool,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PointerSink for LogSink {
    fn move_to(&mut self, point: ScreenPoint) -> PinchpointResult<()> {
        tracing::trace!(x = point.x, y = point.y, held = self.held, "moveTo");
        Ok(())
    }

    fn button_down(&mut self) -> PinchpointResult<()> {
        self.held = true;
        tracing::debug!("mouseDown");
        Ok(())
    }

    fn button_up(&mut self) -> PinchpointResult<()> {
        self.held = false;
        tracing::debug!("mouseUp");
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

/// Shared view of what a [`RecordingSink`] received.
#[derive(Debug, Clone, Default)]
pub struct RecordedIntents {
    inner: Arc<Mutex<Vec<PointerIntent>>>,
}

impl RecordedIntents {
    fn lock(&self) -> MutexGuard<'_, Vec<PointerIntent>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy of every intent received so far, in order.
    pub fn snapshot(&self) -> Vec<PointerIntent> {
        self.lock().clone()
    }

    /// Button intents only, in order.
    pub fn buttons(&self) -> Vec<PointerIntent> {
        self.lock()
            .iter()
            .filter(|intent| intent.target().is_none())
            .copied()
            .collect()
    }

    /// The most recent move target.
    pub fn last_target(&self) -> Option<ScreenPoint> {
        self.lock().iter().rev().find_map(PointerIntent::target)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Records commands in memory. Keep the [`RecordedIntents`] handle to
/// inspect them after the sink has been moved into a controller.
#[derive(Debug, Default)]
pub struct RecordingSink {
    recorded: RecordedIntents,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> RecordedIntents {
        self.recorded.clone()
    }

    fn push(&self, intent: PointerIntent) {
        self.recorded.lock().push(intent);
    }
}

impl PointerSink for RecordingSink {
    fn move_to(&mut self, point: ScreenPoint) -> PinchpointResult<()> {
        self.push(PointerIntent::move_to(point));
        Ok(())
    }

    fn button_down(&mut self) -> PinchpointResult<()> {
        self.push(PointerIntent::ButtonDown);
        Ok(())
    }

    fn button_up(&mut self) -> PinchpointResult<()> {
        self.push(PointerIntent::ButtonUp);
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
