//! Pinchpoint Pointer Control
//!
//! Runs the per-frame loop between a hand landmark source and a pointer
//! sink. Both ends are pluggable:
//!
//! - **Sources:** recorded JSONL streams, scripted frames for tests
//! - **Sinks:** tracing log, in-memory recorder, or an OS pointer backend
//! - **Synthetic:** generated pinch sessions for dry runs
//!
//! The loop is single-threaded. Controller state is owned by one
//! [`FrameProcessor`] and is only read between frames.

pub mod failsafe;
pub mod sinks;
pub mod sources;
pub mod synthetic;
pub mod writer;

use std::borrow::Cow;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

use pinchpoint_common::clock::{FrameClock, RateController};
use pinchpoint_common::config::{ControllerConfig, RuntimeConfig};
use pinchpoint_common::error::PinchpointResult;
use pinchpoint_gesture_core::FrameProcessor;
use pinchpoint_gesture_model::{ClickState, LandmarkFrame, PointerIntent, ScreenPoint, TimedIntent};
use pinchpoint_platform_core::ScreenGeometry;

use crate::failsafe::FailsafeGuard;
use crate::writer::{IntentLogHeader, IntentWriter, INTENT_LOG_SCHEMA_VERSION};

/// Capability that yields hand observations, one frame at a time.
pub trait LandmarkSource: Send {
    /// Next frame, or `None` once the source is exhausted.
    ///
    /// May block on capture hardware.
    fn next_frame(&mut self) -> PinchpointResult<Option<LandmarkFrame>>;

    /// Source name for logging.
    fn name(&self) -> &str;
}

/// Capability that executes pointer commands.
pub trait PointerSink: Send {
    fn move_to(&mut self, point: ScreenPoint) -> PinchpointResult<()>;

    fn button_down(&mut self) -> PinchpointResult<()>;

    fn button_up(&mut self) -> PinchpointResult<()>;

    /// Sink name for logging.
    fn name(&self) -> &str;

    /// Route an intent to the matching command.
    fn dispatch(&mut self, intent: PointerIntent) -> PinchpointResult<()> {
        match intent {
            PointerIntent::MoveTo { x, y } => self.move_to(ScreenPoint::new(x, y)),
            PointerIntent::ButtonDown => self.button_down(),
            PointerIntent::ButtonUp => self.button_up(),
            PointerIntent::None => Ok(()),
        }
    }
}

/// Counters reported when a session ends.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSummary {
    pub frames: u64,
    pub frames_with_hand: u64,
    pub rejected_frames: u64,
    pub moves: u64,
    pub button_downs: u64,
    pub button_ups: u64,
    pub final_state: ClickState,
    pub final_position: ScreenPoint,
}

/// Couples a landmark source, the gesture controller, and a pointer sink.
pub struct PointerController {
    source: Box<dyn LandmarkSource>,
    sink: Box<dyn PointerSink>,
    processor: FrameProcessor,
    runtime: RuntimeConfig,
    failsafe: FailsafeGuard,
    intent_log: Option<IntentWriter>,
    clock: FrameClock,
    realtime: bool,
    stop_flag: Arc<AtomicBool>,
    summary: SessionSummary,
}

impl PointerController {
    /// Validate configuration and build a controller. Nothing is read from
    /// the source until [`run`](Self::run).
    pub fn new(
        source: Box<dyn LandmarkSource>,
        sink: Box<dyn PointerSink>,
        controller: &ControllerConfig,
        runtime: RuntimeConfig,
        screen: ScreenGeometry,
    ) -> PinchpointResult<Self> {
        runtime.validate()?;
        let processor = FrameProcessor::new(controller, screen)?;
        let failsafe = FailsafeGuard::new(runtime.failsafe, runtime.failsafe_margin_px, screen);

        Ok(Self {
            source,
            sink,
            processor,
            runtime,
            failsafe,
            intent_log: None,
            clock: FrameClock::start(),
            realtime: false,
            stop_flag: Arc::new(AtomicBool::new(false)),
            summary: SessionSummary::default(),
        })
    }

    /// Append every issued intent to a JSONL log at `path`.
    pub fn with_intent_log(mut self, path: impl AsRef<Path>) -> PinchpointResult<Self> {
        let screen = self.processor.screen();
        let header = IntentLogHeader {
            schema_version: INTENT_LOG_SCHEMA_VERSION.to_string(),
            started_at: self.clock.epoch_wall().to_string(),
            source: self.source.name().to_string(),
            screen_width: screen.width,
            screen_height: screen.height,
        };
        self.intent_log = Some(IntentWriter::new(path, &header)?);
        Ok(self)
    }

    /// Pace frames at the configured rate instead of as fast as possible.
    pub fn realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    /// Run the frame loop until the source is exhausted, the stop flag is
    /// set, or the fail-safe trips.
    pub async fn run(&mut self) -> PinchpointResult<SessionSummary> {
        tracing::info!(
            source = %self.source.name(),
            sink = %self.sink.name(),
            screen = %self.processor.screen(),
            started_at = %self.clock.epoch_wall(),
            "Pointer controller started"
        );

        let mut rate = RateController::new(self.runtime.frame_rate_hz);
        let outcome = self.frame_loop(&mut rate).await;

        if let Some(log) = self.intent_log.as_mut() {
            log.flush()?;
        }
        self.summary.final_state = self.processor.click_state();
        self.summary.final_position = self.processor.smoother_state();

        match outcome {
            Ok(()) => {
                tracing::info!(
                    frames = self.summary.frames,
                    clicks = self.summary.button_downs,
                    state = self.summary.final_state.label(),
                    "Pointer controller stopped"
                );
                Ok(self.summary.clone())
            }
            Err(e) => {
                tracing::error!(error = %e, frames = self.summary.frames, "Pointer controller aborted");
                Err(e)
            }
        }
    }

    async fn frame_loop(&mut self, rate: &mut RateController) -> PinchpointResult<()> {
        while !self.stop_flag.load(Ordering::Relaxed) {
            if self.realtime {
                let wait = rate.wait_until_next(self.clock.elapsed_ns());
                if !wait.is_zero() {
                    tokio::time::sleep(wait).await;
                }
                rate.should_tick(self.clock.elapsed_ns());
            }

            let frame = match self.source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    tracing::info!(source = %self.source.name(), "Landmark source exhausted");
                    break;
                }
                Err(e) => {
                    self.summary.rejected_frames += 1;
                    tracing::warn!(error = %e, "Dropping unreadable frame");
                    continue;
                }
            };

            self.handle_frame(&frame)?;
        }
        Ok(())
    }

    /// Feed a single frame through the controller and the sink.
    pub fn handle_frame(&mut self, frame: &LandmarkFrame) -> PinchpointResult<()> {
        self.summary.frames += 1;

        let hand = frame.primary_hand().map(|hand| {
            if self.runtime.mirror_horizontal {
                Cow::Owned(hand.mirrored())
            } else {
                Cow::Borrowed(hand)
            }
        });
        if hand.is_some() {
            self.summary.frames_with_hand += 1;
        }

        let Some(intents) = self.processor.process(hand.as_deref()) else {
            return Ok(());
        };

        for intent in intents.to_intents() {
            self.failsafe.check(&intent)?;
            self.issue(frame.timestamp_ns, intent)?;
        }

        if !intents.click.is_none() {
            tracing::info!(
                t = frame.timestamp_ns,
                status = self.processor.click_state().label(),
                "Click state changed"
            );
        }
        Ok(())
    }

    fn issue(&mut self, timestamp_ns: u64, intent: PointerIntent) -> PinchpointResult<()> {
        match intent {
            PointerIntent::MoveTo { .. } => self.summary.moves += 1,
            PointerIntent::ButtonDown => self.summary.button_downs += 1,
            PointerIntent::ButtonUp => self.summary.button_ups += 1,
            PointerIntent::None => return Ok(()),
        }

        if let Some(log) = self.intent_log.as_mut() {
            log.write_intent(&TimedIntent {
                timestamp_ns,
                intent,
            })?;
        }

        if let Err(e) = self.sink.dispatch(intent) {
            tracing::warn!(error = %e, sink = %self.sink.name(), ?intent, "Pointer command failed");
        }
        Ok(())
    }

    /// Set the stop flag. The loop exits before the next frame.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Get the stop flag for external coordination (signal handlers).
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Snapshot of the click state, e.g. for an overlay label.
    pub fn click_state(&self) -> ClickState {
        self.processor.click_state()
    }

    /// Snapshot of the smoothed cursor position.
    pub fn cursor(&self) -> ScreenPoint {
        self.processor.smoother_state()
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }
}
