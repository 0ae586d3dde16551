//! Frame clock and loop pacing.
//!
//! The session clock anchors realtime pacing and records the wall-clock
//! start written into intent log headers. Frames keep the timestamps their
//! source gave them.

use std::time::{Duration, Instant};

/// A session clock that provides monotonic timestamps relative to
/// a fixed epoch (the moment the controller started).
#[derive(Debug, Clone)]
pub struct FrameClock {
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl FrameClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Get nanoseconds elapsed since session start.
    pub fn elapsed_ns(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }
}

/// Paces a frame loop at a target rate.
///
/// The controller never drops frames because of pacing; the controller only
/// asks how long to wait before pulling the next one.
#[derive(Debug)]
pub struct RateController {
    target_interval_ns: u64,
    last_tick_ns: Option<u64>,
}

impl RateController {
    /// Create a controller targeting the given Hz rate. A rate of zero
    /// disables pacing.
    pub fn new(target_hz: u32) -> Self {
        let target_interval_ns = if target_hz == 0 {
            0
        } else {
            1_000_000_000 / target_hz as u64
        };
        Self {
            target_interval_ns,
            last_tick_ns: None,
        }
    }

    /// Check if enough time has passed for the next tick.
    /// Returns true and updates internal state if ready.
    /// The first call always returns true.
    pub fn should_tick(&mut self, current_ns: u64) -> bool {
        match self.last_tick_ns {
            None => {
                self.last_tick_ns = Some(current_ns);
                true
            }
            Some(last) if current_ns >= last + self.target_interval_ns => {
                self.last_tick_ns = Some(current_ns);
                true
            }
            _ => false,
        }
    }

    /// Time remaining until the next tick is due, measured from `current_ns`.
    pub fn wait_until_next(&self, current_ns: u64) -> Duration {
        match self.last_tick_ns {
            None => Duration::ZERO,
            Some(last) => {
                let due = last + self.target_interval_ns;
                Duration::from_nanos(due.saturating_sub(current_ns))
            }
        }
    }
}
