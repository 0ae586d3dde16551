//! Pinchpoint Gesture Core — the gesture-to-pointer controller
//!
//! Turns per-frame hand observations into pointer intents:
//! - **Smoothing:** Damp landmark jitter into a stable cursor position
//! - **Click:** Pinch distance to press/release with a hysteresis band
//! - **Frame:** Compose both for one observation per frame
//!
//! This crate is pure computation — no I/O, no platform dependencies.
//! State lives in an explicit [`FrameProcessor`] owned by the caller.

pub mod click;
pub mod frame;
pub mod smoother;

pub use click::ClickStateMachine;
pub use frame::FrameProcessor;
pub use smoother::PositionSmoother;
