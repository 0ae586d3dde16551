//! Pinchpoint Gesture Model
//!
//! Defines the data contracts exchanged between the hand tracker, the
//! gesture controller, and the pointer sink:
//! - **Landmarks:** Normalized hand keypoints as reported by the tracker
//! - **Pointer:** Screen coordinates, click state, and pointer intents
//! - **Stream:** JSONL format for recorded landmark observations
//!
//! Landmark coordinates are normalized to `[0.0, 1.0]` relative to the
//! camera frame. Screen coordinates are in pixels.

pub mod landmark;
pub mod pointer;
pub mod stream;

pub use landmark::*;
pub use pointer::*;
pub use stream::*;
