//! Emergency stop when the pointer is driven into the top-left corner.
//!
//! Gesture control can run away (a misdetected hand, a tracker glitch).
//! Pushing the cursor into the corner is the user's way out.

use pinchpoint_common::error::{PinchpointError, PinchpointResult};
use pinchpoint_gesture_model::PointerIntent;
use pinchpoint_platform_core::ScreenGeometry;

#[derive(Debug, Clone, Copy)]
pub struct FailsafeGuard {
    enabled: bool,
    margin_px: f64,
    screen: ScreenGeometry,
}

impl FailsafeGuard {
    pub fn new(enabled: bool, margin_px: f64, screen: ScreenGeometry) -> Self {
        Self {
            enabled,
            margin_px,
            screen,
        }
    }

    pub fn disabled(screen: ScreenGeometry) -> Self {
        Self::new(false, 0.0, screen)
    }

    /// Refuse a move into the corner region. Button intents always pass.
    pub fn check(&self, intent: &PointerIntent) -> PinchpointResult<()> {
        if !self.enabled {
            return Ok(());
        }
        match intent.target() {
            Some(target) if self.screen.in_failsafe_corner(target, self.margin_px) => {
                Err(PinchpointError::FailsafeTriggered {
                    x: target.x,
                    y: target.y,
                })
            }
            _ => Ok(()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
