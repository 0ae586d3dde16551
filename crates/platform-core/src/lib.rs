//! Pinchpoint platform core contracts.
//!
//! Screen geometry used to turn normalized landmark positions into pixel
//! targets for the pointer sink, without coupling to a concrete OS backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use pinchpoint_common::error::{PinchpointError, PinchpointResult};
use pinchpoint_gesture_model::{NormalizedPoint, ScreenPoint};

/// Fallback used when the host cannot report a screen size.
pub const DEFAULT_SCREEN: ScreenGeometry = ScreenGeometry {
    width: 1920,
    height: 1080,
};

/// Size of the controlled screen in pixels. Read once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenGeometry {
    pub width: u32,
    pub height: u32,
}

impl ScreenGeometry {
    pub fn new(width: u32, height: u32) -> PinchpointResult<Self> {
        if width == 0 || height == 0 {
            return Err(PinchpointError::config(format!(
                "screen geometry must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Scale a normalized landmark to whole screen pixels.
    ///
    /// Coordinates are clamped to the frame, then truncated toward zero.
    pub fn to_screen(&self, point: NormalizedPoint) -> ScreenPoint {
        let x = (point.x.clamp(0.0, 1.0) * self.width as f64).trunc();
        let y = (point.y.clamp(0.0, 1.0) * self.height as f64).trunc();
        ScreenPoint::new(x, y)
    }

    /// Whether `point` lies in the top-left fail-safe corner.
    ///
    /// With a zero margin only the exact origin (or beyond) counts.
    pub fn in_failsafe_corner(&self, point: ScreenPoint, margin_px: f64) -> bool {
        point.x <= margin_px && point.y <= margin_px
    }

    pub fn contains(&self, point: ScreenPoint) -> bool {
        (0.0..=self.width as f64).contains(&point.x) && (0.0..=self.height as f64).contains(&point.y)
    }
}

impl Default for ScreenGeometry {
    fn default() -> Self {
        DEFAULT_SCREEN
    }
}

impl fmt::Display for ScreenGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for ScreenGeometry {
    type Err = PinchpointError;

    /// Parse `WIDTHxHEIGHT`, e.g. `2560x1440`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| PinchpointError::config(format!("expected WIDTHxHEIGHT, got '{s}'")))?;
        let width = w
            .trim()
            .parse::<u32>()
            .map_err(|e| PinchpointError::config(format!("invalid screen width '{w}': {e}")))?;
        let height = h
            .trim()
            .parse::<u32>()
            .map_err(|e| PinchpointError::config(format!("invalid screen height '{h}': {e}")))?;
        Self::new(width, height)
    }
}
