//! Screen-space pointer types and the intents sent to the pointer sink.

use serde::{Deserialize, Serialize};

/// Monotonic timestamp in nanoseconds since session start.
pub type TimestampNs = u64;

/// A position on screen in pixels. Fractional values are allowed; the
/// smoother produces sub-pixel output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const ORIGIN: ScreenPoint = ScreenPoint { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &ScreenPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Whether the pinch gesture currently holds the primary button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClickState {
    #[default]
    Moving,
    Holding,
}

impl ClickState {
    /// Overlay label for the state.
    pub fn label(&self) -> &'static str {
        match self {
            ClickState::Moving => "MOVE",
            ClickState::Holding => "HOLD",
        }
    }

    pub fn is_holding(&self) -> bool {
        matches!(self, ClickState::Holding)
    }
}

/// Button-side result of one pinch evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClickIntent {
    #[default]
    None,
    ButtonDown,
    ButtonUp,
}

impl ClickIntent {
    pub fn is_none(&self) -> bool {
        matches!(self, ClickIntent::None)
    }
}

/// A single command toward the pointer-control sink.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerIntent {
    MoveTo { x: f64, y: f64 },
    ButtonDown,
    ButtonUp,
    None,
}

impl PointerIntent {
    pub fn move_to(point: ScreenPoint) -> Self {
        PointerIntent::MoveTo {
            x: point.x,
            y: point.y,
        }
    }

    /// Target of a move, if this intent is one.
    pub fn target(&self) -> Option<ScreenPoint> {
        match *self {
            PointerIntent::MoveTo { x, y } => Some(ScreenPoint::new(x, y)),
            _ => None,
        }
    }
}

impl From<ClickIntent> for PointerIntent {
    fn from(intent: ClickIntent) -> Self {
        match intent {
            ClickIntent::None => PointerIntent::None,
            ClickIntent::ButtonDown => PointerIntent::ButtonDown,
            ClickIntent::ButtonUp => PointerIntent::ButtonUp,
        }
    }
}

/// Everything one frame asks of the pointer sink.
///
/// `move_to` is present whenever a hand was observed. It is absent only
/// when a hand-loss release fires on a frame without a hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameIntents {
    pub move_to: Option<ScreenPoint>,
    pub click: ClickIntent,
}

impl FrameIntents {
    /// Intents in issue order: the move first, then the button.
    pub fn to_intents(&self) -> Vec<PointerIntent> {
        let mut intents = Vec::with_capacity(2);
        if let Some(point) = self.move_to {
            intents.push(PointerIntent::move_to(point));
        }
        if !self.click.is_none() {
            intents.push(self.click.into());
        }
        intents
    }
}

/// An intent stamped with the frame it was produced on, as written to
/// the intent log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedIntent {
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    #[serde(flatten)]
    pub intent: PointerIntent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_labels() {
        assert_eq!(ClickState::default(), ClickState::Moving);
        assert_eq!(ClickState::Moving.label(), "MOVE");
        assert_eq!(ClickState::Holding.label(), "HOLD");
        assert!(ClickState::Holding.is_holding());
    }

    #[test]
    fn test_frame_intents_order() {
        let frame = FrameIntents {
            move_to: Some(ScreenPoint::new(10.0, 20.0)),
            click: ClickIntent::ButtonDown,
        };
        assert_eq!(
            frame.to_intents(),
            vec![
                PointerIntent::MoveTo { x: 10.0, y: 20.0 },
                PointerIntent::ButtonDown
            ]
        );

        let move_only = FrameIntents {
            move_to: Some(ScreenPoint::new(1.0, 2.0)),
            click: ClickIntent::None,
        };
        assert_eq!(move_only.to_intents().len(), 1);

        let release_only = FrameIntents {
            move_to: None,
            click: ClickIntent::ButtonUp,
        };
        assert_eq!(release_only.to_intents(), vec![PointerIntent::ButtonUp]);
    }

    #[test]
    fn test_timed_intent_json_shape() {
        let timed = TimedIntent {
            timestamp_ns: 33_000_000,
            intent: PointerIntent::MoveTo { x: 12.5, y: 40.0 },
        };
        let json = serde_json::to_string(&timed).unwrap();
        assert_eq!(json, r#"{"t":33000000,"type":"move_to","x":12.5,"y":40.0}"#);

        let down = TimedIntent {
            timestamp_ns: 0,
            intent: PointerIntent::ButtonDown,
        };
        assert_eq!(
            serde_json::to_string(&down).unwrap(),
            r#"{"t":0,"type":"button_down"}"#
        );
    }

    #[test]
    fn test_intent_target() {
        assert_eq!(
            PointerIntent::MoveTo { x: 3.0, y: 4.0 }.target(),
            Some(ScreenPoint::new(3.0, 4.0))
        );
        assert_eq!(PointerIntent::ButtonUp.target(), None);
    }
}
