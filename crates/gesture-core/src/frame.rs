//! Per-frame orchestration.
//!
//! One call per camera frame. With a hand present, the index tip drives
//! the cursor and the thumb–index distance drives the button. Without a
//! hand the controller state is left exactly as it was, unless the
//! configured hand-loss policy asks for a release.

use pinchpoint_common::config::{ControllerConfig, HandLossPolicy};
use pinchpoint_common::error::PinchpointResult;
use pinchpoint_gesture_model::{ClickIntent, ClickState, FrameIntents, HandLandmarks, ScreenPoint};
use pinchpoint_platform_core::ScreenGeometry;

use crate::click::ClickStateMachine;
use crate::smoother::PositionSmoother;

/// Owns all controller state for one pointer.
#[derive(Debug, Clone)]
pub struct FrameProcessor {
    smoother: PositionSmoother,
    click: ClickStateMachine,
    screen: ScreenGeometry,
    hand_loss: HandLossPolicy,
}

impl FrameProcessor {
    /// Validate the configuration and build a processor in its initial
    /// state: cursor at the origin, button released.
    pub fn new(config: &ControllerConfig, screen: ScreenGeometry) -> PinchpointResult<Self> {
        config.validate()?;
        let smoother = if config.seed_from_first_observation {
            PositionSmoother::seeded(config.smoothening_factor)?
        } else {
            PositionSmoother::new(config.smoothening_factor)?
        }
        .bounded(ScreenPoint::new(screen.width as f64, screen.height as f64));

        Ok(Self {
            smoother,
            click: ClickStateMachine::from_config(config)?,
            screen,
            hand_loss: config.hand_loss,
        })
    }

    /// Process one frame's observation.
    ///
    /// Returns `None` when there is nothing to send to the pointer sink.
    pub fn process(&mut self, observation: Option<&HandLandmarks>) -> Option<FrameIntents> {
        let Some(hand) = observation else {
            return self.on_hand_lost();
        };

        let raw = self.screen.to_screen(hand.index_tip());
        let curr = self.smoother.smooth(raw);
        let click = self.click.advance(hand.pinch_distance());

        Some(FrameIntents {
            move_to: Some(curr),
            click,
        })
    }

    /// Process a frame that may report several hands. Only the first one
    /// controls the pointer.
    pub fn process_hands(&mut self, hands: &[HandLandmarks]) -> Option<FrameIntents> {
        if hands.len() > 1 {
            tracing::trace!(hands = hands.len(), "Ignoring extra hands");
        }
        self.process(hands.first())
    }

    fn on_hand_lost(&mut self) -> Option<FrameIntents> {
        match self.hand_loss {
            HandLossPolicy::Retain => None,
            HandLossPolicy::Release => match self.click.force_release() {
                ClickIntent::None => None,
                click => {
                    tracing::info!("Hand lost while holding; releasing button");
                    Some(FrameIntents {
                        move_to: None,
                        click,
                    })
                }
            },
        }
    }

    pub fn click_state(&self) -> ClickState {
        self.click.state()
    }

    /// Last smoothed cursor position.
    pub fn smoother_state(&self) -> ScreenPoint {
        self.smoother.state()
    }

    pub fn screen(&self) -> ScreenGeometry {
        self.screen
    }
}
