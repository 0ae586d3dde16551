//! Pinch-to-click state machine.
//!
//! ```text
//!            d < click_distance
//!   Moving ───────────────────────▶ Holding
//!     ▲          (ButtonDown)          │
//!     │                                │
//!     └────────────────────────────────┘
//!            d > release_distance
//!               (ButtonUp)
//! ```
//!
//! Distances in `[click_distance, release_distance]` never change state,
//! so a pinch hovering around either threshold cannot chatter.

use pinchpoint_common::config::{validate_thresholds, ControllerConfig};
use pinchpoint_common::error::PinchpointResult;
use pinchpoint_gesture_model::{ClickIntent, ClickState};

/// Two-state hysteresis machine driven by pinch distance.
#[derive(Debug, Clone)]
pub struct ClickStateMachine {
    click_distance: f64,
    release_distance: f64,
    state: ClickState,
}

impl ClickStateMachine {
    /// Create a machine in the `Moving` state.
    pub fn new(click_distance: f64, release_distance: f64) -> PinchpointResult<Self> {
        validate_thresholds(click_distance, release_distance)?;
        Ok(Self {
            click_distance,
            release_distance,
            state: ClickState::Moving,
        })
    }

    pub fn from_config(config: &ControllerConfig) -> PinchpointResult<Self> {
        Self::new(config.click_distance, config.release_distance)
    }

    /// Evaluate one pinch distance. At most one transition happens per call.
    pub fn advance(&mut self, distance: f64) -> ClickIntent {
        match self.state {
            ClickState::Moving if distance < self.click_distance => {
                self.state = ClickState::Holding;
                tracing::debug!(distance, state = self.state.label(), "Pinch engaged");
                ClickIntent::ButtonDown
            }
            ClickState::Holding if distance > self.release_distance => {
                self.state = ClickState::Moving;
                tracing::debug!(distance, state = self.state.label(), "Pinch released");
                ClickIntent::ButtonUp
            }
            _ => ClickIntent::None,
        }
    }

    /// Release a held button regardless of distance.
    ///
    /// Returns `ButtonUp` only if the machine was holding.
    pub fn force_release(&mut self) -> ClickIntent {
        match self.state {
            ClickState::Holding => {
                self.state = ClickState::Moving;
                tracing::debug!(state = self.state.label(), "Pinch force-released");
                ClickIntent::ButtonUp
            }
            ClickState::Moving => ClickIntent::None,
        }
    }

    pub fn state(&self) -> ClickState {
        self.state
    }

    pub fn click_distance(&self) -> f64 {
        self.click_distance
    }

    pub fn release_distance(&self) -> f64 {
        self.release_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reference_machine() -> ClickStateMachine {
        ClickStateMachine::new(0.025, 0.045).unwrap()
    }

    #[test]
    fn test_dead_zone_sequence_has_no_transitions() {
        let mut machine = reference_machine();
        for d in [0.03, 0.035, 0.03, 0.04] {
            assert_eq!(machine.advance(d), ClickIntent::None);
            assert_eq!(machine.state(), ClickState::Moving);
        }
    }

    #[test]
    fn test_click_release_round_trip() {
        let mut machine = reference_machine();
        let intents: Vec<ClickIntent> = [0.05, 0.02, 0.05]
            .into_iter()
            .map(|d| machine.advance(d))
            .collect();
        assert_eq!(
            intents,
            vec![ClickIntent::None, ClickIntent::ButtonDown, ClickIntent::ButtonUp]
        );
        assert_eq!(machine.state(), ClickState::Moving);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let mut machine = reference_machine();
        assert_eq!(machine.advance(0.025), ClickIntent::None);
        assert_eq!(machine.state(), ClickState::Moving);

        assert_eq!(machine.advance(0.0249), ClickIntent::ButtonDown);
        assert_eq!(machine.advance(0.045), ClickIntent::None);
        assert_eq!(machine.state(), ClickState::Holding);

        assert_eq!(machine.advance(0.0451), ClickIntent::ButtonUp);
    }

    #[test]
    fn test_holding_stays_held_while_pinched() {
        let mut machine = reference_machine();
        assert_eq!(machine.advance(0.01), ClickIntent::ButtonDown);
        for d in [0.0, 0.01, 0.02, 0.04] {
            assert_eq!(machine.advance(d), ClickIntent::None);
        }
        assert!(machine.state().is_holding());
    }

    #[test]
    fn test_force_release() {
        let mut machine = reference_machine();
        assert_eq!(machine.force_release(), ClickIntent::None);
        machine.advance(0.0);
        assert_eq!(machine.force_release(), ClickIntent::ButtonUp);
        assert_eq!(machine.state(), ClickState::Moving);
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        assert!(ClickStateMachine::new(0.045, 0.025).is_err());
        assert!(ClickStateMachine::new(0.03, 0.03).is_err());
        let config = ControllerConfig::default();
        let machine = ClickStateMachine::from_config(&config).unwrap();
        assert_eq!(machine.click_distance(), 0.025);
        assert_eq!(machine.release_distance(), 0.045);
    }

    proptest! {
        #[test]
        fn dead_zone_is_sticky_from_either_state(
            start_holding: bool,
            distances in proptest::collection::vec(0.025f64..=0.045, 1..64),
        ) {
            let mut machine = reference_machine();
            if start_holding {
                machine.advance(0.0);
            }
            let start = machine.state();
            for d in distances {
                prop_assert_eq!(machine.advance(d), ClickIntent::None);
                prop_assert_eq!(machine.state(), start);
            }
        }

        #[test]
        fn intents_alternate_down_then_up(
            distances in proptest::collection::vec(0.0f64..0.1, 0..128),
        ) {
            let mut machine = reference_machine();
            let mut expect_down = true;
            for d in distances {
                match machine.advance(d) {
                    ClickIntent::ButtonDown => {
                        prop_assert!(expect_down);
                        expect_down = false;
                    }
                    ClickIntent::ButtonUp => {
                        prop_assert!(!expect_down);
                        expect_down = true;
                    }
                    ClickIntent::None => {}
                }
            }
        }
    }
}
