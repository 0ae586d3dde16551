//! Cursor position smoothing.
//!
//! Each frame moves the cursor a fixed fraction of the way toward the raw
//! fingertip position:
//!
//! ```text
//! curr = prev + (raw - prev) / smoothening_factor
//! ```
//!
//! applied per axis. A single-frame outlier shifts the output by at most
//! `1 / smoothening_factor` of the jump.
//!
//! Factors below 1 step past the target every frame, and at 0.5 or below
//! the error grows. A bounded smoother clamps its state to the screen so
//! the cursor cannot leave it either way.

use pinchpoint_common::config::validate_smoothening_factor;
use pinchpoint_common::error::PinchpointResult;
use pinchpoint_gesture_model::ScreenPoint;

/// Stateful exponential smoother for screen positions.
#[derive(Debug, Clone)]
pub struct PositionSmoother {
    factor: f64,
    prev: ScreenPoint,
    /// When set, the next observation is taken as-is and becomes `prev`.
    seed_pending: bool,
    /// Bottom-right corner of the allowed region; the top-left is the origin.
    bounds: Option<ScreenPoint>,
}

impl PositionSmoother {
    /// Create a smoother starting at the screen origin.
    ///
    /// The first frames glide in from `(0, 0)` toward the real fingertip.
    pub fn new(smoothening_factor: f64) -> PinchpointResult<Self> {
        validate_smoothening_factor(smoothening_factor)?;
        if smoothening_factor < 1.0 {
            tracing::warn!(
                smoothening_factor,
                "smoothening_factor below 1 overshoots the target each frame"
            );
        }
        Ok(Self {
            factor: smoothening_factor,
            prev: ScreenPoint::ORIGIN,
            seed_pending: false,
            bounds: None,
        })
    }

    /// Create a smoother that adopts the first observation directly,
    /// avoiding the glide in from the origin.
    pub fn seeded(smoothening_factor: f64) -> PinchpointResult<Self> {
        let mut smoother = Self::new(smoothening_factor)?;
        smoother.seed_pending = true;
        Ok(smoother)
    }

    /// Keep every output inside `(0, 0)..=max`.
    pub fn bounded(mut self, max: ScreenPoint) -> Self {
        self.bounds = Some(max);
        self
    }

    /// Feed one raw position and return the smoothed one.
    pub fn smooth(&mut self, raw: ScreenPoint) -> ScreenPoint {
        let curr = if self.seed_pending {
            self.seed_pending = false;
            raw
        } else {
            ScreenPoint::new(
                self.prev.x + (raw.x - self.prev.x) / self.factor,
                self.prev.y + (raw.y - self.prev.y) / self.factor,
            )
        };
        let curr = match self.bounds {
            Some(max) => ScreenPoint::new(curr.x.clamp(0.0, max.x), curr.y.clamp(0.0, max.y)),
            None => curr,
        };
        self.prev = curr;
        curr
    }

    /// Last smoothed position.
    pub fn state(&self) -> ScreenPoint {
        self.prev
    }

    /// Return to the origin. A seeded smoother seeds again on its next call.
    pub fn reset(&mut self, reseed: bool) {
        self.prev = ScreenPoint::ORIGIN;
        self.seed_pending = reseed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_call_glides_from_origin() {
        let mut smoother = PositionSmoother::new(5.0).unwrap();
        let out = smoother.smooth(ScreenPoint::new(1000.0, 500.0));
        assert_eq!(out, ScreenPoint::new(200.0, 100.0));
        assert_eq!(smoother.state(), out);

        let out = smoother.smooth(ScreenPoint::new(1000.0, 500.0));
        assert_eq!(out, ScreenPoint::new(360.0, 180.0));
    }

    #[test]
    fn test_seeded_adopts_first_observation() {
        let mut smoother = PositionSmoother::seeded(5.0).unwrap();
        let first = smoother.smooth(ScreenPoint::new(640.0, 360.0));
        assert_eq!(first, ScreenPoint::new(640.0, 360.0));

        let next = smoother.smooth(ScreenPoint::new(690.0, 360.0));
        assert_eq!(next, ScreenPoint::new(650.0, 360.0));
    }

    #[test]
    fn test_factor_of_one_tracks_raw_exactly() {
        let mut smoother = PositionSmoother::new(1.0).unwrap();
        let raw = ScreenPoint::new(12.0, 34.0);
        assert_eq!(smoother.smooth(raw), raw);
    }

    #[test]
    fn test_rejects_invalid_factor() {
        assert!(PositionSmoother::new(0.0).is_err());
        assert!(PositionSmoother::new(-5.0).is_err());
        assert!(PositionSmoother::seeded(f64::NAN).is_err());
    }

    #[test]
    fn test_outlier_perturbation_is_bounded() {
        let mut smoother = PositionSmoother::seeded(5.0).unwrap();
        smoother.smooth(ScreenPoint::new(500.0, 500.0));

        // One-frame spike of 1000px on x
        let out = smoother.smooth(ScreenPoint::new(1500.0, 500.0));
        assert!((out.x - 500.0) <= 1000.0 / 5.0 + 1e-9);
        assert_eq!(out.y, 500.0);
    }

    #[test]
    fn test_bounded_low_factor_stays_on_screen() {
        let max = ScreenPoint::new(1000.0, 800.0);
        let mut smoother = PositionSmoother::new(0.25).unwrap().bounded(max);

        // Unbounded, the first step would land at (4000, 3200)
        let out = smoother.smooth(ScreenPoint::new(1000.0, 800.0));
        assert_eq!(out, max);
        assert_eq!(smoother.smooth(ScreenPoint::new(1000.0, 800.0)), max);

        let out = smoother.smooth(ScreenPoint::new(0.0, 800.0));
        assert_eq!(out, ScreenPoint::new(0.0, 800.0));
    }

    #[test]
    fn test_reset() {
        let mut smoother = PositionSmoother::new(4.0).unwrap();
        smoother.smooth(ScreenPoint::new(400.0, 400.0));
        smoother.reset(true);
        assert_eq!(smoother.state(), ScreenPoint::ORIGIN);
        assert_eq!(
            smoother.smooth(ScreenPoint::new(80.0, 80.0)),
            ScreenPoint::new(80.0, 80.0)
        );
    }

    proptest! {
        #[test]
        fn converges_to_constant_target(
            factor in 1.5f64..20.0,
            tx in 0.0f64..3840.0,
            ty in 0.0f64..2160.0,
        ) {
            let target = ScreenPoint::new(tx, ty);
            let mut smoother = PositionSmoother::new(factor).unwrap();
            let mut last = smoother.state().distance_to(&target);

            for _ in 0..2000 {
                let out = smoother.smooth(target);
                let dist = out.distance_to(&target);
                if last > 1e-6 {
                    prop_assert!(dist < last, "distance {} did not shrink from {}", dist, last);
                } else {
                    prop_assert!(dist <= last);
                }
                last = dist;
            }
            prop_assert!(last < 1e-6);
        }

        #[test]
        fn bounded_output_never_leaves_screen(
            factor in 0.01f64..1.0,
            targets in proptest::collection::vec((0.0f64..=1920.0, 0.0f64..=1080.0), 1..64),
        ) {
            let max = ScreenPoint::new(1920.0, 1080.0);
            let mut smoother = PositionSmoother::new(factor).unwrap().bounded(max);
            for (x, y) in targets {
                let out = smoother.smooth(ScreenPoint::new(x, y));
                prop_assert!((0.0..=max.x).contains(&out.x) && (0.0..=max.y).contains(&out.y));
            }
        }

        #[test]
        fn never_overshoots_a_jump(
            factor in 1.5f64..50.0,
            px in 0.0f64..4000.0, py in 0.0f64..4000.0,
            dx in 0.01f64..2000.0, dy in 0.01f64..2000.0,
            flip_x: bool, flip_y: bool,
        ) {
            let prev = ScreenPoint::new(px, py);
            let raw = ScreenPoint::new(
                if flip_x { px - dx } else { px + dx },
                if flip_y { py - dy } else { py + dy },
            );

            let mut smoother = PositionSmoother::seeded(factor).unwrap();
            smoother.smooth(prev);
            let out = smoother.smooth(raw);

            prop_assert!(out.x > prev.x.min(raw.x) && out.x < prev.x.max(raw.x));
            prop_assert!(out.y > prev.y.min(raw.y) && out.y < prev.y.max(raw.y));
        }
    }
}
