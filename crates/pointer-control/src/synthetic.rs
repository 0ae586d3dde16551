//! Synthetic landmark streams.
//!
//! Produces a deterministic session without a camera: the index tip
//! traces an ellipse across the frame while the thumb pinches in and out
//! once per cycle, and the hand briefly leaves the frame. A little
//! sinusoidal jitter stands in for detector noise.

use std::f64::consts::TAU;

use pinchpoint_gesture_model::{HandLandmarks, LandmarkFrame, NormalizedPoint, StreamHeader};

/// Pinch distance while the fingers are apart.
const OPEN_DISTANCE: f64 = 0.08;
/// Pinch distance while the fingers are together.
const PINCHED_DISTANCE: f64 = 0.01;

/// Shape of a generated session.
#[derive(Debug, Clone)]
pub struct SyntheticGesture {
    pub frame_rate_hz: u32,
    pub duration_secs: f64,
    /// One glide, pinch, release, and tracking gap per cycle.
    pub cycle_secs: f64,
    /// Peak amplitude of the positional noise (normalized units).
    pub jitter: f64,
}

impl Default for SyntheticGesture {
    fn default() -> Self {
        Self {
            frame_rate_hz: 30,
            duration_secs: 9.0,
            cycle_secs: 3.0,
            jitter: 0.002,
        }
    }
}

impl SyntheticGesture {
    pub fn header(&self) -> StreamHeader {
        StreamHeader::new("simulate", self.frame_rate_hz)
    }

    /// Number of complete pinch cycles the session contains.
    pub fn full_cycles(&self) -> u64 {
        (self.duration_secs / self.cycle_secs).floor() as u64
    }

    pub fn generate(&self) -> Vec<LandmarkFrame> {
        let rate = self.frame_rate_hz.max(1) as f64;
        let count = (self.duration_secs * rate).round() as u64;

        (0..count)
            .map(|i| {
                let t = i as f64 / rate;
                let timestamp_ns = (i as f64 * 1_000_000_000.0 / rate) as u64;
                let phase = (t % self.cycle_secs) / self.cycle_secs;
                if hand_hidden(phase) {
                    LandmarkFrame::empty(timestamp_ns)
                } else {
                    LandmarkFrame::with_hand(timestamp_ns, self.hand_at(i, t, phase))
                }
            })
            .collect()
    }

    fn hand_at(&self, frame: u64, t: f64, phase: f64) -> HandLandmarks {
        let angle = TAU * t / self.cycle_secs;
        let noise_x = self.jitter * (frame as f64 * 1.7).sin();
        let noise_y = self.jitter * (frame as f64 * 2.3).cos();

        let index = NormalizedPoint::new(
            0.5 + 0.3 * angle.cos() + noise_x,
            0.5 + 0.25 * angle.sin() + noise_y,
        );
        let d = pinch_distance_at(phase);
        // Thumb sits below-left of the index tip
        let thumb = NormalizedPoint::new(index.x - 0.8 * d, index.y + 0.6 * d);
        let wrist = NormalizedPoint::new(index.x, (index.y + 0.25).min(1.0));

        HandLandmarks::from_tips(wrist, thumb, index)
    }
}

/// Tracking drops out for a short window late in each cycle.
fn hand_hidden(phase: f64) -> bool {
    (0.80..0.86).contains(&phase)
}

/// Open, ramp closed, hold, ramp open, stay open.
fn pinch_distance_at(phase: f64) -> f64 {
    let lerp = |from: f64, to: f64, start: f64, end: f64| {
        let k = ((phase - start) / (end - start)).clamp(0.0, 1.0);
        from + (to - from) * k
    };
    match phase {
        p if p < 0.27 => OPEN_DISTANCE,
        p if p < 0.33 => lerp(OPEN_DISTANCE, PINCHED_DISTANCE, 0.27, 0.33),
        p if p < 0.53 => PINCHED_DISTANCE,
        p if p < 0.60 => lerp(PINCHED_DISTANCE, OPEN_DISTANCE, 0.53, 0.60),
        _ => OPEN_DISTANCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_count_and_timestamps() {
        let gesture = SyntheticGesture {
            duration_secs: 2.0,
            ..SyntheticGesture::default()
        };
        let frames = gesture.generate();
        assert_eq!(frames.len(), 60);
        assert_eq!(frames[0].timestamp_ns, 0);
        assert_eq!(frames[30].timestamp_ns, 1_000_000_000);
        assert!(frames.windows(2).all(|w| w[0].timestamp_ns < w[1].timestamp_ns));
    }

    #[test]
    fn test_contains_gaps_and_pinches() {
        let frames = SyntheticGesture::default().generate();
        assert!(frames.iter().any(|f| f.hands.is_empty()));
        let distances: Vec<f64> = frames
            .iter()
            .filter_map(|f| f.primary_hand().map(HandLandmarks::pinch_distance))
            .collect();
        assert!(distances.iter().any(|&d| d < 0.02));
        assert!(distances.iter().any(|&d| d > 0.07));
    }

    #[test]
    fn test_pinch_profile() {
        assert_eq!(pinch_distance_at(0.0), OPEN_DISTANCE);
        assert_eq!(pinch_distance_at(0.4), PINCHED_DISTANCE);
        assert!((pinch_distance_at(0.30) - 0.045).abs() < 1e-9);
        assert_eq!(pinch_distance_at(0.9), OPEN_DISTANCE);
    }

    #[test]
    fn test_full_cycles() {
        assert_eq!(SyntheticGesture::default().full_cycles(), 3);
    }
}
