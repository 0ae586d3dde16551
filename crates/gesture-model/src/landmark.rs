//! Hand landmark types.
//!
//! A tracked hand is reported as 21 keypoints in the conventional hand
//! landmark order (wrist first, then four joints per digit from thumb to
//! pinky). Only the thumb tip and index tip drive the pointer.

use serde::{Deserialize, Serialize};

/// Number of keypoints in a tracked hand.
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;

/// A landmark position relative to the camera frame.
///
/// `(0.0, 0.0)` is the top-left corner, `(1.0, 1.0)` the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in normalized frame space.
    pub fn distance_to(&self, other: &NormalizedPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Reflect across the vertical centre line of the frame.
    pub fn mirrored(&self) -> Self {
        Self {
            x: 1.0 - self.x,
            y: self.y,
        }
    }
}

/// Rejected landmark list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {LANDMARK_COUNT} hand landmarks, got {actual}")]
pub struct LandmarkCountError {
    pub actual: usize,
}

/// The 21 keypoints of one tracked hand.
///
/// Construction enforces the landmark count, so `thumb_tip` and
/// `index_tip` never index out of bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<NormalizedPoint>", into = "Vec<NormalizedPoint>")]
pub struct HandLandmarks {
    points: Vec<NormalizedPoint>,
}

impl HandLandmarks {
    pub fn new(points: Vec<NormalizedPoint>) -> Result<Self, LandmarkCountError> {
        if points.len() != LANDMARK_COUNT {
            return Err(LandmarkCountError {
                actual: points.len(),
            });
        }
        Ok(Self { points })
    }

    /// Build a hand where every keypoint sits at `rest`, except the thumb
    /// and index tips. Used by synthetic streams and tests.
    pub fn from_tips(rest: NormalizedPoint, thumb: NormalizedPoint, index: NormalizedPoint) -> Self {
        let mut points = vec![rest; LANDMARK_COUNT];
        points[THUMB_TIP] = thumb;
        points[INDEX_TIP] = index;
        Self { points }
    }

    pub fn points(&self) -> &[NormalizedPoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<NormalizedPoint> {
        self.points.get(index).copied()
    }

    pub fn thumb_tip(&self) -> NormalizedPoint {
        self.points[THUMB_TIP]
    }

    pub fn index_tip(&self) -> NormalizedPoint {
        self.points[INDEX_TIP]
    }

    /// Distance between thumb tip and index tip, the click gesture signal.
    pub fn pinch_distance(&self) -> f64 {
        self.thumb_tip().distance_to(&self.index_tip())
    }

    /// The same hand as seen in a horizontally flipped frame.
    pub fn mirrored(&self) -> Self {
        Self {
            points: self.points.iter().map(NormalizedPoint::mirrored).collect(),
        }
    }
}

impl TryFrom<Vec<NormalizedPoint>> for HandLandmarks {
    type Error = LandmarkCountError;

    fn try_from(points: Vec<NormalizedPoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<HandLandmarks> for Vec<NormalizedPoint> {
    fn from(hand: HandLandmarks) -> Self {
        hand.points
    }
}
