//! Hand pose classification.
//!
//! Two gestures matter: a thumb/index pinch (draw) and an open palm (erase).
//! When a hand satisfies both, the open palm wins so a user can never draw
//! while holding the hand open.

use crate::landmarks::{
    INDEX_TIP, LandmarkSet, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP, RING_PIP, RING_TIP,
    THUMB_TIP,
};

pub const DEFAULT_PINCH_THRESHOLD: f32 = 0.08;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pose {
    /// Thumb tip and index tip close together.
    Pinch,
    /// Middle, ring and pinky tips all raised above their middle joints.
    OpenPalm,
    /// Anything else.
    Neutral,
}

impl Pose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pinch => "pinch",
            Self::OpenPalm => "open-palm",
            Self::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PoseClassifier {
    /// Maximum thumb-index distance, in normalized tracker units.
    pub pinch_threshold: f32,
}

impl Default for PoseClassifier {
    fn default() -> Self {
        Self { pinch_threshold: DEFAULT_PINCH_THRESHOLD }
    }
}

impl PoseClassifier {
    pub fn new(pinch_threshold: f32) -> Self {
        Self { pinch_threshold }
    }

    pub fn classify(&self, hand: &LandmarkSet) -> Pose {
        // Open palm first: erase beats draw.
        if is_open_palm(hand) {
            Pose::OpenPalm
        } else if pinch_distance(hand) < self.pinch_threshold {
            Pose::Pinch
        } else {
            Pose::Neutral
        }
    }
}

/// Euclidean thumb-index distance in normalized space.
pub fn pinch_distance(hand: &LandmarkSet) -> f32 {
    hand.get(INDEX_TIP).distance(hand.get(THUMB_TIP))
}

/// y grows downward, so "raised" means a smaller y than the joint.
pub fn is_open_palm(hand: &LandmarkSet) -> bool {
    [(MIDDLE_TIP, MIDDLE_PIP), (RING_TIP, RING_PIP), (PINKY_TIP, PINKY_PIP)]
        .iter()
        .all(|&(tip, joint)| hand.get(tip).y < hand.get(joint).y)
}
