//! Per-tick hand samples and pinch classification.

use glam::Vec3;

// ════════════════════════════════════════════════════════════════════════════
// HandSample / TrackingFrame
// ════════════════════════════════════════════════════════════════════════════

/// Tracking identity of a physical hand.
///
/// Stable for as long as the tracker keeps the hand continuously; a hand
/// that is lost and re-acquired usually comes back with a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandId(pub i32);

/// One hand as reported by the tracker for a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandSample {
    pub id:             HandId,
    /// 0.0 (open) – 1.0 (fully pinched).
    pub pinch_strength: f32,
    /// Pinch point in the tracker's coordinate frame.
    pub pinch_position: Vec3,
}

impl HandSample {
    pub fn new(id: i32, pinch_strength: f32, pinch_position: Vec3) -> Self {
        HandSample { id: HandId(id), pinch_strength, pinch_position }
    }
}

/// Everything the tracker reports for one tick.
///
/// `left` and `right` are just two slots; continuity is keyed on
/// [`HandId`], never on which slot a hand arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackingFrame {
    pub left:      Option<HandSample>,
    pub right:     Option<HandSample>,
    /// The reset pose is currently being shown.
    pub pose_held: bool,
}

impl TrackingFrame {
    pub fn new(left: Option<HandSample>, right: Option<HandSample>) -> Self {
        TrackingFrame { left, right, pose_held: false }
    }

    /// A frame with no hands in view.
    pub fn empty() -> Self {
        TrackingFrame::default()
    }

    pub fn hand_count(&self) -> usize {
        self.left.is_some() as usize + self.right.is_some() as usize
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PinchClassifier
// ════════════════════════════════════════════════════════════════════════════

/// Threshold test on pinch strength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchClassifier {
    pub threshold: f32,
}

impl PinchClassifier {
    pub fn new(threshold: f32) -> Self {
        PinchClassifier { threshold }
    }

    /// A hand pinches iff it is present and at or above the threshold.
    pub fn is_pinching(&self, hand: Option<&HandSample>) -> bool {
        hand.is_some_and(|h| h.pinch_strength >= self.threshold)
    }

    /// The hand itself when it pinches.
    pub fn pinching<'a>(&self, hand: Option<&'a HandSample>) -> Option<&'a HandSample> {
        hand.filter(|h| self.is_pinching(Some(h)))
    }
}
