//! Gesture mode arbitration.
//!
//! Each tick the arbiter looks at which hands pinch and decides between
//! Idle, one-hand Rotate and two-hand Zoom.  Two-hand zoom always wins.
//!
//! Entry is two-phase: the tick that enters a mode only captures its
//! baseline and yields [`GestureStep::Entered`]; motion starts on the next
//! tick.  That keeps a fresh gesture from producing a delta against some
//! unrelated earlier hand position.

use glam::Vec3;
use tracing::debug;

use crate::frame::{Pose, ReferenceFrame};
use crate::hand::{HandId, PinchClassifier, TrackingFrame};

/// Smallest inter-hand distance accepted as a zoom baseline (metres).
pub const MIN_BASELINE_DISTANCE: f32 = 1e-4;

// ════════════════════════════════════════════════════════════════════════════
// GestureMode
// ════════════════════════════════════════════════════════════════════════════

/// Baseline of a one-hand rotate gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateState {
    /// Hand driving the gesture.
    pub hand:              HandId,
    /// Its pinch point on the previous tick, camera-relative.
    pub last_pinch_camera: Vec3,
}

/// Baseline of a two-hand zoom gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    /// World distance between the pinch points at entry (floored).
    pub baseline_distance: f32,
    /// Live scale at entry.
    pub baseline_scale:    Vec3,
}

/// Active gesture, carrying exactly the baseline that gesture needs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureMode {
    #[default]
    Idle,
    Rotate(RotateState),
    Zoom(ZoomState),
}

/// Payload-free tag of a [`GestureMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind { Idle, Rotate, Zoom }

impl GestureMode {
    pub fn kind(&self) -> GestureKind {
        match self {
            GestureMode::Idle      => GestureKind::Idle,
            GestureMode::Rotate(_) => GestureKind::Rotate,
            GestureMode::Zoom(_)   => GestureKind::Zoom,
        }
    }
}

impl GestureKind {
    pub fn name(self) -> &'static str {
        match self {
            GestureKind::Idle   => "idle",
            GestureKind::Rotate => "rotate",
            GestureKind::Zoom   => "zoom",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GestureStep — what the integrators should do this tick
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureStep {
    /// No hand pinches.
    Idle,
    /// A gesture began (or restarted); baseline captured, no motion.
    Entered(GestureKind),
    /// One-tick camera-relative displacement of the rotating hand.
    Rotate { delta: Vec3 },
    /// Current / baseline inter-hand distance, and the scale at entry.
    Zoom { ratio: f32, baseline_scale: Vec3 },
}

// ════════════════════════════════════════════════════════════════════════════
// ModeArbiter
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct ModeArbiter {
    classifier: PinchClassifier,
    mode:       GestureMode,
}

impl ModeArbiter {
    pub fn new(classifier: PinchClassifier) -> Self {
        ModeArbiter { classifier, mode: GestureMode::Idle }
    }

    pub fn mode(&self) -> &GestureMode { &self.mode }

    /// Drop any gesture in progress.
    pub fn clear(&mut self) {
        if self.mode != GestureMode::Idle {
            debug!(from = self.mode.kind().name(), "gesture cleared");
        }
        self.mode = GestureMode::Idle;
    }

    /// Decide this tick's mode and the step the integrators should apply.
    ///
    /// `live_scale` is only read when a zoom gesture starts.
    pub fn arbitrate(
        &mut self,
        frame:      &TrackingFrame,
        reference:  &ReferenceFrame,
        camera:     &Pose,
        live_scale: Vec3,
    ) -> GestureStep {
        let left  = self.classifier.pinching(frame.left.as_ref());
        let right = self.classifier.pinching(frame.right.as_ref());
        let previous = self.mode.kind();

        let step = match (left, right) {
            // ── two hands: zoom ───────────────────────────────────────────
            (Some(l), Some(r)) => {
                let dist = reference.to_world(l.pinch_position)
                    .distance(reference.to_world(r.pinch_position));

                match self.mode {
                    GestureMode::Zoom(zoom) => GestureStep::Zoom {
                        ratio:          dist / zoom.baseline_distance,
                        baseline_scale: zoom.baseline_scale,
                    },
                    _ => {
                        self.mode = GestureMode::Zoom(ZoomState {
                            baseline_distance: dist.max(MIN_BASELINE_DISTANCE),
                            baseline_scale:    live_scale,
                        });
                        GestureStep::Entered(GestureKind::Zoom)
                    }
                }
            }

            // ── one hand: rotate ──────────────────────────────────────────
            (Some(hand), None) | (None, Some(hand)) => {
                let pinch_cam = reference.to_camera(hand.pinch_position, camera);

                match self.mode {
                    GestureMode::Rotate(rot) if rot.hand == hand.id => {
                        self.mode = GestureMode::Rotate(RotateState {
                            last_pinch_camera: pinch_cam,
                            ..rot
                        });
                        GestureStep::Rotate { delta: pinch_cam - rot.last_pinch_camera }
                    }
                    _ => {
                        self.mode = GestureMode::Rotate(RotateState {
                            hand:              hand.id,
                            last_pinch_camera: pinch_cam,
                        });
                        GestureStep::Entered(GestureKind::Rotate)
                    }
                }
            }

            // ── nobody pinching ───────────────────────────────────────────
            (None, None) => {
                self.mode = GestureMode::Idle;
                GestureStep::Idle
            }
        };

        if let GestureStep::Entered(kind) = step {
            debug!(from = previous.name(), to = kind.name(), "gesture entered");
        } else if previous != self.mode.kind() {
            debug!(from = previous.name(), to = self.mode.kind().name(), "gesture ended");
        }

        step
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
