//! Frame-rate independent exponential smoothing of the live transform.
//!
//! Each tick moves the live value a fraction `1 - e^(-k·dt)` of the way to
//! its target.  Two short ticks compose to exactly one long tick, so the
//! feel does not depend on the frame rate, and the approach is asymptotic:
//! no overshoot, no oscillation.

use glam::{Quat, Vec3};

use crate::integrate::Targets;

// ════════════════════════════════════════════════════════════════════════════
// LiveTransform
// ════════════════════════════════════════════════════════════════════════════

/// The transform written back to the controlled object every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveTransform {
    pub position:    Vec3,
    pub orientation: Quat,
    pub scale:       Vec3,
}

impl Default for LiveTransform {
    fn default() -> Self {
        LiveTransform { position: Vec3::ZERO, orientation: Quat::IDENTITY, scale: Vec3::ONE }
    }
}

impl LiveTransform {
    pub fn new(position: Vec3, orientation: Quat, scale: Vec3) -> Self {
        LiveTransform { position, orientation, scale }
    }

    /// Model → world for a point on the object.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.orientation * (self.scale * local)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SmoothingFilter
// ════════════════════════════════════════════════════════════════════════════

/// Fraction of the remaining distance covered in `dt` seconds at `rate`.
///
/// Zero for non-positive or non-finite `dt`.
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    1.0 - (-rate * dt).exp()
}

/// Angle between two orientations in radians, ignoring quaternion sign.
///
/// Uses `atan2` on the relative rotation so angles near zero keep their
/// precision; `acos` of the dot product rounds to zero below about 1e-3.
pub fn angle_between(a: Quat, b: Quat) -> f32 {
    let rel = a.conjugate() * b;
    2.0 * rel.xyz().length().atan2(rel.w.abs())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingFilter {
    pub rotation_rate: f32,
    pub zoom_rate:     f32,
}

impl SmoothingFilter {
    pub fn new(rotation_rate: f32, zoom_rate: f32) -> Self {
        SmoothingFilter { rotation_rate, zoom_rate }
    }

    /// Advance `live` toward `targets` by `dt` seconds.
    pub fn apply(&self, live: &mut LiveTransform, targets: &Targets, dt: f32) {
        let tr = smoothing_factor(self.rotation_rate, dt);
        let tz = smoothing_factor(self.zoom_rate, dt);

        if tr > 0.0 {
            live.orientation = live.orientation.slerp(targets.orientation(), tr).normalize();
        }
        if tz > 0.0 {
            live.scale += (targets.scale - live.scale) * tz;
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
