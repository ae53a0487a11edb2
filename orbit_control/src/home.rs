//! Home pose: captured once, restored on demand.

use glam::{EulerRot, Quat, Vec3};

use crate::integrate::{RotationIntegrator, Targets};
use crate::smoothing::LiveTransform;

/// Wrap an angle in degrees into (-180, 180].
pub fn normalize_degrees(deg: f32) -> f32 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Yaw and pitch (degrees, each in (-180, 180]) of an orientation built as
/// yaw about +Y after pitch about +X.  Roll is discarded.
pub fn yaw_pitch_degrees(q: Quat) -> (f32, f32) {
    let (yaw, pitch, _roll) = q.normalize().to_euler(EulerRot::YXZ);
    (normalize_degrees(yaw.to_degrees()), normalize_degrees(pitch.to_degrees()))
}

/// The object's transform at start-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomePose {
    position:    Vec3,
    orientation: Quat,
    scale:       Vec3,
}

impl HomePose {
    pub fn capture(live: &LiveTransform) -> Self {
        HomePose {
            position:    live.position,
            orientation: live.orientation,
            scale:       live.scale,
        }
    }

    pub fn position(&self)    -> Vec3 { self.position }
    pub fn orientation(&self) -> Quat { self.orientation }
    pub fn scale(&self)       -> Vec3 { self.scale }

    pub fn transform(&self) -> LiveTransform {
        LiveTransform::new(self.position, self.orientation, self.scale)
    }

    /// Targets that hold the object at home.  Pitch goes through the same
    /// clamp as every other pitch target.
    pub fn targets(&self, rotation: &RotationIntegrator) -> Targets {
        let (yaw, pitch) = yaw_pitch_degrees(self.orientation);
        Targets {
            yaw_deg:   yaw,
            pitch_deg: rotation.clamp_pitch(pitch),
            scale:     self.scale,
        }
    }
}
