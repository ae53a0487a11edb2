//! Reference frames: where a pinch sample lives, and where the camera sees it.
//!
//! Raw pinch positions arrive either in the tracking provider's own frame or
//! already in world space.  Rotation deltas are measured in the camera's
//! local frame so that "hand moves right" is always +X regardless of how the
//! camera is oriented in the world.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::PinchSpace;

// ════════════════════════════════════════════════════════════════════════════
// Pose
// ════════════════════════════════════════════════════════════════════════════

/// A rigid frame: position plus orientation, no scale.
///
/// Used for the camera and the tracking provider.  Local axes follow the
/// usual viewer convention: +X right, +Y up, +Z forward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position:    Vec3,
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Pose = Pose { position: Vec3::ZERO, orientation: Quat::IDENTITY };

    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Pose { position, orientation }
    }

    /// A pose at `eye` whose +Z axis points at `target`.
    ///
    /// Falls back to the identity orientation when `eye == target`, and to
    /// an arbitrary stable roll when looking straight along `up`.
    pub fn looking_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let Some(forward) = (target - eye).try_normalize() else {
            return Pose::new(eye, Quat::IDENTITY);
        };
        let right = up.cross(forward).try_normalize()
            .unwrap_or_else(|| forward.any_orthonormal_vector());
        let true_up = forward.cross(right);
        let basis = glam::Mat3::from_cols(right, true_up, forward);
        Pose::new(eye, Quat::from_mat3(&basis).normalize())
    }

    /// Local → world.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.orientation * local
    }

    /// World → local.
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        self.orientation.inverse() * (world - self.position)
    }

    pub fn right(&self)   -> Vec3 { self.orientation * Vec3::X }
    pub fn up(&self)      -> Vec3 { self.orientation * Vec3::Y }
    pub fn forward(&self) -> Vec3 { self.orientation * Vec3::Z }
}

// ════════════════════════════════════════════════════════════════════════════
// ReferenceFrame — the adapter used by the arbiter
// ════════════════════════════════════════════════════════════════════════════

/// Converts raw pinch samples into world and camera-relative points.
///
/// Stateless apart from the provider pose and the coordinate toggle, both
/// fixed by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFrame {
    pub space:    PinchSpace,
    pub provider: Pose,
}

impl ReferenceFrame {
    pub fn new(space: PinchSpace, provider: Pose) -> Self {
        ReferenceFrame { space, provider }
    }

    /// Raw sample → world space.
    pub fn to_world(&self, raw: Vec3) -> Vec3 {
        match self.space {
            PinchSpace::ProviderLocal => self.provider.transform_point(raw),
            PinchSpace::World         => raw,
        }
    }

    /// Raw sample → camera-local coordinates.
    pub fn to_camera(&self, raw: Vec3, camera: &Pose) -> Vec3 {
        camera.inverse_transform_point(self.to_world(raw))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
