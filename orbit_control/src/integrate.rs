//! Rotation and zoom integrators: turn gesture steps into targets.

use glam::{EulerRot, Quat, Vec3};

use crate::config::{RotateConfig, ZoomConfig};

// ════════════════════════════════════════════════════════════════════════════
// Targets
// ════════════════════════════════════════════════════════════════════════════

/// Where the smoothing filter is heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Targets {
    pub yaw_deg:   f32,
    pub pitch_deg: f32,
    /// Uniform across axes once zoom has written it.
    pub scale:     Vec3,
}

impl Targets {
    /// Target orientation: yaw about +Y after pitch about +X, no roll.
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw_deg.to_radians(),
            self.pitch_deg.to_radians(),
            0.0,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// RotationIntegrator
// ════════════════════════════════════════════════════════════════════════════

/// Accumulates yaw/pitch from camera-relative hand motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationIntegrator {
    pub degrees_per_meter: f32,
    pub pitch_min:         f32,
    pub pitch_max:         f32,
}

impl RotationIntegrator {
    pub fn from_config(cfg: &RotateConfig) -> Self {
        RotationIntegrator {
            degrees_per_meter: cfg.degrees_per_meter,
            pitch_min:         cfg.pitch_min,
            pitch_max:         cfg.pitch_max,
        }
    }

    /// Right → more yaw, up → less pitch (the board tips away from the hand).
    pub fn apply(&self, targets: &mut Targets, delta: Vec3) {
        targets.yaw_deg += delta.x * self.degrees_per_meter;
        targets.pitch_deg = self.clamp_pitch(targets.pitch_deg - delta.y * self.degrees_per_meter);
    }

    pub fn clamp_pitch(&self, pitch_deg: f32) -> f32 {
        pitch_deg.clamp(self.pitch_min, self.pitch_max)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ZoomIntegrator
// ════════════════════════════════════════════════════════════════════════════

/// Derives a uniform scale from the inter-hand distance ratio.
///
/// Relative to the gesture's start, never cumulative, so holding the hands
/// still cannot drift the scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomIntegrator {
    pub enabled:   bool,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl ZoomIntegrator {
    pub fn from_config(cfg: &ZoomConfig) -> Self {
        ZoomIntegrator {
            enabled:   cfg.scale_board,
            min_scale: cfg.min_scale,
            max_scale: cfg.max_scale,
        }
    }

    pub fn apply(&self, targets: &mut Targets, ratio: f32, baseline_scale: Vec3) {
        if !self.enabled {
            return;
        }
        let desired = baseline_scale * ratio;
        targets.scale = Vec3::splat(self.clamp_scale(desired.x));
    }

    pub fn clamp_scale(&self, s: f32) -> f32 {
        s.clamp(self.min_scale, self.max_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets() -> Targets {
        Targets { yaw_deg: 0.0, pitch_deg: 0.0, scale: Vec3::ONE }
    }

    #[test]
    fn rotate_sensitivity_scenario() {
        let ri = RotationIntegrator::from_config(&RotateConfig::default());
        let mut t = targets();
        ri.apply(&mut t, Vec3::new(0.01, -0.02, 0.0));
        assert!((t.yaw_deg - 3.0).abs() < 1e-4);
        assert!((t.pitch_deg - 6.0).abs() < 1e-4);
    }

    #[test]
    fn depth_motion_is_ignored() {
        let ri = RotationIntegrator::from_config(&RotateConfig::default());
        let mut t = targets();
        ri.apply(&mut t, Vec3::new(0.0, 0.0, 0.3));
        assert_eq!(t, targets());
    }

    #[test]
    fn pitch_clamps_both_ways() {
        let ri = RotationIntegrator::from_config(&RotateConfig::default());
        let mut t = targets();
        ri.apply(&mut t, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(t.pitch_deg, 70.0);
        ri.apply(&mut t, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(t.pitch_deg, -70.0);
    }

    #[test]
    fn yaw_is_unbounded() {
        let ri = RotationIntegrator::from_config(&RotateConfig::default());
        let mut t = targets();
        for _ in 0..10 { ri.apply(&mut t, Vec3::new(1.0, 0.0, 0.0)); }
        assert!((t.yaw_deg - 3000.0).abs() < 1e-2);
    }

    #[test]
    fn zoom_scenario_ratio_one_and_a_half() {
        let zi = ZoomIntegrator::from_config(&ZoomConfig::default());
        let mut t = targets();
        zi.apply(&mut t, 0.30 / 0.20, Vec3::ONE);
        assert!((t.scale - Vec3::splat(1.5)).length() < 1e-5);
    }

    #[test]
    fn zoom_clamps_to_max() {
        let zi = ZoomIntegrator { enabled: true, min_scale: 0.05, max_scale: 1.2 };
        let mut t = targets();
        zi.apply(&mut t, 1.5, Vec3::ONE);
        assert_eq!(t.scale, Vec3::splat(1.2));
        zi.apply(&mut t, 0.001, Vec3::ONE);
        assert_eq!(t.scale, Vec3::splat(0.05));
    }

    #[test]
    fn zoom_is_uniform_from_x() {
        let zi = ZoomIntegrator::from_config(&ZoomConfig::default());
        let mut t = targets();
        zi.apply(&mut t, 1.0, Vec3::new(0.5, 0.9, 1.7));
        assert_eq!(t.scale, Vec3::splat(0.5));
    }

    #[test]
    fn disabled_zoom_leaves_scale() {
        let zi = ZoomIntegrator { enabled: false, min_scale: 0.05, max_scale: 2.0 };
        let mut t = targets();
        zi.apply(&mut t, 1.8, Vec3::ONE);
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn orientation_has_no_roll() {
        let t = Targets { yaw_deg: 30.0, pitch_deg: -20.0, scale: Vec3::ONE };
        let (yaw, pitch, roll) = t.orientation().to_euler(EulerRot::YXZ);
        assert!((yaw.to_degrees() - 30.0).abs() < 1e-3);
        assert!((pitch.to_degrees() + 20.0).abs() < 1e-3);
        assert!(roll.abs() < 1e-5);
    }
}
