//! `OrbitController` — the per-frame façade.
//!
//! Owns the arbiter, both integrators, the smoothing filter, the targets,
//! the live transform and the home pose.  The host calls [`OrbitController::tick`]
//! once per frame (or the two phases separately) and reads back
//! [`OrbitController::live`].

use glam::Vec3;
use tracing::info;

use crate::config::OrbitConfig;
use crate::frame::{Pose, ReferenceFrame};
use crate::hand::{PinchClassifier, TrackingFrame};
use crate::home::HomePose;
use crate::integrate::{RotationIntegrator, Targets, ZoomIntegrator};
use crate::mode::{GestureMode, GestureStep, ModeArbiter};
use crate::smoothing::{LiveTransform, SmoothingFilter};
use crate::Result;

// ════════════════════════════════════════════════════════════════════════════
// TickInput
// ════════════════════════════════════════════════════════════════════════════

/// What the host hands over each frame.
#[derive(Debug, Clone, Copy)]
pub struct TickInput<'a> {
    /// Seconds since the previous tick.
    pub dt:       f32,
    pub camera:   Option<Pose>,
    pub tracking: Option<&'a TrackingFrame>,
}

// ════════════════════════════════════════════════════════════════════════════
// OrbitController
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct OrbitController {
    arbiter:   ModeArbiter,
    rotation:  RotationIntegrator,
    zoom:      ZoomIntegrator,
    smoothing: SmoothingFilter,
    reference: ReferenceFrame,

    targets:   Targets,
    live:      LiveTransform,
    home:      HomePose,
}

impl OrbitController {
    /// Build a controller for an object currently at `initial`, which also
    /// becomes its home pose.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if `config` does not validate.
    pub fn new(config: &OrbitConfig, initial: LiveTransform) -> Result<Self> {
        config.validate()?;

        let rotation = RotationIntegrator::from_config(&config.rotate);
        let home = HomePose::capture(&initial);
        let targets = home.targets(&rotation);

        Ok(OrbitController {
            arbiter:   ModeArbiter::new(PinchClassifier::new(config.pinch.threshold)),
            rotation,
            zoom:      ZoomIntegrator::from_config(&config.zoom),
            smoothing: SmoothingFilter::new(config.rotate.smoothing, config.zoom.smoothing),
            reference: ReferenceFrame::new(config.tracking.pinch_space, Pose::IDENTITY),
            targets,
            live:      initial,
            home,
        })
    }

    /// Pose of the tracking device, used when samples are provider-local.
    pub fn set_provider_pose(&mut self, provider: Pose) {
        self.reference.provider = provider;
    }

    // ── per-tick phases ───────────────────────────────────────────────────

    /// Gesture phase: arbitrate the mode and move the targets.
    pub fn update(&mut self, camera: &Pose, tracking: &TrackingFrame) -> GestureStep {
        let step = self.arbiter.arbitrate(tracking, &self.reference, camera, self.live.scale);
        match step {
            GestureStep::Rotate { delta } => self.rotation.apply(&mut self.targets, delta),
            GestureStep::Zoom { ratio, baseline_scale } => {
                self.zoom.apply(&mut self.targets, ratio, baseline_scale)
            }
            GestureStep::Idle | GestureStep::Entered(_) => {}
        }
        step
    }

    /// Smoothing phase: converge the live transform toward the targets.
    pub fn apply(&mut self, dt: f32) -> &LiveTransform {
        self.smoothing.apply(&mut self.live, &self.targets, dt);
        &self.live
    }

    /// Both phases.  Without a camera or a tracking frame the tick is
    /// skipped entirely and the object holds its transform.
    pub fn tick(&mut self, input: &TickInput<'_>) -> &LiveTransform {
        let (Some(camera), Some(tracking)) = (input.camera.as_ref(), input.tracking) else {
            return &self.live;
        };
        self.update(camera, tracking);
        self.apply(input.dt)
    }

    /// Snap straight back to the home pose.
    ///
    /// Targets are re-seeded from home so the next smoothing pass has
    /// nothing to pull against, and any gesture in progress is dropped.
    /// That only holds for a home with zero roll and pitch inside the
    /// configured limits; otherwise smoothing eases toward the clamped,
    /// roll-free orientation on the following ticks.
    pub fn reset_to_home(&mut self) {
        self.live = self.home.transform();
        self.targets = self.home.targets(&self.rotation);
        self.arbiter.clear();
        info!(
            yaw = self.targets.yaw_deg,
            pitch = self.targets.pitch_deg,
            scale = self.targets.scale.x,
            "reset to home"
        );
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn live(&self)    -> &LiveTransform { &self.live }
    pub fn targets(&self) -> &Targets       { &self.targets }
    pub fn mode(&self)    -> &GestureMode   { self.arbiter.mode() }
    pub fn home(&self)    -> &HomePose      { &self.home }

    /// Uniform live scale (x component).
    pub fn scale(&self) -> f32 { self.live.scale.x }

    /// Current live position; gestures never move it.
    pub fn position(&self) -> Vec3 { self.live.position }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
