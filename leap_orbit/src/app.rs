//! Top-level application state machine.
//!
//! `AppState` owns the `OrbitController`, the hold-to-reset timer, the board
//! model and the camera.  It keeps the newest `TrackingFrame` from the hand
//! source and drives the controller and the visualizer each frame.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Instant;

use glam::{Quat, Vec3};
use orbit_control::{
    GestureKind, HoldTimer, LiveTransform, OrbitConfig, OrbitController, PinchClassifier,
    PinchSpace, Pose, ReferenceFrame, TickInput, TrackingFrame,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::board::{Board, BoardSpec, Camera};
use crate::source::{spawn_hand_source, SimHandSource, SimInput};
use crate::visualizer::{HandMarker, Scene, Visualizer, WIN_H, WIN_W};

// ════════════════════════════════════════════════════════════════════════════
// AppError
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum AppError {
    #[error("window error: {0}")]
    Window(String),

    #[error("controller error: {0}")]
    Control(#[from] orbit_control::Error),

    #[error("tracking error: {0}")]
    Tracking(String),
}

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Where hand frames come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Keyboard and mouse in the visualizer window.
    Simulated,
    /// A LeapMotion controller (needs the `leap` feature).
    Leap,
}

impl SourceKind {
    /// Hardware when built with the `leap` feature, otherwise simulation.
    pub fn build_default() -> Self {
        if cfg!(feature = "leap") { SourceKind::Leap } else { SourceKind::Simulated }
    }
}

/// Configuration for the full application.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub orbit:           OrbitConfig,
    pub board:           BoardSpec,
    pub source:          SourceKind,
    /// Camera eye relative to the board centre, in metres.
    pub camera_offset:   Vec3,
    pub fov_y_deg:       f32,
    /// LeapMotion device position relative to the board centre.  Unused in
    /// simulation, where hands are reported relative to the camera.
    pub provider_offset: Vec3,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            orbit:           OrbitConfig::default(),
            board:           BoardSpec::default(),
            source:          SourceKind::build_default(),
            camera_offset:   Vec3::new(0.0, 0.5, -0.7),
            fov_y_deg:       50.0,
            provider_offset: Vec3::new(0.0, -0.05, -0.35),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    // ── control ──────────────────────────────────────────────────────────
    controller: OrbitController,
    hold:       HoldTimer,
    classifier: PinchClassifier,
    reference:  ReferenceFrame,

    // ── scene ────────────────────────────────────────────────────────────
    board:      Board,
    camera:     Camera,

    // ── input ────────────────────────────────────────────────────────────
    latest:     Option<TrackingFrame>,
    last_kind:  GestureKind,
    resets:     usize,

    // ── status message ───────────────────────────────────────────────────
    pub status: String,
}

impl AppState {
    pub fn new(mut cfg: AppConfig) -> Result<Self, AppError> {
        let (board, centre) = Board::new(cfg.board).centred();

        let eye    = centre + cfg.camera_offset;
        let pose   = Pose::looking_at(eye, centre, Vec3::Y);
        let camera = Camera::new(pose, cfg.fov_y_deg, WIN_W, WIN_H);

        let provider = match cfg.source {
            SourceKind::Simulated => {
                if cfg.orbit.tracking.pinch_space != PinchSpace::ProviderLocal {
                    debug!("simulated hands are camera-local; using provider_local pinch space");
                    cfg.orbit.tracking.pinch_space = PinchSpace::ProviderLocal;
                }
                pose
            }
            SourceKind::Leap => Pose::new(centre + cfg.provider_offset, Quat::IDENTITY),
        };

        let initial = LiveTransform::new(centre, Quat::IDENTITY, Vec3::ONE);
        let mut controller = OrbitController::new(&cfg.orbit, initial)?;
        controller.set_provider_pose(provider);

        info!(
            source = ?cfg.source,
            degrees_per_meter = cfg.orbit.rotate.degrees_per_meter,
            hold_seconds = cfg.orbit.reset.hold_seconds,
            "controller ready"
        );

        Ok(AppState {
            controller,
            hold:       HoldTimer::new(cfg.orbit.reset.hold_seconds),
            classifier: PinchClassifier::new(cfg.orbit.pinch.threshold),
            reference:  ReferenceFrame::new(cfg.orbit.tracking.pinch_space, provider),
            board,
            camera,
            latest:     None,
            last_kind:  GestureKind::Idle,
            resets:     0,
            status:     "Ready — pinch to rotate, pinch with both hands to zoom".to_string(),
        })
    }

    /// Keep the newest frame; older ones are simply replaced.
    pub fn receive(&mut self, frame: TrackingFrame) {
        self.latest = Some(frame);
    }

    // ── Per-frame tick ────────────────────────────────────────────────────

    /// Gesture and smoothing, then the hold timer.  Returns `true` on the
    /// tick a reset fires.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.controller.tick(&TickInput {
            dt,
            camera:   Some(self.camera.pose),
            tracking: self.latest.as_ref(),
        });

        let kind = self.controller.mode().kind();
        if kind != self.last_kind {
            self.status = match kind {
                GestureKind::Idle   => "Released".to_string(),
                GestureKind::Rotate => "ROTATE — drag to yaw and pitch".to_string(),
                GestureKind::Zoom   => "ZOOM — pull hands apart or together".to_string(),
            };
            self.last_kind = kind;
        }

        let held = self.latest.is_some_and(|f| f.pose_held);
        if self.hold.update(held, dt) {
            self.controller.reset_to_home();
            self.resets += 1;
            self.last_kind = GestureKind::Idle;
            self.status = format!("RESET to home ({})", self.resets);
            return true;
        }
        false
    }

    // ── Accessors for the render loop ─────────────────────────────────────

    pub fn hand_markers(&self) -> Vec<HandMarker> {
        let Some(frame) = self.latest.as_ref() else { return Vec::new() };
        [frame.left.as_ref(), frame.right.as_ref()]
            .into_iter()
            .flatten()
            .map(|h| HandMarker {
                world:    self.reference.to_world(h.pinch_position),
                pinching: self.classifier.is_pinching(Some(h)),
            })
            .collect()
    }

    pub fn header(&self) -> String {
        let t = self.controller.targets();
        format!(
            "{}  yaw {:.1}°  pitch {:.1}°  scale {:.2}",
            self.controller.mode().kind().name().to_uppercase(),
            t.yaw_deg,
            t.pitch_deg,
            self.controller.scale(),
        )
    }

    pub fn controller(&self)    -> &OrbitController { &self.controller }
    pub fn board(&self)         -> &Board           { &self.board }
    pub fn camera(&self)        -> &Camera          { &self.camera }
    pub fn hold_progress(&self) -> f32              { self.hold.progress() }
    pub fn resets(&self)        -> usize            { self.resets }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// This is the entry point called from `main.rs`.  It creates the visualizer,
/// the hand source (simulation by default, hardware with `--features leap`),
/// and drives the tick/render loop at ~60 fps.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    // ── Sim input channel ─────────────────────────────────────────────────
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();
    let hands_rx = match cfg.source {
        SourceKind::Simulated => spawn_hand_source(SimHandSource { rx: sim_rx }),
        SourceKind::Leap      => spawn_leap_source()?,
    };

    // ── Visualizer (owns the window and the sim input sender) ────────────
    let mut vis = Visualizer::new(sim_tx)?;

    // ── App state ─────────────────────────────────────────────────────────
    let mut app = AppState::new(cfg)?;

    // ── Main loop ─────────────────────────────────────────────────────────
    let mut last = Instant::now();
    while vis.is_open() {
        // 1. Poll window input → SimInput
        if !vis.poll_input() { break; }

        // 2. Drain hand frames, keeping the newest
        loop {
            match hands_rx.try_recv() {
                Ok(frame)                       => app.receive(frame),
                Err(TryRecvError::Empty)        => break,
                Err(TryRecvError::Disconnected) => {
                    return Err(AppError::Tracking("hand source stopped".to_string()));
                }
            }
        }

        // 3. Per-frame logic
        let now = Instant::now();
        app.tick(now.duration_since(last).as_secs_f32());
        last = now;

        // 4. Render
        let hands  = app.hand_markers();
        let header = app.header();
        vis.render(&Scene {
            board:         app.board(),
            transform:     app.controller().live(),
            camera:        app.camera(),
            hands:         &hands,
            header:        &header,
            status:        &app.status,
            hold_progress: app.hold_progress(),
        });
    }

    info!(resets = app.resets(), "window closed");
    Ok(())
}

#[cfg(feature = "leap")]
fn spawn_leap_source() -> Result<Receiver<TrackingFrame>, AppError> {
    Ok(spawn_hand_source(crate::source::LeapHandSource))
}

#[cfg(not(feature = "leap"))]
fn spawn_leap_source() -> Result<Receiver<TrackingFrame>, AppError> {
    Err(AppError::Tracking("built without the `leap` feature".to_string()))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{SimHands, SimKey};

    const DT: f32 = 1.0 / 60.0;

    fn sim_config() -> AppConfig {
        AppConfig { source: SourceKind::Simulated, ..AppConfig::default() }
    }

    fn make_app() -> AppState {
        AppState::new(sim_config()).unwrap()
    }

    fn feed(app: &mut AppState, hands: &SimHands) {
        app.receive(hands.frame());
        app.tick(DT);
    }

    #[test]
    fn invalid_orbit_config_is_rejected() {
        let mut cfg = sim_config();
        cfg.orbit.pinch.threshold = 1.5;
        assert!(matches!(AppState::new(cfg), Err(AppError::Control(_))));
    }

    #[test]
    fn board_sits_at_its_centre() {
        let app = make_app();
        let pos = app.controller().position();
        assert!(pos.x > 0.1 && pos.z > 0.1);
        let (x, y) = app.camera().project(pos).unwrap();
        assert!((x - WIN_W as f32 / 2.0).abs() < 1e-2);
        assert!((y - WIN_H as f32 / 2.0).abs() < 1e-2);
    }

    #[test]
    fn no_frames_means_no_motion() {
        let mut app = make_app();
        let before = *app.controller().live();
        for _ in 0..10 { app.tick(DT); }
        assert_eq!(*app.controller().live(), before);
    }

    #[test]
    fn drag_right_yaws_positive() {
        let mut app = make_app();
        let mut hands = SimHands::default();
        hands.apply(SimInput::KeyDown(SimKey::PinchRight));
        feed(&mut app, &hands);
        assert_eq!(app.controller().mode().kind(), GestureKind::Rotate);

        hands.apply(SimInput::PointerMoved(0.2, 0.0));
        feed(&mut app, &hands);
        assert!(app.controller().targets().yaw_deg > 1.0);
        assert!(app.status.starts_with("ROTATE"));
    }

    #[test]
    fn both_pinches_zoom() {
        let mut app = make_app();
        let mut hands = SimHands::default();
        hands.apply(SimInput::KeyDown(SimKey::PinchLeft));
        hands.apply(SimInput::KeyDown(SimKey::PinchRight));
        feed(&mut app, &hands);
        assert_eq!(app.controller().mode().kind(), GestureKind::Zoom);

        hands.apply(SimInput::PointerMoved(0.5, 0.0));
        feed(&mut app, &hands);
        assert!(app.controller().targets().scale.x > 1.5);
    }

    #[test]
    fn new_right_hand_id_does_not_jump() {
        let mut app = make_app();
        let mut hands = SimHands::default();
        hands.apply(SimInput::KeyDown(SimKey::PinchRight));
        feed(&mut app, &hands);
        let yaw = app.controller().targets().yaw_deg;

        hands.apply(SimInput::KeyDown(SimKey::SwapRightHand));
        hands.apply(SimInput::PointerMoved(0.9, 0.4));
        feed(&mut app, &hands);
        assert_eq!(app.controller().targets().yaw_deg, yaw);
    }

    #[test]
    fn holding_reset_pose_fires_once() {
        let mut app = make_app();
        let mut hands = SimHands::default();
        hands.apply(SimInput::KeyDown(SimKey::PinchRight));
        feed(&mut app, &hands);
        hands.apply(SimInput::PointerMoved(0.5, 0.3));
        feed(&mut app, &hands);
        assert_ne!(app.controller().targets().yaw_deg, 0.0);

        hands.apply(SimInput::KeyUp(SimKey::PinchRight));
        hands.apply(SimInput::KeyDown(SimKey::ResetPose));
        app.receive(hands.frame());
        let fired = (0..120).filter(|_| app.tick(DT)).count();
        assert_eq!(fired, 1);
        assert_eq!(app.resets(), 1);
        assert_eq!(*app.controller().live(), app.controller().home().transform());
        assert!(app.status.starts_with("RESET"));
    }

    #[test]
    fn markers_follow_hands() {
        let mut app = make_app();
        assert!(app.hand_markers().is_empty());

        let mut hands = SimHands::default();
        hands.apply(SimInput::KeyDown(SimKey::PinchLeft));
        app.receive(hands.frame());
        let markers = app.hand_markers();
        assert_eq!(markers.len(), 2);
        assert!(markers[0].pinching);
        assert!(!markers[1].pinching);
        assert!(app.camera().project(markers[1].world).is_some());
    }

    #[test]
    fn header_reports_mode_and_targets() {
        let app = make_app();
        let h = app.header();
        assert!(h.starts_with("IDLE  yaw "), "{h}");
        assert!(h.ends_with("scale 1.00"), "{h}");
    }
}
