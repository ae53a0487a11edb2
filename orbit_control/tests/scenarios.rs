//! End-to-end gesture scenarios driven through the public controller API.

use glam::{EulerRot, Quat, Vec3};
use orbit_control::smoothing::angle_between;
use orbit_control::{
    GestureKind, HandSample, HoldTimer, LiveTransform, OrbitConfig, OrbitController, PinchSpace,
    Pose, TickInput, TrackingFrame,
};

const DT: f32 = 1.0 / 60.0;

fn world_config() -> OrbitConfig {
    let mut cfg = OrbitConfig::default();
    cfg.tracking.pinch_space = PinchSpace::World;
    cfg
}

fn run(ctl: &mut OrbitController, camera: Pose, frame: &TrackingFrame) {
    ctl.tick(&TickInput { dt: DT, camera: Some(camera), tracking: Some(frame) });
}

fn one_hand(id: i32, p: Vec3) -> TrackingFrame {
    TrackingFrame::new(None, Some(HandSample::new(id, 0.9, p)))
}

fn two_hands(dist: f32) -> TrackingFrame {
    TrackingFrame::new(
        Some(HandSample::new(1, 0.9, Vec3::new(-dist / 2.0, 0.0, 0.4))),
        Some(HandSample::new(2, 0.9, Vec3::new(dist / 2.0, 0.0, 0.4))),
    )
}

// ── zoom ─────────────────────────────────────────────────────────────────

#[test]
fn zoom_ratio_scenario() {
    let mut ctl = OrbitController::new(&world_config(), LiveTransform::default()).unwrap();
    run(&mut ctl, Pose::IDENTITY, &two_hands(0.20));
    assert_eq!(ctl.mode().kind(), GestureKind::Zoom);
    assert_eq!(ctl.targets().scale, Vec3::ONE);

    run(&mut ctl, Pose::IDENTITY, &two_hands(0.30));
    assert!((ctl.targets().scale - Vec3::splat(1.5)).length() < 1e-4);
}

#[test]
fn zoom_ratio_scenario_clamped() {
    let mut cfg = world_config();
    cfg.zoom.max_scale = 1.25;
    let mut ctl = OrbitController::new(&cfg, LiveTransform::default()).unwrap();
    run(&mut ctl, Pose::IDENTITY, &two_hands(0.20));
    run(&mut ctl, Pose::IDENTITY, &two_hands(0.30));
    assert_eq!(ctl.targets().scale, Vec3::splat(1.25));
}

#[test]
fn zoom_baseline_uses_live_scale_not_target() {
    let mut ctl = OrbitController::new(&world_config(), LiveTransform::default()).unwrap();
    run(&mut ctl, Pose::IDENTITY, &two_hands(0.20));
    run(&mut ctl, Pose::IDENTITY, &two_hands(0.40));
    // Let go immediately: live scale is somewhere between 1 and 2.
    run(&mut ctl, Pose::IDENTITY, &TrackingFrame::empty());
    let live = ctl.live().scale.x;
    assert!(live > 1.0 && live < 2.0);

    run(&mut ctl, Pose::IDENTITY, &two_hands(0.20));
    run(&mut ctl, Pose::IDENTITY, &two_hands(0.20));
    assert!((ctl.targets().scale.x - live).abs() < 1e-5);
}

#[test]
fn steady_hands_do_not_drift_scale() {
    let mut ctl = OrbitController::new(&world_config(), LiveTransform::default()).unwrap();
    run(&mut ctl, Pose::IDENTITY, &two_hands(0.20));
    run(&mut ctl, Pose::IDENTITY, &two_hands(0.26));
    let target = ctl.targets().scale;
    for _ in 0..120 {
        run(&mut ctl, Pose::IDENTITY, &two_hands(0.26));
    }
    assert!((ctl.targets().scale - target).length() < 1e-6);
}

// ── rotate ───────────────────────────────────────────────────────────────

#[test]
fn rotate_sensitivity_scenario() {
    let mut ctl = OrbitController::new(&world_config(), LiveTransform::default()).unwrap();
    run(&mut ctl, Pose::IDENTITY, &one_hand(5, Vec3::new(0.0, 0.0, 0.4)));
    run(&mut ctl, Pose::IDENTITY, &one_hand(5, Vec3::new(0.01, -0.02, 0.4)));
    assert!((ctl.targets().yaw_deg - 3.0).abs() < 1e-3);
    assert!((ctl.targets().pitch_deg - 6.0).abs() < 1e-3);
}

#[test]
fn rotate_is_camera_relative() {
    // Camera on the far side of the table looking back: world -X is its right.
    let camera = Pose::looking_at(Vec3::new(0.0, 0.5, 0.7), Vec3::ZERO, Vec3::Y);
    let mut ctl = OrbitController::new(&world_config(), LiveTransform::default()).unwrap();
    run(&mut ctl, camera, &one_hand(5, Vec3::new(0.0, 0.2, 0.3)));
    run(&mut ctl, camera, &one_hand(5, Vec3::new(-0.01, 0.2, 0.3)));
    assert!((ctl.targets().yaw_deg - 3.0).abs() < 1e-3);
    assert!(ctl.targets().pitch_deg.abs() < 1e-3);
}

#[test]
fn release_after_rotate_freezes_targets_and_keeps_smoothing() {
    let mut ctl = OrbitController::new(&world_config(), LiveTransform::default()).unwrap();
    run(&mut ctl, Pose::IDENTITY, &one_hand(5, Vec3::new(0.0, 0.0, 0.4)));
    run(&mut ctl, Pose::IDENTITY, &one_hand(5, Vec3::new(0.1, 0.0, 0.4)));
    let frozen = *ctl.targets();
    let goal = frozen.orientation();

    let mut prev = angle_between(ctl.live().orientation, goal);
    for i in 0..30 {
        run(&mut ctl, Pose::IDENTITY, &TrackingFrame::empty());
        if i == 0 {
            assert_eq!(ctl.mode().kind(), GestureKind::Idle);
        }
        assert_eq!(*ctl.targets(), frozen);
        let a = angle_between(ctl.live().orientation, goal);
        assert!(a <= prev + 1e-5);
        prev = a;
    }
    assert!(prev < 0.05);
}

#[test]
fn two_to_one_hand_has_no_jump() {
    let mut ctl = OrbitController::new(&world_config(), LiveTransform::default()).unwrap();
    run(&mut ctl, Pose::IDENTITY, &two_hands(0.2));
    run(&mut ctl, Pose::IDENTITY, &two_hands(0.2));
    let yaw = ctl.targets().yaw_deg;
    // Left lets go; right keeps pinching from wherever it is.
    run(&mut ctl, Pose::IDENTITY, &one_hand(2, Vec3::new(0.1, 0.0, 0.4)));
    assert_eq!(ctl.mode().kind(), GestureKind::Rotate);
    assert_eq!(ctl.targets().yaw_deg, yaw);
}

#[test]
fn flickering_pinch_never_jumps() {
    let mut ctl = OrbitController::new(&world_config(), LiveTransform::default()).unwrap();
    let positions = [0.0, 0.3, -0.2, 0.5, 0.1];
    for (i, x) in positions.iter().enumerate() {
        // Pinch on even ticks, open on odd ones.
        let strength = if i % 2 == 0 { 0.95 } else { 0.2 };
        let f = TrackingFrame::new(Some(HandSample::new(9, strength, Vec3::new(*x, 0.0, 0.4))), None);
        run(&mut ctl, Pose::IDENTITY, &f);
        assert_eq!(ctl.targets().yaw_deg, 0.0);
    }
}

// ── reset ────────────────────────────────────────────────────────────────

fn rotated_home() -> LiveTransform {
    LiveTransform::new(
        Vec3::new(0.0, 0.1, 0.0),
        Quat::from_euler(EulerRot::YXZ, 25f32.to_radians(), -15f32.to_radians(), 0.0),
        Vec3::splat(0.8),
    )
}

#[test]
fn reset_is_idempotent_and_drift_free() {
    let mut ctl = OrbitController::new(&world_config(), rotated_home()).unwrap();
    run(&mut ctl, Pose::IDENTITY, &one_hand(1, Vec3::ZERO));
    for k in 1..20 {
        run(&mut ctl, Pose::IDENTITY, &one_hand(1, Vec3::new(0.01 * k as f32, 0.005 * k as f32, 0.0)));
    }
    run(&mut ctl, Pose::IDENTITY, &two_hands(0.2));
    run(&mut ctl, Pose::IDENTITY, &two_hands(0.35));

    ctl.reset_to_home();
    let once = *ctl.live();
    ctl.reset_to_home();
    assert_eq!(*ctl.live(), once);
    assert_eq!(once, rotated_home());

    run(&mut ctl, Pose::IDENTITY, &TrackingFrame::empty());
    assert!(angle_between(ctl.live().orientation, once.orientation) < 1e-5);
    assert!((ctl.live().scale - once.scale).length() < 1e-6);
    assert_eq!(ctl.live().position, once.position);
}

#[test]
fn reset_while_idle_is_harmless() {
    let mut ctl = OrbitController::new(&world_config(), rotated_home()).unwrap();
    ctl.reset_to_home();
    assert_eq!(*ctl.live(), rotated_home());
    assert_eq!(ctl.mode().kind(), GestureKind::Idle);
}

#[test]
fn hold_timer_triggers_reset_within_tick() {
    let cfg = world_config();
    let mut ctl = OrbitController::new(&cfg, LiveTransform::default()).unwrap();
    let mut hold = HoldTimer::new(cfg.reset.hold_seconds);

    run(&mut ctl, Pose::IDENTITY, &one_hand(1, Vec3::ZERO));
    let mut fired_at = None;
    for i in 0..120 {
        let mut f = one_hand(1, Vec3::new(0.002 * i as f32, 0.0, 0.0));
        f.pose_held = true;
        run(&mut ctl, Pose::IDENTITY, &f);
        if hold.update(f.pose_held, DT) {
            ctl.reset_to_home();
            fired_at = Some(i);
            // Reset wins over this tick's gesture update.
            assert_eq!(ctl.targets().yaw_deg, 0.0);
            assert_eq!(*ctl.live(), LiveTransform::default());
        }
    }
    // 0.8 s at 60 Hz.
    let i = fired_at.expect("hold never fired");
    assert!((46..=49).contains(&i), "fired at {i}");
}
