//! # orbit_control
//!
//! Turns per-frame hand-tracking samples into smoothed yaw, pitch and
//! uniform scale of a single object on a table, plus a hands-free
//! reset-to-home.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Hands | Action |
//! |---|---|---|
//! | Pinch and drag left/right | One | Yaw the object |
//! | Pinch and drag up/down | One | Pitch the object (clamped) |
//! | Pinch with both, pull apart / together | Two | Scale up / down (clamped) |
//! | Hold the reset pose | Any | Snap back to the start-up pose |
//!
//! Two-hand zoom always beats one-hand rotate.  Every gesture starts with a
//! baseline tick that moves nothing; motion is measured from the tick after.
//!
//! ## Quick start
//!
//! ```rust
//! use glam::Vec3;
//! use orbit_control::{
//!     HandSample, LiveTransform, OrbitConfig, OrbitController, Pose, TickInput,
//!     TrackingFrame,
//! };
//!
//! let mut ctl = OrbitController::new(&OrbitConfig::default(), LiveTransform::default()).unwrap();
//! let camera = Pose::looking_at(Vec3::new(0.0, 0.5, -0.7), Vec3::ZERO, Vec3::Y);
//!
//! for x in [0.0, 0.01, 0.02] {
//!     let hand = HandSample::new(1, 0.95, Vec3::new(x, 0.0, 0.3));
//!     let frame = TrackingFrame::new(None, Some(hand));
//!     ctl.tick(&TickInput { dt: 1.0 / 60.0, camera: Some(camera), tracking: Some(&frame) });
//! }
//! assert!((ctl.targets().yaw_deg - 6.0).abs() < 1e-3);
//!
//! ctl.reset_to_home();
//! assert_eq!(ctl.targets().yaw_deg, 0.0);
//! ```

pub mod error;
pub mod config;
pub mod frame;
pub mod hand;
pub mod mode;
pub mod integrate;
pub mod smoothing;
pub mod home;
pub mod controller;
pub mod hold;
pub mod pivot;

pub use error::{Error, Result};
pub use config::{OrbitConfig, PinchSpace};
pub use frame::{Pose, ReferenceFrame};
pub use hand::{HandId, HandSample, PinchClassifier, TrackingFrame};
pub use mode::{GestureKind, GestureMode, GestureStep, ModeArbiter};
pub use integrate::{RotationIntegrator, Targets, ZoomIntegrator};
pub use smoothing::{LiveTransform, SmoothingFilter};
pub use home::HomePose;
pub use controller::{OrbitController, TickInput};
pub use hold::HoldTimer;
pub use pivot::Aabb;
