//! Hand sources: LeapMotion hardware and keyboard/mouse simulation.
//!
//! The public interface is a stream of [`TrackingFrame`] snapshots delivered
//! over an `mpsc` channel.  The app keeps only the newest one each frame, so
//! a source may send as often as it likes.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use glam::Vec3;
use orbit_control::{HandSample, TrackingFrame};
use tracing::debug;

// ════════════════════════════════════════════════════════════════════════════
// HandSource trait — unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`TrackingFrame`]s over a channel.
///
/// Returning from `run` drops the sender; the app treats that as the source
/// having stopped.
pub trait HandSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<TrackingFrame>);
}

/// Spawn a hand source on its own thread and return the receiving end.
pub fn spawn_hand_source<S: HandSource>(source: S) -> Receiver<TrackingFrame> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// LeapHandSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Hand source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
///
/// Samples are provider-local, in metres, in a +Z-forward frame: LeapC
/// reports millimetres with +Z toward the user, so Z is flipped.  The pinch
/// point is the midpoint of the thumb and index tips.  Both hands clenched
/// into fists counts as the reset pose.
#[cfg(feature = "leap")]
pub struct LeapHandSource;

#[cfg(feature = "leap")]
impl HandSource for LeapHandSource {
    fn run(self: Box<Self>, tx: Sender<TrackingFrame>) {
        use leaprs::*;
        use tracing::warn;

        const FIST_GRAB: f32 = 0.9;

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c)  => c,
            Err(e) => {
                warn!(error = ?e, "failed to create LeapC connection");
                return;
            }
        };
        if let Err(e) = connection.open() {
            warn!(error = ?e, "failed to open LeapMotion device");
            return;
        }

        loop {
            let msg = match connection.poll(100) {
                Ok(m)  => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                let mut out = TrackingFrame::empty();
                let mut fists = 0;

                for hand in frame.hands() {
                    if hand.grab_strength > FIST_GRAB { fists += 1; }

                    let fingers: Vec<_> = hand.digits().collect();
                    if fingers.len() < 2 { continue; }
                    let t = fingers[0].distal().next_joint();
                    let i = fingers[1].distal().next_joint();
                    let mid = Vec3::new((t.x + i.x) * 0.5, (t.y + i.y) * 0.5, (t.z + i.z) * 0.5);
                    let sample = HandSample::new(hand.id as i32, hand.pinch_strength, leap_to_local(mid));

                    match hand.hand_type() {
                        HandType::Left  => out.left  = Some(sample),
                        HandType::Right => out.right = Some(sample),
                    }
                }
                out.pose_held = fists == 2;

                if tx.send(out).is_err() { return; }
            }
        }
    }
}

/// LeapC millimetres (+Z toward the user) → metres in a +Z-forward frame.
pub fn leap_to_local(mm: Vec3) -> Vec3 {
    Vec3::new(mm.x, mm.y, -mm.z) * 0.001
}

// ════════════════════════════════════════════════════════════════════════════
// SimHandSource — keyboard/mouse simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Pointer in normalised window coordinates, each in [-1, 1], +y down.
    PointerMoved(f32, f32),
    KeyDown(SimKey),
    KeyUp(SimKey),
}

/// Simulated controls (mapped from minifb keys and buttons).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimKey {
    PinchLeft,      // Space
    PinchRight,     // left mouse button
    SwapRightHand,  // N
    ResetPose,      // H
    Quit,           // Q
}

/// How far the simulated right hand travels across the window, in metres.
pub const SIM_REACH: f32 = 0.15;
/// Simulated hands sit this far in front of the camera.
pub const SIM_DEPTH: f32 = 0.35;
/// Where the simulated left hand rests, camera-local.
pub const SIM_LEFT_ANCHOR: Vec3 = Vec3::new(-0.08, 0.0, SIM_DEPTH);

const LEFT_ID: i32 = 1;

/// Two simulated hands in front of the camera.
///
/// The left hand stays put at [`SIM_LEFT_ANCHOR`]; the right hand follows
/// the pointer.  Both are always tracked and pinch only while their control
/// is held.  Emitted positions are camera-local, so the app runs the sim
/// with the provider pose glued to the camera.
#[derive(Debug, Clone, PartialEq)]
pub struct SimHands {
    pointer:     (f32, f32),
    left_pinch:  bool,
    right_pinch: bool,
    right_id:    i32,
    reset_held:  bool,
}

impl Default for SimHands {
    fn default() -> Self {
        SimHands {
            pointer:     (0.0, 0.0),
            left_pinch:  false,
            right_pinch: false,
            right_id:    LEFT_ID + 1,
            reset_held:  false,
        }
    }
}

impl SimHands {
    /// Fold one input into the simulated state.  Returns `false` on quit.
    pub fn apply(&mut self, input: SimInput) -> bool {
        match input {
            SimInput::PointerMoved(x, y) => {
                self.pointer = (x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0));
            }
            SimInput::KeyDown(SimKey::PinchLeft)  => self.left_pinch  = true,
            SimInput::KeyUp(SimKey::PinchLeft)    => self.left_pinch  = false,
            SimInput::KeyDown(SimKey::PinchRight) => self.right_pinch = true,
            SimInput::KeyUp(SimKey::PinchRight)   => self.right_pinch = false,
            SimInput::KeyDown(SimKey::ResetPose)  => self.reset_held  = true,
            SimInput::KeyUp(SimKey::ResetPose)    => self.reset_held  = false,
            SimInput::KeyDown(SimKey::SwapRightHand) => {
                // A different id means tracking lost and re-acquired the hand.
                self.right_id += 1;
                debug!(id = self.right_id, "simulated right hand re-acquired");
            }
            SimInput::KeyDown(SimKey::Quit) => return false,
            SimInput::KeyUp(_) => {}
        }
        true
    }

    pub fn right_position(&self) -> Vec3 {
        let (x, y) = self.pointer;
        Vec3::new(x * SIM_REACH, -y * SIM_REACH, SIM_DEPTH)
    }

    /// Snapshot of both hands as the tracker would report them.
    pub fn frame(&self) -> TrackingFrame {
        let strength = |on: bool| if on { 1.0 } else { 0.0 };
        let mut frame = TrackingFrame::new(
            Some(HandSample::new(LEFT_ID, strength(self.left_pinch), SIM_LEFT_ANCHOR)),
            Some(HandSample::new(self.right_id, strength(self.right_pinch), self.right_position())),
        );
        frame.pose_held = self.reset_held;
        frame
    }
}

/// Hand source driven by [`SimInput`] events from the visualizer's window.
///
/// The visualizer sends `SimInput` events here; this translator folds them
/// into [`SimHands`] and forwards a fresh snapshot after each one.
pub struct SimHandSource {
    pub rx: Receiver<SimInput>,
}

impl HandSource for SimHandSource {
    fn run(self: Box<Self>, tx: Sender<TrackingFrame>) {
        let mut hands = SimHands::default();
        if tx.send(hands.frame()).is_err() { return; }

        for input in self.rx {
            if !hands.apply(input) { return; }
            if tx.send(hands.frame()).is_err() { return; }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
