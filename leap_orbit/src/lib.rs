//! # leap_orbit
//!
//! LeapMotion pinch-gesture controller that orbits and zooms a tabletop
//! board, drawn as a perspective wireframe.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Hands | Action |
//! |---|---|---|
//! | Pinch and drag | One | Yaw (left/right) and pitch (up/down) the board |
//! | Pinch with both, pull apart / together | Two | Scale the board up / down |
//! | Hold both fists (hardware) or `H` (sim) | Both | Snap back to the start-up pose |
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: mouse and keyboard stand in for hands.
//! * `leap` — **Hardware mode**: polls a real LeapMotion controller via LeapC.
//!
//! ### Simulation controls
//!
//! | Input | Simulated hand |
//! |---|---|
//! | Mouse | Moves the right hand |
//! | Left button / hold | Right hand pinches |
//! | `Space` / hold | Left hand pinches (with the right: zoom) |
//! | `N` | Right hand lost and re-acquired with a new id |
//! | `H` / hold | Reset pose |
//! | `Q` | Quit |

pub mod source;
pub mod board;
pub mod visualizer;
pub mod app;

pub use app::AppError;
