//! Software-rendered visualizer using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  MODE  yaw  pitch  scale                       [hold ▓▓▓░░]  │
//! │                                                              │
//! │                 board wireframe (perspective)                │
//! │                    o  hand markers  ●                        │
//! │                                                              │
//! │  status bar                                                  │
//! │  key legend                                                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use std::sync::mpsc::Sender;
use std::time::Duration;

use glam::Vec3;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use orbit_control::LiveTransform;

use crate::board::{Board, Camera};
use crate::source::{SimInput, SimKey};
use crate::AppError;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W:     usize = 960;
pub const WIN_H:     usize = 640;
const HEADER_H:      usize = 28;
const STATUS_Y:      usize = WIN_H - 36;
const HOLD_W:        usize = 160;
const BG_COLOR:      u32   = 0xFF1A1A2E;
const TEXT_BG:       u32   = 0xFF0F3460;
const HOLD_COLOR:    u32   = 0xFFFFD700;  // gold
const PINCH_COLOR:   u32   = 0xFF66FF99;
const OPEN_COLOR:    u32   = 0xFF888888;

/// Longest line the rasteriser will walk; anything longer is far off-screen.
const MAX_LINE_STEPS: usize = 4 * (WIN_W + WIN_H);

/// A tracked hand, as drawn over the board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandMarker {
    pub world:    Vec3,
    pub pinching: bool,
}

/// Everything the render pass reads for one frame.
pub struct Scene<'a> {
    pub board:         &'a Board,
    pub transform:     &'a LiveTransform,
    pub camera:        &'a Camera,
    pub hands:         &'a [HandMarker],
    pub header:        &'a str,
    pub status:        &'a str,
    pub hold_progress: f32,
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:  Window,
    buf:     Vec<u32>,
    sim_tx:  Sender<SimInput>,

    // ── edge detection for held controls ─────────────────────────────────
    pointer:     Option<(f32, f32)>,
    left_pinch:  bool,
    right_pinch: bool,
    reset_held:  bool,
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>) -> Result<Self, AppError> {
        let mut window = Window::new(
            "Leap Orbit — Tabletop Pinch Controller",
            WIN_W, WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| AppError::Window(e.to_string()))?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            sim_tx,
            pointer:     None,
            left_pinch:  false,
            right_pinch: false,
            reset_held:  false,
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll keyboard and mouse and translate changes into [`SimInput`]s.
    ///
    /// Returns false once the user asked to quit.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() { return false; }

        if self.window.is_key_pressed(Key::Q, KeyRepeat::No) {
            self.send(SimInput::KeyDown(SimKey::Quit));
            return false;
        }
        if self.window.is_key_pressed(Key::N, KeyRepeat::No) {
            self.send(SimInput::KeyDown(SimKey::SwapRightHand));
        }

        if let Some((x, y)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            let p = (x / WIN_W as f32 * 2.0 - 1.0, y / WIN_H as f32 * 2.0 - 1.0);
            if self.pointer != Some(p) {
                self.pointer = Some(p);
                self.send(SimInput::PointerMoved(p.0, p.1));
            }
        }

        let space = self.window.is_key_down(Key::Space);
        let mouse = self.window.get_mouse_down(MouseButton::Left);
        let h     = self.window.is_key_down(Key::H);

        self.left_pinch  = self.edge(self.left_pinch,  space, SimKey::PinchLeft);
        self.right_pinch = self.edge(self.right_pinch, mouse, SimKey::PinchRight);
        self.reset_held  = self.edge(self.reset_held,  h,     SimKey::ResetPose);

        true
    }

    fn edge(&self, was: bool, now: bool, key: SimKey) -> bool {
        match (was, now) {
            (false, true) => self.send(SimInput::KeyDown(key)),
            (true, false) => self.send(SimInput::KeyUp(key)),
            _ => {}
        }
        now
    }

    fn send(&self, input: SimInput) {
        // The sim thread is gone only after quit; nothing left to tell it.
        let _ = self.sim_tx.send(input);
    }

    /// Render one frame.
    pub fn render(&mut self, scene: &Scene<'_>) {
        self.buf.fill(BG_COLOR);

        // ── Board ─────────────────────────────────────────────────────────
        for (a, b, color) in scene.board.world_edges(scene.transform) {
            if let (Some(pa), Some(pb)) = (scene.camera.project(a), scene.camera.project(b)) {
                self.draw_line(pa, pb, color);
            }
        }

        // ── Hands ─────────────────────────────────────────────────────────
        for hand in scene.hands {
            if let Some((x, y)) = scene.camera.project(hand.world) {
                let color = if hand.pinching { PINCH_COLOR } else { OPEN_COLOR };
                self.draw_ring(x, y, 7.0, color);
                if hand.pinching {
                    self.draw_ring(x, y, 3.0, color);
                }
            }
        }

        // ── Header ────────────────────────────────────────────────────────
        self.fill_rect(0, 0, WIN_W, HEADER_H, TEXT_BG);
        self.draw_label(scene.header, 10, 11, 0xFFEEEEEE);

        // ── Hold-to-reset progress ────────────────────────────────────────
        if scene.hold_progress > 0.0 {
            let x = WIN_W - HOLD_W - 10;
            self.draw_label("reset", x - 24, 11, HOLD_COLOR);
            self.draw_border(x, 8, HOLD_W, 12, HOLD_COLOR);
            let filled = (HOLD_W as f32 * scene.hold_progress.clamp(0.0, 1.0)) as usize;
            self.fill_rect(x, 8, filled, 12, HOLD_COLOR);
        }

        // ── Status bar ────────────────────────────────────────────────────
        self.fill_rect(0, STATUS_Y, WIN_W, WIN_H - STATUS_Y, TEXT_BG);
        self.draw_label(scene.status, 10, STATUS_Y + 10, 0xFFEEEEEE);

        // ── Key legend ────────────────────────────────────────────────────
        self.draw_label(
            "mouse=right hand  click=pinch right  space=pinch left  n=new right id  h=hold reset  q=quit",
            10, WIN_H - 16, 0xFF888888,
        );

        if let Err(e) = self.window.update_with_buffer(&self.buf, WIN_W, WIN_H) {
            tracing::warn!(error = %e, "frame dropped");
        }
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn draw_line(&mut self, a: (f32, f32), b: (f32, f32), color: u32) {
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let steps = dx.abs().max(dy.abs()).ceil() as usize;
        if steps > MAX_LINE_STEPS { return; }
        let steps = steps.max(1);
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let (x, y) = (a.0 + dx * t, a.1 + dy * t);
            if x >= 0.0 && y >= 0.0 {
                self.set_pixel(x as usize, y as usize, color);
            }
        }
    }

    fn draw_ring(&mut self, cx: f32, cy: f32, r: f32, color: u32) {
        let n = (r * 8.0) as usize;
        for i in 0..n {
            let a = i as f32 / n as f32 * std::f32::consts::TAU;
            let (x, y) = (cx + r * a.cos(), cy + r * a.sin());
            if x >= 0.0 && y >= 0.0 {
                self.set_pixel(x as usize, y as usize, color);
            }
        }
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y+h).min(WIN_H) {
            for col in x..(x+w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        if w == 0 || h == 0 { return; }
        for col in x..(x+w).min(WIN_W) {
            self.set_pixel(col, y, color);
            self.set_pixel(col, y + h - 1, color);
        }
        for row in y..(y+h).min(WIN_H) {
            self.set_pixel(x, row, color);
            self.set_pixel(x + w - 1, row, color);
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < WIN_W && y < WIN_H {
            self.buf[y * WIN_W + x] = color;
        }
    }

    /// Minimal bitmap font — 3×5 characters.
    /// Each character is encoded as 5 rows × 3 bits.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.set_pixel(cx + col, y + row, color);
                    }
                }
            }
            cx += 4; // 3 wide + 1 gap
            if cx + 4 > WIN_W { break; }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        '°' => [0b010, 0b101, 0b010, 0b000, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}
