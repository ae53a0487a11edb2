//! The controlled object: a wireframe game board with a few pieces on it.
//!
//! The board is authored with its origin at one corner, the way imported
//! models usually arrive.  [`Board::centred`] moves the origin to the centre
//! of the combined bounds so that yaw and pitch spin the board in place.

use glam::Vec3;
use orbit_control::pivot::{pivot_center, recentre};
use orbit_control::{Aabb, LiveTransform, Pose};

// ════════════════════════════════════════════════════════════════════════════
// Color palette — piece index → RGB
// ════════════════════════════════════════════════════════════════════════════

/// Evenly spaced hues so neighbouring pieces are easy to tell apart.
pub fn piece_color(i: usize, count: usize) -> u32 {
    let hue = (i as f32 / count.max(1) as f32) * 360.0;
    hsv_to_argb(hue, 0.75, 0.95)
}

/// Convert HSV → packed ARGB (0xAARRGGBB, A=0xFF).
fn hsv_to_argb(h: f32, s: f32, v: f32) -> u32 {
    let h  = h % 360.0;
    let hi = (h / 60.0) as u32;
    let f  = h / 60.0 - hi as f32;
    let p  = v * (1.0 - s);
    let q  = v * (1.0 - s * f);
    let t  = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match hi {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    let ri = (r * 255.0) as u32;
    let gi = (g * 255.0) as u32;
    let bi = (b * 255.0) as u32;
    0xFF000000 | (ri << 16) | (gi << 8) | bi
}

pub const SLAB_COLOR: u32 = 0xFF8899AA;
pub const GRID_COLOR: u32 = 0xFF445566;

// ════════════════════════════════════════════════════════════════════════════
// Wireframe — one part of the board
// ════════════════════════════════════════════════════════════════════════════

/// Points in model space plus the edges joining them.
#[derive(Clone, Debug, PartialEq)]
pub struct Wireframe {
    pub points: Vec<Vec3>,
    pub edges:  Vec<[usize; 2]>,
    pub color:  u32,
}

impl Wireframe {
    /// The twelve edges of an axis-aligned box.
    pub fn cuboid(min: Vec3, max: Vec3, color: u32) -> Self {
        let b = Aabb::new(min, max);
        let (lo, hi) = (b.min, b.max);
        let points = (0..8)
            .map(|i| Vec3::new(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            ))
            .collect();
        // Corners differing in exactly one bit share an edge.
        let mut edges = Vec::with_capacity(12);
        for a in 0..8usize {
            for bit in [1, 2, 4] {
                if a & bit == 0 { edges.push([a, a | bit]); }
            }
        }
        Wireframe { points, edges, color }
    }

    /// `n + 1` lines each way across the square `[origin, origin + size]` in XZ.
    pub fn grid(origin: Vec3, size: f32, n: usize, color: u32) -> Self {
        let n = n.max(1);
        let step = size / n as f32;
        let mut points = Vec::with_capacity(4 * (n + 1));
        let mut edges  = Vec::with_capacity(2 * (n + 1));
        for i in 0..=n {
            let d = i as f32 * step;
            for (a, b) in [
                (Vec3::new(d, 0.0, 0.0), Vec3::new(d, 0.0, size)),
                (Vec3::new(0.0, 0.0, d), Vec3::new(size, 0.0, d)),
            ] {
                edges.push([points.len(), points.len() + 1]);
                points.push(origin + a);
                points.push(origin + b);
            }
        }
        Wireframe { points, edges, color }
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.points.iter().copied())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Board
// ════════════════════════════════════════════════════════════════════════════

/// Board dimensions, in metres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardSpec {
    pub size:      f32,
    pub thickness: f32,
    pub squares:   usize,
}

impl Default for BoardSpec {
    fn default() -> Self {
        BoardSpec { size: 0.40, thickness: 0.02, squares: 8 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    pub parts: Vec<Wireframe>,
}

impl Board {
    /// Slab, playing grid and an asymmetric scatter of pieces, with the
    /// model origin at the slab's lower corner.
    pub fn new(spec: BoardSpec) -> Self {
        let BoardSpec { size, thickness, squares } = spec;
        let cell = size / squares.max(1) as f32;

        let mut parts = vec![
            Wireframe::cuboid(Vec3::ZERO, Vec3::new(size, thickness, size), SLAB_COLOR),
            Wireframe::grid(Vec3::new(0.0, thickness, 0.0), size, squares, GRID_COLOR),
        ];

        // (file, rank, height in cells)
        let pieces = [(0, 0, 1.2), (3, 1, 0.8), (6, 2, 1.6), (1, 6, 1.0), (5, 7, 0.6)];
        for (i, &(file, rank, h)) in pieces.iter().enumerate() {
            let x = (file.min(squares.saturating_sub(1)) as f32 + 0.25) * cell;
            let z = (rank.min(squares.saturating_sub(1)) as f32 + 0.25) * cell;
            parts.push(Wireframe::cuboid(
                Vec3::new(x, thickness, z),
                Vec3::new(x + cell * 0.5, thickness + cell * h, z + cell * 0.5),
                piece_color(i, pieces.len()),
            ));
        }

        Board { parts }
    }

    pub fn bounds(&self) -> Vec<Aabb> {
        self.parts.iter().filter_map(Wireframe::bounds).collect()
    }

    /// Move the model origin to the centre of the combined bounds.
    ///
    /// Returns the old-model-space position of the new origin; placing the
    /// board there keeps every part where it was.
    pub fn centred(mut self) -> (Self, Vec3) {
        let pivot = pivot_center(&self.bounds()).unwrap_or(Vec3::ZERO);
        for part in &mut self.parts {
            recentre(&mut part.points, pivot);
        }
        (self, pivot)
    }

    /// Every edge in world space, with its color.
    pub fn world_edges<'a>(
        &'a self,
        transform: &'a LiveTransform,
    ) -> impl Iterator<Item = (Vec3, Vec3, u32)> + 'a {
        self.parts.iter().flat_map(move |part| {
            part.edges.iter().map(move |&[a, b]| (
                transform.transform_point(part.points[a]),
                transform.transform_point(part.points[b]),
                part.color,
            ))
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Camera — pinhole projection
// ════════════════════════════════════════════════════════════════════════════

/// Anything closer than this to the camera plane is not drawn.
const NEAR: f32 = 0.01;

/// A pinhole camera looking down its +Z axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pose:     Pose,
    /// Focal length in pixels.
    pub focal_px: f32,
    pub width:    usize,
    pub height:   usize,
}

impl Camera {
    pub fn new(pose: Pose, fov_y_deg: f32, width: usize, height: usize) -> Self {
        let half = (fov_y_deg.clamp(1.0, 179.0) * 0.5).to_radians();
        Camera { pose, focal_px: height as f32 * 0.5 / half.tan(), width, height }
    }

    /// World point → pixel coordinates, or `None` behind the near plane.
    pub fn project(&self, world: Vec3) -> Option<(f32, f32)> {
        let c = self.pose.inverse_transform_point(world);
        if c.z < NEAR { return None; }
        Some((
            self.width  as f32 * 0.5 + self.focal_px * c.x / c.z,
            self.height as f32 * 0.5 - self.focal_px * c.y / c.z,
        ))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
