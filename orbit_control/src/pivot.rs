//! Pivot centring for compound objects.
//!
//! An object built from several parts usually has its origin somewhere
//! arbitrary.  Rotating it about that origin swings it around the table;
//! rotating about the centre of its combined bounds spins it in place.

use glam::Vec3;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Aabb { min: min.min(max), max: min.max(max) }
    }

    /// Tightest box around `points`; `None` when empty.
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        Some(it.fold(Aabb { min: first, max: first }, |b, p| Aabb {
            min: b.min.min(p),
            max: b.max.max(p),
        }))
    }

    /// Grow to include `other`.
    pub fn encapsulate(&mut self, other: &Aabb) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn center(&self) -> Vec3 { (self.min + self.max) * 0.5 }
    pub fn size(&self)   -> Vec3 { self.max - self.min }
}

/// Centre of the union of `parts`; `None` when there are no parts.
pub fn pivot_center(parts: &[Aabb]) -> Option<Vec3> {
    let (first, rest) = parts.split_first()?;
    let mut union = *first;
    for b in rest {
        union.encapsulate(b);
    }
    Some(union.center())
}

/// Re-express `points` relative to `pivot` so that placing the pivot at its
/// old world position leaves every point where it was.
pub fn recentre(points: &mut [Vec3], pivot: Vec3) {
    for p in points {
        *p -= pivot;
    }
}
