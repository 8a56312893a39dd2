//! Integer pixel rectangles.
//!
//! All world placement in the simulation is done in whole pixels, so the
//! physics integrator can step one pixel at a time and re-test collisions
//! without accumulating floating drift.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world pixels. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Left edge
    pub fn left(&self) -> i32 {
        self.x
    }

    /// Right edge (exclusive)
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Top edge
    pub fn top(&self) -> i32 {
        self.y
    }

    /// Bottom edge (exclusive)
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Strict AABB overlap; touching edges do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Point containment, right/bottom edges exclusive.
    pub fn contains_point(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Copy moved by (dx, dy).
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Copy with the bottom `rows` pixel rows removed.
    pub fn without_bottom(&self, rows: i32) -> Self {
        Self::new(self.x, self.y, self.w, (self.h - rows).max(0))
    }
}

/// True if `rect` overlaps any of `blockers`.
pub fn overlaps_any(rect: &Rect, blockers: &[Rect]) -> bool {
    blockers.iter().any(|b| rect.overlaps(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.left(), 10);
        assert_eq!(r.right(), 40);
        assert_eq!(r.top(), 20);
        assert_eq!(r.bottom(), 60);
        assert_eq!(r.center_y(), 40);
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.overlaps(&Rect::new(9, 9, 10, 10)));
        assert!(!a.overlaps(&Rect::new(10, 0, 10, 10)));
        assert!(!a.overlaps(&Rect::new(0, 10, 10, 10)));
    }

    #[test]
    fn test_contains_point_excludes_far_edges() {
        let r = Rect::new(0, 0, 10, 10);
        assert!(r.contains_point(0, 0));
        assert!(r.contains_point(9, 9));
        assert!(!r.contains_point(10, 5));
    }

    #[test]
    fn test_without_bottom_never_negative() {
        let r = Rect::new(0, 0, 10, 2);
        assert_eq!(r.without_bottom(1).h, 1);
        assert_eq!(r.without_bottom(5).h, 0);
    }

    #[test]
    fn test_overlaps_any() {
        let blockers = [Rect::new(0, 100, 500, 20), Rect::new(600, 50, 20, 20)];
        assert!(overlaps_any(&Rect::new(10, 90, 10, 11), &blockers));
        assert!(!overlaps_any(&Rect::new(10, 80, 10, 10), &blockers));
    }
}
