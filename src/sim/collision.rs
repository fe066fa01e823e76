//! Axis-aligned bounding box overlap
//!
//! Every entity is a box described by its centre and full size. Two boxes
//! collide only when they strictly overlap; edges that merely touch do not.

use glam::Vec2;

/// A box in centre + size form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn half(&self) -> Vec2 {
        self.size / 2.0
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half()
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half()
    }

    /// Strict overlap test on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}

/// Anything that occupies a box on the playfield
pub trait Bounded {
    fn bounds(&self) -> Aabb;
}

/// Check whether two bounded entities overlap
#[inline]
pub fn collides(a: &impl Bounded, b: &impl Bounded) -> bool {
    a.bounds().overlaps(&b.bounds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn aabb(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_same_center_overlaps() {
        let a = aabb(100.0, 100.0, 8.0, 20.0);
        let b = aabb(100.0, 100.0, 40.0, 40.0);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        // a spans x 0..10, b spans x 10..20
        let a = aabb(5.0, 0.0, 10.0, 10.0);
        let b = aabb(15.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));

        // Same along y
        let c = aabb(0.0, 5.0, 10.0, 10.0);
        let d = aabb(0.0, 15.0, 10.0, 10.0);
        assert!(!c.overlaps(&d));
    }

    #[test]
    fn test_separated_on_one_axis_misses() {
        let a = aabb(0.0, 0.0, 10.0, 10.0);
        let b = aabb(5.0, 50.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = aabb(0.0, 0.0, 100.0, 100.0);
        let inner = aabb(10.0, -10.0, 2.0, 2.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 0.0f32..100.0, ah in 0.0f32..100.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 0.0f32..100.0, bh in 0.0f32..100.0,
        ) {
            let a = aabb(ax, ay, aw, ah);
            let b = aabb(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }
}
