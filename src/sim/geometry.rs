//! Collision primitives: axis-aligned boxes and bounding spheres
//!
//! Boxes are stored as their six boundary planes, the form the platform and
//! character contact tests read directly. Both intersection tests use
//! inclusive bounds, so touching volumes count as intersecting.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box stored as six planes
///
/// Invariant: `left <= right`, `bottom <= top`, `back <= front`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub back: f32,
    pub front: f32,
}

impl Aabb {
    /// Build from a center and full extents (width, height, depth)
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        let half = extents.abs() / 2.0;
        Self {
            left: center.x - half.x,
            right: center.x + half.x,
            bottom: center.y - half.y,
            top: center.y + half.y,
            back: center.z - half.z,
            front: center.z + half.z,
        }
    }

    /// Grow the box downward by `depth` (no-op for non-positive depth)
    pub fn extend_down(&self, depth: f32) -> Self {
        Self {
            bottom: self.bottom - depth.max(0.0),
            ..*self
        }
    }

    /// True if the x/z footprints overlap, ignoring height
    pub fn footprint_overlaps(&self, other: &Aabb) -> bool {
        self.right >= other.left
            && self.left <= other.right
            && self.front >= other.back
            && self.back <= other.front
    }

    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        aabb_intersects(self, other)
    }
}

/// Bounding sphere. Owners build a fresh one from their current position
/// whenever a test needs it, so the center never lags behind the owner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        sphere_intersects(self, other)
    }
}

/// Inclusive per-axis interval overlap on all three axes
pub fn aabb_intersects(a: &Aabb, b: &Aabb) -> bool {
    a.right >= b.left
        && a.left <= b.right
        && a.top >= b.bottom
        && a.bottom <= b.top
        && a.front >= b.back
        && a.back <= b.front
}

/// Distance between centers no greater than the sum of radii
pub fn sphere_intersects(a: &BoundingSphere, b: &BoundingSphere) -> bool {
    let reach = a.radius + b.radius;
    a.center.distance_squared(b.center) <= reach * reach
}
