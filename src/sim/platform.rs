//! The static platform the character stands on

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;

/// Identifier linking a physics body to its externally owned visual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualId(pub u32);

/// Static box collider. The renderer owns the mesh and finds it by `visual`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub visual: VisualId,
    center: Vec3,
    extents: Vec3,
    bounds: Aabb,
}

impl Platform {
    pub fn new(visual: VisualId, center: Vec3, extents: Vec3) -> Self {
        Self {
            visual,
            center,
            extents,
            bounds: Aabb::from_center_extents(center, extents),
        }
    }

    /// Recompute the six boundary planes from center and extents
    pub fn update_bounds(&mut self) {
        self.bounds = Aabb::from_center_extents(self.center, self.extents);
    }

    #[inline]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Height of the walkable surface
    #[inline]
    pub fn top(&self) -> f32 {
        self.bounds.top
    }
}
