//! Monster projectiles
//!
//! Aimed once at launch and flown in a straight line at constant speed.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::geometry::BoundingSphere;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec3,
    /// Unit direction fixed at launch
    pub dir: Vec3,
    /// Units per tick
    pub speed: f32,
    /// Collision radius
    pub radius: f32,
    /// Terminal: a collided projectile never hits again
    pub has_collided: bool,
    /// Distance flown since launch
    pub traveled: f32,
}

impl Projectile {
    /// Launch from `origin` toward `target`.
    ///
    /// A target sitting exactly on the origin gives no direction; the
    /// projectile then flies toward +z, the side the player starts on.
    pub fn aimed(id: u32, origin: Vec3, target: Vec3, speed: f32, radius: f32) -> Self {
        let dir = (target - origin).try_normalize().unwrap_or(Vec3::Z);
        Self {
            id,
            pos: origin,
            dir,
            speed,
            radius,
            has_collided: false,
            traveled: 0.0,
        }
    }

    /// Move one tick along the launch direction
    pub fn advance(&mut self) {
        self.pos += self.dir * self.speed;
        self.traveled += self.speed;
    }

    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.pos, self.radius)
    }

    /// Test against `target`. Returns true only on the first detection.
    pub fn check_collision(&mut self, target: &BoundingSphere) -> bool {
        if self.has_collided {
            return false;
        }
        if self.bounding_sphere().intersects(target) {
            self.has_collided = true;
            return true;
        }
        false
    }

    /// Flew past `range` without hitting anything
    #[inline]
    pub fn is_spent(&self, range: f32) -> bool {
        self.traveled > range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aimed_direction_is_unit() {
        let p = Projectile::aimed(1, Vec3::new(0.0, 2.0, -12.0), Vec3::new(3.0, -0.85, 10.0), 0.1, 0.1);
        assert!((p.dir.length() - 1.0).abs() < 1e-6);
        assert!(p.dir.z > 0.0);
    }

    #[test]
    fn test_degenerate_aim_falls_back() {
        let p = Projectile::aimed(1, Vec3::ONE, Vec3::ONE, 0.1, 0.1);
        assert_eq!(p.dir, Vec3::Z);
    }

    #[test]
    fn test_advance_moves_by_speed() {
        let mut p = Projectile::aimed(1, Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 0.5, 0.1);
        p.advance();
        p.advance();
        assert_eq!(p.pos, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(p.traveled, 1.0);
        assert!(!p.is_spent(1.0));
        p.advance();
        assert!(p.is_spent(1.0));
    }

    #[test]
    fn test_hit_is_reported_once() {
        let target = BoundingSphere::new(Vec3::ZERO, 0.65);
        let mut p = Projectile::aimed(1, Vec3::new(0.5, 0.0, 0.0), Vec3::ZERO, 0.1, 0.1);
        assert!(p.check_collision(&target));
        assert!(p.has_collided);
        assert!(!p.check_collision(&target));
    }

    #[test]
    fn test_miss_leaves_projectile_live() {
        let target = BoundingSphere::new(Vec3::ZERO, 0.65);
        let mut p = Projectile::aimed(1, Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO, 0.1, 0.1);
        assert!(!p.check_collision(&target));
        assert!(!p.has_collided);
    }
}
