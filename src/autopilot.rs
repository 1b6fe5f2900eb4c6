//! Idle/demo mode - a scripted player
//!
//! Wanders the platform with seeded random key presses, steers away from
//! the edges and jumps when a projectile closes in. Same seed, same run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{MovementIntent, TickInput, World};

/// Keep this far inside the platform edge before steering back
const EDGE_MARGIN: f32 = 2.0;
/// Jump when a projectile approaches within this distance
const DODGE_RADIUS: f32 = 2.5;

pub struct Autopilot {
    rng: Pcg32,
    wander: MovementIntent,
    hold_frames: u32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            wander: MovementIntent::default(),
            hold_frames: 0,
        }
    }

    fn pick_wander(&mut self) {
        self.wander = MovementIntent {
            left: self.rng.random_bool(0.3),
            right: self.rng.random_bool(0.3),
            forward: self.rng.random_bool(0.3),
            backward: self.rng.random_bool(0.3),
        };
        self.hold_frames = self.rng.random_range(20..90);
    }

    /// Input for the next frame
    pub fn next_input(&mut self, world: &World) -> TickInput {
        if self.hold_frames == 0 {
            self.pick_wander();
        }
        self.hold_frames -= 1;

        let Some(character) = world.character.as_ref() else {
            return TickInput::default();
        };

        let mut movement = self.wander;
        let bounds = world.platform.bounds();
        if character.pos.x > bounds.right - EDGE_MARGIN {
            movement.left = true;
            movement.right = false;
        } else if character.pos.x < bounds.left + EDGE_MARGIN {
            movement.right = true;
            movement.left = false;
        }
        if character.pos.z > bounds.front - EDGE_MARGIN {
            movement.forward = true;
            movement.backward = false;
        } else if character.pos.z < bounds.back + EDGE_MARGIN {
            movement.backward = true;
            movement.forward = false;
        }

        let threatened = world.monster.as_ref().is_some_and(|m| {
            m.projectiles.iter().any(|p| {
                let to_character = character.pos - p.pos;
                to_character.length() < DODGE_RADIUS && to_character.dot(p.dir) > 0.0
            })
        });

        TickInput {
            movement,
            jump: threatened && !character.is_jumping(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ModelHandle, Projectile};
    use crate::tuning::Tuning;
    use glam::Vec3;

    fn world_with_character() -> World {
        let (mut world, loaders) = World::new(Tuning::default(), 0);
        loaders.character.resolve(ModelHandle::new(1));
        loaders.monster.resolve(ModelHandle::new(2));
        world.poll_assets(0);
        world
    }

    #[test]
    fn test_same_seed_same_inputs() {
        let world = world_with_character();
        let mut a = Autopilot::new(7);
        let mut b = Autopilot::new(7);
        for _ in 0..300 {
            assert_eq!(a.next_input(&world), b.next_input(&world));
        }
    }

    #[test]
    fn test_steers_back_from_edge() {
        let mut world = world_with_character();
        world.character.as_mut().unwrap().pos.x = 8.0;
        let mut pilot = Autopilot::new(1);
        for _ in 0..50 {
            let input = pilot.next_input(&world);
            assert!(input.movement.left && !input.movement.right);
        }
    }

    #[test]
    fn test_jumps_when_projectile_closes_in() {
        let mut world = world_with_character();
        let pos = world.character.as_ref().unwrap().pos;
        world
            .monster
            .as_mut()
            .unwrap()
            .projectiles
            .push(Projectile::aimed(1, pos - Vec3::new(0.0, 0.0, 1.5), pos, 0.1, 0.1));
        let mut pilot = Autopilot::new(3);
        assert!(pilot.next_input(&world).jump);
    }

    #[test]
    fn test_no_character_no_input() {
        let (world, _loaders) = World::new(Tuning::default(), 0);
        let mut pilot = Autopilot::new(3);
        assert_eq!(pilot.next_input(&world), TickInput::default());
    }
}
