//! Per-frame simulation tick
//!
//! Advances the world in a fixed order:
//! stop check -> asset polling -> character (input, jump, gravity, contact,
//! integration) -> monster (spawn, projectile flight, hits) -> clock ->
//! out-of-bounds and lives checks.
//!
//! The monster aims with the position the character reached this tick, and
//! out-of-bounds is judged only after platform contact has been resolved.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use super::character::{AnimationState, MovementIntent};
use super::pose::{self, BoneRotation, StalkRotation};
use super::state::{GameEvent, HudSnapshot, TerminalReason};
use super::world::World;
use crate::Millis;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Held movement keys
    pub movement: MovementIntent,
    /// Jump pressed since the previous tick
    pub jump: bool,
}

/// Cancels the loop. Checked at the top of every tick.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What one tick produced
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// False when the tick was skipped (stopped or already over)
    pub ran: bool,
    pub events: Vec<GameEvent>,
    pub hud: HudSnapshot,
    /// Character animation state, once the character exists
    pub animation: Option<AnimationState>,
    /// Character limb rotations for this tick
    pub pose: Vec<BoneRotation>,
    /// Monster stalk rotations for this tick
    pub stalk_pose: Vec<StalkRotation>,
    pub outcome: Option<TerminalReason>,
}

/// Advance the world by one frame at timestamp `now`
pub fn tick(world: &mut World, input: &TickInput, now: Millis, stop: &StopHandle) -> TickReport {
    if stop.is_stopped() || world.state.is_over() {
        return TickReport {
            ran: false,
            events: world.state.drain_events(),
            hud: world.state.hud(),
            animation: None,
            pose: Vec::new(),
            stalk_pose: Vec::new(),
            outcome: world.state.outcome(),
        };
    }

    world.poll_assets(now);

    if let Some(character) = world.character.as_mut() {
        character.halt_planar();
        character.apply_intent(&input.movement);
        if input.jump && character.try_jump(&world.platform, now) {
            world.state.push_event(GameEvent::Jumped);
        }
        character.update(&world.platform, now);
    }

    if let Some(monster) = world.monster.as_mut() {
        let target = world.character.as_ref().map(|c| c.pos);
        monster.update(now, target, &mut world.state);
        if let Some(character) = world.character.as_ref() {
            monster.check_collisions(&character.bounding_sphere(), &mut world.state);
        }
    }

    world.state.update_clock(now);

    let character_y = world.character.as_ref().map(|c| c.pos.y);
    world
        .state
        .check_terminal(character_y, world.tuning.out_of_bounds_y);

    let animation = world.character.as_ref().map(|c| c.animation_state(now));
    let limb_pose = match (world.character.as_ref(), animation.as_ref()) {
        (Some(character), Some(anim)) => pose::sample(anim, &character.rig, now),
        _ => Vec::new(),
    };
    let stalk_pose = world
        .monster
        .as_ref()
        .map(|m| pose::sample_stalks(m, now))
        .unwrap_or_default();

    TickReport {
        ran: true,
        events: world.state.drain_events(),
        hud: world.state.hud(),
        animation,
        pose: limb_pose,
        stalk_pose,
        outcome: world.state.outcome(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::sim::assets::ModelHandle;
    use crate::sim::projectile::Projectile;
    use crate::sim::state::GamePhase;
    use crate::tuning::Tuning;
    use glam::Vec3;
    use proptest::prelude::*;

    /// World with both models delivered and the character standing on the platform
    fn ready_world() -> World {
        let (mut world, loaders) = World::new(Tuning::default(), 0);
        loaders.character.resolve(ModelHandle::new(1));
        loaders.monster.resolve(ModelHandle::new(2));
        world.poll_assets(0);
        world.state.drain_events();
        let rest = {
            let c = world.character.as_ref().unwrap();
            c.rest_height(&world.platform)
        };
        world.character.as_mut().unwrap().pos.y = rest;
        world
    }

    fn game_overs(events: &[GameEvent]) -> Vec<TerminalReason> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::GameOver { reason } => Some(*reason),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_tick_tolerates_missing_entities() {
        let (mut world, _loaders) = World::new(Tuning::default(), 0);
        let stop = StopHandle::new();
        for i in 1..=10 {
            let report = tick(&mut world, &TickInput::default(), i * FRAME_MS, &stop);
            assert!(report.ran);
            assert!(report.animation.is_none());
            assert!(report.events.is_empty());
        }
        assert_eq!(world.phase(), GamePhase::Loading);
        assert_eq!(world.state.elapsed_ms, 10 * FRAME_MS);
    }

    #[test]
    fn test_rest_five_ticks_no_input() {
        let mut world = ready_world();
        let stop = StopHandle::new();
        let start = world.character.as_ref().unwrap().pos;
        for i in 1..=5 {
            tick(&mut world, &TickInput::default(), i * FRAME_MS, &stop);
        }
        let character = world.character.as_ref().unwrap();
        assert_eq!(character.pos, start);
        assert!(!character.is_jumping());
    }

    #[test]
    fn test_fall_out_of_bounds_ends_game() {
        let mut world = ready_world();
        let stop = StopHandle::new();
        world.character.as_mut().unwrap().pos.y = -5.0;
        let report = tick(&mut world, &TickInput::default(), FRAME_MS, &stop);
        assert_eq!(game_overs(&report.events), vec![TerminalReason::OutOfBounds]);
        assert_eq!(report.outcome, Some(TerminalReason::OutOfBounds));

        // Further ticks are inert and do not repeat the signal
        let report = tick(&mut world, &TickInput::default(), 2 * FRAME_MS, &stop);
        assert!(!report.ran);
        assert!(game_overs(&report.events).is_empty());
    }

    #[test]
    fn test_last_life_hit_ends_game_once() {
        let mut world = ready_world();
        let stop = StopHandle::new();
        world.state.lives = 1;
        let target = world.character.as_ref().unwrap().pos;
        let monster = world.monster.as_mut().unwrap();
        monster.projectiles.push(Projectile::aimed(
            99,
            target + Vec3::new(0.0, 0.0, -0.2),
            target,
            0.1,
            0.1,
        ));

        let report = tick(&mut world, &TickInput::default(), FRAME_MS, &stop);
        assert_eq!(report.hud.lives, 0);
        assert!(report.events.contains(&GameEvent::Hit {
            projectile: 99,
            lives_left: 0
        }));
        assert_eq!(game_overs(&report.events), vec![TerminalReason::LivesDepleted]);
        assert!(world.monster.as_ref().unwrap().projectiles.is_empty());
    }

    #[test]
    fn test_stop_handle_halts_simulation() {
        let mut world = ready_world();
        let stop = StopHandle::new();
        let remote = stop.clone();
        remote.stop();

        let before = world.character.as_ref().unwrap().pos;
        let input = TickInput {
            movement: MovementIntent {
                left: true,
                ..Default::default()
            },
            jump: true,
        };
        let report = tick(&mut world, &input, FRAME_MS, &stop);
        assert!(!report.ran);
        assert_eq!(world.character.as_ref().unwrap().pos, before);
        assert_eq!(world.state.elapsed_ms, 0);
    }

    #[test]
    fn test_jump_input_raises_event() {
        let mut world = ready_world();
        let stop = StopHandle::new();
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        let report = tick(&mut world, &input, FRAME_MS, &stop);
        assert!(report.events.contains(&GameEvent::Jumped));
        assert!(world.character.as_ref().unwrap().is_jumping());

        // A second press mid-air is ignored
        let report = tick(&mut world, &input, 2 * FRAME_MS, &stop);
        assert!(!report.events.contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_monster_aims_at_updated_position() {
        let mut world = ready_world();
        let stop = StopHandle::new();
        let input = TickInput {
            movement: MovementIntent {
                right: true,
                ..Default::default()
            },
            jump: false,
        };
        // First volley falls due on this tick
        let report = tick(&mut world, &input, 2000, &stop);
        assert!(report.events.contains(&GameEvent::Volley { count: 1 }));

        let character_pos = world.character.as_ref().unwrap().pos;
        let monster = world.monster.as_ref().unwrap();
        let p = &monster.projectiles[0];
        let origin = p.pos - p.dir * p.speed;
        let expected = (character_pos - origin).normalize();
        assert!(p.dir.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_report_carries_poses() {
        let (mut world, loaders) = World::new(Tuning::default(), 0);
        let mut character = ModelHandle::new(1);
        for (i, (_, name)) in crate::sim::rig::CHARACTER_BONES.iter().enumerate() {
            character = character.with_bone(name, i as u32, Vec3::ZERO);
        }
        loaders.character.resolve(character);
        loaders
            .monster
            .resolve(ModelHandle::new(2).with_bone("Stalk_00", 20, Vec3::new(0.0, 2.0, -11.0)));
        let stop = StopHandle::new();
        let report = tick(&mut world, &TickInput::default(), FRAME_MS, &stop);
        assert_eq!(report.pose.len(), 4);
        assert_eq!(report.stalk_pose.len(), 1);
        assert_eq!(report.stalk_pose[0].handle, 20);

        stop.stop();
        let report = tick(&mut world, &TickInput::default(), 2 * FRAME_MS, &stop);
        assert!(!report.ran);
        assert!(report.pose.is_empty());
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput {
                movement: MovementIntent {
                    forward: true,
                    ..Default::default()
                },
                jump: false,
            },
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                movement: MovementIntent {
                    left: true,
                    backward: true,
                    ..Default::default()
                },
                jump: false,
            },
        ];
        let stop = StopHandle::new();
        let mut a = ready_world();
        let mut b = ready_world();
        for frame in 0..600u64 {
            let input = &inputs[(frame / 37) as usize % inputs.len()];
            let ra = tick(&mut a, input, frame * FRAME_MS, &stop);
            let rb = tick(&mut b, input, frame * FRAME_MS, &stop);
            assert_eq!(ra, rb);
        }
        assert_eq!(a.character.unwrap().pos, b.character.unwrap().pos);
        assert_eq!(
            a.monster.unwrap().projectiles.len(),
            b.monster.unwrap().projectiles.len()
        );
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<[bool; 4]>(), any::<bool>()).prop_map(|(keys, jump)| TickInput {
            movement: MovementIntent {
                left: keys[0],
                right: keys[1],
                forward: keys[2],
                backward: keys[3],
            },
            jump,
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_lives_never_increase(
            inputs in proptest::collection::vec(arb_input(), 1..400),
            frame_ms in 10u64..200,
        ) {
            let mut world = ready_world();
            let stop = StopHandle::new();
            let mut last_lives = world.state.lives;
            let mut terminal_signals = 0;
            for (i, input) in inputs.iter().enumerate() {
                let report = tick(&mut world, input, (i as u64 + 1) * frame_ms, &stop);
                prop_assert!(report.hud.lives <= last_lives);
                last_lives = report.hud.lives;
                terminal_signals += game_overs(&report.events).len();
            }
            prop_assert!(terminal_signals <= 1);
            prop_assert_eq!(terminal_signals == 1, world.state.is_over());
        }

        #[test]
        fn prop_rest_holds_exact_height(x in -7.0f32..7.0, z in -14.0f32..14.0) {
            let mut world = ready_world();
            let stop = StopHandle::new();
            {
                let c = world.character.as_mut().unwrap();
                c.pos.x = x;
                c.pos.z = z;
            }
            let expected = world.platform.top() + world.character.as_ref().unwrap().half_height();
            for i in 1..=3 {
                tick(&mut world, &TickInput::default(), i * FRAME_MS, &stop);
                prop_assert_eq!(world.character.as_ref().unwrap().pos.y, expected);
            }
        }
    }
}
