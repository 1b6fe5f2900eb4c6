//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in as an explicit timestamp, never read from a clock
//! - Input comes in as an explicit snapshot per tick
//! - Stable iteration order (projectiles by spawn order)
//! - No rendering, audio or platform dependencies

pub mod assets;
pub mod character;
pub mod geometry;
pub mod monster;
pub mod platform;
pub mod pose;
pub mod projectile;
pub mod rig;
pub mod state;
pub mod tick;
pub mod world;

pub use assets::{AssetSender, BoneInfo, ModelHandle, PendingAsset, asset_channel};
pub use character::{AnimationState, Character, JumpPhase, MotionState, MovementIntent};
pub use geometry::{Aabb, BoundingSphere, aabb_intersects, sphere_intersects};
pub use monster::{Monster, StalkBone};
pub use platform::{Platform, VisualId};
pub use pose::{BoneRotation, StalkRotation, sample as sample_pose, sample_stalks};
pub use projectile::Projectile;
pub use rig::{BoneRole, Rig};
pub use state::{GameEvent, GamePhase, GameState, HudSnapshot, TerminalReason};
pub use tick::{StopHandle, TickInput, TickReport, tick};
pub use world::{Loaders, World};
