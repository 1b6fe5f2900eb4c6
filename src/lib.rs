//! Tentacle Dodge - a 3D platform arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (character physics, monster, projectiles, game state)
//! - `game`: Frame driver that forwards simulation events to external collaborators
//! - `audio`: Fire-and-forget feedback sounds
//! - `ui`: HUD snapshot formatting
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences and tuning, loaded from JSON
//! - `autopilot`: Seeded scripted input for demo/headless runs

pub mod audio;
pub mod autopilot;
pub mod game;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use game::{Game, HudSink, TerminationSink};
pub use settings::{Settings, SettingsError};
pub use tuning::Tuning;

/// Timestamp or duration in milliseconds
pub type Millis = u64;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Simulated frame length for headless runs (~60 Hz)
    pub const FRAME_MS: u64 = 16;

    /// Horizontal/depth speed while a movement key is held (units per frame)
    pub const MOVE_SPEED: f32 = 0.04;
    /// Downward acceleration while grounded (units per frame²)
    pub const GRAVITY: f32 = -0.001;
    /// Vertical velocity kept while resting on the platform
    pub const GROUND_STICK_VELOCITY: f32 = -0.2;
    /// Vertical velocity set at jump start, before the arc takes over
    pub const JUMP_SEED_VELOCITY: f32 = 0.001;
    /// Peak vertical velocity of the jump arc
    pub const JUMP_PEAK_VELOCITY: f32 = 0.15;
    /// Jump length in milliseconds
    pub const JUMP_DURATION_MS: u64 = 1500;

    /// Character box extents (model scale) - the sphere radius is half of x
    pub const CHARACTER_EXTENTS: [f32; 3] = [1.3, 1.3, 1.3];
    pub const CHARACTER_SPAWN: [f32; 3] = [0.0, -0.2, 10.0];

    /// Static platform
    pub const PLATFORM_CENTER: [f32; 3] = [0.0, -2.0, 0.0];
    pub const PLATFORM_EXTENTS: [f32; 3] = [17.0, 1.0, 30.0];

    /// Monster defaults
    pub const MONSTER_POSITION: [f32; 3] = [0.0, -1.5, -12.0];
    pub const SPAWN_INTERVAL_MS: u64 = 2000;
    /// Maximum projectiles per volley
    pub const SPAWN_CAP: u32 = 20;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 0.1;
    pub const PROJECTILE_RADIUS: f32 = 0.1;
    /// Distance after which a missed projectile is culled
    pub const PROJECTILE_RANGE: f32 = 60.0;

    /// Player lives at session start
    pub const STARTING_LIVES: u8 = 3;
    /// Character below this height has fallen off the world
    pub const OUT_OF_BOUNDS_Y: f32 = -3.0;
}

/// Convert a `[x, y, z]` config triple to a vector
#[inline]
pub fn vec3(v: [f32; 3]) -> glam::Vec3 {
    glam::Vec3::from_array(v)
}
