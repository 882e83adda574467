//! Brickfall - A paddle-and-ball brick breaker
//!
//! Core modules:
//! - `sim`: Simulation (collision, entities, spawning, rounds, per-frame tick)
//! - `game`: Lifecycle state machine, scoring, lives, best score
//! - `render`: Drawing capability and fixed layer order
//! - `audio`: Tone capability and sound toggle
//! - `highscores`: Key-value persistence of the best score
//! - `ads`: Optional rewarded / interstitial capabilities
//! - `platform`: Native and browser backends for the capabilities
//! - `input`, `clock`, `autopilot`: Frame-driver helpers

pub mod ads;
pub mod audio;
pub mod autopilot;
pub mod clock;
pub mod error;
pub mod game;
pub mod highscores;
pub mod input;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::StoreError;
pub use game::{Game, Notice, Phase, Transition};
pub use highscores::{BestScore, KeyValueStore, MemoryStore};
pub use settings::Settings;

/// Game configuration constants
///
/// Distances are in world pixels, speeds in pixels per simulation step.
pub mod consts {
    /// Simulation rate (one tick per 60 Hz display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum catch-up ticks per display frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Integration sub-steps inside a single tick
    pub const BALL_SUBSTEPS: u32 = 2;

    /// Playfield dimensions
    pub const WORLD_WIDTH: f32 = 500.0;
    pub const WORLD_HEIGHT: f32 = 400.0;

    /// Paddle defaults
    pub const PADDLE_BASE_WIDTH: f32 = 92.0;
    pub const PADDLE_MAX_WIDTH: f32 = 160.0;
    pub const PADDLE_EXPAND_STEP: f32 = 30.0;
    pub const PADDLE_HEIGHT: f32 = 12.0;
    pub const PADDLE_Y: f32 = WORLD_HEIGHT - 22.0;
    pub const PADDLE_SPEED: f32 = 9.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_BASE_SPEED: f32 = 5.0;
    /// Added to the launch speed for every level past the first
    pub const BALL_SPEED_PER_LEVEL: f32 = 0.7;
    /// Speed-up power-up multiplier
    pub const SPEED_UP_FACTOR: f32 = 1.15;
    /// Multi-ball: horizontal damping of the second clone
    pub const MULTIBALL_DAMPING: f32 = 0.8;

    /// Brick layout
    pub const BRICK_COLUMNS: usize = 7;
    pub const BRICK_BASE_ROWS: usize = 4;
    pub const BRICK_MAX_ROWS: usize = 7;
    pub const BRICK_MAX_HP: u8 = 3;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 45.0;
    pub const BRICK_OFFSET_LEFT: f32 = 20.0;

    /// Power-ups
    pub const POWER_UP_SIZE: f32 = 18.0;
    pub const POWER_UP_FALL_SPEED: f32 = 3.0;
    pub const POWER_UP_DROP_CHANCE: f64 = 0.25;
    /// Power-ups below this line are discarded
    pub const POWER_UP_DESPAWN_Y: f32 = WORLD_HEIGHT + 30.0;

    /// Particles (cosmetic)
    pub const PARTICLE_MIN_SPEED: f32 = 1.0;
    pub const PARTICLE_MAX_SPEED: f32 = 3.0;
    pub const PARTICLE_LIFETIME: u32 = 16;
    pub const PARTICLE_GRAVITY: f32 = 0.04;
    pub const BRICK_HIT_PARTICLES: usize = 10;
    pub const PADDLE_HIT_PARTICLES: usize = 6;
    pub const PICKUP_PARTICLES: usize = 12;

    /// Scoring and lives
    pub const POINTS_PER_HIT: u64 = 10;
    pub const STARTING_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 9;

    /// Interstitial shown when the level reached is a multiple of this
    pub const INTERSTITIAL_LEVEL_INTERVAL: u32 = 3;
    /// Minimum seconds between interstitials
    pub const INTERSTITIAL_COOLDOWN_SECS: f32 = 90.0;
    /// Frames to wait on a rewarded ad before giving up (10 s)
    pub const AD_TIMEOUT_FRAMES: u32 = 600;
}

/// Clamp helper that tolerates an inverted range by preferring `min`
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}
