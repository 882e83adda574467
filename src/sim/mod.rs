//! Simulation module
//!
//! All gameplay logic lives here:
//! - One tick per frame, pixel-per-tick velocities
//! - Seeded RNG only, so a seed reproduces a game
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod round;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{
    BrickHit, Rect, WallHit, circle_rect_overlap, resolve_ball_brick, resolve_ball_paddle,
    resolve_ball_wall,
};
pub use round::{apply_power_up, launch_speed, start_level, start_round};
pub use spawn::{create_brick_grid, maybe_spawn_power_up, spawn_particle_burst};
pub use state::{
    Ball, Brick, BrickGrid, GameState, MAX_PARTICLES, Paddle, Particle, PowerUp, PowerUpKind,
};
pub use tick::{SimEvent, Steer, TickInput, TickReport, tick};
