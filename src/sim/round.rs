//! Round and level setup, and power-up effects

use glam::Vec2;
use rand::Rng;

use super::spawn::create_brick_grid;
use super::state::{Ball, GameState, PowerUpKind};
use crate::consts::*;

/// Launch speed for a level (grows linearly)
pub fn launch_speed(level: u32) -> f32 {
    BALL_BASE_SPEED + level.saturating_sub(1) as f32 * BALL_SPEED_PER_LEVEL
}

/// Start a round at the current level
///
/// Resets the paddle, clears power-ups and particles, and serves a single
/// ball from the middle of the playfield heading up and randomly left or
/// right. The brick grid is left untouched.
pub fn start_round(state: &mut GameState) {
    state.paddle.reset();
    state.power_ups.clear();
    state.particles.clear();

    let speed = launch_speed(state.level);
    let dir = if state.rng.random_bool(0.5) { -1.0 } else { 1.0 };
    let center = Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0);
    state.balls.clear();
    state.balls.push(Ball::new(center, Vec2::new(speed * dir, -speed)));
}

/// Regenerate the brick grid for the current level and start a round
pub fn start_level(state: &mut GameState) {
    state.bricks = create_brick_grid(state.level);
    log::debug!(
        "Level {}: {}x{} bricks",
        state.level,
        state.bricks.columns(),
        state.bricks.rows()
    );
    start_round(state);
}

/// Apply a collected power-up
pub fn apply_power_up(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::ExpandPaddle => {
            let width = state.paddle.width + PADDLE_EXPAND_STEP;
            state.paddle.set_width(width);
        }
        PowerUpKind::MultiBall => {
            // Two clones of the lead ball: one mirrored sideways, one sent the other way vertically
            if let Some(lead) = state.balls.first().cloned() {
                let mirrored = Vec2::new(-lead.vel.x, lead.vel.y);
                let damped = Vec2::new(lead.vel.x * MULTIBALL_DAMPING, -lead.vel.y);
                state.balls.push(Ball::new(lead.pos, mirrored));
                state.balls.push(Ball::new(lead.pos, damped));
            }
        }
        PowerUpKind::SpeedUp => {
            for ball in state.balls.iter_mut() {
                ball.vel *= SPEED_UP_FACTOR;
            }
        }
        PowerUpKind::ExtraLife => state.gain_life(),
    }
    log::debug!("Applied power-up {:?}", kind);
}
