//! Per-frame simulation tick
//!
//! Advances every entity by one time slice and reports what happened. The
//! caller (the game state machine) decides what a lost round or a cleared
//! level means; this module never touches lives or the lifecycle.

use glam::Vec2;

use super::collision::{resolve_ball_brick, resolve_ball_paddle, resolve_ball_wall};
use super::round::apply_power_up;
use super::spawn::{maybe_spawn_power_up, spawn_particle_burst, update_particles};
use super::state::{GameState, PowerUpKind};
use crate::consts::*;

/// Paddle direction signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Steer {
    #[default]
    None,
    Left,
    Right,
}

impl Steer {
    pub fn axis(self) -> f32 {
        match self {
            Steer::None => 0.0,
            Steer::Left => -1.0,
            Steer::Right => 1.0,
        }
    }

    /// Combine held keys; both held cancel out
    pub fn from_keys(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => Steer::Left,
            (false, true) => Steer::Right,
            _ => Steer::None,
        }
    }
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub steer: Steer,
}

/// Something that happened during a tick (for audio and bookkeeping)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    WallBounce,
    BrickHit { pos: Vec2, destroyed: bool },
    PaddleBounce { pos: Vec2 },
    PowerUpCollected(PowerUpKind),
    BallLost,
}

/// Everything a tick reports back
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub events: Vec<SimEvent>,
    /// No balls left in play
    pub round_lost: bool,
    /// No bricks left standing
    pub level_cleared: bool,
}

impl TickReport {
    pub fn bricks_hit(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SimEvent::BrickHit { .. }))
            .count()
    }
}

/// Advance the simulation by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickReport {
    let mut report = TickReport::default();
    state.ticks += 1;

    // 1. Paddle
    state.paddle.steer(input.steer.axis());

    // 2. Power-ups: fall, collect, despawn
    update_power_ups(state, &mut report);

    // 3. Balls, sub-stepped
    update_balls(state, &mut report);

    // 4. Balls through the bottom are gone
    let before = state.balls.len();
    state.balls.retain(|b| !b.is_out(WORLD_HEIGHT));
    for _ in state.balls.len()..before {
        report.events.push(SimEvent::BallLost);
    }

    // 5. Particles
    update_particles(&mut state.particles);

    // 6. Terminal conditions
    report.round_lost = state.balls.is_empty();
    report.level_cleared = state.bricks.is_cleared();
    report
}

fn update_power_ups(state: &mut GameState, report: &mut TickReport) {
    let paddle_rect = state.paddle.rect();
    let mut collected = Vec::new();

    for power_up in state.power_ups.iter_mut().filter(|p| p.active) {
        power_up.pos.y += power_up.fall_speed;
        if power_up.rect().intersects(&paddle_rect) {
            power_up.active = false;
            collected.push((power_up.kind, power_up.rect().center()));
        }
    }
    state
        .power_ups
        .retain(|p| p.active && p.pos.y < POWER_UP_DESPAWN_Y);

    for (kind, at) in collected {
        apply_power_up(state, kind);
        spawn_particle_burst(
            &mut state.rng,
            &mut state.particles,
            at,
            PICKUP_PARTICLES,
            state.max_particles,
        );
        report.events.push(SimEvent::PowerUpCollected(kind));
    }
}

fn update_balls(state: &mut GameState, report: &mut TickReport) {
    let GameState {
        score,
        paddle,
        balls,
        bricks,
        power_ups,
        particles,
        max_particles,
        rng,
        ..
    } = state;
    let steps = BALL_SUBSTEPS as f32;

    for ball in balls.iter_mut() {
        for _ in 0..BALL_SUBSTEPS {
            ball.pos += ball.vel / steps;

            if resolve_ball_wall(ball, WORLD_WIDTH).any() {
                report.events.push(SimEvent::WallBounce);
            }

            for brick in bricks.iter_mut() {
                let Some(hit) = resolve_ball_brick(ball, brick) else {
                    continue;
                };
                *score += POINTS_PER_HIT;
                spawn_particle_burst(rng, particles, ball.pos, BRICK_HIT_PARTICLES, *max_particles);
                if hit.destroyed {
                    if let Some(drop) = maybe_spawn_power_up(rng, brick.rect.center()) {
                        power_ups.push(drop);
                    }
                }
                report.events.push(SimEvent::BrickHit {
                    pos: ball.pos,
                    destroyed: hit.destroyed,
                });
            }

            if resolve_ball_paddle(ball, paddle) {
                let at = Vec2::new(ball.pos.x, paddle.y);
                spawn_particle_burst(rng, particles, at, PADDLE_HIT_PARTICLES, *max_particles);
                report.events.push(SimEvent::PaddleBounce { pos: at });
            }
        }
    }
}
