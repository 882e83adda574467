//! Procedural spawning: brick grids, power-up drops, particle bursts
//!
//! Grid layout is deterministic from the level number; drops and bursts take
//! the caller's RNG so a seeded game reproduces them exactly.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{BrickGrid, Particle, PowerUp, PowerUpKind};
use crate::consts::*;

/// Number of brick rows for a level: 4, growing by one every two levels, max 7
pub fn rows_for_level(level: u32) -> usize {
    let extra = (level.saturating_sub(1) / 2) as usize;
    (BRICK_BASE_ROWS + extra).min(BRICK_MAX_ROWS)
}

/// Starting hit points: deeper rows and later levels are tougher, max 3
pub fn brick_hp(level: u32, row: usize) -> u8 {
    let hp = 1 + row / 2 + (level.saturating_sub(1) / 2) as usize;
    hp.min(BRICK_MAX_HP as usize) as u8
}

/// Brick width that fills the playfield between the side margins
pub fn brick_width(columns: usize) -> f32 {
    if columns == 0 {
        return 0.0;
    }
    let gaps = (columns - 1) as f32 * BRICK_PADDING;
    ((WORLD_WIDTH - BRICK_OFFSET_LEFT * 2.0 - gaps) / columns as f32).floor()
}

/// Fresh brick grid for `level`
pub fn create_brick_grid(level: u32) -> BrickGrid {
    let rows = rows_for_level(level);
    let width = brick_width(BRICK_COLUMNS);
    BrickGrid::new(BRICK_COLUMNS, rows, width, |_, row| brick_hp(level, row))
}

/// Roll for a power-up drop centered on `center`
pub fn maybe_spawn_power_up<R: Rng + ?Sized>(rng: &mut R, center: Vec2) -> Option<PowerUp> {
    if !rng.random_bool(POWER_UP_DROP_CHANCE) {
        return None;
    }
    let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
    log::debug!("Power-up {:?} dropped at ({:.0}, {:.0})", kind, center.x, center.y);
    Some(PowerUp::centered_at(center, kind))
}

/// Emit up to `count` particles from `origin` in random directions
///
/// Never grows `particles` past `limit`.
pub fn spawn_particle_burst<R: Rng + ?Sized>(
    rng: &mut R,
    particles: &mut Vec<Particle>,
    origin: Vec2,
    count: usize,
    limit: usize,
) {
    let room = limit.saturating_sub(particles.len());
    for _ in 0..count.min(room) {
        let angle = rng.random_range(0.0..TAU);
        let speed = rng.random_range(PARTICLE_MIN_SPEED..PARTICLE_MAX_SPEED);
        particles.push(Particle {
            pos: origin,
            vel: Vec2::from_angle(angle) * speed,
            life: PARTICLE_LIFETIME,
        });
    }
}

/// Advance particles one tick: move, fall, age, and drop the dead
pub fn update_particles(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.vel.y += PARTICLE_GRAVITY;
        p.life = p.life.saturating_sub(1);
    }
    particles.retain(|p| p.life > 0);
}
