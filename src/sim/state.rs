//! Game state and core simulation types
//!
//! `GameState` is the entity registry: paddle, balls, brick grid, power-ups
//! and particles, plus the score / lives / level counters they feed.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::clamp;
use crate::consts::*;

/// A ball entity
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: BALL_RADIUS,
        }
    }

    /// Ball has fully left through the open bottom edge
    pub fn is_out(&self, height: f32) -> bool {
        self.pos.y - self.radius > height
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per tick while a direction is held
    pub speed: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: WORLD_WIDTH / 2.0 - PADDLE_BASE_WIDTH / 2.0,
            y: PADDLE_Y,
            width: PADDLE_BASE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
        }
    }
}

impl Paddle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Back to base width, centered
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Move by `axis` (-1 left, +1 right) times speed, staying on screen
    pub fn steer(&mut self, axis: f32) {
        self.x = clamp(self.x + axis * self.speed, 0.0, WORLD_WIDTH - self.width);
    }

    /// Center the paddle on a world x (pointer / touch placement)
    pub fn place_center(&mut self, x: f32) {
        self.x = clamp(x - self.width / 2.0, 0.0, WORLD_WIDTH - self.width);
    }

    /// Resize within [base, max], keeping the paddle on screen
    pub fn set_width(&mut self, width: f32) {
        self.width = clamp(width, PADDLE_BASE_WIDTH, PADDLE_MAX_WIDTH);
        self.x = clamp(self.x, 0.0, WORLD_WIDTH - self.width);
    }
}

/// A brick cell in the grid
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub column: usize,
    pub row: usize,
    /// Remaining hit points; 0 means destroyed
    pub hp: u8,
    pub rect: Rect,
}

impl Brick {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Take one hit. Returns true if this hit destroyed the brick.
    pub fn hit(&mut self) -> bool {
        if self.hp == 0 {
            return false;
        }
        self.hp -= 1;
        self.hp == 0
    }
}

/// Fixed-size brick grid stored row-major with an explicit stride
#[derive(Debug, Clone, PartialEq)]
pub struct BrickGrid {
    columns: usize,
    rows: usize,
    brick_width: f32,
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Build a grid; `hp_for(column, row)` supplies each brick's starting hit points
    pub fn new(
        columns: usize,
        rows: usize,
        brick_width: f32,
        mut hp_for: impl FnMut(usize, usize) -> u8,
    ) -> Self {
        let mut bricks = Vec::with_capacity(columns * rows);
        for row in 0..rows {
            for column in 0..columns {
                let x = column as f32 * (brick_width + BRICK_PADDING) + BRICK_OFFSET_LEFT;
                let y = row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_TOP;
                bricks.push(Brick {
                    column,
                    row,
                    hp: hp_for(column, row).min(BRICK_MAX_HP),
                    rect: Rect::new(x, y, brick_width, BRICK_HEIGHT),
                });
            }
        }
        Self {
            columns,
            rows,
            brick_width,
            bricks,
        }
    }

    /// A grid with no bricks (counts as cleared)
    pub fn empty() -> Self {
        Self::new(0, 0, 0.0, |_, _| 0)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn brick_width(&self) -> f32 {
        self.brick_width
    }

    fn index(&self, column: usize, row: usize) -> Option<usize> {
        (column < self.columns && row < self.rows).then(|| row * self.columns + column)
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&Brick> {
        let i = self.index(column, row)?;
        Some(&self.bricks[i])
    }

    pub fn get_mut(&mut self, column: usize, row: usize) -> Option<&mut Brick> {
        let i = self.index(column, row)?;
        Some(&mut self.bricks[i])
    }

    /// All cells, destroyed ones included
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.bricks.iter_mut()
    }

    /// Bricks still standing
    pub fn alive(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.is_alive())
    }

    pub fn remaining(&self) -> usize {
        self.alive().count()
    }

    pub fn is_cleared(&self) -> bool {
        self.remaining() == 0
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    ExpandPaddle,
    MultiBall,
    SpeedUp,
    ExtraLife,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::ExpandPaddle,
        PowerUpKind::MultiBall,
        PowerUpKind::SpeedUp,
        PowerUpKind::ExtraLife,
    ];

    /// Single-letter badge drawn on the capsule
    pub fn badge(&self) -> &'static str {
        match self {
            PowerUpKind::ExpandPaddle => "E",
            PowerUpKind::MultiBall => "M",
            PowerUpKind::SpeedUp => "S",
            PowerUpKind::ExtraLife => "+",
        }
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub fall_speed: f32,
    pub kind: PowerUpKind,
    /// Cleared once collected
    pub active: bool,
}

impl PowerUp {
    /// Capsule centered on `center`
    pub fn centered_at(center: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos: center - Vec2::splat(POWER_UP_SIZE / 2.0),
            size: POWER_UP_SIZE,
            fall_speed: POWER_UP_FALL_SPEED,
            kind,
            active: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// A cosmetic particle (never collides)
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left to live
    pub life: u32,
}

/// Maximum particles kept alive at once
pub const MAX_PARTICLES: usize = 512;

/// Complete simulation state for one game
#[derive(Debug, Clone)]
pub struct GameState {
    pub score: u64,
    pub lives: u8,
    /// 1-based
    pub level: u32,
    /// Simulation ticks advanced since the game was created
    pub ticks: u64,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub bricks: BrickGrid,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    /// Particle cap (0 disables particle effects)
    pub max_particles: usize,
    pub rng: Pcg32,
}

impl GameState {
    /// New game at level 1 with a fresh grid and a ball ready to launch
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            ticks: 0,
            paddle: Paddle::default(),
            balls: Vec::new(),
            bricks: BrickGrid::empty(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            max_particles: MAX_PARTICLES,
            rng: Pcg32::seed_from_u64(seed),
        };
        super::round::start_level(&mut state);
        state
    }

    /// Reset score, lives and level and regenerate level 1, keeping the RNG stream
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.level = 1;
        super::round::start_level(self);
    }

    /// Add a life, capped at the maximum
    pub fn gain_life(&mut self) {
        self.lives = (self.lives + 1).min(MAX_LIVES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paddle_clamps_to_world() {
        let mut paddle = Paddle::default();
        for _ in 0..100 {
            paddle.steer(-1.0);
        }
        assert_eq!(paddle.x, 0.0);
        for _ in 0..100 {
            paddle.steer(1.0);
        }
        assert_eq!(paddle.x, WORLD_WIDTH - paddle.width);

        paddle.place_center(-50.0);
        assert_eq!(paddle.x, 0.0);
        paddle.place_center(250.0);
        assert_eq!(paddle.center_x(), 250.0);
    }

    #[test]
    fn test_paddle_width_bounds() {
        let mut paddle = Paddle::default();
        paddle.set_width(1000.0);
        assert_eq!(paddle.width, PADDLE_MAX_WIDTH);
        paddle.set_width(10.0);
        assert_eq!(paddle.width, PADDLE_BASE_WIDTH);

        // Growing at the right edge pulls the paddle back on screen
        paddle.x = WORLD_WIDTH - PADDLE_BASE_WIDTH;
        paddle.set_width(PADDLE_MAX_WIDTH);
        assert_eq!(paddle.x + paddle.width, WORLD_WIDTH);
    }

    #[test]
    fn test_brick_hit_never_underflows() {
        let mut brick = Brick {
            column: 0,
            row: 0,
            hp: 1,
            rect: Rect::default(),
        };
        assert!(brick.hit());
        assert!(!brick.hit());
        assert_eq!(brick.hp, 0);
    }

    #[test]
    fn test_grid_indexing() {
        let grid = BrickGrid::new(7, 4, 57.0, |c, r| (c + r) as u8 % 3 + 1);
        assert_eq!(grid.iter().count(), 28);
        assert_eq!(grid.get(3, 2).map(|b| (b.column, b.row)), Some((3, 2)));
        assert!(grid.get(7, 0).is_none());
        assert!(grid.get(0, 4).is_none());

        let brick = grid.get(1, 1).expect("in range");
        assert_eq!(brick.rect.x, 57.0 + BRICK_PADDING + BRICK_OFFSET_LEFT);
        assert_eq!(brick.rect.y, BRICK_HEIGHT + BRICK_PADDING + BRICK_OFFSET_TOP);
    }

    #[test]
    fn test_grid_remaining() {
        let mut grid = BrickGrid::new(2, 2, 50.0, |_, _| 1);
        assert_eq!(grid.remaining(), 4);
        grid.get_mut(0, 0).expect("in range").hit();
        assert_eq!(grid.remaining(), 3);
        for brick in grid.iter_mut() {
            brick.hit();
        }
        assert!(grid.is_cleared());
        assert!(BrickGrid::empty().is_cleared());
    }

    #[test]
    fn test_lives_capped() {
        let mut state = GameState::new(1);
        for _ in 0..20 {
            state.gain_life();
        }
        assert_eq!(state.lives, MAX_LIVES);
    }
}
