//! Collision detection and response
//!
//! Balls are circles, everything else is an axis-aligned rectangle. All
//! functions here are pure apart from the velocity / hit-point mutation of
//! the entities handed in.

use glam::Vec2;

use super::state::{Ball, Brick, Paddle};
use crate::clamp;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Overlap test with touching edges counted as overlap
    pub fn intersects(&self, other: &Rect) -> bool {
        self.right() >= other.x
            && self.x <= other.right()
            && self.bottom() >= other.y
            && self.y <= other.bottom()
    }

    /// Nearest point inside the rectangle to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            clamp(p.x, self.x, self.right()),
            clamp(p.y, self.y, self.bottom()),
        )
    }
}

/// Outcome of a ball touching a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickHit {
    /// Hit points dropped to zero on this hit
    pub destroyed: bool,
}

/// Which walls a ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallHit {
    pub side: bool,
    pub top: bool,
}

impl WallHit {
    pub fn any(&self) -> bool {
        self.side || self.top
    }
}

/// Circle vs rectangle overlap
///
/// Clamps the circle center into the rectangle to find the nearest point; the
/// shapes overlap iff that point lies within the radius.
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let nearest = rect.closest_point(center);
    center.distance_squared(nearest) <= radius * radius
}

/// Bounce a ball off the side and top walls of a playfield `width` wide
///
/// The velocity component is forced to point back into the playfield rather
/// than blindly negated, so a ball still overlapping the wall on the next
/// sub-step is not flipped back outward. There is no bottom wall.
pub fn resolve_ball_wall(ball: &mut Ball, width: f32) -> WallHit {
    let mut hit = WallHit::default();

    if ball.pos.x - ball.radius < 0.0 && ball.vel.x < 0.0 {
        ball.vel.x = -ball.vel.x;
        hit.side = true;
    } else if ball.pos.x + ball.radius > width && ball.vel.x > 0.0 {
        ball.vel.x = -ball.vel.x;
        hit.side = true;
    }

    if ball.pos.y - ball.radius < 0.0 && ball.vel.y < 0.0 {
        ball.vel.y = -ball.vel.y;
        hit.top = true;
    }

    hit
}

/// Ball vs a single brick
///
/// On overlap the vertical velocity is always reflected (no face
/// distinction) and the brick loses one hit point. Destroyed bricks are
/// ignored entirely.
pub fn resolve_ball_brick(ball: &mut Ball, brick: &mut Brick) -> Option<BrickHit> {
    if !brick.is_alive() || !circle_rect_overlap(ball.pos, ball.radius, &brick.rect) {
        return None;
    }

    ball.vel.y = -ball.vel.y;
    let destroyed = brick.hit();
    Some(BrickHit { destroyed })
}

/// Ball vs paddle
///
/// Only a descending ball whose center lies over the paddle and whose lower
/// edge has reached the paddle top bounces. The vertical velocity is forced
/// upward so repeated contact within one tick cannot flip it back down.
pub fn resolve_ball_paddle(ball: &mut Ball, paddle: &Paddle) -> bool {
    let over_paddle = ball.pos.x >= paddle.x && ball.pos.x <= paddle.x + paddle.width;
    let reached_top = ball.pos.y + ball.radius >= paddle.y;

    if ball.vel.y > 0.0 && over_paddle && reached_top {
        ball.vel.y = -ball.vel.y.abs();
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    fn brick_at(x: f32, y: f32, hp: u8) -> Brick {
        Brick {
            column: 0,
            row: 0,
            hp,
            rect: Rect::new(x, y, 57.0, BRICK_HEIGHT),
        }
    }

    #[test]
    fn test_circle_rect_overlap() {
        let rect = Rect::new(100.0, 100.0, 50.0, 20.0);

        // Center inside
        assert!(circle_rect_overlap(Vec2::new(120.0, 110.0), 5.0, &rect));
        // Just touching the left edge
        assert!(circle_rect_overlap(Vec2::new(90.0, 110.0), 10.0, &rect));
        // Corner: distance sqrt(50) > 7
        assert!(!circle_rect_overlap(Vec2::new(95.0, 95.0), 7.0, &rect));
        // Corner: distance sqrt(50) < 7.5
        assert!(circle_rect_overlap(Vec2::new(95.0, 95.0), 7.5, &rect));
        // Far away
        assert!(!circle_rect_overlap(Vec2::new(300.0, 300.0), 10.0, &rect));
    }

    #[test]
    fn test_wall_reflection() {
        let mut ball = Ball::new(Vec2::new(5.0, 200.0), Vec2::new(-4.0, 3.0));
        let hit = resolve_ball_wall(&mut ball, WORLD_WIDTH);
        assert!(hit.side);
        assert_eq!(ball.vel.x, 4.0);

        // Still overlapping next sub-step but already heading inward
        let hit = resolve_ball_wall(&mut ball, WORLD_WIDTH);
        assert!(!hit.any());
        assert_eq!(ball.vel.x, 4.0);

        let mut ball = Ball::new(Vec2::new(495.0, 200.0), Vec2::new(4.0, 3.0));
        assert!(resolve_ball_wall(&mut ball, WORLD_WIDTH).side);
        assert_eq!(ball.vel.x, -4.0);

        let mut ball = Ball::new(Vec2::new(250.0, 3.0), Vec2::new(1.0, -5.0));
        let hit = resolve_ball_wall(&mut ball, WORLD_WIDTH);
        assert!(hit.top && !hit.side);
        assert_eq!(ball.vel.y, 5.0);
    }

    #[test]
    fn test_no_bottom_wall() {
        let mut ball = Ball::new(Vec2::new(250.0, 450.0), Vec2::new(0.0, 5.0));
        assert!(!resolve_ball_wall(&mut ball, WORLD_WIDTH).any());
        assert_eq!(ball.vel.y, 5.0);
    }

    #[test]
    fn test_brick_hit_decrements_hp() {
        let mut brick = brick_at(100.0, 100.0, 2);
        let mut ball = Ball::new(Vec2::new(120.0, 125.0), Vec2::new(2.0, -5.0));

        let hit = resolve_ball_brick(&mut ball, &mut brick).expect("should hit");
        assert!(!hit.destroyed);
        assert_eq!(brick.hp, 1);
        assert_eq!(ball.vel.y, 5.0);

        let hit = resolve_ball_brick(&mut ball, &mut brick).expect("should hit");
        assert!(hit.destroyed);
        assert_eq!(brick.hp, 0);

        // Destroyed bricks no longer collide
        let before = ball.vel;
        assert!(resolve_ball_brick(&mut ball, &mut brick).is_none());
        assert_eq!(ball.vel, before);
        assert_eq!(brick.hp, 0);
    }

    #[test]
    fn test_brick_side_hit_still_flips_vertical() {
        let mut brick = brick_at(100.0, 100.0, 1);
        // Approaching the left face horizontally
        let mut ball = Ball::new(Vec2::new(92.0, 110.0), Vec2::new(5.0, 1.0));
        assert!(resolve_ball_brick(&mut ball, &mut brick).is_some());
        assert_eq!(ball.vel, Vec2::new(5.0, -1.0));
    }

    #[test]
    fn test_paddle_bounce_scenario() {
        // Paddle at x=204, width=92 in a 500 wide world
        let mut paddle = Paddle::default();
        assert_eq!(paddle.x, 204.0);
        assert_eq!(paddle.width, 92.0);

        let mut ball = Ball::new(Vec2::new(250.0, PADDLE_Y - 8.0), Vec2::new(3.0, 5.0));
        assert!(resolve_ball_paddle(&mut ball, &paddle));
        assert!(ball.vel.y < 0.0);
        assert_eq!(ball.vel.y, -5.0);

        // A second contact in the same tick keeps it heading up
        assert!(!resolve_ball_paddle(&mut ball, &paddle));
        assert_eq!(ball.vel.y, -5.0);

        // Ball outside the paddle span passes by
        paddle.x = 0.0;
        let mut ball = Ball::new(Vec2::new(250.0, PADDLE_Y - 8.0), Vec2::new(3.0, 5.0));
        assert!(!resolve_ball_paddle(&mut ball, &paddle));
        assert_eq!(ball.vel.y, 5.0);
    }

    #[test]
    fn test_paddle_ignores_rising_ball() {
        let paddle = Paddle::default();
        let mut ball = Ball::new(Vec2::new(250.0, PADDLE_Y), Vec2::new(0.0, -5.0));
        assert!(!resolve_ball_paddle(&mut ball, &paddle));
        assert_eq!(ball.vel.y, -5.0);
    }

    proptest! {
        #[test]
        fn prop_side_wall_flips_and_bounds_overshoot(
            y in 20.0f32..380.0,
            speed in 0.5f32..12.0,
            vy in -8.0f32..8.0,
            from_left in any::<bool>(),
        ) {
            // Ball one half-step away from crossing a side wall
            let step = speed / BALL_SUBSTEPS as f32;
            let (x, vx) = if from_left {
                (BALL_RADIUS + step * 0.5, -speed)
            } else {
                (WORLD_WIDTH - BALL_RADIUS - step * 0.5, speed)
            };
            let mut ball = Ball::new(Vec2::new(x, y), Vec2::new(vx, vy));

            for _ in 0..8 {
                ball.pos += ball.vel / BALL_SUBSTEPS as f32;
                resolve_ball_wall(&mut ball, WORLD_WIDTH);
                prop_assert!(ball.pos.x - ball.radius >= -step);
                prop_assert!(ball.pos.x + ball.radius <= WORLD_WIDTH + step);
            }
            prop_assert_eq!(ball.vel.x.signum(), -vx.signum());
        }

        #[test]
        fn prop_brick_hit_removes_exactly_one_hp(hp in 1u8..=3) {
            let mut brick = brick_at(100.0, 100.0, hp);
            let mut ball = Ball::new(brick.rect.center(), Vec2::new(1.0, -4.0));
            let hit = resolve_ball_brick(&mut ball, &mut brick);
            prop_assert!(hit.is_some());
            prop_assert_eq!(brick.hp, hp - 1);
            prop_assert_eq!(hit.map(|h| h.destroyed), Some(hp == 1));
        }
    }
}
