//! Demo AI that drives the paddle
//!
//! Used for attract mode and the headless native runner. It only produces
//! a `Steer` signal, so it plays by the same rules as a human.

use crate::consts::*;
use crate::sim::{Ball, GameState, Steer};

/// Below this distance from the target the paddle holds still
const DEADZONE: f32 = PADDLE_SPEED * 0.5;

/// Pick a steering direction for the current state
pub fn steer(state: &GameState) -> Steer {
    let Some(target) = target_x(state) else {
        return Steer::None;
    };
    let delta = target - state.paddle.center_x();
    if delta.abs() < DEADZONE {
        Steer::None
    } else if delta < 0.0 {
        Steer::Left
    } else {
        Steer::Right
    }
}

/// World x the paddle center should head for
fn target_x(state: &GameState) -> Option<f32> {
    // Most dangerous ball: descending and lowest on screen
    let threat = state
        .balls
        .iter()
        .filter(|b| b.vel.y > 0.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(ball) = threat {
        // Vary the contact point so rallies don't loop forever
        let t = state.ticks as f32 * 0.01;
        let offset = (t.sin() * 0.3 + (t * 0.7).sin() * 0.15) * state.paddle.width * 0.5;
        return Some(predict_landing_x(ball) + offset);
    }

    // Nothing falling: go grab the lowest pickup
    let pickup = state
        .power_ups
        .iter()
        .filter(|p| p.active)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
    if let Some(power_up) = pickup {
        return Some(power_up.rect().center().x);
    }

    state.balls.first().map(|b| b.pos.x)
}

/// Where a descending ball crosses the paddle line, folding side-wall
/// reflections into the playfield
pub fn predict_landing_x(ball: &Ball) -> f32 {
    let line = PADDLE_Y - ball.radius;
    if ball.vel.y <= 0.0 || ball.pos.y >= line {
        return ball.pos.x;
    }
    let t = (line - ball.pos.y) / ball.vel.y;
    let raw = ball.pos.x + ball.vel.x * t;

    let min = ball.radius;
    let span = WORLD_WIDTH - 2.0 * ball.radius;
    if span <= 0.0 {
        return WORLD_WIDTH / 2.0;
    }
    let period = 2.0 * span;
    let folded = (raw - min).rem_euclid(period);
    if folded <= span {
        min + folded
    } else {
        min + period - folded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{PowerUp, PowerUpKind, TickInput, tick};
    use glam::Vec2;

    #[test]
    fn test_straight_drop_prediction() {
        let ball = Ball::new(Vec2::new(100.0, 100.0), Vec2::new(0.0, 4.0));
        assert_eq!(predict_landing_x(&ball), 100.0);
    }

    #[test]
    fn test_prediction_folds_walls() {
        // Heads right far enough to bounce off the right wall
        let ball = Ball::new(Vec2::new(400.0, PADDLE_Y - BALL_RADIUS - 100.0), Vec2::new(2.0, 1.0));
        // Raw x = 600, right limit 490 -> reflected to 380
        assert!((predict_landing_x(&ball) - 380.0).abs() < 1e-3);

        let ball = Ball::new(Vec2::new(50.0, PADDLE_Y - BALL_RADIUS - 100.0), Vec2::new(-1.0, 1.0));
        // Raw x = -50, left limit 10 -> reflected to 70
        assert!((predict_landing_x(&ball) - 70.0).abs() < 1e-3);
    }

    #[test]
    fn test_steers_toward_falling_ball() {
        let mut state = GameState::new(3);
        state.ticks = 0;
        state.balls = vec![Ball::new(Vec2::new(40.0, 300.0), Vec2::new(0.0, 3.0))];
        assert_eq!(steer(&state), Steer::Left);

        state.balls = vec![Ball::new(Vec2::new(460.0, 300.0), Vec2::new(0.0, 3.0))];
        assert_eq!(steer(&state), Steer::Right);

        let center = state.paddle.center_x();
        state.balls = vec![Ball::new(Vec2::new(center, 300.0), Vec2::new(0.0, 3.0))];
        assert_eq!(steer(&state), Steer::None);
    }

    #[test]
    fn test_chases_pickup_when_safe() {
        let mut state = GameState::new(3);
        state.balls = vec![Ball::new(Vec2::new(250.0, 200.0), Vec2::new(1.0, -3.0))];
        state
            .power_ups
            .push(PowerUp::centered_at(Vec2::new(30.0, 250.0), PowerUpKind::MultiBall));
        assert_eq!(steer(&state), Steer::Left);
    }

    #[test]
    fn test_autopilot_keeps_ball_alive() {
        let mut state = GameState::new(11);
        let mut lost = false;
        for _ in 0..600 {
            let input = TickInput { steer: steer(&state) };
            if tick(&mut state, &input).round_lost {
                lost = true;
                break;
            }
        }
        assert!(!lost);
        assert!(state.score > 0);
    }
}
