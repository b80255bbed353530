//! Opponent paddle control
//!
//! Proportional tracking of a point slightly ahead of the ball. Bounded speed
//! and a low gain keep it beatable.

use super::state::{Ball, Paddle};
use crate::clamp;
use crate::consts::{AI_GAIN, AI_LOOK_AHEAD_FACTOR, AI_MAX_LOOK_AHEAD};

/// Predicted ball y the AI aims its paddle center at
pub fn target_y(ball: &Ball) -> f32 {
    let look_ahead = clamp(
        ball.vel.x * AI_LOOK_AHEAD_FACTOR,
        -AI_MAX_LOOK_AHEAD,
        AI_MAX_LOOK_AHEAD,
    );
    ball.pos.y + look_ahead
}

/// Velocity intent for the AI paddle this tick
pub fn velocity(paddle: &Paddle, ball: &Ball) -> f32 {
    let error = target_y(ball) - paddle.center_y();
    clamp(error * AI_GAIN, -paddle.max_speed, paddle.max_speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Controller, Field, Side};
    use glam::Vec2;

    fn setup() -> (Paddle, Ball) {
        let field = Field::default();
        (
            Paddle::new(Side::Right, Controller::Ai, &field),
            Ball::new(&field),
        )
    }

    #[test]
    fn test_look_ahead_clamped() {
        let (_, mut ball) = setup();
        ball.pos = Vec2::new(400.0, 300.0);
        ball.vel = Vec2::new(5.0, 0.0);
        assert_eq!(target_y(&ball), 350.0);
        ball.vel = Vec2::new(14.0, 0.0);
        assert_eq!(target_y(&ball), 300.0 + AI_MAX_LOOK_AHEAD);
        ball.vel = Vec2::new(-14.0, 0.0);
        assert_eq!(target_y(&ball), 300.0 - AI_MAX_LOOK_AHEAD);
    }

    #[test]
    fn test_small_error_is_proportional() {
        let (paddle, mut ball) = setup();
        ball.pos = Vec2::new(400.0, paddle.center_y() + 10.0);
        ball.vel = Vec2::ZERO;
        assert!((velocity(&paddle, &ball) - 10.0 * AI_GAIN).abs() < 1e-6);
    }

    #[test]
    fn test_large_error_clamped_to_max_speed() {
        let (paddle, mut ball) = setup();
        ball.pos = Vec2::new(400.0, 590.0);
        ball.vel = Vec2::new(5.0, 0.0);
        assert_eq!(velocity(&paddle, &ball), AI_MAX_SPEED);
        ball.pos.y = 0.0;
        ball.vel = Vec2::new(-5.0, 0.0);
        assert_eq!(velocity(&paddle, &ball), -AI_MAX_SPEED);
    }
}
