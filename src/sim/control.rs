//! Paddle velocity intents
//!
//! Both paddles share one data shape; the controller discriminant picks
//! which intent function runs.

use super::ai;
use super::state::{Ball, Controller, Paddle};
use super::tick::TickInput;
use crate::consts::{PLAYER_RELEASE_DECAY, POINTER_FOLLOW_GAIN};

/// Player intent: pointer-follow when a pointer is present, else held keys
pub fn player_velocity(paddle: &Paddle, input: &TickInput) -> f32 {
    if let Some(pointer_y) = input.pointer_y {
        let target = pointer_y - paddle.height / 2.0;
        return (target - paddle.y) * POINTER_FOLLOW_GAIN;
    }
    if input.up {
        -paddle.max_speed
    } else if input.down {
        paddle.max_speed
    } else {
        paddle.vy * PLAYER_RELEASE_DECAY
    }
}

/// Velocity for any paddle this tick
pub fn paddle_velocity(paddle: &Paddle, input: &TickInput, ball: &Ball) -> f32 {
    match paddle.controller {
        Controller::Player => player_velocity(paddle, input),
        Controller::Ai => ai::velocity(paddle, ball),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Field, Side};

    fn player() -> Paddle {
        Paddle::new(Side::Left, Controller::Player, &Field::default())
    }

    #[test]
    fn test_held_keys_drive_full_speed() {
        let paddle = player();
        let up = TickInput {
            up: true,
            ..Default::default()
        };
        assert_eq!(player_velocity(&paddle, &up), -PLAYER_MAX_SPEED);
        let down = TickInput {
            down: true,
            ..Default::default()
        };
        assert_eq!(player_velocity(&paddle, &down), PLAYER_MAX_SPEED);
    }

    #[test]
    fn test_release_decays_velocity() {
        let mut paddle = player();
        paddle.vy = 6.0;
        let v = player_velocity(&paddle, &TickInput::default());
        assert!((v - 6.0 * PLAYER_RELEASE_DECAY).abs() < 1e-6);
    }

    #[test]
    fn test_pointer_overrides_keys() {
        let paddle = player();
        let input = TickInput {
            up: true,
            pointer_y: Some(paddle.center_y() + 20.0),
            ..Default::default()
        };
        let v = player_velocity(&paddle, &input);
        assert!((v - 20.0 * POINTER_FOLLOW_GAIN).abs() < 1e-5);
    }

    #[test]
    fn test_dispatch_by_controller() {
        let field = Field::default();
        let ai_paddle = Paddle::new(Side::Right, Controller::Ai, &field);
        let ball = Ball::new(&field);
        let input = TickInput {
            up: true,
            ..Default::default()
        };
        assert_eq!(
            paddle_velocity(&ai_paddle, &input, &ball),
            ai::velocity(&ai_paddle, &ball)
        );
        assert_eq!(
            paddle_velocity(&player(), &input, &ball),
            -PLAYER_MAX_SPEED
        );
    }
}
