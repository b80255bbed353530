//! Ball and paddle physics
//!
//! Fixed step: one call advances one tick with no delta-time scaling.
//! Collision helpers mutate the ball and report what happened; the tick
//! turns those reports into events and effects.

use glam::Vec2;

use super::state::{Ball, Controller, Field, Paddle, Side};
use crate::clamp;
use crate::consts::*;

/// Which wall the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Top,
    Bottom,
}

/// Advance the ball by its velocity
#[inline]
pub fn integrate_ball(ball: &mut Ball) {
    ball.pos += ball.vel;
}

/// Move a paddle by its velocity and keep it inside the field
pub fn move_paddle(paddle: &mut Paddle, field: &Field) {
    paddle.y += paddle.vy;
    paddle.clamp_to_field(field.height);
}

/// Reflect the ball off the top or bottom wall.
///
/// The ball is clamped onto the boundary and the vertical velocity is
/// mirrored without loss. The new sign always points back into the field, so
/// a ball resting on the boundary cannot re-trigger.
pub fn wall_collision(ball: &mut Ball, field: &Field) -> Option<Wall> {
    if ball.pos.y - ball.radius <= 0.0 {
        ball.pos.y = ball.radius;
        ball.vel.y = ball.vel.y.abs();
        Some(Wall::Top)
    } else if ball.pos.y + ball.radius >= field.height {
        ball.pos.y = field.height - ball.radius;
        ball.vel.y = -ball.vel.y.abs();
        Some(Wall::Bottom)
    } else {
        None
    }
}

/// Ball bounding box overlaps the paddle rectangle
pub fn overlaps(ball: &Ball, paddle: &Paddle) -> bool {
    ball.pos.x - ball.radius < paddle.x + paddle.width
        && ball.pos.x + ball.radius > paddle.x
        && ball.pos.y + ball.radius > paddle.y
        && ball.pos.y - ball.radius < paddle.y + paddle.height
}

/// Ball is travelling toward the paddle's side
pub fn approaching(ball: &Ball, paddle: &Paddle) -> bool {
    match paddle.side {
        Side::Left => ball.vel.x < 0.0,
        Side::Right => ball.vel.x > 0.0,
    }
}

/// Impact offset from the paddle center, normalized to [-1, 1]
pub fn relative_impact(ball: &Ball, paddle: &Paddle) -> f32 {
    let half = paddle.height / 2.0;
    clamp((ball.pos.y - paddle.center_y()) / half, -1.0, 1.0)
}

/// Outgoing angle from the impact offset plus the paddle's spin term
pub fn bounce_angle(ball: &Ball, paddle: &Paddle) -> f32 {
    let mut angle = relative_impact(ball, paddle) * MAX_BOUNCE_ANGLE;
    angle += match paddle.controller {
        Controller::Player => clamp(paddle.vy / SPIN_VELOCITY_SCALE, -1.0, 1.0) * SPIN_ANGLE,
        Controller::Ai => clamp(
            (ball.pos.y - paddle.center_y()) * AI_SPIN_FACTOR,
            -AI_SPIN_LIMIT,
            AI_SPIN_LIMIT,
        ),
    };
    clamp(angle, -MAX_OUTGOING_ANGLE, MAX_OUTGOING_ANGLE)
}

/// Impact strength used to scale sound, haptics and particles
pub fn impact_intensity(paddle: &Paddle) -> f32 {
    match paddle.controller {
        Controller::Player => (0.7 + paddle.vy.abs() / 8.0).min(1.8),
        Controller::Ai => 0.9,
    }
}

/// Bounce the ball off `paddle` if they overlap and the ball is incoming.
///
/// Returns the impact intensity on a hit.
pub fn paddle_collision(ball: &mut Ball, paddle: &Paddle) -> Option<f32> {
    if !approaching(ball, paddle) || !overlaps(ball, paddle) {
        return None;
    }

    let away = -paddle.side.direction();
    ball.pos.x = paddle.face_x() + away * (ball.radius + PADDLE_SEPARATION);

    let angle = bounce_angle(ball, paddle);
    let increment = match paddle.controller {
        Controller::Player => ball.speed_increment,
        Controller::Ai => ball.speed_increment * AI_HIT_INCREMENT_SHARE,
    };
    ball.accelerate(increment);

    ball.vel = Vec2::new(away * angle.cos(), angle.sin()) * ball.speed;
    if paddle.controller == Controller::Player {
        ball.vel.y += paddle.vy * SPIN_VELOCITY_TRANSFER;
    }

    Some(impact_intensity(paddle))
}

/// Side that won the point if the ball has fully left the field
pub fn out_of_bounds(ball: &Ball, field: &Field) -> Option<Side> {
    if ball.pos.x + ball.radius < 0.0 {
        Some(Side::Right)
    } else if ball.pos.x - ball.radius > field.width {
        Some(Side::Left)
    } else {
        None
    }
}
