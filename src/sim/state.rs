//! Game state and core simulation types
//!
//! Everything the tick mutates lives in one `GameState`, passed by `&mut`
//! to each subsystem.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::effects::Effects;
use super::particles::ParticleSystem;
use super::scoring::MatchState;
use super::trail::TrailBuffer;
use crate::clamp;
use crate::consts::*;

/// Which side of the field something belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Sign of horizontal travel toward this side
    pub fn direction(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// How a paddle decides its velocity each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Controller {
    /// Keys, touch buttons or pointer
    Player,
    /// Look-ahead tracking of the ball
    Ai,
}

/// Playing field dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

impl Field {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A paddle. Both sides share this shape; `controller` picks the intent logic.
#[derive(Debug, Clone, Serialize)]
pub struct Paddle {
    pub side: Side,
    pub controller: Controller,
    /// Left edge (fixed per side)
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity (pixels per tick)
    pub vy: f32,
    pub max_speed: f32,
}

impl Paddle {
    pub fn new(side: Side, controller: Controller, field: &Field) -> Self {
        let x = match side {
            Side::Left => PADDLE_INSET,
            Side::Right => field.width - PADDLE_INSET - PADDLE_WIDTH,
        };
        let max_speed = match controller {
            Controller::Player => PLAYER_MAX_SPEED,
            Controller::Ai => AI_MAX_SPEED,
        };
        Self {
            side,
            controller,
            x,
            y: (field.height - PADDLE_HEIGHT) / 2.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            vy: 0.0,
            max_speed,
        }
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Lowest allowed top edge
    #[inline]
    pub fn min_y(&self) -> f32 {
        PADDLE_MARGIN
    }

    /// Highest allowed top edge for a field of the given height
    #[inline]
    pub fn max_y(&self, field_height: f32) -> f32 {
        field_height - self.height - PADDLE_MARGIN
    }

    pub fn clamp_to_field(&mut self, field_height: f32) {
        self.y = clamp(self.y, self.min_y(), self.max_y(field_height));
    }

    /// x of the face the ball bounces off
    pub fn face_x(&self) -> f32 {
        match self.side {
            Side::Left => self.x + self.width,
            Side::Right => self.x,
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Scalar speed; only grows between serves
    pub speed: f32,
    pub radius: f32,
    pub speed_increment: f32,
    pub max_speed: f32,
}

impl Ball {
    pub fn new(field: &Field) -> Self {
        Self {
            pos: field.center(),
            vel: Vec2::new(BALL_START_SPEED, 0.0),
            speed: BALL_START_SPEED,
            radius: BALL_RADIUS,
            speed_increment: BALL_SPEED_INCREMENT,
            max_speed: BALL_MAX_SPEED,
        }
    }

    /// Re-center and launch toward `toward` (random side if `None`)
    pub fn serve<R: Rng>(&mut self, field: &Field, toward: Option<Side>, rng: &mut R) {
        self.pos = field.center();
        self.speed = BALL_START_SPEED;
        let angle = rng.random_range(-SERVE_ANGLE_SPREAD..=SERVE_ANGLE_SPREAD);
        let side = toward.unwrap_or_else(|| {
            if rng.random_bool(0.5) {
                Side::Left
            } else {
                Side::Right
            }
        });
        self.vel = Vec2::new(
            side.direction() * self.speed * angle.cos(),
            self.speed * angle.sin(),
        );
    }

    /// Raise speed by `amount`, capped at `max_speed`
    pub fn accelerate(&mut self, amount: f32) {
        self.speed = (self.speed + amount).min(self.max_speed);
    }
}

/// Discrete events emitted by the simulation for sound, haptics and HUD
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    /// Ball bounced off the top or bottom wall
    WallHit,
    /// Ball bounced off a paddle
    PaddleHit { side: Side, intensity: f32 },
    /// `scorer` won the point
    Score { scorer: Side },
    /// Ball re-launched toward `toward`
    Serve { toward: Side },
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub field: Field,
    /// Left paddle, driven by the player
    pub player: Paddle,
    /// Right paddle, driven by the AI
    pub ai: Paddle,
    pub ball: Ball,
    pub trail: TrailBuffer,
    pub particles: ParticleSystem,
    pub effects: Effects,
    pub match_state: MatchState,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// New match on the default 800x600 field
    pub fn new(seed: u64) -> Self {
        Self::with_field(seed, Field::default())
    }

    /// New match on a custom field; the first serve goes in a random direction
    pub fn with_field(seed: u64, field: Field) -> Self {
        let mut state = Self {
            seed,
            time_ticks: 0,
            field,
            player: Paddle::new(Side::Left, Controller::Player, &field),
            ai: Paddle::new(Side::Right, Controller::Ai, &field),
            ball: Ball::new(&field),
            trail: TrailBuffer::new(TRAIL_LENGTH),
            particles: ParticleSystem::new(MAX_PARTICLES),
            effects: Effects::default(),
            match_state: MatchState::default(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.serve(None);
        state
    }

    /// Re-center the ball and launch it, clearing the trail
    pub fn serve(&mut self, toward: Option<Side>) {
        self.ball.serve(&self.field, toward, &mut self.rng);
        self.trail.clear();
        let toward = if self.ball.vel.x < 0.0 {
            Side::Left
        } else {
            Side::Right
        };
        log::info!("Serve toward {:?}", toward);
        self.events.push(GameEvent::Serve { toward });
    }

    /// Spawn a particle burst using the state's RNG
    pub fn spawn_burst(&mut self, origin: Vec2, count: usize, color: super::Color) {
        self.particles.spawn_burst(origin, count, color, &mut self.rng);
    }

    /// Hand out the events raised since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// JSON dump of the visible state, for the debug hook
    pub fn debug_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            log::warn!("Failed to serialize state: {}", err);
            String::from("{}")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paddles_start_centered_on_their_sides() {
        let state = GameState::new(1);
        assert_eq!(state.player.x, PADDLE_INSET);
        assert_eq!(state.ai.x, FIELD_WIDTH - PADDLE_INSET - PADDLE_WIDTH);
        assert_eq!(state.player.center_y(), FIELD_HEIGHT / 2.0);
        assert_eq!(state.ai.controller, Controller::Ai);
        assert_eq!(state.player.face_x(), PADDLE_INSET + PADDLE_WIDTH);
        assert_eq!(state.ai.face_x(), state.ai.x);
    }

    #[test]
    fn test_serve_angle_within_spread() {
        let field = Field::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut ball = Ball::new(&field);
        for _ in 0..200 {
            ball.speed = 11.0;
            ball.serve(&field, Some(Side::Left), &mut rng);
            assert_eq!(ball.pos, field.center());
            assert_eq!(ball.speed, BALL_START_SPEED);
            assert!(ball.vel.x < 0.0);
            let max_vy = BALL_START_SPEED * SERVE_ANGLE_SPREAD.sin() + 1e-4;
            assert!(ball.vel.y.abs() <= max_vy);
            assert!((ball.vel.length() - ball.speed).abs() < 1e-4);
        }
    }

    #[test]
    fn test_random_serve_uses_both_sides() {
        let field = Field::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut ball = Ball::new(&field);
        let mut left = 0;
        let mut right = 0;
        for _ in 0..100 {
            ball.serve(&field, None, &mut rng);
            if ball.vel.x < 0.0 {
                left += 1;
            } else {
                right += 1;
            }
        }
        assert!(left > 0 && right > 0);
    }

    #[test]
    fn test_accelerate_caps_at_max() {
        let mut ball = Ball::new(&Field::default());
        ball.speed = BALL_MAX_SPEED - 0.1;
        ball.accelerate(BALL_SPEED_INCREMENT);
        assert_eq!(ball.speed, BALL_MAX_SPEED);
    }

    #[test]
    fn test_new_state_emits_initial_serve() {
        let mut state = GameState::new(42);
        let events = state.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GameEvent::Serve { .. }));
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_debug_json_contains_scores() {
        let state = GameState::new(5);
        let json = state.debug_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["match_state"]["left_score"], 0);
        assert!(value["ball"]["speed"].is_number());
    }
}
