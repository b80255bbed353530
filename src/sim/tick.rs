//! Simulation tick
//!
//! One call per rendered frame: input → AI → physics → collisions →
//! scoring → effect decay.

use glam::Vec2;

use super::control::paddle_velocity;
use super::particles::Color;
use super::physics;
use super::state::{GameEvent, GameState, Side};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Up held (keyboard or touch button)
    pub up: bool,
    /// Down held (keyboard or touch button)
    pub down: bool,
    /// Pointer y in field coordinates; overrides the hold flags
    pub pointer_y: Option<f32>,
    /// Pause toggle edge
    pub pause: bool,
    /// Reset the match
    pub reset: bool,
    /// Real time since the previous tick; drives the serve delay
    pub elapsed_ms: f32,
}

/// Advance the game by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.reset {
        reset_match(state);
    }

    if input.pause {
        let paused = state.match_state.toggle_pause();
        log::info!("{}", if paused { "Paused" } else { "Resumed" });
    }

    // Serve delay is real time and keeps running under a user pause
    if let Some(generation) = state.match_state.advance_serve_timer(input.elapsed_ms) {
        resume_serve(state, generation);
    }

    if !state.match_state.is_paused() {
        state.time_ticks += 1;
        step_paddles(state, input);
        step_ball(state);
    }

    state.particles.update();
    state.effects.decay();
}

/// Zero the scores, cancel any pending serve and serve in a random direction
pub fn reset_match(state: &mut GameState) {
    state.match_state.reset();
    log::info!("Match reset");
    state.serve(None);
}

/// Complete the pending serve with this generation. Returns false if stale.
pub fn resume_serve(state: &mut GameState, generation: u64) -> bool {
    match state.match_state.complete_serve(generation) {
        Some(toward) => {
            state.serve(Some(toward));
            true
        }
        None => {
            log::debug!("Ignoring stale serve (generation {})", generation);
            false
        }
    }
}

fn step_paddles(state: &mut GameState, input: &TickInput) {
    state.player.vy = paddle_velocity(&state.player, input, &state.ball);
    physics::move_paddle(&mut state.player, &state.field);

    state.ai.vy = paddle_velocity(&state.ai, input, &state.ball);
    physics::move_paddle(&mut state.ai, &state.field);
}

fn step_ball(state: &mut GameState) {
    physics::integrate_ball(&mut state.ball);
    state.trail.push(state.ball.pos);

    if physics::wall_collision(&mut state.ball, &state.field).is_some() {
        on_wall_hit(state);
    }

    if let Some(intensity) = physics::paddle_collision(&mut state.ball, &state.player) {
        on_paddle_hit(state, Side::Left, intensity);
    }
    if let Some(intensity) = physics::paddle_collision(&mut state.ball, &state.ai) {
        on_paddle_hit(state, Side::Right, intensity);
    }

    if let Some(scorer) = physics::out_of_bounds(&state.ball, &state.field) {
        on_score(state, scorer);
    }
}

fn on_wall_hit(state: &mut GameState) {
    let at = state.ball.pos;
    state.spawn_burst(at, 10, Color::WALL_SPARK);
    state.effects.trigger_shake(3.0, 140.0);
    state.events.push(GameEvent::WallHit);
}

fn on_paddle_hit(state: &mut GameState, side: Side, intensity: f32) {
    let at = state.ball.pos;
    let (count, magnitude, duration_ms) = match side {
        Side::Left => (22, 8.0, 260.0),
        Side::Right => (16, 6.0, 220.0),
    };
    state.spawn_burst(at, count, Color::PADDLE_SPARK);
    state.effects.trigger_shake(magnitude, duration_ms);
    log::debug!(
        "{:?} paddle hit: speed {:.2}, intensity {:.2}",
        side,
        state.ball.speed,
        intensity
    );
    state.events.push(GameEvent::PaddleHit { side, intensity });
}

fn on_score(state: &mut GameState, scorer: Side) {
    let loser = scorer.opposite();
    let (origin, color) = match loser {
        Side::Left => (Vec2::new(80.0, state.field.height / 2.0), Color::LEFT_LOST),
        Side::Right => (
            Vec2::new(state.field.width - 80.0, state.field.height / 2.0),
            Color::RIGHT_LOST,
        ),
    };
    state.spawn_burst(origin, 50, color);
    state.effects.trigger_shake(12.0, 420.0);
    state.effects.trigger_flash(0.65);

    let serve = state.match_state.award_point(scorer);
    log::info!(
        "Point to {:?}: {} - {} (serve toward {:?} in {} ms)",
        scorer,
        state.match_state.left_score,
        state.match_state.right_score,
        serve.toward,
        serve.remaining_ms
    );
    state.events.push(GameEvent::Score { scorer });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scoring::{PauseReason, Phase};

    /// State with the ball parked mid-field, moving straight right
    fn quiet_state() -> GameState {
        let mut state = GameState::new(12345);
        state.take_events();
        state.ball.pos = Vec2::new(400.0, 300.0);
        state.ball.vel = Vec2::new(5.0, 0.0);
        state.ball.speed = 5.0;
        state
    }

    fn frame() -> TickInput {
        TickInput {
            elapsed_ms: 16.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_straight_ball_reflects_off_ai_paddle() {
        let mut state = quiet_state();
        state.ball.pos = Vec2::new(757.0, 300.0);
        // The AI steps AI_MAX_SPEED toward its look-ahead target this tick,
        // which lands its center on the ball's line
        state.ai.y = 300.0 - state.ai.height / 2.0 - AI_MAX_SPEED;
        let start_speed = state.ball.speed;

        tick(&mut state, &frame());

        let events = state.take_events();
        assert!(matches!(
            events.as_slice(),
            [GameEvent::PaddleHit {
                side: Side::Right,
                ..
            }]
        ));
        let expected = start_speed + BALL_SPEED_INCREMENT * AI_HIT_INCREMENT_SHARE;
        assert!((state.ball.speed - expected).abs() < 1e-5);
        assert!((state.ball.vel.x + state.ball.speed).abs() < 1e-3);
        assert!(state.ball.vel.y.abs() < 1e-3);
        assert_eq!(state.particles.len(), 16);
        assert_eq!(state.effects.shake_magnitude, 6.0);
    }

    #[test]
    fn test_held_down_player_hit_carries_spin_and_intensity() {
        let mut state = quiet_state();
        state.ball.pos = Vec2::new(43.0, 300.0);
        state.ball.vel = Vec2::new(-5.0, 0.0);
        let start_speed = state.ball.speed;
        let input = TickInput {
            down: true,
            ..frame()
        };

        tick(&mut state, &input);

        assert_eq!(state.player.vy, PLAYER_MAX_SPEED);
        let events = state.take_events();
        let [GameEvent::PaddleHit { side, intensity }] = events.as_slice() else {
            panic!("expected a single paddle hit, got {:?}", events);
        };
        assert_eq!(*side, Side::Left);
        assert!(*intensity > 0.7);
        assert!((*intensity - (0.7 + PLAYER_MAX_SPEED / 8.0)).abs() < 1e-6);

        assert!((state.ball.speed - (start_speed + BALL_SPEED_INCREMENT)).abs() < 1e-6);
        assert!(state.ball.vel.x > 0.0);
        // Downward paddle motion sends the ball downward off a near-center hit
        assert!(state.ball.vel.y > 0.5);
        assert_eq!(state.ball.pos.x, state.player.face_x() + BALL_RADIUS + PADDLE_SEPARATION);

        assert_eq!(state.particles.len(), 22);
        assert_eq!(state.effects.shake_magnitude, 8.0);
        assert_eq!(state.effects.shake_ms, 260.0 - TICK_MS_ESTIMATE);
    }

    #[test]
    fn test_ball_past_left_edge_scores_for_right_and_serves_left() {
        let mut state = quiet_state();
        state.ball.pos = Vec2::new(-4.0, 300.0);
        state.ball.vel = Vec2::new(-5.0, 0.0);
        // Keep the player paddle out of the way
        state.player.y = PADDLE_MARGIN;

        tick(&mut state, &frame());
        assert_eq!(state.match_state.right_score, 1);
        assert_eq!(state.match_state.left_score, 0);
        assert_eq!(
            state.take_events(),
            vec![GameEvent::Score { scorer: Side::Right }]
        );
        assert_eq!(state.effects.flash_alpha, 0.65 - FLASH_DECAY);
        assert!(state.particles.len() >= 40);

        // Frozen while the serve delay runs
        let frozen = state.ball.pos;
        let mut ticks = 0;
        while state.match_state.pending_serve.is_some() {
            tick(&mut state, &frame());
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(ticks, 44); // 700 ms / 16 ms, rounded up
        let events = state.take_events();
        assert!(events.contains(&GameEvent::Serve { toward: Side::Left }));
        assert_eq!(state.match_state.right_score, 1);
        assert_ne!(frozen, state.ball.pos);

        // Served from the center toward the left; one tick of travel already applied
        assert!(state.ball.vel.x < 0.0);
        assert_eq!(state.ball.speed, BALL_START_SPEED);
        assert!(state.ball.vel.y.abs() <= state.ball.speed * SERVE_ANGLE_SPREAD.sin() + 1e-4);
        let center = state.field.center();
        assert!((state.ball.pos - state.ball.vel - center).length() < 1e-3);
    }

    #[test]
    fn test_ball_past_right_edge_scores_for_left() {
        let mut state = quiet_state();
        state.ball.pos = Vec2::new(FIELD_WIDTH + 5.0, 300.0);
        state.ai.y = PADDLE_MARGIN;
        tick(&mut state, &frame());
        assert_eq!(state.match_state.left_score, 1);
        assert_eq!(
            state.match_state.pending_serve.map(|s| s.toward),
            Some(Side::Right)
        );
    }

    #[test]
    fn test_wall_hit_event_and_effects() {
        let mut state = quiet_state();
        state.ball.pos = Vec2::new(400.0, 10.0);
        state.ball.vel = Vec2::new(3.0, -4.0);
        tick(&mut state, &frame());
        assert_eq!(state.take_events(), vec![GameEvent::WallHit]);
        assert_eq!(state.ball.pos.y, state.ball.radius);
        assert_eq!(state.ball.vel.y, 4.0);
        assert_eq!(state.particles.len(), 10);
        assert_eq!(state.effects.shake_magnitude, 3.0);
    }

    #[test]
    fn test_pause_freezes_but_effects_decay() {
        let mut state = quiet_state();
        state.effects.trigger_flash(0.5);
        let pause = TickInput {
            pause: true,
            ..frame()
        };
        tick(&mut state, &pause);
        assert_eq!(state.match_state.phase(), Phase::Paused(PauseReason::UserToggle));

        let ball = state.ball.pos;
        let ticks = state.time_ticks;
        tick(&mut state, &frame());
        assert_eq!(state.ball.pos, ball);
        assert_eq!(state.time_ticks, ticks);
        assert!(state.effects.flash_alpha < 0.5);

        tick(&mut state, &pause);
        assert_eq!(state.match_state.phase(), Phase::Playing);
        assert_ne!(state.ball.pos, ball);
    }

    #[test]
    fn test_serve_during_user_pause_keeps_game_paused() {
        let mut state = quiet_state();
        state.ball.pos = Vec2::new(-9.0, 300.0);
        state.ball.vel = Vec2::new(-5.0, 0.0);
        state.player.y = PADDLE_MARGIN;
        tick(&mut state, &frame());
        tick(
            &mut state,
            &TickInput {
                pause: true,
                ..frame()
            },
        );

        let long = TickInput {
            elapsed_ms: 1000.0,
            ..Default::default()
        };
        tick(&mut state, &long);
        assert!(state.match_state.pending_serve.is_none());
        assert_eq!(state.match_state.phase(), Phase::Paused(PauseReason::UserToggle));
        assert_eq!(state.ball.pos, state.field.center());
    }

    #[test]
    fn test_reset_cancels_pending_serve() {
        let mut state = quiet_state();
        state.ball.pos = Vec2::new(-9.0, 300.0);
        state.ball.vel = Vec2::new(-5.0, 0.0);
        state.player.y = PADDLE_MARGIN;
        tick(&mut state, &frame());
        let stale = state.match_state.pending_serve.expect("serve pending").generation;

        tick(
            &mut state,
            &TickInput {
                reset: true,
                ..frame()
            },
        );
        assert_eq!(state.match_state.left_score, 0);
        assert_eq!(state.match_state.right_score, 0);
        assert_eq!(state.match_state.phase(), Phase::Playing);
        assert!(!resume_serve(&mut state, stale));
        let serves = state
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Serve { .. }))
            .count();
        assert_eq!(serves, 1);
    }

    #[test]
    fn test_trail_follows_ball_and_clears_on_serve() {
        let mut state = quiet_state();
        for _ in 0..30 {
            tick(&mut state, &frame());
        }
        assert_eq!(state.trail.len(), TRAIL_LENGTH);
        assert_eq!(state.trail.iter().next(), Some(state.ball.pos));
        reset_match(&mut state);
        assert!(state.trail.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        let inputs = [
            TickInput {
                up: true,
                ..frame()
            },
            TickInput {
                pointer_y: Some(120.0),
                ..frame()
            },
            frame(),
        ];
        for _ in 0..200 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }
        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.match_state.right_score, b.match_state.right_score);
        assert_eq!(a.particles.len(), b.particles.len());
    }
}
