//! Per-frame render snapshot
//!
//! `Frame` is everything the renderer needs, computed from the game state
//! and settings without touching either. The renderer owns no game state.

use glam::Vec2;
use rand::Rng;

use crate::Settings;
use crate::clamp;
use crate::sim::{Color, GameState, Side};

/// Trail after-image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailDot {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

/// Particle ready to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spark {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
    pub color: Color,
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Read-only view of one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    /// Scene translation from screen shake
    pub offset: Vec2,
    /// Blur radius in pixels
    pub blur_px: f32,
    /// Flash overlay alpha (0 = no overlay)
    pub flash_alpha: f32,
    pub ball: Vec2,
    pub ball_radius: f32,
    pub paddles: [Rect; 2],
    pub trail: Vec<TrailDot>,
    pub sparks: Vec<Spark>,
    pub paused: bool,
    pub scores: (u32, u32),
}

/// Blur grows with ball speed: none at serve speed, 3 px at the fastest
pub fn blur_for_velocity(vel: Vec2) -> f32 {
    clamp((vel.x.abs() + vel.y.abs() - 5.0) / 5.0, 0.0, 3.0)
}

/// Fade-in/out of a particle from its remaining life
pub fn spark_alpha(life: i32) -> f32 {
    clamp(life as f32 / 40.0, 0.0, 1.0)
}

impl Frame {
    /// Snapshot the state. `rng` only drives the shake jitter.
    pub fn capture<R: Rng>(state: &GameState, settings: &Settings, rng: &mut R) -> Self {
        let offset = if settings.effective_screen_shake() {
            state.effects.shake_offset(rng)
        } else {
            Vec2::ZERO
        };

        let blur_px = if settings.effective_blur() {
            blur_for_velocity(state.ball.vel)
        } else {
            0.0
        };

        let flash_alpha = if settings.effective_flash() && state.effects.flash_visible() {
            state.effects.flash_alpha
        } else {
            0.0
        };

        let trail = if settings.trails {
            let shown = (state.trail.len() as f32 * settings.quality.trail_quality()).ceil() as usize;
            state
                .trail
                .iter()
                .enumerate()
                .take(shown)
                .map(|(i, pos)| {
                    let fade = state.trail.fade(i);
                    TrailDot {
                        pos,
                        radius: state.ball.radius * fade * 1.1,
                        alpha: fade * 0.35,
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        let sparks = state
            .particles
            .iter()
            .map(|p| Spark {
                pos: p.pos,
                radius: p.size,
                alpha: spark_alpha(p.life),
                color: p.color,
            })
            .collect();

        let rect = |p: &crate::sim::Paddle| Rect {
            x: p.x,
            y: p.y,
            w: p.width,
            h: p.height,
        };

        Self {
            width: state.field.width,
            height: state.field.height,
            offset,
            blur_px,
            flash_alpha,
            ball: state.ball.pos,
            ball_radius: state.ball.radius,
            paddles: [rect(&state.player), rect(&state.ai)],
            trail,
            sparks,
            paused: state.match_state.is_paused(),
            scores: (
                state.match_state.score(Side::Left),
                state.match_state.score(Side::Right),
            ),
        }
    }
}
