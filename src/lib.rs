//! Glow Pong - single-player Pong against an AI paddle
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, AI, effects, match state)
//! - `renderer`: Frame snapshots and the Canvas2D renderer
//! - `audio`: Procedural sound recipes and Web Audio playback
//! - `platform`: Input folding, haptics and browser glue
//! - `settings`: In-memory preferences

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Default field dimensions (canvas pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Gap kept between a paddle and the top/bottom edge
    pub const PADDLE_MARGIN: f32 = 6.0;
    /// Distance from the side edge to the paddle's outer face
    pub const PADDLE_INSET: f32 = 20.0;
    pub const PADDLE_WIDTH: f32 = 12.0;
    pub const PADDLE_HEIGHT: f32 = 90.0;

    /// Player paddle: held-key speed, release decay, pointer-follow gain
    pub const PLAYER_MAX_SPEED: f32 = 6.0;
    pub const PLAYER_RELEASE_DECAY: f32 = 0.85;
    pub const POINTER_FOLLOW_GAIN: f32 = 0.35;

    /// AI paddle tracking
    pub const AI_MAX_SPEED: f32 = 4.6;
    pub const AI_GAIN: f32 = 0.12;
    pub const AI_LOOK_AHEAD_FACTOR: f32 = 10.0;
    pub const AI_MAX_LOOK_AHEAD: f32 = 70.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_START_SPEED: f32 = 5.0;
    pub const BALL_SPEED_INCREMENT: f32 = 0.35;
    pub const BALL_MAX_SPEED: f32 = 14.0;
    /// Share of the speed increment applied on AI hits
    pub const AI_HIT_INCREMENT_SHARE: f32 = 0.6;
    /// Gap left between the ball and the paddle face after a hit
    pub const PADDLE_SEPARATION: f32 = 0.5;

    /// Largest bounce angle from impact offset alone (75 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = 5.0 * PI / 12.0;
    /// Hard limit on the outgoing angle once spin is added (80 degrees)
    pub const MAX_OUTGOING_ANGLE: f32 = 4.0 * PI / 9.0;
    /// Player spin: paddle vy is divided by this before clamping to ±1
    pub const SPIN_VELOCITY_SCALE: f32 = 10.0;
    pub const SPIN_ANGLE: f32 = 0.45;
    /// Fraction of player paddle vy added straight onto the ball's vy
    pub const SPIN_VELOCITY_TRANSFER: f32 = 0.08;
    /// AI spin: offset in pixels times this, clamped to ±AI_SPIN_LIMIT
    pub const AI_SPIN_FACTOR: f32 = 0.01;
    pub const AI_SPIN_LIMIT: f32 = 0.4;

    /// Serve angle spread either side of horizontal (30 degrees)
    pub const SERVE_ANGLE_SPREAD: f32 = PI / 6.0;
    /// Real-time delay between a point and the next serve
    pub const SERVE_DELAY_MS: f32 = 700.0;

    /// Approximate frame time used for shake decay
    pub const TICK_MS_ESTIMATE: f32 = 16.0;
    /// Flash alpha lost per tick
    pub const FLASH_DECAY: f32 = 0.04;

    /// Ball trail capacity
    pub const TRAIL_LENGTH: usize = 18;

    /// Particle physics
    pub const PARTICLE_GRAVITY: f32 = 0.04;
    pub const PARTICLE_DRAG: f32 = 0.995;
    pub const PARTICLE_SHRINK: f32 = 0.995;
    pub const PARTICLE_MIN_SIZE: f32 = 0.2;
    pub const PARTICLE_UPWARD_BIAS: f32 = 0.6;
    /// Default particle pool size
    pub const MAX_PARTICLES: usize = 512;
}

/// Clamp that tolerates an inverted range (returns `lo` when `lo > hi`)
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.min(hi).max(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 3.0), 3.0);
        assert_eq!(clamp(-1.0, 0.0, 3.0), 0.0);
        assert_eq!(clamp(2.0, 0.0, 3.0), 2.0);
        // Inverted range (field shorter than a paddle) never panics
        assert_eq!(clamp(2.0, 5.0, 3.0), 5.0);
    }
}
