//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed step per rendered frame
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod ai;
pub mod control;
pub mod effects;
pub mod particles;
pub mod physics;
pub mod scoring;
pub mod state;
pub mod tick;
pub mod trail;

pub use effects::Effects;
pub use particles::{Color, Particle, ParticleSystem};
pub use scoring::{MatchState, PauseReason, PendingServe, Phase};
pub use state::{Ball, Controller, Field, GameEvent, GameState, Paddle, Side};
pub use tick::{TickInput, reset_match, resume_serve, tick};
pub use trail::TrailBuffer;
