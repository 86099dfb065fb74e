//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display frame, no wall-clock timers
//! - Seeded RNG only
//! - Stable iteration order (bricks and power-ups by id)
//! - No rendering or storage dependencies; terminal outcomes surface as events

pub mod geometry;
pub mod levels;
pub mod state;
pub mod tick;

pub use geometry::{Axis, Rect, deflection_axis, paddle_bounce_vx, rects_overlap};
pub use levels::generate_level;
pub use state::{
    Ball, Brick, EffectTimers, GameEvent, GamePhase, GameState, Paddle, PowerUp, PowerUpKind,
};
pub use tick::{PaddleDir, TickInput, tick};
