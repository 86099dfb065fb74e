//! Brick Breaker - simulation core and local persistence
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, entities, step engine, levels)
//! - `store`: Player/session persistence over a local key-value store
//! - `settings`: Difficulty and ball speed preferences
//!
//! The host render loop owns input and display; it calls `sim::tick` once per
//! frame and reacts to the returned events (scoring, audio, persistence).

pub mod settings;
pub mod sim;
pub mod store;

pub use settings::{Difficulty, Settings};
pub use sim::{GameEvent, GamePhase, GameState, PaddleDir, TickInput, tick};
pub use store::{GameSession, Player, PlayerStore, StoreError};

/// Game configuration constants
pub mod consts {
    /// Simulation tick rate (one tick per display frame)
    pub const TICK_HZ: u32 = 60;

    /// Play area dimensions (logical pixels, top-left origin, +y down)
    pub const PLAY_WIDTH: f32 = 420.0;
    pub const PLAY_HEIGHT: f32 = 760.0;

    /// Ball is a square this many pixels on a side
    pub const BALL_SIZE: f32 = 20.0;

    /// Paddle defaults
    pub const DEFAULT_PADDLE_WIDTH: f32 = 120.0;
    pub const WIDE_PADDLE_WIDTH: f32 = 180.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    /// Gap between paddle and the bottom of the play area
    pub const PADDLE_BOTTOM_MARGIN: f32 = 30.0;
    /// Fixed paddle y (top edge)
    pub const PADDLE_Y: f32 = PLAY_HEIGHT - PADDLE_HEIGHT - PADDLE_BOTTOM_MARGIN;
    /// Paddle movement per tick while a direction is held
    pub const PADDLE_SPEED: f32 = 15.0;

    /// Ball speeds (pixels per tick)
    pub const DEFAULT_BALL_SPEED: f32 = 6.0;
    pub const FAST_BALL_SPEED: f32 = 9.0;

    /// Brick layout
    pub const BRICK_WIDTH: f32 = 55.0;
    pub const BRICK_HEIGHT: f32 = 25.0;
    pub const BRICK_SPACING: f32 = 5.0;
    /// Y of the first brick row
    pub const BRICK_TOP_OFFSET: f32 = 120.0;
    pub const GRID_COLS: u32 = 7;
    pub const GRID_ROWS: u32 = 6;

    /// Power-up capsules
    pub const POWER_UP_SIZE: f32 = 25.0;
    /// Downward fall speed (pixels per tick)
    pub const POWER_UP_FALL_SPEED: f32 = 3.0;
    /// Effect duration: 5 seconds
    pub const POWER_UP_DURATION_TICKS: u32 = 5 * TICK_HZ;
    /// Chance a destroyed brick drops a capsule
    pub const POWER_UP_DROP_CHANCE: f32 = 0.1;

    /// Lives per game
    pub const MAX_LIVES: u32 = 3;

    /// Scoring
    pub const BRICK_HIT_POINTS: u32 = 10;
    pub const BRICK_DESTROY_POINTS: u32 = 20;

    /// Delay before the next level layout appears (300 ms)
    pub const LEVEL_CLEAR_DELAY_TICKS: u32 = 18;
    /// Delay after losing a life before the ball resets (500 ms)
    pub const LIFE_LOST_DELAY_TICKS: u32 = 30;
}
