//! Game state and core simulation types
//!
//! Everything the step engine mutates lives here; the host only reads it for
//! rendering and feeds terminal outcomes to the persistence layer.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::levels::generate_level;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the serve/continue gesture; nothing moves
    Ready,
    /// Active gameplay
    Playing,
    /// Level cleared; counting down before the next layout appears
    LevelTransition,
    /// Ball lost with lives remaining; counting down before the reset
    LifeLost,
    /// Run ended, state frozen
    GameOver,
}

/// The ball: a square AABB moving at a fixed per-tick velocity
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner
    pub pos: Vec2,
    /// Displacement applied each tick
    pub vel: Vec2,
}

impl Ball {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BALL_SIZE, BALL_SIZE)
    }

    /// Bounds after one more tick of movement (paddle look-ahead)
    pub fn next_rect(&self) -> Rect {
        let next = self.pos + self.vel;
        Rect::new(next.x, next.y, BALL_SIZE, BALL_SIZE)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(BALL_SIZE / 2.0)
    }
}

/// The player's paddle, fixed near the bottom of the play area
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge, clamped to the play area
    pub x: f32,
    /// Either the default or the wide power-up width
    pub width: f32,
}

impl Paddle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, PADDLE_Y, self.width, PADDLE_HEIGHT)
    }

    /// Move horizontally, clamping to `[0, PLAY_WIDTH - width]`
    pub fn move_by(&mut self, dx: f32) {
        self.x = (self.x + dx).clamp(0.0, PLAY_WIDTH - self.width);
    }

    /// Centered at the given width (game start, life reset, width change)
    pub fn centered(width: f32) -> Self {
        Self {
            x: PLAY_WIDTH / 2.0 - width / 2.0,
            width,
        }
    }
}

/// A single brick in the current level layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    /// Stable within a level, ascending in generation order
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Remaining hits before destruction (1 or 2 at generation)
    pub hits_required: u32,
    pub destroyed: bool,
}

impl Brick {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BRICK_WIDTH, BRICK_HEIGHT)
    }

    pub fn is_live(&self) -> bool {
        !self.destroyed
    }
}

/// Power-up capsule types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    WidePaddle,
}

/// A falling power-up capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Downward speed per tick
    pub vel_y: f32,
    /// Cleared on paddle catch or when falling off-screen
    pub active: bool,
}

impl PowerUp {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, POWER_UP_SIZE, POWER_UP_SIZE)
    }
}

/// Remaining ticks on each power-up effect.
///
/// The two categories count down independently: catching one kind never
/// cancels the other's reversion, and re-catching the same kind restarts
/// its window.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EffectTimers {
    pub speed_ticks: u32,
    pub wide_ticks: u32,
}

/// Per-step events surfaced to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A live brick took a hit; `destroyed` when this hit finished it
    BrickHit {
        brick_id: u32,
        points: u32,
        destroyed: bool,
    },
    PowerUpSpawned { kind: PowerUpKind },
    PowerUpActivated { kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    LifeLost { lives_left: u32 },
    LevelComplete { next_level: u32 },
    GameOver { score: u32, level: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG driving power-up drops and serve direction
    rng: Pcg32,
    pub phase: GamePhase,
    pub lives: u32,
    pub score: u32,
    /// 1-based level number
    pub level: u32,
    /// Configured ball speed (difficulty setting)
    base_speed: f32,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Current layout, iteration order = generation order
    pub bricks: Vec<Brick>,
    pub power_ups: Vec<PowerUp>,
    pub effects: EffectTimers,
    /// Countdown for LevelTransition / LifeLost phases
    pub transition_ticks: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Next power-up id
    next_id: u32,
}

impl GameState {
    /// New game at level 1 with full lives, waiting for the serve gesture
    pub fn new(seed: u64, base_speed: f32) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Ready,
            lives: MAX_LIVES,
            score: 0,
            level: 1,
            base_speed,
            ball: Ball {
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
            },
            paddle: Paddle::centered(DEFAULT_PADDLE_WIDTH),
            bricks: generate_level(1),
            power_ups: Vec::new(),
            effects: EffectTimers::default(),
            transition_ticks: 0,
            time_ticks: 0,
            next_id: 1,
        };
        state.reset_ball_and_paddle();
        state
    }

    /// Allocate a power-up id
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(super) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Current per-component ball speed (boosted while the speed window runs)
    pub fn current_speed(&self) -> f32 {
        if self.effects.speed_ticks > 0 {
            FAST_BALL_SPEED
        } else {
            self.base_speed
        }
    }

    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    /// Adopt a new configured speed (difficulty change mid-game).
    ///
    /// Rescales the current velocity to the new magnitude, preserving
    /// direction. Skipped while a speed boost is active; the boost's expiry
    /// reverts to the new base instead.
    pub fn set_base_speed(&mut self, speed: f32) {
        self.base_speed = speed;
        if self.effects.speed_ticks > 0 {
            return;
        }
        let current = self.ball.vel.length();
        if current > 0.0 && speed > 0.0 {
            self.ball.vel *= speed / current;
        }
    }

    /// Center the paddle and re-serve the ball at the configured base speed.
    ///
    /// Any running speed boost ends here; the wide-paddle window is left
    /// alone (a level change does not shrink the paddle early).
    pub fn reset_ball_and_paddle(&mut self) {
        self.effects.speed_ticks = 0;
        let speed = self.base_speed;
        let sign = if self.rng.random::<bool>() { 1.0 } else { -1.0 };
        self.ball = Ball {
            pos: Vec2::new(PLAY_WIDTH / 2.0 - BALL_SIZE / 2.0, PLAY_HEIGHT * 0.6),
            vel: Vec2::new(sign * speed, -speed),
        };
        self.paddle = Paddle::centered(self.paddle.width);
    }

    /// Number of bricks still standing
    pub fn live_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_live()).count()
    }
}
