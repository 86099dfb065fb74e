//! Per-frame simulation step
//!
//! The host calls `tick` once per display frame. Deferred transitions
//! (level clear, life lost) are counted down here in ticks rather than
//! scheduled on a wall clock, so tests and replays stay deterministic and
//! nothing can fire after the state is dropped.

use rand::Rng;

use super::geometry::{Axis, deflection_axis, paddle_bounce_vx, rects_overlap};
use super::levels::generate_level;
use super::state::{GameEvent, GamePhase, GameState, PowerUp, PowerUpKind};
use crate::consts::*;

/// Held paddle direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleDir {
    Left,
    Right,
}

/// Input sampled by the host for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Direction currently held, if any
    pub dir: Option<PaddleDir>,
    /// Tap-to-start/continue gesture
    pub serve: bool,
}

/// Advance the game by one tick, returning the events produced.
///
/// `GameOver` is terminal: the state freezes and every further call is a
/// no-op. `Ready` waits for the serve gesture.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::GameOver => return events,
        GamePhase::Ready => {
            if input.serve {
                state.phase = GamePhase::Playing;
            }
            return events;
        }
        GamePhase::LevelTransition => {
            state.time_ticks += 1;
            tick_effects(state, &mut events);
            state.transition_ticks = state.transition_ticks.saturating_sub(1);
            if state.transition_ticks == 0 {
                state.level += 1;
                state.reset_ball_and_paddle();
                state.bricks = generate_level(state.level);
                state.phase = GamePhase::Playing;
                events.push(GameEvent::LevelComplete {
                    next_level: state.level,
                });
            }
            return events;
        }
        GamePhase::LifeLost => {
            state.time_ticks += 1;
            tick_effects(state, &mut events);
            state.transition_ticks = state.transition_ticks.saturating_sub(1);
            if state.transition_ticks == 0 {
                // Fresh serve: effects and capsules do not carry across lives
                state.effects = Default::default();
                state.paddle.width = DEFAULT_PADDLE_WIDTH;
                state.power_ups.clear();
                state.reset_ball_and_paddle();
                state.phase = GamePhase::Ready;
            }
            return events;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    // 1. Paddle input
    if let Some(dir) = input.dir {
        let dx = match dir {
            PaddleDir::Left => -PADDLE_SPEED,
            PaddleDir::Right => PADDLE_SPEED,
        };
        state.paddle.move_by(dx);
    }

    // 2. Power-up effect countdowns
    tick_effects(state, &mut events);

    // 3. Paddle collision: next-position look-ahead, only while descending
    if state.ball.vel.y > 0.0 {
        let next = state.ball.next_rect();
        let paddle = state.paddle.rect();
        let horizontal_overlap = next.right() > paddle.left() && next.left() < paddle.right();
        // The top bound keeps a ball already past the paddle from bouncing back
        if horizontal_overlap && next.bottom() >= paddle.top() && next.top() < paddle.bottom() {
            state.ball.vel.y = -state.ball.vel.y;
            state.ball.pos.y = PADDLE_Y - BALL_SIZE;
            state.ball.vel.x = paddle_bounce_vx(
                state.ball.center().x,
                paddle.left(),
                state.paddle.width,
                state.current_speed(),
            );
        }
    }

    // 4. Brick collisions on current bounds, in generation order
    let ball_rect = state.ball.rect();
    let ball_center = state.ball.center();
    let mut destroyed_this_step = false;
    for i in 0..state.bricks.len() {
        if !state.bricks[i].is_live() || !rects_overlap(&ball_rect, &state.bricks[i].rect()) {
            continue;
        }

        let brick_center = state.bricks[i].rect().center();
        match deflection_axis(ball_center, brick_center) {
            Axis::Horizontal => state.ball.vel.x = -state.ball.vel.x,
            Axis::Vertical => state.ball.vel.y = -state.ball.vel.y,
        }

        state.bricks[i].hits_required -= 1;
        let destroyed = state.bricks[i].hits_required == 0;
        let points = if destroyed {
            BRICK_DESTROY_POINTS
        } else {
            BRICK_HIT_POINTS
        };
        state.score += points;

        if destroyed {
            state.bricks[i].destroyed = true;
            destroyed_this_step = true;
            maybe_spawn_power_up(state, i, &mut events);
        }

        events.push(GameEvent::BrickHit {
            brick_id: state.bricks[i].id,
            points,
            destroyed,
        });
    }

    // 5. Integrate, then contain horizontally/top so the tick never ends with
    // the ball outside the side walls
    state.ball.pos += state.ball.vel;
    resolve_wall_collisions(state);

    // 6. Falling power-ups: catch on the paddle or drop off-screen
    update_power_ups(state, &mut events);

    // 7. Level complete: only a destruction this step can clear the level
    if destroyed_this_step && state.live_bricks() == 0 {
        state.phase = GamePhase::LevelTransition;
        state.transition_ticks = LEVEL_CLEAR_DELAY_TICKS;
        return events;
    }

    // 8. Life loss / game over once the ball falls past the play area
    if state.ball.rect().top() > PLAY_HEIGHT {
        state.lives = state.lives.saturating_sub(1);
        events.push(GameEvent::LifeLost {
            lives_left: state.lives,
        });
        if state.lives == 0 {
            state.phase = GamePhase::GameOver;
            events.push(GameEvent::GameOver {
                score: state.score,
                level: state.level,
            });
        } else {
            state.phase = GamePhase::LifeLost;
            state.transition_ticks = LIFE_LOST_DELAY_TICKS;
        }
    }

    events
}

/// Reflect and clamp against the side and top walls
fn resolve_wall_collisions(state: &mut GameState) {
    let rect = state.ball.rect();
    if rect.left() <= 0.0 || rect.right() >= PLAY_WIDTH {
        state.ball.vel.x = -state.ball.vel.x;
        state.ball.pos.x = if rect.left() <= 0.0 {
            0.0
        } else {
            PLAY_WIDTH - BALL_SIZE
        };
    }
    if rect.top() <= 0.0 {
        state.ball.vel.y = -state.ball.vel.y;
        state.ball.pos.y = 0.0;
    }
}

/// Count down effect windows; revert paddle width / ball speed on expiry.
///
/// The two windows are independent by design: catching speed while wide is
/// active must not cancel the wide reversion (the source tracked a single
/// shared timer, which could leave the paddle permanently wide).
fn tick_effects(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.effects.speed_ticks > 0 {
        state.effects.speed_ticks -= 1;
        if state.effects.speed_ticks == 0 {
            rescale_ball_speed(state, state.base_speed());
            events.push(GameEvent::PowerUpExpired {
                kind: PowerUpKind::Speed,
            });
        }
    }
    if state.effects.wide_ticks > 0 {
        state.effects.wide_ticks -= 1;
        if state.effects.wide_ticks == 0 {
            state.paddle.width = DEFAULT_PADDLE_WIDTH;
            state.paddle.move_by(0.0);
            events.push(GameEvent::PowerUpExpired {
                kind: PowerUpKind::WidePaddle,
            });
        }
    }
}

/// Rescale the ball's velocity to a new magnitude, preserving direction
fn rescale_ball_speed(state: &mut GameState, target: f32) {
    let current = state.ball.vel.length();
    if current > 0.0 && target > 0.0 {
        state.ball.vel *= target / current;
    }
}

/// Roll the drop chance for a destroyed brick and spawn a capsule on success
fn maybe_spawn_power_up(state: &mut GameState, brick_idx: usize, events: &mut Vec<GameEvent>) {
    if state.rng_mut().random::<f32>() >= POWER_UP_DROP_CHANCE {
        return;
    }
    let kind = if state.rng_mut().random_range(0..2) == 0 {
        PowerUpKind::Speed
    } else {
        PowerUpKind::WidePaddle
    };
    let brick_pos = state.bricks[brick_idx].pos;
    let id = state.next_entity_id();
    state.power_ups.push(PowerUp {
        id,
        kind,
        pos: glam::Vec2::new(
            brick_pos.x + BRICK_WIDTH / 2.0 - POWER_UP_SIZE / 2.0,
            brick_pos.y,
        ),
        vel_y: POWER_UP_FALL_SPEED,
        active: true,
    });
    events.push(GameEvent::PowerUpSpawned { kind });
}

/// Move capsules down; a paddle overlap at the projected position activates
/// the effect, falling past the bottom discards it
fn update_power_ups(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let paddle = state.paddle.rect();
    let mut caught = Vec::new();

    for pu in &mut state.power_ups {
        if !pu.active {
            continue;
        }
        let new_y = pu.pos.y + pu.vel_y;
        let hit = pu.pos.x + POWER_UP_SIZE > paddle.left()
            && pu.pos.x < paddle.right()
            && new_y + POWER_UP_SIZE > paddle.top()
            && new_y < paddle.top() + PADDLE_HEIGHT;

        if hit {
            pu.active = false;
            caught.push(pu.kind);
        } else if new_y > PLAY_HEIGHT {
            pu.active = false;
        } else {
            pu.pos.y = new_y;
        }
    }
    state.power_ups.retain(|pu| pu.active);

    for kind in caught {
        activate_power_up(state, kind, events);
    }
}

/// Apply a caught capsule's effect and (re)start its reversion window
fn activate_power_up(state: &mut GameState, kind: PowerUpKind, events: &mut Vec<GameEvent>) {
    match kind {
        PowerUpKind::WidePaddle => {
            state.paddle.width = WIDE_PADDLE_WIDTH;
            state.paddle.move_by(0.0);
            state.effects.wide_ticks = POWER_UP_DURATION_TICKS;
        }
        PowerUpKind::Speed => {
            state.effects.speed_ticks = POWER_UP_DURATION_TICKS;
            rescale_ball_speed(state, FAST_BALL_SPEED);
        }
    }
    events.push(GameEvent::PowerUpActivated { kind });
}
