//! End-to-end flow: a run ends, the host reports the outcome, the
//! leaderboard reflects it.

use glam::Vec2;

use brick_breaker::consts::*;
use brick_breaker::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use brick_breaker::store::{MemoryKv, PlayerStore};

#[test]
fn game_over_outcome_lands_on_the_leaderboard() {
    let mut store = PlayerStore::open(MemoryKv::new());
    let alice = store.get_or_create_player("Alice", 1_000).unwrap();
    assert_eq!(alice.high_score, 0);

    // A run already down to its last life, about to drop the ball
    let mut state = GameState::new(42, DEFAULT_BALL_SPEED);
    state.phase = GamePhase::Playing;
    state.lives = 1;
    state.score = 340;
    state.level = 2;
    state.ball.pos = Vec2::new(200.0, PLAY_HEIGHT + 1.0);
    state.ball.vel = Vec2::new(0.0, DEFAULT_BALL_SPEED);

    let events = tick(&mut state, &TickInput::default());
    let (final_score, final_level) = events
        .iter()
        .find_map(|e| match e {
            GameEvent::GameOver { score, level } => Some((*score, *level)),
            _ => None,
        })
        .expect("run must end in a game over");

    // Host side: forward the terminal outcome to the store
    store
        .update_player_score(alice.id, final_score, final_level, 2_000)
        .unwrap();

    let players = store.get_all_players();
    let alice = players.iter().find(|p| p.name == "Alice").unwrap();
    assert_eq!(alice.high_score, 340);
    assert_eq!(alice.total_games, 1);
    assert_eq!(alice.best_level, 2);

    let sessions = store.get_player_sessions(alice.id, 10);
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].score, 340);
    assert_eq!(sessions[0].level, 2);
}

#[test]
fn a_full_level_can_be_cleared() {
    let mut state = GameState::new(7, DEFAULT_BALL_SPEED);
    state.phase = GamePhase::Playing;

    // Drive the ball through every brick by teleporting it onto each one;
    // this exercises the real hit/destroy/level-complete path
    let bricks: Vec<(u32, Vec2, u32)> = state
        .bricks
        .iter()
        .map(|b| (b.id, b.pos, b.hits_required))
        .collect();

    let mut total_hits = 0u32;
    for (_, pos, hits) in &bricks {
        for _ in 0..*hits {
            if state.phase != GamePhase::Playing {
                break;
            }
            state.ball.pos = Vec2::new(pos.x + 5.0, pos.y + 2.0);
            state.ball.vel = Vec2::new(0.0, 1.0);
            let events = tick(&mut state, &TickInput::default());
            total_hits += events
                .iter()
                .filter(|e| matches!(e, GameEvent::BrickHit { .. }))
                .count() as u32;
        }
    }

    // Every scheduled hit landed and the clear was detected
    assert!(total_hits >= bricks.len() as u32);
    assert_eq!(state.phase, GamePhase::LevelTransition);
    assert_eq!(state.live_bricks(), 0);

    for _ in 0..LEVEL_CLEAR_DELAY_TICKS {
        tick(&mut state, &TickInput::default());
    }
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.level, 2);
    assert!(state.live_bricks() > 0);
}
