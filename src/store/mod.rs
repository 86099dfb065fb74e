//! Player and session persistence
//!
//! Players, their score history, and an id counter live in a local key-value
//! store as JSON. A `PlayerStore` is an explicit handle opened over a backend:
//! it caches the player list in memory and writes through on every mutation.
//! The simulation never touches this module directly; the host reports the
//! terminal score via `update_player_score` when a game ends.

pub mod kv;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use kv::{FileKv, KvError, KvStore, MemoryKv};

const PLAYERS_KEY: &str = "players";
const SESSIONS_KEY: &str = "sessions";
const NEXT_ID_KEY: &str = "nextId";

/// Most recent sessions retained per player
pub const MAX_SESSIONS_PER_PLAYER: usize = 100;

/// A registered player profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i64,
    /// Unique across players
    pub name: String,
    pub high_score: u32,
    pub total_games: u32,
    pub total_score: u64,
    pub best_level: u32,
    /// Unix milliseconds
    pub created_at: i64,
    pub updated_at: i64,
}

/// One completed game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    /// Time-derived, bumped past existing ids to stay unique
    pub id: i64,
    pub player_id: i64,
    pub score: u32,
    pub level: u32,
    /// Unix milliseconds
    pub played_at: i64,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("name '{0}' is already taken by another player")]
    NameTaken(String),
    #[error("player {0} not found")]
    PlayerNotFound(i64),
    #[error(transparent)]
    Storage(#[from] KvError),
}

/// Handle over the persisted player list.
///
/// `open` is the only way to get one; callers pass it around explicitly
/// rather than going through process-wide state.
pub struct PlayerStore<K: KvStore> {
    kv: K,
    players: Vec<Player>,
    next_player_id: i64,
}

impl<K: KvStore> PlayerStore<K> {
    /// Load the player cache and reconcile the id counter.
    ///
    /// Unreadable or malformed storage degrades to an empty collection; the
    /// store stays usable and overwrites the bad data on the next save.
    pub fn open(kv: K) -> Self {
        let players = read_players(&kv);

        let max_existing = players.iter().map(|p| p.id).max().unwrap_or(0);
        let stored_counter = match kv.get(NEXT_ID_KEY) {
            Ok(Some(raw)) => raw.trim().parse::<i64>().unwrap_or(1),
            Ok(None) => 1,
            Err(err) => {
                log::warn!("failed to read id counter: {err}");
                1
            }
        };
        let next_player_id = stored_counter.max(max_existing + 1);

        log::info!("player store opened: {} players", players.len());
        Self {
            kv,
            players,
            next_player_id,
        }
    }

    /// Find a player by exact name, creating the profile on first entry
    pub fn get_or_create_player(&mut self, name: &str, now_ms: i64) -> Result<Player, StoreError> {
        if let Some(existing) = self.players.iter().find(|p| p.name == name) {
            return Ok(existing.clone());
        }

        let player = Player {
            id: self.next_player_id,
            name: name.to_owned(),
            high_score: 0,
            total_games: 0,
            total_score: 0,
            best_level: 1,
            created_at: now_ms,
            updated_at: now_ms,
        };
        self.next_player_id += 1;

        log::info!("creating player '{name}' (id {})", player.id);
        self.players.push(player.clone());
        self.persist_players()?;
        Ok(player)
    }

    /// Record a finished game: merge totals into the profile and append a
    /// session, pruning that player's history to the most recent
    /// [`MAX_SESSIONS_PER_PLAYER`].
    ///
    /// An id missing from the cache forces one reload from storage; if it is
    /// still missing the update is dropped (logged), not an error.
    pub fn update_player_score(
        &mut self,
        player_id: i64,
        score: u32,
        level: u32,
        now_ms: i64,
    ) -> Result<(), StoreError> {
        let mut idx = self.players.iter().position(|p| p.id == player_id);
        if idx.is_none() {
            log::warn!("player {player_id} not in cache, reloading from storage");
            self.reload();
            idx = self.players.iter().position(|p| p.id == player_id);
        }
        let Some(idx) = idx else {
            log::warn!("player {player_id} still missing after reload, dropping score update");
            return Ok(());
        };

        let player = &mut self.players[idx];
        player.high_score = player.high_score.max(score);
        player.best_level = player.best_level.max(level);
        player.total_games += 1;
        player.total_score += u64::from(score);
        player.updated_at = now_ms;
        self.persist_players()?;

        // Session history failures must not lose the profile update
        if let Err(err) = self.append_session(player_id, score, level, now_ms) {
            log::warn!("failed to record session for player {player_id}: {err}");
        }
        Ok(())
    }

    /// Rename a player; fails without mutation when the name is taken
    pub fn update_player_name(
        &mut self,
        player_id: i64,
        new_name: &str,
        now_ms: i64,
    ) -> Result<Player, StoreError> {
        if self
            .players
            .iter()
            .any(|p| p.name == new_name && p.id != player_id)
        {
            return Err(StoreError::NameTaken(new_name.to_owned()));
        }

        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or(StoreError::PlayerNotFound(player_id))?;
        player.name = new_name.to_owned();
        player.updated_at = now_ms;
        let updated = player.clone();

        self.persist_players()?;
        Ok(updated)
    }

    /// All players, ranked by high score with recency breaking ties.
    ///
    /// Refreshes the cache from storage first, so edits made by a previous
    /// handle are visible.
    pub fn get_all_players(&mut self) -> Vec<Player> {
        self.reload();
        let mut sorted = self.players.clone();
        sorted.sort_by(|a, b| {
            b.high_score
                .cmp(&a.high_score)
                .then(b.updated_at.cmp(&a.updated_at))
        });
        sorted
    }

    /// The leaderboard head
    pub fn get_top_players(&mut self, limit: usize) -> Vec<Player> {
        let mut players = self.get_all_players();
        players.truncate(limit);
        players
    }

    /// A player's most recent sessions, newest first
    pub fn get_player_sessions(&self, player_id: i64, limit: usize) -> Vec<GameSession> {
        let mut sessions: Vec<GameSession> = self
            .read_sessions()
            .into_iter()
            .filter(|s| s.player_id == player_id)
            .collect();
        sessions.sort_by(|a, b| b.played_at.cmp(&a.played_at));
        sessions.truncate(limit);
        sessions
    }

    /// Remove a player and all their sessions; unknown ids are logged and
    /// ignored
    pub fn delete_player(&mut self, player_id: i64) -> Result<(), StoreError> {
        let before = self.players.len();
        self.players.retain(|p| p.id != player_id);
        if self.players.len() == before {
            log::warn!("player {player_id} not found for deletion");
            return Ok(());
        }
        self.persist_players()?;

        let mut sessions = self.read_sessions();
        sessions.retain(|s| s.player_id != player_id);
        self.write_sessions(&sessions)?;
        Ok(())
    }

    fn reload(&mut self) {
        self.players = read_players(&self.kv);
        let max_existing = self.players.iter().map(|p| p.id).max().unwrap_or(0);
        self.next_player_id = self.next_player_id.max(max_existing + 1);
    }

    fn persist_players(&mut self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.players).map_err(KvError::from)?;
        self.kv.set(PLAYERS_KEY, &json)?;
        self.kv.set(NEXT_ID_KEY, &self.next_player_id.to_string())?;
        Ok(())
    }

    fn append_session(
        &mut self,
        player_id: i64,
        score: u32,
        level: u32,
        now_ms: i64,
    ) -> Result<(), StoreError> {
        let mut sessions = self.read_sessions();

        let mut id = now_ms;
        if let Some(max_id) = sessions.iter().map(|s| s.id).max() {
            if max_id >= id {
                id = max_id + 1;
            }
        }
        sessions.push(GameSession {
            id,
            player_id,
            score,
            level,
            played_at: now_ms,
        });

        // Cap this player's history, oldest pruned first
        let player_count = sessions.iter().filter(|s| s.player_id == player_id).count();
        if player_count > MAX_SESSIONS_PER_PLAYER {
            let mut kept: Vec<GameSession> = sessions
                .iter()
                .filter(|s| s.player_id == player_id)
                .cloned()
                .collect();
            kept.sort_by(|a, b| b.played_at.cmp(&a.played_at));
            kept.truncate(MAX_SESSIONS_PER_PLAYER);

            sessions.retain(|s| s.player_id != player_id);
            sessions.extend(kept);
        }

        self.write_sessions(&sessions)
    }

    fn read_sessions(&self) -> Vec<GameSession> {
        match self.kv.get(SESSIONS_KEY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|err| {
                log::warn!("session data is corrupt, starting empty: {err}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                log::warn!("failed to read sessions: {err}");
                Vec::new()
            }
        }
    }

    fn write_sessions(&mut self, sessions: &[GameSession]) -> Result<(), StoreError> {
        let json = serde_json::to_string(sessions).map_err(KvError::from)?;
        self.kv.set(SESSIONS_KEY, &json)?;
        Ok(())
    }
}

fn read_players<K: KvStore>(kv: &K) -> Vec<Player> {
    match kv.get(PLAYERS_KEY) {
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|err| {
            log::warn!("player data is corrupt, starting empty: {err}");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(err) => {
            log::warn!("failed to read players: {err}");
            Vec::new()
        }
    }
}
