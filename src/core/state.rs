//! Match state.
//!
//! ## MatchState
//!
//! Everything the engine mutates during a match:
//! - Board ownership
//! - Both actors' positions, balances and net worth
//! - Turn counter and pending extra roll
//! - Termination result, once the match is over
//! - Event history (persistent `im::Vector`, so cloning stays cheap)
//!
//! Fields are public so callers can inspect state and build scenarios.
//! The engine functions are the only code that enforces the rules;
//! once `termination` is set they refuse every further mutation.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, ActorMap};
use super::board::Board;
use super::config::MatchConfig;
use super::event::GameEvent;
use super::tile::{Tile, TileId};
use crate::error::{ConfigError, SnapshotError};
use crate::rules::{Outcome, Termination};

/// The full in-memory state of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Rule constants, fixed for the match.
    pub config: MatchConfig,

    /// Tiles and their owners.
    pub board: Board,

    /// Human and AI.
    pub actors: ActorMap<Actor>,

    /// Roll-cycle counter (starts at 1).
    pub turn: u32,

    /// The human rolled the maximum and owes another roll this cycle.
    pub extra_roll_pending: bool,

    /// Set exactly once, when the match ends.
    pub termination: Option<Termination>,

    /// Every event published during the match.
    pub history: Vector<GameEvent>,
}

impl MatchState {
    /// Create a fresh match.
    pub fn new(config: MatchConfig, board: Board) -> Result<Self, ConfigError> {
        config.validate(board.len())?;

        let board = board.reset_ownership();
        let actors = ActorMap::with_value(Actor::new(config.starting_balance));
        let mut history = Vector::new();
        history.push_back(GameEvent::MatchStarted);

        Ok(Self {
            config,
            board,
            actors,
            turn: 1,
            extra_roll_pending: false,
            termination: None,
            history,
        })
    }

    /// A fresh match on the canonical board with default rules.
    #[must_use]
    pub fn standard() -> Self {
        let config = MatchConfig::default();
        let board = Board::walrus();
        let actors = ActorMap::with_value(Actor::new(config.starting_balance));

        Self {
            config,
            board,
            actors,
            turn: 1,
            extra_roll_pending: false,
            termination: None,
            history: Vector::unit(GameEvent::MatchStarted),
        }
    }

    /// Discard all progress and return to the initial state, keeping the
    /// configuration and tile catalogue.
    pub fn restart(&mut self) {
        *self = Self {
            config: self.config.clone(),
            board: self.board.reset_ownership(),
            actors: ActorMap::with_value(Actor::new(self.config.starting_balance)),
            turn: 1,
            extra_roll_pending: false,
            termination: None,
            history: Vector::unit(GameEvent::MatchStarted),
        };
        tracing::info!("match restarted");
    }

    /// Has the match ended?
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.termination.is_some()
    }

    /// Final outcome, if the match has ended.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.termination.map(|t| t.outcome)
    }

    /// Get an actor.
    #[must_use]
    pub fn actor(&self, id: ActorId) -> &Actor {
        &self.actors[id]
    }

    /// The tile an actor is standing on.
    #[must_use]
    pub fn current_tile(&self, id: ActorId) -> Option<&Tile> {
        self.board.get(self.actors[id].position)
    }

    /// Tiles owned by an actor.
    #[must_use]
    pub fn owned_count(&self, id: ActorId) -> usize {
        self.board.owned_count(id)
    }

    /// Is the human standing on `tile`?
    #[must_use]
    pub fn human_is_on(&self, tile: TileId) -> bool {
        self.actors[ActorId::Human].position == tile
    }

    /// Combined balance of both actors.
    #[must_use]
    pub fn total_balance(&self) -> i64 {
        self.actors.iter().map(|(_, a)| a.balance).sum()
    }

    /// Encode an in-memory checkpoint.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a checkpoint produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_initial_state() {
        let state = MatchState::standard();

        assert_eq!(state.turn, 1);
        assert!(!state.is_terminal());
        assert_eq!(state.outcome(), None);
        for (_, actor) in state.actors.iter() {
            assert_eq!(actor.position, TileId::START);
            assert_eq!(actor.balance, 1500);
            assert_eq!(actor.net_worth, 1500);
        }
        assert!(state.board.tiles().all(|t| t.owner.is_unowned()));
        assert_eq!(state.history, Vector::unit(GameEvent::MatchStarted));
    }

    #[test]
    fn test_new_matches_standard() {
        let state = MatchState::new(MatchConfig::default(), Board::walrus()).unwrap();
        assert_eq!(state, MatchState::standard());
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = MatchConfig {
            board_size: 10,
            ..MatchConfig::default()
        };
        assert!(MatchState::new(config, Board::walrus()).is_err());
    }

    #[test]
    fn test_restart_clears_progress() {
        let mut state = MatchState::standard();
        state.board.claim(TileId::new(4), ActorId::Ai);
        state.actors[ActorId::Human].position = TileId::new(9);
        state.actors[ActorId::Ai].balance = -20;
        state.turn = 31;
        state.history.push_back(GameEvent::Rolled { actor: ActorId::Ai, roll: 3 });

        state.restart();

        assert_eq!(state, MatchState::standard());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut state = MatchState::standard();
        state.board.claim(TileId::new(2), ActorId::Human);
        state.turn = 5;

        let bytes = state.to_bytes().unwrap();
        let restored = MatchState::from_bytes(&bytes).unwrap();
        assert_eq!(state, restored);
    }

    #[test]
    fn test_snapshot_rejects_garbage() {
        assert!(MatchState::from_bytes(&[0xFF, 0x01]).is_err());
    }
}
