//! Match configuration.
//!
//! All rule constants are fixed when a match is created and copied into
//! the `MatchState`. Restarting a match reuses the same configuration.

use serde::{Deserialize, Serialize};

use super::tile::TileId;
use crate::error::ConfigError;

/// Canonical board size.
pub const BOARD_SIZE: usize = 16;
/// Canonical starting balance for both actors.
pub const STARTING_BALANCE: i64 = 1500;
/// Credits awarded each time an actor passes the start tile.
pub const PASS_START_BONUS: i64 = 200;
/// Owning this many tiles wins outright (half the board).
pub const DOMINATION_THRESHOLD: usize = BOARD_SIZE / 2;
/// Turn from which the overtime rule may end the match.
pub const OVERTIME_TURN_THRESHOLD: u32 = 20;
/// Tiles each side must hold for overtime to apply.
pub const OVERTIME_TILE_COUNT: usize = BOARD_SIZE / 2 - 1;

/// Rule constants for a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of tiles on the board.
    pub board_size: usize,

    /// Starting balance (and net worth) of each actor.
    pub starting_balance: i64,

    /// Bonus credited per pass over the start tile.
    pub pass_start_bonus: i64,

    /// Tile count that wins by domination.
    pub domination_threshold: usize,

    /// Minimum turn number for the overtime rule.
    pub overtime_turn_threshold: u32,

    /// Tile count both actors must hold for overtime.
    pub overtime_tile_count: usize,

    /// Tile whose first human purchase must be confirmed by the external
    /// action gate. `None` disables gating.
    pub gated_tile: Option<TileId>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            starting_balance: STARTING_BALANCE,
            pass_start_bonus: PASS_START_BONUS,
            domination_threshold: DOMINATION_THRESHOLD,
            overtime_turn_threshold: OVERTIME_TURN_THRESHOLD,
            overtime_tile_count: OVERTIME_TILE_COUNT,
            gated_tile: Some(TileId::new(1)),
        }
    }
}

impl MatchConfig {
    /// Set the starting balance.
    #[must_use]
    pub fn with_starting_balance(mut self, balance: i64) -> Self {
        self.starting_balance = balance;
        self
    }

    /// Set the pass-start bonus.
    #[must_use]
    pub fn with_pass_start_bonus(mut self, bonus: i64) -> Self {
        self.pass_start_bonus = bonus;
        self
    }

    /// Set the overtime turn threshold.
    #[must_use]
    pub fn with_overtime_turn_threshold(mut self, turn: u32) -> Self {
        self.overtime_turn_threshold = turn;
        self
    }

    /// Set (or clear) the gated tile.
    #[must_use]
    pub fn with_gated_tile(mut self, tile: Option<TileId>) -> Self {
        self.gated_tile = tile;
        self
    }

    /// Check the configuration against the board it will be used with.
    pub fn validate(&self, board_len: usize) -> Result<(), ConfigError> {
        if self.board_size != board_len {
            return Err(ConfigError::BoardSizeMismatch {
                configured: self.board_size,
                actual: board_len,
            });
        }
        if self.starting_balance <= 0 {
            return Err(ConfigError::NonPositiveStartingBalance(self.starting_balance));
        }
        if self.domination_threshold == 0 || self.domination_threshold > self.board_size {
            return Err(ConfigError::DominationOutOfRange(self.domination_threshold));
        }
        if let Some(tile) = self.gated_tile {
            if tile.is_start() || tile.index() >= self.board_size {
                return Err(ConfigError::BadGatedTile(tile));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = MatchConfig::default();
        assert_eq!(config.board_size, 16);
        assert_eq!(config.starting_balance, 1500);
        assert_eq!(config.pass_start_bonus, 200);
        assert_eq!(config.domination_threshold, 8);
        assert_eq!(config.overtime_turn_threshold, 20);
        assert_eq!(config.overtime_tile_count, 7);
        assert_eq!(config.gated_tile, Some(TileId::new(1)));
        assert!(config.validate(16).is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MatchConfig::default()
            .with_starting_balance(500)
            .with_pass_start_bonus(0)
            .with_gated_tile(None);

        assert_eq!(config.starting_balance, 500);
        assert_eq!(config.pass_start_bonus, 0);
        assert_eq!(config.gated_tile, None);
    }

    #[test]
    fn test_validate_rejects_mismatch() {
        let config = MatchConfig::default();
        assert_eq!(
            config.validate(12),
            Err(ConfigError::BoardSizeMismatch { configured: 16, actual: 12 })
        );

        let gated_start = MatchConfig::default().with_gated_tile(Some(TileId::START));
        assert_eq!(gated_start.validate(16), Err(ConfigError::BadGatedTile(TileId::START)));

        let broke = MatchConfig::default().with_starting_balance(0);
        assert!(broke.validate(16).is_err());
    }

    #[test]
    fn test_serialization() {
        let config = MatchConfig::default().with_overtime_turn_threshold(30);
        let json = serde_json::to_string(&config).unwrap();
        let restored: MatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
