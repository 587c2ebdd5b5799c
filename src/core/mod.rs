//! Core match types: actors, tiles, board, configuration, dice, events, state.
//!
//! This module holds data and the operations that keep it consistent.
//! Rule resolution lives in `turn` and `rules`.

pub mod actor;
pub mod tile;
pub mod board;
pub mod config;
pub mod dice;
pub mod event;
pub mod state;

pub use actor::{Actor, ActorId, ActorMap};
pub use tile::{Owner, Rarity, Tile, TileId};
pub use board::Board;
pub use config::MatchConfig;
pub use dice::{is_valid_roll, ChaChaDice, DiceState, RollSource, ScriptedDice, MAX_ROLL, MIN_ROLL};
pub use event::{EventSink, GameEvent, Severity, TracingSink, TurnReport};
pub use state::MatchState;
