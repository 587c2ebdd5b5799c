//! # walrus-estate
//!
//! Rule engine for a two-actor property board game: a human player against
//! an automated opponent on a looping board of purchasable tiles.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: All randomness comes from an injected `RollSource`.
//!    The same rolls always produce the same match.
//!
//! 2. **All-or-nothing**: Every operation either applies completely or
//!    returns an error and leaves `MatchState` untouched.
//!
//! 3. **Display is separate**: Operations return ordered `GameEvent`s for
//!    a front end to render. Nothing in the engine reads them back.
//!
//! ## Architecture
//!
//! - **Persistent history**: `im::Vector` keeps `MatchState` cheap to clone,
//!   which makes checkpoints and rollback trivial.
//!
//! - **Session vs. match**: `WalrusRules` owns the dice and the external
//!   gate. `MatchState` is passed in on every call and can be restarted
//!   without losing the session.
//!
//! ## Modules
//!
//! - `core`: Actors, tiles, board, configuration, dice, events, state
//! - `rules`: `RulesEngine` trait, actions, outcomes, termination
//! - `turn`: Movement, landing, roll-cycles, purchases, `WalrusRules`
//! - `gate`: External confirmation of purchases and rolls
//! - `error`: Engine, configuration and snapshot errors

pub mod core;
pub mod error;
pub mod gate;
pub mod rules;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    Actor, ActorId, ActorMap,
    Board, Owner, Rarity, Tile, TileId,
    MatchConfig,
    ChaChaDice, DiceState, RollSource, ScriptedDice,
    EventSink, GameEvent, Severity, TracingSink, TurnReport,
    MatchState,
};

pub use crate::error::{ConfigError, EngineError, EngineResult, GateError, PurchaseDenial, SnapshotError};

pub use crate::gate::{buy_with_gate, ActionGate, GateSession, OpenGate};

pub use crate::rules::{evaluate_termination, Action, EndReason, Outcome, RulesEngine, Termination};

pub use crate::turn::{
    buy_tile, can_buy, check_purchase,
    resolve_human_turn, resolve_landing, run_ai_sub_turn,
    NoSteps, Step, StepObserver, SubTurn,
    WalrusRules,
};
