//! Error types.
//!
//! Every engine operation validates before it mutates, so an `Err` always
//! means the `MatchState` was left exactly as it was.

use thiserror::Error;

use crate::core::{Owner, TileId};

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Why an engine operation was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The match has ended; restart it to keep playing.
    #[error("match is already over")]
    MatchAlreadyOver,

    /// A roll outside `1..=6` was supplied.
    #[error("invalid roll {0}, expected 1-6")]
    InvalidRoll(u8),

    /// The human rolled a 6 and still owes the continuation roll, so the
    /// AI may not move yet.
    #[error("the human has an extra roll pending")]
    ExtraRollPending,

    /// The tile id is not on the board.
    #[error("tile {0} is not on the board")]
    UnknownTile(TileId),

    /// A human purchase failed its preconditions.
    #[error("purchase not allowed: {0}")]
    PurchaseNotAllowed(PurchaseDenial),

    /// The external action gate did not confirm the action.
    #[error("external confirmation failed: {0}")]
    GateFailed(#[from] GateError),
}

impl From<PurchaseDenial> for EngineError {
    fn from(denial: PurchaseDenial) -> Self {
        EngineError::PurchaseNotAllowed(denial)
    }
}

/// Reason code for a rejected human purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PurchaseDenial {
    #[error("tile {0} is not on the board")]
    UnknownTile(TileId),

    #[error("the start tile cannot be bought")]
    StartTile,

    #[error("you are standing on {position}, not {tile}")]
    NotStandingOnTile { position: TileId, tile: TileId },

    #[error("tile is already owned by {0}")]
    AlreadyOwned(Owner),

    #[error("insufficient funds: balance {balance}, price {price}")]
    InsufficientFunds { balance: i64, price: i64 },
}

/// Failure reported by an external action gate.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GateError {
    /// The gate refused or failed to confirm.
    #[error("rejected: {0}")]
    Rejected(String),

    /// The gated action had already been settled outside the engine.
    #[error("already settled externally")]
    AlreadySettled,
}

/// Invalid board or match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board has no tiles")]
    EmptyBoard,

    #[error("board has {0} tiles, more than tile ids can address")]
    BoardTooLarge(usize),

    #[error("tile at index {index} has id {id}")]
    TileOutOfOrder { index: usize, id: TileId },

    #[error("tile {0} starts with an owner")]
    PreOwnedTile(TileId),

    #[error("tile {0} has a negative price or rent")]
    NegativeAmount(TileId),

    #[error("start tile must have zero price and rent")]
    PricedStartTile,

    #[error("config expects {configured} tiles but board has {actual}")]
    BoardSizeMismatch { configured: usize, actual: usize },

    #[error("starting balance must be positive, got {0}")]
    NonPositiveStartingBalance(i64),

    #[error("domination threshold {0} is out of range")]
    DominationOutOfRange(usize),

    #[error("gated tile {0} is the start tile or off the board")]
    BadGatedTile(TileId),
}

/// Failure encoding or decoding a `MatchState` checkpoint.
#[derive(Debug, Error)]
#[error("snapshot codec error: {0}")]
pub struct SnapshotError(#[from] bincode::Error);
