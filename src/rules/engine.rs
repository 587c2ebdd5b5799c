//! Rules engine trait and match results.
//!
//! `RulesEngine` is the seam between a front end (UI, bot, test harness)
//! and the rule implementation:
//! - What the human may do right now
//! - How an action modifies state
//! - Whether the match has ended

use serde::{Deserialize, Serialize};

use crate::core::{ActorId, MatchState, TileId, TurnReport};
use crate::error::EngineResult;

/// Result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The human won.
    PlayerWin,
    /// The AI won.
    AiWin,
    /// Overtime with equal net worth.
    Draw,
}

impl Outcome {
    /// Outcome in which `actor` wins.
    #[must_use]
    pub const fn win_for(actor: ActorId) -> Self {
        match actor {
            ActorId::Human => Outcome::PlayerWin,
            ActorId::Ai => Outcome::AiWin,
        }
    }

    /// Check if an actor won.
    #[must_use]
    pub fn is_winner(self, actor: ActorId) -> bool {
        self == Outcome::win_for(actor)
    }
}

/// Which termination condition ended the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    HumanBankrupt,
    AiBankrupt,
    HumanDomination,
    AiDomination,
    Overtime,
}

/// An action the human can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Roll the die and resolve a roll-cycle.
    Roll,
    /// Buy the tile the human is standing on.
    Buy(TileId),
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: empty once the match is over
/// - `apply_action`: on `Err`, `state` must be unchanged
/// - `is_terminal`: `None` while the match continues
pub trait RulesEngine {
    /// Actions the human may take in `state`.
    fn legal_actions(&self, state: &MatchState) -> Vec<Action>;

    /// Apply a human action, including any AI response it triggers.
    fn apply_action(&mut self, state: &mut MatchState, action: &Action) -> EngineResult<TurnReport>;

    /// Check if the match is over.
    fn is_terminal(&self, state: &MatchState) -> Option<Outcome> {
        state.outcome()
    }
}
