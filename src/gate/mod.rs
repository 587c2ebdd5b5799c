//! External action gate.
//!
//! Some actions must be confirmed out-of-band (e.g. by a wallet signing a
//! transaction) before the engine applies them:
//! - the session's first human purchase of the gated tile
//! - rolls, when the front end submits them for confirmation
//!
//! The engine never applies a gated mutation speculatively. It validates
//! the action, asks the gate, and only mutates after the gate succeeds.
//! A gate failure therefore leaves `MatchState` untouched.
//!
//! ## GateSession
//!
//! Whether the gated purchase has already been settled is session data,
//! not match data: it survives a match restart and is passed explicitly
//! into `buy_with_gate`.

use serde::{Deserialize, Serialize};

use crate::core::{GameEvent, MatchConfig, MatchState, Tile, TileId, TurnReport};
use crate::error::{EngineResult, GateError, PurchaseDenial};
use crate::turn::purchase::{buy_tile, check_purchase};

/// Out-of-band confirmation of engine actions.
pub trait ActionGate {
    /// Confirm a human purchase of `tile`. Called only after every
    /// purchase precondition has passed.
    fn confirm_purchase(&mut self, tile: &Tile) -> Result<(), GateError>;

    /// Confirm a roll before it is applied. Approves by default.
    fn confirm_roll(&mut self, roll: u8) -> Result<(), GateError> {
        let _ = roll;
        Ok(())
    }
}

/// Gate that approves everything, for play without an external layer.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenGate;

impl ActionGate for OpenGate {
    fn confirm_purchase(&mut self, _tile: &Tile) -> Result<(), GateError> {
        Ok(())
    }
}

impl<G: ActionGate + ?Sized> ActionGate for &mut G {
    fn confirm_purchase(&mut self, tile: &Tile) -> Result<(), GateError> {
        (**self).confirm_purchase(tile)
    }

    fn confirm_roll(&mut self, roll: u8) -> Result<(), GateError> {
        (**self).confirm_roll(roll)
    }
}

/// Per-session state of the one-time gated purchase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSession {
    /// Tile whose purchase needs confirmation. `None` disables gating.
    pub gated_tile: Option<TileId>,

    /// The gated purchase has been confirmed (or found settled) already.
    pub settled: bool,
}

impl GateSession {
    /// Create a session for `config`'s gated tile.
    #[must_use]
    pub fn for_config(config: &MatchConfig) -> Self {
        Self {
            gated_tile: config.gated_tile,
            settled: false,
        }
    }

    /// Does buying `tile` need the gate in this session?
    #[must_use]
    pub fn requires_confirmation(&self, tile: TileId) -> bool {
        !self.settled && self.gated_tile == Some(tile)
    }
}

/// Buy `tile` for the human, consulting `gate` first when the session
/// requires it.
///
/// Every other purchase goes straight to `buy_tile`. A gate reporting
/// `AlreadySettled` marks the session settled but still applies nothing;
/// retrying then buys locally.
pub fn buy_with_gate<G: ActionGate + ?Sized>(
    state: &mut MatchState,
    tile: TileId,
    session: &mut GateSession,
    gate: &mut G,
) -> EngineResult<TurnReport> {
    check_purchase(state, tile)?;

    if !session.requires_confirmation(tile) {
        if session.gated_tile == Some(tile) {
            return buy_prefixed(state, tile, GameEvent::GateAlreadySettled { tile });
        }
        return buy_tile(state, tile);
    }

    let target = state.board.get(tile).ok_or(PurchaseDenial::UnknownTile(tile))?;

    tracing::debug!(tile = tile.0, "awaiting external purchase confirmation");
    match gate.confirm_purchase(target) {
        Ok(()) => {
            session.settled = true;
            buy_prefixed(state, tile, GameEvent::PurchaseConfirmed { tile })
        }
        Err(GateError::AlreadySettled) => {
            session.settled = true;
            tracing::info!(tile = tile.0, "gated purchase already settled externally");
            Err(GateError::AlreadySettled.into())
        }
        Err(err) => {
            tracing::warn!(tile = tile.0, error = %err, "purchase confirmation failed");
            Err(err.into())
        }
    }
}

/// Buy after preconditions have passed, reporting `first` ahead of the
/// purchase events.
fn buy_prefixed(state: &mut MatchState, tile: TileId, first: GameEvent) -> EngineResult<TurnReport> {
    state.history.push_back(first.clone());
    let mut report = buy_tile(state, tile)?;
    report.events.insert(0, first);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActorId;
    use crate::error::EngineError;

    /// Gate that answers from a queue and counts calls.
    struct QueueGate {
        answers: Vec<Result<(), GateError>>,
        calls: usize,
    }

    impl ActionGate for QueueGate {
        fn confirm_purchase(&mut self, _tile: &Tile) -> Result<(), GateError> {
            self.calls += 1;
            if self.answers.is_empty() {
                Ok(())
            } else {
                self.answers.remove(0)
            }
        }
    }

    fn on_tile(tile: u8) -> MatchState {
        let mut state = MatchState::standard();
        state.actors[ActorId::Human].position = TileId::new(tile);
        state
    }

    #[test]
    fn test_session_defaults_to_tile_one() {
        let session = GateSession::for_config(&MatchConfig::default());
        assert!(session.requires_confirmation(TileId::new(1)));
        assert!(!session.requires_confirmation(TileId::new(2)));
    }

    #[test]
    fn test_ungated_tile_skips_gate() {
        let mut state = on_tile(4);
        let mut session = GateSession::for_config(&state.config);
        let mut gate = QueueGate { answers: vec![], calls: 0 };

        buy_with_gate(&mut state, TileId::new(4), &mut session, &mut gate).unwrap();

        assert_eq!(gate.calls, 0);
        assert!(!session.settled);
    }

    #[test]
    fn test_gated_purchase_confirmed_once() {
        let mut state = on_tile(1);
        let mut session = GateSession::for_config(&state.config);
        let mut gate = QueueGate { answers: vec![], calls: 0 };

        let report = buy_with_gate(&mut state, TileId::new(1), &mut session, &mut gate).unwrap();

        assert_eq!(gate.calls, 1);
        assert!(session.settled);
        assert_eq!(report.events[0], GameEvent::PurchaseConfirmed { tile: TileId::new(1) });
        assert!(state.board.get(TileId::new(1)).unwrap().owner.is(ActorId::Human));
    }

    #[test]
    fn test_gate_failure_leaves_state_unchanged() {
        let mut state = on_tile(1);
        let before = state.clone();
        let mut session = GateSession::for_config(&state.config);
        let mut gate = QueueGate {
            answers: vec![Err(GateError::Rejected("user declined".into()))],
            calls: 0,
        };

        let err = buy_with_gate(&mut state, TileId::new(1), &mut session, &mut gate).unwrap_err();

        assert_eq!(err, EngineError::GateFailed(GateError::Rejected("user declined".into())));
        assert_eq!(state, before);
        assert!(!session.settled);

        // Retry succeeds.
        buy_with_gate(&mut state, TileId::new(1), &mut session, &mut gate).unwrap();
        assert_eq!(gate.calls, 2);
    }

    #[test]
    fn test_already_settled_then_local() {
        let mut state = on_tile(1);
        let before = state.clone();
        let mut session = GateSession::for_config(&state.config);
        let mut gate = QueueGate {
            answers: vec![Err(GateError::AlreadySettled)],
            calls: 0,
        };

        assert!(buy_with_gate(&mut state, TileId::new(1), &mut session, &mut gate).is_err());
        assert_eq!(state, before);
        assert!(session.settled);

        let report = buy_with_gate(&mut state, TileId::new(1), &mut session, &mut gate).unwrap();
        assert_eq!(gate.calls, 1);
        assert_eq!(report.events[0], GameEvent::GateAlreadySettled { tile: TileId::new(1) });
    }

    #[test]
    fn test_preconditions_checked_before_gate() {
        let mut state = on_tile(1);
        state.actors[ActorId::Human].balance = 10;
        let mut session = GateSession::for_config(&state.config);
        let mut gate = QueueGate { answers: vec![], calls: 0 };

        assert!(buy_with_gate(&mut state, TileId::new(1), &mut session, &mut gate).is_err());
        assert_eq!(gate.calls, 0);
        assert!(!session.settled);
    }
}
