//! `WalrusRules`: the session-level rules engine.
//!
//! Owns the pieces that outlive a single match:
//! - the `RollSource` used for AI rolls (and human rolls via `roll`)
//! - the `ActionGate` and its `GateSession`
//!
//! `MatchState` is passed in on every call, so a restart only touches the
//! state and the session carries over.

use super::cycle::{ensure_live, resolve_human_turn};
use super::movement::{NoSteps, StepObserver};
use super::purchase::can_buy;
use crate::core::{is_valid_roll, ActorId, GameEvent, MatchConfig, MatchState, RollSource, TileId, TurnReport};
use crate::error::{EngineError, EngineResult};
use crate::gate::{buy_with_gate, ActionGate, GateSession, OpenGate};
use crate::rules::{Action, RulesEngine};

/// Rules engine for one play session.
#[derive(Clone, Debug)]
pub struct WalrusRules<D, G = OpenGate> {
    dice: D,
    gate: G,
    session: GateSession,
    confirm_rolls: bool,
}

impl<D: RollSource> WalrusRules<D, OpenGate> {
    /// Create an engine with no external confirmation.
    #[must_use]
    pub fn new(dice: D, config: &MatchConfig) -> Self {
        Self {
            dice,
            gate: OpenGate,
            session: GateSession::for_config(config),
            confirm_rolls: false,
        }
    }
}

impl<D: RollSource, G: ActionGate> WalrusRules<D, G> {
    /// Replace the gate, keeping the session.
    #[must_use]
    pub fn with_gate<H: ActionGate>(self, gate: H) -> WalrusRules<D, H> {
        WalrusRules {
            dice: self.dice,
            gate,
            session: self.session,
            confirm_rolls: self.confirm_rolls,
        }
    }

    /// Ask the gate to confirm every roll drawn by `roll`.
    #[must_use]
    pub fn with_roll_confirmation(mut self, enabled: bool) -> Self {
        self.confirm_rolls = enabled;
        self
    }

    /// Gated-purchase progress for this session.
    #[must_use]
    pub fn session(&self) -> &GateSession {
        &self.session
    }

    /// The AI's dice, for checkpointing or reseeding between matches.
    pub fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }

    /// The external gate, for callers that keep state in it.
    pub fn gate_mut(&mut self) -> &mut G {
        &mut self.gate
    }

    /// Resolve a human roll-cycle with a roll supplied by the caller.
    pub fn resolve_human_turn(&mut self, state: &mut MatchState, roll: u8) -> EngineResult<TurnReport> {
        resolve_human_turn(state, roll, &mut self.dice, &mut NoSteps)
    }

    /// Like `resolve_human_turn`, reporting every movement step to `observer`.
    pub fn resolve_human_turn_observed<O>(
        &mut self,
        state: &mut MatchState,
        roll: u8,
        observer: &mut O,
    ) -> EngineResult<TurnReport>
    where
        O: StepObserver + ?Sized,
    {
        resolve_human_turn(state, roll, &mut self.dice, observer)
    }

    /// Draw the human roll from the dice and resolve the cycle.
    ///
    /// With roll confirmation enabled the gate must approve the roll first;
    /// a refusal applies nothing.
    pub fn roll(&mut self, state: &mut MatchState) -> EngineResult<TurnReport> {
        ensure_live(state)?;

        let roll = self.dice.roll();
        if !is_valid_roll(roll) {
            return Err(EngineError::InvalidRoll(roll));
        }

        if !self.confirm_rolls {
            return resolve_human_turn(state, roll, &mut self.dice, &mut NoSteps);
        }

        if let Err(err) = self.gate.confirm_roll(roll) {
            tracing::warn!(roll, error = %err, "roll confirmation failed");
            return Err(err.into());
        }

        let mark = state.history.len();
        let mut report = resolve_human_turn(state, roll, &mut self.dice, &mut NoSteps)?;
        let confirmed = GameEvent::RollConfirmed { roll };
        state.history.insert(mark, confirmed.clone());
        report.events.insert(0, confirmed);
        Ok(report)
    }

    /// Buy `tile` for the human, through the gate when the session needs it.
    pub fn buy(&mut self, state: &mut MatchState, tile: TileId) -> EngineResult<TurnReport> {
        buy_with_gate(state, tile, &mut self.session, &mut self.gate)
    }

    /// Start a fresh match. The gate session carries over.
    ///
    /// Only the match state is reset. It lives here so a caller that holds
    /// the session engine restarts through the same object that owns the
    /// settled gate, instead of resetting `MatchState` and a separate session.
    pub fn restart(&mut self, state: &mut MatchState) {
        state.restart();
    }
}

impl<D: RollSource, G: ActionGate> RulesEngine for WalrusRules<D, G> {
    fn legal_actions(&self, state: &MatchState) -> Vec<Action> {
        if state.is_terminal() {
            return Vec::new();
        }

        let mut actions = vec![Action::Roll];
        let position = state.actor(ActorId::Human).position;
        if can_buy(state, position) {
            actions.push(Action::Buy(position));
        }
        actions
    }

    fn apply_action(&mut self, state: &mut MatchState, action: &Action) -> EngineResult<TurnReport> {
        match *action {
            Action::Roll => self.roll(state),
            Action::Buy(tile) => self.buy(state, tile),
        }
    }
}
