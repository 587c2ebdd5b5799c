//! Termination evaluation.
//!
//! Conditions are checked in strict priority order against the current
//! state; the first that holds decides the match:
//!
//! 1. Human balance <= 0 (AI wins)
//! 2. AI balance <= 0 (human wins)
//! 3. Human owns at least the domination threshold
//! 4. AI owns at least the domination threshold
//! 5. Overtime: both own exactly the overtime tile count and the turn
//!    threshold is reached; higher net worth wins, equal is a draw
//!
//! Overtime is re-checked on every evaluation, so it fires whenever the
//! tie holds at or past the threshold turn.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::engine::{EndReason, Outcome};
use crate::core::{ActorId, GameEvent, MatchState};

/// How a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Termination {
    /// Who won.
    pub outcome: Outcome,
    /// Which condition fired.
    pub reason: EndReason,
}

impl Termination {
    fn new(outcome: Outcome, reason: EndReason) -> Self {
        Self { outcome, reason }
    }
}

/// Evaluate the termination conditions without changing anything.
#[must_use]
pub fn evaluate_termination(state: &MatchState) -> Option<Termination> {
    let human = state.actor(ActorId::Human);
    let ai = state.actor(ActorId::Ai);

    if human.is_bankrupt() {
        return Some(Termination::new(Outcome::AiWin, EndReason::HumanBankrupt));
    }
    if ai.is_bankrupt() {
        return Some(Termination::new(Outcome::PlayerWin, EndReason::AiBankrupt));
    }

    let config = &state.config;
    let human_tiles = state.owned_count(ActorId::Human);
    let ai_tiles = state.owned_count(ActorId::Ai);

    if human_tiles >= config.domination_threshold {
        return Some(Termination::new(Outcome::PlayerWin, EndReason::HumanDomination));
    }
    if ai_tiles >= config.domination_threshold {
        return Some(Termination::new(Outcome::AiWin, EndReason::AiDomination));
    }

    if human_tiles == config.overtime_tile_count
        && ai_tiles == config.overtime_tile_count
        && state.turn >= config.overtime_turn_threshold
    {
        let outcome = match human.net_worth.cmp(&ai.net_worth) {
            Ordering::Greater => Outcome::PlayerWin,
            Ordering::Less => Outcome::AiWin,
            Ordering::Equal => Outcome::Draw,
        };
        return Some(Termination::new(outcome, EndReason::Overtime));
    }

    None
}

/// Evaluate termination and, if a condition holds, end the match.
///
/// Returns whether the match is over. An already-ended match is left as is.
pub(crate) fn settle(state: &mut MatchState, events: &mut Vec<GameEvent>) -> bool {
    if state.is_terminal() {
        return true;
    }
    match evaluate_termination(state) {
        Some(termination) => {
            state.termination = Some(termination);
            tracing::info!(
                outcome = ?termination.outcome,
                reason = ?termination.reason,
                turn = state.turn,
                "match over"
            );
            events.push(GameEvent::MatchOver {
                outcome: termination.outcome,
                reason: termination.reason,
            });
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TileId;

    fn give(state: &mut MatchState, actor: ActorId, tiles: &[u8]) {
        for &t in tiles {
            assert!(state.board.claim(TileId::new(t), actor));
        }
    }

    #[test]
    fn test_fresh_match_continues() {
        assert_eq!(evaluate_termination(&MatchState::standard()), None);
    }

    #[test]
    fn test_zero_balance_is_bankrupt() {
        let mut state = MatchState::standard();
        state.actors[ActorId::Human].balance = 0;
        let t = evaluate_termination(&state).unwrap();
        assert_eq!(t.outcome, Outcome::AiWin);
        assert_eq!(t.reason, EndReason::HumanBankrupt);
    }

    #[test]
    fn test_human_bankruptcy_checked_before_ai() {
        let mut state = MatchState::standard();
        state.actors[ActorId::Human].balance = -1;
        state.actors[ActorId::Ai].balance = -1;
        assert_eq!(evaluate_termination(&state).unwrap().outcome, Outcome::AiWin);
    }

    #[test]
    fn test_domination() {
        let mut state = MatchState::standard();
        give(&mut state, ActorId::Ai, &[1, 2, 3, 4, 5, 6, 7, 8]);
        let t = evaluate_termination(&state).unwrap();
        assert_eq!(t.outcome, Outcome::AiWin);
        assert_eq!(t.reason, EndReason::AiDomination);
    }

    #[test]
    fn test_seven_tiles_is_not_domination() {
        let mut state = MatchState::standard();
        give(&mut state, ActorId::Human, &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(evaluate_termination(&state), None);
    }

    #[test]
    fn test_overtime_requires_turn_threshold() {
        let mut state = MatchState::standard();
        give(&mut state, ActorId::Human, &[1, 2, 3, 4, 5, 6, 7]);
        give(&mut state, ActorId::Ai, &[8, 9, 10, 11, 12, 13, 14]);
        state.turn = 19;
        assert_eq!(evaluate_termination(&state), None);

        state.turn = 20;
        let t = evaluate_termination(&state).unwrap();
        assert_eq!(t.reason, EndReason::Overtime);
        assert_eq!(t.outcome, Outcome::Draw);
    }

    #[test]
    fn test_settle_records_once() {
        let mut state = MatchState::standard();
        state.actors[ActorId::Ai].balance = 0;

        let mut events = Vec::new();
        assert!(settle(&mut state, &mut events));
        assert_eq!(state.outcome(), Some(Outcome::PlayerWin));
        assert_eq!(events.len(), 1);

        // A later change cannot rewrite the result.
        state.actors[ActorId::Human].balance = 0;
        assert!(settle(&mut state, &mut events));
        assert_eq!(state.outcome(), Some(Outcome::PlayerWin));
        assert_eq!(events.len(), 1);
    }
}
