//! Roll-cycles: the human roll and the AI sub-turns that follow it.
//!
//! ## Human roll-cycle
//!
//! 1. Move the human `roll` steps and resolve the landing tile
//! 2. A roll of 6 grants the human another roll; the AI waits
//! 3. Otherwise the AI takes sub-turns until it rolls something other
//!    than 6 or the match ends
//! 4. Termination is evaluated after every landing
//!
//! `turn` increments once when a new cycle starts. The extra roll after
//! a 6 continues the same cycle and does not increment it again.
//!
//! ## Atomicity
//!
//! An AI roll comes from the injected `RollSource`, so it can only be
//! validated after the cycle has started. If any roll turns out invalid
//! the state is restored to what it was before the call.

use super::landing::land;
use super::movement::{advance, StepObserver};
use crate::core::{is_valid_roll, ActorId, GameEvent, MatchState, RollSource, TurnReport, MAX_ROLL};
use crate::error::{EngineError, EngineResult};
use crate::rules::termination::settle;

/// Result of one AI sub-turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubTurn {
    /// The AI's roll.
    pub roll: u8,
    /// The roll earns the AI another sub-turn.
    pub extra_turn: bool,
}

pub(crate) fn ensure_live(state: &MatchState) -> EngineResult<()> {
    if state.is_terminal() {
        Err(EngineError::MatchAlreadyOver)
    } else {
        Ok(())
    }
}

fn ensure_roll(roll: u8) -> EngineResult<u8> {
    if is_valid_roll(roll) {
        Ok(roll)
    } else {
        Err(EngineError::InvalidRoll(roll))
    }
}

/// Resolve one human roll-cycle with a caller-supplied roll.
///
/// `dice` supplies the AI's rolls. `observer` sees every movement step of
/// both actors. On `Err` the state is unchanged.
pub fn resolve_human_turn<D, O>(
    state: &mut MatchState,
    roll: u8,
    dice: &mut D,
    observer: &mut O,
) -> EngineResult<TurnReport>
where
    D: RollSource + ?Sized,
    O: StepObserver + ?Sized,
{
    ensure_live(state)?;
    ensure_roll(roll)?;

    let checkpoint = state.clone();
    let mut report = TurnReport::default();

    match play_cycle(state, roll, dice, observer, &mut report) {
        Ok(()) => {
            report.outcome = state.outcome();
            state.history.extend(report.events.iter().cloned());
            Ok(report)
        }
        Err(err) => {
            tracing::warn!(error = %err, "roll-cycle aborted, state restored");
            *state = checkpoint;
            Err(err)
        }
    }
}

fn play_cycle<D, O>(
    state: &mut MatchState,
    roll: u8,
    dice: &mut D,
    observer: &mut O,
    report: &mut TurnReport,
) -> EngineResult<()>
where
    D: RollSource + ?Sized,
    O: StepObserver + ?Sized,
{
    if !state.extra_roll_pending {
        state.turn += 1;
    }
    state.extra_roll_pending = false;

    tracing::debug!(turn = state.turn, roll, "human roll");
    report.rolls.push((ActorId::Human, roll));
    report.events.push(GameEvent::Rolled {
        actor: ActorId::Human,
        roll,
    });

    let landed = advance(state, ActorId::Human, roll, observer, &mut report.events);
    land(state, ActorId::Human, landed, &mut report.events)?;
    if settle(state, &mut report.events) {
        return Ok(());
    }

    if roll == MAX_ROLL {
        state.extra_roll_pending = true;
        report.extra_turn = true;
        let name = state.board.get(landed).map(|t| t.name.clone()).unwrap_or_default();
        report.events.push(GameEvent::ExtraTurn {
            actor: ActorId::Human,
            tile: landed,
            name,
        });
        return Ok(());
    }

    loop {
        let sub = ai_sub_turn(state, dice, observer, report)?;
        if state.is_terminal() || !sub.extra_turn {
            break;
        }
        let tile = state.actor(ActorId::Ai).position;
        let name = state.board.get(tile).map(|t| t.name.clone()).unwrap_or_default();
        report.events.push(GameEvent::ExtraTurn {
            actor: ActorId::Ai,
            tile,
            name,
        });
    }

    settle(state, &mut report.events);
    Ok(())
}

fn ai_sub_turn<D, O>(
    state: &mut MatchState,
    dice: &mut D,
    observer: &mut O,
    report: &mut TurnReport,
) -> EngineResult<SubTurn>
where
    D: RollSource + ?Sized,
    O: StepObserver + ?Sized,
{
    let roll = ensure_roll(dice.roll())?;

    tracing::debug!(turn = state.turn, roll, "ai roll");
    report.rolls.push((ActorId::Ai, roll));
    report.events.push(GameEvent::Rolled {
        actor: ActorId::Ai,
        roll,
    });

    let landed = advance(state, ActorId::Ai, roll, observer, &mut report.events);
    land(state, ActorId::Ai, landed, &mut report.events)?;
    settle(state, &mut report.events);

    Ok(SubTurn {
        roll,
        extra_turn: roll == MAX_ROLL,
    })
}

/// Run a single AI sub-turn on its own.
///
/// Rolls once, moves the AI, resolves its landing and evaluates
/// termination. The caller decides whether to loop on `extra_turn`.
///
/// Fails with `ExtraRollPending` while the human still owes the roll
/// earned by a 6.
pub fn run_ai_sub_turn<D, O>(
    state: &mut MatchState,
    dice: &mut D,
    observer: &mut O,
) -> EngineResult<(SubTurn, TurnReport)>
where
    D: RollSource + ?Sized,
    O: StepObserver + ?Sized,
{
    ensure_live(state)?;
    if state.extra_roll_pending {
        return Err(EngineError::ExtraRollPending);
    }

    let mut report = TurnReport::default();
    let sub = ai_sub_turn(state, dice, observer, &mut report)?;
    report.outcome = state.outcome();
    state.history.extend(report.events.iter().cloned());
    Ok((sub, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ScriptedDice, TileId};
    use crate::turn::movement::NoSteps;

    #[test]
    fn test_cycle_moves_both_actors() {
        let mut state = MatchState::standard();
        let mut dice = ScriptedDice::new([2]);

        let report = resolve_human_turn(&mut state, 3, &mut dice, &mut NoSteps).unwrap();

        assert_eq!(state.actor(ActorId::Human).position, TileId::new(3));
        assert_eq!(state.actor(ActorId::Ai).position, TileId::new(2));
        assert_eq!(state.turn, 2);
        assert!(!report.extra_turn);
        assert_eq!(report.rolls.as_slice(), &[(ActorId::Human, 3), (ActorId::Ai, 2)]);
    }

    #[test]
    fn test_invalid_roll_rejected() {
        let mut state = MatchState::standard();
        let mut dice = ScriptedDice::new([2]);

        for roll in [0, 7, 200] {
            let err = resolve_human_turn(&mut state, roll, &mut dice, &mut NoSteps).unwrap_err();
            assert_eq!(err, EngineError::InvalidRoll(roll));
        }
        assert_eq!(state, MatchState::standard());
        assert_eq!(dice.rolls_used(), 0);
    }

    #[test]
    fn test_invalid_ai_roll_restores_state() {
        let mut state = MatchState::standard();
        let mut dice = ScriptedDice::new([9]);

        let err = resolve_human_turn(&mut state, 2, &mut dice, &mut NoSteps).unwrap_err();

        assert_eq!(err, EngineError::InvalidRoll(9));
        assert_eq!(state, MatchState::standard());
    }

    #[test]
    fn test_sub_turn_reports_extra() {
        let mut state = MatchState::standard();
        let mut dice = ScriptedDice::new([6]);

        let (sub, report) = run_ai_sub_turn(&mut state, &mut dice, &mut NoSteps).unwrap();

        assert_eq!(sub, SubTurn { roll: 6, extra_turn: true });
        assert_eq!(state.actor(ActorId::Ai).position, TileId::new(6));
        assert!(state.board.get(TileId::new(6)).unwrap().owner.is(ActorId::Ai));
        assert_eq!(report.rolls_by(ActorId::Ai).collect::<Vec<_>>(), vec![6]);
        // A lone sub-turn is not a human cycle.
        assert_eq!(state.turn, 1);
    }

    #[test]
    fn test_sub_turn_waits_for_extra_roll() {
        let mut state = MatchState::standard();
        let mut dice = ScriptedDice::new([3]);
        resolve_human_turn(&mut state, 6, &mut dice, &mut NoSteps).unwrap();
        let before = state.clone();

        let err = run_ai_sub_turn(&mut state, &mut dice, &mut NoSteps).unwrap_err();

        assert_eq!(err, EngineError::ExtraRollPending);
        assert_eq!(state, before);
        assert_eq!(dice.rolls_used(), 0);
    }
}
