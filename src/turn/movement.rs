//! Single-step movement around the board.
//!
//! A roll of `n` is applied as `n` individual steps. Each step that wraps
//! past the last tile lands on the start tile and credits the pass-start
//! bonus, so the bonus is checked on every step rather than once per roll.
//!
//! Steps are reported to a `StepObserver` as they happen. Front ends can
//! use this to animate movement tile by tile; the final state does not
//! depend on it.

use crate::core::{ActorId, GameEvent, MatchState, TileId};

/// One observable movement step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// Who moved.
    pub actor: ActorId,
    /// Tile reached by this step.
    pub position: TileId,
    /// This step passed the start tile.
    pub wrapped: bool,
}

/// Receives each movement step as it is applied.
pub trait StepObserver {
    /// Called once per single-tile step.
    fn on_step(&mut self, step: &Step);
}

/// Observer that ignores every step.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSteps;

impl StepObserver for NoSteps {
    fn on_step(&mut self, _step: &Step) {}
}

impl StepObserver for Vec<Step> {
    fn on_step(&mut self, step: &Step) {
        self.push(*step);
    }
}

/// Move `actor` forward `steps` tiles, crediting the bonus on each wrap.
///
/// Returns the tile the actor ends on.
pub(crate) fn advance<O: StepObserver + ?Sized>(
    state: &mut MatchState,
    actor: ActorId,
    steps: u8,
    observer: &mut O,
    events: &mut Vec<GameEvent>,
) -> TileId {
    let bonus = state.config.pass_start_bonus;
    let mut position = state.actors[actor].position;

    for _ in 0..steps {
        let (next, wrapped) = state.board.step(position);
        position = next;

        if wrapped {
            state.actors[actor].balance += bonus;
            events.push(GameEvent::PassedStart { actor, bonus });
        }
        state.actors[actor].position = position;

        tracing::trace!(?actor, tile = position.0, wrapped, "step");
        observer.on_step(&Step {
            actor,
            position,
            wrapped,
        });
    }

    position
}
