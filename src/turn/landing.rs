//! Resolving the tile an actor lands on.
//!
//! - Start tile: nothing happens
//! - Opponent's tile: rent moves from the lander to the owner
//! - Own tile: informational only
//! - Unowned tile: the human is only told the price; the AI buys at once
//!   if it can afford it, unless the human is standing on that tile

use super::cycle::ensure_live;
use crate::core::{ActorId, GameEvent, MatchState, Owner, TileId};
use crate::error::{EngineError, EngineResult};

/// Apply the landing rules for `actor` arriving on `tile`.
///
/// The events are appended to `events` and to `state.history`. Termination
/// is not evaluated here. Fails with `MatchAlreadyOver` on a finished match
/// and `UnknownTile` for an id off the board; on `Err` nothing changes.
pub fn resolve_landing(
    state: &mut MatchState,
    actor: ActorId,
    tile: TileId,
    events: &mut Vec<GameEvent>,
) -> EngineResult<()> {
    ensure_live(state)?;

    let mut landed = Vec::new();
    land(state, actor, tile, &mut landed)?;
    state.history.extend(landed.iter().cloned());
    events.extend(landed);
    Ok(())
}

/// Landing rules without the liveness check or history bookkeeping; the
/// roll-cycle records its own report.
pub(crate) fn land(
    state: &mut MatchState,
    actor: ActorId,
    tile: TileId,
    events: &mut Vec<GameEvent>,
) -> EngineResult<()> {
    let landed = state.board.get(tile).ok_or(EngineError::UnknownTile(tile))?;
    if landed.id.is_start() {
        return Ok(());
    }

    let name = landed.name.clone();
    let price = landed.price;
    let rent = landed.rent;
    let owner = landed.owner;

    match owner {
        Owner::Owned(owner) if owner == actor.opponent() => {
            state.actors[actor].adjust_holdings(-rent);
            state.actors[owner].adjust_holdings(rent);
            tracing::debug!(payer = ?actor, tile = tile.0, rent, "rent paid");
            events.push(GameEvent::PaidRent {
                payer: actor,
                tile,
                name,
                rent,
            });
        }
        Owner::Owned(_) => {
            events.push(GameEvent::VisitedOwnTile { actor, tile, name });
        }
        Owner::Unowned => {
            events.push(GameEvent::DiscoveredTile {
                actor,
                tile,
                name: name.clone(),
                price,
            });
            if actor == ActorId::Ai {
                ai_consider_purchase(state, tile, name, price, events);
            }
        }
    }
    Ok(())
}

fn ai_consider_purchase(
    state: &mut MatchState,
    tile: TileId,
    name: String,
    price: i64,
    events: &mut Vec<GameEvent>,
) {
    if state.human_is_on(tile) {
        tracing::debug!(tile = tile.0, "ai purchase blocked by human priority");
        events.push(GameEvent::HumanPriority { tile, name });
        return;
    }

    if state.actors[ActorId::Ai].balance < price {
        events.push(GameEvent::AiCannotAfford { tile, name, price });
        return;
    }

    if state.board.claim(tile, ActorId::Ai) {
        state.actors[ActorId::Ai].balance -= price;
        tracing::debug!(tile = tile.0, price, "ai bought tile");
        events.push(GameEvent::Purchased {
            actor: ActorId::Ai,
            tile,
            name,
            price,
        });
    }
}
