//! Human tile purchases.
//!
//! Landing never buys for the human. A purchase is a separate request,
//! allowed only while the match is live and the human is standing on an
//! unowned, non-start tile it can afford. This module applies the
//! purchase; any external confirmation must already have been granted
//! (see `gate`).

use super::cycle::ensure_live;
use crate::core::{ActorId, GameEvent, MatchState, TileId, TurnReport};
use crate::error::{EngineResult, PurchaseDenial};
use crate::rules::termination::settle;

/// Check every purchase precondition without changing anything.
pub fn check_purchase(state: &MatchState, tile: TileId) -> EngineResult<()> {
    ensure_live(state)?;

    let target = state.board.get(tile).ok_or(PurchaseDenial::UnknownTile(tile))?;
    if !target.is_purchasable() {
        return Err(PurchaseDenial::StartTile.into());
    }

    let human = state.actor(ActorId::Human);
    if human.position != tile {
        return Err(PurchaseDenial::NotStandingOnTile {
            position: human.position,
            tile,
        }
        .into());
    }
    if !target.owner.is_unowned() {
        return Err(PurchaseDenial::AlreadyOwned(target.owner).into());
    }
    if human.balance < target.price {
        return Err(PurchaseDenial::InsufficientFunds {
            balance: human.balance,
            price: target.price,
        }
        .into());
    }
    Ok(())
}

/// Can the human buy `tile` right now?
#[must_use]
pub fn can_buy(state: &MatchState, tile: TileId) -> bool {
    check_purchase(state, tile).is_ok()
}

/// Buy `tile` for the human, then evaluate termination.
///
/// On `Err` the state is unchanged.
pub fn buy_tile(state: &mut MatchState, tile: TileId) -> EngineResult<TurnReport> {
    check_purchase(state, tile)?;

    let mut report = TurnReport::default();
    let (name, price) = match state.board.get(tile) {
        Some(t) => (t.name.clone(), t.price),
        None => return Err(PurchaseDenial::UnknownTile(tile).into()),
    };

    if state.board.claim(tile, ActorId::Human) {
        state.actors[ActorId::Human].balance -= price;
        tracing::debug!(tile = tile.0, price, "human bought tile");
        report.events.push(GameEvent::Purchased {
            actor: ActorId::Human,
            tile,
            name,
            price,
        });
    }

    settle(state, &mut report.events);
    report.outcome = state.outcome();
    state.history.extend(report.events.iter().cloned());
    Ok(report)
}
