//! Display events and per-operation reports.
//!
//! Every resolved operation yields an ordered list of `GameEvent`s. Events
//! are for display only: nothing in the engine reads them back.
//!
//! ## Sinks
//!
//! An `EventSink` consumes events as they are published. `Vec<GameEvent>`
//! collects them; `TracingSink` forwards them to `tracing`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use super::actor::ActorId;
use super::tile::TileId;
use crate::rules::{EndReason, Outcome};

/// Display category of an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

/// Something notable that happened while resolving an operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh match began.
    MatchStarted,

    /// An actor rolled the die.
    Rolled { actor: ActorId, roll: u8 },

    /// An actor stepped past the start tile and collected the bonus.
    PassedStart { actor: ActorId, bonus: i64 },

    /// `payer` landed on a tile owned by its opponent and paid rent.
    PaidRent {
        payer: ActorId,
        tile: TileId,
        name: String,
        rent: i64,
    },

    /// An actor landed on one of its own tiles.
    VisitedOwnTile { actor: ActorId, tile: TileId, name: String },

    /// An actor landed on an unowned tile.
    DiscoveredTile {
        actor: ActorId,
        tile: TileId,
        name: String,
        price: i64,
    },

    /// The AI declined to buy because the human is standing on the tile.
    HumanPriority { tile: TileId, name: String },

    /// The AI could not afford an unowned tile.
    AiCannotAfford { tile: TileId, name: String, price: i64 },

    /// An actor bought a tile.
    Purchased {
        actor: ActorId,
        tile: TileId,
        name: String,
        price: i64,
    },

    /// An actor rolled the maximum and moves again.
    ExtraTurn { actor: ActorId, tile: TileId, name: String },

    /// The external gate confirmed a purchase.
    PurchaseConfirmed { tile: TileId },

    /// The external gate confirmed a roll.
    RollConfirmed { roll: u8 },

    /// The session's gated purchase already happened; this buy is local-only.
    GateAlreadySettled { tile: TileId },

    /// The match ended.
    MatchOver { outcome: Outcome, reason: EndReason },
}

impl GameEvent {
    /// Display category for this event.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            GameEvent::MatchStarted
            | GameEvent::DiscoveredTile { .. }
            | GameEvent::AiCannotAfford { .. }
            | GameEvent::GateAlreadySettled { .. } => Severity::Info,
            GameEvent::Rolled { actor, .. }
            | GameEvent::PassedStart { actor, .. }
            | GameEvent::VisitedOwnTile { actor, .. }
            | GameEvent::ExtraTurn { actor, .. } => match actor {
                ActorId::Human => Severity::Success,
                ActorId::Ai => Severity::Info,
            },
            GameEvent::PaidRent { payer, .. } => match payer {
                ActorId::Human => Severity::Danger,
                ActorId::Ai => Severity::Success,
            },
            GameEvent::Purchased { actor, .. } => match actor {
                ActorId::Human => Severity::Success,
                ActorId::Ai => Severity::Danger,
            },
            GameEvent::HumanPriority { .. }
            | GameEvent::PurchaseConfirmed { .. }
            | GameEvent::RollConfirmed { .. } => Severity::Success,
            GameEvent::MatchOver { outcome, .. } => match outcome {
                Outcome::PlayerWin => Severity::Success,
                Outcome::AiWin => Severity::Danger,
                Outcome::Draw => Severity::Info,
            },
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ActorId::{Ai, Human};

        match self {
            GameEvent::MatchStarted => write!(f, "New game started against the Walrus network AI."),
            GameEvent::Rolled { actor: Human, roll } => write!(f, "Roll result: {roll}."),
            GameEvent::Rolled { actor: Ai, roll } => write!(f, "Walrus network AI rolled a {roll}..."),
            GameEvent::PassedStart { actor: Human, bonus } => {
                write!(f, "Passed Start! Collected +${bonus} Credits.")
            }
            GameEvent::PassedStart { actor: Ai, bonus } => {
                write!(f, "AI passed Start and collected +${bonus} Credits.")
            }
            GameEvent::PaidRent { payer: Human, name, rent, .. } => {
                write!(f, "Landed on AI Node \"{name}\". Paid rent: ${rent}.")
            }
            GameEvent::PaidRent { payer: Ai, name, rent, .. } => {
                write!(f, "AI landed on your node \"{name}\" and paid you ${rent}.")
            }
            GameEvent::VisitedOwnTile { actor: Human, name, .. } => {
                write!(f, "Welcome back to \"{name}\". Secure connection established.")
            }
            GameEvent::VisitedOwnTile { actor: Ai, name, .. } => {
                write!(f, "AI visited its own node \"{name}\".")
            }
            GameEvent::DiscoveredTile { actor: Human, name, price, .. } => {
                write!(f, "Discovered unowned node \"{name}\". Available for ${price}.")
            }
            GameEvent::DiscoveredTile { actor: Ai, name, price, .. } => {
                write!(f, "AI discovered unowned node \"{name}\". Available for ${price}.")
            }
            GameEvent::HumanPriority { name, .. } => write!(
                f,
                "You were here first on \"{name}\". Walrus AI waits and gives you priority to buy."
            ),
            GameEvent::AiCannotAfford { name, price, .. } => {
                write!(f, "AI cannot afford \"{name}\" (${price}).")
            }
            GameEvent::Purchased { actor: Human, name, .. } => {
                write!(f, "Successfully acquired \"{name}\"!")
            }
            GameEvent::Purchased { actor: Ai, name, .. } => write!(f, "AI acquired \"{name}\"."),
            GameEvent::ExtraTurn { actor: Human, name, .. } => write!(
                f,
                "You rolled a 6 on \"{name}\". Extra turn granted; Walrus AI will wait."
            ),
            GameEvent::ExtraTurn { actor: Ai, .. } => {
                write!(f, "Walrus network AI rolled a 6 and takes an extra turn.")
            }
            GameEvent::PurchaseConfirmed { tile } => {
                write!(f, "External confirmation received for buying node {tile}.")
            }
            GameEvent::RollConfirmed { roll } => write!(f, "Roll {roll} confirmed externally."),
            GameEvent::GateAlreadySettled { tile } => write!(
                f,
                "Confirmed purchase of node {tile} already completed. Further buys are local-only."
            ),
            GameEvent::MatchOver { outcome, reason } => write!(f, "{}", match_over_message(*outcome, *reason)),
        }
    }
}

fn match_over_message(outcome: Outcome, reason: EndReason) -> &'static str {
    match (reason, outcome) {
        (EndReason::HumanBankrupt, _) => {
            "Game over: You ran out of SUI credits. The Walrus network AI controls the estates."
        }
        (EndReason::AiBankrupt, _) => {
            "Victory: The Walrus network AI ran out of credits. You survived longer."
        }
        (EndReason::HumanDomination, _) => "Victory: You control the majority of Walrus data estates.",
        (EndReason::AiDomination, _) => {
            "Game over: The Walrus network AI controls the majority of estates."
        }
        (EndReason::Overtime, Outcome::PlayerWin) => {
            "Overtime victory: Both sides held the overtime tile count, but your net worth was higher."
        }
        (EndReason::Overtime, Outcome::AiWin) => {
            "Overtime game over: Both sides held the overtime tile count, but the Walrus network AI had higher net worth."
        }
        (EndReason::Overtime, Outcome::Draw) => {
            "Overtime draw: Both sides held the overtime tile count with equal net worth."
        }
    }
}

/// Consumer of published events. Purely observational.
pub trait EventSink {
    /// Receive one event.
    fn publish(&mut self, event: &GameEvent);

    /// Receive events in order.
    fn publish_all<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>)
    where
        Self: Sized,
    {
        for event in events {
            self.publish(event);
        }
    }
}

impl EventSink for Vec<GameEvent> {
    fn publish(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

/// Forwards events to `tracing` under the `walrus_estate::events` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn publish(&mut self, event: &GameEvent) {
        match event.severity() {
            Severity::Danger | Severity::Warning => {
                tracing::warn!(target: "walrus_estate::events", severity = ?event.severity(), "{event}");
            }
            Severity::Success | Severity::Info => {
                tracing::info!(target: "walrus_estate::events", severity = ?event.severity(), "{event}");
            }
        }
    }
}

/// Everything one engine operation did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnReport {
    /// Rolls applied, in order. Most cycles have one or two.
    pub rolls: SmallVec<[(ActorId, u8); 4]>,

    /// Ordered display events.
    pub events: Vec<GameEvent>,

    /// The human rolled the maximum and must roll again before the AI moves.
    pub extra_turn: bool,

    /// Set when this operation ended the match.
    pub outcome: Option<Outcome>,
}

impl TurnReport {
    /// Rolls made by one actor.
    pub fn rolls_by(&self, actor: ActorId) -> impl Iterator<Item = u8> + '_ {
        self.rolls.iter().filter(move |(a, _)| *a == actor).map(|(_, r)| *r)
    }

    /// Does any event match the predicate?
    pub fn has_event(&self, predicate: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.iter().any(predicate)
    }

    /// Rendered messages, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_by_perspective() {
        let human_rent = GameEvent::PaidRent {
            payer: ActorId::Human,
            tile: TileId::new(3),
            name: "Sui Bridge End".into(),
            rent: 35,
        };
        let ai_rent = GameEvent::PaidRent {
            payer: ActorId::Ai,
            tile: TileId::new(3),
            name: "Sui Bridge End".into(),
            rent: 35,
        };
        assert_eq!(human_rent.severity(), Severity::Danger);
        assert_eq!(ai_rent.severity(), Severity::Success);
    }

    #[test]
    fn test_messages() {
        let event = GameEvent::DiscoveredTile {
            actor: ActorId::Human,
            tile: TileId::new(5),
            name: "Epoch Archive".into(),
            price: 400,
        };
        assert_eq!(event.to_string(), "Discovered unowned node \"Epoch Archive\". Available for $400.");

        let over = GameEvent::MatchOver {
            outcome: Outcome::Draw,
            reason: EndReason::Overtime,
        };
        assert_eq!(over.severity(), Severity::Info);
        assert!(over.to_string().starts_with("Overtime draw"));
    }

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<GameEvent> = Vec::new();
        let events = [
            GameEvent::MatchStarted,
            GameEvent::Rolled { actor: ActorId::Ai, roll: 4 },
        ];
        sink.publish_all(events.iter());
        assert_eq!(sink, events.to_vec());
    }

    #[test]
    fn test_report_rolls_by() {
        let mut report = TurnReport::default();
        report.rolls.push((ActorId::Human, 6));
        report.rolls.push((ActorId::Ai, 2));
        report.rolls.push((ActorId::Ai, 6));

        assert_eq!(report.rolls_by(ActorId::Ai).collect::<Vec<_>>(), vec![2, 6]);
        assert_eq!(report.rolls_by(ActorId::Human).count(), 1);
    }
}
