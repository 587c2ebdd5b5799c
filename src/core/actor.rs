//! Actor identification and per-actor data storage.
//!
//! ## ActorId
//!
//! A match always has exactly two actors: the human player and the
//! scripted AI opponent.
//!
//! ## ActorMap
//!
//! Fixed two-slot storage indexed by `ActorId`, used for anything the
//! engine tracks once per actor (positions, balances, tile counts).

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::tile::TileId;

/// One of the two actors in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorId {
    /// The human player.
    Human,
    /// The scripted AI opponent.
    Ai,
}

impl ActorId {
    /// Both actors, human first.
    pub const ALL: [ActorId; 2] = [ActorId::Human, ActorId::Ai];

    /// Get the slot index (human = 0, AI = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            ActorId::Human => 0,
            ActorId::Ai => 1,
        }
    }

    /// The other actor.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            ActorId::Human => ActorId::Ai,
            ActorId::Ai => ActorId::Human,
        }
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActorId::Human => write!(f, "You"),
            ActorId::Ai => write!(f, "Walrus network AI"),
        }
    }
}

/// Per-actor data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use walrus_estate::core::{ActorId, ActorMap};
///
/// let mut balance: ActorMap<i64> = ActorMap::with_value(1500);
/// balance[ActorId::Ai] -= 200;
///
/// assert_eq!(balance[ActorId::Human], 1500);
/// assert_eq!(balance[ActorId::Ai], 1300);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorMap<T> {
    data: [T; 2],
}

impl<T> ActorMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(ActorId) -> T) -> Self {
        Self {
            data: [factory(ActorId::Human), factory(ActorId::Ai)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to an actor's data.
    #[must_use]
    pub fn get(&self, actor: ActorId) -> &T {
        &self.data[actor.index()]
    }

    /// Get a mutable reference to an actor's data.
    pub fn get_mut(&mut self, actor: ActorId) -> &mut T {
        &mut self.data[actor.index()]
    }

    /// Iterate over (ActorId, &T) pairs, human first.
    pub fn iter(&self) -> impl Iterator<Item = (ActorId, &T)> {
        ActorId::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<ActorId> for ActorMap<T> {
    type Output = T;

    fn index(&self, actor: ActorId) -> &Self::Output {
        self.get(actor)
    }
}

impl<T> IndexMut<ActorId> for ActorMap<T> {
    fn index_mut(&mut self, actor: ActorId) -> &mut Self::Output {
        self.get_mut(actor)
    }
}

/// Mutable per-actor match data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Current tile index, always in `[0, board_size)`.
    pub position: TileId,

    /// Spendable credits. Dropping to zero or below is bankruptcy.
    pub balance: i64,

    /// Net worth used for overtime tie-breaks.
    ///
    /// Starts at the starting balance and moves only with rent.
    pub net_worth: i64,
}

impl Actor {
    /// Create an actor standing on the start tile.
    #[must_use]
    pub fn new(starting_balance: i64) -> Self {
        Self {
            position: TileId::START,
            balance: starting_balance,
            net_worth: starting_balance,
        }
    }

    /// Credit (or debit, if negative) both balance and net worth.
    pub fn adjust_holdings(&mut self, delta: i64) {
        self.balance += delta;
        self.net_worth += delta;
    }

    /// Is this actor bankrupt?
    #[must_use]
    pub fn is_bankrupt(&self) -> bool {
        self.balance <= 0
    }
}
