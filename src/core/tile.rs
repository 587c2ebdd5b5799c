//! Board tiles: identity, pricing, rarity and ownership.

use serde::{Deserialize, Serialize};

use super::actor::ActorId;

/// Tile identifier: the tile's index on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u8);

impl TileId {
    /// The distinguished start tile. Never priced, never owned.
    pub const START: TileId = TileId(0);

    /// Create a new tile ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the board index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Is this the start tile?
    #[must_use]
    pub const fn is_start(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Cosmetic rarity tier of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
}

/// Who owns a tile.
///
/// Ownership only ever moves from `Unowned` to `Owned(_)` within a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// Nobody has bought the tile yet.
    #[default]
    Unowned,
    /// Bought by an actor.
    Owned(ActorId),
}

impl Owner {
    /// Is the tile owned by `actor`?
    #[must_use]
    pub fn is(self, actor: ActorId) -> bool {
        self == Owner::Owned(actor)
    }

    /// Is the tile still for sale?
    #[must_use]
    pub fn is_unowned(self) -> bool {
        self == Owner::Unowned
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Owner::Unowned => write!(f, "nobody"),
            Owner::Owned(actor) => write!(f, "{}", actor),
        }
    }
}

/// A single board tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Board index.
    pub id: TileId,

    /// Display name.
    pub name: String,

    /// Purchase price.
    pub price: i64,

    /// Rent charged to the opposing actor on landing.
    pub rent: i64,

    /// Current owner.
    pub owner: Owner,

    /// Rarity tier.
    pub rarity: Rarity,
}

impl Tile {
    /// Create an unowned tile.
    pub fn new(id: TileId, name: impl Into<String>, price: i64, rent: i64, rarity: Rarity) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            rent,
            owner: Owner::Unowned,
            rarity,
        }
    }

    /// Create the start tile: free, rent-less, never purchasable.
    pub fn start(name: impl Into<String>) -> Self {
        Self::new(TileId::START, name, 0, 0, Rarity::Legendary)
    }

    /// Can this tile ever be bought?
    #[must_use]
    pub fn is_purchasable(&self) -> bool {
        !self.id.is_start()
    }
}
