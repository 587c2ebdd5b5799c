//! The board: a fixed ring of tiles.
//!
//! Tile identity and order never change during a match. The only mutable
//! part of a tile is its owner, and `Board::claim` enforces that ownership
//! moves from unowned to owned exactly once.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::actor::ActorId;
use super::tile::{Owner, Rarity, Tile, TileId};
use crate::error::ConfigError;

/// Ordered, fixed-size sequence of tiles indexed `0..len`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
}

impl Board {
    /// Build a board from tiles.
    ///
    /// Tiles must be listed in index order, tile 0 must be a free start
    /// tile, and every tile must start unowned.
    pub fn new(tiles: Vec<Tile>) -> Result<Self, ConfigError> {
        if tiles.is_empty() {
            return Err(ConfigError::EmptyBoard);
        }
        if tiles.len() > usize::from(u8::MAX) + 1 {
            return Err(ConfigError::BoardTooLarge(tiles.len()));
        }
        for (index, tile) in tiles.iter().enumerate() {
            if tile.id.index() != index {
                return Err(ConfigError::TileOutOfOrder { index, id: tile.id });
            }
            if !tile.owner.is_unowned() {
                return Err(ConfigError::PreOwnedTile(tile.id));
            }
            if tile.price < 0 || tile.rent < 0 {
                return Err(ConfigError::NegativeAmount(tile.id));
            }
        }
        let start = &tiles[0];
        if start.price != 0 || start.rent != 0 {
            return Err(ConfigError::PricedStartTile);
        }
        Ok(Self { tiles })
    }

    /// The canonical 16-tile Walrus Estate board.
    #[must_use]
    pub fn walrus() -> Self {
        use Rarity::{Common, Legendary, Rare};

        let catalogue: [(&str, i64, i64, Rarity); 15] = [
            ("Cache Node Alpha", 150, 15, Common),
            ("Deep Store Delta", 200, 20, Common),
            ("Sui Bridge End", 300, 35, Rare),
            ("Blob Fragment X", 150, 15, Common),
            ("Epoch Archive", 400, 50, Legendary),
            ("Shadow Validator", 220, 25, Rare),
            ("Data Lake #07", 160, 18, Common),
            ("Walrus Hub", 180, 20, Common),
            ("Encrypted Shard", 350, 45, Legendary),
            ("Redundant Array", 140, 12, Common),
            ("Byzantine Blob", 280, 30, Rare),
            ("Storage Proof", 190, 22, Common),
            ("Frozen Ledger", 210, 24, Rare),
            ("Metadata Index", 130, 10, Common),
            ("Final Epoch", 500, 60, Legendary),
        ];

        let mut tiles = Vec::with_capacity(catalogue.len() + 1);
        tiles.push(Tile::start("Genesis Block"));
        for (offset, (name, price, rent, rarity)) in catalogue.into_iter().enumerate() {
            tiles.push(Tile::new(TileId::new(offset as u8 + 1), name, price, rent, rarity));
        }

        Self { tiles }
    }

    /// Number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Boards are never empty; provided for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Get a tile by ID.
    #[must_use]
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// Iterate over all tiles in board order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// The tile one step ahead of `from`, and whether the step wrapped past start.
    #[must_use]
    pub fn step(&self, from: TileId) -> (TileId, bool) {
        let next = from.index() + 1;
        if next >= self.tiles.len() {
            (TileId::START, true)
        } else {
            (TileId::new(next as u8), false)
        }
    }

    /// Count tiles owned by an actor.
    #[must_use]
    pub fn owned_count(&self, actor: ActorId) -> usize {
        self.tiles.iter().filter(|t| t.owner.is(actor)).count()
    }

    /// Count tiles per owner, including `Owner::Unowned`.
    #[must_use]
    pub fn tally(&self) -> FxHashMap<Owner, usize> {
        let mut counts = FxHashMap::default();
        for tile in &self.tiles {
            *counts.entry(tile.owner).or_insert(0) += 1;
        }
        counts
    }

    /// Transfer an unowned, purchasable tile to `actor`.
    ///
    /// Returns `false` (and changes nothing) if the tile is unknown, the
    /// start tile, or already owned.
    pub fn claim(&mut self, id: TileId, actor: ActorId) -> bool {
        match self.tiles.get_mut(id.index()) {
            Some(tile) if tile.is_purchasable() && tile.owner.is_unowned() => {
                tile.owner = Owner::Owned(actor);
                true
            }
            _ => false,
        }
    }

    /// A copy of this board with every tile unowned.
    #[must_use]
    pub fn reset_ownership(&self) -> Self {
        let tiles = self
            .tiles
            .iter()
            .map(|t| Tile {
                owner: Owner::Unowned,
                ..t.clone()
            })
            .collect();
        Self { tiles }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::walrus()
    }
}
