//! Grid module - authoritative store of tile state
//!
//! The grid is a fixed 4x4 array of tiles in row-major order, so a tile's id
//! is also its flat index. The array type makes "exactly ROWS x COLS tiles"
//! hold by construction; ids and positions are assigned once and never move.

use derive_more::{Display, Error};

use crate::rng::RandomSource;
use crate::tile::Tile;
use crate::types::{
    Position, RotationMode, TileId, WireType, FULL_TURN_DEG, QUARTER_TURN_DEG, TILE_COUNT,
};

/// Errors reported by grid lookups and grid construction.
///
/// These indicate a caller bug: valid ids only ever come from the grid itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GridError {
    #[display("tile {id} not found")]
    NotFound { id: TileId },
    #[display("tile {id} is not at its row-major position")]
    Misplaced { id: TileId },
    #[display("position ({row}, {col}) is off the grid")]
    OffGrid { row: u8, col: u8 },
    #[display("target angle {angle} at ({row}, {col}) is not a quarter turn")]
    SkewedTarget { row: u8, col: u8, angle: u16 },
    #[display("position ({row}, {col}) listed twice")]
    DuplicateTarget { row: u8, col: u8 },
}

/// The puzzle grid
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    /// Row-major, `tiles[id].id == id`
    tiles: [Tile; TILE_COUNT],
}

impl TileGrid {
    /// Randomize a fresh grid.
    ///
    /// For every tile, in row-major order, the rotation is drawn first and the
    /// wire type second (a fair coin).
    pub fn initialize<R: RandomSource + ?Sized>(rng: &mut R, mode: RotationMode) -> Self {
        let tiles = std::array::from_fn(|i| {
            let rotation = match mode {
                RotationMode::Continuous => rng.next_unit() * FULL_TURN_DEG,
                RotationMode::Quantized => rng.next_range(4) as f64 * QUARTER_TURN_DEG,
            };
            let wire = if rng.next_bool() {
                WireType::Straight
            } else {
                WireType::Corner
            };
            Tile::new(i as TileId, position_of(i), wire, rotation)
        });
        Self { tiles }
    }

    /// A grid where every tile has the same wire type and rotation.
    pub fn uniform(wire: WireType, rotation: f64) -> Self {
        Self {
            tiles: std::array::from_fn(|i| Tile::new(i as TileId, position_of(i), wire, rotation)),
        }
    }

    /// Build a grid from explicit tiles, validating row-major order.
    pub fn from_tiles(tiles: [Tile; TILE_COUNT]) -> Result<Self, GridError> {
        for (i, tile) in tiles.iter().enumerate() {
            if tile.id as usize != i || tile.position != position_of(i) {
                return Err(GridError::Misplaced { id: tile.id });
            }
        }
        Ok(Self { tiles })
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Look up a tile by id
    pub fn get_tile(&self, id: TileId) -> Result<&Tile, GridError> {
        self.tiles
            .get(id as usize)
            .ok_or(GridError::NotFound { id })
    }

    /// Look up the tile at a grid position
    pub fn tile_at(&self, position: Position) -> Option<&Tile> {
        if !position.in_bounds() {
            return None;
        }
        self.tiles.get(position.index())
    }

    /// Id of the tile at a grid position
    pub fn id_at(&self, position: Position) -> Option<TileId> {
        self.tile_at(position).map(|t| t.id)
    }

    /// The currently highlighted tile, if any
    pub fn selected(&self) -> Option<TileId> {
        self.tiles.iter().find(|t| t.selected).map(|t| t.id)
    }

    /// Overwrite one tile's rotation (normalized), for building fixtures.
    pub fn set_rotation(&mut self, id: TileId, rotation: f64) -> Result<(), GridError> {
        let tile = self
            .tiles
            .get_mut(id as usize)
            .ok_or(GridError::NotFound { id })?;
        *tile = Tile::new(tile.id, tile.position, tile.wire, rotation);
        Ok(())
    }

    /// Overwrite one tile's wire type, for building fixtures.
    pub fn set_wire(&mut self, id: TileId, wire: WireType) -> Result<(), GridError> {
        let tile = self
            .tiles
            .get_mut(id as usize)
            .ok_or(GridError::NotFound { id })?;
        tile.wire = wire;
        Ok(())
    }

    pub(crate) fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id as usize)
    }

    /// Highlight `id` and clear every other tile.
    pub(crate) fn select_only(&mut self, id: TileId) {
        for tile in &mut self.tiles {
            tile.selected = tile.id == id;
        }
    }

    pub fn clear_selection(&mut self) {
        for tile in &mut self.tiles {
            tile.selected = false;
        }
    }
}

fn position_of(index: usize) -> Position {
    // Callers only pass indices below TILE_COUNT.
    Position::from_index(index).unwrap_or_default()
}
