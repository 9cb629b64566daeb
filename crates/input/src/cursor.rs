use crate::types::{Direction, Position, TileId};

/// Keyboard cursor over the tile grid.
///
/// Moves stop at the grid edge instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    position: Position,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Step one cell; returns `false` at the edge.
    pub fn step(&mut self, dir: Direction) -> bool {
        match self.position.neighbor(dir) {
            Some(next) => {
                self.position = next;
                true
            }
            None => false,
        }
    }

    /// Jump to `id`; ids outside the grid are ignored.
    pub fn jump_to(&mut self, id: TileId) -> bool {
        match Position::from_index(id as usize) {
            Some(pos) => {
                self.position = pos;
                true
            }
            None => false,
        }
    }

    /// Tile under the cursor (row-major id)
    pub fn tile_id(&self) -> TileId {
        self.position.index() as TileId
    }
}
