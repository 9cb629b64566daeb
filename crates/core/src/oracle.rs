//! Oracle module - per-tile correctness against the required-tile table
//!
//! Correctness is a pure lookup: a tile is correct when its position is in the
//! table and its rotation equals the target angle exactly. There is no
//! tolerance, so a tile resting at 89.9999° is simply wrong.

use crate::grid::GridError;
use crate::tile::{normalize_degrees, Tile};
use crate::types::{Position, Verdict, REFERENCE_TARGETS, TILE_COUNT};

/// Target angle for each grid position that belongs to the solved circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequiredTileTable {
    /// Indexed by row-major position; `None` for positions outside the circuit
    targets: [Option<u16>; TILE_COUNT],
}

impl RequiredTileTable {
    /// The reference puzzle's ten required tiles
    pub fn reference() -> Self {
        let mut targets = [None; TILE_COUNT];
        for (pos, angle) in REFERENCE_TARGETS {
            targets[pos.index()] = Some(angle);
        }
        Self { targets }
    }

    /// Build a table from explicit entries.
    ///
    /// Angles are reduced modulo 360 and must land on 0, 90, 180 or 270.
    /// Each position may appear once.
    pub fn from_entries(entries: &[(Position, u16)]) -> Result<Self, GridError> {
        let mut targets = [None; TILE_COUNT];
        for &(pos, angle) in entries {
            let (row, col) = (pos.row, pos.col);
            if !pos.in_bounds() {
                return Err(GridError::OffGrid { row, col });
            }
            if angle % 90 != 0 {
                return Err(GridError::SkewedTarget { row, col, angle });
            }
            let slot = &mut targets[pos.index()];
            if slot.is_some() {
                return Err(GridError::DuplicateTarget { row, col });
            }
            *slot = Some(angle % 360);
        }
        Ok(Self { targets })
    }

    /// Target angle at `position`, if it is a required tile
    pub fn target(&self, position: Position) -> Option<u16> {
        if !position.in_bounds() {
            return None;
        }
        self.targets[position.index()]
    }

    /// Number of required positions
    pub fn len(&self) -> usize {
        self.targets.iter().filter(|t| t.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Required positions and their targets, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Position, u16)> + '_ {
        self.targets.iter().enumerate().filter_map(|(i, t)| {
            let angle = (*t)?;
            Some((Position::from_index(i)?, angle))
        })
    }
}

impl Default for RequiredTileTable {
    fn default() -> Self {
        Self::reference()
    }
}

/// Judge one tile.
pub fn verdict(tile: &Tile, table: &RequiredTileTable) -> Verdict {
    match table.target(tile.position) {
        None => Verdict::NotApplicable,
        Some(target) if normalize_degrees(tile.rotation) == target as f64 => Verdict::Correct,
        Some(_) => Verdict::Incorrect,
    }
}

/// Number of tiles judged [`Verdict::Correct`].
///
/// Tiles outside the table are excluded entirely.
pub fn correct_count(tiles: &[Tile], table: &RequiredTileTable) -> usize {
    tiles
        .iter()
        .filter(|t| verdict(t, table).is_correct())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TileGrid;
    use crate::types::WireType;

    #[test]
    fn test_reference_table() {
        let table = RequiredTileTable::reference();
        assert_eq!(table.len(), 10);
        assert_eq!(table.target(Position::new(0, 3)), Some(90));
        assert_eq!(table.target(Position::new(2, 3)), Some(180));
        assert_eq!(table.target(Position::new(0, 0)), None);
        assert_eq!(table.target(Position::new(3, 2)), None);
    }

    #[test]
    fn test_from_entries_rejects_off_grid() {
        let err = RequiredTileTable::from_entries(&[(Position::new(4, 0), 0)]).unwrap_err();
        assert_eq!(err, GridError::OffGrid { row: 4, col: 0 });
    }

    #[test]
    fn test_from_entries_reduces_angles() {
        let table = RequiredTileTable::from_entries(&[(Position::new(1, 1), 450)]).unwrap();
        assert_eq!(table.target(Position::new(1, 1)), Some(90));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_from_entries_rejects_skewed_angle() {
        let err = RequiredTileTable::from_entries(&[(Position::new(2, 1), 45)]).unwrap_err();
        assert_eq!(
            err,
            GridError::SkewedTarget {
                row: 2,
                col: 1,
                angle: 45
            }
        );
        assert!(RequiredTileTable::from_entries(&[(Position::new(2, 1), 91)]).is_err());
    }

    #[test]
    fn test_from_entries_rejects_duplicates() {
        let pos = Position::new(0, 2);
        let err = RequiredTileTable::from_entries(&[(pos, 0), (pos, 90)]).unwrap_err();
        assert_eq!(err, GridError::DuplicateTarget { row: 0, col: 2 });
    }

    #[test]
    fn test_from_entries_accepts_reference_targets() {
        let table = RequiredTileTable::from_entries(&REFERENCE_TARGETS).unwrap();
        assert_eq!(table, RequiredTileTable::reference());
    }

    #[test]
    fn test_iter_is_row_major() {
        let table = RequiredTileTable::reference();
        let positions: Vec<Position> = table.iter().map(|(p, _)| p).collect();
        let mut sorted = positions.clone();
        sorted.sort_by_key(|p| p.index());
        assert_eq!(positions, sorted);
        assert_eq!(positions.len(), 10);
    }

    #[test]
    fn test_verdict_exact_match() {
        let table = RequiredTileTable::reference();
        // (0, 3) wants 90°
        let tile = Tile::new(3, Position::new(0, 3), WireType::Corner, 90.0);
        assert_eq!(verdict(&tile, &table), Verdict::Correct);

        let off = Tile::new(3, Position::new(0, 3), WireType::Corner, 90.0001);
        assert_eq!(verdict(&off, &table), Verdict::Incorrect);

        let wrong = Tile::new(3, Position::new(0, 3), WireType::Corner, 180.0);
        assert_eq!(verdict(&wrong, &table), Verdict::Incorrect);
    }

    #[test]
    fn test_verdict_not_applicable_regardless_of_rotation() {
        let table = RequiredTileTable::reference();
        for angle in [0.0, 90.0, 180.0, 270.0, 33.3] {
            let tile = Tile::new(0, Position::new(0, 0), WireType::Straight, angle);
            assert_eq!(verdict(&tile, &table), Verdict::NotApplicable);
        }
    }

    #[test]
    fn test_correct_count_ignores_non_required() {
        let table = RequiredTileTable::reference();
        // Everything at 0°: the seven required tiles targeting 0° are correct,
        // (0,3), (2,0) and (2,3) are not; non-required tiles never count.
        let grid = TileGrid::uniform(WireType::Straight, 0.0);
        assert_eq!(correct_count(grid.tiles(), &table), 7);
    }
}
