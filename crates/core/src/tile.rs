//! Tile module - a single rotatable wire segment

use crate::types::{
    ConnectorMask, Position, TileId, WireType, FULL_TURN_DEG, QUARTER_TURN_DEG,
};

/// Reduce an angle in degrees to `[0, 360)`.
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(FULL_TURN_DEG);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if r >= FULL_TURN_DEG {
        0.0
    } else {
        r
    }
}

/// Number of clockwise quarter turns an angle represents.
///
/// Only exact multiples of 90 map to a quarter-turn count; any other angle
/// returns `None`.
pub fn quarter_turns(deg: f64) -> Option<u8> {
    let q = normalize_degrees(deg) / QUARTER_TURN_DEG;
    if q.fract() == 0.0 {
        Some(q as u8)
    } else {
        None
    }
}

/// One grid cell holding a wire segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub id: TileId,
    pub position: Position,
    pub wire: WireType,
    /// Degrees, always in `[0, 360)`
    pub rotation: f64,
    /// UI highlight only; never affects correctness
    pub selected: bool,
}

impl Tile {
    /// Create an unselected tile; `rotation` is normalized.
    pub fn new(id: TileId, position: Position, wire: WireType, rotation: f64) -> Self {
        Self {
            id,
            position,
            wire,
            rotation: normalize_degrees(rotation),
            selected: false,
        }
    }

    /// Turn the tile 90° clockwise.
    pub fn rotate_cw(&mut self) {
        self.rotation = normalize_degrees(self.rotation + QUARTER_TURN_DEG);
    }

    /// Quarter turns from the 0° orientation, if the angle is cardinal.
    pub fn quarter_turns(&self) -> Option<u8> {
        quarter_turns(self.rotation)
    }

    /// Open sides at the current rotation.
    ///
    /// A tile resting at a non-cardinal angle lines up with none of its
    /// neighbors and has no open sides.
    pub fn connectors(&self) -> ConnectorMask {
        match self.quarter_turns() {
            Some(turns) => (0..turns).fold(self.wire.base_connectors(), |mask, _| {
                mask.rotate_cw()
            }),
            None => ConnectorMask::EMPTY,
        }
    }
}
