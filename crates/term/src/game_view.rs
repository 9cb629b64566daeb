//! GameView: maps a `PuzzleSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::tile::quarter_turns;
use crate::core::{PuzzleSnapshot, TileSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{ConnectorMask, Direction, Position, TileId, GRID_COLS, GRID_ROWS, TILE_COUNT};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(60, 60, 95);
const SELECTED_BG: Rgb = Rgb::new(45, 45, 60);
const WIRE: Rgb = Rgb::new(170, 170, 180);
const CURRENT: Rgb = Rgb::new(250, 210, 80);
const GLOW: Rgb = Rgb::new(90, 230, 120);

const HELP: &str = "arrows move  space rotate  r reset  ? hint  q quit";

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Placement of the bordered grid inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

impl Layout {
    /// Row of the top tile row's wire, where battery and bulb attach.
    fn terminal_y(&self, cell_h: u16) -> u16 {
        self.frame_y + 1 + cell_h / 2
    }
}

/// A lightweight terminal renderer for the circuit puzzle.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 7x3 leaves room for a centered junction with arms on every side.
        Self {
            cell_w: 7,
            cell_h: 3,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = (GRID_COLS as u16) * self.cell_w + 2;
        let frame_h = (GRID_ROWS as u16) * self.cell_h + 2;
        let frame_x = viewport.width.saturating_sub(frame_w) / 2;
        let frame_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        Layout {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
        }
    }

    /// Tile under terminal cell `(x, y)`, if any.
    pub fn hit_test(&self, viewport: Viewport, x: u16, y: u16) -> Option<TileId> {
        let layout = self.layout(viewport);
        let ix = x.checked_sub(layout.frame_x + 1)?;
        let iy = y.checked_sub(layout.frame_y + 1)?;
        let col = ix / self.cell_w;
        let row = iy / self.cell_h;
        if col >= GRID_COLS as u16 || row >= GRID_ROWS as u16 {
            return None;
        }
        Some(Position::new(row as u8, col as u8).index() as TileId)
    }

    /// Render the current puzzle into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &PuzzleSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_cursor(snap, None, viewport, fb);
    }

    /// Like [`GameView::render_into`], also highlighting the keyboard cursor.
    pub fn render_into_with_cursor(
        &self,
        snap: &PuzzleSnapshot,
        cursor: Option<TileId>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.fill_rect(
            layout.frame_x + 1,
            layout.frame_y + 1,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            CellStyle::new(WIRE, BOARD_BG),
        );
        self.draw_border(fb, &layout, border);
        self.draw_terminals(fb, &layout, snap);

        for tile in snap.tiles.iter() {
            self.draw_tile(fb, &layout, tile, cursor == Some(tile.id));
        }

        self.draw_side_panel(fb, snap, viewport, &layout);

        let help_y = layout.frame_y.saturating_add(layout.frame_h);
        if help_y < viewport.height {
            let dim = CellStyle::default().dim();
            fb.put_str(layout.frame_x, help_y, HELP, dim);
        }

        if snap.complete() {
            self.draw_overlay_text(fb, &layout, "CIRCUIT COMPLETE!");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &PuzzleSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: &Layout, style: CellStyle) {
        let Layout {
            frame_x: x,
            frame_y: y,
            frame_w: w,
            frame_h: h,
        } = *layout;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    /// Battery on the left of the top row, bulb on the right.
    fn draw_terminals(&self, fb: &mut FrameBuffer, layout: &Layout, snap: &PuzzleSnapshot) {
        let y = layout.terminal_y(self.cell_h);
        let right = layout.frame_x + layout.frame_w - 1;

        let first_lit = snap.tiles[0].powered;
        let lead = |lit: bool| {
            CellStyle::new(if lit { CURRENT } else { WIRE }, Rgb::new(0, 0, 0))
        };
        fb.put_char(layout.frame_x, y, '─', lead(first_lit));
        fb.put_char(right, y, '─', lead(snap.complete()));

        if let Some(bx) = layout.frame_x.checked_sub(3) {
            let battery = CellStyle::new(CURRENT, Rgb::new(0, 0, 0)).bold();
            fb.put_str(bx, y, "[+]", battery);
        }

        let bulb = if snap.complete() {
            CellStyle::new(CURRENT, Rgb::new(0, 0, 0)).bold()
        } else {
            CellStyle::new(Rgb::new(110, 110, 110), Rgb::new(0, 0, 0)).dim()
        };
        fb.put_str(right + 1, y, "(*)", bulb);
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, layout: &Layout, tile: &TileSnapshot, cursor: bool) {
        let px = layout.frame_x + 1 + (tile.position.col as u16) * self.cell_w;
        let py = layout.frame_y + 1 + (tile.position.row as u16) * self.cell_h;

        let bg = if cursor {
            CURSOR_BG
        } else if tile.selected {
            SELECTED_BG
        } else {
            BOARD_BG
        };
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', CellStyle::new(WIRE, bg));

        let fg = if tile.verdict.is_correct() {
            GLOW
        } else if tile.powered {
            CURRENT
        } else {
            WIRE
        };
        let mut style = CellStyle::new(fg, bg);
        if tile.selected {
            style = style.bold();
        }
        // Off-grid angles are drawn at the nearest quarter turn, dimmed.
        if quarter_turns(tile.rotation).is_none() {
            style = style.dim();
        }

        let mask = (0..nearest_quarter_turns(tile.rotation))
            .fold(tile.wire.base_connectors(), |m, _| m.rotate_cw());
        let cx = px + self.cell_w / 2;
        let cy = py + self.cell_h / 2;

        if mask.contains(Direction::North) {
            for y in py..cy {
                fb.put_char(cx, y, '│', style);
            }
        }
        if mask.contains(Direction::South) {
            for y in cy + 1..py + self.cell_h {
                fb.put_char(cx, y, '│', style);
            }
        }
        if mask.contains(Direction::West) {
            for x in px..cx {
                fb.put_char(x, cy, '─', style);
            }
        }
        if mask.contains(Direction::East) {
            for x in cx + 1..px + self.cell_w {
                fb.put_char(x, cy, '─', style);
            }
        }
        fb.put_char(cx, cy, junction(mask), style);

        if tile.verdict.is_correct() && self.cell_w >= 3 && self.cell_h >= 3 {
            let glow = CellStyle::new(GLOW, bg);
            let (rx, by) = (px + self.cell_w - 1, py + self.cell_h - 1);
            fb.put_char(px, py, '╭', glow);
            fb.put_char(rx, py, '╮', glow);
            fb.put_char(px, by, '╰', glow);
            fb.put_char(rx, by, '╯', glow);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &PuzzleSnapshot,
        viewport: Viewport,
        layout: &Layout,
    ) {
        // Leave room for the bulb.
        let panel_x = layout
            .frame_x
            .saturating_add(layout.frame_w)
            .saturating_add(5);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = layout.frame_y;
        fb.put_str(panel_x, y, "ROTATIONS", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.attempts, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "CORRECT", label);
        y = y.saturating_add(1);
        let x = fb.put_u32(panel_x, y, snap.correct as u32, value);
        let x = fb.put_str(x, y, "/", value);
        fb.put_u32(x, y, TILE_COUNT as u32, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "EPISODE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.episode_id, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "MODE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, snap.rotation_mode.as_str(), value);
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: &Layout, text: &str) {
        let mid_y = layout.frame_y.saturating_add(layout.frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = layout
            .frame_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(20, 90, 40)).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn nearest_quarter_turns(rotation: f64) -> u8 {
    ((rotation / 90.0).round() as u32 % 4) as u8
}

fn junction(mask: ConnectorMask) -> char {
    let n = mask.contains(Direction::North);
    let e = mask.contains(Direction::East);
    let s = mask.contains(Direction::South);
    let w = mask.contains(Direction::West);
    match (n, e, s, w) {
        (true, false, true, false) => '│',
        (false, true, false, true) => '─',
        (true, true, false, false) => '└',
        (false, true, true, false) => '┌',
        (false, false, true, true) => '┐',
        (true, false, false, true) => '┘',
        _ => '·',
    }
}
