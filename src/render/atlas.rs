//! Source rectangles on the tile and menu atlases.

use crate::grid::TILE_SIZE;
use crate::tile::{Block, TileCode, BASE, BOTTOM, LEFT, RIGHT, TOP};
use macroquad::prelude::{Color, Rect};

const TS: f32 = TILE_SIZE as f32;

fn cell(x: f32, y: f32) -> Rect {
    Rect::new(x, y, TS, TS)
}

/// Atlas cell for a ground tile, chosen by its connector mask.
pub fn ground_source(code: TileCode) -> Option<Rect> {
    if !code.is_ground() || !code.has(BASE) {
        return None;
    }
    let mask = code.connectors();
    let (x, y) = match mask {
        0 => (0.0, 0.0),
        m if m == BOTTOM => (0.0, 36.0),
        m if m == TOP => (0.0, 252.0),
        m if m == LEFT => (108.0, 0.0),
        m if m == RIGHT => (36.0, 0.0),
        m if m == TOP | BOTTOM => (0.0, 216.0),
        m if m == LEFT | RIGHT => (72.0, 0.0),
        m if m == LEFT | BOTTOM => (108.0, 36.0),
        m if m == LEFT | TOP => (108.0, 252.0),
        m if m == RIGHT | BOTTOM => (36.0, 36.0),
        m if m == RIGHT | TOP => (36.0, 252.0),
        m if m == LEFT | RIGHT | TOP => (72.0, 252.0),
        m if m == LEFT | RIGHT | BOTTOM => (72.0, 36.0),
        m if m == LEFT | TOP | BOTTOM => (108.0, 216.0),
        m if m == RIGHT | TOP | BOTTOM => (36.0, 216.0),
        _ => (72.0, 216.0),
    };
    Some(cell(x, y))
}

/// Atlas cell for a functional block.
pub fn block_source(block: Block) -> Rect {
    let (x, y) = match block {
        Block::Coin => (252.0, 0.0),
        Block::Key => (288.0, 36.0),
        Block::Lever => (324.0, 36.0),
        Block::SmallBrick => (252.0, 72.0),
        Block::BigBrick => (288.0, 72.0),
        Block::Brick => (324.0, 72.0),
        Block::Door => (360.0, 36.0),
        Block::Spike => (288.0, 0.0),
        Block::Box => (360.0, 0.0),
    };
    cell(x, y)
}

/// Atlas cell for any drawable code; `None` for empty and unknown codes.
pub fn tile_source(code: TileCode) -> Option<Rect> {
    match code.block() {
        Some(block) => Some(block_source(block)),
        None => ground_source(code),
    }
}

/// Flat colour used when the atlas texture is unavailable.
pub fn fallback_color(code: TileCode) -> Option<Color> {
    if code.is_ground() {
        return Some(Color::from_rgba(110, 84, 58, 255));
    }
    let rgb = match code.block()? {
        Block::Coin => (240, 200, 40),
        Block::Key => (250, 230, 120),
        Block::Lever => (150, 150, 160),
        Block::SmallBrick => (200, 90, 60),
        Block::BigBrick => (170, 60, 40),
        Block::Brick => (140, 50, 35),
        Block::Door => (90, 60, 160),
        Block::Spike => (200, 200, 210),
        Block::Box => (160, 120, 70),
    };
    Some(Color::from_rgba(rgb.0, rgb.1, rgb.2, 255))
}

/// Nine-slice cell of the stone panel on the menu atlas for tile
/// `(col, row)` of a `cols` x `rows` panel.
pub fn panel_source(col: usize, row: usize, cols: usize, rows: usize) -> Rect {
    let x = match col {
        0 => 0.0,
        c if c + 1 >= cols => 72.0,
        _ => 36.0,
    };
    let y = match row {
        0 => 108.0,
        r if r + 1 >= rows => 180.0,
        _ => 144.0,
    };
    cell(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_ground_mask_has_a_distinct_cell() {
        let mut seen = Vec::new();
        for mask in 0..16u8 {
            let code = TileCode(BASE | (mask << 1));
            let r = ground_source(code).expect("ground cell");
            assert!(!seen.contains(&(r.x as i32, r.y as i32)), "mask {mask:#06b} reused");
            seen.push((r.x as i32, r.y as i32));
        }
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn known_ground_cells() {
        assert_eq!(ground_source(TileCode(BASE)), Some(cell(0.0, 0.0)));
        assert_eq!(
            ground_source(TileCode(BASE | LEFT | TOP | RIGHT | BOTTOM)),
            Some(cell(72.0, 216.0))
        );
        assert_eq!(ground_source(TileCode(BASE | TOP | BOTTOM)), Some(cell(0.0, 216.0)));
    }

    #[test]
    fn empty_and_unknown_codes_draw_nothing() {
        assert_eq!(tile_source(TileCode::EMPTY), None);
        assert_eq!(tile_source(TileCode(LEFT)), None);
        assert_eq!(tile_source(TileCode(200)), None);
        assert_eq!(fallback_color(TileCode(200)), None);
    }

    #[test]
    fn blocks_use_their_own_cells() {
        assert_eq!(tile_source(Block::Box.code()), Some(cell(360.0, 0.0)));
        assert_eq!(tile_source(Block::Key.code()), Some(cell(288.0, 36.0)));
    }

    #[test]
    fn panel_corners_and_edges() {
        assert_eq!(panel_source(0, 0, 3, 13), cell(0.0, 108.0));
        assert_eq!(panel_source(2, 12, 3, 13), cell(72.0, 180.0));
        assert_eq!(panel_source(1, 5, 3, 13), cell(36.0, 144.0));
    }
}
