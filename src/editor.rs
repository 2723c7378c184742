use crate::grid::{GRID_H, GRID_W, SCREEN_HEIGHT, SCREEN_WIDTH, TILE_SIZE};
use crate::tile::{Block, TileCode};
use crate::ui::layout::{LayoutStack, Orient};
use macroquad::prelude::*;

/// Zoom change per wheel notch; also the minimum zoom.
pub const ZOOM_STEP: f32 = 0.125;
/// Width of the tool panel in pixels.
pub const PANEL_WIDTH: f32 = 3.0 * TILE_SIZE as f32;
const PALETTE_COLUMNS: usize = 2;
const PALETTE_PADDING: f32 = 9.0;
const PALETTE_GAP: f32 = 6.0;

/// What a left click does on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Paint ground; connectors are computed.
    #[default]
    Ground,
    /// Place one functional block.
    Block(Block),
    /// Add a spawn point.
    Spawn,
    /// Clear the cell and any spawn on it.
    Eraser,
}

impl Tool {
    /// Panel order, also the `F` cycling order.
    pub const PALETTE: [Tool; 12] = [
        Tool::Ground,
        Tool::Block(Block::Coin),
        Tool::Block(Block::Key),
        Tool::Block(Block::Lever),
        Tool::Block(Block::SmallBrick),
        Tool::Block(Block::BigBrick),
        Tool::Block(Block::Brick),
        Tool::Block(Block::Door),
        Tool::Block(Block::Spike),
        Tool::Block(Block::Box),
        Tool::Spawn,
        Tool::Eraser,
    ];

    /// Following palette entry, wrapping around.
    pub fn next(self) -> Tool {
        let i = Self::PALETTE.iter().position(|&t| t == self).unwrap_or(0);
        Self::PALETTE[(i + 1) % Self::PALETTE.len()]
    }

    /// Code written to the grid, if the tool writes one.
    pub fn tile_code(self) -> Option<TileCode> {
        match self {
            Tool::Ground => Some(TileCode::GROUND),
            Tool::Block(b) => Some(b.code()),
            Tool::Eraser => Some(TileCode::EMPTY),
            Tool::Spawn => None,
        }
    }

    /// Label for logs and the HUD.
    pub fn name(self) -> &'static str {
        match self {
            Tool::Ground => "ground",
            Tool::Block(b) => b.name(),
            Tool::Spawn => "spawn",
            Tool::Eraser => "eraser",
        }
    }
}

/// Zooming 2D camera: `offset` is the screen point where `target`
/// is drawn, scaled by `zoom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorCamera {
    /// World point drawn at `offset`.
    pub target: Vec2,
    /// Screen point.
    pub offset: Vec2,
    /// Scale factor, at least [`ZOOM_STEP`].
    pub zoom: f32,
}

impl Default for EditorCamera {
    fn default() -> Self {
        EditorCamera {
            target: Vec2::ZERO,
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl EditorCamera {
    /// Inverse of [`EditorCamera::world_to_screen`].
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen / self.zoom + self.target - self.offset / self.zoom
    }

    /// World position to screen pixels.
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.target) * self.zoom + self.offset
    }

    /// World rect to screen pixels.
    pub fn world_rect_to_screen(&self, r: Rect) -> Rect {
        let p = self.world_to_screen(r.point());
        Rect::new(p.x, p.y, r.w * self.zoom, r.h * self.zoom)
    }

    /// Zoom by `wheel` steps while keeping the world point under `cursor`
    /// fixed on screen.
    pub fn zoom_at(&mut self, cursor: Vec2, wheel: f32) {
        if wheel == 0.0 {
            return;
        }
        self.target = self.screen_to_world(cursor);
        self.offset = cursor;
        self.zoom = (self.zoom + wheel * ZOOM_STEP).max(ZOOM_STEP);
    }

    /// Grid cell under a screen position, or `None` off the grid.
    pub fn screen_to_tile(&self, screen: Vec2) -> Option<(usize, usize)> {
        let world = self.screen_to_world(screen) / TILE_SIZE as f32;
        let (tx, ty) = (world.x.floor(), world.y.floor());
        if tx < 0.0 || ty < 0.0 || tx >= GRID_W as f32 || ty >= GRID_H as f32 {
            return None;
        }
        Some((tx as usize, ty as usize))
    }
}

/// Tool palette docked on the right edge. Sliding is animated; `x` is the
/// current left edge in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Target state; `x` moves towards it.
    pub shown: bool,
    /// Left edge in screen pixels.
    pub x: f32,
}

impl Default for Panel {
    fn default() -> Self {
        Panel {
            shown: true,
            x: Self::shown_x(),
        }
    }
}

impl Panel {
    fn shown_x() -> f32 {
        SCREEN_WIDTH as f32 - PANEL_WIDTH
    }

    fn hidden_x() -> f32 {
        SCREEN_WIDTH as f32
    }

    /// Flip between docked and hidden.
    pub fn toggle(&mut self) {
        self.shown = !self.shown;
    }

    /// Slide toward the docked or hidden position at `speed` px/s.
    pub fn update(&mut self, dt: f32, speed: f32) {
        let step = speed * dt;
        if self.shown {
            self.x = (self.x - step).max(Self::shown_x());
        } else {
            self.x = (self.x + step).min(Self::hidden_x());
        }
    }

    /// Screen rect at the current slide position.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, 0.0, PANEL_WIDTH, SCREEN_HEIGHT as f32)
    }

    /// Any part of the panel on screen.
    pub fn is_visible(&self) -> bool {
        self.x < Self::hidden_x()
    }

    /// Cursor is over the visible panel.
    pub fn contains(&self, screen: Vec2) -> bool {
        self.is_visible() && self.rect().contains(screen)
    }

    /// Screen rectangle of every palette entry, in palette order.
    pub fn palette_slots(&self) -> Vec<(Tool, Rect)> {
        let r = self.rect();
        let inner = Rect::new(
            r.x + PALETTE_PADDING,
            r.y + PALETTE_PADDING,
            r.w - 2.0 * PALETTE_PADDING,
            r.h - 2.0 * PALETTE_PADDING,
        );
        let rows = Tool::PALETTE.len().div_ceil(PALETTE_COLUMNS);

        let mut ls = LayoutStack::new();
        ls.push(Orient::Vertical, inner, rows, PALETTE_GAP);
        let mut slots = Vec::with_capacity(Tool::PALETTE.len());
        for row in Tool::PALETTE.chunks(PALETTE_COLUMNS) {
            let row_rect = ls.slot();
            ls.push(Orient::Horizontal, row_rect, PALETTE_COLUMNS, PALETTE_GAP);
            for &tool in row {
                slots.push((tool, ls.slot()));
            }
            ls.pop();
        }
        slots
    }

    /// Palette entry under the cursor.
    pub fn tool_at(&self, screen: Vec2) -> Option<Tool> {
        if !self.is_visible() {
            return None;
        }
        self.palette_slots()
            .into_iter()
            .find(|(_, r)| r.contains(screen))
            .map(|(tool, _)| tool)
    }
}
