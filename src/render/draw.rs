use crate::editor::Tool;
use crate::grid::{GRID_H, GRID_W, SCREEN_HEIGHT, SCREEN_WIDTH, TILE_SIZE};
use crate::render::atlas;
use crate::session::{Mode, Session};
use crate::tile::TileCode;
use macroquad::logging::warn;
use macroquad::prelude::*;
use std::path::Path;

/// Tile atlas file name inside the assets directory.
pub const TILES_TEXTURE: &str = "tiles.png";
/// Stone panel atlas.
pub const MENU_TEXTURE: &str = "menu.png";
/// Full-level backdrop.
pub const BACKGROUND_TEXTURE: &str = "background.png";

const ENTITY_COLOR: Color = Color::new(0.95, 0.55, 0.2, 1.0);
const GRID_LINE: Color = Color::new(0.0, 0.0, 0.0, 0.3);
const PANEL_FILL: Color = Color::new(0.3, 0.3, 0.33, 1.0);

/// Textures used for drawing. Any of them may be missing, in which case
/// flat colours are drawn instead.
#[derive(Default)]
pub struct Assets {
    /// Ground and block cells.
    pub tiles: Option<Texture2D>,
    /// Nine-slice panel cells.
    pub menu: Option<Texture2D>,
    /// Drawn behind the tiles.
    pub background: Option<Texture2D>,
}

impl Assets {
    /// Load every texture found in `dir`; missing ones are logged and skipped.
    pub async fn load(dir: &Path) -> Self {
        Assets {
            tiles: load_optional(&dir.join(TILES_TEXTURE)).await,
            menu: load_optional(&dir.join(MENU_TEXTURE)).await,
            background: load_optional(&dir.join(BACKGROUND_TEXTURE)).await,
        }
    }
}

async fn load_optional(path: &Path) -> Option<Texture2D> {
    match load_texture(&path.to_string_lossy()).await {
        Ok(tex) => {
            tex.set_filter(FilterMode::Nearest);
            Some(tex)
        }
        Err(e) => {
            warn!("texture {} unavailable ({}), using flat colours", path.display(), e);
            None
        }
    }
}

/// Draw one frame: background, tiles, grid lines, walkers, panel and HUD.
pub fn draw_session(session: &Session, assets: &Assets) {
    clear_background(BLACK);
    let cam = &session.camera;

    let world = Rect::new(0.0, 0.0, SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32);
    let dest = cam.world_rect_to_screen(world);
    match &assets.background {
        Some(bg) => draw_texture_ex(
            bg,
            dest.x,
            dest.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(dest.w, dest.h)),
                ..Default::default()
            },
        ),
        None => draw_rectangle(dest.x, dest.y, dest.w, dest.h, Color::from_rgba(96, 160, 200, 255)),
    }

    let ts = TILE_SIZE as f32;
    for (x, y, code) in session.grid.iter() {
        if code.is_empty() {
            continue;
        }
        let dest = cam.world_rect_to_screen(Rect::new(x as f32 * ts, y as f32 * ts, ts, ts));
        draw_tile(code, dest, assets);
    }

    if session.mode == Mode::Edit && session.show_grid && session.panel.is_visible() {
        draw_grid_lines(session);
    }

    for e in &session.entities {
        let r = cam.world_rect_to_screen(e.rect);
        draw_rectangle(r.x, r.y, r.w, r.h, ENTITY_COLOR);
    }

    if session.mode == Mode::Edit {
        draw_panel(session, assets);
    }
    draw_hud(session);
}

/// [`draw_session`] plus entity hit boxes and the code of the hovered cell.
pub fn draw_session_debug(session: &Session, assets: &Assets) {
    draw_session(session, assets);

    for e in &session.entities {
        let r = session.camera.world_rect_to_screen(e.rect);
        draw_rectangle_lines(r.x, r.y, r.w, r.h, 1.0, GREEN);
    }
    let cell = match session.hovered {
        Some((x, y)) => format!("({}, {}) = {}", x, y, session.grid.get(x, y).raw()),
        None => "-".to_owned(),
    };
    draw_text(
        &format!("debug  {}", cell),
        10.0,
        SCREEN_HEIGHT as f32 - 10.0,
        16.0,
        GREEN,
    );
}

/// Draw one tile into `dest`, from the atlas when it is loaded.
pub fn draw_tile(code: TileCode, dest: Rect, assets: &Assets) {
    if let (Some(tex), Some(source)) = (&assets.tiles, atlas::tile_source(code)) {
        draw_texture_ex(
            tex,
            dest.x,
            dest.y,
            WHITE,
            DrawTextureParams {
                source: Some(source),
                dest_size: Some(vec2(dest.w, dest.h)),
                ..Default::default()
            },
        );
    } else if let Some(color) = atlas::fallback_color(code) {
        draw_rectangle(dest.x, dest.y, dest.w, dest.h, color);
    }
}

fn draw_grid_lines(session: &Session) {
    let ts = TILE_SIZE as f32;
    for y in 0..GRID_H {
        for x in 0..GRID_W {
            let r = session
                .camera
                .world_rect_to_screen(Rect::new(x as f32 * ts, y as f32 * ts, ts, ts));
            let color = if session.hovered == Some((x, y)) { RED } else { GRID_LINE };
            draw_rectangle_lines(r.x, r.y, r.w, r.h, 1.0, color);
        }
    }
}

fn draw_panel(session: &Session, assets: &Assets) {
    let panel = &session.panel;
    if !panel.is_visible() {
        return;
    }
    let r = panel.rect();
    let ts = TILE_SIZE as f32;

    match &assets.menu {
        Some(menu) => {
            let cols = (r.w / ts) as usize;
            let rows = (r.h / ts) as usize;
            for row in 0..rows {
                for col in 0..cols {
                    draw_texture_ex(
                        menu,
                        r.x + col as f32 * ts,
                        r.y + row as f32 * ts,
                        WHITE,
                        DrawTextureParams {
                            source: Some(atlas::panel_source(col, row, cols, rows)),
                            ..Default::default()
                        },
                    );
                }
            }
        }
        None => draw_rectangle(r.x, r.y, r.w, r.h, PANEL_FILL),
    }

    for (tool, slot) in panel.palette_slots() {
        let hovered = slot.contains(session.mouse);
        let icon = fit_square(slot);
        match tool.tile_code() {
            Some(code) if !code.is_empty() => draw_tile(code, icon, assets),
            _ => draw_tool_glyph(tool, icon),
        }
        if !hovered && tool != session.tool {
            draw_rectangle(icon.x, icon.y, icon.w, icon.h, Color::new(0.0, 0.0, 0.0, 0.5));
        }
        if tool == session.tool {
            draw_rectangle_lines(icon.x, icon.y, icon.w, icon.h, 2.0, YELLOW);
        }
    }
}

fn draw_tool_glyph(tool: Tool, r: Rect) {
    match tool {
        Tool::Spawn => draw_rectangle(
            r.x + r.w / 6.0,
            r.y,
            r.w * 2.0 / 3.0,
            r.h,
            ENTITY_COLOR,
        ),
        _ => {
            draw_line(r.x, r.y, r.right(), r.bottom(), 3.0, RED);
            draw_line(r.right(), r.y, r.x, r.bottom(), 3.0, RED);
        }
    }
}

/// Largest square centred in `r`.
fn fit_square(r: Rect) -> Rect {
    let side = r.w.min(r.h);
    Rect::new(r.x + (r.w - side) / 2.0, r.y + (r.h - side) / 2.0, side, side)
}

fn draw_hud(session: &Session) {
    let line = match session.mode {
        Mode::Edit => format!(
            "EDIT  tool: {}  spawns: {}",
            session.tool.name(),
            session.entities.len()
        ),
        Mode::Play => "PLAY".to_owned(),
    };
    draw_text(&line, 10.0, 20.0, 20.0, WHITE);

    let s = session.stats;
    draw_text(
        &format!("score {}  coins {}  bricks {}", s.score, s.coins, s.bricks),
        10.0,
        40.0,
        20.0,
        WHITE,
    );
    if let Some(path) = &session.level_path {
        draw_text(&path.display().to_string(), 10.0, 60.0, 16.0, LIGHTGRAY);
    }
}
