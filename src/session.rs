use crate::config::Settings;
use crate::editor::{EditorCamera, Panel, Tool};
use crate::entity::{Entity, EntityList, MoveState};
use crate::error::LevelError;
use crate::grid::TileGrid;
use crate::input::FrameInput;
use crate::level::codec::{load_level, save_level, Level};
use crate::level::library::{list_levels, new_level_path, next_level};
use crate::physics::{self, GameEvent, Stats};
use macroquad::logging::{error, info, warn};
use macroquad::math::Vec2;
use std::path::{Path, PathBuf};

/// Whether the session is editing or playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Tools apply to the grid.
    #[default]
    Edit,
    /// Walkers move; edits are undone when play ends.
    Play,
}

/// All mutable game state. Owned by the shell and handed to the plug each
/// frame.
#[derive(Debug, Clone)]
pub struct Session {
    /// Level tiles.
    pub grid: TileGrid,
    /// Spawn points while editing, live walkers while playing.
    pub entities: EntityList,
    /// Current mode.
    pub mode: Mode,
    /// Selected editor tool.
    pub tool: Tool,
    /// View transform.
    pub camera: EditorCamera,
    /// Tool palette.
    pub panel: Panel,
    /// Counters from the current or last play.
    pub stats: Stats,
    /// Tile under the cursor in edit mode.
    pub hovered: Option<(usize, usize)>,
    /// Cursor position from the last handled frame, in screen space.
    pub mouse: Vec2,
    /// Draw cell outlines while editing.
    pub show_grid: bool,
    /// File the level is saved to; `None` until one is chosen.
    pub level_path: Option<PathBuf>,
    levels_dir: PathBuf,
    indent: usize,
    panel_speed: f32,
    /// Editor state to restore when play ends.
    snapshot: Option<Level>,
}

impl Session {
    /// Empty level in edit mode.
    pub fn new(settings: &Settings) -> Self {
        Session {
            grid: TileGrid::new(),
            entities: EntityList::new(),
            mode: Mode::Edit,
            tool: Tool::default(),
            camera: EditorCamera::default(),
            panel: Panel::default(),
            stats: Stats::default(),
            hovered: None,
            mouse: Vec2::ZERO,
            show_grid: settings.show_grid,
            level_path: None,
            levels_dir: settings.levels_dir.clone(),
            indent: settings.indent,
            panel_speed: settings.panel_speed,
            snapshot: None,
        }
    }

    /// Directory level files are listed from and saved to.
    pub fn levels_dir(&self) -> &Path {
        &self.levels_dir
    }

    /// Apply the current tool at tile `(x, y)`. Ignored outside edit mode.
    pub fn apply_tool(&mut self, x: usize, y: usize) {
        if self.mode != Mode::Edit {
            return;
        }
        match self.tool {
            Tool::Spawn => self.entities.push(Entity::at_tile(x, y)),
            Tool::Eraser => {
                self.grid.erase(x, y);
                self.entities.remove_at_tile(x, y);
            }
            tool => {
                if let Some(code) = tool.tile_code() {
                    self.grid.place(x, y, code);
                }
            }
        }
    }

    /// Empty the grid and the spawn list.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.entities.clear();
    }

    /// Snapshot the editor state and let the entities walk. Returns `false`
    /// when there is nobody to play with.
    pub fn start_play(&mut self) -> bool {
        if self.mode == Mode::Play {
            return true;
        }
        if self.entities.is_empty() {
            warn!("no spawn points placed; staying in the editor");
            return false;
        }

        self.snapshot = Some(Level {
            grid: self.grid.clone(),
            entities: self.entities.clone(),
        });
        for e in self.entities.iter_mut() {
            if e.state == MoveState::Idle {
                e.state = MoveState::Right;
            }
        }
        self.stats = Stats::default();
        self.mode = Mode::Play;
        info!("play started with {} entities", self.entities.len());
        true
    }

    /// Back to the editor with the grid and spawns as they were when play
    /// started. Stats are kept.
    pub fn stop_play(&mut self) {
        if let Some(level) = self.snapshot.take() {
            self.grid = level.grid;
            self.entities = level.entities;
        }
        self.mode = Mode::Edit;
        info!(
            "play ended: score {}, coins {}, bricks {}",
            self.stats.score, self.stats.coins, self.stats.bricks
        );
    }

    /// Advance one frame of play. Ends play once every entity is gone.
    pub fn update_play(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.mode != Mode::Play {
            return Vec::new();
        }
        let events = physics::step(&mut self.grid, &mut self.entities, dt, &mut self.stats);
        if self.entities.is_empty() {
            self.stop_play();
        }
        events
    }

    /// Route one frame of input.
    pub fn handle_input(&mut self, input: &FrameInput) -> Vec<GameEvent> {
        self.mouse = input.mouse;
        self.panel.update(input.dt, self.panel_speed);

        if input.toggle_play {
            match self.mode {
                Mode::Edit => {
                    self.start_play();
                }
                Mode::Play => self.stop_play(),
            }
        }
        if self.mode == Mode::Play {
            return self.update_play(input.dt);
        }

        if input.toggle_panel {
            self.panel.toggle();
        }
        if input.cycle_tool {
            self.tool = self.tool.next();
            info!("tool: {}", self.tool.name());
        }
        if input.clear {
            self.clear();
        }
        if input.save {
            if let Err(e) = self.save() {
                error!("{}", e);
            }
        }
        if input.next_level {
            self.load_next();
        }
        if input.new_level {
            self.new_level();
        }

        let over_panel = self.panel.contains(input.mouse);
        if !over_panel {
            self.camera.zoom_at(input.mouse, input.wheel);
        }
        self.hovered = if over_panel {
            None
        } else {
            self.camera.screen_to_tile(input.mouse)
        };

        if over_panel {
            if input.left_pressed {
                if let Some(tool) = self.panel.tool_at(input.mouse) {
                    self.tool = tool;
                }
            }
        } else if let Some((x, y)) = self.hovered {
            // Spawns are placed once per click; tiles can be painted.
            let fire = match self.tool {
                Tool::Spawn => input.left_pressed,
                _ => input.left_down,
            };
            if fire {
                self.apply_tool(x, y);
            }
        }
        Vec::new()
    }

    /// Load `path`. On failure the session starts from an empty level. A
    /// file that exists but is broken is never the save target, so the next
    /// save picks a fresh name instead of overwriting it.
    pub fn load(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if self.mode == Mode::Play {
            self.stop_play();
        }
        match load_level(path) {
            Ok(level) => {
                info!(
                    "loaded {} with {} spawn points",
                    path.display(),
                    level.entities.len()
                );
                self.grid = level.grid;
                self.entities = level.entities;
                self.level_path = Some(path.to_path_buf());
            }
            Err(e) => {
                warn!("{}; starting from an empty level", e);
                self.clear();
                self.level_path = (!path.exists()).then(|| path.to_path_buf());
            }
        }
    }

    /// Write the current level. Without a path yet a new file name is picked
    /// in the levels directory.
    pub fn save(&mut self) -> Result<PathBuf, LevelError> {
        let path = match &self.level_path {
            Some(p) => p.clone(),
            None => {
                list_levels(&self.levels_dir)?;
                new_level_path(&self.levels_dir)
            }
        };
        save_level(&path, &self.grid, &self.entities, self.indent)?;
        info!("saved {}", path.display());
        self.level_path = Some(path.clone());
        Ok(path)
    }

    /// Open the level after the current one in the levels directory.
    pub fn load_next(&mut self) {
        let levels = match list_levels(&self.levels_dir) {
            Ok(levels) => levels,
            Err(e) => {
                error!("{}", e);
                return;
            }
        };
        match next_level(&levels, self.level_path.as_deref()) {
            Some(path) => {
                let path = path.clone();
                self.load(path);
            }
            None => info!("no levels in {}", self.levels_dir.display()),
        }
    }

    /// Start an empty level under a fresh file name. Nothing is written
    /// until the next save.
    pub fn new_level(&mut self) {
        if let Err(e) = list_levels(&self.levels_dir) {
            error!("{}", e);
            return;
        }
        let path = new_level_path(&self.levels_dir);
        self.clear();
        info!("new level {}", path.display());
        self.level_path = Some(path);
    }
}
