use anyhow::Context;
use macroquad::logging::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// User settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Title of the game window.
    pub window_title: String,
    /// Directory scanned for level files.
    pub levels_dir: PathBuf,
    /// Directory holding the texture atlases.
    pub assets_dir: PathBuf,
    /// Spaces per nesting level when writing level files.
    pub indent: usize,
    /// File name inside `levels_dir` opened on start-up.
    pub start_level: Option<String>,
    /// Panel slide speed in px/s.
    pub panel_speed: f32,
    /// Draw cell outlines while editing.
    pub show_grid: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            window_title: "Tile Platformer".into(),
            levels_dir: PathBuf::from("levels"),
            assets_dir: PathBuf::from("assets"),
            indent: 2,
            start_level: None,
            panel_speed: 500.0,
            show_grid: true,
        }
    }
}

impl Settings {
    /// Read settings from `path`; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("no {} found, using default settings", path.display());
            return Ok(Settings::default());
        }

        let txt = std::fs::read_to_string(path)
            .with_context(|| format!("Reading settings file {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&txt)
            .with_context(|| format!("Parsing settings file {}", path.display()))?;
        Ok(settings)
    }

    /// Full path of `start_level`, if one is set.
    pub fn start_level_path(&self) -> Option<PathBuf> {
        self.start_level.as_ref().map(|name| self.levels_dir.join(name))
    }
}
