#![warn(missing_docs)]

//! Tile platformer with an integrated level editor, built on Macroquad.
//!
//! Levels are a fixed grid of auto-connecting ground tiles plus functional
//! blocks, and a list of spawn points, stored as small XML-like documents.

/// Settings file.
pub mod config;
/// Editor tools, camera and tool panel.
pub mod editor;
/// Walkers and the spawn list.
pub mod entity;
/// Error types.
pub mod error;
/// Tile grid and auto-tiling.
pub mod grid;
/// Per-frame input snapshot.
pub mod input;
/// Level files.
pub mod level {
    /// Level document encoding and decoding.
    pub mod codec;
    /// Level files in a directory.
    pub mod library;
}
/// Walker movement and tile effects.
pub mod physics;
pub mod plug;
/// Drawing.
pub mod render {
    pub mod atlas;
    /// Frame drawing and texture loading.
    pub mod draw;
}
/// Game state shared by editing and play.
pub mod session;
pub mod tile;
/// Immediate-mode UI helpers.
pub mod ui {
    /// Rectangle slicing for the tool panel.
    pub mod layout;
}
pub mod xml;

pub use config::Settings;
pub use entity::{Entity, EntityList, MoveState};
pub use error::{LevelError, XmlError, XmlErrorKind};
pub use grid::{TileGrid, GRID_H, GRID_W, SCREEN_HEIGHT, SCREEN_WIDTH, TILE_SIZE};
pub use level::codec::{deserialize, load_level, save_level, serialize, Level};
pub use session::{Mode, Session};
pub use tile::{Block, TileCode};
pub use xml::{Document, Node};
