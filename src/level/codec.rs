// src/level/codec.rs
use crate::entity::{Entity, EntityList};
use crate::error::LevelError;
use crate::grid::{TileGrid, GRID_H, GRID_W, TILE_SIZE};
use crate::tile::{TileCode, BASE};
use crate::xml::{Document, Node};
use macroquad::logging::warn;
use std::path::Path;

/// Root element.
pub const LEVEL_TAG: &str = "level";
/// Element holding the tile data as text.
pub const TILES_TAG: &str = "tilemap";
/// One element per spawn point, with `x` and `y` in tiles.
pub const SPAWN_TAG: &str = "spawn";

/// Grid plus spawn points, as stored in one level file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Level {
    /// Tiles with settled connectors.
    pub grid: TileGrid,
    /// Walkers placed at their spawn tiles.
    pub entities: EntityList,
}

/// Build the document tree for a level.
///
/// Spawn nodes carry tile-space coordinates; entities whose top-left tile
/// lies outside the grid are skipped.
pub fn encode(grid: &TileGrid, entities: &EntityList) -> Document {
    let mut doc = Document::new(LEVEL_TAG);
    doc.root.set_attribute("width", GRID_W);
    doc.root.set_attribute("height", GRID_H);
    doc.root.set_attribute("tile_size", TILE_SIZE);

    doc.root.push(Node::new(TILES_TAG).with_text(tiles_to_text(grid)));

    for entity in entities {
        let (tx, ty) = entity.tile();
        if grid.try_get(tx, ty).is_none() {
            warn!("skipping spawn at tile ({}, {}): outside the grid", tx, ty);
            continue;
        }
        doc.root.push(
            Node::new(SPAWN_TAG)
                .with_attribute("x", tx)
                .with_attribute("y", ty),
        );
    }
    doc
}

/// Extract a level from a parsed document. Nothing is returned unless the
/// whole document is valid.
pub fn decode(doc: &Document) -> Result<Level, LevelError> {
    check_dimension(&doc.root, "width", GRID_W)?;
    check_dimension(&doc.root, "height", GRID_H)?;
    check_dimension(&doc.root, "tile_size", TILE_SIZE as usize)?;

    let tiles = doc
        .root
        .find(TILES_TAG)
        .ok_or(LevelError::MissingNode(TILES_TAG))?;
    let grid = tiles_from_text(tiles.text.as_deref().unwrap_or(""))?;

    let mut entities = EntityList::new();
    for node in doc.root.find_all(SPAWN_TAG) {
        let x = int_attribute(node, "x")?;
        let y = int_attribute(node, "y")?;
        if x < 0 || y < 0 || x >= GRID_W as i64 || y >= GRID_H as i64 {
            return Err(LevelError::SpawnOutOfBounds { x, y });
        }
        entities.push(Entity::at_tile(x as usize, y as usize));
    }

    Ok(Level { grid, entities })
}

/// Level document as text, nested with `indent` spaces.
pub fn serialize(grid: &TileGrid, entities: &EntityList, indent: usize) -> String {
    encode(grid, entities).to_string_indented(indent)
}

/// Parse and decode level text.
pub fn deserialize(src: &str) -> Result<Level, LevelError> {
    let doc = Document::parse(src)?;
    decode(&doc)
}

/// Read a level file. Document errors carry the path.
pub fn load_level(path: impl AsRef<Path>) -> Result<Level, LevelError> {
    let path = path.as_ref();
    let doc = Document::load(path)?;
    decode(&doc).map_err(|e| e.in_file(path.to_path_buf()))
}

/// Write a level file, replacing any existing one.
pub fn save_level(
    path: impl AsRef<Path>,
    grid: &TileGrid,
    entities: &EntityList,
    indent: usize,
) -> Result<(), LevelError> {
    encode(grid, entities).save(path, indent)
}

/// Row-major codes: `,` between cells, `\n` between rows, no trailing
/// separator.
fn tiles_to_text(grid: &TileGrid) -> String {
    grid.rows()
        .map(|row| {
            row.iter()
                .map(|code| code.raw().to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every maximal run of ASCII digits is one cell; anything else separates
/// cells. The run count must match the grid exactly so a corrupt file
/// cannot shift rows.
fn tiles_from_text(text: &str) -> Result<TileGrid, LevelError> {
    let runs: Vec<&str> = text
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .collect();

    let expected = GRID_W * GRID_H;
    if runs.len() != expected {
        return Err(LevelError::TileCount {
            expected,
            found: runs.len(),
        });
    }

    let mut cells = [[TileCode::EMPTY; GRID_W]; GRID_H];
    for (i, run) in runs.into_iter().enumerate() {
        cells[i / GRID_W][i % GRID_W] = parse_code(run)?;
    }
    Ok(TileGrid::from_cells(cells))
}

fn parse_code(run: &str) -> Result<TileCode, LevelError> {
    let invalid = || LevelError::InvalidTileCode(run.to_owned());
    let code = TileCode(run.parse::<u8>().map_err(|_| invalid())?);

    // Functional codes are opaque ids; unknown ones load and draw nothing.
    let valid = !code.is_ground() || code.has(BASE);
    if valid {
        Ok(code)
    } else {
        Err(invalid())
    }
}

fn int_attribute(node: &Node, key: &'static str) -> Result<i64, LevelError> {
    let raw = node.attribute(key).ok_or_else(|| LevelError::MissingAttribute {
        tag: node.tag.clone(),
        key,
    })?;
    raw.trim()
        .parse::<i64>()
        .map_err(|_| LevelError::InvalidAttribute {
            key: key.to_owned(),
            value: raw.to_owned(),
        })
}

/// Optional header attribute; when present it must match this build.
fn check_dimension(root: &Node, key: &'static str, expected: usize) -> Result<(), LevelError> {
    let Some(raw) = root.attribute(key) else {
        return Ok(());
    };
    let found = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| LevelError::InvalidAttribute {
            key: key.to_owned(),
            value: raw.to_owned(),
        })?;
    if found != expected {
        return Err(LevelError::DimensionMismatch {
            key,
            expected,
            found,
        });
    }
    Ok(())
}
