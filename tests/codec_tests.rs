// tests/codec_tests.rs

use std::fs;
use tempfile::tempdir;
use tile_platformer::level::codec::{decode, encode};
use tile_platformer::tile::{BASE, BOTTOM, TOP};
use tile_platformer::{
    deserialize, load_level, save_level, serialize, Block, Entity, EntityList, LevelError,
    TileCode, TileGrid, GRID_H, GRID_W, TILE_SIZE,
};

fn sample_grid() -> TileGrid {
    let mut grid = TileGrid::new();
    for x in 0..8 {
        grid.place(x, 12, TileCode::GROUND);
    }
    grid.place(4, 11, TileCode::GROUND);
    grid.place(6, 11, Block::Coin.code());
    grid.place(7, 11, Block::Door.code());
    grid.place(0, 0, Block::Spike.code());
    grid
}

fn spawn_tiles(entities: &EntityList) -> Vec<(i32, i32)> {
    let mut tiles: Vec<_> = entities.iter().map(|e| e.tile()).collect();
    tiles.sort();
    tiles
}

#[test]
fn round_trip_preserves_tiles_and_spawns() {
    let grid = sample_grid();
    let entities: EntityList = [Entity::at_tile(1, 10), Entity::at_tile(20, 0)]
        .into_iter()
        .collect();

    for indent in [0, 2, 4] {
        let txt = serialize(&grid, &entities, indent);
        let level = deserialize(&txt).expect("round trip");
        assert_eq!(level.grid, grid);
        assert_eq!(spawn_tiles(&level.entities), vec![(1, 10), (20, 0)]);
    }
}

#[test]
fn unassigned_functional_codes_survive_round_trip() {
    let mut grid = TileGrid::new();
    grid.place(3, 3, TileCode(45));
    grid.place(3, 4, TileCode::GROUND);
    grid.place(4, 3, TileCode(255));

    let level = deserialize(&serialize(&grid, &EntityList::new(), 2)).expect("round trip");
    assert_eq!(level.grid, grid);
    assert_eq!(level.grid.get(3, 3), TileCode(45));
    assert_eq!(level.grid.get(3, 4), TileCode(BASE));
}

#[test]
fn saved_spawns_reload_at_pixel_positions() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("two.xml");

    let grid = TileGrid::new();
    let entities: EntityList = [Entity::at_tile(2, 2), Entity::at_tile(10, 5)]
        .into_iter()
        .collect();
    save_level(&path, &grid, &entities, 2).expect("save");

    let level = load_level(&path).expect("load");
    assert_eq!(level.entities.len(), 2);
    let ts = TILE_SIZE as f32;
    let mut positions: Vec<_> = level
        .entities
        .iter()
        .map(|e| (e.rect.x, e.rect.y))
        .collect();
    positions.sort_by(|a, b| a.0.total_cmp(&b.0));
    assert_eq!(positions, vec![(2.0 * ts, 2.0 * ts), (10.0 * ts, 5.0 * ts)]);
}

#[test]
fn encoded_document_uses_tile_coordinates() {
    let entities: EntityList = [Entity::at_tile(3, 4)].into_iter().collect();
    let doc = encode(&TileGrid::new(), &entities);
    let spawn = doc.root.find("spawn").expect("spawn node");
    assert_eq!(spawn.attribute("x"), Some("3"));
    assert_eq!(spawn.attribute("y"), Some("4"));

    let level = decode(&doc).expect("decode");
    assert_eq!(spawn_tiles(&level.entities), vec![(3, 4)]);
}

#[test]
fn off_grid_entities_are_not_saved() {
    let entities: EntityList = [Entity::new(-50.0, 10.0), Entity::at_tile(1, 1)]
        .into_iter()
        .collect();
    let level = deserialize(&serialize(&TileGrid::new(), &entities, 2)).expect("round trip");
    assert_eq!(spawn_tiles(&level.entities), vec![(1, 1)]);
}

#[test]
fn stale_connector_bits_are_repaired_on_load() {
    // (4, 11) claims every connector but only has ground below it.
    let mut rows = vec![vec!["0"; GRID_W]; GRID_H];
    rows[11][4] = "31";
    rows[12][4] = "1";
    let blob: Vec<String> = rows.iter().map(|r| r.join(",")).collect();
    let src = format!("<level><tilemap>{}</tilemap></level>", blob.join("\n"));

    let level = deserialize(&src).expect("load");
    assert_eq!(level.grid.get(4, 11), TileCode(BASE | BOTTOM));
    assert_eq!(level.grid.get(4, 12), TileCode(BASE | TOP));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("absent.xml");
    match load_level(&path) {
        Err(LevelError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn malformed_file_reports_path() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("broken.xml");
    fs::write(&path, "<level><tilemap>0</level>").expect("write");

    let err = load_level(&path).unwrap_err();
    assert!(matches!(err, LevelError::Xml { .. }));
    assert!(err.to_string().contains("broken.xml"));
}

#[test]
fn short_tile_blob_in_file_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("short.xml");
    fs::write(&path, "<level><tilemap>1,1,1</tilemap></level>").expect("write");
    assert!(matches!(
        load_level(&path),
        Err(LevelError::TileCount { found: 3, .. })
    ));
}
