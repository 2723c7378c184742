// tests/session_tests.rs

use std::fs;
use std::path::Path;
use macroquad::prelude::vec2;
use tempfile::tempdir;
use tile_platformer::editor::Tool;
use tile_platformer::input::FrameInput;
use tile_platformer::{Block, Mode, Session, Settings, TileCode, GRID_W, TILE_SIZE};

const FLOOR: usize = 10;

fn session_in(dir: &Path) -> Session {
    let settings = Settings {
        levels_dir: dir.join("levels"),
        ..Default::default()
    };
    Session::new(&settings)
}

fn click_at(x: usize, y: usize) -> FrameInput {
    let ts = TILE_SIZE as f32;
    FrameInput {
        mouse: vec2(x as f32 * ts + ts / 2.0, y as f32 * ts + ts / 2.0),
        left_down: true,
        left_pressed: true,
        ..Default::default()
    }
}

fn build_course(session: &mut Session) {
    session.tool = Tool::Ground;
    for x in 0..GRID_W {
        session.apply_tool(x, FLOOR);
    }
    session.tool = Tool::Block(Block::Door);
    session.apply_tool(3, FLOOR - 1);
    session.tool = Tool::Spawn;
    session.apply_tool(1, FLOOR - 1);
}

#[test]
fn clicks_apply_the_selected_tool() {
    let dir = tempdir().expect("tempdir");
    let mut s = session_in(dir.path());

    s.handle_input(&click_at(2, 2));
    assert!(s.grid.get(2, 2).is_ground());
    assert_eq!(s.hovered, Some((2, 2)));

    s.tool = Tool::Spawn;
    s.handle_input(&click_at(4, 4));
    assert_eq!(s.entities.len(), 1);

    s.tool = Tool::Eraser;
    s.handle_input(&click_at(4, 4));
    s.handle_input(&click_at(2, 2));
    assert!(s.entities.is_empty());
    assert!(s.grid.is_empty());
}

#[test]
fn clicking_the_panel_selects_a_tool_without_painting() {
    let dir = tempdir().expect("tempdir");
    let mut s = session_in(dir.path());
    let (tool, slot) = s.panel.palette_slots()[7];

    let input = FrameInput {
        mouse: slot.center(),
        left_down: true,
        left_pressed: true,
        ..Default::default()
    };
    s.handle_input(&input);
    assert_eq!(s.tool, tool);
    assert!(s.grid.is_empty());
    assert_eq!(s.hovered, None);
    assert_eq!(s.mouse, slot.center());
}

#[test]
fn clear_key_wipes_grid_and_spawns() {
    let dir = tempdir().expect("tempdir");
    let mut s = session_in(dir.path());
    build_course(&mut s);
    s.handle_input(&FrameInput {
        clear: true,
        ..Default::default()
    });
    assert!(s.grid.is_empty());
    assert!(s.entities.is_empty());
}

#[test]
fn play_runs_until_everyone_exits_then_restores_editor_state() {
    let dir = tempdir().expect("tempdir");
    let mut s = session_in(dir.path());
    build_course(&mut s);
    let grid_before = s.grid.clone();
    let spawns_before = s.entities.clone();

    assert!(s.start_play());
    assert_eq!(s.mode, Mode::Play);

    for _ in 0..180 {
        s.update_play(1.0 / 60.0);
        if s.mode == Mode::Edit {
            break;
        }
    }

    assert_eq!(s.mode, Mode::Edit);
    assert_eq!(s.stats.score, 1);
    assert_eq!(s.grid, grid_before);
    assert_eq!(s.entities, spawns_before);
}

#[test]
fn play_without_spawns_stays_in_editor() {
    let dir = tempdir().expect("tempdir");
    let mut s = session_in(dir.path());
    s.handle_input(&FrameInput {
        toggle_play: true,
        ..Default::default()
    });
    assert_eq!(s.mode, Mode::Edit);
}

#[test]
fn coins_are_restored_after_play() {
    let dir = tempdir().expect("tempdir");
    let mut s = session_in(dir.path());
    build_course(&mut s);
    s.tool = Tool::Block(Block::Coin);
    s.apply_tool(2, FLOOR - 1);

    s.start_play();
    for _ in 0..180 {
        s.update_play(1.0 / 60.0);
    }
    assert_eq!(s.mode, Mode::Edit);
    assert_eq!(s.stats.coins, 1);
    assert_eq!(s.grid.get(2, FLOOR - 1), Block::Coin.code());
}

#[test]
fn save_then_load_next_round_trips() {
    let dir = tempdir().expect("tempdir");
    let mut s = session_in(dir.path());
    build_course(&mut s);

    let path = s.save().expect("save");
    assert!(path.starts_with(dir.path().join("levels")));
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("xml"));

    let saved_grid = s.grid.clone();
    s.clear();
    s.level_path = None;
    s.load_next();

    assert_eq!(s.level_path.as_deref(), Some(path.as_path()));
    assert_eq!(s.grid, saved_grid);
    assert_eq!(s.entities.len(), 1);
}

#[test]
fn broken_level_falls_back_to_empty() {
    let dir = tempdir().expect("tempdir");
    let mut s = session_in(dir.path());
    build_course(&mut s);

    let bad = dir.path().join("bad.xml");
    fs::write(&bad, "<level><tilemap>1,2</tilemap>").expect("write");
    s.load(&bad);

    assert!(s.grid.is_empty());
    assert!(s.entities.is_empty());
    assert_eq!(s.level_path, None);

    s.tool = Tool::Ground;
    s.apply_tool(0, 0);
    let saved = s.save().expect("save");
    assert_ne!(saved, bad);
    assert_eq!(
        fs::read_to_string(&bad).expect("read"),
        "<level><tilemap>1,2</tilemap>"
    );
}

#[test]
fn missing_level_keeps_its_path_for_saving() {
    let dir = tempdir().expect("tempdir");
    let mut s = session_in(dir.path());
    let fresh = dir.path().join("intro.xml");

    s.load(&fresh);
    assert!(s.grid.is_empty());
    assert_eq!(s.level_path.as_deref(), Some(fresh.as_path()));
    assert_eq!(s.save().expect("save"), fresh);
    assert!(fresh.exists());
}

#[test]
fn new_level_picks_an_unused_name() {
    let dir = tempdir().expect("tempdir");
    let mut s = session_in(dir.path());
    build_course(&mut s);
    s.save().expect("save");
    let first = s.level_path.clone();

    s.handle_input(&FrameInput {
        new_level: true,
        ..Default::default()
    });
    assert!(s.grid.is_empty());
    assert_ne!(s.level_path, first);
    assert!(s.level_path.as_ref().is_some_and(|p| !p.exists()));
    assert_eq!(s.grid.get(0, 0), TileCode::EMPTY);
}
