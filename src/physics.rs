use crate::entity::{overlaps, Entity, EntityList, MoveState};
use crate::grid::{TileGrid, SCREEN_HEIGHT, SCREEN_WIDTH, TILE_SIZE};
use crate::tile::Block;
use macroquad::logging::info;
use macroquad::prelude::*;

/// Downward acceleration in px/s².
pub const GRAVITY: f32 = 1920.0;
/// Horizontal speed of a walker in px/s.
pub const WALK_SPEED: f32 = 90.0;
/// Upward speed of an automatic step jump in px/s.
pub const JUMP_SPEED: f32 = 400.0;
/// Longer frames are split so a fall never skips a whole tile.
const MAX_DT: f32 = 1.0 / 60.0;
/// Longest frame simulated at all; stalls beyond it are dropped.
const MAX_FRAME: f32 = 0.25;

/// Counters shown in play mode; kept when play ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Walkers that reached a door.
    pub score: u32,
    /// Coins picked up.
    pub coins: u32,
    /// Bricks picked up; a big brick counts twice.
    pub bricks: u32,
}

/// Something that happened during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A walker entered a door and was removed.
    ReachedExit,
    /// A coin was picked up.
    CollectedCoin,
    /// Bricks were picked up.
    CollectedBricks(u32),
    /// A walker touched a spike and was removed.
    Killed,
    /// A walker left the screen and was removed.
    LeftWorld,
}

/// Advance every entity by `dt` seconds. Pickups are erased from `grid`;
/// entities that exit, die or leave the world are removed from the list.
pub fn step(
    grid: &mut TileGrid,
    entities: &mut EntityList,
    dt: f32,
    stats: &mut Stats,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let mut left = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME)
    } else {
        0.0
    };
    while left > 0.0 {
        let slice = left.min(MAX_DT);
        left -= slice;
        step_slice(grid, entities, slice, stats, &mut events);
    }
    events
}

fn step_slice(
    grid: &mut TileGrid,
    entities: &mut EntityList,
    dt: f32,
    stats: &mut Stats,
    events: &mut Vec<GameEvent>,
) {
    let mut i = 0;
    while i < entities.len() {
        let Some(entity) = entities.get_mut(i) else {
            break;
        };
        advance(grid, entity, dt);

        match interact(grid, entity, stats) {
            Some(event) => {
                events.push(event);
                if !matches!(event, GameEvent::CollectedCoin | GameEvent::CollectedBricks(_)) {
                    entities.remove(i);
                    continue;
                }
            }
            None if out_of_world(&entity.rect) => {
                info!("entity left the world at {:?}", entity.position());
                events.push(GameEvent::LeftWorld);
                entities.remove(i);
                continue;
            }
            None => {}
        }
        i += 1;
    }

    turn_apart(entities);
}

fn advance(grid: &TileGrid, e: &mut Entity, dt: f32) {
    e.velocity.x = e.state.sign() * WALK_SPEED;
    e.velocity.y += GRAVITY * dt;

    if e.on_ground && e.state != MoveState::Idle {
        let ahead_x = if e.state == MoveState::Right {
            e.rect.right() + 1.0
        } else {
            e.rect.left() - 1.0
        };
        let feet_y = e.rect.bottom() - 1.0;
        let (tx, ty) = (tile_of(ahead_x), tile_of(feet_y));
        if solid(grid, tx, ty) {
            if solid(grid, tx, ty - 1) || solid(grid, tile_of(e.rect.left()), ty - 1) {
                e.state = e.state.reversed();
                e.velocity.x = -e.velocity.x;
            } else {
                e.velocity.y = -JUMP_SPEED;
            }
        }
    }

    e.rect.x += e.velocity.x * dt;
    e.rect.y += e.velocity.y * dt;
    e.on_ground = false;
    resolve_solids(grid, e);
}

/// Push the entity out of every solid tile it overlaps, along whichever axis
/// needs the smaller correction. Tiles with the largest overlap go first so
/// seams between floor tiles never stop a walker.
fn resolve_solids(grid: &TileGrid, e: &mut Entity) {
    let mut hits: Vec<(f32, Rect)> = tiles_under(&e.rect)
        .into_iter()
        .filter(|&(tx, ty)| solid(grid, tx, ty))
        .filter_map(|(tx, ty)| {
            let tile = tile_rect(tx, ty);
            let area = e.rect.intersect(tile)?;
            Some((area.w * area.h, tile))
        })
        .collect();
    hits.sort_by(|a, b| b.0.total_cmp(&a.0));

    for (_, tile) in hits {
        if !overlaps(&e.rect, &tile) {
            continue;
        }

        let push_left = e.rect.right() - tile.left();
        let push_right = tile.right() - e.rect.left();
        let push_up = e.rect.bottom() - tile.top();
        let push_down = tile.bottom() - e.rect.top();
        let dx = push_left.min(push_right);
        let dy = push_up.min(push_down);

        if dx < dy {
            e.rect.x += if push_left < push_right { -push_left } else { push_right };
            e.velocity.x = 0.0;
        } else if push_up < push_down {
            e.rect.y -= push_up;
            e.velocity.y = 0.0;
            e.on_ground = true;
        } else {
            e.rect.y += push_down;
            e.velocity.y = e.velocity.y.max(0.0);
        }
    }
}

/// First tile effect that applies to the entity this frame.
fn interact(grid: &mut TileGrid, e: &Entity, stats: &mut Stats) -> Option<GameEvent> {
    for (tx, ty) in tiles_under(&e.rect) {
        let Some(block) = grid.try_get(tx, ty).and_then(|c| c.block()) else {
            continue;
        };
        if !overlaps(&e.rect, &tile_rect(tx, ty)) {
            continue;
        }
        let (x, y) = (tx as usize, ty as usize);
        match block {
            Block::Door => {
                stats.score += 1;
                info!("entity reached the door at ({}, {}), score {}", x, y, stats.score);
                return Some(GameEvent::ReachedExit);
            }
            Block::Spike => {
                info!("entity killed by spike at ({}, {})", x, y);
                return Some(GameEvent::Killed);
            }
            Block::Coin => {
                grid.erase(x, y);
                stats.coins += 1;
                info!("coin collected at ({}, {}), coins {}", x, y, stats.coins);
                return Some(GameEvent::CollectedCoin);
            }
            Block::SmallBrick | Block::BigBrick => {
                let n = if block == Block::BigBrick { 2 } else { 1 };
                grid.erase(x, y);
                stats.bricks += n;
                info!("{} collected at ({}, {}), bricks {}", block.name(), x, y, stats.bricks);
                return Some(GameEvent::CollectedBricks(n));
            }
            _ => {}
        }
    }
    None
}

/// Overlapping walkers turn away from each other.
fn turn_apart(entities: &mut EntityList) {
    let n = entities.len();
    for a in 0..n {
        for b in (a + 1)..n {
            let (ra, rb) = (entities.as_slice()[a].rect, entities.as_slice()[b].rect);
            if !overlaps(&ra, &rb) {
                continue;
            }
            let (first, second) = if ra.x <= rb.x { (a, b) } else { (b, a) };
            if let Some(e) = entities.get_mut(first) {
                e.state = MoveState::Left;
            }
            if let Some(e) = entities.get_mut(second) {
                e.state = MoveState::Right;
            }
        }
    }
}

fn out_of_world(r: &Rect) -> bool {
    r.x < 0.0 || r.x > SCREEN_WIDTH as f32 || r.y > SCREEN_HEIGHT as f32
}

fn solid(grid: &TileGrid, tx: i32, ty: i32) -> bool {
    grid.try_get(tx, ty).is_some_and(|c| c.is_solid())
}

#[inline]
fn tile_of(px: f32) -> i32 {
    (px / TILE_SIZE as f32).floor() as i32
}

fn tile_rect(tx: i32, ty: i32) -> Rect {
    let ts = TILE_SIZE as f32;
    Rect::new(tx as f32 * ts, ty as f32 * ts, ts, ts)
}

/// Tile coordinates touched by `r`, possibly outside the grid.
fn tiles_under(r: &Rect) -> Vec<(i32, i32)> {
    let (x0, x1) = (tile_of(r.left()), tile_of(r.right()));
    let (y0, y1) = (tile_of(r.top()), tile_of(r.bottom()));
    (y0..=y1)
        .flat_map(|ty| (x0..=x1).map(move |tx| (tx, ty)))
        .collect()
}
