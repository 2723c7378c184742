use crate::tile::{Direction, TileCode, BASE};

/// Window width in pixels.
pub const SCREEN_WIDTH: u32 = 792;
/// Window height in pixels.
pub const SCREEN_HEIGHT: u32 = 468;
/// Side of one cell in pixels.
pub const TILE_SIZE: u32 = 36;

/// Cells per row.
pub const GRID_W: usize = (SCREEN_WIDTH / TILE_SIZE) as usize;
/// Rows.
pub const GRID_H: usize = (SCREEN_HEIGHT / TILE_SIZE) as usize;

/// Fixed-size level grid. Connector bits on ground tiles are kept in sync
/// with their neighbours by [`TileGrid::place`], the only write path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    cells: [[TileCode; GRID_W]; GRID_H],
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl TileGrid {
    /// All cells empty.
    pub fn new() -> Self {
        TileGrid {
            cells: [[TileCode::EMPTY; GRID_W]; GRID_H],
        }
    }

    /// Build a grid from stored rows, then settle every connector bit so
    /// hand-edited files cannot break the neighbour invariant.
    pub(crate) fn from_cells(cells: [[TileCode; GRID_W]; GRID_H]) -> Self {
        let mut grid = TileGrid { cells };
        grid.settle();
        grid
    }

    /// Recompute the connector bits of every ground tile from its neighbours.
    pub fn settle(&mut self) {
        for y in 0..GRID_H {
            for x in 0..GRID_W {
                if !self.cells[y][x].is_ground() {
                    continue;
                }
                let mut code = TileCode(BASE);
                for dir in Direction::ALL {
                    if let Some((nx, ny)) = neighbour(x, y, dir) {
                        if self.cells[ny][nx].is_ground() {
                            code = code.with(dir.bit());
                        }
                    }
                }
                self.cells[y][x] = code;
            }
        }
    }

    /// Cells per row.
    #[inline]
    pub fn width(&self) -> usize {
        GRID_W
    }

    /// Rows.
    #[inline]
    pub fn height(&self) -> usize {
        GRID_H
    }

    /// Code at `(x, y)`.
    ///
    /// Panics when `(x, y)` is outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> TileCode {
        assert!(
            x < GRID_W && y < GRID_H,
            "tile ({x}, {y}) outside {GRID_W}x{GRID_H} grid"
        );
        self.cells[y][x]
    }

    /// Signed lookup for callers that look around a position; `None`
    /// outside the grid.
    pub fn try_get(&self, x: i32, y: i32) -> Option<TileCode> {
        if x < 0 || y < 0 || x as usize >= GRID_W || y as usize >= GRID_H {
            return None;
        }
        Some(self.cells[y as usize][x as usize])
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[TileCode; GRID_W]> {
        self.cells.iter()
    }

    /// Every cell as `(x, y, code)`, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, TileCode)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter().enumerate().map(move |(x, code)| (x, y, *code))
        })
    }

    /// No cell holds a tile.
    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, _, code)| code.is_empty())
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells = [[TileCode::EMPTY; GRID_W]; GRID_H];
    }

    /// Empty `(x, y)` and drop the neighbours' connectors to it.
    pub fn erase(&mut self, x: usize, y: usize) {
        self.place(x, y, TileCode::EMPTY);
    }

    /// Write `code` at `(x, y)` and settle the connector bits of the cell and
    /// its orthogonal neighbours.
    ///
    /// Panics when `(x, y)` is outside the grid.
    pub fn place(&mut self, x: usize, y: usize, code: TileCode) {
        assert!(
            x < GRID_W && y < GRID_H,
            "tile ({x}, {y}) outside {GRID_W}x{GRID_H} grid"
        );

        let code = if code.is_ground() { TileCode(BASE) } else { code };
        self.cells[y][x] = code;

        for dir in Direction::ALL {
            let Some((nx, ny)) = neighbour(x, y, dir) else {
                continue;
            };
            let near = self.cells[ny][nx];
            let back = dir.opposite().bit();

            if code.is_ground_range() {
                if !near.is_ground() {
                    continue;
                }
                if code.is_empty() {
                    self.cells[ny][nx] = near.without(back);
                } else {
                    self.cells[y][x] = self.cells[y][x].with(dir.bit());
                    self.cells[ny][nx] = near.with(back);
                }
            } else if near.is_ground_range() {
                self.cells[ny][nx] = near.without(back);
            }
        }
    }
}

/// In-bounds neighbour of `(x, y)` in `dir`.
fn neighbour(x: usize, y: usize, dir: Direction) -> Option<(usize, usize)> {
    let (dx, dy) = dir.offset();
    let nx = x.checked_add_signed(dx as isize)?;
    let ny = y.checked_add_signed(dy as isize)?;
    (nx < GRID_W && ny < GRID_H).then_some((nx, ny))
}
