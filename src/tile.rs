//! Tile codes and their classification.
//!
//! A tile code is a small integer split into three ranges:
//! `0` is empty, `1..=31` is a ground tile whose low five bits are a
//! connector bitmask, and `32..` is a functional block with a fixed meaning.

/// Base bit carried by every non-empty ground tile.
pub const BASE: u8 = 1 << 0;
/// Ground connects to the cell on its left.
pub const LEFT: u8 = 1 << 1;
/// Ground connects to the cell above.
pub const TOP: u8 = 1 << 2;
/// Ground connects to the cell on its right.
pub const RIGHT: u8 = 1 << 3;
/// Ground connects to the cell below.
pub const BOTTOM: u8 = 1 << 4;

/// First code of the functional range.
pub const FUNCTIONAL_MIN: u8 = 1 << 5;

/// A single cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileCode(pub u8);

impl TileCode {
    /// No tile.
    pub const EMPTY: TileCode = TileCode(0);
    /// Ground with no connectors.
    pub const GROUND: TileCode = TileCode(BASE);

    /// Stored integer value.
    #[inline]
    pub fn raw(self) -> u8 {
        self.0
    }

    /// Code `0`.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Empty or ground: everything below the functional threshold.
    #[inline]
    pub fn is_ground_range(self) -> bool {
        self.0 < FUNCTIONAL_MIN
    }

    /// Non-empty ground tile.
    #[inline]
    pub fn is_ground(self) -> bool {
        !self.is_empty() && self.is_ground_range()
    }

    /// `32` and above.
    #[inline]
    pub fn is_functional(self) -> bool {
        self.0 >= FUNCTIONAL_MIN
    }

    /// Any of `bit` set.
    #[inline]
    pub fn has(self, bit: u8) -> bool {
        self.0 & bit != 0
    }

    /// Copy with `bit` set.
    #[inline]
    pub fn with(self, bit: u8) -> Self {
        TileCode(self.0 | bit)
    }

    /// Copy with `bit` cleared.
    #[inline]
    pub fn without(self, bit: u8) -> Self {
        TileCode(self.0 & !bit)
    }

    /// Connector bits only (base bit stripped). Zero for non-ground codes.
    pub fn connectors(self) -> u8 {
        if self.is_ground() {
            self.0 & (LEFT | TOP | RIGHT | BOTTOM)
        } else {
            0
        }
    }

    /// Known block for this code; `None` for ground and unassigned ids.
    pub fn block(self) -> Option<Block> {
        Block::from_code(self)
    }

    /// Blocks entities cannot walk through.
    pub fn is_solid(self) -> bool {
        self.is_ground() || self.block() == Some(Block::Brick)
    }
}

impl From<Block> for TileCode {
    fn from(block: Block) -> Self {
        block.code()
    }
}

/// Functional blocks. Each maps to exactly one code in the functional range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    /// Collected on touch.
    Coin,
    /// Decoration.
    Key,
    /// Decoration.
    Lever,
    /// Collected on touch, counts one.
    SmallBrick,
    /// Collected on touch, counts two.
    BigBrick,
    /// Solid wall.
    Brick,
    /// Exit; scores and removes the walker.
    Door,
    /// Kills the walker.
    Spike,
    /// Decoration.
    Box,
}

impl Block {
    /// Every block in code order.
    pub const ALL: [Block; 9] = [
        Block::Coin,
        Block::Key,
        Block::Lever,
        Block::SmallBrick,
        Block::BigBrick,
        Block::Brick,
        Block::Door,
        Block::Spike,
        Block::Box,
    ];

    /// Tile code of this block.
    pub fn code(self) -> TileCode {
        let offset = match self {
            Block::Coin => 0,
            Block::Key => 1,
            Block::Lever => 2,
            Block::SmallBrick => 3,
            Block::BigBrick => 4,
            Block::Brick => 5,
            Block::Door => 6,
            Block::Spike => 7,
            Block::Box => 8,
        };
        TileCode(FUNCTIONAL_MIN + offset)
    }

    /// Block stored under `code`, if one is assigned.
    pub fn from_code(code: TileCode) -> Option<Self> {
        if !code.is_functional() {
            return None;
        }
        Block::ALL
            .get((code.0 - FUNCTIONAL_MIN) as usize)
            .copied()
    }

    /// Lower-case label.
    pub fn name(self) -> &'static str {
        match self {
            Block::Coin => "coin",
            Block::Key => "key",
            Block::Lever => "lever",
            Block::SmallBrick => "small brick",
            Block::BigBrick => "big brick",
            Block::Brick => "brick",
            Block::Door => "door",
            Block::Spike => "spike",
            Block::Box => "box",
        }
    }
}

/// The four orthogonal neighbours of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Negative x.
    Left,
    /// Negative y.
    Top,
    /// Positive x.
    Right,
    /// Positive y.
    Bottom,
}

impl Direction {
    /// All four, in connector-bit order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
    ];

    /// Connector bit for this side of a cell.
    pub fn bit(self) -> u8 {
        match self {
            Direction::Left => LEFT,
            Direction::Top => TOP,
            Direction::Right => RIGHT,
            Direction::Bottom => BOTTOM,
        }
    }

    /// Direction pointing back.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
        }
    }

    /// Grid offset `(dx, dy)`; y grows downwards.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Top => (0, -1),
            Direction::Right => (1, 0),
            Direction::Bottom => (0, 1),
        }
    }
}
