//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behaviour beyond conversions, making them
//! usable in any context (engine logic, front ends, snapshots).
//!
//! # Board Dimensions
//!
//! The standard board is a 5x5 square grid:
//!
//! - **Columns**: 5 (x indexed 0-4, left to right)
//! - **Rows**: 5 (y indexed 0-4, top to bottom)
//!
//! Boards of other sizes are supported up to [`MAX_BOARD_DIM`] in each axis.
//!
//! # Round Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_ROUND_DELAY_MS` | 12000 | Round length at level 0 |
//! | `ROUND_DELAY_STEP_MS` | 500 | Reduction per level |
//! | `MIN_ROUND_DELAY_MS` | 2500 | Floor reached at level 19 |
//!
//! # Examples
//!
//! ```
//! use tetrecs_types::{PieceKind, Rotation, GameAction, DEFAULT_COLS, DEFAULT_ROWS};
//!
//! let piece = PieceKind::Dot;
//! assert_eq!(piece.id(), 3);
//! assert_eq!(piece.value(), 4);
//! assert_eq!(PieceKind::from_str("dot"), Some(piece));
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::North.rotate_by(3), Rotation::West);
//!
//! assert_eq!(GameAction::from_str("swap"), Some(GameAction::Swap));
//!
//! assert_eq!(DEFAULT_COLS, 5);
//! assert_eq!(DEFAULT_ROWS, 5);
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells
pub const DEFAULT_COLS: u8 = 5;

/// Default board height in cells
pub const DEFAULT_ROWS: u8 = 5;

/// Largest supported board dimension (either axis)
pub const MAX_BOARD_DIM: u8 = 64;

/// Number of shapes in the piece catalog
pub const PIECE_COUNT: u8 = 15;

/// Side length of the square pattern every piece is defined on
pub const PIECE_GRID: usize = 3;

/// Starting lives in classic mode
pub const CLASSIC_LIVES: u32 = 3;

/// Starting lives in special mode
pub const SPECIAL_LIVES: u32 = 1;

/// Piece regenerations available in special mode
pub const SPECIAL_REGENERATIONS: u32 = 3;

/// Round length at level 0
pub const BASE_ROUND_DELAY_MS: u32 = 12_000;

/// Round length reduction per level
pub const ROUND_DELAY_STEP_MS: u32 = 500;

/// Shortest possible round
pub const MIN_ROUND_DELAY_MS: u32 = 2_500;

/// Score needed per level
pub const POINTS_PER_LEVEL: u32 = 1_000;

/// Points per cleared block, before line count and multiplier
pub const BLOCK_POINTS: u32 = 10;

/// Multiplier value that awards a bonus life in special mode
pub const BONUS_LIFE_MULTIPLIER: u32 = 4;


/// The fifteen piece shapes
///
/// Each kind has a fixed id (0-14) used by the random source and a placed
/// value (id + 1) written into board cells. The value only selects a colour
/// for front ends; it carries no gameplay meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    Line,
    C,
    Plus,
    Dot,
    Square,
    L,
    J,
    S,
    Z,
    T,
    X,
    Corner,
    InverseCorner,
    Diagonal,
    Double,
}

impl PieceKind {
    /// All kinds in id order
    pub const ALL: [PieceKind; PIECE_COUNT as usize] = [
        PieceKind::Line,
        PieceKind::C,
        PieceKind::Plus,
        PieceKind::Dot,
        PieceKind::Square,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
        PieceKind::X,
        PieceKind::Corner,
        PieceKind::InverseCorner,
        PieceKind::Diagonal,
        PieceKind::Double,
    ];

    /// Catalog id (0-14)
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Look up a kind by catalog id
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Value written into board cells when this piece is placed (1-15)
    pub fn value(&self) -> u8 {
        self.id() + 1
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrecs_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("plus"), Some(PieceKind::Plus));
    /// assert_eq!(PieceKind::from_str("Inverse_Corner"), Some(PieceKind::InverseCorner));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "line" => Some(PieceKind::Line),
            "c" => Some(PieceKind::C),
            "plus" => Some(PieceKind::Plus),
            "dot" => Some(PieceKind::Dot),
            "square" => Some(PieceKind::Square),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "t" => Some(PieceKind::T),
            "x" => Some(PieceKind::X),
            "corner" => Some(PieceKind::Corner),
            "inverse_corner" => Some(PieceKind::InverseCorner),
            "diagonal" => Some(PieceKind::Diagonal),
            "double" => Some(PieceKind::Double),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Line => "line",
            PieceKind::C => "c",
            PieceKind::Plus => "plus",
            PieceKind::Dot => "dot",
            PieceKind::Square => "square",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::T => "t",
            PieceKind::X => "x",
            PieceKind::Corner => "corner",
            PieceKind::InverseCorner => "inverse_corner",
            PieceKind::Diagonal => "diagonal",
            PieceKind::Double => "double",
        }
    }
}

/// Piece orientation in quarter turns
///
/// - **North**: catalog orientation (0°)
/// - **East**: rotated 90° clockwise
/// - **South**: rotated 180°
/// - **West**: rotated 90° counter-clockwise (270° clockwise)
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrecs_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Number of clockwise quarter turns from North (0-3)
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Orientation after `index` clockwise quarter turns from North (mod 4)
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Advance by `steps` clockwise quarter turns; negative steps turn
    /// counter-clockwise.
    pub fn rotate_by(&self, steps: i32) -> Self {
        let turns = (self.index() as i32 + steps.rem_euclid(4)).rem_euclid(4);
        Self::from_index(turns as u8)
    }

    /// Parse rotation from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "north" | "n", "east" | "e", "south" | "s", "west" | "w"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" | "n" => Some(Rotation::North),
            "east" | "e" => Some(Rotation::East),
            "south" | "s" => Some(Rotation::South),
            "west" | "w" => Some(Rotation::West),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Game variant
///
/// - **Classic**: 3 lives, no regenerations
/// - **Special**: 1 life, 3 regenerations, and a bonus life whenever the
///   multiplier climbs to exactly [`BONUS_LIFE_MULTIPLIER`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Classic,
    Special,
}

impl GameMode {
    /// Lives at game start
    pub fn starting_lives(&self) -> u32 {
        match self {
            GameMode::Classic => CLASSIC_LIVES,
            GameMode::Special => SPECIAL_LIVES,
        }
    }

    /// Regenerations at game start
    pub fn starting_regenerations(&self) -> u32 {
        match self {
            GameMode::Classic => 0,
            GameMode::Special => SPECIAL_REGENERATIONS,
        }
    }

    pub fn is_special(&self) -> bool {
        matches!(self, GameMode::Special)
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "special" => Some(GameMode::Special),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Special => "special",
        }
    }
}

/// Player actions that can be applied to the game
///
/// These are produced by front ends (keyboard, mouse, text commands) and
/// consumed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameAction {
    /// Rotate the current piece 90° clockwise
    RotateCw,
    /// Rotate the current piece 90° counter-clockwise
    RotateCcw,
    /// Exchange the current and upcoming pieces
    Swap,
    /// Discard the current piece (special mode, limited uses)
    Regenerate,
    /// Place the current piece with its centre on (x, y)
    Place { x: i8, y: i8 },
}

impl GameAction {
    /// Parse a single-word action (placement needs coordinates and is not
    /// parsed here)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrecs_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("regenerate"), Some(GameAction::Regenerate));
    /// assert_eq!(GameAction::from_str("place"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rotatecw" | "cw" => Some(GameAction::RotateCw),
            "rotateccw" | "ccw" => Some(GameAction::RotateCcw),
            "swap" => Some(GameAction::Swap),
            "regenerate" | "regen" => Some(GameAction::Regenerate),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Swap => "swap",
            GameAction::Regenerate => "regenerate",
            GameAction::Place { .. } => "place",
        }
    }
}

/// A board coordinate
///
/// Ordered row-major (by `y`, then `x`) so sets of coordinates iterate
/// top-to-bottom, left-to-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

/// A cell on the game board
///
/// - `0`: Empty cell
/// - `1..=15`: Cell filled by the piece whose value is stored
pub type Cell = u8;

/// Value of an empty cell
pub const EMPTY_CELL: Cell = 0;
