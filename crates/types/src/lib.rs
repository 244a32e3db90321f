//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no dependencies beyond `serde` derives, so they
//! can be used by the simulation core, the headless runner, or any external
//! presentation layer.
//!
//! # Board Dimensions
//!
//! - **Normal**: 10 columns x 20 rows
//! - **Small**: 10 columns x 10 rows
//! - Coordinates are `(column, row)` in grid units, row 0 at the top
//! - New pieces spawn on row 0, centered at column `width / 2 - 1`
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 15 | Fixed timestep interval |
//! | `DROP_PERIOD_MS` | 50 | Gravity period |
//! | `SOFT_DROP_PERIOD_MS` | 15 | Gravity period while soft drop is held |
//! | `LOCK_DELAY_MS` | 150 | Time a resting piece may still be moved |
//!
//! # Score Weights
//!
//! | Metric | Weight |
//! |--------|--------|
//! | full rows | 3 |
//! | longest road | 1 |
//! | L-J communities | 4 |
//! | T community | 6 |
//!
//! # Examples
//!
//! ```
//! use citytetris_types::{Intent, PieceKind, Rotation, DEFAULT_BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_symbol('T'), Some(PieceKind::T));
//! assert_eq!(PieceKind::from_symbol('x'), None);
//!
//! assert_eq!(Rotation::West.next(), Rotation::North);
//! assert_eq!(Rotation::from_index(6), Rotation::South);
//!
//! assert_eq!(Intent::from_str("hardDrop"), Some(Intent::HardDrop));
//! assert_eq!(DEFAULT_BOARD_WIDTH, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells
pub const DEFAULT_BOARD_WIDTH: u16 = 10;

/// Default board height in cells
pub const DEFAULT_BOARD_HEIGHT: u16 = 20;

/// Height of the small board preset (width stays at 10)
pub const SMALL_BOARD_HEIGHT: u16 = 10;

/// Smallest accepted width: a horizontal I piece must fit.
pub const MIN_BOARD_WIDTH: u16 = 4;

/// Smallest accepted height: a vertical I piece must fit.
pub const MIN_BOARD_HEIGHT: u16 = 4;

/// Fixed timestep interval in milliseconds
pub const TICK_MS: u32 = 15;

/// Gravity period: the active piece falls one row once this much time has passed
pub const DROP_PERIOD_MS: u32 = 50;

/// Gravity period while soft drop is held
pub const SOFT_DROP_PERIOD_MS: u32 = 15;

/// Time a resting piece stays movable before it locks
pub const LOCK_DELAY_MS: u32 = 150;

/// Number of kinds in one bag of the randomizer
pub const BAG_SIZE: usize = 7;

/// Capacity of the per-tick intent buffer
pub const MAX_INTENTS_PER_TICK: usize = 16;

/// Points per full row
pub const FULL_ROWS_WEIGHT: u32 = 3;

/// Points per cell of longest-road span
pub const LONGEST_ROAD_WEIGHT: u32 = 1;

/// Points per mixed L-J community
pub const L_J_COMMUNITIES_WEIGHT: u32 = 4;

/// Points per piece in the largest T community
pub const T_COMMUNITY_WEIGHT: u32 = 6;

/// A cell position `(column, row)` in grid units.
pub type Coord = (i32, i32);

/// Unique handle of a piece, assigned when the piece is created.
///
/// Two pieces of the same kind at the same place are still different pieces;
/// graph bookkeeping and highlighting key on this handle.
pub type PieceId = u32;


/// The seven tetromino piece kinds
///
/// Three kinds take part in scoring:
/// - **I**: roads (longest bounding-box span of touching I pieces)
/// - **L** and **J**: mixed communities
/// - **T**: the largest community
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    L,
    J,
    O,
    S,
    Z,
    T,
}

impl PieceKind {
    /// Every kind once, in bag order before shuffling.
    pub const ALL: [PieceKind; BAG_SIZE] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    /// Single-letter symbol used in move logs and text boards
    pub fn symbol(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::T => 'T',
        }
    }

    /// Parse a move-log symbol (uppercase only; lowercase letters are moves)
    ///
    /// # Examples
    ///
    /// ```
    /// use citytetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_symbol('L'), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_symbol('l'), None);
    /// ```
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'T' => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_symbol(c.to_ascii_uppercase()),
            _ => None,
        }
    }
}

/// Rotation states, cycled in one direction only
///
/// The index (0..=3) selects the shape variant in the geometry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Next rotation state (wraps after West)
    pub fn next(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Variant index in 0..=3
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation for an index, taken modulo 4
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Abstract input intents accepted by the simulation
///
/// The presentation layer decodes keys into these and hands them over once per
/// tick, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Shift the active piece one column left
    MoveLeft,
    /// Shift the active piece one column right
    MoveRight,
    /// Start soft drop (fast gravity)
    SoftDropOn,
    /// Stop soft drop
    SoftDropOff,
    /// Rotate the active piece to its next variant
    Rotate,
    /// Drop the active piece until it rests and lock it
    HardDrop,
    /// Toggle pause
    PauseToggle,
}

impl Intent {
    /// Parse intent from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use citytetris_types::Intent;
    ///
    /// assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
    /// assert_eq!(Intent::from_str("SOFTDROPON"), Some(Intent::SoftDropOn));
    /// assert_eq!(Intent::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "softdropon" => Some(Intent::SoftDropOn),
            "softdropoff" => Some(Intent::SoftDropOff),
            "rotate" => Some(Intent::Rotate),
            "harddrop" => Some(Intent::HardDrop),
            "pausetoggle" | "pause" => Some(Intent::PauseToggle),
            _ => None,
        }
    }

    /// camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::SoftDropOn => "softDropOn",
            Intent::SoftDropOff => "softDropOff",
            Intent::Rotate => "rotate",
            Intent::HardDrop => "hardDrop",
            Intent::PauseToggle => "pauseToggle",
        }
    }
}
