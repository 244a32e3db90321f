//! Error types
//!
//! Rejected moves are not errors and never show up here. What remains are
//! three distinct classes: bad configuration, bad replay data, and placement
//! faults that break the grid's no-overlap invariant.

use thiserror::Error;

use crate::types::{Coord, PieceId};

/// Invalid session parameters, reported before anything runs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must be at least {min_width}x{min_height} cells, got {width}x{height}")]
    InvalidDimensions {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },
    #[error("{0} must be greater than zero")]
    ZeroTiming(&'static str),
}

/// Malformed or unplayable move-log data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("entry {entry}: unknown piece kind {symbol:?}")]
    UnknownPieceKind { entry: usize, symbol: char },
    #[error("entry {entry}: unknown move {symbol:?}")]
    UnknownMove { entry: usize, symbol: char },
    #[error("entry {entry} is empty")]
    EmptyEntry { entry: usize },
    #[error("entry {entry}: piece cannot be placed: {source}")]
    Unplaceable {
        entry: usize,
        #[source]
        source: PlacementError,
    },
}

/// A piece would break the grid invariant
///
/// The controller's own gating never produces these for legal play; seeing one
/// means an internal-consistency fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("piece {piece} cell {cell:?} is outside the board")]
    OutOfBounds { piece: PieceId, cell: Coord },
    #[error("piece {piece} cell {cell:?} is already occupied by piece {owner}")]
    Overlap {
        piece: PieceId,
        cell: Coord,
        owner: PieceId,
    },
    #[error("piece {piece} is already on the board")]
    DuplicateId { piece: PieceId },
}

/// Umbrella error for the simulation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("replay error: {0}")]
    Replay(#[from] ReplayError),
    #[error("internal consistency fault: {0}")]
    Placement(#[from] PlacementError),
}
