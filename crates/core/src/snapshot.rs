use serde::{Deserialize, Serialize};

use crate::pieces::Piece;
use crate::scoring::Score;
use crate::types::{PieceId, PieceKind, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub id: PieceId,
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
    pub highlighted: bool,
}

impl PieceSnapshot {
    pub fn locked(piece: &Piece, highlighted: bool) -> Self {
        let (x, y) = piece.anchor();
        Self {
            id: piece.id(),
            kind: piece.kind(),
            rotation: piece.rotation(),
            x,
            y,
            highlighted,
        }
    }

    pub fn active(piece: &Piece) -> Self {
        Self::locked(piece, false)
    }
}

/// Read-only view handed to presentation layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Locked pieces in lock order
    pub pieces: Vec<PieceSnapshot>,
    pub active: Option<PieceSnapshot>,
    pub score: Score,
    pub total_score: u32,
    pub running: bool,
    pub paused: bool,
    pub game_over: bool,
    pub next: PieceKind,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    pub fn highlighted_count(&self) -> usize {
        self.pieces.iter().filter(|p| p.highlighted).count()
    }
}
