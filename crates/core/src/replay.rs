//! Replay module - move logs and board reconstruction
//!
//! A move log holds one entry per spawned piece: the kind symbol followed by
//! the moves that were applied to it (`l` left, `r` right, `d` down, `R`
//! rotate). Only applied moves are written, so replaying an entry applies
//! every move unconditionally, drops the piece until it rests and locks it.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ReplayError};
use crate::grid::Grid;
use crate::pieces::Piece;
use crate::scoring::{evaluate_and_highlight, Score};
use crate::types::PieceKind;

/// A single recorded move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Left,
    Right,
    Down,
    Rotate,
}

impl Move {
    pub fn symbol(&self) -> char {
        match self {
            Move::Left => 'l',
            Move::Right => 'r',
            Move::Down => 'd',
            Move::Rotate => 'R',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'l' => Some(Move::Left),
            'r' => Some(Move::Right),
            'd' => Some(Move::Down),
            'R' => Some(Move::Rotate),
            _ => None,
        }
    }

    /// Apply the move with no legality checks
    pub(crate) fn apply(&self, piece: &mut Piece, width: u16, height: u16) {
        match self {
            Move::Left => piece.shift(-1, 0),
            Move::Right => piece.shift(1, 0),
            Move::Down => piece.shift(0, 1),
            Move::Rotate => {
                piece.rotate();
                piece.pull_inside(width as i32, height as i32);
            }
        }
    }
}

/// Growing move log of a live session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveLog {
    entries: Vec<String>,
    /// The last entry belongs to the active piece.
    open: bool,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the entry of a freshly spawned piece
    pub fn begin(&mut self, kind: PieceKind) {
        self.entries.push(kind.symbol().to_string());
        self.open = true;
    }

    /// Append a move to the open entry
    pub fn push(&mut self, mv: Move) {
        if !self.open {
            return;
        }
        if let Some(entry) = self.entries.last_mut() {
            entry.push(mv.symbol());
        }
    }

    /// Mark the open entry as belonging to a locked piece
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Every entry, including the active piece's
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Entries of locked pieces only
    pub fn locked_entries(&self) -> &[String] {
        let end = self.entries.len() - usize::from(self.open);
        &self.entries[..end]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Where a replayed piece appears before its moves run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Top-left corner
    #[default]
    Origin,
    /// Same column a live session spawns at
    Centered,
}

/// Column a new piece spawns at: centered, but never so far right that a
/// horizontal I piece would stick out
pub fn spawn_column(width: u16) -> i32 {
    let width = width as i32;
    (width / 2 - 1).min(width - 4)
}

/// Parse one entry into its kind and move list
fn parse_entry(index: usize, entry: &str) -> Result<(PieceKind, Vec<Move>), ReplayError> {
    let mut chars = entry.chars();
    let first = chars.next().ok_or(ReplayError::EmptyEntry { entry: index })?;
    let kind = PieceKind::from_symbol(first).ok_or(ReplayError::UnknownPieceKind {
        entry: index,
        symbol: first,
    })?;
    let moves = chars
        .map(|c| {
            Move::from_symbol(c).ok_or(ReplayError::UnknownMove {
                entry: index,
                symbol: c,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((kind, moves))
}

/// Rebuild a grid from move-log entries
///
/// Piece ids are the entry indices. Highlights are computed once at the end.
pub fn build_grid<S: AsRef<str>>(
    entries: &[S],
    width: u16,
    height: u16,
    placement: Placement,
) -> Result<Grid, CoreError> {
    let mut grid = Grid::new(width, height)?;
    let start_x = match placement {
        Placement::Origin => 0,
        Placement::Centered => spawn_column(width),
    };

    for (index, entry) in entries.iter().enumerate() {
        let (kind, moves) = parse_entry(index, entry.as_ref())?;
        let mut piece = Piece::new(index as u32, kind);
        piece.shift(start_x, 0);
        for mv in moves {
            mv.apply(&mut piece, width, height);
        }
        while !grid.rests(&piece) {
            piece.shift(0, 1);
        }
        grid.add(piece)
            .map_err(|source| ReplayError::Unplaceable {
                entry: index,
                source,
            })?;
    }

    evaluate_and_highlight(&mut grid);
    Ok(grid)
}

/// A finished (or interrupted) session, enough to rebuild its board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayRecord {
    pub width: u16,
    pub height: u16,
    pub seed: Option<u32>,
    pub moves: Vec<String>,
    pub score: Score,
}

impl ReplayRecord {
    /// Rebuild the board with live-session spawn placement
    pub fn rebuild(&self) -> Result<Grid, CoreError> {
        build_grid(&self.moves, self.width, self.height, Placement::Centered)
    }

    pub fn total_score(&self) -> u32 {
        self.score.total()
    }
}

/// The `k` best records by total score, highest first; ties keep input order
pub fn top_scores(records: &[ReplayRecord], k: usize) -> Vec<&ReplayRecord> {
    let mut ranked: Vec<&ReplayRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.total_score().cmp(&a.total_score()));
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rotation;

    #[test]
    fn move_symbols() {
        for mv in [Move::Left, Move::Right, Move::Down, Move::Rotate] {
            assert_eq!(Move::from_symbol(mv.symbol()), Some(mv));
        }
        assert_eq!(Move::from_symbol('L'), None);
    }

    #[test]
    fn log_tracks_open_entry() {
        let mut log = MoveLog::new();
        log.begin(PieceKind::T);
        log.push(Move::Left);
        log.push(Move::Rotate);
        assert_eq!(log.entries(), ["TlR"]);
        assert!(log.locked_entries().is_empty());

        log.close();
        log.push(Move::Down);
        assert_eq!(log.locked_entries(), ["TlR"]);

        log.begin(PieceKind::O);
        assert_eq!(log.len(), 2);
        assert_eq!(log.locked_entries().len(), 1);
    }

    #[test]
    fn spawn_column_is_centered() {
        assert_eq!(spawn_column(10), 4);
        assert_eq!(spawn_column(4), 0);
        assert_eq!(spawn_column(5), 1);
    }

    #[test]
    fn builds_and_drops() {
        let grid = build_grid(&["IR", "Ir"], 10, 10, Placement::Origin).unwrap();
        assert_eq!(grid.len(), 2);
        let first = grid.pieces()[0];
        assert_eq!(first.rotation(), Rotation::East);
        assert_eq!(first.anchor(), (0, 6));
        assert_eq!(grid.pieces()[1].anchor(), (1, 9));
        assert_eq!(grid.highlighted_ids().len(), 2);
    }

    #[test]
    fn centered_placement() {
        let grid = build_grid(&["O"], 10, 10, Placement::Centered).unwrap();
        assert_eq!(grid.pieces()[0].anchor(), (4, 8));
    }

    #[test]
    fn rejects_bad_entries() {
        let err = build_grid(&["I", "X"], 10, 10, Placement::Origin).unwrap_err();
        assert_eq!(
            err,
            CoreError::Replay(ReplayError::UnknownPieceKind {
                entry: 1,
                symbol: 'X'
            })
        );

        let err = build_grid(&["Ix"], 10, 10, Placement::Origin).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Replay(ReplayError::UnknownMove { symbol: 'x', .. })
        ));

        let err = build_grid(&[""], 10, 10, Placement::Origin).unwrap_err();
        assert_eq!(err, CoreError::Replay(ReplayError::EmptyEntry { entry: 0 }));

        let err = build_grid(&["Ill"], 10, 10, Placement::Origin).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Replay(ReplayError::Unplaceable { entry: 0, .. })
        ));
    }

    #[test]
    fn ranks_records() {
        let record = |t: u32| ReplayRecord {
            width: 10,
            height: 10,
            seed: None,
            moves: Vec::new(),
            score: Score {
                t_community: t,
                ..Score::default()
            },
        };
        let records = [record(2), record(5), record(0), record(3)];
        let best: Vec<u32> = top_scores(&records, 3)
            .iter()
            .map(|r| r.total_score())
            .collect();
        assert_eq!(best, vec![30, 18, 12]);
        assert!(top_scores(&records, 0).is_empty());
    }
}
