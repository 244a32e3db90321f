//! Grid module - the occupancy grid of settled pieces
//!
//! The grid keeps the ordered list of locked pieces plus a flat, row-major
//! occupancy index (cell → position of the owning piece in that list).
//! Coordinates: (x, y) where x runs left to right and y top to bottom.
//!
//! Invariants:
//! - no two locked pieces share a cell
//! - every locked cell lies inside `[0, width) x [0, height)`
//! - the occupancy index equals the union of the locked pieces' cells

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{ConfigError, PlacementError};
use crate::pieces::Piece;
use crate::types::{Coord, PieceId, MIN_BOARD_HEIGHT, MIN_BOARD_WIDTH};

/// Fixed-size board of locked pieces
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: u16,
    height: u16,
    pieces: Vec<Piece>,
    /// Parallel to `pieces`; recomputed on every scoring pass.
    highlighted: Vec<bool>,
    /// Row-major, `y * width + x`; holds an index into `pieces`.
    owners: Vec<Option<u32>>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        if width < MIN_BOARD_WIDTH || height < MIN_BOARD_HEIGHT {
            return Err(ConfigError::InvalidDimensions {
                width,
                height,
                min_width: MIN_BOARD_WIDTH,
                min_height: MIN_BOARD_HEIGHT,
            });
        }
        Ok(Self {
            width,
            height,
            pieces: Vec::new(),
            highlighted: Vec::new(),
            owners: vec![None; width as usize * height as usize],
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Locked pieces in lock order
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32
    }

    /// Check if position is occupied by a locked piece
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.owner_index(x, y).is_some()
    }

    fn owner_index(&self, x: i32, y: i32) -> Option<usize> {
        self.index(x, y)
            .and_then(|idx| self.owners[idx])
            .map(|i| i as usize)
    }

    /// The locked piece covering (x, y), if any
    pub fn owner_at(&self, x: i32, y: i32) -> Option<&Piece> {
        self.owner_index(x, y).map(|i| &self.pieces[i])
    }

    /// True if any cell is occupied or outside the board
    pub fn collides(&self, cells: &[Coord]) -> bool {
        cells
            .iter()
            .any(|&(x, y)| self.is_out_of_bounds(x, y) || self.is_occupied(x, y))
    }

    /// True if any on-board cell is taken by a locked piece
    pub fn overlaps_locked(&self, cells: &[Coord]) -> bool {
        cells.iter().any(|&(x, y)| self.is_occupied(x, y))
    }

    pub fn collides_if_shifted_left(&self, piece: &Piece) -> bool {
        self.collides(&piece.cells_shifted(-1, 0))
    }

    pub fn collides_if_shifted_right(&self, piece: &Piece) -> bool {
        self.collides(&piece.cells_shifted(1, 0))
    }

    pub fn collides_if_shifted_down(&self, piece: &Piece) -> bool {
        self.collides(&piece.cells_shifted(0, 1))
    }

    /// True if a locked piece sits directly left of, right of, or below any
    /// cell of `piece`. Board edges do not count as contact.
    pub fn contacts_neighbor(&self, piece: &Piece) -> bool {
        [(-1, 0), (1, 0), (0, 1)].iter().any(|&(dx, dy)| {
            piece
                .cells_shifted(dx, dy)
                .iter()
                .any(|&(x, y)| self.is_occupied(x, y))
        })
    }

    /// A piece rests when one more row down would leave the board or collide
    pub fn rests(&self, piece: &Piece) -> bool {
        self.collides_if_shifted_down(piece)
    }

    /// Lock a piece into the grid
    ///
    /// Fails without touching the grid if any cell is outside the board or
    /// already taken, or if a piece with the same id is already locked.
    /// Callers are expected to check collisions first.
    pub fn add(&mut self, piece: Piece) -> Result<(), PlacementError> {
        if self.pieces.iter().any(|p| p.id() == piece.id()) {
            return Err(PlacementError::DuplicateId { piece: piece.id() });
        }
        let cells = piece.occupied_cells();
        for &(x, y) in &cells {
            let Some(idx) = self.index(x, y) else {
                return Err(PlacementError::OutOfBounds {
                    piece: piece.id(),
                    cell: (x, y),
                });
            };
            if let Some(owner) = self.owners[idx] {
                return Err(PlacementError::Overlap {
                    piece: piece.id(),
                    cell: (x, y),
                    owner: self.pieces[owner as usize].id(),
                });
            }
        }

        let slot = self.pieces.len() as u32;
        for &(x, y) in &cells {
            if let Some(idx) = self.index(x, y) {
                self.owners[idx] = Some(slot);
            }
        }
        self.pieces.push(piece);
        self.highlighted.push(false);
        Ok(())
    }

    /// Check if every column of a row is occupied
    pub fn is_row_full(&self, y: i32) -> bool {
        if y < 0 || y >= self.height as i32 {
            return false;
        }
        let width = self.width as usize;
        let start = y as usize * width;
        self.owners[start..start + width].iter().all(|o| o.is_some())
    }

    /// Number of full rows according to the occupancy index
    pub fn full_row_count(&self) -> usize {
        (0..self.height as i32).filter(|&y| self.is_row_full(y)).count()
    }

    pub fn is_highlighted(&self, slot: usize) -> bool {
        self.highlighted.get(slot).copied().unwrap_or(false)
    }

    /// Ids of the currently highlighted pieces
    pub fn highlighted_ids(&self) -> BTreeSet<PieceId> {
        self.pieces
            .iter()
            .zip(&self.highlighted)
            .filter(|&(_, &h)| h)
            .map(|(p, _)| p.id())
            .collect()
    }

    /// Replace all highlight flags: exactly the pieces in `ids` end up lit
    pub fn set_highlights(&mut self, ids: &BTreeSet<PieceId>) {
        for (piece, flag) in self.pieces.iter().zip(self.highlighted.iter_mut()) {
            *flag = ids.contains(&piece.id());
        }
    }

    /// Rebuild the occupancy index from the piece list and compare
    pub fn occupancy_is_consistent(&self) -> bool {
        let mut expected = vec![None; self.owners.len()];
        for (slot, piece) in self.pieces.iter().enumerate() {
            for (x, y) in piece.occupied_cells() {
                match self.index(x, y) {
                    Some(idx) if expected[idx].is_none() => expected[idx] = Some(slot as u32),
                    _ => return false,
                }
            }
        }
        expected == self.owners
    }
}

/// Text board: `#` frame, one symbol per cell separated by spaces
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "#".repeat(2 * self.width as usize + 1);
        writeln!(f, "{border}")?;
        for y in 0..self.height as i32 {
            let row: Vec<String> = (0..self.width as i32)
                .map(|x| {
                    self.owner_at(x, y)
                        .map_or(' ', |p| p.kind().symbol())
                        .to_string()
                })
                .collect();
            writeln!(f, "#{}#", row.join(" "))?;
        }
        write!(f, "{border}")
    }
}
