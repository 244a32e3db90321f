//! Pieces module - tetromino shapes and the piece value type
//!
//! Shapes are a fixed lookup table indexed by kind and rotation. Every variant
//! has a cell in column 0 and a cell in row 0, so a piece's anchor is the
//! top-left corner of its bounding box.

use crate::types::{Coord, PieceId, PieceKind, Rotation};

/// Offset of a single cell relative to the piece anchor
pub type CellOffset = (i8, i8);

/// Shape of a piece - 4 cell offsets from the anchor
pub type PieceShape = [CellOffset; 4];

const I_SHAPES: [PieceShape; 4] = [
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    [(0, 0), (0, 1), (0, 2), (0, 3)],
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    [(0, 0), (0, 1), (0, 2), (0, 3)],
];

const L_SHAPES: [PieceShape; 4] = [
    [(0, 0), (1, 0), (2, 0), (0, 1)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 0)],
    [(0, 0), (0, 1), (0, 2), (1, 2)],
];

const J_SHAPES: [PieceShape; 4] = [
    [(0, 0), (1, 0), (2, 0), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (0, 2)],
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(0, 0), (1, 0), (0, 1), (0, 2)],
];

const O_SHAPES: [PieceShape; 4] = [[(0, 0), (0, 1), (1, 0), (1, 1)]; 4];

const S_SHAPES: [PieceShape; 4] = [
    [(0, 1), (1, 1), (1, 0), (2, 0)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (1, 0), (2, 0)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_SHAPES: [PieceShape; 4] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (0, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (0, 1), (0, 2)],
];

const T_SHAPES: [PieceShape; 4] = [
    [(0, 0), (1, 0), (2, 0), (1, 1)],
    [(0, 1), (1, 1), (1, 0), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 0)],
    [(0, 0), (0, 1), (0, 2), (1, 1)],
];

/// Get the shape (cell offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    let table = match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::L => &L_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::T => &T_SHAPES,
    };
    table[rotation.index() as usize]
}

/// Width and height of a shape's bounding box
pub fn shape_extent(kind: PieceKind, rotation: Rotation) -> (i32, i32) {
    get_shape(kind, rotation)
        .iter()
        .fold((0, 0), |(w, h), &(dx, dy)| {
            (w.max(dx as i32 + 1), h.max(dy as i32 + 1))
        })
}

/// One tetromino, falling or settled
///
/// `kind` and `id` never change. `rotation` and `anchor` change only while the
/// piece is the active piece; the grid hands out shared references only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    id: PieceId,
    kind: PieceKind,
    rotation: Rotation,
    anchor: Coord,
}

impl Piece {
    /// Create a piece in its first rotation with the anchor at the origin
    pub fn new(id: PieceId, kind: PieceKind) -> Self {
        Self {
            id,
            kind,
            rotation: Rotation::North,
            anchor: (0, 0),
        }
    }

    /// Builder-style placement, mainly for setting up boards directly
    pub fn with_placement(mut self, rotation: Rotation, anchor: Coord) -> Self {
        self.rotation = rotation;
        self.anchor = anchor;
        self
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn anchor(&self) -> Coord {
        self.anchor
    }

    /// Shape offsets for the current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// The 4 absolute cells for the current rotation and anchor
    pub fn occupied_cells(&self) -> [Coord; 4] {
        let (x, y) = self.anchor;
        self.shape().map(|(dx, dy)| (x + dx as i32, y + dy as i32))
    }

    /// Cells after a hypothetical shift; the piece itself is untouched
    pub fn cells_shifted(&self, dx: i32, dy: i32) -> [Coord; 4] {
        self.occupied_cells().map(|(x, y)| (x + dx, y + dy))
    }

    /// One past the largest occupied column
    pub fn rightmost_x(&self) -> i32 {
        self.anchor.0 + shape_extent(self.kind, self.rotation).0
    }

    /// One past the largest occupied row
    pub fn bottommost_y(&self) -> i32 {
        self.anchor.1 + shape_extent(self.kind, self.rotation).1
    }

    /// Smallest occupied row (always the anchor row)
    pub fn topmost_y(&self) -> i32 {
        self.anchor.1
    }

    pub(crate) fn shift(&mut self, dx: i32, dy: i32) {
        self.anchor = (self.anchor.0 + dx, self.anchor.1 + dy);
    }

    pub(crate) fn rotate(&mut self) {
        self.rotation = self.rotation.next();
    }

    /// Shift left/up by however far the shape sticks out past the right or
    /// bottom edge. Other pieces are not consulted.
    pub(crate) fn pull_inside(&mut self, width: i32, height: i32) {
        let right_outside = self.rightmost_x() - width;
        if right_outside > 0 {
            self.anchor.0 -= right_outside;
        }
        let bottom_outside = self.bottommost_y() - height;
        if bottom_outside > 0 {
            self.anchor.1 -= bottom_outside;
        }
    }

    /// True if some cell of `self` shares an edge with some cell of `other`
    pub fn touches(&self, other: &Piece) -> bool {
        let theirs = other.occupied_cells();
        self.occupied_cells().iter().any(|&(x0, y0)| {
            theirs
                .iter()
                .any(|&(x1, y1)| (x0 - x1).abs() + (y0 - y1).abs() == 1)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_touches_origin_row_and_column() {
        for kind in PieceKind::ALL {
            for r in 0..4 {
                let shape = get_shape(kind, Rotation::from_index(r));
                assert!(shape.iter().any(|&(dx, _)| dx == 0), "{kind:?} r{r}");
                assert!(shape.iter().any(|&(_, dy)| dy == 0), "{kind:?} r{r}");
            }
        }
    }

    #[test]
    fn every_variant_has_four_distinct_connected_cells() {
        for kind in PieceKind::ALL {
            for r in 0..4 {
                let shape = get_shape(kind, Rotation::from_index(r));
                for (i, a) in shape.iter().enumerate() {
                    assert!(!shape[i + 1..].contains(a));
                    let has_neighbor = shape.iter().any(|b| {
                        (a.0 - b.0).abs() + (a.1 - b.1).abs() == 1
                    });
                    assert!(has_neighbor, "{kind:?} r{r} cell {a:?} isolated");
                }
            }
        }
    }

    #[test]
    fn extents() {
        let i = Piece::new(0, PieceKind::I);
        assert_eq!(i.rightmost_x(), 4);
        assert_eq!(i.bottommost_y(), 1);

        let i = i.with_placement(Rotation::East, (2, 3));
        assert_eq!(i.rightmost_x(), 3);
        assert_eq!(i.bottommost_y(), 7);
        assert_eq!(i.topmost_y(), 3);
    }

    #[test]
    fn occupied_cells_follow_anchor() {
        let t = Piece::new(0, PieceKind::T).with_placement(Rotation::North, (4, 2));
        assert_eq!(t.occupied_cells(), [(4, 2), (5, 2), (6, 2), (5, 3)]);
        assert_eq!(t.cells_shifted(-1, 1), [(3, 3), (4, 3), (5, 3), (4, 4)]);
        // Shifted query does not move the piece.
        assert_eq!(t.anchor(), (4, 2));
    }

    #[test]
    fn pull_inside_handles_right_and_bottom() {
        let mut i = Piece::new(0, PieceKind::I).with_placement(Rotation::North, (8, 0));
        i.pull_inside(10, 20);
        assert_eq!(i.anchor(), (6, 0));

        let mut i = Piece::new(0, PieceKind::I).with_placement(Rotation::East, (0, 18));
        i.pull_inside(10, 20);
        assert_eq!(i.anchor(), (0, 16));
    }

    #[test]
    fn touching_is_edge_adjacency_only() {
        let a = Piece::new(0, PieceKind::O).with_placement(Rotation::North, (0, 0));
        let side = Piece::new(1, PieceKind::O).with_placement(Rotation::North, (2, 0));
        let corner = Piece::new(2, PieceKind::O).with_placement(Rotation::North, (2, 2));
        assert!(a.touches(&side));
        assert!(side.touches(&a));
        assert!(!a.touches(&corner));
    }

    #[test]
    fn test_rotation_from_every_edge_stays_on_board() {
        for (width, height) in [(4, 4), (7, 5), (10, 20)] {
            for kind in PieceKind::ALL {
                for r in 0..4 {
                    let rotation = Rotation::from_index(r);
                    let (w, h) = shape_extent(kind, rotation);
                    let (max_x, max_y) = (width - w, height - h);
                    let anchors = (0..=max_x)
                        .flat_map(|x| [(x, 0), (x, max_y)])
                        .chain((0..=max_y).flat_map(|y| [(0, y), (max_x, y)]));

                    for anchor in anchors {
                        let mut piece = Piece::new(0, kind).with_placement(rotation, anchor);
                        piece.rotate();
                        piece.pull_inside(width, height);
                        for (x, y) in piece.occupied_cells() {
                            assert!(
                                (0..width).contains(&x) && (0..height).contains(&y),
                                "{kind:?} r{r} from {anchor:?} left the {width}x{height} board"
                            );
                        }
                    }
                }
            }
        }
    }
}
