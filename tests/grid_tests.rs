//! Grid tests - collision queries, adjacency and board text

use citytetris::core::pieces::Piece;
use citytetris::core::replay::{build_grid, Placement};
use citytetris::core::{Grid, PieceGraph, PlacementError};
use citytetris::types::{PieceKind, Rotation};

fn piece(id: u32, kind: PieceKind, rotation: Rotation, anchor: (i32, i32)) -> Piece {
    Piece::new(id, kind).with_placement(rotation, anchor)
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new(10, 20).unwrap();
    assert_eq!(grid.width(), 10);
    assert_eq!(grid.height(), 20);
    assert!(grid.is_empty());

    for y in 0..20 {
        for x in 0..10 {
            assert!(!grid.is_occupied(x, y), "Cell ({}, {}) should be free", x, y);
        }
    }
    assert_eq!(grid.full_row_count(), 0);
}

#[test]
fn test_out_of_bounds_counts_as_collision() {
    let grid = Grid::new(10, 20).unwrap();
    assert!(grid.collides(&[(-1, 0)]));
    assert!(grid.collides(&[(10, 0)]));
    assert!(grid.collides(&[(0, 20)]));
    assert!(!grid.collides(&[(0, 0), (9, 19)]));
}

#[test]
fn test_shifted_queries_do_not_move_piece() {
    let mut grid = Grid::new(10, 10).unwrap();
    grid.add(piece(0, PieceKind::O, Rotation::North, (4, 8))).unwrap();

    let left_of = piece(1, PieceKind::O, Rotation::North, (6, 8));
    assert!(grid.collides_if_shifted_left(&left_of));
    assert!(!grid.collides_if_shifted_right(&left_of));
    assert!(grid.collides_if_shifted_down(&left_of));
    assert_eq!(left_of.anchor(), (6, 8));

    let at_wall = piece(2, PieceKind::I, Rotation::East, (9, 0));
    assert!(grid.collides_if_shifted_right(&at_wall));
    assert!(!grid.collides_if_shifted_down(&at_wall));
}

#[test]
fn test_add_keeps_occupancy_consistent() {
    let mut grid = Grid::new(10, 10).unwrap();
    grid.add(piece(0, PieceKind::T, Rotation::North, (0, 8))).unwrap();
    grid.add(piece(1, PieceKind::S, Rotation::North, (3, 8))).unwrap();
    assert!(grid.occupancy_is_consistent());
    assert_eq!(grid.owner_at(1, 9).map(|p| p.id()), Some(0));
    assert_eq!(grid.owner_at(4, 9).map(|p| p.id()), Some(1));
    assert!(grid.owner_at(0, 9).is_none());
}

#[test]
fn test_overlap_is_a_placement_error() {
    let mut grid = Grid::new(10, 10).unwrap();
    grid.add(piece(0, PieceKind::I, Rotation::North, (0, 9))).unwrap();
    let err = grid
        .add(piece(1, PieceKind::I, Rotation::East, (3, 6)))
        .unwrap_err();
    assert_eq!(
        err,
        PlacementError::Overlap {
            piece: 1,
            cell: (3, 9),
            owner: 0
        }
    );
    assert_eq!(grid.len(), 1);
    assert!(grid.occupancy_is_consistent());
}

#[test]
fn test_horizontal_touch() {
    let grid = build_grid(&["TlRllRl", "TlrRrRrr", "Il"], 10, 10, Placement::Centered).unwrap();
    assert_eq!(
        grid.to_string(),
        [
            "#####################",
            "#                   #",
            "#                   #",
            "#                   #",
            "#                   #",
            "#                   #",
            "#                   #",
            "#                   #",
            "#                   #",
            "#  T             T  #",
            "#T T T I I I I T T T#",
            "#####################",
        ]
        .join("\n")
    );
    let [b0, b1, b2] = [grid.pieces()[0], grid.pieces()[1], grid.pieces()[2]];

    assert!(!b0.touches(&b1));
    assert!(!b1.touches(&b0));
    assert!(b0.touches(&b2));
    assert!(b2.touches(&b0));
    assert!(b1.touches(&b2));
    assert!(b2.touches(&b1));
    // A row of I between two Ts is a full row.
    assert_eq!(grid.full_row_count(), 1);
}

#[test]
fn test_vertical_touch() {
    let grid = build_grid(&["O", "Orrr", "LRR"], 10, 10, Placement::Origin).unwrap();
    assert_eq!(
        grid.to_string(),
        [
            "#####################",
            "#                   #",
            "#                   #",
            "#                   #",
            "#                   #",
            "#                   #",
            "#                   #",
            "#    L              #",
            "#L L L              #",
            "#O O   O O          #",
            "#O O   O O          #",
            "#####################",
        ]
        .join("\n")
    );
    let pieces = grid.pieces();

    assert!(!pieces[0].touches(&pieces[1]));
    assert!(pieces[0].touches(&pieces[2]));
    assert!(pieces[2].touches(&pieces[0]));
    // Corner contact only.
    assert!(!pieces[1].touches(&pieces[2]));
    assert!(!pieces[2].touches(&pieces[1]));
}

#[test]
fn test_multiple_touch() {
    let grid = build_grid(
        &["Ollll", "JRl", "IRllll", "Illl", "IRr"],
        10,
        10,
        Placement::Centered,
    )
    .unwrap();
    let p = grid.pieces();
    let expected = [
        [false, false, true, false, false],
        [false, false, false, true, true],
        [true, false, false, true, false],
        [false, true, true, false, true],
        [false, true, false, true, false],
    ];
    for (i, row) in expected.iter().enumerate() {
        for (j, &touch) in row.iter().enumerate() {
            if i != j {
                assert_eq!(p[i].touches(&p[j]), touch, "pieces {} and {}", i, j);
            }
        }
    }

    let graph = PieceGraph::of_all(p);
    assert_eq!(graph.edge_count(), 5);
    assert_eq!(graph.components().len(), 1);
}
