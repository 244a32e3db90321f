//! Scoring module - graph metrics over the settled pieces
//!
//! Four metrics, each recomputed from the piece list on every call:
//!
//! - **full_rows**: rows whose occupied-cell count equals the board width
//! - **longest_road**: over I-piece components of two or more pieces, the
//!   largest bounding-box span `(max_x - min_x) + (max_y - min_y)`
//! - **l_j_communities**: components of the combined L/J graph that contain
//!   both kinds
//! - **t_community**: size of the largest T-piece component; a lone T piece
//!   does not count
//!
//! Each metric also reports which pieces to highlight. Ties are resolved by
//! the traversal order of [`PieceGraph::components`]: the first maximum wins.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::graph::PieceGraph;
use crate::grid::Grid;
use crate::pieces::Piece;
use crate::types::{
    PieceId, PieceKind, FULL_ROWS_WEIGHT, LONGEST_ROAD_WEIGHT, L_J_COMMUNITIES_WEIGHT,
    T_COMMUNITY_WEIGHT,
};

/// The four score components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Score {
    pub full_rows: u32,
    pub longest_road: u32,
    pub l_j_communities: u32,
    pub t_community: u32,
}

impl Score {
    /// Weighted sum of all components
    pub fn total(&self) -> u32 {
        self.full_rows * FULL_ROWS_WEIGHT
            + self.longest_road * LONGEST_ROAD_WEIGHT
            + self.l_j_communities * L_J_COMMUNITIES_WEIGHT
            + self.t_community * T_COMMUNITY_WEIGHT
    }

    /// Components as a tuple, handy in assertions
    pub fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (
            self.full_rows,
            self.longest_road,
            self.l_j_communities,
            self.t_community,
        )
    }
}

/// Result of one metric: its value and the pieces it wants highlighted
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetricResult {
    pub value: u32,
    pub highlight: Vec<PieceId>,
}

impl MetricResult {
    fn none() -> Self {
        Self::default()
    }
}

/// Full scoring pass: score plus the union of all highlights
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Evaluation {
    pub score: Score,
    pub highlighted: BTreeSet<PieceId>,
}

/// Score a grid from scratch
pub fn evaluate(grid: &Grid) -> Evaluation {
    let pieces = grid.pieces();
    let road = longest_road(pieces);
    let lj = l_j_communities(pieces);
    let t = t_community(pieces);

    let highlighted = road
        .highlight
        .iter()
        .chain(&lj.highlight)
        .chain(&t.highlight)
        .copied()
        .collect();

    Evaluation {
        score: Score {
            full_rows: full_rows(pieces, grid.width(), grid.height()),
            longest_road: road.value,
            l_j_communities: lj.value,
            t_community: t.value,
        },
        highlighted,
    }
}

/// Score a grid and store the resulting highlight flags on it
pub fn evaluate_and_highlight(grid: &mut Grid) -> Score {
    let evaluation = evaluate(grid);
    grid.set_highlights(&evaluation.highlighted);
    evaluation.score
}

/// Count rows whose tally of occupied cells equals the width
pub fn full_rows(pieces: &[Piece], width: u16, height: u16) -> u32 {
    let mut per_row = vec![0u32; height as usize];
    for piece in pieces {
        for (_, y) in piece.occupied_cells() {
            if let Some(count) = usize::try_from(y).ok().and_then(|y| per_row.get_mut(y)) {
                *count += 1;
            }
        }
    }
    per_row.iter().filter(|&&n| n == width as u32).count() as u32
}

/// Bounding box `(min_x, min_y, max_x, max_y)` over all cells of the pieces
fn bounding_box<'a>(pieces: impl Iterator<Item = &'a Piece>) -> Option<(i32, i32, i32, i32)> {
    pieces
        .flat_map(|p| p.occupied_cells())
        .fold(None, |acc, (x, y)| match acc {
            None => Some((x, y, x, y)),
            Some((x0, y0, x1, y1)) => Some((x0.min(x), y0.min(y), x1.max(x), y1.max(y))),
        })
}

/// Longest road over I pieces
pub fn longest_road(pieces: &[Piece]) -> MetricResult {
    let graph = PieceGraph::of_kinds(pieces, &[PieceKind::I]);
    if graph.len() < 2 {
        return MetricResult::none();
    }

    let mut best = MetricResult::none();
    for component in graph.components() {
        if component.len() < 2 {
            continue;
        }
        let Some((x0, y0, x1, y1)) = bounding_box(component.iter().map(|&i| graph.node(i))) else {
            continue;
        };
        let distance = ((x1 - x0) + (y1 - y0)) as u32;
        if distance > best.value {
            best = MetricResult {
                value: distance,
                highlight: component.iter().map(|&i| graph.node(i).id()).collect(),
            };
        }
    }
    best
}

/// First touching (L, J) pair in a component: Ls in traversal order, each
/// checked against its neighbors in grid order
fn first_l_j_pair(graph: &PieceGraph<'_>, component: &[usize]) -> Option<(PieceId, PieceId)> {
    component
        .iter()
        .filter(|&&i| graph.node(i).kind() == PieceKind::L)
        .find_map(|&l| {
            graph
                .neighbors(l)
                .iter()
                .find(|&&j| graph.node(j).kind() == PieceKind::J)
                .map(|&j| (graph.node(l).id(), graph.node(j).id()))
        })
}

/// Number of connected L/J groups that contain both kinds
pub fn l_j_communities(pieces: &[Piece]) -> MetricResult {
    let graph = PieceGraph::of_kinds(pieces, &[PieceKind::L, PieceKind::J]);
    if graph.len() < 2 {
        return MetricResult::none();
    }

    let mut result = MetricResult::none();
    for component in graph.components() {
        let has_l = component.iter().any(|&i| graph.node(i).kind() == PieceKind::L);
        let has_j = component.iter().any(|&i| graph.node(i).kind() == PieceKind::J);
        if !(has_l && has_j) {
            continue;
        }
        result.value += 1;
        // A connected mixed component always has an L next to a J.
        if let Some((l, j)) = first_l_j_pair(&graph, &component) {
            result.highlight.push(l);
            result.highlight.push(j);
        }
    }
    result
}

/// Size of the largest T community
pub fn t_community(pieces: &[Piece]) -> MetricResult {
    let graph = PieceGraph::of_kinds(pieces, &[PieceKind::T]);
    if graph.len() < 2 {
        return MetricResult::none();
    }

    let mut largest: Vec<usize> = Vec::new();
    for component in graph.components() {
        if component.len() > largest.len() {
            largest = component;
        }
    }

    if largest.len() < 2 {
        return MetricResult::none();
    }
    MetricResult {
        value: largest.len() as u32,
        highlight: largest.iter().map(|&i| graph.node(i).id()).collect(),
    }
}
