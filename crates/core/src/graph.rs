//! Graph module - adjacency graphs over settled pieces
//!
//! Nodes are the pieces that pass a kind filter, kept in grid order; an edge
//! joins every pair of distinct pieces that share a cell edge. Building a graph
//! is O(n²) pair checks of 16 cell comparisons each, which is fine for board
//! sized inputs.
//!
//! Traversal order is fixed: components are discovered by scanning nodes in
//! grid order, and each component is explored breadth-first from its first
//! node with neighbors visited in grid order. Every "first found" tie-break in
//! scoring refers to this order.

use std::collections::VecDeque;

use crate::pieces::Piece;
use crate::types::PieceKind;

/// Undirected touch graph over a filtered subset of pieces
#[derive(Debug, Clone)]
pub struct PieceGraph<'a> {
    nodes: Vec<&'a Piece>,
    adjacency: Vec<Vec<usize>>,
}

impl<'a> PieceGraph<'a> {
    /// Build the graph of all pieces whose kind is in `kinds`
    pub fn of_kinds(pieces: &'a [Piece], kinds: &[PieceKind]) -> Self {
        Self::build(pieces.iter().filter(|p| kinds.contains(&p.kind())))
    }

    /// Build the graph over every piece
    pub fn of_all(pieces: &'a [Piece]) -> Self {
        Self::build(pieces.iter())
    }

    fn build(nodes: impl Iterator<Item = &'a Piece>) -> Self {
        let nodes: Vec<&Piece> = nodes.collect();
        let mut adjacency = vec![Vec::new(); nodes.len()];
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                if nodes[i].touches(nodes[j]) {
                    adjacency[i].push(j);
                    adjacency[j].push(i);
                }
            }
        }
        Self { nodes, adjacency }
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, i: usize) -> &'a Piece {
        self.nodes[i]
    }

    /// Neighbors of node `i`, ascending
    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.adjacency[i]
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Connected components as lists of node indices, in traversal order
    pub fn components(&self) -> Vec<Vec<usize>> {
        let mut seen = vec![false; self.nodes.len()];
        let mut components = Vec::new();
        let mut queue = VecDeque::new();

        for start in 0..self.nodes.len() {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            queue.push_back(start);
            let mut component = Vec::new();
            while let Some(n) = queue.pop_front() {
                component.push(n);
                for &m in &self.adjacency[n] {
                    if !seen[m] {
                        seen[m] = true;
                        queue.push_back(m);
                    }
                }
            }
            components.push(component);
        }
        components
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rotation;

    fn at(id: u32, kind: PieceKind, rotation: Rotation, anchor: (i32, i32)) -> Piece {
        Piece::new(id, kind).with_placement(rotation, anchor)
    }

    #[test]
    fn filter_keeps_grid_order() {
        let pieces = [
            at(0, PieceKind::T, Rotation::North, (0, 0)),
            at(1, PieceKind::I, Rotation::North, (0, 5)),
            at(2, PieceKind::T, Rotation::North, (5, 0)),
        ];
        let g = PieceGraph::of_kinds(&pieces, &[PieceKind::T]);
        assert_eq!(g.len(), 2);
        assert_eq!(g.node(0).id(), 0);
        assert_eq!(g.node(1).id(), 2);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(PieceGraph::of_all(&pieces).len(), 3);
    }

    #[test]
    fn components_in_discovery_order() {
        // 0 and 2 touch, 1 is alone, 3 touches 2.
        let pieces = [
            at(0, PieceKind::O, Rotation::North, (0, 0)),
            at(1, PieceKind::O, Rotation::North, (6, 6)),
            at(2, PieceKind::O, Rotation::North, (2, 0)),
            at(3, PieceKind::O, Rotation::North, (4, 0)),
        ];
        let g = PieceGraph::of_all(&pieces);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.neighbors(2), &[0, 3]);
        assert_eq!(g.components(), vec![vec![0, 2, 3], vec![1]]);
    }

    #[test]
    fn empty_graph() {
        let g = PieceGraph::of_all(&[]);
        assert!(g.is_empty());
        assert!(g.components().is_empty());
    }
}
