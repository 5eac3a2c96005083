// Copyright (c) 2016 srither-solver developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! The final loop-extraction/cycle-validation step (spec.md §4.6).
//!
//! The connectivity check is grounded in the teacher's
//! `srither-solver/src/model/connect_map.rs` `ConnectMap`, which counts
//! connected regions with the `union-find` crate; this module reuses
//! `union-find` the same way as a cheap "at most one cycle" check, then
//! walks the on-edge adjacency directly to produce the ordered
//! `cycle_points`.

use union_find::{QuickFindUf as Uf, UnionBySizeRank as Union, UnionFind};

use slither_core::geom::Point;

use crate::graph::Graph;
use crate::state::{EdgeValue, State};
use crate::Solution;

/// The completed state fails a validity check: either a clue is violated,
/// or the on-edges form something other than a single simple cycle.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Rejected;

/// Validates a fully-assigned state and, if valid, extracts the [`Solution`].
///
/// Expects `state.is_complete()`; calling this on a partial assignment is a
/// programming error.
pub fn validate(state: &State, graph: &Graph) -> Result<Solution, Rejected> {
    debug_assert!(state.is_complete(), "validate called on a partial state");

    for cell in 0..graph.num_cells() {
        if let Some(k) = graph.clue(cell) {
            if state.cell_on(cell) != k {
                return Err(Rejected);
            }
        }
    }

    let mut uf: Uf<Union> = UnionFind::new(graph.num_points());
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); graph.num_points()];
    for e in 0..graph.num_edges() {
        if state.edge(e) == EdgeValue::On {
            let edge = graph.edge(e);
            let (u, v) = edge.endpoints;
            uf.union(u, v);
            adjacency[u].push(v);
            adjacency[v].push(u);
        }
    }

    let mut on_points = Vec::new();
    for p in 0..graph.num_points() {
        match adjacency[p].len() {
            0 => {}
            2 => on_points.push(p),
            _ => return Err(Rejected), // degree 1 or >2: not a simple cycle
        }
    }
    if on_points.is_empty() {
        return Err(Rejected);
    }

    let root = uf.find(on_points[0]);
    if !on_points.iter().all(|&p| uf.find(p) == root) {
        return Err(Rejected); // multiple disjoint cycles
    }

    for neighbors in adjacency.iter_mut() {
        neighbors.sort_unstable();
    }

    let start = on_points[0];
    let cycle_points = walk_cycle(graph, &adjacency, start);
    if cycle_points.len() != on_points.len() {
        return Err(Rejected);
    }

    let edge_assignment = (0..graph.num_edges()).map(|e| state.edge(e)).collect();

    Ok(Solution {
        edge_assignment,
        cycle_points,
    })
}

fn walk_cycle(graph: &Graph, adjacency: &[Vec<usize>], start: usize) -> Vec<Point> {
    let mut points = vec![graph.point_coord(start)];
    let mut prev = start;
    let mut cur = adjacency[start][0];
    while cur != start {
        points.push(graph.point_coord(cur));
        let neighbors = &adjacency[cur];
        let next = if neighbors[0] != prev {
            neighbors[0]
        } else {
            neighbors[1]
        };
        prev = cur;
        cur = next;
    }
    points
}
