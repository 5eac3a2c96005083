// Copyright (c) 2016 srither-solver developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Mutable, cloneable search state (spec.md §3, §4.2).

use crate::graph::Graph;

/// The value of one edge during search.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EdgeValue {
    Undecided,
    On,
    Off,
}

impl EdgeValue {
    #[inline]
    fn as_i8(self) -> i8 {
        match self {
            EdgeValue::Undecided => 0,
            EdgeValue::On => 1,
            EdgeValue::Off => -1,
        }
    }
}

/// Per-edge assignment plus the per-point and per-cell counters that are
/// kept in lockstep with it. Cloned before each search branch.
#[derive(Clone, Debug)]
pub struct State {
    edge_state: Vec<i8>,
    point_degree: Vec<u8>,
    point_undecided: Vec<u8>,
    cell_on: Vec<u8>,
    cell_undecided: Vec<u8>,
    undecided_edges: usize,
}

impl State {
    /// A fresh state over `graph` with every edge undecided.
    pub fn new(graph: &Graph) -> State {
        let point_undecided = (0..graph.num_points())
            .map(|p| graph.degree(p) as u8)
            .collect();
        let cell_undecided = (0..graph.num_cells())
            .map(|c| graph.edges_of_cell(c).len() as u8)
            .collect();

        State {
            edge_state: vec![0; graph.num_edges()],
            point_degree: vec![0; graph.num_points()],
            point_undecided,
            cell_on: vec![0; graph.num_cells()],
            cell_undecided,
            undecided_edges: graph.num_edges(),
        }
    }

    #[inline]
    pub fn edge(&self, e: usize) -> EdgeValue {
        match self.edge_state[e] {
            0 => EdgeValue::Undecided,
            1 => EdgeValue::On,
            -1 => EdgeValue::Off,
            v => unreachable!("invalid edge state {v}"),
        }
    }

    #[inline]
    pub fn is_undecided(&self, e: usize) -> bool {
        self.edge_state[e] == 0
    }

    #[inline]
    pub fn point_degree(&self, p: usize) -> u8 {
        self.point_degree[p]
    }
    #[inline]
    pub fn point_undecided(&self, p: usize) -> u8 {
        self.point_undecided[p]
    }
    #[inline]
    pub fn cell_on(&self, c: usize) -> u8 {
        self.cell_on[c]
    }
    #[inline]
    pub fn cell_undecided(&self, c: usize) -> u8 {
        self.cell_undecided[c]
    }

    /// Number of edges not yet assigned a value.
    #[inline]
    pub fn undecided_edges(&self) -> usize {
        self.undecided_edges
    }
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.undecided_edges == 0
    }

    /// Sets an undecided edge to `On`, updating every incident counter.
    /// Panics (programming error, spec.md §7) if `e` is already decided.
    pub fn set_edge_on(&mut self, graph: &Graph, e: usize) {
        self.set_edge(graph, e, EdgeValue::On);
    }

    /// Sets an undecided edge to `Off`, updating every incident counter.
    pub fn set_edge_off(&mut self, graph: &Graph, e: usize) {
        self.set_edge(graph, e, EdgeValue::Off);
    }

    fn set_edge(&mut self, graph: &Graph, e: usize, value: EdgeValue) {
        assert!(self.edge_state[e] == 0, "edge {e} is already decided");
        self.edge_state[e] = value.as_i8();
        self.undecided_edges -= 1;

        let edge = graph.edge(e);
        let (u, v) = edge.endpoints;
        self.point_undecided[u] -= 1;
        self.point_undecided[v] -= 1;
        if let EdgeValue::On = value {
            self.point_degree[u] += 1;
            self.point_degree[v] += 1;
        }

        if let Some(a) = edge.cells.0 {
            self.cell_undecided[a] -= 1;
            if let EdgeValue::On = value {
                self.cell_on[a] += 1;
            }
        }
        if let Some(b) = edge.cells.1 {
            self.cell_undecided[b] -= 1;
            if let EdgeValue::On = value {
                self.cell_on[b] += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use slither_core::geom::Size;
    use slither_core::grid::Grid;

    #[test]
    fn counters_track_edge_state() {
        let grid = Grid::new(Size(2, 2));
        let graph = Graph::build(&grid);
        let mut state = State::new(&graph);

        let e = graph.h_edge_id(0, 0);
        assert!(state.is_undecided(e));
        state.set_edge_on(&graph, e);
        assert_eq!(state.edge(e), EdgeValue::On);

        let edge = graph.edge(e);
        assert_eq!(state.point_degree(edge.endpoints.0), 1);
        assert_eq!(state.point_degree(edge.endpoints.1), 1);
        if let Some(cell) = edge.cells.1 {
            assert_eq!(state.cell_on(cell), 1);
        }
        assert_eq!(state.undecided_edges(), graph.num_edges() - 1);
    }

    #[test]
    #[should_panic(expected = "already decided")]
    fn re_deciding_edge_panics() {
        let grid = Grid::new(Size(2, 2));
        let graph = Graph::build(&grid);
        let mut state = State::new(&graph);
        let e = graph.h_edge_id(0, 0);
        state.set_edge_on(&graph, e);
        state.set_edge_off(&graph, e);
    }

    #[test]
    fn counters_agree_with_degree_sum() {
        let grid = Grid::new(Size(2, 2));
        let graph = Graph::build(&grid);
        let mut state = State::new(&graph);
        for e in 0..graph.num_edges() {
            if e % 2 == 0 {
                state.set_edge_on(&graph, e);
            } else {
                state.set_edge_off(&graph, e);
            }
        }
        for p in 0..graph.num_points() {
            assert_eq!(
                state.point_degree(p) as usize + state.point_undecided(p) as usize,
                graph.degree(p)
            );
        }
    }
}
