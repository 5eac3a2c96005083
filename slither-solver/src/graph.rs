// Copyright (c) 2016 srither-solver developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! The derived, immutable edge/point/cell graph of a puzzle (spec.md §4.1).
//!
//! Built once per puzzle from [`Grid`]. Horizontal edges precede vertical
//! edges in the edge id space; this ordering is a public contract relied on
//! by the CLI printer to index edges by `(row, col)`.

use slither_core::geom::{Geom, Point};
use slither_core::grid::Grid;

/// One lattice edge: its two endpoint point ids and the (up to two) cell ids
/// it borders. A `None` cell means that side of the edge faces outside the
/// grid.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Edge {
    pub endpoints: (usize, usize),
    pub cells: (Option<usize>, Option<usize>),
}

/// The derived graph of a puzzle: edges plus the adjacency indexes used by
/// the state, propagator and heuristic.
#[derive(Clone, Debug)]
pub struct Graph {
    rows: i32,
    cols: i32,
    edges: Vec<Edge>,
    num_h_edges: usize,
    edges_of_cell: Vec<Vec<usize>>,
    edges_of_point: Vec<Vec<usize>>,
    clues: Vec<Option<u8>>,
}

impl Graph {
    /// Builds the graph for a grid. Pure and deterministic.
    pub fn build(grid: &Grid) -> Graph {
        let rows = grid.rows();
        let cols = grid.cols();
        let num_points = ((rows + 1) * (cols + 1)) as usize;
        let num_cells = (rows * cols) as usize;

        let mut edges = Vec::new();

        // Horizontal edges: (R+1) rows of C edges each, row-major.
        for r in 0..=rows {
            for c in 0..cols {
                let u = point_id(r, c, cols);
                let v = point_id(r, c + 1, cols);
                let above = if r > 0 { Some(cell_id(r - 1, c, cols)) } else { None };
                let below = if r < rows { Some(cell_id(r, c, cols)) } else { None };
                edges.push(Edge {
                    endpoints: (u, v),
                    cells: (above, below),
                });
            }
        }
        let num_h_edges = edges.len();

        // Vertical edges: R rows of (C+1) edges each, row-major.
        for r in 0..rows {
            for c in 0..=cols {
                let u = point_id(r, c, cols);
                let v = point_id(r + 1, c, cols);
                let left = if c > 0 { Some(cell_id(r, c - 1, cols)) } else { None };
                let right = if c < cols { Some(cell_id(r, c, cols)) } else { None };
                edges.push(Edge {
                    endpoints: (u, v),
                    cells: (left, right),
                });
            }
        }

        let mut edges_of_cell = vec![Vec::with_capacity(4); num_cells];
        let mut edges_of_point = vec![Vec::new(); num_points];
        for (id, e) in edges.iter().enumerate() {
            if let Some(a) = e.cells.0 {
                edges_of_cell[a].push(id);
            }
            if let Some(b) = e.cells.1 {
                edges_of_cell[b].push(id);
            }
            edges_of_point[e.endpoints.0].push(id);
            edges_of_point[e.endpoints.1].push(id);
        }
        for v in edges_of_point.iter_mut() {
            v.sort_unstable();
        }

        let clues = (0..num_cells)
            .map(|c| grid.hint_at(c))
            .collect();

        Graph {
            rows,
            cols,
            edges,
            num_h_edges,
            edges_of_cell,
            edges_of_point,
            clues,
        }
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
    #[inline]
    pub fn num_points(&self) -> usize {
        self.edges_of_point.len()
    }
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.edges_of_cell.len()
    }

    #[inline]
    pub fn edge(&self, id: usize) -> Edge {
        self.edges[id]
    }
    #[inline]
    pub fn edges_of_cell(&self, cell: usize) -> &[usize] {
        &self.edges_of_cell[cell]
    }
    #[inline]
    pub fn edges_of_point(&self, point: usize) -> &[usize] {
        &self.edges_of_point[point]
    }
    #[inline]
    pub fn degree(&self, point: usize) -> usize {
        self.edges_of_point[point].len()
    }
    #[inline]
    pub fn clue(&self, cell: usize) -> Option<u8> {
        self.clues[cell]
    }

    /// Row-major point id for grid point `(r, c)`, `0 <= r <= rows`, `0 <= c
    /// <= cols`.
    #[inline]
    pub fn point_id(&self, r: i32, c: i32) -> usize {
        point_id(r, c, self.cols)
    }

    /// `(row, col)` of a point id, for use by external renderers.
    #[inline]
    pub fn point_coord(&self, id: usize) -> Point {
        let cols1 = (self.cols + 1) as usize;
        Point((id / cols1) as i32, (id % cols1) as i32)
    }

    /// The id of the horizontal edge between `(r, c)` and `(r, c + 1)`,
    /// `0 <= r <= rows`, `0 <= c < cols`.
    #[inline]
    pub fn h_edge_id(&self, r: i32, c: i32) -> usize {
        (r * self.cols + c) as usize
    }

    /// The id of the vertical edge between `(r, c)` and `(r + 1, c)`,
    /// `0 <= r < rows`, `0 <= c <= cols`.
    #[inline]
    pub fn v_edge_id(&self, r: i32, c: i32) -> usize {
        self.num_h_edges + (r * (self.cols + 1) + c) as usize
    }
}

#[inline]
fn point_id(r: i32, c: i32, cols: i32) -> usize {
    (r * (cols + 1) + c) as usize
}

#[inline]
fn cell_id(r: i32, c: i32, cols: i32) -> usize {
    (r * cols + c) as usize
}
