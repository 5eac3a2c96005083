// Copyright (c) 2016 srither developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! ASCII-art solution printer (spec.md §6 "Solution printer input").
//!
//! Shape grounded in the teacher's `cli/src/pprint.rs` `Table`/`EdgeRow`/
//! `CellRow`/`Corner` grid walker; its `term`-based ANSI coloring is dropped
//! (no idiomatic modern equivalent in this pack for the Windows console
//! detection it relied on) in favor of plain `+`/`-`/`|` characters, per
//! `DESIGN.md`.

use std::io::{self, Write};

use slither_core::geom::Geom;
use slither_core::grid::Grid;
use slither_solver::graph::Graph;
use slither_solver::state::EdgeValue;
use slither_solver::Solution;

/// Writes `solution`'s loop as ASCII art, indexing edges through `graph`'s
/// public `(row, col)` tables (spec.md §2.2's edge enumeration contract).
pub fn print<W: Write>(out: &mut W, grid: &Grid, graph: &Graph, solution: &Solution) -> io::Result<()> {
    let rows = grid.rows();
    let cols = grid.cols();

    for r in 0..=rows {
        for c in 0..cols {
            write!(out, "+")?;
            let on = solution.edge_assignment[graph.h_edge_id(r, c)] == EdgeValue::On;
            write!(out, "{}", if on { "--" } else { "  " })?;
        }
        writeln!(out, "+")?;

        if r < rows {
            for c in 0..=cols {
                let on = solution.edge_assignment[graph.v_edge_id(r, c)] == EdgeValue::On;
                write!(out, "{}", if on { "|" } else { " " })?;
                if c < cols {
                    match grid.hint_at((r * cols + c) as usize) {
                        Some(k) => write!(out, " {k}")?,
                        None => write!(out, "  ")?,
                    }
                }
            }
            writeln!(out)?;
        }
    }
    Ok(())
}
