// Copyright (c) 2016 srither-solver developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Slither Link solver logic.
//!
//! This crate owns everything downstream of the immutable clue grid: the
//! derived [`graph`], the mutable search [`state`], the [`propagator`], the
//! [`heuristic`] edge-selection policy, the task-parallel search driver and
//! the loop [`validator`] — plus the public `solve_first`/`solve_all` entry
//! points and [`SolverConfig`] that tie them together.

pub mod graph;
pub mod heuristic;
pub mod propagator;
mod search;
pub mod state;
pub mod validator;

use std::time::Duration;

use thiserror::Error;

use slither_core::geom::Point;
use slither_core::grid::Grid;

use graph::Graph;
use state::{EdgeValue, State};

/// A validated, complete loop assignment.
///
/// `edge_assignment` is indexed by edge id, using the graph's public
/// horizontal-then-vertical edge order (spec.md §3). `cycle_points` lists the
/// unique cycle's grid points in traversal order, starting from the
/// lowest-id on-point and proceeding toward its lowest-id neighbor first
/// (spec.md §4.6).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Solution {
    pub edge_assignment: Vec<EdgeValue>,
    pub cycle_points: Vec<Point>,
}

/// Knobs for `solve_first`/`solve_all` (spec.md §6).
#[derive(Clone, Copy, Debug)]
pub struct SolverConfig {
    /// Worker thread count; `0` derives a pool size from `cpu_fraction`.
    pub threads: u32,
    /// Fraction of hardware threads to use when `threads == 0`.
    pub cpu_fraction: f64,
    /// Enumerate every solution instead of stopping at the first.
    pub find_all: bool,
    /// Cap on solutions recorded in find-all mode; `-1` means unlimited.
    pub max_solutions: i64,
    /// Wall-clock budget for the whole search; `None` means unbounded.
    pub timeout: Option<Duration>,
}

impl Default for SolverConfig {
    fn default() -> SolverConfig {
        SolverConfig {
            threads: 0,
            cpu_fraction: 0.5,
            find_all: false,
            max_solutions: -1,
            timeout: None,
        }
    }
}

/// Fatal solver errors (spec.md §7): resource exhaustion, never "no
/// solution" — an empty [`SolveOutcome::solutions`] is a legitimate result.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("failed to build the search thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// The result of a search run: the solutions found, plus whether the search
/// exhausted the tree or returned early because of a timeout (spec.md §7).
#[derive(Clone, Debug)]
pub struct SolveOutcome {
    pub solutions: Vec<Solution>,
    pub complete: bool,
}

/// Finds the first valid solution, or `None` if the grid has none.
///
/// Equivalent to `solve_all` with `find_all` forced off; early-terminates as
/// soon as one solution is recorded.
pub fn solve_first(grid: &Grid, config: &SolverConfig) -> Result<Option<Solution>, SolverError> {
    let mut first_only = *config;
    first_only.find_all = false;
    let outcome = solve_all(grid, &first_only)?;
    Ok(outcome.solutions.into_iter().next())
}

/// Finds every valid solution, bounded by `config.max_solutions` when
/// `config.find_all` is set.
pub fn solve_all(grid: &Grid, config: &SolverConfig) -> Result<SolveOutcome, SolverError> {
    let graph = Graph::build(grid);
    let root = State::new(&graph);
    let outcome = search::run(root, &graph, config)?;
    Ok(SolveOutcome {
        solutions: outcome.solutions,
        complete: outcome.complete,
    })
}
