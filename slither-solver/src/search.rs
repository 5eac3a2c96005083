// Copyright (c) 2016 srither-solver developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Recursive backtracking search driver (spec.md §4.5) with task-parallel
//! frontier expansion near the root (spec.md §5).
//!
//! Branch cloning follows the teacher's `Solver::clone`/`clone_from` pattern
//! in `solver/src/solver.rs`: a fresh [`State`] is cloned before each
//! recursive branch rather than mutated and undone in place. `rayon`'s
//! scoped thread pool stands in for the "fixed-size task pool" of spec.md
//! §5 — the teacher's own parallel search was never implemented, so this is
//! the piece the design's Open Question calls out as completed rather than
//! copied from the monolith.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use log::{debug, trace};
use rayon::prelude::*;

use crate::graph::Graph;
use crate::heuristic;
use crate::propagator;
use crate::state::{EdgeValue, State};
use crate::validator;
use crate::{Solution, SolverConfig, SolverError};

/// The solutions collected by a search run, plus whether the tree was
/// exhausted or the run stopped early because of a timeout.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub solutions: Vec<Solution>,
    pub complete: bool,
}

/// Shared, mutex-protected solution list plus the atomic early-termination
/// flag (spec.md §5 "Shared resources", §9 "Solution collector").
struct Collector {
    solutions: Mutex<Vec<Solution>>,
    stop_requested: AtomicBool,
    timed_out: AtomicBool,
    find_all: bool,
    max_solutions: i64,
}

impl Collector {
    fn new(find_all: bool, max_solutions: i64) -> Collector {
        Collector {
            solutions: Mutex::new(Vec::new()),
            stop_requested: AtomicBool::new(false),
            timed_out: AtomicBool::new(false),
            find_all,
            max_solutions,
        }
    }

    #[inline]
    fn stop(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Best-effort deadline check: in-flight propagation always completes
    /// before this is consulted (spec.md §5 "Cancellation & early
    /// termination").
    fn check_deadline(&self, deadline: Option<Instant>) -> bool {
        if let Some(d) = deadline {
            if Instant::now() >= d {
                self.timed_out.store(true, Ordering::Release);
                self.stop_requested.store(true, Ordering::Release);
                return true;
            }
        }
        false
    }

    /// Appends `solution` and sets the stop flag under the same lock as the
    /// append when the run is done (single-solution mode, or find-all mode
    /// hitting `max_solutions`).
    fn record(&self, solution: Solution) {
        let mut solutions = self.solutions.lock().expect("solution list poisoned");
        if self.stop_requested.load(Ordering::Acquire) {
            return;
        }
        solutions.push(solution);
        debug!("recorded solution #{}", solutions.len());
        let done = !self.find_all
            || (self.max_solutions >= 0 && solutions.len() as i64 >= self.max_solutions);
        if done {
            self.stop_requested.store(true, Ordering::Release);
        }
    }

    fn into_solutions(self) -> Vec<Solution> {
        self.solutions.into_inner().expect("solution list poisoned")
    }
}

/// Whether `state`'s undecided edge at `e` may legally be set to `On`/`Off`
/// without an immediate point-degree contradiction (spec.md §4.5).
fn branch_feasibility(state: &State, graph: &Graph, e: usize) -> (bool, bool) {
    let edge = graph.edge(e);
    let (u, v) = edge.endpoints;
    let can_on = !(state.point_degree(u) >= 2 || state.point_degree(v) >= 2);
    let can_off = !is_dead_end_if_off(state, u) && !is_dead_end_if_off(state, v);
    (can_on, can_off)
}

fn is_dead_end_if_off(state: &State, p: usize) -> bool {
    state.point_degree(p) == 1 && state.point_undecided(p) == 1
}

fn search(state: &mut State, graph: &Graph, collector: &Collector, deadline: Option<Instant>) {
    if collector.stop() || collector.check_deadline(deadline) {
        return;
    }
    // spec.md §4.5's `quickly_unsolvable` pre-check is subsumed here:
    // `propagate` performs the same counter-bound checks immediately below,
    // so no separate cheap check is needed before it runs.
    if propagator::propagate(state, graph).is_err() {
        return;
    }

    match heuristic::select(state, graph) {
        None => {
            if state.is_complete() {
                if let Ok(solution) = validator::validate(state, graph) {
                    collector.record(solution);
                }
            }
        }
        Some(e) => {
            trace!("branching on edge {e}, {} undecided left", state.undecided_edges());
            let (can_on, can_off) = branch_feasibility(state, graph, e);

            // OFF before ON: most edges of a valid loop are off, so trying
            // OFF first tends to hit contradictions or forced cascades
            // sooner near the root (spec.md §4.5 "Branching order").
            if can_off {
                let mut next = state.clone();
                if propagator::apply_decision(&mut next, graph, e, EdgeValue::Off).is_ok() {
                    search(&mut next, graph, collector, deadline);
                }
                if collector.stop() {
                    return;
                }
            }
            if can_on {
                let mut next = state.clone();
                if propagator::apply_decision(&mut next, graph, e, EdgeValue::On).is_ok() {
                    search(&mut next, graph, collector, deadline);
                }
            }
        }
    }
}

/// Repeatedly expands every frontier state on its heuristic-selected edge
/// until at least `target` independent states exist (or none can be
/// expanded further). Only states for which `apply_decision` succeeded are
/// kept, per spec.md §9's Open Question resolution.
fn expand_frontier(root: State, graph: &Graph, collector: &Collector, target: usize) -> Vec<State> {
    let mut frontier = vec![root];

    loop {
        if frontier.len() >= target || collector.stop() {
            return frontier;
        }

        let mut next = Vec::with_capacity(frontier.len() * 2);
        let mut expanded_any = false;

        for mut state in frontier {
            if propagator::propagate(&mut state, graph).is_err() {
                continue;
            }
            match heuristic::select(&state, graph) {
                None => next.push(state),
                Some(e) => {
                    expanded_any = true;
                    let (can_on, can_off) = branch_feasibility(&state, graph, e);

                    if can_off {
                        let mut off_state = state.clone();
                        if propagator::apply_decision(&mut off_state, graph, e, EdgeValue::Off).is_ok()
                        {
                            next.push(off_state);
                        }
                    }
                    if can_on {
                        let mut on_state = state;
                        if propagator::apply_decision(&mut on_state, graph, e, EdgeValue::On).is_ok() {
                            next.push(on_state);
                        }
                    }
                }
            }
        }

        frontier = next;
        if !expanded_any {
            return frontier;
        }
    }
}

fn resolve_threads(config: &SolverConfig) -> usize {
    if config.threads > 0 {
        return config.threads as usize;
    }
    let available = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (((available as f64) * config.cpu_fraction).round() as usize).max(1)
}

/// Runs the search described by `config` from `root` over `graph`.
pub fn run(root: State, graph: &Graph, config: &SolverConfig) -> Result<SearchOutcome, SolverError> {
    let collector = Collector::new(config.find_all, config.max_solutions);
    let deadline = config.timeout.map(|d| Instant::now() + d);
    let threads = resolve_threads(config);

    if threads <= 1 {
        debug!("running single-threaded search ({} edges)", graph.num_edges());
        let mut state = root;
        search(&mut state, graph, &collector, deadline);
    } else {
        debug!("running parallel search on {threads} threads");
        let frontier = expand_frontier(root, graph, &collector, 4 * threads);
        debug!("frontier expanded to {} states", frontier.len());

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?;
        pool.install(|| {
            frontier.into_par_iter().for_each(|mut state| {
                search(&mut state, graph, &collector, deadline);
            });
        });
    }

    let complete = !collector.timed_out.load(Ordering::Acquire);
    Ok(SearchOutcome {
        solutions: collector.into_solutions(),
        complete,
    })
}
