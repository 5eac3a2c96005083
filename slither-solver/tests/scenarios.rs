// Copyright (c) 2016 srither-solver developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! End-to-end seed scenarios S1-S6 from spec.md §8.

use slither_core::grid::Grid;
use slither_solver::state::EdgeValue;
use slither_solver::{solve_all, solve_first, SolverConfig};

fn grid(input: &str) -> Grid {
    input.parse().expect("test grid must parse")
}

fn single_threaded(find_all: bool) -> SolverConfig {
    SolverConfig {
        threads: 1,
        find_all,
        ..SolverConfig::default()
    }
}

/// S1 - 2x2 trivial: a unique hexagonal loop through the center point.
#[test]
fn s1_two_by_two_trivial() {
    let g = grid("2 2\n33\n11\n");
    let solution = solve_first(&g, &single_threaded(false))
        .unwrap()
        .expect("must have a solution");
    assert_eq!(solution.cycle_points.len(), 6);
    assert!(solution.edge_assignment.iter().all(|&e| e != EdgeValue::Undecided));

    let all = solve_all(&g, &single_threaded(true)).unwrap();
    assert_eq!(all.solutions.len(), 1);
    assert!(all.complete);
}

/// S2 - 3x3 with a unique solution: corners=2, edge-mid cells=1, center=0.
/// The clues are exactly those implied by the 3x3 grid's outer-boundary
/// loop (the center cell's 0 forces all four of its edges off, and the
/// point-degree constraint at each of the four points adjacent to the
/// center then rules out every assignment of the remaining "corner
/// connector" edges except leaving them all off, by the same argument as
/// S6 at a larger scale), so the outer rectangle is the unique completion.
#[test]
fn s2_three_by_three_unique() {
    let g = grid("3 3\n212\n101\n212\n");
    let all = solve_all(&g, &single_threaded(true)).unwrap();
    assert_eq!(all.solutions.len(), 1);
    assert!(all.complete);

    let solution = &all.solutions[0];
    let on_edges = solution.edge_assignment.iter().filter(|&&e| e == EdgeValue::On).count();
    assert_eq!(solution.cycle_points.len(), on_edges);
    // Every point of the (R+1)x(C+1) lattice boundary, and nothing else.
    assert_eq!(solution.cycle_points.len(), 2 * 3 + 2 * 3);
    for p in &solution.cycle_points {
        assert!(p.0 == 0 || p.0 == 3 || p.1 == 0 || p.1 == 3);
    }
}

/// S3 - No-solution 2x2: clue 0 and clue 3 diagonally opposed are
/// unsatisfiable together. Empty result, no errors.
#[test]
fn s3_no_solution() {
    let g = grid("2 2\n03\n30\n");
    assert_eq!(solve_first(&g, &single_threaded(false)).unwrap(), None);
    let all = solve_all(&g, &single_threaded(true)).unwrap();
    assert!(all.solutions.is_empty());
    assert!(all.complete);
}

/// S4 - Multi-solution grid: a blank 4x4 board has many valid loops.
/// `solve_all` must find at least two, and a single-threaded run must
/// reproduce the identical sequence on repeat (spec.md §5 "Ordering
/// guarantees", §8 property 6 "Determinism").
#[test]
fn s4_multi_solution_grid_is_deterministic() {
    let g = grid("4 4\n....\n....\n....\n....\n");
    let config = SolverConfig {
        threads: 1,
        find_all: true,
        max_solutions: 3,
        ..SolverConfig::default()
    };

    let first = solve_all(&g, &config).unwrap();
    assert!(first.solutions.len() >= 2);

    let second = solve_all(&g, &config).unwrap();
    assert_eq!(first.solutions.len(), second.solutions.len());
    for (a, b) in first.solutions.iter().zip(second.solutions.iter()) {
        assert_eq!(a.edge_assignment, b.edge_assignment);
    }
}

/// S5 - Disjoint-cycle trap: two isolated 2x2 all-clue-3 blocks separated by
/// a clue-0 column. The clue-0 column's forced-off edges cascade into both
/// blocks, but no assignment of the two blocks' remaining edges can satisfy
/// every clue and still leave every point at degree 0 or 2 — whether that
/// surfaces as a propagation-time contradiction or a validator rejection of
/// a completed assignment, every branch dead-ends and the puzzle has no
/// solution (spec.md §4.6, §8 S5).
#[test]
fn s5_disjoint_cycle_trap_is_rejected() {
    let g = grid("2 5\n33033\n33033\n");
    assert_eq!(solve_first(&g, &single_threaded(false)).unwrap(), None);
    let all = solve_all(&g, &single_threaded(true)).unwrap();
    assert!(all.solutions.is_empty());
}

/// S6 - Large sparse 6x6 grid (9/36 = 25% clued cells) whose clues are
/// exactly those implied by the board's outer-boundary loop. Within a
/// generous (unbounded) search the solver must find at least one valid
/// solution whose loop traces that boundary.
#[test]
fn s6_large_sparse_grid_solves() {
    let g = grid(
        "6 6\n\
         2.1..2\n\
         ......\n\
         1.0...\n\
         .....1\n\
         ......\n\
         2..1.2\n",
    );
    let solution = solve_first(&g, &single_threaded(false))
        .unwrap()
        .expect("the outer-boundary loop satisfies every given clue");

    // Every point of the (R+1)x(C+1) lattice boundary, and nothing else.
    assert_eq!(solution.cycle_points.len(), 2 * 6 + 2 * 6);
    for p in &solution.cycle_points {
        assert!(p.0 == 0 || p.0 == 6 || p.1 == 0 || p.1 == 6);
    }
}
