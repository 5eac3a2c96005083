// Copyright (c) 2016 srither developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Command-line argument parsing (spec.md §6 "CLI surface").
//!
//! `clap`'s derive API replaces the teacher's `argparse`/`docopt`-based
//! `parse_arg.rs`: both of those crates are long unmaintained, while `clap`
//! is the crate this retrieval pack's other CLI solver (`uben0-sudoku`)
//! reaches for to do the same job.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use slither_solver::SolverConfig;

/// Slither Link solver.
#[derive(Debug, Parser)]
#[command(name = "slither", version, about)]
pub struct Cli {
    /// Puzzle file to solve.
    pub path: PathBuf,

    /// Find every solution instead of stopping at the first.
    #[arg(long)]
    pub all: bool,

    /// Worker thread count (0 = auto, derived from --cpu).
    #[arg(long, default_value_t = 0)]
    pub threads: u32,

    /// Fraction of hardware threads to use when --threads is 0.
    #[arg(long = "cpu", default_value_t = 0.5)]
    pub cpu_fraction: f64,

    /// Cap on the number of solutions recorded with --all (unbounded if omitted).
    #[arg(long = "max-solutions")]
    pub max_solutions: Option<i64>,

    /// Search timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Raise the log level to debug/trace.
    #[arg(short, long)]
    pub verbose: bool,

    /// Silence all but warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// The [`SolverConfig`] implied by these flags.
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            threads: self.threads,
            cpu_fraction: self.cpu_fraction,
            find_all: self.all,
            max_solutions: self.max_solutions.unwrap_or(-1),
            timeout: self.timeout.map(Duration::from_secs),
        }
    }

    /// The `log`/`env_logger` level implied by `--verbose`/`--quiet`.
    pub fn log_level(&self) -> log::LevelFilter {
        match (self.verbose, self.quiet) {
            (true, _) => log::LevelFilter::Debug,
            (false, true) => log::LevelFilter::Warn,
            (false, false) => log::LevelFilter::Info,
        }
    }
}
