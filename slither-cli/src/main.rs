// Copyright (c) 2016 srither developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Slither Link solver command-line front end (spec.md §6).

mod error;
mod parse_arg;
mod pprint;

use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use log::info;

use slither_core::grid::Grid;
use slither_solver::{solve_all, solve_first};

use error::AppResult;
use parse_arg::Cli;

fn run(cli: &Cli) -> AppResult<bool> {
    let text = fs::read_to_string(&cli.path)?;
    let grid: Grid = text.parse()?;
    info!("loaded {}x{} puzzle from {}", grid.rows(), grid.cols(), cli.path.display());

    let config = cli.solver_config();
    let graph = slither_solver::graph::Graph::build(&grid);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let found = if cli.all {
        let outcome = solve_all(&grid, &config)?;
        if !outcome.complete {
            log::warn!("search timed out; showing {} solution(s) found so far", outcome.solutions.len());
        }
        for solution in &outcome.solutions {
            pprint::print(&mut out, &grid, &graph, solution)?;
            writeln!(out)?;
        }
        !outcome.solutions.is_empty()
    } else {
        match solve_first(&grid, &config)? {
            Some(solution) => {
                pprint::print(&mut out, &grid, &graph, &solution)?;
                true
            }
            None => {
                info!("no solution");
                false
            }
        }
    };

    Ok(found)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .init();

    match run(&cli) {
        Ok(_found) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
