// Copyright (c) 2016 srither developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Aggregated CLI error type (spec.md §7).
//!
//! Modernizes the teacher's hand-written `AppError`/`From` impls in
//! `src/error.rs` to `thiserror`'s `#[from]`.

use std::io;

use slither_core::grid::ParseGridError;
use slither_solver::SolverError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse puzzle: {0}")]
    ParseGrid(#[from] ParseGridError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

pub type AppResult<T> = Result<T, AppError>;
