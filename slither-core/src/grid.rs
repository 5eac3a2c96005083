// Copyright (c) 2016 srither-core developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! The immutable clue grid (spec.md §3 "Grid").

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::geom::{Geom, Point, Size};

/// A cell's clue: a digit in `0..=3`, or blank.
pub type Hint = Option<u8>;

/// An `R x C` grid of clues. Immutable once parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    size: Size,
    hints: Vec<Hint>,
}

impl Grid {
    /// Creates a blank grid of the given size.
    pub fn new(size: Size) -> Grid {
        assert!(size.0 > 0 && size.1 > 0, "grid dimensions must be positive");
        Grid {
            size,
            hints: vec![None; (size.0 * size.1) as usize],
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.size.0
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.size.1
    }

    /// Clue at cell index `r * cols + c`.
    #[inline]
    pub fn hint_at(&self, cell: usize) -> Hint {
        self.hints[cell]
    }

    /// Clue at the cell containing grid point `p`.
    #[inline]
    pub fn hint(&self, p: Point) -> Hint {
        self.hints[self.point_to_cell(p).expect("point out of bounds")]
    }

    /// Sets the clue at cell index `r * cols + c`.
    pub fn set_hint_at(&mut self, cell: usize, hint: Hint) {
        if let Some(n) = hint {
            assert!(n <= 3, "clue must be in 0..=3, got {n}");
        }
        self.hints[cell] = hint;
    }
}

impl Geom for Grid {
    #[inline]
    fn size(&self) -> Size {
        self.size
    }
}

/// An error parsing a [`Grid`] from its text representation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseGridError {
    #[error("expected a header line \"R C\"")]
    MissingHeader,
    #[error("invalid header line (expected two positive integers)")]
    InvalidHeader,
    #[error("row {0} has {1} characters, expected {2}")]
    RowLengthMismatch(usize, usize, usize),
    #[error("expected {0} rows, found {1}")]
    RowCountMismatch(usize, usize),
    #[error("invalid clue character {0:?} at row {1}, column {2}")]
    InvalidClue(char, usize, usize),
}

fn is_blank(c: char) -> bool {
    matches!(c, '.' | '-' | 'x' | 'X')
}

impl FromStr for Grid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Grid, ParseGridError> {
        use ParseGridError::*;

        let mut lines = s.lines().map(str::trim).filter(|l| !l.is_empty());

        let header = lines.next().ok_or(MissingHeader)?;
        let mut header_fields = header.split_whitespace();
        let rows: usize = header_fields
            .next()
            .and_then(|f| f.parse().ok())
            .filter(|&n: &usize| n > 0)
            .ok_or(InvalidHeader)?;
        let cols: usize = header_fields
            .next()
            .and_then(|f| f.parse().ok())
            .filter(|&n: &usize| n > 0)
            .ok_or(InvalidHeader)?;
        if header_fields.next().is_some() {
            return Err(InvalidHeader);
        }

        let mut hints = Vec::with_capacity(rows * cols);
        let mut row_count = 0;
        for (r, line) in lines.by_ref().enumerate() {
            if r >= rows {
                break;
            }
            let chars: Vec<char> = line.split_whitespace().collect::<String>().chars().collect();
            if chars.len() != cols {
                return Err(RowLengthMismatch(r, chars.len(), cols));
            }
            for (col, ch) in chars.into_iter().enumerate() {
                let hint = match ch {
                    '0'..='3' => Some(ch.to_digit(10).unwrap() as u8),
                    ch if is_blank(ch) => None,
                    ch => return Err(InvalidClue(ch, r, col)),
                };
                hints.push(hint);
            }
            row_count += 1;
        }

        if row_count != rows {
            return Err(RowCountMismatch(rows, row_count));
        }

        Ok(Grid {
            size: Size(rows as i32, cols as i32),
            hints,
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} {}", self.rows(), self.cols())?;
        for r in 0..self.rows() {
            for c in 0..self.cols() {
                match self.hint(Point(r, c)) {
                    Some(n) => write!(f, "{n}")?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
