// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_codeblock_attributes)]

//! This crate implements a classic 9x9 Sudoku solver whose defining feature
//! is a replayable trace of the search. It supports the following key
//! features:
//!
//! * Parsing and printing 9x9 Sudoku grids
//! * Solving grids with an exhaustive backtracking algorithm
//! * Recording a snapshot of the grid after every tentative placement and
//! every backtrack, in search order, so an external consumer can animate the
//! solving process step by step
//!
//! # Parsing and printing grids
//!
//! See [SudokuGrid::parse] for the exact format of a grid code.
//!
//! Codes can be used to exchange grids, while pretty prints can be used to
//! display a grid in a clearer manner. An example of how to parse and
//! display a grid is provided below.
//!
//! ```
//! use sudoku_replay::SudokuGrid;
//!
//! let grid = SudokuGrid::parse("\
//!     5,3, , ,7, , , , ,\
//!     6, , ,1,9,5, , , ,\
//!      ,9,8, , , , ,6, ,\
//!     8, , , ,6, , , ,3,\
//!     4, , ,8, ,3, , ,1,\
//!     7, , , ,2, , , ,6,\
//!      ,6, , , , ,2,8, ,\
//!      , , ,4,1,9, , ,5,\
//!      , , , ,8, , ,7,9").unwrap();
//! println!("{}", grid);
//! ```
//!
//! # Solving grids
//!
//! The [BacktrackingSolver](solver::BacktrackingSolver) owns a grid and
//! fills its empty cells by recursively testing the digits 1 to 9 in each
//! one, undoing any placement that leads to a dead end. Cells are visited in
//! row-major order and candidate digits in ascending order, so the search -
//! and with it the recorded trace - is fully deterministic.
//!
//! ```
//! use sudoku_replay::SudokuGrid;
//! use sudoku_replay::solver::BacktrackingSolver;
//!
//! let grid = SudokuGrid::parse("\
//!     5,3, , ,7, , , , ,\
//!     6, , ,1,9,5, , , ,\
//!      ,9,8, , , , ,6, ,\
//!     8, , , ,6, , , ,3,\
//!     4, , ,8, ,3, , ,1,\
//!     7, , , ,2, , , ,6,\
//!      ,6, , , , ,2,8, ,\
//!      , , ,4,1,9, , ,5,\
//!      , , , ,8, , ,7,9").unwrap();
//! let mut solver = BacktrackingSolver::new(grid);
//!
//! assert!(solver.solve());
//! assert!(solver.grid().is_full());
//! assert_eq!(Some(4), solver.grid().get_cell(0, 2).unwrap());
//! ```
//!
//! # Replaying the search
//!
//! During [solve](solver::BacktrackingSolver::solve), the solver appends a
//! [Snapshot](solver::Snapshot) to an internal FIFO trace after every
//! placement and every backtrack. Once solving has finished, the trace can
//! be drained one entry at a time with
//! [poll_snapshot](solver::BacktrackingSolver::poll_snapshot), for example
//! by a presentation layer that polls the solver and renders each returned
//! grid.
//!
//! ```
//! use sudoku_replay::SudokuGrid;
//! use sudoku_replay::solver::BacktrackingSolver;
//!
//! let grid = SudokuGrid::parse("\
//!     5,3, , ,7, , , , ,\
//!     6, , ,1,9,5, , , ,\
//!      ,9,8, , , , ,6, ,\
//!     8, , , ,6, , , ,3,\
//!     4, , ,8, ,3, , ,1,\
//!     7, , , ,2, , , ,6,\
//!      ,6, , , , ,2,8, ,\
//!      , , ,4,1,9, , ,5,\
//!      , , , ,8, , ,7,9").unwrap();
//! let mut solver = BacktrackingSolver::new(grid);
//! solver.solve();
//!
//! while let Some(snapshot) = solver.poll_snapshot() {
//!     // Hand the snapshot to whatever renders the animation.
//!     let _ = (snapshot.grid(), snapshot.position(), snapshot.accepted());
//! }
//! ```
//!
//! The snapshots of two solvers constructed with equal starting grids are
//! pairwise equal, which makes the trace a reliable basis for reproducible
//! animations.

pub mod error;
pub mod solver;

use error::{SudokuError, SudokuParseError, SudokuParseResult, SudokuResult};

use serde::{Deserialize, Serialize};

use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};

/// The number of rows and columns of a [SudokuGrid], and also the number of
/// different digits that can be placed in its cells.
pub const SIZE: usize = 9;

/// The width and height of the square, aligned boxes a [SudokuGrid] is
/// divided into.
pub const BLOCK_SIZE: usize = 3;

/// A 9x9 Sudoku grid of cells that may each be empty or hold a digit from 1
/// to 9. The grid is divided into nine aligned 3x3 boxes; in a solved grid,
/// every row, every column, and every box contains each digit exactly once.
///
/// Serialization yields the grid as nine rows of nine numbers, where 0
/// stands for an empty cell. This is also the shape expected when
/// deserializing.
///
/// `SudokuGrid` implements `Display`, rendering the grid with box-drawing
/// characters, such as in this (partial) illustration:
///
/// ```text
/// ╔═══╤═══╤═══╦═══╤═══╤═══╦═══╤═══╤═══╗
/// ║ 5 │ 3 │   ║   │ 7 │   ║   │   │   ║
/// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
/// ║ 6 │   │   ║ 1 │ 9 │ 5 ║   │   │   ║
/// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
/// ║   │ 9 │ 8 ║   │   │   ║   │ 6 │   ║
/// ╠═══╪═══╪═══╬═══╪═══╪═══╬═══╪═══╪═══╣
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(into = "Vec<Vec<u8>>")]
#[serde(try_from = "Vec<Vec<u8>>")]
pub struct SudokuGrid {
    cells: Vec<u8>
}

fn to_char(cell: u8) -> char {
    if cell == 0 {
        ' '
    }
    else {
        (b'0' + cell) as char
    }
}

fn line(start: char, thick_sep: char, thin_sep: char,
        segment: impl Fn(usize) -> char, pad: char, end: char, newline: bool)
        -> String {
    let mut result = String::new();

    for column in 0..SIZE {
        if column == 0 {
            result.push(start);
        }
        else if column % BLOCK_SIZE == 0 {
            result.push(thick_sep);
        }
        else {
            result.push(thin_sep);
        }

        result.push(pad);
        result.push(segment(column));
        result.push(pad);
    }

    result.push(end);

    if newline {
        result.push('\n');
    }

    result
}

fn top_row() -> String {
    line('╔', '╦', '╤', |_| '═', '═', '╗', true)
}

fn thin_separator_line() -> String {
    line('╟', '╫', '┼', |_| '─', '─', '╢', true)
}

fn thick_separator_line() -> String {
    line('╠', '╬', '╪', |_| '═', '═', '╣', true)
}

fn bottom_row() -> String {
    line('╚', '╩', '╧', |_| '═', '═', '╝', false)
}

fn content_row(grid: &SudokuGrid, row: usize) -> String {
    line('║', '║', '│',
        |column| to_char(grid.cells[index(row, column)]), ' ', '║', true)
}

impl Display for SudokuGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            if row == 0 {
                f.write_str(top_row().as_str())?;
            }
            else if row % BLOCK_SIZE == 0 {
                f.write_str(thick_separator_line().as_str())?;
            }
            else {
                f.write_str(thin_separator_line().as_str())?;
            }

            f.write_str(content_row(self, row).as_str())?;
        }

        f.write_str(bottom_row().as_str())?;
        Ok(())
    }
}

fn to_string(cell: &u8) -> String {
    if *cell == 0 {
        String::from("")
    }
    else {
        cell.to_string()
    }
}

pub(crate) fn index(row: usize, column: usize) -> usize {
    row * SIZE + column
}

impl SudokuGrid {

    /// Creates a new, completely empty Sudoku grid.
    pub fn empty() -> SudokuGrid {
        SudokuGrid {
            cells: vec![0; SIZE * SIZE]
        }
    }

    /// Creates a grid from an array of nine rows of nine digits each, where
    /// 0 denotes an empty cell. This is the natural shape for callers that
    /// define their puzzle as a literal.
    ///
    /// Note that it is *not* checked whether the filled cells satisfy the
    /// Sudoku rules - it is possible to construct a grid whose givens
    /// already conflict. Solving such a grid is not meaningful (see
    /// [BacktrackingSolver](solver::BacktrackingSolver)).
    ///
    /// # Errors
    ///
    /// If any entry is greater than 9. In that case,
    /// `SudokuError::InvalidDigit` is returned.
    pub fn from_rows(rows: [[u8; SIZE]; SIZE]) -> SudokuResult<SudokuGrid> {
        let mut cells = Vec::with_capacity(SIZE * SIZE);

        for row in &rows {
            for &cell in row {
                if cell > 9 {
                    return Err(SudokuError::InvalidDigit);
                }

                cells.push(cell);
            }
        }

        Ok(SudokuGrid {
            cells
        })
    }

    /// Parses a code encoding a Sudoku grid. The code is a comma-separated
    /// list of 81 entries, which are either empty, `0`, or a digit from 1 to
    /// 9, where the first two options denote an empty cell. The entries are
    /// assigned left-to-right, top-to-bottom, where each row is completed
    /// before the next one is started. Whitespace in the entries is ignored
    /// to allow for more intuitive formatting.
    ///
    /// As an example, the code `5,3,,...` (with 81 entries in total) parses
    /// to a grid whose top-left cell holds a 5, followed by a 3 and an empty
    /// cell to its right.
    ///
    /// # Errors
    ///
    /// Any specialization of `SudokuParseError` (see that documentation).
    pub fn parse(code: &str) -> SudokuParseResult<SudokuGrid> {
        let entries: Vec<&str> = code.split(',').collect();

        if entries.len() != SIZE * SIZE {
            return Err(SudokuParseError::WrongNumberOfCells);
        }

        let mut cells = Vec::with_capacity(SIZE * SIZE);

        for entry in entries {
            let entry = entry.trim();

            if entry.is_empty() {
                cells.push(0);
                continue;
            }

            let digit = entry.parse::<u8>()?;

            if digit > 9 {
                return Err(SudokuParseError::InvalidDigit);
            }

            cells.push(digit);
        }

        Ok(SudokuGrid {
            cells
        })
    }

    /// Converts the grid into a `String` in a way that is consistent with
    /// [SudokuGrid::parse]. That is, a grid that is converted to a string
    /// and parsed again will not change, as is illustrated below.
    ///
    /// ```
    /// use sudoku_replay::SudokuGrid;
    ///
    /// let mut grid = SudokuGrid::empty();
    ///
    /// // Just some arbitrary changes to create some content.
    /// grid.set_cell(1, 1, 4).unwrap();
    /// grid.set_cell(2, 1, 5).unwrap();
    ///
    /// let grid_str = grid.to_parseable_string();
    /// let grid_parsed = SudokuGrid::parse(grid_str.as_str()).unwrap();
    /// assert_eq!(grid, grid_parsed);
    /// ```
    pub fn to_parseable_string(&self) -> String {
        self.cells.iter()
            .map(to_string)
            .collect::<Vec<String>>()
            .join(",")
    }

    /// Gets the content of the cell at the specified position, where `None`
    /// represents an empty cell.
    ///
    /// # Arguments
    ///
    /// * `row`: The row (y-coordinate) of the desired cell. Must be in the
    /// range `[0, 9[`.
    /// * `column`: The column (x-coordinate) of the desired cell. Must be in
    /// the range `[0, 9[`.
    ///
    /// # Errors
    ///
    /// If either `row` or `column` are not in the specified range. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn get_cell(&self, row: usize, column: usize)
            -> SudokuResult<Option<u8>> {
        if row >= SIZE || column >= SIZE {
            Err(SudokuError::OutOfBounds)
        }
        else {
            let cell = self.cells[index(row, column)];

            if cell == 0 {
                Ok(None)
            }
            else {
                Ok(Some(cell))
            }
        }
    }

    /// Sets the content of the cell at the specified position to the given
    /// digit. If the cell was not empty, the old digit will be overwritten.
    ///
    /// # Arguments
    ///
    /// * `row`: The row (y-coordinate) of the assigned cell. Must be in the
    /// range `[0, 9[`.
    /// * `column`: The column (x-coordinate) of the assigned cell. Must be
    /// in the range `[0, 9[`.
    /// * `digit`: The digit to assign to the specified cell. Must be in the
    /// range `[1, 9]`.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds` If either `row` or `column` are not in
    /// the specified range.
    /// * `SudokuError::InvalidDigit` If `digit` is not in the specified
    /// range.
    pub fn set_cell(&mut self, row: usize, column: usize, digit: u8)
            -> SudokuResult<()> {
        if row >= SIZE || column >= SIZE {
            return Err(SudokuError::OutOfBounds);
        }

        if digit == 0 || digit > 9 {
            return Err(SudokuError::InvalidDigit);
        }

        self.cells[index(row, column)] = digit;
        Ok(())
    }

    /// Clears the content of the cell at the specified position, that is, if
    /// it contains a digit, that digit is removed. If the cell is already
    /// empty, it will be left that way.
    ///
    /// # Arguments
    ///
    /// * `row`: The row (y-coordinate) of the cleared cell. Must be in the
    /// range `[0, 9[`.
    /// * `column`: The column (x-coordinate) of the cleared cell. Must be in
    /// the range `[0, 9[`.
    ///
    /// # Errors
    ///
    /// If either `row` or `column` are not in the specified range. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn clear_cell(&mut self, row: usize, column: usize)
            -> SudokuResult<()> {
        if row >= SIZE || column >= SIZE {
            return Err(SudokuError::OutOfBounds);
        }

        self.cells[index(row, column)] = 0;
        Ok(())
    }

    /// Counts the number of clues given by this grid. This is the number of
    /// non-empty cells.
    pub fn count_clues(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Indicates whether this grid is full, i.e. every cell is filled with a
    /// digit. In this case, [SudokuGrid::count_clues] returns 81.
    pub fn is_full(&self) -> bool {
        !self.cells.iter().any(|&c| c == 0)
    }

    /// Indicates whether this grid is empty, i.e. no cell is filled with a
    /// digit. In this case, [SudokuGrid::count_clues] returns 0.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    /// Indicates whether this grid configuration is a subset of another one.
    /// That is, all cells filled in this grid with some digit must be filled
    /// in `other` with the same digit. If this condition is met, `true` is
    /// returned, and `false` otherwise.
    pub fn is_subset(&self, other: &SudokuGrid) -> bool {
        self.cells.iter()
            .zip(other.cells.iter())
            .all(|(&self_cell, &other_cell)|
                self_cell == 0 || self_cell == other_cell)
    }

    /// Indicates whether this grid configuration is a superset of another
    /// one. That is, all cells filled in the `other` grid with some digit
    /// must be filled in this one with the same digit. If this condition is
    /// met, `true` is returned, and `false` otherwise.
    pub fn is_superset(&self, other: &SudokuGrid) -> bool {
        other.is_subset(self)
    }

    /// Gets a reference to the slice which holds the cells. They are in
    /// left-to-right, top-to-bottom order, where rows are together, and 0
    /// represents an empty cell.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}

impl From<SudokuGrid> for Vec<Vec<u8>> {
    fn from(grid: SudokuGrid) -> Vec<Vec<u8>> {
        grid.cells.chunks(SIZE)
            .map(|row| row.to_vec())
            .collect()
    }
}

impl TryFrom<Vec<Vec<u8>>> for SudokuGrid {
    type Error = SudokuError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<SudokuGrid, SudokuError> {
        if rows.len() != SIZE || rows.iter().any(|row| row.len() != SIZE) {
            return Err(SudokuError::InvalidDimensions);
        }

        let mut cells = Vec::with_capacity(SIZE * SIZE);

        for row in rows {
            for cell in row {
                if cell > 9 {
                    return Err(SudokuError::InvalidDigit);
                }

                cells.push(cell);
            }
        }

        Ok(SudokuGrid {
            cells
        })
    }
}
