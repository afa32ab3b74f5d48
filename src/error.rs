//! This module contains some error and result definitions used in this crate.

use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;

/// Miscellaneous errors that can occur on some methods in the
/// [root module](../index.html). This does not exclude errors that occur when
/// parsing Sudoku grids, see [SudokuParseError](enum.SudokuParseError.html)
/// for that.
#[derive(Debug, Eq, PartialEq)]
pub enum SudokuError {

    /// Indicates that the cell data provided for a grid does not have the
    /// shape of a 9x9 grid, i.e. nine rows of nine cells each.
    InvalidDimensions,

    /// Indicates that the specified coordinates (row and column) lie outside
    /// the 9x9 grid. This is the case if either is greater than or equal to
    /// 9.
    OutOfBounds,

    /// Indicates that some digit is invalid for a grid cell. For assignments
    /// this is the case if it is 0 or greater than 9, for initial grid
    /// content if it is greater than 9 (0 denotes an empty cell there).
    InvalidDigit
}

impl Display for SudokuError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SudokuError::InvalidDimensions =>
                write!(f, "cell data does not form a 9x9 grid"),
            SudokuError::OutOfBounds =>
                write!(f, "cell coordinates out of bounds"),
            SudokuError::InvalidDigit =>
                write!(f, "invalid digit for cell")
        }
    }
}

/// Syntactic sugar for `Result<V, SudokuError>`.
pub type SudokuResult<V> = Result<V, SudokuError>;

/// An enumeration of the errors that may occur when parsing a `SudokuGrid`.
#[derive(Debug, Eq, PartialEq)]
pub enum SudokuParseError {

    /// Indicates that the number of cells (which are separated by commas)
    /// does not equal 81, the number of cells of a 9x9 grid.
    WrongNumberOfCells,

    /// Indicates that one of the cell entries could not be parsed as a
    /// number.
    NumberFormatError,

    /// Indicates that a cell is filled with an invalid digit (more than 9).
    InvalidDigit
}

impl From<ParseIntError> for SudokuParseError {
    fn from(_: ParseIntError) -> Self {
        SudokuParseError::NumberFormatError
    }
}

/// Syntactic sugar for `Result<V, SudokuParseError>`.
pub type SudokuParseResult<V> = Result<V, SudokuParseError>;
