//! This module contains the logic for solving Sudoku grids.
//!
//! Most importantly, this module contains the definition of the
//! [BacktrackingSolver](struct.BacktrackingSolver.html), which fills a grid
//! by exhaustive backtracking search and records a
//! [Snapshot](struct.Snapshot.html) of the grid after every placement and
//! every backtrack. The snapshots form a FIFO trace that an external
//! consumer can drain to replay the search step by step.

use crate::{BLOCK_SIZE, SIZE, SudokuGrid, index};

use serde::{Deserialize, Serialize};

use std::collections::VecDeque;

/// The coordinates of one cell of a [SudokuGrid], with `row` and `column`
/// both in the range `[0, 9[`. Row 0 is the topmost row and column 0 the
/// leftmost column.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Position {

    /// The row (y-coordinate) of the cell.
    pub row: usize,

    /// The column (x-coordinate) of the cell.
    pub column: usize
}

/// An immutable record of one mutation the [BacktrackingSolver] applied to
/// its grid during the search. A snapshot is taken directly after every
/// tentative placement and directly after every backtrack, so replaying all
/// snapshots of a solve in order reproduces the complete search history.
///
/// Each snapshot owns a full copy of the grid as it was at that instant, not
/// a view into the live grid, which continues to change as the search
/// progresses.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Snapshot {
    grid: SudokuGrid,
    position: Position,
    accepted: bool
}

impl Snapshot {

    /// Gets the state of the entire grid at the instant this snapshot was
    /// taken.
    pub fn grid(&self) -> &SudokuGrid {
        &self.grid
    }

    /// Gets the position of the cell that was modified in the event this
    /// snapshot records.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Indicates the kind of event this snapshot records: `true` if a digit
    /// was tentatively placed in the cell at [Snapshot::position], `false`
    /// if a previous placement there was undone because it led to a dead
    /// end.
    pub fn accepted(&self) -> bool {
        self.accepted
    }
}

/// A solver that fills the empty cells of a 9x9 [SudokuGrid] by recursively
/// testing all digits for each cell and undoing placements that lead to dead
/// ends. Its worst-case runtime is exponential, but for ordinary puzzles it
/// finishes quickly.
///
/// The search is fully deterministic: empty cells are visited in row-major
/// order (row 0 to 8, within each row column 0 to 8) and candidate digits
/// are tried in ascending order. Two solvers constructed with equal starting
/// grids therefore produce equal final grids and equal snapshot traces.
/// Consumers replaying the trace rely on this order, so it is part of the
/// solver's contract.
///
/// The solver takes ownership of its starting grid; callers that want to
/// keep the original around clone it before handing it over.
///
/// Note that consistency of the givens is *not* checked. A starting grid
/// whose filled cells already conflict (for example two equal digits in one
/// row) makes the search meaningless: it may run for a very long time and
/// can even "complete" such a grid, since givens are never compared against
/// each other.
pub struct BacktrackingSolver {
    grid: SudokuGrid,
    trace: VecDeque<Snapshot>,
    solved: bool
}

impl BacktrackingSolver {

    /// Creates a new solver for the given starting grid, with an empty trace
    /// and in unsolved state. Nothing is computed until
    /// [solve](BacktrackingSolver::solve) is called.
    pub fn new(grid: SudokuGrid) -> BacktrackingSolver {
        BacktrackingSolver {
            grid,
            trace: VecDeque::new(),
            solved: false
        }
    }

    /// Runs the backtracking search to completion, mutating the grid towards
    /// its solved state and appending a [Snapshot] to the trace for every
    /// placement and every backtrack along the way. Returns `true` if a
    /// complete valid assignment was found and `false` if the search space
    /// was exhausted without one, in which case the grid is back in its
    /// starting state and the trace still holds every attempted step.
    ///
    /// Calling this again after a successful solve is a no-op that returns
    /// `true` without recording further snapshots.
    pub fn solve(&mut self) -> bool {
        if self.solved {
            return true;
        }

        self.solve_rec();
        self.solved
    }

    fn solve_rec(&mut self) -> bool {
        let position = match self.find_empty() {
            Some(position) => position,
            None => {
                // Every cell is filled and every placement was validated on
                // the way here, so the grid is solved.
                self.solved = true;
                return true;
            }
        };

        for digit in 1..=9 {
            if !self.is_valid(digit, position) {
                continue;
            }

            self.grid.set_cell(position.row, position.column, digit).unwrap();
            self.record(position, true);

            if self.solve_rec() {
                // The placement stands as part of the solution.
                return true;
            }

            self.grid.clear_cell(position.row, position.column).unwrap();
            self.record(position, false);
        }

        false
    }

    fn record(&mut self, position: Position, accepted: bool) {
        self.trace.push_back(Snapshot {
            grid: self.grid.clone(),
            position,
            accepted
        });
    }

    /// Finds the first empty cell in row-major order, or `None` if the grid
    /// is full. This scan order determines the order in which the search
    /// fills cells, and with it the snapshot sequence.
    fn find_empty(&self) -> Option<Position> {
        for row in 0..SIZE {
            for column in 0..SIZE {
                if self.grid.cells()[index(row, column)] == 0 {
                    return Some(Position {
                        row,
                        column
                    });
                }
            }
        }

        None
    }

    /// Checks whether `digit` may be placed in the cell at `position` under
    /// the current grid state, i.e. no other cell in the same row, column,
    /// or 3x3 box holds `digit`. The cell at `position` itself is excluded
    /// from the comparison, as it may already hold the candidate being
    /// tested.
    fn is_valid(&self, digit: u8, position: Position) -> bool {
        let cells = self.grid.cells();

        for column in 0..SIZE {
            if column != position.column &&
                    cells[index(position.row, column)] == digit {
                return false;
            }
        }

        for row in 0..SIZE {
            if row != position.row &&
                    cells[index(row, position.column)] == digit {
                return false;
            }
        }

        let box_row = position.row / BLOCK_SIZE * BLOCK_SIZE;
        let box_column = position.column / BLOCK_SIZE * BLOCK_SIZE;

        for row in box_row..(box_row + BLOCK_SIZE) {
            for column in box_column..(box_column + BLOCK_SIZE) {
                if (row != position.row || column != position.column) &&
                        cells[index(row, column)] == digit {
                    return false;
                }
            }
        }

        true
    }

    /// Indicates whether this solver has found a complete valid assignment.
    /// This is `false` until [solve](BacktrackingSolver::solve) returns
    /// successfully and permanently `true` afterwards. A presentation layer
    /// typically queries this once the trace is exhausted, to decide how to
    /// finalize its display.
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Gets a reference to the grid in its current state. After a successful
    /// [solve](BacktrackingSolver::solve) this is the complete solution;
    /// after a failed one it is the unmodified starting grid.
    pub fn grid(&self) -> &SudokuGrid {
        &self.grid
    }

    /// Removes and returns the oldest not-yet-consumed [Snapshot] from the
    /// trace, or `None` if the trace is currently exhausted. Snapshots are
    /// returned in the chronological order of the search.
    pub fn poll_snapshot(&mut self) -> Option<Snapshot> {
        self.trace.pop_front()
    }

    /// The number of snapshots that have been recorded but not yet consumed
    /// via [poll_snapshot](BacktrackingSolver::poll_snapshot).
    pub fn remaining_snapshots(&self) -> usize {
        self.trace.len()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    // The example puzzle and its unique solution are the classic ones from
    // the Wikipedia article on Sudoku.

    fn classic_puzzle() -> SudokuGrid {
        SudokuGrid::parse("\
            5,3, , ,7, , , , ,\
            6, , ,1,9,5, , , ,\
             ,9,8, , , , ,6, ,\
            8, , , ,6, , , ,3,\
            4, , ,8, ,3, , ,1,\
            7, , , ,2, , , ,6,\
             ,6, , , , ,2,8, ,\
             , , ,4,1,9, , ,5,\
             , , , ,8, , ,7,9").unwrap()
    }

    fn classic_solution() -> SudokuGrid {
        SudokuGrid::parse("\
            5,3,4,6,7,8,9,1,2,\
            6,7,2,1,9,5,3,4,8,\
            1,9,8,3,4,2,5,6,7,\
            8,5,9,7,6,1,4,2,3,\
            4,2,6,8,5,3,7,9,1,\
            7,1,3,9,2,4,8,5,6,\
            9,6,1,5,3,7,2,8,4,\
            2,8,7,4,1,9,6,3,5,\
            3,4,5,2,8,6,1,7,9").unwrap()
    }

    // An unsolvable puzzle that exhausts quickly: row 0 is missing only the
    // digits 1 and 2, but column 1 already contains both, so the two empty
    // cells of row 0 cannot both be filled.

    fn unsolvable_puzzle() -> SudokuGrid {
        let mut grid = SudokuGrid::empty();

        for column in 2..SIZE {
            grid.set_cell(0, column, column as u8 + 1).unwrap();
        }

        grid.set_cell(3, 1, 1).unwrap();
        grid.set_cell(6, 1, 2).unwrap();
        grid
    }

    fn assert_digits_unique(cells: &[Option<u8>; SIZE]) {
        let mut seen = [false; SIZE + 1];

        for cell in cells {
            let digit = cell.expect("solved grid has empty cell") as usize;
            assert!(!seen[digit], "solved grid repeats digit {}", digit);
            seen[digit] = true;
        }
    }

    fn assert_valid_solution(grid: &SudokuGrid) {
        assert!(grid.is_full());

        for row in 0..SIZE {
            let mut cells = [None; SIZE];

            for column in 0..SIZE {
                cells[column] = grid.get_cell(row, column).unwrap();
            }

            assert_digits_unique(&cells);
        }

        for column in 0..SIZE {
            let mut cells = [None; SIZE];

            for row in 0..SIZE {
                cells[row] = grid.get_cell(row, column).unwrap();
            }

            assert_digits_unique(&cells);
        }

        for box_row in (0..SIZE).step_by(BLOCK_SIZE) {
            for box_column in (0..SIZE).step_by(BLOCK_SIZE) {
                let mut cells = [None; SIZE];

                for i in 0..SIZE {
                    let row = box_row + i / BLOCK_SIZE;
                    let column = box_column + i % BLOCK_SIZE;
                    cells[i] = grid.get_cell(row, column).unwrap();
                }

                assert_digits_unique(&cells);
            }
        }
    }

    fn drain_trace(solver: &mut BacktrackingSolver) -> Vec<Snapshot> {
        let mut snapshots = Vec::new();

        while let Some(snapshot) = solver.poll_snapshot() {
            snapshots.push(snapshot);
        }

        snapshots
    }

    #[test]
    fn solves_classic_puzzle() {
        let mut solver = BacktrackingSolver::new(classic_puzzle());

        assert!(solver.solve());
        assert!(solver.is_solved());
        assert_eq!(&classic_solution(), solver.grid());
        assert_valid_solution(solver.grid());
    }

    #[test]
    fn solution_preserves_givens() {
        let puzzle = classic_puzzle();
        let mut solver = BacktrackingSolver::new(puzzle.clone());

        solver.solve();

        assert!(puzzle.is_subset(solver.grid()));
    }

    #[test]
    fn solves_empty_grid() {
        let mut solver = BacktrackingSolver::new(SudokuGrid::empty());

        assert!(solver.solve());
        assert_valid_solution(solver.grid());

        // With ascending candidate order, the first row of the completion of
        // the empty grid is simply 1 to 9.
        for column in 0..SIZE {
            assert_eq!(Some(column as u8 + 1),
                solver.grid().get_cell(0, column).unwrap());
        }
    }

    #[test]
    fn full_grid_solves_without_snapshots() {
        let mut solver = BacktrackingSolver::new(classic_solution());

        assert!(solver.solve());
        assert!(solver.is_solved());
        assert_eq!(0, solver.remaining_snapshots());
        assert_eq!(&classic_solution(), solver.grid());
    }

    #[test]
    fn first_snapshot_follows_scan_order() {
        let mut solver = BacktrackingSolver::new(classic_puzzle());

        solver.solve();

        let first = solver.poll_snapshot().unwrap();

        // The first empty cell of the classic puzzle in row-major order is
        // (0, 2), and 1 is valid there, so it is the first digit placed.
        assert_eq!(Position { row: 0, column: 2 }, first.position());
        assert!(first.accepted());
        assert_eq!(Some(1), first.grid().get_cell(0, 2).unwrap());
        assert_eq!(classic_puzzle().count_clues() + 1,
            first.grid().count_clues());
    }

    #[test]
    fn search_is_deterministic() {
        let mut solver_1 = BacktrackingSolver::new(classic_puzzle());
        let mut solver_2 = BacktrackingSolver::new(classic_puzzle());

        solver_1.solve();
        solver_2.solve();

        assert_eq!(solver_1.grid(), solver_2.grid());
        assert_eq!(drain_trace(&mut solver_1), drain_trace(&mut solver_2));
    }

    #[test]
    fn second_solve_is_a_no_op() {
        let mut solver = BacktrackingSolver::new(classic_puzzle());

        assert!(solver.solve());

        let snapshots = solver.remaining_snapshots();
        let grid = solver.grid().clone();

        assert!(solver.solve());
        assert_eq!(snapshots, solver.remaining_snapshots());
        assert_eq!(&grid, solver.grid());
    }

    #[test]
    fn trace_replay_reconstructs_states() {
        let puzzle = classic_puzzle();
        let mut solver = BacktrackingSolver::new(puzzle.clone());

        solver.solve();

        let snapshots = drain_trace(&mut solver);
        let mut replayed = puzzle;

        assert!(!snapshots.is_empty());

        for snapshot in &snapshots {
            let Position { row, column } = snapshot.position();

            if snapshot.accepted() {
                let digit = snapshot.grid().get_cell(row, column).unwrap()
                    .expect("placement snapshot has empty changed cell");
                replayed.set_cell(row, column, digit).unwrap();
            }
            else {
                replayed.clear_cell(row, column).unwrap();
            }

            assert_eq!(&replayed, snapshot.grid());
        }

        // The last snapshot of a successful solve is the final placement.
        assert_eq!(&replayed, solver.grid());
    }

    #[test]
    fn unsolvable_puzzle_exhausts_search() {
        let puzzle = unsolvable_puzzle();
        let mut solver = BacktrackingSolver::new(puzzle.clone());

        assert!(!solver.solve());
        assert!(!solver.is_solved());
        assert_eq!(&puzzle, solver.grid());

        let snapshots = drain_trace(&mut solver);

        // Both candidates for (0, 0) are placed and taken back again.
        assert_eq!(4, snapshots.len());
        assert_eq!(vec![true, false, true, false],
            snapshots.iter().map(Snapshot::accepted).collect::<Vec<_>>());

        for snapshot in &snapshots {
            assert_eq!(Position { row: 0, column: 0 }, snapshot.position());
            assert!(!snapshot.grid().is_full());
        }

        assert_eq!(Some(1), snapshots[0].grid().get_cell(0, 0).unwrap());
        assert_eq!(Some(2), snapshots[2].grid().get_cell(0, 0).unwrap());
    }

    #[test]
    fn snapshot_serializes_with_grid_position_and_flag() {
        let mut solver = BacktrackingSolver::new(classic_puzzle());

        solver.solve();

        let snapshot = solver.poll_snapshot().unwrap();
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(9, json["grid"].as_array().unwrap().len());
        assert_eq!(0, json["position"]["row"]);
        assert_eq!(2, json["position"]["column"]);
        assert_eq!(true, json["accepted"]);

        let deserialized: Snapshot = serde_json::from_value(json).unwrap();
        assert_eq!(snapshot, deserialized);
    }
}
