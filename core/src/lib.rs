#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Carver workspace.
//!
//! This crate defines the vocabulary that connects the authoritative maze
//! state, the generator system, and the adapters that present it. The world
//! crate stores cells and the backtracking path, the generator advances the
//! carving state machine one [`StepResult`] at a time, and adapters read
//! [`CellView`] snapshots to draw each frame.

use std::fmt;

use thiserror::Error;

/// Location of a single maze cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Reports the direction leading from `self` to an orthogonally adjacent cell.
    ///
    /// Returns `None` when the cells are identical or not direct neighbours.
    #[must_use]
    pub fn direction_to(self, other: CellCoord) -> Option<Direction> {
        if self.manhattan_distance(other) != 1 {
            return None;
        }

        if self.row == other.row {
            if other.column > self.column {
                Some(Direction::East)
            } else {
                Some(Direction::West)
            }
        } else if other.row > self.row {
            Some(Direction::South)
        } else {
            Some(Direction::North)
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Cardinal directions linking a cell to its neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward decreasing row indices.
    North,
    /// Toward increasing row indices.
    South,
    /// Toward decreasing column indices.
    West,
    /// Toward increasing column indices.
    East,
}

impl Direction {
    /// Neighbour scan order used whenever candidates are enumerated.
    pub const SCAN_ORDER: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Signed `(row, column)` offset of a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Self::North => (-1, 0),
            Self::South => (1, 0),
            Self::West => (0, -1),
            Self::East => (0, 1),
        }
    }
}

/// Validated size of a rectangular maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    rows: u32,
    columns: u32,
    cells: usize,
}

impl Dimensions {
    /// Validates and constructs maze dimensions.
    ///
    /// Both sides must be positive and the total cell count must be
    /// addressable on the current platform.
    pub fn new(rows: u32, columns: u32) -> Result<Self, GenerationError> {
        if rows == 0 || columns == 0 {
            return Err(GenerationError::InvalidDimensions { rows, columns });
        }

        let total = u64::from(rows) * u64::from(columns);
        let cells =
            usize::try_from(total).map_err(|_| GenerationError::Allocation { cells: total })?;

        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    /// Number of rows in the maze.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the maze.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Total number of cells, `rows * columns`.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.cells
    }

    /// Reports whether the signed coordinate lies inside the maze.
    ///
    /// Signed inputs let callers probe one step past any edge without
    /// wrapping around to a huge unsigned value.
    #[must_use]
    pub fn contains(&self, row: i64, column: i64) -> bool {
        row >= 0 && column >= 0 && row < i64::from(self.rows) && column < i64::from(self.columns)
    }

    /// Row-major storage index of an in-range coordinate.
    #[must_use]
    pub fn index_of(&self, coord: CellCoord) -> Option<usize> {
        if coord.row() >= self.rows || coord.column() >= self.columns {
            return None;
        }

        let row = usize::try_from(coord.row()).ok()?;
        let column = usize::try_from(coord.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

/// Read-only snapshot of a single cell's wall and visit state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellView {
    /// Whether the generator has reached the cell.
    pub visited: bool,
    /// Whether the wall on the east side of the cell is still standing.
    pub wall_right: bool,
    /// Whether the wall on the south side of the cell is still standing.
    pub wall_bottom: bool,
}

impl CellView {
    /// State of every cell before generation starts: unvisited, fully walled.
    pub const UNTOUCHED: Self = Self {
        visited: false,
        wall_right: true,
        wall_bottom: true,
    };
}

impl Default for CellView {
    fn default() -> Self {
        Self::UNTOUCHED
    }
}

/// Phase of the carving state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Extending the path into unvisited neighbours.
    Carving,
    /// Walking back through the path history in search of unexplored neighbours.
    Backtracking,
    /// Every cell has been visited; the maze is complete.
    Done,
}

/// Passage opened between two adjacent cells during a carving step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CarvedEdge {
    /// Cell the generator carved from.
    pub from: CellCoord,
    /// Newly visited cell the generator carved into.
    pub to: CellCoord,
}

/// Outcome of a single generator step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StepResult {
    /// Phase the generator occupies after the step.
    pub phase: Phase,
    /// Passage opened by the step, if it carved.
    pub carved_edge: Option<CarvedEdge>,
    /// Number of cells visited so far.
    pub visited_count: usize,
    /// Cell the generator is positioned on after the step.
    pub current: CellCoord,
}

/// Failures reported by the backtracking path stack.
///
/// Every variant indicates a logic defect in the caller: the carving
/// algorithm pushes each cell at most once and never pops or probes past
/// what it pushed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum StackError {
    /// A push was attempted while every slot was occupied.
    #[error("backtrack stack is full (capacity {capacity})")]
    Overflow {
        /// Fixed number of slots reserved for the stack.
        capacity: usize,
    },
    /// A pop was attempted on an empty stack.
    #[error("backtrack stack is empty")]
    Underflow,
    /// The probe cursor already walked below the bottom slot.
    #[error("probe cursor walked past the bottom of the backtrack stack")]
    ProbeExhausted,
}

/// Errors surfaced while constructing or advancing a maze generator.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Rows or columns were zero.
    #[error("maze dimensions must be positive (received {rows}x{columns})")]
    InvalidDimensions {
        /// Requested row count.
        rows: u32,
        /// Requested column count.
        columns: u32,
    },
    /// A cell lookup fell outside the grid.
    #[error("cell ({row}, {column}) lies outside the {rows}x{columns} maze")]
    OutOfRange {
        /// Requested row.
        row: i64,
        /// Requested column.
        column: i64,
        /// Row count of the maze.
        rows: u32,
        /// Column count of the maze.
        columns: u32,
    },
    /// Backing storage for the grid or the stack could not be reserved.
    #[error("unable to reserve storage for {cells} cells")]
    Allocation {
        /// Number of cells that were requested.
        cells: u64,
    },
    /// A wall was requested between two cells that do not touch.
    #[error("cells {from} and {to} are not adjacent")]
    NotAdjacent {
        /// First cell of the rejected pair.
        from: CellCoord,
        /// Second cell of the rejected pair.
        to: CellCoord,
    },
    /// The neighbour picker returned an index outside the candidate list.
    #[error("neighbour picker chose index {index} from {candidates} candidates")]
    InvalidPick {
        /// Index returned by the picker.
        index: usize,
        /// Number of candidates offered to the picker.
        candidates: usize,
    },
    /// The path stack reported an internal invariant violation.
    #[error("generator invariant violated: {0}")]
    Invariant(#[from] StackError),
}
