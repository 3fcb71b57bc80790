#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Recursive-backtracker maze generation, advanced one step per call.
//!
//! [`MazeGenerator`] owns the [`CellGrid`] and the [`BacktrackStack`] for a
//! single run. Every call to [`MazeGenerator::step`] performs exactly one
//! carve or one probe and leaves the maze in a consistent, inspectable state,
//! so a render loop can draw between steps and stop at any point.

mod picker;

pub use picker::{NeighborPicker, RandomPicker};

use maze_carver_core::{
    CarvedEdge, CellCoord, CellView, Dimensions, GenerationError, Phase, StackError, StepResult,
};
use maze_carver_world::{BacktrackStack, CellGrid};

/// Cell every run starts carving from.
pub const START_CELL: CellCoord = CellCoord::new(0, 0);

/// Generator driven by a seeded [`RandomPicker`].
pub type GeneratorHandle = MazeGenerator<RandomPicker>;

/// Creates a seeded generator for a `rows` x `columns` maze.
///
/// Without a seed one is drawn from the operating system and reported by
/// [`GeneratorHandle::seed`]. Zero-sized dimensions are rejected before any
/// state is allocated.
pub fn initialize(
    rows: u32,
    columns: u32,
    seed: Option<u64>,
) -> Result<GeneratorHandle, GenerationError> {
    let dimensions = Dimensions::new(rows, columns)?;
    let picker = seed.map_or_else(RandomPicker::from_entropy, RandomPicker::from_seed);
    tracing::info!(
        rows,
        columns,
        seed = picker.seed(),
        "initialising maze generator"
    );
    MazeGenerator::with_picker(dimensions, picker)
}

/// Recursive-backtracker state machine over a rectangular grid.
#[derive(Debug)]
pub struct MazeGenerator<P> {
    grid: CellGrid,
    stack: BacktrackStack,
    picker: P,
    current: CellCoord,
    visited_count: usize,
    phase: Phase,
}

impl<P> MazeGenerator<P>
where
    P: NeighborPicker,
{
    /// Creates a generator that draws its neighbour choices from `picker`.
    ///
    /// The start cell is visited and pushed immediately. A single-cell maze is
    /// complete from the outset.
    pub fn with_picker(dimensions: Dimensions, picker: P) -> Result<Self, GenerationError> {
        let mut grid = CellGrid::new(dimensions)?;
        let mut stack = BacktrackStack::with_capacity(dimensions.cell_count())?;

        grid.mark_visited(START_CELL)?;
        stack.push(START_CELL)?;

        let phase = if dimensions.cell_count() == 1 {
            Phase::Done
        } else {
            Phase::Carving
        };

        Ok(Self {
            grid,
            stack,
            picker,
            current: START_CELL,
            visited_count: 1,
            phase,
        })
    }

    /// Advances the state machine by one carve or one probe.
    ///
    /// Once the generator reports [`Phase::Done`] further calls return the
    /// same result without touching the maze. Errors indicate a broken
    /// internal invariant; the run should be abandoned.
    pub fn step(&mut self) -> Result<StepResult, GenerationError> {
        match self.phase {
            Phase::Done => Ok(self.result(None)),
            Phase::Carving => {
                let candidates = self.grid.unvisited_neighbors(self.current);
                if candidates.is_empty() {
                    self.enter(Phase::Backtracking);
                    self.backtrack()
                } else {
                    self.carve(candidates.as_slice())
                }
            }
            Phase::Backtracking => self.backtrack(),
        }
    }

    /// Steps until the maze is complete and returns the number of steps taken.
    pub fn run_to_completion(&mut self) -> Result<usize, GenerationError> {
        let mut steps = 0;
        while self.phase != Phase::Done {
            let _ = self.step()?;
            steps += 1;
        }
        Ok(steps)
    }

    fn carve(&mut self, candidates: &[CellCoord]) -> Result<StepResult, GenerationError> {
        let index = self.picker.pick(candidates);
        let next = candidates
            .get(index)
            .copied()
            .ok_or(GenerationError::InvalidPick {
                index,
                candidates: candidates.len(),
            })?;
        let from = self.current;

        self.stack.push(next)?;
        self.grid.clear_wall_between(from, next)?;
        self.grid.mark_visited(next)?;
        self.current = next;
        self.visited_count += 1;
        tracing::trace!(%from, to = %next, visited = self.visited_count, "carved passage");

        if self.visited_count == self.grid.dimensions().cell_count() {
            self.enter(Phase::Done);
        }

        Ok(self.result(Some(CarvedEdge { from, to: next })))
    }

    fn backtrack(&mut self) -> Result<StepResult, GenerationError> {
        match self.stack.probe_next() {
            Ok(candidate) => {
                self.current = candidate;
                tracing::trace!(cell = %candidate, "probed path history");
                if self.grid.has_unvisited_neighbor(candidate) {
                    self.enter(Phase::Carving);
                }
                Ok(self.result(None))
            }
            Err(StackError::ProbeExhausted)
                if self.visited_count == self.grid.dimensions().cell_count() =>
            {
                self.enter(Phase::Done);
                Ok(self.result(None))
            }
            Err(error) => {
                tracing::error!(
                    %error,
                    visited = self.visited_count,
                    "backtracking ran out of history before covering the maze"
                );
                Err(error.into())
            }
        }
    }

    fn enter(&mut self, phase: Phase) {
        if self.phase == phase {
            return;
        }
        tracing::debug!(from = ?self.phase, to = ?phase, cell = %self.current, "phase change");
        if phase == Phase::Done {
            tracing::info!(
                dimensions = %self.grid.dimensions(),
                visited = self.visited_count,
                "maze complete"
            );
        }
        self.phase = phase;
    }
}

impl<P> MazeGenerator<P> {
    /// Snapshot of the cell at a signed coordinate.
    ///
    /// Returns [`GenerationError::OutOfRange`] for coordinates outside the maze.
    pub fn cell_at(&self, row: i64, column: i64) -> Result<CellView, GenerationError> {
        self.grid.cell_at(row, column)
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, CellView)> + '_ {
        self.grid.iter()
    }

    /// Reports whether every cell has been visited.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Current phase of the state machine.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Cell the generator is positioned on.
    #[must_use]
    pub const fn current(&self) -> CellCoord {
        self.current
    }

    /// Number of cells visited so far.
    #[must_use]
    pub const fn visited_count(&self) -> usize {
        self.visited_count
    }

    /// Dimensions of the maze under construction.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    /// Read-only access to the cell grid.
    #[must_use]
    pub const fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Read-only access to the push history.
    #[must_use]
    pub const fn stack(&self) -> &BacktrackStack {
        &self.stack
    }

    /// Read-only access to the neighbour picker.
    #[must_use]
    pub const fn picker(&self) -> &P {
        &self.picker
    }

    fn result(&self, carved_edge: Option<CarvedEdge>) -> StepResult {
        StepResult {
            phase: self.phase,
            carved_edge,
            visited_count: self.visited_count,
            current: self.current,
        }
    }
}

impl GeneratorHandle {
    /// Seed that determines every neighbour choice of this run.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.picker.seed()
    }
}
