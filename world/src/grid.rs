use maze_carver_core::{CellCoord, CellView, Dimensions, Direction, GenerationError};

/// Up to four neighbouring cells collected in [`Direction::SCAN_ORDER`].
#[derive(Clone, Copy, Debug)]
pub struct Neighbors {
    slots: [CellCoord; 4],
    len: usize,
}

impl Neighbors {
    const EMPTY: Self = Self {
        slots: [CellCoord::new(0, 0); 4],
        len: 0,
    };

    fn push(&mut self, coord: CellCoord) {
        if let Some(slot) = self.slots.get_mut(self.len) {
            *slot = coord;
            self.len += 1;
        }
    }

    /// Collected neighbours in scan order.
    #[must_use]
    pub fn as_slice(&self) -> &[CellCoord] {
        &self.slots[..self.len]
    }

    /// Number of collected neighbours.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Reports whether no neighbour was collected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[derive(Clone, Copy, Debug)]
enum WallSide {
    Right,
    Bottom,
}

/// Fixed-size, row-major collection of maze cells.
///
/// The grid only stores the east and south wall of every cell; the west and
/// north walls are the east and south walls of the neighbouring cells. Walls
/// are only ever cleared.
#[derive(Clone, Debug)]
pub struct CellGrid {
    dimensions: Dimensions,
    cells: Vec<CellView>,
}

impl CellGrid {
    /// Creates a grid in which every cell is unvisited and fully walled.
    ///
    /// Returns [`GenerationError::Allocation`] when the backing storage cannot
    /// be reserved.
    pub fn new(dimensions: Dimensions) -> Result<Self, GenerationError> {
        let count = dimensions.cell_count();
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(count)
            .map_err(|_| GenerationError::Allocation {
                cells: count as u64,
            })?;
        cells.resize(count, CellView::UNTOUCHED);

        Ok(Self { dimensions, cells })
    }

    /// Dimensions the grid was created with.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.dimensions.rows()
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.dimensions.columns()
    }

    /// Number of cells in the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the grid holds no cells; validated dimensions never do.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reports whether the signed coordinate addresses a cell of this grid.
    #[must_use]
    pub fn in_bounds(&self, row: i64, column: i64) -> bool {
        self.dimensions.contains(row, column)
    }

    /// Snapshot of the cell at `coord`, or `None` when it lies outside the grid.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<CellView> {
        self.dimensions
            .index_of(coord)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Snapshot of the cell at a signed coordinate.
    ///
    /// Returns [`GenerationError::OutOfRange`] for coordinates outside the grid.
    pub fn cell_at(&self, row: i64, column: i64) -> Result<CellView, GenerationError> {
        self.coord_from_signed(row, column)
            .and_then(|coord| self.cell(coord))
            .ok_or_else(|| self.out_of_range(row, column))
    }

    /// Neighbour one step away from `coord` in `direction`, if it exists.
    #[must_use]
    pub fn neighbor(&self, coord: CellCoord, direction: Direction) -> Option<CellCoord> {
        let (row_delta, column_delta) = direction.delta();
        self.coord_from_signed(
            i64::from(coord.row()) + row_delta,
            i64::from(coord.column()) + column_delta,
        )
    }

    /// In-bounds, unvisited neighbours of `coord` in north, south, west, east order.
    #[must_use]
    pub fn unvisited_neighbors(&self, coord: CellCoord) -> Neighbors {
        let mut neighbors = Neighbors::EMPTY;
        if self.cell(coord).is_none() {
            return neighbors;
        }

        for direction in Direction::SCAN_ORDER {
            let Some(neighbor) = self.neighbor(coord, direction) else {
                continue;
            };

            if self.cell(neighbor).is_some_and(|cell| !cell.visited) {
                neighbors.push(neighbor);
            }
        }

        neighbors
    }

    /// Reports whether `coord` has at least one in-bounds, unvisited neighbour.
    #[must_use]
    pub fn has_unvisited_neighbor(&self, coord: CellCoord) -> bool {
        !self.unvisited_neighbors(coord).is_empty()
    }

    /// Marks the cell at `coord` as visited.
    pub fn mark_visited(&mut self, coord: CellCoord) -> Result<(), GenerationError> {
        let index = self.index_or_error(coord)?;
        self.cells[index].visited = true;
        Ok(())
    }

    /// Clears the single wall flag separating two adjacent cells.
    ///
    /// Cells in the same row share the `wall_right` flag of the cell with the
    /// smaller column; cells in the same column share the `wall_bottom` flag of
    /// the cell with the smaller row.
    pub fn clear_wall_between(
        &mut self,
        from: CellCoord,
        to: CellCoord,
    ) -> Result<(), GenerationError> {
        let direction = from
            .direction_to(to)
            .ok_or(GenerationError::NotAdjacent { from, to })?;
        let _ = self.index_or_error(from)?;
        let _ = self.index_or_error(to)?;

        let (owner, side) = match direction {
            Direction::East => (from, WallSide::Right),
            Direction::West => (to, WallSide::Right),
            Direction::South => (from, WallSide::Bottom),
            Direction::North => (to, WallSide::Bottom),
        };

        let index = self.index_or_error(owner)?;
        let cell = &mut self.cells[index];
        match side {
            WallSide::Right => cell.wall_right = false,
            WallSide::Bottom => cell.wall_bottom = false,
        }

        Ok(())
    }

    /// Iterates over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellView)> + '_ {
        let width = self.dimensions.columns() as usize;
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let coord = CellCoord::new((index / width) as u32, (index % width) as u32);
            (coord, *cell)
        })
    }

    fn coord_from_signed(&self, row: i64, column: i64) -> Option<CellCoord> {
        if !self.in_bounds(row, column) {
            return None;
        }

        let row = u32::try_from(row).ok()?;
        let column = u32::try_from(column).ok()?;
        Some(CellCoord::new(row, column))
    }

    fn index_or_error(&self, coord: CellCoord) -> Result<usize, GenerationError> {
        self.dimensions
            .index_of(coord)
            .ok_or_else(|| self.out_of_range(i64::from(coord.row()), i64::from(coord.column())))
    }

    fn out_of_range(&self, row: i64, column: i64) -> GenerationError {
        GenerationError::OutOfRange {
            row,
            column,
            rows: self.dimensions.rows(),
            columns: self.dimensions.columns(),
        }
    }
}
