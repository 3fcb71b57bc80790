#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative maze state for Maze Carver.
//!
//! [`CellGrid`] owns the cells and their wall flags, [`BacktrackStack`] owns
//! the push history of the carving walk. Both are created once per run and
//! mutated exclusively by the generator system; everything else observes them
//! through the [`query`] helpers.

mod grid;
mod stack;

pub use grid::{CellGrid, Neighbors};
pub use stack::BacktrackStack;

/// Query functions that provide read-only analysis of a grid.
pub mod query {
    use std::collections::VecDeque;

    use maze_carver_core::{CarvedEdge, CellCoord, Direction};

    use super::CellGrid;

    /// Number of cells currently marked visited.
    #[must_use]
    pub fn visited_count(grid: &CellGrid) -> usize {
        grid.iter().filter(|(_, cell)| cell.visited).count()
    }

    /// Neighbours reachable from `coord` through cleared walls, in scan order.
    #[must_use]
    pub fn open_neighbors(grid: &CellGrid, coord: CellCoord) -> Vec<CellCoord> {
        let Some(cell) = grid.cell(coord) else {
            return Vec::new();
        };

        let mut open = Vec::with_capacity(4);
        for direction in Direction::SCAN_ORDER {
            let Some(neighbor) = grid.neighbor(coord, direction) else {
                continue;
            };
            let Some(other) = grid.cell(neighbor) else {
                continue;
            };

            let passable = match direction {
                Direction::North => !other.wall_bottom,
                Direction::South => !cell.wall_bottom,
                Direction::West => !other.wall_right,
                Direction::East => !cell.wall_right,
            };
            if passable {
                open.push(neighbor);
            }
        }

        open
    }

    /// Every passage carved into the grid, listed once from its upper or left cell.
    #[must_use]
    pub fn carved_edges(grid: &CellGrid) -> Vec<CarvedEdge> {
        let mut edges = Vec::new();
        for (coord, cell) in grid.iter() {
            if !cell.wall_right {
                if let Some(to) = grid.neighbor(coord, Direction::East) {
                    edges.push(CarvedEdge { from: coord, to });
                }
            }
            if !cell.wall_bottom {
                if let Some(to) = grid.neighbor(coord, Direction::South) {
                    edges.push(CarvedEdge { from: coord, to });
                }
            }
        }
        edges
    }

    /// Number of cells reachable from `start` through carved passages, `start` included.
    #[must_use]
    pub fn reachable_count(grid: &CellGrid, start: CellCoord) -> usize {
        let dimensions = grid.dimensions();
        let Some(start_index) = dimensions.index_of(start) else {
            return 0;
        };

        let mut seen = vec![false; dimensions.cell_count()];
        seen[start_index] = true;
        let mut frontier = VecDeque::from([start]);
        let mut reached = 0;

        while let Some(coord) = frontier.pop_front() {
            reached += 1;
            for neighbor in open_neighbors(grid, coord) {
                let Some(index) = dimensions.index_of(neighbor) else {
                    continue;
                };
                if !seen[index] {
                    seen[index] = true;
                    frontier.push_back(neighbor);
                }
            }
        }

        reached
    }

    /// Reports whether the carved passages form a spanning tree over the grid.
    #[must_use]
    pub fn is_perfect_maze(grid: &CellGrid) -> bool {
        let cells = grid.len();
        carved_edges(grid).len() == cells - 1
            && reachable_count(grid, CellCoord::new(0, 0)) == cells
    }
}
