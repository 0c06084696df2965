//! Per-cell search metadata. The [Finder](crate::Finder) and the movement policies only talk to
//! the [CellStore] trait, so the same search runs on a dense grid or on a sparse, key-addressed map.
use grid_util::point::Point;

use crate::path::euclidean;

pub mod grid;
pub mod sparse;

pub use grid::GridCellStore;
pub use sparse::SparseCellStore;

/// Traversal state of a cell within one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Unvisited,
    Open,
    Closed,
    /// Forced unwalkable for the duration of one search by [FindOptions::blocks](crate::FindOptions::blocks).
    Blocked,
}

/// Search metadata of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cell {
    pub state: CellState,
    /// Accumulated cost from the start, meaningful once the cell has left [CellState::Unvisited].
    pub g: f64,
    /// Heuristic estimate to the goal, only set by best-first searches and never revised.
    pub h: Option<f64>,
    pub parent: Option<Point>,
}

pub trait CellStore {
    /// Clears the metadata of every cell.
    fn reset(&mut self);
    /// Whether the underlying terrain permits movement, regardless of search state.
    fn terrain_walkable(&self, pos: Point) -> bool;
    fn cell(&self, pos: Point) -> Option<&Cell>;
    /// Mutable access to a cell. Stores may refuse coordinates they cannot hold by returning [None],
    /// in which case writes are dropped.
    fn cell_mut(&mut self, pos: Point) -> Option<&mut Cell>;

    /// Resets the store and marks every coordinate of `blocks` as [CellState::Blocked].
    fn reset_with_blocks<'a, I>(&mut self, blocks: I)
    where
        Self: Sized,
        I: IntoIterator<Item = &'a Point>,
    {
        self.reset();
        for &p in blocks {
            self.set_state(p, CellState::Blocked);
        }
    }

    fn is_walkable(&self, pos: Point) -> bool {
        self.terrain_walkable(pos) && self.state(pos) != CellState::Blocked
    }

    fn state(&self, pos: Point) -> CellState {
        self.cell(pos).map_or(CellState::Unvisited, |c| c.state)
    }
    fn set_state(&mut self, pos: Point, state: CellState) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.state = state;
        }
    }
    fn g(&self, pos: Point) -> f64 {
        self.cell(pos).map_or(0.0, |c| c.g)
    }
    fn set_g(&mut self, pos: Point, g: f64) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.g = g;
        }
    }
    fn h(&self, pos: Point) -> Option<f64> {
        self.cell(pos).and_then(|c| c.h)
    }
    fn set_h(&mut self, pos: Point, h: f64) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.h = Some(h);
        }
    }
    fn parent(&self, pos: Point) -> Option<Point> {
        self.cell(pos).and_then(|c| c.parent)
    }
    fn set_parent(&mut self, pos: Point, parent: Point) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.parent = Some(parent);
        }
    }

    /// Cost of moving between two cells on a common straight or diagonal ray.
    fn calc_g(&self, from: Point, to: Point) -> f64 {
        euclidean(from, to)
    }
}
