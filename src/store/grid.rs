use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;

use super::{Cell, CellStore};

/// Dense [CellStore] over a fixed-size [BoolGrid] in which [true] marks an obstacle. Coordinates
/// outside the grid are unwalkable and writes to them are ignored.
#[derive(Clone, Debug)]
pub struct GridCellStore {
    pub grid: BoolGrid,
    cells: Vec<Cell>,
}

impl Default for GridCellStore {
    fn default() -> GridCellStore {
        GridCellStore {
            grid: BoolGrid::default(),
            cells: Vec::new(),
        }
    }
}

impl GridCellStore {
    /// Wraps an existing terrain grid.
    pub fn from_grid(grid: BoolGrid) -> GridCellStore {
        let n = grid.width() * grid.height();
        GridCellStore {
            grid,
            cells: vec![Cell::default(); n],
        }
    }
    fn in_bounds(&self, pos: Point) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.grid.width()
            && (pos.y as usize) < self.grid.height()
    }
    fn ix(&self, pos: Point) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.grid.width() + pos.x as usize)
    }
}

impl CellStore for GridCellStore {
    fn reset(&mut self) {
        self.cells.fill(Cell::default());
    }
    fn terrain_walkable(&self, pos: Point) -> bool {
        self.in_bounds(pos) && !self.grid.get(pos.x as usize, pos.y as usize)
    }
    fn cell(&self, pos: Point) -> Option<&Cell> {
        self.ix(pos).map(|ix| &self.cells[ix])
    }
    fn cell_mut(&mut self, pos: Point) -> Option<&mut Cell> {
        let ix = self.ix(pos)?;
        Some(&mut self.cells[ix])
    }
}

impl fmt::Display for GridCellStore {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.grid.height() {
            let row = (0..self.grid.width())
                .map(|x| if self.grid.get(x, y) { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

impl Grid<bool> for GridCellStore {
    fn new(width: usize, height: usize, default_value: bool) -> Self {
        GridCellStore::from_grid(BoolGrid::new(width, height, default_value))
    }
    fn get(&self, x: usize, y: usize) -> bool {
        self.grid.get(x, y)
    }
    fn set(&mut self, x: usize, y: usize, blocked: bool) {
        self.grid.set(x, y, blocked);
    }
    fn width(&self) -> usize {
        self.grid.width()
    }
    fn height(&self) -> usize {
        self.grid.height()
    }
}
