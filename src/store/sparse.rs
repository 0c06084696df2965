use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexMap;

use super::{Cell, CellStore};
use crate::codec::PointCodec;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Sparse [CellStore] keyed by a [PointCodec]. Cells are allocated on first write, so memory is
/// proportional to the explored area rather than to the map. Terrain walkability is answered by the
/// `walkable` predicate, which is how unbounded or streamed maps plug in.
pub struct SparseCellStore<C: PointCodec, W> {
    codec: C,
    walkable: W,
    cells: FxIndexMap<C::Key, Cell>,
}

impl<C, W> SparseCellStore<C, W>
where
    C: PointCodec,
    W: Fn(Point) -> bool,
{
    pub fn new(codec: C, walkable: W) -> Self {
        SparseCellStore {
            codec,
            walkable,
            cells: FxIndexMap::default(),
        }
    }
    pub fn codec(&self) -> &C {
        &self.codec
    }
    /// Looks up a cell by its codec key.
    pub fn cell_by_key(&self, key: &C::Key) -> Option<&Cell> {
        self.cells.get(key)
    }
    /// Number of cells allocated since the last reset.
    pub fn touched(&self) -> usize {
        self.cells.len()
    }
}

impl<C, W> CellStore for SparseCellStore<C, W>
where
    C: PointCodec,
    W: Fn(Point) -> bool,
{
    fn reset(&mut self) {
        self.cells.clear();
    }
    fn terrain_walkable(&self, pos: Point) -> bool {
        (self.walkable)(pos)
    }
    fn cell(&self, pos: Point) -> Option<&Cell> {
        self.cells.get(&self.codec.encode(pos))
    }
    fn cell_mut(&mut self, pos: Point) -> Option<&mut Cell> {
        Some(self.cells.entry(self.codec.encode(pos)).or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{PackedCodec, StringCodec};
    use crate::store::CellState;

    #[test]
    fn cells_are_allocated_lazily() {
        let mut store = SparseCellStore::new(StringCodec, |p: Point| p.x >= 0);
        assert_eq!(store.touched(), 0);
        assert_eq!(store.state(Point::new(5, 5)), CellState::Unvisited);
        assert_eq!(store.touched(), 0);
        store.set_g(Point::new(5, 5), 3.0);
        assert_eq!(store.touched(), 1);
        let cell = store.cell_by_key(&"5_5".to_owned()).unwrap();
        assert_eq!(cell.g, 3.0);
        store.reset();
        assert_eq!(store.touched(), 0);
    }

    #[test]
    fn walkability_is_delegated() {
        let mut store = SparseCellStore::new(PackedCodec, |p: Point| p.x.abs() < 10);
        assert!(store.is_walkable(Point::new(-9, 1_000_000)));
        assert!(!store.is_walkable(Point::new(10, 0)));
        // Unvisited cells still answer to the terrain predicate, blocks are layered on top.
        store.reset_with_blocks(&[Point::new(1, 1)]);
        assert!(!store.is_walkable(Point::new(1, 1)));
        assert!(store.is_walkable(Point::new(1, 2)));
    }
}
