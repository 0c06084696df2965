use grid_jps::{FindOptions, Finder, GridCellStore, MoveMode};
use grid_util::grid::Grid;
use grid_util::point::Point;

fn fill(store: &mut GridCellStore, x: usize, y: usize, w: usize, h: usize) {
    for x in x..x + w {
        for y in y..y + h {
            store.set(x, y, true);
        }
    }
}

fn main() {
    let mut store = GridCellStore::new(10, 10, false);
    fill(&mut store, 1, 1, 2, 2);
    fill(&mut store, 5, 0, 2, 2);
    fill(&mut store, 0, 5, 2, 2);
    fill(&mut store, 8, 8, 2, 2);
    let mut finder = Finder::new(store, MoveMode::DiagNever);
    let start = Point::new(0, 0);
    let end = Point::new(7, 7);
    let waypoints = finder
        .find(start, end, &FindOptions::default().reverse_path(true))
        .unwrap_or_default();
    println!("{:?}", waypoints);
}
