use grid_jps::{FindOptions, Finder, GridCellStore, MoveMode};
use grid_util::grid::Grid;
use grid_util::point::Point;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Diagonal steps may cut the corner of the obstacle.

fn main() {
    let mut store = GridCellStore::new(3, 3, false);
    store.set(1, 1, true);
    println!("{}", store);
    let mut finder = Finder::new(store, MoveMode::DiagAlways);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let options = FindOptions::default().reverse_path(true);
    if let Some(path) = finder.find_path(start, end, &options) {
        println!("Path:");
        for p in path {
            println!("{:?}", p);
        }
    }
}
