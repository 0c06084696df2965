use grid_jps::path::{encode_path, trim_tail};
use grid_jps::{FindOptions, Finder, MoveMode, SparseCellStore, StringCodec};
use grid_util::point::Point;

// A map without a fixed size: cells are addressed by "x_y" keys and only the cells a search
// touches are stored. Walkability comes from a closure, which must bound the walkable region.
// Here that is a diamond of radius 50 with a ring-shaped wall around the origin that has a single
// gap to the east.
fn walkable(p: Point) -> bool {
    let r = p.x.abs() + p.y.abs();
    r <= 50 && !(r == 10 && !(p.x > 0 && p.y == 0))
}

fn main() {
    let store = SparseCellStore::new(StringCodec, walkable);
    let mut finder = Finder::new(store, MoveMode::DiagNoObstacles);
    let start = Point::new(-3, 1);
    let end = Point::new(-20, -5);
    let options = FindOptions::default().reverse_path(true);
    match finder.find_path(start, end, &options) {
        Some(path) => {
            println!("{}", encode_path(&path, finder.store().codec()).join(" "));
            // Stop once within two cells of the goal.
            let (trimmed, reached) = trim_tail(&path, end, 4);
            println!("{} steps, {} when stopping early ({reached})", path.len(), trimmed.len());
        }
        None => println!("No path"),
    }
}
