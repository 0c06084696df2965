//! # grid_jps
//!
//! Grid pathfinding with [Jump Point Search](https://en.wikipedia.org/wiki/Jump_point_search).
//! Assumes a uniform-cost grid on which straight steps cost 1 and diagonal steps cost √2.
//!
//! A [Finder] runs over any [CellStore]: a dense [GridCellStore] for fixed-size maps, or a
//! [SparseCellStore] that addresses cells through a [PointCodec] and only allocates what a search
//! touches. How diagonals interact with obstacles is chosen per finder with a [MoveMode], and
//! [MoveMode::AStar] runs plain A* through the same driver for comparison.
//!
//! ```
//! use grid_jps::{Finder, FindOptions, GridCellStore, MoveMode};
//! use grid_util::grid::Grid;
//! use grid_util::point::Point;
//!
//! let mut store = GridCellStore::new(5, 5, false);
//! store.set(2, 1, true);
//! let mut finder = Finder::new(store, MoveMode::DiagNoObstacles);
//! let path = finder
//!     .find(Point::new(0, 0), Point::new(4, 4), &FindOptions::default().reverse_path(true))
//!     .unwrap();
//! assert_eq!(path.last(), Some(&Point::new(4, 4)));
//! ```
pub mod codec;
mod error;
pub mod finder;
mod frontier;
pub mod movement;
pub mod path;
pub mod store;

pub use codec::{PackedCodec, PointCodec, StringCodec};
pub use error::Error;
pub use finder::{FindOptions, Finder, FinderConfig, LogFacade};
pub use frontier::SearchOrder;
pub use movement::MoveMode;
pub use path::{trim_tail, waypoints_to_path};
pub use store::{Cell, CellState, CellStore, GridCellStore, SparseCellStore};

/// Inline capacity of neighbour and jump point lists.
pub(crate) const N_SMALLVEC_SIZE: usize = 8;

/// Weight of the heuristic unless [FinderConfig::heuristic_factor] says otherwise. At 1 the
/// best-first search returns shortest paths.
pub const DEFAULT_HEURISTIC_FACTOR: f64 = 1.0;
