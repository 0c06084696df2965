//! Movement policies. Each [MoveMode] decides which neighbours of an expanded cell are worth
//! jumping from, given the direction the cell was entered from, and how far a jump may run before
//! it has to stop at a jump point.
use core::fmt;
use std::str::FromStr;

use grid_util::point::Point;
use smallvec::SmallVec;

use crate::store::CellStore;
use crate::{Error, N_SMALLVEC_SIZE};

mod always;
mod astar;
mod at_most_one;
mod never;
mod no_obstacles;

pub(crate) type Neighbors = SmallVec<[Point; N_SMALLVEC_SIZE]>;

/// Diagonal movement policy, fixed for the lifetime of a [Finder](crate::Finder). The numeric
/// values are stable and accepted by [TryFrom<u8>].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
#[repr(u8)]
pub enum MoveMode {
    /// 4-connected movement.
    DiagNever = 0,
    /// Diagonal steps only when both orthogonal cells flanking the step are walkable.
    DiagNoObstacles = 1,
    /// Diagonal steps when at most one of the flanking cells is blocked.
    DiagAtMostOneObstacle = 2,
    /// Diagonal steps regardless of the flanking cells.
    #[default]
    DiagAlways = 3,
    /// No jumping at all: a plain 8-connected A* through the same driver.
    #[cfg_attr(feature = "serde", serde(rename = "astar"))]
    AStar = 4,
}

impl MoveMode {
    pub const ALL: [MoveMode; 5] = [
        MoveMode::DiagNever,
        MoveMode::DiagNoObstacles,
        MoveMode::DiagAtMostOneObstacle,
        MoveMode::DiagAlways,
        MoveMode::AStar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MoveMode::DiagNever => "diag-never",
            MoveMode::DiagNoObstacles => "diag-no-obstacles",
            MoveMode::DiagAtMostOneObstacle => "diag-at-most-one-obstacle",
            MoveMode::DiagAlways => "diag-always",
            MoveMode::AStar => "astar",
        }
    }

    /// Whether a diagonal step is legal given the walkability of its two flanking cells.
    pub fn diagonal_allowed(self, flank_a: bool, flank_b: bool) -> bool {
        match self {
            MoveMode::DiagNever => false,
            MoveMode::DiagNoObstacles => flank_a && flank_b,
            MoveMode::DiagAtMostOneObstacle => flank_a || flank_b,
            MoveMode::DiagAlways | MoveMode::AStar => true,
        }
    }

    /// Candidate cells to jump from when expanding `pos`.
    pub(crate) fn find_neighbors<S>(self, ctx: &JumpContext<S>, pos: Point) -> Neighbors
    where
        S: CellStore + ?Sized,
    {
        match self {
            MoveMode::DiagNever => never::find_neighbors(ctx, pos),
            MoveMode::DiagNoObstacles => no_obstacles::find_neighbors(ctx, pos),
            MoveMode::DiagAtMostOneObstacle => at_most_one::find_neighbors(ctx, pos),
            MoveMode::DiagAlways => always::find_neighbors(ctx, pos),
            MoveMode::AStar => astar::find_neighbors(ctx, pos),
        }
    }

    /// Jumps from `pos`, which was reached from the adjacent cell `parent`, and returns the next
    /// jump point on that ray if there is one.
    pub(crate) fn jump<S>(self, ctx: &JumpContext<S>, pos: Point, parent: Point) -> Option<Point>
    where
        S: CellStore + ?Sized,
    {
        match self {
            MoveMode::DiagNever => never::jump(ctx, pos, parent),
            MoveMode::DiagNoObstacles => no_obstacles::jump(ctx, pos, parent),
            MoveMode::DiagAtMostOneObstacle => at_most_one::jump(ctx, pos, parent),
            MoveMode::DiagAlways => always::jump(ctx, pos, parent),
            MoveMode::AStar => astar::jump(ctx, pos, parent),
        }
    }
}

impl fmt::Display for MoveMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for MoveMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        MoveMode::ALL
            .into_iter()
            .find(|m| *m as u8 == value)
            .ok_or(Error::UnknownMoveMode(value))
    }
}

impl FromStr for MoveMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        MoveMode::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| Error::UnknownMoveModeName(s.to_owned()))
    }
}

/// Read-only view of a search handed to the movement policies.
///
/// Coordinates are taken as `i64` so that probing one cell past the edge of the `i32` plane cannot
/// overflow; such cells are unwalkable.
pub(crate) struct JumpContext<'a, S: ?Sized> {
    pub store: &'a S,
    pub goal: Point,
}

impl<'a, S: CellStore + ?Sized> JumpContext<'a, S> {
    pub fn new(store: &'a S, goal: Point) -> Self {
        JumpContext { store, goal }
    }
    #[inline]
    pub fn walkable(&self, x: i64, y: i64) -> bool {
        narrow(x, y).map_or(false, |p| self.store.is_walkable(p))
    }
    pub fn parent(&self, pos: Point) -> Option<Point> {
        self.store.parent(pos)
    }
    /// Pushes `(x, y)` if it is walkable and reports whether it was.
    pub fn push_walkable(&self, out: &mut Neighbors, x: i64, y: i64) -> bool {
        match narrow(x, y) {
            Some(p) if self.store.is_walkable(p) => {
                out.push(p);
                true
            }
            _ => false,
        }
    }
}

/// Widened coordinates of `pos`.
pub(crate) fn widen(pos: Point) -> (i64, i64) {
    (i64::from(pos.x), i64::from(pos.y))
}

/// The point at `(x, y)`, or [None] outside the `i32` plane.
pub(crate) fn narrow(x: i64, y: i64) -> Option<Point> {
    Some(Point::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?))
}

/// [dir] widened to match [widen].
pub(crate) fn wide_dir(pos: Point, parent: Point) -> (i64, i64) {
    let (dx, dy) = dir(pos, parent);
    (i64::from(dx), i64::from(dy))
}

/// Unit direction of travel from `parent` into `pos`, each component clamped to -1, 0 or 1.
///
/// Panics if both points are equal, which can only happen with a corrupted parent chain.
pub fn dir(pos: Point, parent: Point) -> (i32, i32) {
    let d = (pos.x.cmp(&parent.x) as i32, pos.y.cmp(&parent.y) as i32);
    assert!(d != (0, 0), "zero jump direction at {:?}", pos);
    d
}

/// Expansion of a cell without a parent (the start): the walkable orthogonal neighbours plus
/// the diagonals `mode` allows.
pub(crate) fn default_neighbors<S>(ctx: &JumpContext<S>, pos: Point, mode: MoveMode) -> Neighbors
where
    S: CellStore + ?Sized,
{
    let (x, y) = widen(pos);
    let mut out = Neighbors::new();
    let up = ctx.push_walkable(&mut out, x, y - 1);
    let right = ctx.push_walkable(&mut out, x + 1, y);
    let down = ctx.push_walkable(&mut out, x, y + 1);
    let left = ctx.push_walkable(&mut out, x - 1, y);
    if mode == MoveMode::DiagNever {
        return out;
    }
    for (dx, dy, flank_a, flank_b) in [
        (-1, -1, left, up),
        (1, -1, up, right),
        (1, 1, right, down),
        (-1, 1, down, left),
    ] {
        if mode.diagonal_allowed(flank_a, flank_b) {
            ctx.push_walkable(&mut out, x + dx, y + dy);
        }
    }
    out
}

/// Forced-neighbour test for a diagonal ray when corners may be cut: a cell behind one of the two
/// flanks is only reachable optimally through `(x, y)`.
pub(crate) fn forced_diagonal<S>(ctx: &JumpContext<S>, x: i64, y: i64, dx: i64, dy: i64) -> bool
where
    S: CellStore + ?Sized,
{
    (ctx.walkable(x - dx, y + dy) && !ctx.walkable(x - dx, y))
        || (ctx.walkable(x + dx, y - dy) && !ctx.walkable(x, y - dy))
}

/// Forced-neighbour test for a straight ray when corners may be cut: an obstacle beside `(x, y)`
/// with a free cell diagonally ahead of it.
pub(crate) fn forced_straight_ahead<S>(
    ctx: &JumpContext<S>,
    x: i64,
    y: i64,
    dx: i64,
    dy: i64,
) -> bool
where
    S: CellStore + ?Sized,
{
    if dx != 0 {
        (ctx.walkable(x + dx, y + 1) && !ctx.walkable(x, y + 1))
            || (ctx.walkable(x + dx, y - 1) && !ctx.walkable(x, y - 1))
    } else {
        (ctx.walkable(x + 1, y + dy) && !ctx.walkable(x + 1, y))
            || (ctx.walkable(x - 1, y + dy) && !ctx.walkable(x - 1, y))
    }
}

/// Forced-neighbour test for a straight ray without corner cutting: a free cell beside `(x, y)`
/// whose counterpart one step back is blocked.
pub(crate) fn forced_straight_behind<S>(
    ctx: &JumpContext<S>,
    x: i64,
    y: i64,
    dx: i64,
    dy: i64,
) -> bool
where
    S: CellStore + ?Sized,
{
    if dx != 0 {
        (ctx.walkable(x, y - 1) && !ctx.walkable(x - dx, y - 1))
            || (ctx.walkable(x, y + 1) && !ctx.walkable(x - dx, y + 1))
    } else {
        (ctx.walkable(x - 1, y) && !ctx.walkable(x - 1, y - dy))
            || (ctx.walkable(x + 1, y) && !ctx.walkable(x + 1, y - dy))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::codec::PackedCodec;
    use crate::store::{GridCellStore, SparseCellStore};
    use grid_util::grid::Grid;

    /// Builds a store from rows of `.` (free) and `#` (obstacle).
    pub(crate) fn store_from(rows: &[&str]) -> GridCellStore {
        let mut store = GridCellStore::new(rows[0].len(), rows.len(), false);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                store.set(x, y, c == '#');
            }
        }
        store
    }

    fn sorted(v: &[Point]) -> Vec<(i32, i32)> {
        let mut out = v.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>();
        out.sort();
        out
    }

    #[test]
    fn direction_is_clamped() {
        assert_eq!(dir(Point::new(5, 0), Point::new(1, 0)), (1, 0));
        assert_eq!(dir(Point::new(-5, 3), Point::new(1, 9)), (-1, -1));
        assert_eq!(dir(Point::new(i32::MIN, 0), Point::new(i32::MAX, 0)), (-1, 0));
    }

    #[test]
    #[should_panic]
    fn zero_direction_panics() {
        dir(Point::new(2, 2), Point::new(2, 2));
    }

    #[test]
    fn move_mode_conversions() {
        for mode in MoveMode::ALL {
            assert_eq!(MoveMode::try_from(mode as u8).unwrap(), mode);
            assert_eq!(mode.name().parse::<MoveMode>().unwrap(), mode);
        }
        assert!(matches!(MoveMode::try_from(5u8), Err(Error::UnknownMoveMode(5))));
        assert!("diagonal".parse::<MoveMode>().is_err());
        assert_eq!(MoveMode::default(), MoveMode::DiagAlways);
    }

    #[test]
    fn default_neighbors_per_mode() {
        // The start sits in the middle with obstacles left and above it.
        let store = store_from(&[
            ".#.", //
            "#..", //
            "...",
        ]);
        let ctx = JumpContext::new(&store, Point::new(9, 9));
        let pos = Point::new(1, 1);
        let expected: [(MoveMode, Vec<(i32, i32)>); 4] = [
            (MoveMode::DiagNever, vec![(1, 2), (2, 1)]),
            (MoveMode::DiagNoObstacles, vec![(1, 2), (2, 1), (2, 2)]),
            (
                MoveMode::DiagAtMostOneObstacle,
                vec![(0, 2), (1, 2), (2, 0), (2, 1), (2, 2)],
            ),
            (
                MoveMode::DiagAlways,
                vec![(0, 0), (0, 2), (1, 2), (2, 0), (2, 1), (2, 2)],
            ),
        ];
        for (mode, cells) in expected {
            let n = default_neighbors(&ctx, pos, mode);
            assert_eq!(sorted(&n), cells, "{mode}");
        }
    }

    #[test]
    fn probing_past_the_plane_edge_is_unwalkable() {
        let store = SparseCellStore::new(PackedCodec, |_: Point| true);
        let ctx = JumpContext::new(&store, Point::new(0, 0));
        let max = i64::from(i32::MAX);
        assert!(ctx.walkable(max, 0));
        assert!(!ctx.walkable(max + 1, 0));
        assert!(!ctx.walkable(0, i64::from(i32::MIN) - 1));
        let mut out = Neighbors::new();
        assert!(!ctx.push_walkable(&mut out, max + 1, max));
        assert!(out.is_empty());

        // Open rays run into the edge instead of wrapping around to the other side.
        let (edge, behind) = (Point::new(i32::MAX - 1, 0), Point::new(i32::MAX - 2, 0));
        for mode in [
            MoveMode::DiagNever,
            MoveMode::DiagNoObstacles,
            MoveMode::DiagAtMostOneObstacle,
            MoveMode::DiagAlways,
        ] {
            assert_eq!(mode.jump(&ctx, edge, behind), None, "{mode}");
        }
        let corner = Point::new(i32::MAX - 1, i32::MAX - 1);
        let behind = Point::new(i32::MAX - 2, i32::MAX - 2);
        assert_eq!(MoveMode::DiagAlways.jump(&ctx, corner, behind), None);
    }

    #[test]
    fn forced_diagonal_corners() {
        // Travelling (+1, +1) through (1, 1).
        let open = store_from(&["...", "...", "..."]);
        let ctx = JumpContext::new(&open, Point::new(9, 9));
        assert!(!forced_diagonal(&ctx, 1, 1, 1, 1));

        let left_blocked = store_from(&["...", "#..", "..."]);
        let ctx = JumpContext::new(&left_blocked, Point::new(9, 9));
        assert!(forced_diagonal(&ctx, 1, 1, 1, 1));

        let up_blocked = store_from(&[".#.", "...", "..."]);
        let ctx = JumpContext::new(&up_blocked, Point::new(9, 9));
        assert!(forced_diagonal(&ctx, 1, 1, 1, 1));

        // The cell behind the obstacle is blocked too, so nothing is forced.
        let left_wall = store_from(&["...", "#..", "#.."]);
        let ctx = JumpContext::new(&left_wall, Point::new(9, 9));
        assert!(!forced_diagonal(&ctx, 1, 1, 1, 1));
    }

    #[test]
    fn forced_straight_variants() {
        // Travelling (+1, 0) through (1, 1).
        let above_blocked = store_from(&[".#.", "...", "..."]);
        let ctx = JumpContext::new(&above_blocked, Point::new(9, 9));
        assert!(forced_straight_ahead(&ctx, 1, 1, 1, 0));
        assert!(!forced_straight_behind(&ctx, 1, 1, 1, 0));

        let behind_blocked = store_from(&["#..", "...", "..."]);
        let ctx = JumpContext::new(&behind_blocked, Point::new(9, 9));
        assert!(!forced_straight_ahead(&ctx, 1, 1, 1, 0));
        assert!(forced_straight_behind(&ctx, 1, 1, 1, 0));

        // Travelling (0, -1) through (1, 1): the same corners rotated.
        let right_blocked = store_from(&["...", "..#", "..."]);
        let ctx = JumpContext::new(&right_blocked, Point::new(9, 9));
        assert!(forced_straight_ahead(&ctx, 1, 1, 0, -1));
        let below_right_blocked = store_from(&["...", "...", "..#"]);
        let ctx = JumpContext::new(&below_right_blocked, Point::new(9, 9));
        assert!(forced_straight_behind(&ctx, 1, 1, 0, -1));
    }
}
