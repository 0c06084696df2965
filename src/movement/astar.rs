//! Degenerate policy without pruning or jumping, turning the search into a plain A*.
use grid_util::point::Point;

use super::{default_neighbors, JumpContext, MoveMode, Neighbors};
use crate::store::CellStore;

/// Always the full 8-neighbourhood, independent of the parent.
pub(super) fn find_neighbors<S>(ctx: &JumpContext<S>, pos: Point) -> Neighbors
where
    S: CellStore + ?Sized,
{
    default_neighbors(ctx, pos, MoveMode::DiagAlways)
}

pub(super) fn jump<S>(_ctx: &JumpContext<S>, pos: Point, _parent: Point) -> Option<Point>
where
    S: CellStore + ?Sized,
{
    Some(pos)
}
