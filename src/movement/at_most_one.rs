//! Diagonal moves are allowed as long as at most one of the two flanking cells is blocked.
use grid_util::point::Point;

use super::{default_neighbors, forced_diagonal, forced_straight_ahead};
use super::{narrow, wide_dir, widen, JumpContext, MoveMode, Neighbors};
use crate::store::CellStore;

pub(super) fn find_neighbors<S>(ctx: &JumpContext<S>, pos: Point) -> Neighbors
where
    S: CellStore + ?Sized,
{
    let Some(parent) = ctx.parent(pos) else {
        return default_neighbors(ctx, pos, MoveMode::DiagAtMostOneObstacle);
    };
    let (dx, dy) = wide_dir(pos, parent);
    let (x, y) = widen(pos);
    let mut out = Neighbors::new();
    if dx != 0 && dy != 0 {
        let vertical = ctx.push_walkable(&mut out, x, y + dy);
        let horizontal = ctx.push_walkable(&mut out, x + dx, y);
        if vertical || horizontal {
            ctx.push_walkable(&mut out, x + dx, y + dy);
        }
        // Both forced candidates need their other flank free, otherwise the step would pass
        // between two obstacles.
        if vertical && !ctx.walkable(x - dx, y) {
            ctx.push_walkable(&mut out, x - dx, y + dy);
        }
        if horizontal && !ctx.walkable(x, y - dy) {
            ctx.push_walkable(&mut out, x + dx, y - dy);
        }
    } else if dx == 0 {
        if ctx.push_walkable(&mut out, x, y + dy) {
            if !ctx.walkable(x + 1, y) {
                ctx.push_walkable(&mut out, x + 1, y + dy);
            }
            if !ctx.walkable(x - 1, y) {
                ctx.push_walkable(&mut out, x - 1, y + dy);
            }
        }
    } else if ctx.push_walkable(&mut out, x + dx, y) {
        if !ctx.walkable(x, y + 1) {
            ctx.push_walkable(&mut out, x + dx, y + 1);
        }
        if !ctx.walkable(x, y - 1) {
            ctx.push_walkable(&mut out, x + dx, y - 1);
        }
    }
    out
}

pub(super) fn jump<S>(ctx: &JumpContext<S>, mut pos: Point, parent: Point) -> Option<Point>
where
    S: CellStore + ?Sized,
{
    let (dx, dy) = wide_dir(pos, parent);
    loop {
        let (x, y) = widen(pos);
        if !ctx.walkable(x, y) {
            return None;
        }
        if pos == ctx.goal {
            return Some(pos);
        }
        if dx != 0 && dy != 0 {
            if forced_diagonal(ctx, x, y, dx, dy)
                || narrow(x + dx, y).and_then(|p| jump(ctx, p, pos)).is_some()
                || narrow(x, y + dy).and_then(|p| jump(ctx, p, pos)).is_some()
            {
                return Some(pos);
            }
            if !ctx.walkable(x + dx, y) && !ctx.walkable(x, y + dy) {
                return None;
            }
        } else if forced_straight_ahead(ctx, x, y, dx, dy) {
            return Some(pos);
        }
        pos = narrow(x + dx, y + dy)?;
    }
}
