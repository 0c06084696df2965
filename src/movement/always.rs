//! Diagonal moves are always allowed, even between two obstacles.
use grid_util::point::Point;

use super::{default_neighbors, forced_diagonal, forced_straight_ahead};
use super::{narrow, wide_dir, widen, JumpContext, MoveMode, Neighbors};
use crate::store::CellStore;

pub(super) fn find_neighbors<S>(ctx: &JumpContext<S>, pos: Point) -> Neighbors
where
    S: CellStore + ?Sized,
{
    let Some(parent) = ctx.parent(pos) else {
        return default_neighbors(ctx, pos, MoveMode::DiagAlways);
    };
    let (dx, dy) = wide_dir(pos, parent);
    let (x, y) = widen(pos);
    let mut out = Neighbors::new();
    if dx != 0 && dy != 0 {
        ctx.push_walkable(&mut out, x, y + dy);
        ctx.push_walkable(&mut out, x + dx, y);
        ctx.push_walkable(&mut out, x + dx, y + dy);
        if !ctx.walkable(x - dx, y) {
            ctx.push_walkable(&mut out, x - dx, y + dy);
        }
        if !ctx.walkable(x, y - dy) {
            ctx.push_walkable(&mut out, x + dx, y - dy);
        }
    } else if dx == 0 {
        ctx.push_walkable(&mut out, x, y + dy);
        if !ctx.walkable(x + 1, y) {
            ctx.push_walkable(&mut out, x + 1, y + dy);
        }
        if !ctx.walkable(x - 1, y) {
            ctx.push_walkable(&mut out, x - 1, y + dy);
        }
    } else {
        ctx.push_walkable(&mut out, x + dx, y);
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
        } else if forced_straight_ahead(ctx, x, y, dx, dy) {
            return Some(pos);
        }
        pos = narrow(x + dx, y + dy)?;
    }
}
