//! Diagonal moves only when both flanking cells are walkable, so corners are never cut.
use grid_util::point::Point;

use super::{default_neighbors, forced_straight_behind};
use super::{narrow, wide_dir, widen, JumpContext, MoveMode, Neighbors};
use crate::store::CellStore;

pub(super) fn find_neighbors<S>(ctx: &JumpContext<S>, pos: Point) -> Neighbors
where
    S: CellStore + ?Sized,
{
    let Some(parent) = ctx.parent(pos) else {
        return default_neighbors(ctx, pos, MoveMode::DiagNoObstacles);
    };
    let (dx, dy) = wide_dir(pos, parent);
    let (x, y) = widen(pos);
    let mut out = Neighbors::new();
    if dx != 0 && dy != 0 {
        let vertical = ctx.push_walkable(&mut out, x, y + dy);
        let horizontal = ctx.push_walkable(&mut out, x + dx, y);
        if vertical && horizontal {
            ctx.push_walkable(&mut out, x + dx, y + dy);
        }
    } else if dx != 0 {
        let ahead = ctx.push_walkable(&mut out, x + dx, y);
        let below = ctx.push_walkable(&mut out, x, y + 1);
        let above = ctx.push_walkable(&mut out, x, y - 1);
        if ahead && below {
            ctx.push_walkable(&mut out, x + dx, y + 1);
        }
        if ahead && above {
            ctx.push_walkable(&mut out, x + dx, y - 1);
        }
    } else {
        let ahead = ctx.push_walkable(&mut out, x, y + dy);
        let right = ctx.push_walkable(&mut out, x + 1, y);
        let left = ctx.push_walkable(&mut out, x - 1, y);
        if ahead && right {
            ctx.push_walkable(&mut out, x + 1, y + dy);
        }
        if ahead && left {
            ctx.push_walkable(&mut out, x - 1, y + dy);
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
            if narrow(x + dx, y).and_then(|p| jump(ctx, p, pos)).is_some()
                || narrow(x, y + dy).and_then(|p| jump(ctx, p, pos)).is_some()
            {
                return Some(pos);
            }
            if !(ctx.walkable(x + dx, y) && ctx.walkable(x, y + dy)) {
                return None;
            }
        } else if forced_straight_behind(ctx, x, y, dx, dy) {
            return Some(pos);
        }
        pos = narrow(x + dx, y + dy)?;
    }
}
