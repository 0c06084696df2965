//! 4-connected movement.
use grid_util::point::Point;

use super::{default_neighbors, forced_straight_behind};
use super::{narrow, wide_dir, widen, JumpContext, MoveMode, Neighbors};
use crate::store::CellStore;

pub(super) fn find_neighbors<S>(ctx: &JumpContext<S>, pos: Point) -> Neighbors
where
    S: CellStore + ?Sized,
{
    let Some(parent) = ctx.parent(pos) else {
        return default_neighbors(ctx, pos, MoveMode::DiagNever);
    };
    let (dx, dy) = wide_dir(pos, parent);
    debug_assert!(dx == 0 || dy == 0);
    let (x, y) = widen(pos);
    let mut out = Neighbors::new();
    if dx != 0 {
        ctx.push_walkable(&mut out, x, y - 1);
        ctx.push_walkable(&mut out, x, y + 1);
        ctx.push_walkable(&mut out, x + dx, y);
    } else {
        ctx.push_walkable(&mut out, x - 1, y);
        ctx.push_walkable(&mut out, x + 1, y);
        ctx.push_walkable(&mut out, x, y + dy);
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
        if pos == ctx.goal || forced_straight_behind(ctx, x, y, dx, dy) {
            return Some(pos);
        }
        // Vertical rays probe sideways so a goal beside the ray is not jumped over.
        if dx == 0
            && (narrow(x + 1, y).and_then(|p| jump(ctx, p, pos)).is_some()
                || narrow(x - 1, y).and_then(|p| jump(ctx, p, pos)).is_some())
        {
            return Some(pos);
        }
        pos = narrow(x + dx, y + dy)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::tests::store_from;

    #[test]
    fn horizontal_rays_do_not_probe_sideways() {
        let store = store_from(&["....", "...."]);
        let ctx = JumpContext::new(&store, Point::new(2, 1));
        assert_eq!(jump(&ctx, Point::new(1, 0), Point::new(0, 0)), None);
        assert_eq!(
            jump(&ctx, Point::new(0, 1), Point::new(0, 0)),
            Some(Point::new(0, 1))
        );
    }

    #[test]
    fn neighbours_are_orthogonal() {
        let mut store = store_from(&["...", "...", "..."]);
        store.set_parent(Point::new(1, 1), Point::new(0, 1));
        let ctx = JumpContext::new(&store, Point::new(9, 9));
        let n = find_neighbors(&ctx, Point::new(1, 1));
        assert_eq!(
            n.as_slice(),
            &[Point::new(1, 0), Point::new(1, 2), Point::new(2, 1)]
        );
    }
}
