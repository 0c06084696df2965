//! Post-processing of found paths and small coordinate helpers.
use grid_util::point::Point;
use itertools::Itertools;

use crate::codec::PointCodec;
use crate::movement::dir;
use crate::Error;

/// Squared Euclidean distance, computed in 64 bits.
pub fn distance_sqr(a: Point, b: Point) -> i64 {
    let dx = a.x as i64 - b.x as i64;
    let dy = a.y as i64 - b.y as i64;
    dx * dx + dy * dy
}

pub fn euclidean(a: Point, b: Point) -> f64 {
    (distance_sqr(a, b) as f64).sqrt()
}

/// Turns waypoints into a path on the grid which can be followed step by step. Between two
/// waypoints both axes are stepped independently, so a gap that is not a straight or diagonal line
/// is filled diagonally first and straight after. Due to symmetry this is typically one of many
/// ways to follow the waypoints.
pub fn waypoints_to_path(waypoints: &[Point]) -> Vec<Point> {
    let Some((&first, rest)) = waypoints.split_first() else {
        return Vec::new();
    };
    let mut path = vec![first];
    let mut current = first;
    for &next in rest {
        while current != next {
            let (dx, dy) = dir(next, current);
            current = Point::new(current.x + dx, current.y + dy);
            path.push(current);
        }
    }
    path
}

/// Summed length of the segments from `start` through every waypoint.
pub fn path_cost(start: Point, waypoints: &[Point]) -> f64 {
    std::iter::once(&start)
        .chain(waypoints)
        .tuple_windows()
        .map(|(a, b)| euclidean(*a, *b))
        .sum()
}

fn trimmed_len<I>(points: I, len: usize, end: Point, tolerance_sqr: i64) -> (usize, bool)
where
    I: DoubleEndedIterator<Item = Point>,
{
    let within = points
        .rev()
        .take_while(|p| distance_sqr(*p, end) <= tolerance_sqr)
        .count();
    // Keep one point inside the tolerance zone past the last point outside it.
    ((len - within + 1).min(len), within > 0)
}

/// Drops trailing points within `tolerance_sqr` (squared distance) of `end`. The first point of
/// the trailing run is kept so the path still reaches into the tolerance zone, and at least one
/// point always remains. Also reports whether any trailing point was within tolerance.
pub fn trim_tail(path: &[Point], end: Point, tolerance_sqr: i64) -> (Vec<Point>, bool) {
    let (len, trimmed) = trimmed_len(path.iter().copied(), path.len(), end, tolerance_sqr);
    (path[..len].to_vec(), trimmed)
}

pub fn encode_path<C: PointCodec>(path: &[Point], codec: &C) -> Vec<C::Key> {
    path.iter().map(|p| codec.encode(*p)).collect()
}

pub fn decode_path<C: PointCodec>(keys: &[C::Key], codec: &C) -> Result<Vec<Point>, Error> {
    keys.iter().map(|k| codec.decode(k)).collect()
}

/// [waypoints_to_path] over codec keys.
pub fn expand_keys<C: PointCodec>(keys: &[C::Key], codec: &C) -> Result<Vec<C::Key>, Error> {
    let waypoints = decode_path(keys, codec)?;
    Ok(encode_path(&waypoints_to_path(&waypoints), codec))
}

/// [trim_tail] over codec keys.
pub fn trim_tail_keys<C: PointCodec>(
    keys: &[C::Key],
    end: Point,
    tolerance_sqr: i64,
    codec: &C,
) -> Result<(Vec<C::Key>, bool), Error> {
    let points = decode_path(keys, codec)?;
    let (len, trimmed) = trimmed_len(points.into_iter(), keys.len(), end, tolerance_sqr);
    Ok((keys[..len].to_vec(), trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{PackedCodec, StringCodec};

    fn points(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn expansion_fills_every_step() {
        let waypoints = points(&[(0, 0), (3, 0), (5, 2), (5, 4)]);
        let path = waypoints_to_path(&waypoints);
        assert_eq!(
            path,
            points(&[
                (0, 0),
                (1, 0),
                (2, 0),
                (3, 0),
                (4, 1),
                (5, 2),
                (5, 3),
                (5, 4)
            ])
        );
        for (a, b) in path.iter().tuple_windows() {
            assert_eq!((a.x - b.x).abs().max((a.y - b.y).abs()), 1);
        }
    }

    #[test]
    fn expansion_of_uneven_gap_is_diagonal_then_straight() {
        let path = waypoints_to_path(&points(&[(0, 0), (3, 1)]));
        assert_eq!(path, points(&[(0, 0), (1, 1), (2, 1), (3, 1)]));
    }

    #[test]
    fn expansion_is_identity_on_stepped_paths() {
        let stepped = points(&[(0, 0), (1, 1), (1, 2), (0, 3), (-1, 3)]);
        assert_eq!(waypoints_to_path(&stepped), stepped);
        assert!(waypoints_to_path(&[]).is_empty());
        assert_eq!(waypoints_to_path(&stepped[..1]), stepped[..1]);
    }

    #[test]
    fn trim_with_zero_tolerance_keeps_last_point() {
        let path = points(&[(0, 0), (1, 0), (2, 0)]);
        let (trimmed, ok) = trim_tail(&path, Point::new(2, 0), 0);
        assert!(ok);
        assert_eq!(trimmed, path);
    }

    #[test]
    fn trim_removes_tail_inside_tolerance() {
        let path = points(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
        let (trimmed, ok) = trim_tail(&path, Point::new(4, 0), 4);
        assert!(ok);
        // (2, 0) is the first point within tolerance and is kept.
        assert_eq!(trimmed, points(&[(0, 0), (1, 0), (2, 0)]));

        let (untouched, ok) = trim_tail(&path, Point::new(10, 10), 1);
        assert!(!ok);
        assert_eq!(untouched, path);
    }

    #[test]
    fn trim_with_huge_tolerance_leaves_one_point() {
        let path = points(&[(0, 0), (1, 0), (2, 0)]);
        let (trimmed, ok) = trim_tail(&path, Point::new(2, 0), i64::MAX);
        assert!(ok);
        assert_eq!(trimmed, points(&[(0, 0)]));
        assert_eq!(trim_tail(&[], Point::new(0, 0), 5), (Vec::new(), false));
    }

    #[test]
    fn key_paths() {
        let keys = vec!["0_0".to_owned(), "2_2".to_owned(), "2_4".to_owned()];
        let expanded = expand_keys(&keys, &StringCodec).unwrap();
        assert_eq!(expanded, ["0_0", "1_1", "2_2", "2_3", "2_4"]);
        let (trimmed, ok) = trim_tail_keys(&expanded, Point::new(2, 4), 1, &StringCodec).unwrap();
        assert!(ok);
        assert_eq!(trimmed, ["0_0", "1_1", "2_2", "2_3"]);
        assert!(expand_keys(&["nope".to_owned()], &StringCodec).is_err());

        let packed = encode_path(&points(&[(0, 0), (-2, 0)]), &PackedCodec);
        let expanded = expand_keys(&packed, &PackedCodec).unwrap();
        assert_eq!(
            decode_path(&expanded, &PackedCodec).unwrap(),
            points(&[(0, 0), (-1, 0), (-2, 0)])
        );
    }

    #[test]
    fn path_costs() {
        let cost = path_cost(Point::new(0, 0), &points(&[(3, 0), (3, 4)]));
        assert!((cost - 7.0).abs() < 1e-9);
        assert_eq!(path_cost(Point::new(1, 1), &[]), 0.0);
        assert_eq!(distance_sqr(Point::new(-3, 0), Point::new(3, 8)), 100);
    }
}
