//! Conversion between grid coordinates and compact map keys, so that cell state can live in a
//! hash map when only a small part of the coordinate space is ever explored.
use core::fmt::Debug;
use std::hash::Hash;

use grid_util::point::Point;

use crate::Error;

/// A bijection between [Point] and an opaque, comparable key.
pub trait PointCodec {
    type Key: Clone + Eq + Ord + Hash + Debug;

    fn encode(&self, point: Point) -> Self::Key;
    fn decode(&self, key: &Self::Key) -> Result<Point, Error>;
}

/// Human readable `"x_y"` keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StringCodec;

impl PointCodec for StringCodec {
    type Key = String;

    fn encode(&self, point: Point) -> String {
        format!("{}_{}", point.x, point.y)
    }

    fn decode(&self, key: &String) -> Result<Point, Error> {
        // A leading minus sign never contains '_', so the first separator is the right one.
        let (x, y) = key
            .split_once('_')
            .ok_or_else(|| Error::MissingSeparator(key.clone()))?;
        let parse = |s: &str| {
            s.parse::<i32>().map_err(|source| Error::InvalidComponent {
                key: key.clone(),
                source,
            })
        };
        let point = Point::new(parse(x)?, parse(y)?);
        // Only the exact spelling produced by `encode` is accepted, so keys map one to one.
        if self.encode(point) != *key {
            return Err(Error::NonCanonicalKey(key.clone()));
        }
        Ok(point)
    }
}

/// Packs `x` and `y` as little-endian 32 bit values into an 8 byte key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PackedCodec;

impl PointCodec for PackedCodec {
    type Key = [u8; 8];

    fn encode(&self, point: Point) -> [u8; 8] {
        let mut key = [0; 8];
        key[..4].copy_from_slice(&point.x.to_le_bytes());
        key[4..].copy_from_slice(&point.y.to_le_bytes());
        key
    }

    fn decode(&self, key: &[u8; 8]) -> Result<Point, Error> {
        let [x0, x1, x2, x3, y0, y1, y2, y3] = *key;
        Ok(Point::new(
            i32::from_le_bytes([x0, x1, x2, x3]),
            i32::from_le_bytes([y0, y1, y2, y3]),
        ))
    }
}
