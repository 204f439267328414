//! Integer plane coordinates.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{Coord, Weight};

/// Point on the integer plane. The y axis grows downwards, like screen space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Coordinate {
    pub x: Coord,
    pub y: Coord,
}

impl Coordinate {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Coordinate { x, y }
    }

    /// Euclidean distance to `other`
    #[inline]
    pub fn distance(&self, other: &Coordinate) -> Weight {
        distance(*self, *other)
    }
}

impl From<(Coord, Coord)> for Coordinate {
    fn from((x, y): (Coord, Coord)) -> Self {
        Coordinate { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Euclidean distance between two coordinates.
///
/// Differences are taken in `f64` so extreme coordinates cannot overflow.
pub fn distance(a: Coordinate, b: Coordinate) -> Weight {
    let dx = b.x as f64 - a.x as f64;
    let dy = b.y as f64 - a.y as f64;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_is_euclidean() {
        let a = Coordinate::new(0, 0);
        let b = Coordinate::new(3, 4);

        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
        assert_eq!(a.distance(&a), 0.0);
        assert_relative_eq!(
            distance(Coordinate::new(10, 10), Coordinate::new(20, 0)),
            200f64.sqrt()
        );
    }

    #[test]
    fn no_overflow_on_extreme_coordinates() {
        let a = Coordinate::new(i32::MIN, 0);
        let b = Coordinate::new(i32::MAX, 0);
        assert_relative_eq!(a.distance(&b), u32::MAX as f64);
    }
}
