//! Drawing plane geometry
//!
//! The plane is a bounded 2D integer coordinate space. It decides which of
//! its four edges a motion segment crosses, in what order, and exactly where,
//! so the board can clip pen movement at the edge.
//!
//! Intercepts are solved with exact integer rational arithmetic. Binary
//! floating point would drift on long segments and break the half-away-from-
//! zero rounding contract at the midpoint.

use std::fmt;
use std::ops::Add;

/// A point on the drawing plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Point { x, y }
    }

    /// The origin `(0, 0)`.
    pub const ORIGIN: Point = Point::new(0, 0);
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One axis of the plane: an inclusive lower and upper bound.
///
/// Construction does not require `lower <= upper`. An inverted axis is
/// accepted as given; nothing is ever strictly between its bounds, so no
/// boundary on it is ever reported crossed and no point is inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axis {
    pub lower: i64,
    pub upper: i64,
}

impl Axis {
    pub const fn new(lower: i64, upper: i64) -> Self {
        Axis { lower, upper }
    }
}

impl Default for Axis {
    fn default() -> Self {
        Axis {
            lower: -8192,
            upper: 8191,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lower, self.upper)
    }
}

/// One of the four edges of the plane, in fixed detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    XLower,
    XUpper,
    YLower,
    YUpper,
}

/// Where a motion segment crosses a boundary, and how far along it.
///
/// The distance is carried as the exact squared Euclidean length from the
/// segment start to the intercept. Squared lengths order the same way the
/// true lengths do, without an inexact square root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intercept {
    pub point: Point,
    pub distance_sq: i128,
}

impl Intercept {
    /// Approximate Euclidean distance, for display and debugging only.
    /// Ordering always uses `distance_sq`.
    pub fn distance(&self) -> f64 {
        (self.distance_sq as f64).sqrt()
    }
}

/// A bounded 2D drawing space made of two independent axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Plane {
    pub x_axis: Axis,
    pub y_axis: Axis,
}

impl Plane {
    pub const fn new(x_axis: Axis, y_axis: Axis) -> Self {
        Plane { x_axis, y_axis }
    }

    /// Boundaries crossed by the segment from `start` to `end`, in detection
    /// order (X-lower, X-upper, Y-lower, Y-upper).
    ///
    /// A boundary is crossed iff its coordinate lies strictly between the two
    /// endpoint coordinates on its axis, in either direction of traversal.
    /// Detection order is not chronological order; see
    /// [`Plane::boundary_intercepts`] for that.
    pub fn boundaries_crossed(&self, start: Point, end: Point) -> Vec<Boundary> {
        let mut crossed = Vec::new();

        if strictly_between(start.x, end.x, self.x_axis.lower) {
            crossed.push(Boundary::XLower);
        }
        if strictly_between(start.x, end.x, self.x_axis.upper) {
            crossed.push(Boundary::XUpper);
        }
        if strictly_between(start.y, end.y, self.y_axis.lower) {
            crossed.push(Boundary::YLower);
        }
        if strictly_between(start.y, end.y, self.y_axis.upper) {
            crossed.push(Boundary::YUpper);
        }

        crossed
    }

    /// Points where the segment from `start` to `end` crosses the plane
    /// edges, sorted ascending by distance from `start`.
    ///
    /// Sorting restores chronological crossing order, including the case
    /// where the segment leaves through one edge and, extended, would cross a
    /// second edge further out. The sort is stable, so equidistant crossings
    /// (a corner exit) keep detection order.
    pub fn boundary_intercepts(&self, start: Point, end: Point) -> Vec<Intercept> {
        let mut intercepts: Vec<Intercept> = self
            .boundaries_crossed(start, end)
            .into_iter()
            .map(|boundary| {
                let point = self.solve_intercept(boundary, start, end);
                Intercept {
                    point,
                    distance_sq: distance_sq(start, point),
                }
            })
            .collect();

        intercepts.sort_by_key(|intercept| intercept.distance_sq);
        intercepts
    }

    /// True iff `point` is strictly inside both axes. Points exactly on a
    /// boundary are outside for this predicate, even though they are valid
    /// clipped output positions.
    pub fn contains(&self, point: Point) -> bool {
        self.x_axis.lower < point.x
            && point.x < self.x_axis.upper
            && self.y_axis.lower < point.y
            && point.y < self.y_axis.upper
    }

    /// Resolve the unknown coordinate of a boundary crossing with the exact
    /// point-slope line equation through `start`/`end`.
    ///
    /// The crossing test guarantees the relevant axis deltas differ, so the
    /// denominator is never zero. For a segment perpendicular to the solved
    /// axis the rational form collapses to a direct assignment.
    fn solve_intercept(&self, boundary: Boundary, start: Point, end: Point) -> Point {
        match boundary {
            Boundary::XLower => {
                let x = self.x_axis.lower;
                Point::new(x, line_y_at(start, end, x))
            }
            Boundary::XUpper => {
                let x = self.x_axis.upper;
                Point::new(x, line_y_at(start, end, x))
            }
            Boundary::YLower => {
                let y = self.y_axis.lower;
                Point::new(line_x_at(start, end, y), y)
            }
            Boundary::YUpper => {
                let y = self.y_axis.upper;
                Point::new(line_x_at(start, end, y), y)
            }
        }
    }
}

/// Strictly between `a` and `b`, whichever of the two is smaller.
fn strictly_between(a: i64, b: i64, value: i64) -> bool {
    (a < value && value < b) || (b < value && value < a)
}

/// Squared Euclidean distance between two points. Exact.
fn distance_sq(a: Point, b: Point) -> i128 {
    let dx = (b.x - a.x) as i128;
    let dy = (b.y - a.y) as i128;
    dx * dx + dy * dy
}

/// y-coordinate of the line through `start`/`end` at `x`, rounded to the
/// nearest integer with ties away from zero.
///
/// Requires `start.x != end.x`.
fn line_y_at(start: Point, end: Point, x: i64) -> i64 {
    let dx = (end.x - start.x) as i128;
    let dy = (end.y - start.y) as i128;
    let numer = start.y as i128 * dx + dy * (x - start.x) as i128;
    div_round_half_away(numer, dx)
}

/// x-coordinate of the line through `start`/`end` at `y`, rounded to the
/// nearest integer with ties away from zero.
///
/// Requires `start.y != end.y`.
fn line_x_at(start: Point, end: Point, y: i64) -> i64 {
    let dx = (end.x - start.x) as i128;
    let dy = (end.y - start.y) as i128;
    let numer = start.x as i128 * dy + dx * (y - start.y) as i128;
    div_round_half_away(numer, dy)
}

/// `numer / denom` rounded to the nearest integer, ties away from zero.
fn div_round_half_away(numer: i128, denom: i128) -> i64 {
    debug_assert!(denom != 0);

    // Normalize so the denominator is positive; the remainder then carries
    // the sign of the numerator.
    let (numer, denom) = if denom < 0 {
        (-numer, -denom)
    } else {
        (numer, denom)
    };

    let quot = numer / denom;
    let rem = numer % denom;

    if 2 * rem.abs() >= denom {
        if numer < 0 {
            (quot - 1) as i64
        } else {
            (quot + 1) as i64
        }
    } else {
        quot as i64
    }
}
