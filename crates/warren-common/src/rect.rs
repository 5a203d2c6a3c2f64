//! Axis-aligned rectangles and recursive bisection.
//!
//! # Example
//!
//! ```
//! use warren_common::{FixedSequence, Rectangle};
//!
//! let area = Rectangle::new(0, 0, 12, 6);
//! let mut rng = FixedSequence::new(vec![0]);
//! let pieces: Vec<_> = area.bisect_recursive(4, &mut rng).collect();
//!
//! assert!(pieces.iter().all(|r| r.width() >= 4 && r.height() >= 4));
//! ```

use serde::{Deserialize, Serialize};

use crate::coords::Point;
use crate::random::RandomSource;

/// An immutable axis-aligned rectangle of grid cells.
///
/// Defined by its top-left corner and its size. A rectangle with a zero
/// width or height contains no cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Rectangle {
    /// Creates a rectangle from its top-left corner and size.
    ///
    /// Negative sizes are clamped to zero.
    #[must_use]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// Creates a rectangle spanning two inclusive corner points.
    #[must_use]
    pub fn from_corners(min: Point, max: Point) -> Self {
        Self::new(min.x, min.y, max.x - min.x + 1, max.y - min.y + 1)
    }

    /// Top-left corner.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width in cells.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells covered.
    #[must_use]
    pub const fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    /// Whether the rectangle covers no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Smallest contained X coordinate.
    #[must_use]
    pub const fn min_x(&self) -> i32 {
        self.x
    }

    /// Largest contained X coordinate.
    #[must_use]
    pub const fn max_x(&self) -> i32 {
        self.x + self.width - 1
    }

    /// Smallest contained Y coordinate.
    #[must_use]
    pub const fn min_y(&self) -> i32 {
        self.y
    }

    /// Largest contained Y coordinate.
    #[must_use]
    pub const fn max_y(&self) -> i32 {
        self.y + self.height - 1
    }

    /// Center cell, rounding toward the top-left.
    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Whether the point lies inside the rectangle.
    #[must_use]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }

    /// Whether the point lies on the rectangle's boundary.
    #[must_use]
    pub const fn is_perimeter(&self, point: Point) -> bool {
        self.contains(point)
            && (point.x == self.min_x()
                || point.x == self.max_x()
                || point.y == self.min_y()
                || point.y == self.max_y())
    }

    /// Every contained cell exactly once, in row-major order.
    ///
    /// The iterator is lazy and can be cloned to restart it.
    pub fn positions(&self) -> impl Iterator<Item = Point> + Clone {
        let Self {
            x,
            y,
            width,
            height,
        } = *self;
        (y..y + height).flat_map(move |row| (x..x + width).map(move |col| Point::new(col, row)))
    }

    /// Boundary cells only, each exactly once, in row-major order.
    pub fn perimeter_positions(&self) -> impl Iterator<Item = Point> + Clone {
        let rect = *self;
        self.positions().filter(move |p| rect.is_perimeter(*p))
    }

    /// Cells that are contained but not on the boundary.
    pub fn interior_positions(&self) -> impl Iterator<Item = Point> + Clone {
        let rect = *self;
        self.positions().filter(move |p| !rect.is_perimeter(*p))
    }

    /// Returns this rectangle grown by `amount` cells on every side.
    #[must_use]
    pub fn expand(&self, amount: i32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2,
            self.height + amount * 2,
        )
    }

    /// Splits the rectangle once along a randomly chosen axis.
    ///
    /// The two halves share the row or column they were cut along, and both
    /// are at least `min_dimension` (and at least two cells) along the cut
    /// axis. Returns `None` when neither axis is long enough to split.
    pub fn bisect<R: RandomSource + ?Sized>(
        &self,
        min_dimension: i32,
        rng: &mut R,
    ) -> Option<(Self, Self)> {
        let across_x = split_bounds(self.width, min_dimension);
        let across_y = split_bounds(self.height, min_dimension);

        let cut_columns = match (across_x, across_y) {
            (None, None) => return None,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (Some(_), Some(_)) => rng.range(0, 2) == 0,
        };

        if cut_columns {
            let (lo, hi) = across_x?;
            let offset = rng.range(lo, hi + 1);
            Some((
                Self::new(self.x, self.y, offset + 1, self.height),
                Self::new(self.x + offset, self.y, self.width - offset, self.height),
            ))
        } else {
            let (lo, hi) = across_y?;
            let offset = rng.range(lo, hi + 1);
            Some((
                Self::new(self.x, self.y, self.width, offset + 1),
                Self::new(self.x, self.y + offset, self.width, self.height - offset),
            ))
        }
    }

    /// Lazily bisects the rectangle until no piece can be split further.
    ///
    /// Pieces are produced depth first, first half before second half. A
    /// rectangle already smaller than `min_dimension` is yielded unsplit.
    pub fn bisect_recursive<'a, R: RandomSource + ?Sized>(
        &self,
        min_dimension: i32,
        rng: &'a mut R,
    ) -> BisectRecursive<'a, R> {
        BisectRecursive {
            pending: vec![*self],
            min_dimension,
            rng,
        }
    }
}

/// Range of cut offsets that leave both halves at least `min_dimension`.
///
/// Halves share the cut line, so a piece of `extent` cells cut at `offset`
/// produces pieces of `offset + 1` and `extent - offset` cells.
fn split_bounds(extent: i32, min_dimension: i32) -> Option<(i32, i32)> {
    let lo = (min_dimension - 1).max(1);
    let hi = extent - min_dimension.max(2);
    (lo <= hi).then_some((lo, hi))
}

/// Iterator returned by [`Rectangle::bisect_recursive`].
pub struct BisectRecursive<'a, R: RandomSource + ?Sized> {
    pending: Vec<Rectangle>,
    min_dimension: i32,
    rng: &'a mut R,
}

impl<R: RandomSource + ?Sized> Iterator for BisectRecursive<'_, R> {
    type Item = Rectangle;

    fn next(&mut self) -> Option<Rectangle> {
        while let Some(rect) = self.pending.pop() {
            match rect.bisect(self.min_dimension, &mut *self.rng) {
                Some((first, second)) => {
                    self.pending.push(second);
                    self.pending.push(first);
                },
                None => return Some(rect),
            }
        }
        None
    }
}
