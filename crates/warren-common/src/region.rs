//! Arbitrary point sets and rigid rotation.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::coords::Point;
use crate::rect::Rectangle;

/// A finite set of grid points, not necessarily rectangular.
///
/// Points are kept ordered so iteration is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    points: BTreeSet<Point>,
}

impl Region {
    /// Creates an empty region.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a region holding every cell of the rectangle.
    #[must_use]
    pub fn from_rectangle(rect: &Rectangle) -> Self {
        rect.positions().collect()
    }

    /// Iterates the points in ascending `(x, y)` order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().copied()
    }

    /// Number of distinct points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the region holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the point belongs to the region.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.points.contains(&point)
    }

    /// Adds a point, returning whether it was new.
    pub fn insert(&mut self, point: Point) -> bool {
        self.points.insert(point)
    }

    /// Smallest rectangle containing every point, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Rectangle> {
        let mut points = self.points();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(Rectangle::from_corners(min, max))
    }

    /// Whether any point of the region falls inside `area`.
    #[must_use]
    pub fn intersects(&self, area: &Rectangle) -> bool {
        self.points().any(|p| area.contains(p))
    }

    /// Rotates the region by `degrees` around `pivot`.
    ///
    /// Every point is mapped through the rotation and rounded to the nearest
    /// cell; points that collapse onto the same cell merge. Cells the rounded
    /// image skips are filled in when their inverse rotation rounds back into
    /// the source set, so rotating a partition of the plane still covers it.
    /// A rotation by zero degrees returns the same point set.
    #[must_use]
    pub fn rotate(&self, degrees: f64, pivot: Point) -> Self {
        let radians = degrees.to_radians();
        let forward = DVec2::from_angle(radians);
        let inverse = DVec2::from_angle(-radians);
        let origin = DVec2::new(f64::from(pivot.x), f64::from(pivot.y));
        let turn = |point: Point, rotation: DVec2| {
            let offset = DVec2::new(f64::from(point.x), f64::from(point.y)) - origin;
            let moved = rotation.rotate(offset) + origin;
            Point::new(moved.x.round() as i32, moved.y.round() as i32)
        };

        let mut rotated: Self = self.points().map(|p| turn(p, forward)).collect();
        if let Some(bounds) = rotated.bounds() {
            for candidate in bounds.expand(1).positions() {
                if self.contains(turn(candidate, inverse)) {
                    rotated.insert(candidate);
                }
            }
        }
        rotated
    }
}

impl FromIterator<Point> for Region {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl Extend<Point> for Region {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}
