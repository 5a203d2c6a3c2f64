//! Fixed-size 2D grids.

use serde::{Deserialize, Serialize};

use crate::coords::Point;
use crate::error::{WarrenError, WarrenResult};
use crate::rect::Rectangle;

/// A fixed-size, row-major 2D array of values with its origin at (0, 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    /// Width in cells
    width: usize,
    /// Height in cells
    height: usize,
    /// Cell data (width × height values)
    cells: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    /// Creates a grid filled with `T::default()`.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::default())
    }
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `value`.
    #[must_use]
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    /// Copies every cell of `source` onto this grid.
    ///
    /// Both grids must have identical extents; nothing is copied otherwise.
    pub fn overlay(&mut self, source: &Self) -> WarrenResult<()> {
        if self.extent() != source.extent() {
            return Err(WarrenError::ExtentMismatch {
                expected: self.extent(),
                actual: source.extent(),
            });
        }
        self.cells.clone_from_slice(&source.cells);
        Ok(())
    }
}

impl<T> Grid<T> {
    /// Width in cells.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)` pair.
    #[must_use]
    pub const fn extent(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// The rectangle covering every cell.
    #[must_use]
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Whether the point addresses a cell of this grid.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.index_of(point).is_some()
    }

    fn index_of(&self, point: Point) -> Option<usize> {
        let index = point.to_index(self.width)?;
        (index < self.cells.len()).then_some(index)
    }

    fn out_of_bounds(&self, point: Point) -> WarrenError {
        WarrenError::OutOfBounds {
            x: point.x,
            y: point.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Gets the cell at `point`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, point: Point) -> Option<&T> {
        self.index_of(point).map(|i| &self.cells[i])
    }

    /// Gets the cell at `point`, failing with `OutOfBounds` outside the grid.
    pub fn cell(&self, point: Point) -> WarrenResult<&T> {
        self.get(point).ok_or_else(|| self.out_of_bounds(point))
    }

    /// Mutable access to the cell at `point`.
    pub fn cell_mut(&mut self, point: Point) -> WarrenResult<&mut T> {
        match self.index_of(point) {
            Some(index) => Ok(&mut self.cells[index]),
            None => Err(self.out_of_bounds(point)),
        }
    }

    /// Sets the cell at `point`.
    pub fn set(&mut self, point: Point, value: T) -> WarrenResult<()> {
        *self.cell_mut(point)? = value;
        Ok(())
    }

    /// Every cell position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Point> + Clone {
        let width = self.width;
        (0..self.cells.len()).map(move |i| Point::from_index(i, width))
    }

    /// Row-major cell values.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Counts the cells matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&T) -> bool) -> usize {
        self.cells.iter().filter(|c| predicate(c)).count()
    }

    /// Builds a grid of the same extent by transforming every cell.
    #[must_use]
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

impl Grid<bool> {
    /// Renders a walkability grid as text, `.` for floor and `#` for wall.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width.max(1)) {
            out.extend(row.iter().map(|&walkable| if walkable { '.' } else { '#' }));
            out.push('\n');
        }
        out
    }
}
