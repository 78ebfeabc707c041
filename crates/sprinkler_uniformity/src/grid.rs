//! Dense row-major 2D storage shared by every pipeline stage.
//!
//! [`Grid`] backs the sprinkler window, the zone mask, the precipitation quadrant and
//! footprint, and the accumulated zone. Coordinates are `(x, y)` = `(column, row)`.
use std::ops::Range;

use glam::UVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A fixed-size 2D grid stored row by row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    /// Create a grid of the given size filled with `T::default()`.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }

    /// Create a grid sized by a pixel extent (`x` = width, `y` = height).
    pub fn with_size(size: UVec2) -> Self {
        Self::new(size.x as usize, size.y as usize)
    }

    /// Copy the intersection of `columns` × `rows` with the grid bounds into a new grid.
    ///
    /// Ranges reaching past the grid are clipped; a range starting past the edge yields an
    /// empty grid.
    pub fn crop(&self, columns: Range<usize>, rows: Range<usize>) -> Self {
        let x0 = columns.start.min(self.width);
        let x1 = columns.end.clamp(x0, self.width);
        let y0 = rows.start.min(self.height);
        let y1 = rows.end.clamp(y0, self.height);
        let width = x1 - x0;
        let height = y1 - y0;

        let mut data = Vec::with_capacity(width * height);
        for y in y0..y1 {
            data.extend_from_slice(&self.row(y)[x0..x1]);
        }
        Self {
            width,
            height,
            data,
        }
    }
}

impl<T> Grid<T> {
    /// Build a grid by evaluating `f(x, y)` for every cell in row-major order.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap an existing row-major buffer. Returns `None` if the length does not match.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Option<Self> {
        (data.len() == width * height).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Size as `(width, height)`.
    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width as u32, self.height as u32)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Get the value at `(x, y)`, or `None` if out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        self.index(x, y).map(|i| &self.data[i])
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        self.index(x, y).map(|i| &mut self.data[i])
    }

    /// Set the value at `(x, y)`. Writes outside the grid are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = value;
        }
    }

    /// Borrow row `y`. Panics if `y` is out of bounds.
    pub fn row(&self, y: usize) -> &[T] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Mutably borrow row `y`. Panics if `y` is out of bounds.
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        &mut self.data[y * self.width..(y + 1) * self.width]
    }

    /// Iterate over rows from top (`y = 0`) to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact(0) panics, and a zero-width grid has no cells anyway
        self.data.chunks_exact(self.width.max(1)).take(self.height)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[cfg(feature = "parallel")]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterate over `((x, y), &value)` in row-major order.
    pub fn indexed_iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        let width = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(i, v)| ((i % width, i / width), v))
    }
}

impl<T: Copy> Grid<T> {
    /// Get a copy of the value at `(x, y)`, or `fallback` if out of bounds.
    pub fn get_or(&self, x: usize, y: usize, fallback: T) -> T {
        self.get(x, y).copied().unwrap_or(fallback)
    }
}

impl Grid<f64> {
    /// Largest value in the grid, or `None` when empty.
    pub fn max_value(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::max)
    }

    /// Sum of all cells, accumulated in row-major order.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}
