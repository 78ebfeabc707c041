//! The repeating sprinkler tile ("window") of a layout.
use glam::UVec2;

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::layout::{LayoutKind, PixelLayout, MIN_TILE_PIXELS};

/// Boolean placement template for one tile of the sprinkler lattice.
#[derive(Clone, Debug, PartialEq)]
pub struct Window {
    cells: Grid<bool>,
    kind: LayoutKind,
}

impl Window {
    /// Placement cells; `true` marks a sprinkler.
    pub fn cells(&self) -> &Grid<bool> {
        &self.cells
    }

    pub fn kind(&self) -> LayoutKind {
        self.kind
    }

    /// Tile size as `(width, height)` in pixels.
    pub fn size(&self) -> UVec2 {
        self.cells.size()
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    /// Sprinkler positions inside the tile, row-major.
    pub fn positions(&self) -> Vec<UVec2> {
        self.cells
            .indexed_iter()
            .filter(|(_, placed)| **placed)
            .map(|((x, y), _)| UVec2::new(x as u32, y as u32))
            .collect()
    }
}

/// Build the placement tile for a layout.
///
/// Triangular tiles are `2h × side` (with `h` the rounded triangle altitude) and hold the two
/// staggered rows of an equilateral lattice: top-middle, left and right at mid height, and
/// bottom-middle. Rectangular tiles are `height × width` with a sprinkler in each corner.
pub fn build_window(layout: &PixelLayout) -> Result<Window> {
    let (width, height) = match *layout {
        PixelLayout::Triangular { side } => {
            let h = layout.triangle_height().unwrap_or(0);
            (side, 2 * h)
        }
        PixelLayout::Rectangular { width, height } => (width, height),
    };
    if width < MIN_TILE_PIXELS || height < MIN_TILE_PIXELS {
        return Err(Error::InvalidConfig(format!(
            "{} tile of {width}x{height} px is too small; both sides need at least \
             {MIN_TILE_PIXELS} px",
            layout.kind()
        )));
    }

    let (w, h) = (width as usize, height as usize);
    let mut cells = Grid::new(w, h);
    match layout.kind() {
        LayoutKind::Triangular => {
            let (mid_x, mid_y) = (w / 2, h / 2);
            cells.set(mid_x, 0, true);
            cells.set(0, mid_y, true);
            cells.set(w - 1, mid_y, true);
            cells.set(mid_x, h - 1, true);
        }
        LayoutKind::Rectangular => {
            cells.set(0, 0, true);
            cells.set(w - 1, 0, true);
            cells.set(0, h - 1, true);
            cells.set(w - 1, h - 1, true);
        }
    }

    Ok(Window {
        cells,
        kind: layout.kind(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangular_window_marks_corners() {
        let window = build_window(&PixelLayout::Rectangular {
            width: 4,
            height: 3,
        })
        .unwrap();
        assert_eq!(window.size(), UVec2::new(4, 3));
        assert_eq!(window.kind(), LayoutKind::Rectangular);
        assert_eq!(
            window.positions(),
            vec![
                UVec2::new(0, 0),
                UVec2::new(3, 0),
                UVec2::new(0, 2),
                UVec2::new(3, 2)
            ]
        );
    }

    #[test]
    fn triangular_window_marks_staggered_rows() {
        // side 4 -> h = round(3.464) = 3, tile 6 rows x 4 columns
        let window = build_window(&PixelLayout::Triangular { side: 4 }).unwrap();
        assert_eq!(window.size(), UVec2::new(4, 6));
        assert_eq!(window.kind(), LayoutKind::Triangular);
        assert_eq!(
            window.positions(),
            vec![
                UVec2::new(2, 0),
                UVec2::new(0, 3),
                UVec2::new(3, 3),
                UVec2::new(2, 5)
            ]
        );
    }

    #[test]
    fn triangular_window_at_default_resolution() {
        let window = build_window(&PixelLayout::Triangular { side: 25 }).unwrap();
        assert_eq!(window.size(), UVec2::new(25, 44));
        assert_eq!(window.positions().len(), 4);
    }

    #[test]
    fn zero_spacing_fails_fast() {
        let err = build_window(&PixelLayout::Rectangular {
            width: 0,
            height: 5,
        })
        .unwrap_err();
        assert!(err.is_config());
        assert!(build_window(&PixelLayout::Triangular { side: 1 }).is_err());
    }
}
