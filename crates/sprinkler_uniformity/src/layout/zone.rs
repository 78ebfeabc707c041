//! Tiling the sprinkler window across the zone.
use glam::UVec2;
use tracing::debug;

use crate::grid::Grid;
use crate::layout::{LayoutKind, Window};

/// OR the first `rows` rows of `tile` into `mask` with the tile's top-left at `(x0, y0)`.
/// Cells falling outside the mask are dropped.
fn stamp(mask: &mut Grid<bool>, tile: &Grid<bool>, x0: usize, y0: usize, rows: usize) {
    let rows = rows.min(tile.height()).min(mask.height().saturating_sub(y0));
    let cols = tile.width().min(mask.width().saturating_sub(x0));
    for ty in 0..rows {
        let src = &tile.row(ty)[..cols];
        let dst = &mut mask.row_mut(y0 + ty)[x0..x0 + cols];
        for (d, s) in dst.iter_mut().zip(src) {
            *d |= *s;
        }
    }
}

/// Mark every sprinkler position of the zone.
///
/// The window is stamped with a stride of one less than its size along each axis, so
/// neighbouring tiles share their edge row/column and corner sprinklers coincide. A tile is
/// only started while it begins strictly before `zone - tile` on that axis. Triangular
/// layouts finish with a half-height pass (top half of the tile, middle row included) below
/// the last full row of tiles to complete the staggered row.
///
/// A zone smaller than one tile can legitimately produce an empty mask.
pub fn generate_zone_mask(zone_pixels: UVec2, window: &Window) -> Grid<bool> {
    let mut mask = Grid::with_size(zone_pixels);
    let tile = window.cells();
    let (tile_w, tile_h) = (tile.width(), tile.height());
    let (zone_w, zone_h) = (mask.width(), mask.height());
    if tile_w < 2 || tile_h < 2 {
        return mask;
    }

    let columns = || (0..zone_w.saturating_sub(tile_w)).step_by(tile_w - 1);

    let mut row_passes = 0usize;
    for y in (0..zone_h.saturating_sub(tile_h)).step_by(tile_h - 1) {
        for x in columns() {
            stamp(&mut mask, tile, x, y, tile_h);
        }
        row_passes += 1;
    }

    if window.kind() == LayoutKind::Triangular {
        let y = row_passes * (tile_h - 1);
        let half_rows = tile_h / 2 + 1;
        if y < zone_h {
            for x in columns() {
                stamp(&mut mask, tile, x, y, half_rows);
            }
        }
    }

    debug!(
        "Zone mask {}x{} px: {} row passes with a {}x{} {} tile.",
        zone_w,
        zone_h,
        row_passes,
        tile_w,
        tile_h,
        window.kind()
    );
    mask
}

/// Sprinkler coordinates (`x` = column, `y` = row) of a mask in row-major order.
pub fn sprinkler_positions(mask: &Grid<bool>) -> Vec<UVec2> {
    mask.indexed_iter()
        .filter(|(_, placed)| **placed)
        .map(|((x, y), _)| UVec2::new(x as u32, y as u32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{build_window, PixelLayout};

    fn positions(layout: PixelLayout, width: u32, height: u32) -> Vec<(u32, u32)> {
        let window = build_window(&layout).unwrap();
        let mask = generate_zone_mask(UVec2::new(width, height), &window);
        sprinkler_positions(&mask)
            .into_iter()
            .map(|p| (p.x, p.y))
            .collect()
    }

    #[test]
    fn rectangular_tiles_share_edges() {
        let layout = PixelLayout::Rectangular {
            width: 4,
            height: 3,
        };
        assert_eq!(
            positions(layout, 10, 7),
            vec![
                (0, 0),
                (3, 0),
                (6, 0),
                (0, 2),
                (3, 2),
                (6, 2),
                (0, 4),
                (3, 4),
                (6, 4)
            ]
        );
    }

    #[test]
    fn triangular_layout_staggers_rows() {
        let got = positions(PixelLayout::Triangular { side: 4 }, 14, 16);
        let rows: Vec<u32> = {
            let mut rows: Vec<u32> = got.iter().map(|p| p.1).collect();
            rows.dedup();
            rows
        };
        assert_eq!(rows, vec![0, 3, 5, 8, 10, 13]);

        let xs_in_row = |row: u32| -> Vec<u32> {
            got.iter().filter(|p| p.1 == row).map(|p| p.0).collect()
        };
        assert_eq!(xs_in_row(0), vec![2, 5, 8, 11]);
        assert_eq!(xs_in_row(3), vec![0, 3, 6, 9, 12]);
        assert_eq!(xs_in_row(5), vec![2, 5, 8, 11]);
        // the final staggered row comes from the half-height pass
        assert_eq!(xs_in_row(13), vec![0, 3, 6, 9, 12]);
        assert_eq!(got.len(), 27);
    }

    #[test]
    fn zone_smaller_than_tile_is_empty() {
        let layout = PixelLayout::Rectangular {
            width: 4,
            height: 3,
        };
        assert!(positions(layout, 4, 3).is_empty());
    }

    #[test]
    fn half_pass_runs_without_full_rows() {
        assert_eq!(
            positions(PixelLayout::Triangular { side: 4 }, 5, 6),
            vec![(2, 0), (0, 3), (3, 3)]
        );
    }

    #[test]
    fn mask_matches_zone_size() {
        let window = build_window(&PixelLayout::Rectangular {
            width: 25,
            height: 25,
        })
        .unwrap();
        let mask = generate_zone_mask(UVec2::new(50, 50), &window);
        assert_eq!(mask.size(), UVec2::new(50, 50));
        let grid: Vec<(u32, u32)> = sprinkler_positions(&mask)
            .into_iter()
            .map(|p| (p.x, p.y))
            .collect();
        let mut expected = Vec::new();
        for y in [0, 24, 48] {
            for x in [0, 24, 48] {
                expected.push((x, y));
            }
        }
        assert_eq!(grid, expected);
    }
}
