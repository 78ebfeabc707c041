//! Superposition of sprinkler footprints over the zone.
use std::ops::Range;

use glam::UVec2;

use crate::grid::Grid;
use crate::pattern::Footprint;

/// Intersection of `[center - half, center + half)` with `[0, limit)`, as the zone range and
/// the footprint index of its first element.
#[inline]
fn span(center: u32, half: u32, limit: usize) -> Option<(Range<usize>, usize)> {
    let start = i64::from(center) - i64::from(half);
    let end = i64::from(center) + i64::from(half);
    let lo = start.max(0);
    let hi = end.min(limit as i64);
    (lo < hi).then(|| (lo as usize..hi as usize, (lo - start) as usize))
}

/// Add the part of `sprinkler`'s footprint that falls on zone row `y` into `row`.
#[inline]
fn add_row(row: &mut [f64], y: usize, sprinkler: UVec2, footprint: &Footprint) {
    let half = footprint.half_size();
    let footprint_row = y as i64 - (i64::from(sprinkler.y) - i64::from(half.y));
    if footprint_row < 0 || footprint_row >= 2 * i64::from(half.y) {
        return;
    }
    let Some((columns, first_column)) = span(sprinkler.x, half.x, row.len()) else {
        return;
    };
    let source = &footprint.rates().row(footprint_row as usize)
        [first_column..first_column + columns.len()];
    for (acc, rate) in row[columns].iter_mut().zip(source) {
        *acc += *rate;
    }
}

/// Accumulate the footprint of every sprinkler into a zone of `zone_size` pixels.
///
/// Each footprint covers `[y - H, y + H) × [x - W, x + W)` around its sprinkler, with
/// `(W, H)` the footprint's half size. Parts outside the zone are clipped, never wrapped.
/// Positions are processed in row-major order regardless of their order in `sprinklers`,
/// so every permutation of the input gives a bit-identical result.
pub fn superpose(zone_size: UVec2, sprinklers: &[UVec2], footprint: &Footprint) -> Grid<f64> {
    let mut zone = Grid::with_size(zone_size);
    if zone.is_empty() || sprinklers.is_empty() || footprint.rates().is_empty() {
        return zone;
    }
    let mut ordered = sprinklers.to_vec();
    ordered.sort_unstable_by_key(|p| (p.y, p.x));
    accumulate(&mut zone, &ordered, footprint);
    zone
}

#[cfg(not(feature = "parallel"))]
fn accumulate(zone: &mut Grid<f64>, sprinklers: &[UVec2], footprint: &Footprint) {
    let height = zone.height();
    let half = footprint.half_size();
    for &sprinkler in sprinklers {
        let Some((rows, _)) = span(sprinkler.y, half.y, height) else {
            continue;
        };
        for y in rows {
            add_row(zone.row_mut(y), y, sprinkler, footprint);
        }
    }
}

/// Row bands are independent: each output row sums its sprinklers in the same order as the
/// serial path, so both produce identical bits.
#[cfg(feature = "parallel")]
fn accumulate(zone: &mut Grid<f64>, sprinklers: &[UVec2], footprint: &Footprint) {
    use rayon::prelude::*;

    let width = zone.width();
    zone.as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for &sprinkler in sprinklers {
                add_row(row, y, sprinkler, footprint);
            }
        });
}
