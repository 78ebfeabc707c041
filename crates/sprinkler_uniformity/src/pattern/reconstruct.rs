//! Dense one-quadrant precipitation raster from sparse measurements.
use glam::UVec2;
use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::layout::meters_to_pixels;
use crate::pattern::measurement::MeasurementTable;

/// Largest quadrant edge, in pixels, a measurement table may span.
pub const MAX_QUADRANT_PIXELS: u32 = 1 << 16;

/// Slack for pixels that sit exactly halfway between two samples.
const TIE_TOLERANCE: f64 = 1e-9;

/// Precipitation of one sprinkler over the quadrant `x ≥ 0`, `y ≥ 0`, indexed by pixel
/// offset from the sprinkler.
#[derive(Clone, Debug, PartialEq)]
pub struct Quadrant {
    rates: Grid<f64>,
    step_px: f64,
}

impl Quadrant {
    /// Wrap a raster that is already in quadrant orientation (offset `(0, 0)` at the
    /// sprinkler). Returns `None` for an empty raster.
    pub fn from_rates(rates: Grid<f64>) -> Option<Self> {
        (!rates.is_empty()).then_some(Self {
            rates,
            step_px: 1.0,
        })
    }

    pub fn rates(&self) -> &Grid<f64> {
        &self.rates
    }

    /// Pixel distance between adjacent measurement samples; 1 for a single sample.
    pub fn step_px(&self) -> f64 {
        self.step_px
    }

    /// Size as `(width, height)` in pixels.
    pub fn size(&self) -> UVec2 {
        self.rates.size()
    }
}

/// One axis of the sample grid, in meters.
#[derive(Clone, Copy, Debug)]
struct SampleAxis {
    origin: f64,
    step: f64,
    count: usize,
}

impl SampleAxis {
    /// For each pixel offset `0..=last`, the index of the nearest sample.
    ///
    /// A pixel exactly between two samples belongs to the farther one. Pixels before the
    /// first sample take the first sample, pixels past the last take the last.
    fn nearest_samples(&self, resolution: u32, last: u32) -> Vec<usize> {
        let scale = f64::from(resolution);
        let max_index = self.count.saturating_sub(1);
        (0..=last)
            .map(|p| {
                let position = (f64::from(p) / scale - self.origin) / self.step;
                let k = (position + 0.5 + TIE_TOLERANCE).floor();
                if k <= 0.0 {
                    0
                } else {
                    (k as usize).min(max_index)
                }
            })
            .collect()
    }
}

/// Pixel offset of the farthest sample along one axis, bounded by [`MAX_QUADRANT_PIXELS`].
fn last_offset(axis: &str, meters: f64, resolution: u32) -> Result<u32> {
    let pixels = meters_to_pixels(meters, resolution);
    if pixels >= f64::from(MAX_QUADRANT_PIXELS) {
        return Err(Error::InvalidMeasurements(format!(
            "{axis} offset of {meters} m is {pixels} px at {resolution} px/m; a quadrant is \
             limited to {MAX_QUADRANT_PIXELS} px per side"
        )));
    }
    Ok(pixels as u32)
}

/// Rasterize a measurement table into a dense quadrant at `resolution` pixels per meter.
///
/// The table must pivot into a complete grid with one common step in meters. Each pixel
/// takes the rate of the sample nearest to it (nearest-neighbour expansion), so a sample
/// stands for the rate over its neighbourhood even when the step is not a whole number of
/// pixels. The quadrant spans `round(max_x × resolution) + 1` by
/// `round(max_y × resolution) + 1` pixels. A single-sample table yields a quadrant where
/// every pixel carries that sample's rate.
pub fn reconstruct_quadrant(table: &MeasurementTable, resolution: u32) -> Result<Quadrant> {
    if resolution == 0 {
        return Err(Error::InvalidConfig("resolution must be > 0".into()));
    }
    let (max_x, max_y) = table
        .samples()
        .iter()
        .fold((0.0f64, 0.0f64), |(mx, my), s| (mx.max(s.x), my.max(s.y)));
    let last_x = last_offset("x", max_x, resolution)?;
    let last_y = last_offset("y", max_y, resolution)?;

    let grid = table.to_grid()?;
    let columns = SampleAxis {
        origin: grid.origin.x,
        step: grid.step,
        count: grid.rates.width(),
    };
    let rows = SampleAxis {
        origin: grid.origin.y,
        step: grid.step,
        count: grid.rates.height(),
    };
    let column_of = columns.nearest_samples(resolution, last_x);
    let row_of = rows.nearest_samples(resolution, last_y);

    let rates = Grid::from_fn(column_of.len(), row_of.len(), |x, y| {
        grid.rates.get_or(column_of[x], row_of[y], 0.0)
    });
    let step_px = table
        .step_meters()
        .map_or(1.0, |step| step * f64::from(resolution));
    debug!(
        "Reconstructed {}x{} px quadrant from {} samples (step {} px).",
        rates.width(),
        rates.height(),
        table.len(),
        step_px
    );

    Ok(Quadrant { rates, step_px })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadrant(triples: &[(f64, f64, f64)], resolution: u32) -> Result<Quadrant> {
        reconstruct_quadrant(&MeasurementTable::from_triples(triples)?, resolution)
    }

    fn axis(origin: f64, step: f64, count: usize) -> SampleAxis {
        SampleAxis {
            origin,
            step,
            count,
        }
    }

    #[test]
    fn nearest_sample_splits_odd_steps_evenly() {
        assert_eq!(
            axis(0.0, 1.0, 2).nearest_samples(5, 5),
            vec![0, 0, 0, 1, 1, 1]
        );
    }

    #[test]
    fn nearest_sample_ties_go_to_farther_sample() {
        assert_eq!(
            axis(0.0, 1.0, 3).nearest_samples(4, 8),
            vec![0, 0, 1, 1, 1, 1, 2, 2, 2]
        );
    }

    #[test]
    fn nearest_sample_clamps_before_first_offset() {
        assert_eq!(axis(0.5, 0.5, 2).nearest_samples(4, 4), vec![0, 0, 0, 1, 1]);
    }

    #[test]
    fn fractional_pixel_step_is_accepted() {
        // 0.5 m at 5 px/m puts samples at 0, 2.5 and 5 px
        let mut triples = Vec::new();
        for j in 0..3 {
            for i in 0..3 {
                triples.push((0.5 * i as f64, 0.5 * j as f64, f64::from(10 - i - j)));
            }
        }
        let q = quadrant(&triples, 5).unwrap();
        assert_eq!(q.size(), UVec2::new(6, 6));
        assert_eq!(q.step_px(), 2.5);
        assert_eq!(q.rates().row(0), &[10.0, 10.0, 9.0, 9.0, 8.0, 8.0]);
        assert_eq!(q.rates().row(5), &[8.0, 8.0, 7.0, 7.0, 6.0, 6.0]);
    }

    #[test]
    fn small_symmetric_table() {
        let q = quadrant(
            &[
                (0.0, 0.0, 10.0),
                (0.0, 1.0, 8.0),
                (1.0, 0.0, 8.0),
                (1.0, 1.0, 6.0),
            ],
            5,
        )
        .unwrap();
        assert_eq!(q.size(), UVec2::new(6, 6));
        assert_eq!(q.step_px(), 5.0);
        let top = [10.0, 10.0, 10.0, 8.0, 8.0, 8.0];
        let bottom = [8.0, 8.0, 8.0, 6.0, 6.0, 6.0];
        for y in 0..3 {
            assert_eq!(q.rates().row(y), &top);
        }
        for y in 3..6 {
            assert_eq!(q.rates().row(y), &bottom);
        }
    }

    #[test]
    fn single_sample_is_one_pixel() {
        let q = quadrant(&[(0.0, 0.0, 4.5)], 5).unwrap();
        assert_eq!(q.size(), UVec2::new(1, 1));
        assert_eq!(q.rates().as_slice(), &[4.5]);
        assert_eq!(q.step_px(), 1.0);
    }

    #[test]
    fn sub_pixel_step_keeps_nearest_samples() {
        // 0.05 m apart at 5 px/m: both samples fall on pixel 0, the nearer one wins
        let q = quadrant(&[(0.0, 0.0, 1.0), (0.05, 0.0, 2.0)], 5).unwrap();
        assert_eq!(q.size(), UVec2::new(1, 1));
        assert_eq!(q.rates().as_slice(), &[1.0]);
    }

    #[test]
    fn incomplete_table_is_a_measurement_error() {
        let err = quadrant(&[(0.0, 0.0, 1.0), (1.0, 0.0, 1.0), (0.0, 1.0, 1.0)], 5).unwrap_err();
        assert!(err.is_measurements());
    }

    #[test]
    fn far_samples_are_rejected() {
        let err = quadrant(&[(0.0, 0.0, 1.0), (1e9, 0.0, 1.0)], 5).unwrap_err();
        assert!(err.is_measurements());
        assert!(err.to_string().contains("px per side"), "{err}");
    }

    #[test]
    fn zero_resolution_is_a_config_error() {
        assert!(quadrant(&[(0.0, 0.0, 1.0)], 0).unwrap_err().is_config());
    }

    #[test]
    fn from_rates_rejects_empty_raster() {
        assert!(Quadrant::from_rates(Grid::new(0, 0)).is_none());
        let q = Quadrant::from_rates(Grid::from_fn(2, 1, |x, _| x as f64)).unwrap();
        assert_eq!(q.size(), UVec2::new(2, 1));
    }
}
