//! Measured single-sprinkler precipitation samples.
//!
//! A [`MeasurementTable`] holds `(x, y, rate)` samples taken on a regular sub-grid covering
//! one quadrant (`x ≥ 0`, `y ≥ 0`) around the sprinkler. [`MeasurementGrid`] is the same
//! data pivoted into rows and columns, which is how catch-can tables are usually edited.
use std::collections::HashMap;

use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::Grid;

/// Key scale used when pivoting coordinates given in meters (micrometer precision).
const METER_KEYS_PER_METER: f64 = 1_000_000.0;

/// One precipitation sample at `(x, y)` meters from the sprinkler.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurement {
    pub x: f64,
    pub y: f64,
    pub rate: f64,
}

impl Measurement {
    pub fn new(x: f64, y: f64, rate: f64) -> Self {
        Self { x, y, rate }
    }
}

impl From<(f64, f64, f64)> for Measurement {
    fn from((x, y, rate): (f64, f64, f64)) -> Self {
        Self { x, y, rate }
    }
}

/// A validated, non-empty measurement table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Measurement>", into = "Vec<Measurement>"))]
pub struct MeasurementTable {
    samples: Vec<Measurement>,
}

impl MeasurementTable {
    /// Create a table, rejecting empty input and negative or non-finite values.
    pub fn new(samples: Vec<Measurement>) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::InvalidMeasurements(
                "measurement table must contain at least one sample".into(),
            ));
        }
        for (i, s) in samples.iter().enumerate() {
            for (name, value) in [("x", s.x), ("y", s.y), ("rate", s.rate)] {
                if !value.is_finite() || value < 0.0 {
                    return Err(Error::InvalidMeasurements(format!(
                        "sample {i}: {name} must be finite and >= 0, got {value}"
                    )));
                }
            }
        }
        Ok(Self { samples })
    }

    /// Create a table from `(x, y, rate)` triples.
    pub fn from_triples(triples: &[(f64, f64, f64)]) -> Result<Self> {
        Self::new(triples.iter().copied().map(Measurement::from).collect())
    }

    pub fn samples(&self) -> &[Measurement] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; tables are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Spacing in meters between adjacent distinct sample coordinates, taken from the
    /// x axis, or from the y axis when all samples share one x. `None` for a single point.
    pub fn step_meters(&self) -> Option<f64> {
        let first_gap = |coord: fn(&Measurement) -> f64| {
            let mut keys: Vec<i64> = self
                .samples
                .iter()
                .map(|s| (coord(s) * METER_KEYS_PER_METER).round() as i64)
                .collect();
            keys.sort_unstable();
            keys.dedup();
            (keys.len() > 1).then(|| (keys[1] - keys[0]) as f64 / METER_KEYS_PER_METER)
        };
        first_gap(|s| s.x).or_else(|| first_gap(|s| s.y))
    }

    /// Pivot the samples into a grid of rates (rows = distinct y, columns = distinct x).
    pub fn to_grid(&self) -> Result<MeasurementGrid> {
        let keys = self.keys(METER_KEYS_PER_METER);
        let pivot = pivot(&keys, METER_KEYS_PER_METER)?;
        Ok(MeasurementGrid {
            origin: DVec2::new(
                pivot.columns[0] as f64 / METER_KEYS_PER_METER,
                pivot.rows[0] as f64 / METER_KEYS_PER_METER,
            ),
            step: pivot.step as f64 / METER_KEYS_PER_METER,
            rates: pivot.rates,
        })
    }

    /// Integer `(x, y)` keys at `scale` keys per meter, paired with the rate.
    fn keys(&self, scale: f64) -> Vec<(i64, i64, f64)> {
        self.samples
            .iter()
            .map(|s| {
                (
                    (s.x * scale).round() as i64,
                    (s.y * scale).round() as i64,
                    s.rate,
                )
            })
            .collect()
    }
}

impl TryFrom<Vec<Measurement>> for MeasurementTable {
    type Error = Error;

    fn try_from(samples: Vec<Measurement>) -> Result<Self> {
        Self::new(samples)
    }
}

impl From<MeasurementTable> for Vec<Measurement> {
    fn from(table: MeasurementTable) -> Self {
        table.samples
    }
}

/// Measurement samples laid out as a regular grid with a single step.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeasurementGrid {
    /// Coordinates in meters of the sample in column 0, row 0.
    pub origin: DVec2,
    /// Spacing in meters between adjacent rows and columns.
    pub step: f64,
    /// Rates; column `i` is at `origin.x + i × step`, row `j` at `origin.y + j × step`.
    pub rates: Grid<f64>,
}

impl MeasurementGrid {
    pub fn new(origin: DVec2, step: f64, rates: Grid<f64>) -> Self {
        Self {
            origin,
            step,
            rates,
        }
    }

    /// Flatten back into a table, row by row.
    pub fn to_table(&self) -> Result<MeasurementTable> {
        let samples = self
            .rates
            .indexed_iter()
            .map(|((i, j), rate)| {
                Measurement::new(
                    self.origin.x + i as f64 * self.step,
                    self.origin.y + j as f64 * self.step,
                    *rate,
                )
            })
            .collect();
        MeasurementTable::new(samples)
    }
}

/// Samples pivoted onto the distinct integer offsets of each axis.
#[derive(Debug)]
struct Pivot {
    /// Distinct x keys, ascending.
    pub columns: Vec<i64>,
    /// Distinct y keys, ascending.
    pub rows: Vec<i64>,
    /// Common spacing of both axes in keys; 1 when neither axis has two distinct offsets.
    pub step: i64,
    pub rates: Grid<f64>,
}

fn distinct_sorted(values: impl Iterator<Item = i64>) -> Vec<i64> {
    let mut v: Vec<i64> = values.collect();
    v.sort_unstable();
    v.dedup();
    v
}

/// Uniform spacing of an axis, `Ok(None)` for a single offset.
fn axis_step(axis: &str, offsets: &[i64], scale: f64) -> Result<Option<i64>> {
    let Some(first) = offsets.windows(2).next().map(|w| w[1] - w[0]) else {
        return Ok(None);
    };
    if let Some(w) = offsets.windows(2).find(|w| w[1] - w[0] != first) {
        return Err(Error::InvalidMeasurements(format!(
            "irregular {axis} spacing: {} then {} between {} and {}",
            first as f64 / scale,
            (w[1] - w[0]) as f64 / scale,
            w[0] as f64 / scale,
            w[1] as f64 / scale
        )));
    }
    Ok(Some(first))
}

/// Pivot `(x, y, rate)` keys into a complete regular grid.
///
/// `scale` is the number of keys per meter and only used to report offending coordinates
/// in meters.
fn pivot(keys: &[(i64, i64, f64)], scale: f64) -> Result<Pivot> {
    let columns = distinct_sorted(keys.iter().map(|k| k.0));
    let rows = distinct_sorted(keys.iter().map(|k| k.1));

    let step = match (
        axis_step("x", &columns, scale)?,
        axis_step("y", &rows, scale)?,
    ) {
        (Some(sx), Some(sy)) if sx != sy => {
            return Err(Error::InvalidMeasurements(format!(
                "x spacing {} differs from y spacing {}",
                sx as f64 / scale,
                sy as f64 / scale
            )))
        }
        (Some(s), _) | (None, Some(s)) => s,
        (None, None) => 1,
    };

    let column_of: HashMap<i64, usize> = columns.iter().enumerate().map(|(i, k)| (*k, i)).collect();
    let row_of: HashMap<i64, usize> = rows.iter().enumerate().map(|(i, k)| (*k, i)).collect();

    let mut cells: Grid<Option<f64>> = Grid::new(columns.len(), rows.len());
    for &(kx, ky, rate) in keys {
        let (i, j) = (column_of[&kx], row_of[&ky]);
        if let Some(cell) = cells.get_mut(i, j) {
            if cell.replace(rate).is_some() {
                return Err(Error::InvalidMeasurements(format!(
                    "duplicate sample at ({}, {})",
                    kx as f64 / scale,
                    ky as f64 / scale
                )));
            }
        }
    }

    if let Some(((i, j), _)) = cells.indexed_iter().find(|(_, c)| c.is_none()) {
        return Err(Error::InvalidMeasurements(format!(
            "table cannot be pivoted into a grid: missing sample at ({}, {})",
            columns[i] as f64 / scale,
            rows[j] as f64 / scale
        )));
    }

    let rates = Grid::from_fn(columns.len(), rows.len(), |i, j| {
        cells.get(i, j).copied().flatten().unwrap_or(0.0)
    });

    Ok(Pivot {
        columns,
        rows,
        step,
        rates,
    })
}
