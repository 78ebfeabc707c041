use std::time::Duration;

use criterion::{Criterion, Throughput};
use sprinkler_uniformity::prelude::MeasurementTable;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Quadrant samples every `step` meters up to `throw` meters, falling off linearly with the
/// distance from the sprinkler.
pub fn radial_table(throw: f64, step: f64, peak: f64) -> MeasurementTable {
    let n = (throw / step).round() as usize + 1;
    let mut triples = Vec::with_capacity(n * n);
    for j in 0..n {
        for i in 0..n {
            let (x, y) = (i as f64 * step, j as f64 * step);
            let rate = (peak * (1.0 - x.hypot(y) / throw)).max(0.0);
            triples.push((x, y, rate));
        }
    }
    MeasurementTable::from_triples(&triples).expect("valid bench table")
}
