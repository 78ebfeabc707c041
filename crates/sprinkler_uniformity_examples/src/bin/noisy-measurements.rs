use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use sprinkler_uniformity::prelude::*;
use sprinkler_uniformity_examples::{init_tracing, radial_table};

const TRIALS: usize = 25;
const NOISE: f64 = 0.15;

fn perturb(table: &MeasurementTable, rng: &mut StdRng) -> anyhow::Result<MeasurementTable> {
    let samples = table
        .samples()
        .iter()
        .map(|s| {
            let factor = 1.0 + NOISE * (2.0 * rng.random::<f64>() - 1.0);
            Measurement::new(s.x, s.y, s.rate * factor)
        })
        .collect();
    Ok(MeasurementTable::new(samples)?)
}

fn describe(name: &str, values: &[f64]) {
    if values.is_empty() {
        println!("{name}: unavailable in every trial");
        return;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    println!(
        "{name}: mean {mean:.2}%  min {min:.2}%  max {max:.2}%  ({} trials)",
        values.len()
    );
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let table = radial_table(7.0, 0.5, 12.0)?;
    let config = SimulationConfig::default().with_zone_dim_meters([30.0, 30.0]);

    let clean = evaluate(&config, &table)?;
    println!("clean table: {}", clean.metrics);

    let mut rng = StdRng::seed_from_u64(0x5EED);
    let (mut du, mut cu) = (Vec::new(), Vec::new());
    for _ in 0..TRIALS {
        let metrics = evaluate(&config, &perturb(&table, &mut rng)?)?.metrics;
        du.extend(metrics.du);
        cu.extend(metrics.cu);
    }
    describe("DU", &du);
    describe("CU", &cu);
    Ok(())
}
