use sprinkler_uniformity::prelude::{Evaluation, MeasurementTable};

/// Quadrant samples every `step` meters up to `throw` meters, with the rate falling off
/// linearly from `peak` at the sprinkler to zero at the throw radius.
pub fn radial_table(throw: f64, step: f64, peak: f64) -> anyhow::Result<MeasurementTable> {
    let n = (throw / step).round() as usize + 1;
    let mut triples = Vec::with_capacity(n * n);
    for j in 0..n {
        for i in 0..n {
            let (x, y) = (i as f64 * step, j as f64 * step);
            triples.push((x, y, (peak * (1.0 - x.hypot(y) / throw)).max(0.0)));
        }
    }
    Ok(MeasurementTable::from_triples(&triples)?)
}

pub fn print_summary(label: &str, evaluation: &Evaluation) {
    let zone = evaluation.accumulated_zone.size();
    let plot = evaluation.homogeneous_plot.size();
    println!("{label}");
    println!("  zone:       {} x {} px", zone.x, zone.y);
    println!("  sprinklers: {}", evaluation.sprinklers.len());
    println!("  plot:       {} x {} px", plot.x, plot.y);
    println!(
        "  max rate:   {:.2}",
        evaluation.accumulated_zone.max_value().unwrap_or(0.0)
    );
    println!("  {}", evaluation.metrics);
}
