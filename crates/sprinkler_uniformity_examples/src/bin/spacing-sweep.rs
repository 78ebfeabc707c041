use sprinkler_uniformity::prelude::*;
use sprinkler_uniformity_examples::{init_tracing, radial_table};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let table = radial_table(8.0, 0.5, 10.0)?;
    let base = SimulationConfig::default().with_zone_dim_meters([40.0, 40.0]);

    println!(
        "{:<12} {:>8} {:>11} {:>8} {:>8}",
        "layout", "spacing", "sprinklers", "DU %", "CU %"
    );
    for tenths in (30..=90).step_by(5) {
        let spacing = f64::from(tenths) / 10.0;
        for layout in [
            Layout::triangular(spacing),
            Layout::rectangular(spacing, spacing),
        ] {
            let evaluation = evaluate(&base.with_layout(layout), &table)?;
            let show = |v: Option<f64>| v.map_or_else(|| "n/a".to_owned(), |v| format!("{v:.2}"));
            println!(
                "{:<12} {:>8.1} {:>11} {:>8} {:>8}",
                layout.kind().to_string(),
                spacing,
                evaluation.sprinklers.len(),
                show(evaluation.metrics.du),
                show(evaluation.metrics.cu)
            );
        }
    }
    Ok(())
}
