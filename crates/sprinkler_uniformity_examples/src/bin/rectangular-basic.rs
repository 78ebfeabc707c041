use sprinkler_uniformity::prelude::*;
use sprinkler_uniformity_examples::{
    init_tracing, print_summary, radial_table, render_evaluation_to_png, RenderConfig,
};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let table = radial_table(7.0, 0.5, 12.0)?;
    let config = SimulationConfig::default()
        .with_resolution(5)
        .with_zone_dim_meters([30.0, 30.0])
        .with_layout(Layout::rectangular(5.0, 5.0));

    let evaluation = evaluate(&config, &table)?;
    print_summary("rectangular 5 m x 5 m", &evaluation);

    render_evaluation_to_png(
        &evaluation,
        &RenderConfig::default(),
        "rectangular-basic.png",
    )?;
    Ok(())
}
