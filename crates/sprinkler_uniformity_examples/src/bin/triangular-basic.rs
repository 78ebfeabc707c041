use sprinkler_uniformity::prelude::*;
use sprinkler_uniformity_examples::{
    init_tracing, print_summary, radial_table, render_evaluation_to_png, render_plot_to_png,
    RenderConfig,
};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let table = radial_table(7.0, 0.5, 12.0)?;
    let config = SimulationConfig::default()
        .with_zone_dim_meters([30.0, 30.0])
        .with_layout(Layout::triangular(5.0));

    let evaluation = evaluate(&config, &table)?;
    print_summary("triangular, 5 m side", &evaluation);

    // share the color scale so the plot reads against the zone
    let max_rate = evaluation.accumulated_zone.max_value().unwrap_or(1.0);
    let render = RenderConfig::default().with_max_rate(max_rate);
    render_evaluation_to_png(&evaluation, &render, "triangular-basic.png")?;
    render_plot_to_png(
        &evaluation.homogeneous_plot,
        &render.clone().with_scale(12),
        "triangular-basic-plot.png",
    )?;
    Ok(())
}
