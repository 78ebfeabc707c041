use sprinkler_uniformity::prelude::*;
use sprinkler_uniformity_examples::{init_tracing, radial_table};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let mut session = Session::new(
        SimulationConfig::default().with_zone_dim_meters([25.0, 25.0]),
        radial_table(6.0, 0.5, 12.0)?,
    );

    let mut result_changes = 0usize;
    let mut sink: MultiSink<Box<dyn EventSink + '_>> = MultiSink::new();
    sink.push(Box::new(FnSink::new(|event| match event {
        EvaluationEvent::InputChanged { input } => info!("input changed: {:?}", input),
        EvaluationEvent::ResultChanged { metrics } => info!("result changed: {}", metrics),
        EvaluationEvent::EvaluationFailed { message } => info!("evaluation failed: {}", message),
        _ => {}
    })));
    sink.push(Box::new(FnSink::new(|event| {
        if matches!(event, EvaluationEvent::ResultChanged { .. }) {
            result_changes += 1;
        }
    })));

    session.evaluate(&mut sink)?;
    // identical inputs: no new result
    session.set_resolution(5, &mut sink);
    session.evaluate(&mut sink)?;

    session.set_layout(Layout::rectangular(4.0, 5.0), &mut sink);
    session.evaluate(&mut sink)?;

    session.set_resolution(0, &mut sink);
    if let Err(e) = session.evaluate(&mut sink) {
        println!("rejected: {e}");
    }
    session.set_resolution(10, &mut sink);
    let metrics = session.evaluate(&mut sink)?.metrics;
    drop(sink);

    println!("final: {metrics}");
    println!("result changes: {result_changes}");
    Ok(())
}
