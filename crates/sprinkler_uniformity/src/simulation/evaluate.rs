//! End-to-end evaluation: layout, footprint, superposition, and uniformity.
use glam::UVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::grid::Grid;
use crate::layout::{build_window, generate_zone_mask, sprinkler_positions};
use crate::pattern::{reconstruct_quadrant, Footprint, MeasurementTable};
use crate::simulation::config::SimulationConfig;
use crate::simulation::events::{EvaluationEvent, EventSink};
use crate::simulation::homogeneous::extract_homogeneous_plot;
use crate::simulation::superpose::superpose;
use crate::simulation::uniformity::UniformityMetrics;

/// Result of one evaluation.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Evaluation {
    /// `true` at every sprinkler pixel.
    pub sprinkler_mask: Grid<bool>,
    /// Sprinkler coordinates (`x` = column, `y` = row), row-major.
    pub sprinklers: Vec<UVec2>,
    /// Total precipitation rate per pixel.
    pub accumulated_zone: Grid<f64>,
    /// The representative cell the metrics are computed on.
    pub homogeneous_plot: Grid<f64>,
    pub metrics: UniformityMetrics,
}

/// Evaluate a configuration against a measurement table.
pub fn evaluate(config: &SimulationConfig, table: &MeasurementTable) -> Result<Evaluation> {
    evaluate_with_events(config, table, &mut ())
}

/// Evaluate from untyped inputs: `zone` is `(width, height)` in meters, `spacing` one value
/// (triangular side) or two (rectangular width, height), `table` `(x, y, rate)` triples.
///
/// All inputs are validated before any computation.
pub fn evaluate_parts(
    resolution: i64,
    zone: &[f64],
    spacing: &[f64],
    table: &[(f64, f64, f64)],
) -> Result<Evaluation> {
    let config = SimulationConfig::try_from_parts(resolution, zone, spacing)?;
    let table = MeasurementTable::from_triples(table)?;
    evaluate(&config, &table)
}

/// Evaluate and report progress to `sink`.
///
/// Configuration and measurement errors abort the evaluation and are reported as
/// [`EvaluationEvent::EvaluationFailed`] before being returned. Unavailable metrics do not
/// abort; they produce [`EvaluationEvent::Warning`]s.
pub fn evaluate_with_events(
    config: &SimulationConfig,
    table: &MeasurementTable,
    sink: &mut dyn EventSink,
) -> Result<Evaluation> {
    sink.send(EvaluationEvent::EvaluationStarted {
        config: *config,
        samples: table.len(),
    });
    let result = run(config, table, sink);
    match &result {
        Ok(evaluation) => sink.send(EvaluationEvent::EvaluationFinished {
            metrics: evaluation.metrics,
        }),
        Err(e) => {
            warn!("Evaluation failed: {}.", e);
            sink.send(EvaluationEvent::EvaluationFailed {
                message: e.to_string(),
            });
        }
    }
    result
}

fn run(
    config: &SimulationConfig,
    table: &MeasurementTable,
    sink: &mut dyn EventSink,
) -> Result<Evaluation> {
    let geometry = config.to_pixels()?;
    let window = build_window(&geometry.layout)?;
    let quadrant = reconstruct_quadrant(table, config.resolution)?;

    let sprinkler_mask = generate_zone_mask(geometry.zone, &window);
    let sprinklers = sprinkler_positions(&sprinkler_mask);
    sink.send(EvaluationEvent::SprinklersPlaced {
        zone_pixels: geometry.zone,
        count: sprinklers.len(),
    });
    if sprinklers.is_empty() {
        warn!(
            "Zone of {}x{} px is smaller than one {} tile; no sprinklers placed.",
            geometry.zone.x,
            geometry.zone.y,
            window.kind()
        );
        sink.send(EvaluationEvent::Warning {
            context: "zone".into(),
            message: "zone is smaller than one tile; no sprinklers placed".into(),
        });
    }

    let footprint = Footprint::from_quadrant(&quadrant);
    debug!(
        "Footprint {}x{} px from a {}x{} px quadrant.",
        footprint.size().x,
        footprint.size().y,
        quadrant.size().x,
        quadrant.size().y
    );
    sink.send(EvaluationEvent::FootprintBuilt {
        quadrant_pixels: quadrant.size(),
        step_pixels: quadrant.step_px(),
    });

    let accumulated_zone = superpose(geometry.zone, &sprinklers, &footprint);
    let homogeneous_plot = extract_homogeneous_plot(&accumulated_zone, &window);
    let metrics = UniformityMetrics::from_values(homogeneous_plot.as_slice());

    for (name, value) in [("DU", metrics.du), ("CU", metrics.cu)] {
        if value.is_none() {
            warn!(
                "{} is unavailable for the {}x{} px homogeneous plot.",
                name,
                homogeneous_plot.width(),
                homogeneous_plot.height()
            );
            sink.send(EvaluationEvent::Warning {
                context: format!("metric:{name}"),
                message: format!("{name} is undefined for this homogeneous plot"),
            });
        }
    }

    info!(
        "Evaluated {} layout: {} sprinklers over {}x{} px | {}.",
        window.kind(),
        sprinklers.len(),
        geometry.zone.x,
        geometry.zone.y,
        metrics
    );

    Ok(Evaluation {
        sprinkler_mask,
        sprinklers,
        accumulated_zone,
        homogeneous_plot,
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use crate::simulation::events::VecSink;

    fn wide_table() -> MeasurementTable {
        let mut triples = Vec::new();
        for y in 0..4 {
            for x in 0..4 {
                triples.push((x as f64, y as f64, 10.0 - (x + y) as f64));
            }
        }
        MeasurementTable::from_triples(&triples).unwrap()
    }

    #[test]
    fn events_follow_pipeline_order() {
        let config = SimulationConfig::new(5, [20.0, 20.0], Layout::rectangular(5.0, 5.0));
        let mut sink = VecSink::new();
        let evaluation = evaluate_with_events(&config, &wide_table(), &mut sink).unwrap();

        let events = sink.into_inner();
        assert!(matches!(
            events[0],
            EvaluationEvent::EvaluationStarted { samples: 16, .. }
        ));
        assert!(matches!(
            events[1],
            EvaluationEvent::SprinklersPlaced { count: 25, .. }
        ));
        match &events[2] {
            EvaluationEvent::FootprintBuilt { step_pixels, .. } => assert_eq!(*step_pixels, 5.0),
            other => panic!("unexpected event: {other:?}"),
        }
        match events.last() {
            Some(EvaluationEvent::EvaluationFinished { metrics }) => {
                assert_eq!(*metrics, evaluation.metrics)
            }
            other => panic!("unexpected last event: {other:?}"),
        }
    }

    #[test]
    fn failure_is_reported_and_returned() {
        let config = SimulationConfig::default().with_resolution(0);
        let mut sink = VecSink::new();
        let err = evaluate_with_events(&config, &wide_table(), &mut sink).unwrap_err();
        assert!(err.is_config());
        assert!(matches!(
            sink.as_slice().last(),
            Some(EvaluationEvent::EvaluationFailed { .. })
        ));
    }

    #[test]
    fn unavailable_metrics_warn_without_failing() {
        let config = SimulationConfig::new(5, [10.0, 10.0], Layout::rectangular(5.0, 5.0));
        let table = MeasurementTable::from_triples(&[(0.0, 0.0, 7.0)]).unwrap();
        let mut sink = VecSink::new();
        let evaluation = evaluate_with_events(&config, &table, &mut sink).unwrap();
        assert_eq!(evaluation.metrics, UniformityMetrics::default());
        let warnings = sink
            .as_slice()
            .iter()
            .filter(|e| matches!(e, EvaluationEvent::Warning { .. }))
            .count();
        assert_eq!(warnings, 2);
    }

    #[test]
    fn evaluate_parts_rejects_empty_table() {
        let err = evaluate_parts(5, &[10.0, 10.0], &[5.0], &[]).unwrap_err();
        assert!(err.is_measurements());
    }
}
