//! Stateful evaluation session with change notifications.
use glam::DVec2;
use tracing::debug;

use crate::error::Result;
use crate::layout::Layout;
use crate::pattern::MeasurementTable;
use crate::simulation::config::SimulationConfig;
use crate::simulation::evaluate::{evaluate_with_events, Evaluation};
use crate::simulation::events::{EvaluationEvent, EventSink, SessionInput};

/// Holds the current inputs and the last successful [`Evaluation`].
///
/// Setters report [`EvaluationEvent::InputChanged`] only when the new value differs from the
/// stored one. [`Session::evaluate`] reports [`EvaluationEvent::ResultChanged`] only when the
/// new result is not equal to the previous one.
#[derive(Debug, Clone)]
pub struct Session {
    config: SimulationConfig,
    table: MeasurementTable,
    result: Option<Evaluation>,
}

impl Session {
    pub fn new(config: SimulationConfig, table: MeasurementTable) -> Self {
        Self {
            config,
            table,
            result: None,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn measurements(&self) -> &MeasurementTable {
        &self.table
    }

    /// Last successful evaluation, if any.
    pub fn result(&self) -> Option<&Evaluation> {
        self.result.as_ref()
    }

    pub fn set_resolution(&mut self, resolution: u32, sink: &mut dyn EventSink) -> bool {
        let changed = self.config.resolution != resolution;
        self.config.resolution = resolution;
        Self::notify(changed, SessionInput::Resolution, sink)
    }

    pub fn set_zone_dim_meters(
        &mut self,
        zone_dim_meters: impl Into<mint::Vector2<f64>>,
        sink: &mut dyn EventSink,
    ) -> bool {
        let zone = DVec2::from(zone_dim_meters.into());
        let changed = self.config.zone_dim_meters != zone;
        self.config.zone_dim_meters = zone;
        Self::notify(changed, SessionInput::ZoneDimensions, sink)
    }

    pub fn set_layout(&mut self, layout: Layout, sink: &mut dyn EventSink) -> bool {
        let changed = self.config.layout != layout;
        self.config.layout = layout;
        Self::notify(changed, SessionInput::Layout, sink)
    }

    pub fn set_measurements(&mut self, table: MeasurementTable, sink: &mut dyn EventSink) -> bool {
        let changed = self.table != table;
        self.table = table;
        Self::notify(changed, SessionInput::Measurements, sink)
    }

    /// Evaluate the current inputs.
    ///
    /// On failure the previous result is kept and the error is returned.
    pub fn evaluate(&mut self, sink: &mut dyn EventSink) -> Result<&Evaluation> {
        let evaluation = evaluate_with_events(&self.config, &self.table, sink)?;
        if self.result.as_ref() != Some(&evaluation) {
            sink.send(EvaluationEvent::ResultChanged {
                metrics: evaluation.metrics,
            });
        } else {
            debug!("Evaluation result unchanged.");
        }
        Ok(self.result.insert(evaluation))
    }

    fn notify(changed: bool, input: SessionInput, sink: &mut dyn EventSink) -> bool {
        if changed {
            debug!("Session input {:?} changed.", input);
            sink.send(EvaluationEvent::InputChanged { input });
        }
        changed
    }
}
