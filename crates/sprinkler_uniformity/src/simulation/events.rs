//! Event types and sinks for observing evaluations.
//!
//! This module defines [`EvaluationEvent`] and a set of sinks and adapters to emit, collect,
//! or forward events while running [`crate::simulation::evaluate::evaluate_with_events`] or
//! driving a [`crate::simulation::session::Session`].
use glam::UVec2;

use crate::simulation::config::SimulationConfig;
use crate::simulation::uniformity::UniformityMetrics;

/// Session input that changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInput {
    Resolution,
    ZoneDimensions,
    Layout,
    Measurements,
}

/// Describes events emitted by evaluations and sessions.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum EvaluationEvent {
    /// Emitted when a session input was set to a different value.
    InputChanged {
        /// Which input changed.
        input: SessionInput,
    },

    /// Emitted when an evaluation starts.
    EvaluationStarted {
        /// The configuration being evaluated.
        config: SimulationConfig,
        /// Number of samples in the measurement table.
        samples: usize,
    },

    /// Emitted once the sprinkler positions are known.
    SprinklersPlaced {
        /// Zone size in pixels.
        zone_pixels: UVec2,
        /// Number of sprinklers in the zone.
        count: usize,
    },

    /// Emitted once the single-sprinkler footprint is built.
    FootprintBuilt {
        /// Quadrant size in pixels.
        quadrant_pixels: UVec2,
        /// Pixel distance between measurement samples; fractional when the sample step
        /// is not a whole number of pixels.
        step_pixels: f64,
    },

    /// Emitted when an evaluation finishes.
    EvaluationFinished {
        /// Uniformity of the homogeneous plot.
        metrics: UniformityMetrics,
    },

    /// Emitted when an evaluation is aborted by invalid inputs.
    EvaluationFailed {
        /// Human-readable error.
        message: String,
    },

    /// Emitted by a session when its stored result was replaced by a different one.
    ResultChanged {
        /// Uniformity of the new result.
        metrics: UniformityMetrics,
    },

    /// Non-fatal warning generated during evaluation.
    Warning {
        /// Context string (e.g. stage name).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// A generic event sink that accepts [`EvaluationEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: EvaluationEvent);

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = EvaluationEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: EvaluationEvent) {}
}

/// Boxed sinks forward to their contents, so sinks of different types can share a
/// [`MultiSink`].
impl<S: EventSink + ?Sized> EventSink for Box<S> {
    #[inline]
    fn send(&mut self, event: EvaluationEvent) {
        (**self).send(event);
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(EvaluationEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(EvaluationEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(EvaluationEvent),
{
    #[inline]
    fn send(&mut self, event: EvaluationEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<EvaluationEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<EvaluationEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[EvaluationEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: EvaluationEvent) {
        self.events.push(event);
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn sinks(&self) -> &[S] {
        &self.sinks
    }

    pub fn into_sinks(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: EvaluationEvent) {
        let Some((last, rest)) = self.sinks.split_last_mut() else {
            return;
        };
        for sink in rest {
            sink.send(event.clone());
        }
        last.send(event);
    }
}
