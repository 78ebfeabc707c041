#![forbid(unsafe_code)]
//! sprinkler_uniformity: Sprinkler grid superposition and irrigation uniformity evaluation.
//!
//! Modules:
//! - layout: spacing in meters and pixels, the sprinkler window, and zone tiling
//! - pattern: measurement tables, quadrant reconstruction, and the mirrored footprint
//! - simulation: superposition, homogeneous plot, DU / CU metrics, events, and sessions
//!
//! For a walkthrough, see the README and the demos in `sprinkler_uniformity_examples`.
pub mod error;
pub mod grid;
pub mod layout;
pub mod pattern;
pub mod simulation;

/// Convenient re-exports for common types. Import with `use sprinkler_uniformity::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::grid::Grid;
    pub use crate::layout::{
        build_window, generate_zone_mask, sprinkler_positions, Layout, LayoutKind, PixelLayout,
        Window,
    };
    pub use crate::pattern::{
        reconstruct_quadrant, Footprint, Measurement, MeasurementGrid, MeasurementTable, Quadrant,
    };
    pub use crate::simulation::events::{
        EvaluationEvent, EventSink, FnSink, MultiSink, SessionInput, VecSink,
    };
    pub use crate::simulation::{
        christiansen_uniformity, distribution_uniformity, evaluate, evaluate_parts,
        evaluate_with_events, extract_homogeneous_plot, superpose, Evaluation, PixelGeometry,
        Session, SimulationConfig, UniformityMetrics,
    };
}
