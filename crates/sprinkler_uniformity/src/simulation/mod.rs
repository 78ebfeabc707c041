//! Evaluation pipeline: superposition, homogeneous plot, uniformity metrics, and sessions.
pub mod config;
pub mod evaluate;
pub mod events;
pub mod homogeneous;
pub mod session;
pub mod superpose;
pub mod uniformity;

pub use config::{PixelGeometry, SimulationConfig};
pub use evaluate::{evaluate, evaluate_parts, evaluate_with_events, Evaluation};
pub use homogeneous::extract_homogeneous_plot;
pub use session::Session;
pub use superpose::superpose;
pub use uniformity::{christiansen_uniformity, distribution_uniformity, UniformityMetrics};
