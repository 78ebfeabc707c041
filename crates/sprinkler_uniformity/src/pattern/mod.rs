//! Single-sprinkler precipitation pattern: measurements, quadrant reconstruction, and the
//! mirrored footprint.
pub mod footprint;
pub mod measurement;
pub mod reconstruct;

pub use footprint::Footprint;
pub use measurement::{Measurement, MeasurementGrid, MeasurementTable};
pub use reconstruct::{reconstruct_quadrant, Quadrant};
