//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants
//! separate configuration problems (resolution, zone, spacing) from measurement data that
//! cannot be turned into a precipitation pattern. Degenerate statistics are not errors; see
//! [`crate::simulation::uniformity`].
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid measurements: {0}")]
    InvalidMeasurements(String),
}

impl Error {
    /// Returns `true` for errors caused by the simulation configuration.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::InvalidConfig(_))
    }

    /// Returns `true` for errors caused by the measurement table.
    pub fn is_measurements(&self) -> bool {
        matches!(self, Error::InvalidMeasurements(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_category() {
        let err = Error::InvalidConfig("resolution must be > 0".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: resolution must be > 0"
        );

        let err = Error::InvalidMeasurements("table is empty".into());
        assert_eq!(err.to_string(), "invalid measurements: table is empty");
    }

    #[test]
    fn category_predicates() {
        assert!(Error::InvalidConfig("x".into()).is_config());
        assert!(!Error::InvalidConfig("x".into()).is_measurements());
        assert!(Error::InvalidMeasurements("x".into()).is_measurements());
    }
}
