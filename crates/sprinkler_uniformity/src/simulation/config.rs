//! Simulation configuration and its resolution into pixel geometry.
use glam::{DVec2, UVec2};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::{meters_to_pixels, Layout, PixelLayout};

/// Inputs of one evaluation, in physical units.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// Pixels per meter.
    pub resolution: u32,
    /// Zone width (`x`) and height (`y`) in meters.
    pub zone_dim_meters: DVec2,
    /// Sprinkler spacing.
    pub layout: Layout,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            resolution: 5,
            zone_dim_meters: DVec2::new(50.0, 50.0),
            layout: Layout::default(),
        }
    }
}

/// Pixel geometry of a validated configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelGeometry {
    /// Zone size as `(width, height)` in pixels.
    pub zone: UVec2,
    pub layout: PixelLayout,
}

impl SimulationConfig {
    /// Creates a new [`SimulationConfig`].
    pub fn new(
        resolution: u32,
        zone_dim_meters: impl Into<mint::Vector2<f64>>,
        layout: Layout,
    ) -> Self {
        Self {
            resolution,
            zone_dim_meters: DVec2::from(zone_dim_meters.into()),
            layout,
        }
    }

    /// Build a validated configuration from untyped values, as read from a configuration
    /// store: `zone` must hold exactly `(width, height)` and `spacing` one value
    /// (triangular) or two (rectangular).
    pub fn try_from_parts(resolution: i64, zone: &[f64], spacing: &[f64]) -> Result<Self> {
        let resolution = u32::try_from(resolution)
            .ok()
            .filter(|r| *r > 0)
            .ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "resolution must be a positive integer, got {resolution}"
                ))
            })?;
        let &[width, height] = zone else {
            return Err(Error::InvalidConfig(format!(
                "zone dimensions must have exactly 2 values (width, height), got {}",
                zone.len()
            )));
        };
        let config = Self {
            resolution,
            zone_dim_meters: DVec2::new(width, height),
            layout: Layout::try_from_spacing(spacing)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the resolution in pixels per meter.
    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self
    }

    /// Sets the zone dimensions in meters.
    pub fn with_zone_dim_meters(mut self, zone_dim_meters: impl Into<mint::Vector2<f64>>) -> Self {
        self.zone_dim_meters = DVec2::from(zone_dim_meters.into());
        self
    }

    /// Sets the sprinkler layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.to_pixels().map(|_| ())
    }

    /// Resolve zone and spacing into pixels, validating every input on the way.
    pub fn to_pixels(&self) -> Result<PixelGeometry> {
        if self.resolution == 0 {
            return Err(Error::InvalidConfig("resolution must be > 0".into()));
        }
        let zone_px = |name: &str, meters: f64| {
            if !meters.is_finite() || meters <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "zone {name} must be > 0, got {meters}"
                )));
            }
            let pixels = meters_to_pixels(meters, self.resolution);
            if pixels < 1.0 || pixels > f64::from(u32::MAX) {
                return Err(Error::InvalidConfig(format!(
                    "zone {name} of {meters} m is {pixels} px at {} px/m",
                    self.resolution
                )));
            }
            Ok(pixels as u32)
        };
        Ok(PixelGeometry {
            zone: UVec2::new(
                zone_px("width", self.zone_dim_meters.x)?,
                zone_px("height", self.zone_dim_meters.y)?,
            ),
            layout: self.layout.to_pixels(self.resolution)?,
        })
    }
}
