//! Sprinkler layouts and their placement on the zone raster.
//!
//! A [`Layout`] is the physical spacing in meters, resolved once into a [`PixelLayout`] for a
//! given resolution. The [`window`] module builds the repeating tile and the [`zone`] module
//! tiles it across the zone.
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod window;
pub mod zone;

pub use window::{build_window, Window};
pub use zone::{generate_zone_mask, sprinkler_positions};

/// Altitude of an equilateral triangle relative to its side (≈ √3 / 2).
pub const TRIANGLE_HEIGHT_RATIO: f64 = 0.866;

/// Smallest tile edge, in pixels, that still gives a non-zero tiling stride.
pub const MIN_TILE_PIXELS: u32 = 2;

/// Convert a length in meters to whole pixels, rounding to the nearest pixel.
#[inline]
pub fn meters_to_pixels(meters: f64, resolution: u32) -> f64 {
    (meters * f64::from(resolution)).round()
}

/// Which lattice a layout produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LayoutKind {
    Triangular,
    Rectangular,
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutKind::Triangular => f.write_str("triangular"),
            LayoutKind::Rectangular => f.write_str("rectangular"),
        }
    }
}

/// Sprinkler spacing in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Layout {
    /// Equilateral triangles with the given side length.
    Triangular { side: f64 },
    /// Rectangles with the given width (x) and height (y).
    Rectangular { width: f64, height: f64 },
}

impl Layout {
    pub fn triangular(side: f64) -> Self {
        Layout::Triangular { side }
    }

    pub fn rectangular(width: f64, height: f64) -> Self {
        Layout::Rectangular { width, height }
    }

    /// Build a layout from an untyped spacing list: one value selects a triangular layout,
    /// two values `(width, height)` a rectangular one.
    pub fn try_from_spacing(spacing: &[f64]) -> Result<Self> {
        let layout = match *spacing {
            [side] => Layout::Triangular { side },
            [width, height] => Layout::Rectangular { width, height },
            _ => {
                return Err(Error::InvalidConfig(format!(
                    "sprinkler spacing must have 1 (triangular) or 2 (rectangular) values, got {}",
                    spacing.len()
                )))
            }
        };
        layout.validate()?;
        Ok(layout)
    }

    pub fn kind(&self) -> LayoutKind {
        match self {
            Layout::Triangular { .. } => LayoutKind::Triangular,
            Layout::Rectangular { .. } => LayoutKind::Rectangular,
        }
    }

    /// Validates that every spacing value is finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        let check = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!(
                    "sprinkler spacing {name} must be > 0, got {value}"
                )))
            }
        };
        match *self {
            Layout::Triangular { side } => check("side", side),
            Layout::Rectangular { width, height } => {
                check("width", width)?;
                check("height", height)
            }
        }
    }

    /// Resolve the spacing into pixels at `resolution` pixels per meter.
    pub fn to_pixels(&self, resolution: u32) -> Result<PixelLayout> {
        self.validate()?;
        let px = |name: &str, meters: f64| {
            let pixels = meters_to_pixels(meters, resolution);
            if pixels < f64::from(MIN_TILE_PIXELS) || pixels > f64::from(u32::MAX) {
                Err(Error::InvalidConfig(format!(
                    "sprinkler spacing {name} of {meters} m is {pixels} px at {resolution} px/m; \
                     a tile needs at least {MIN_TILE_PIXELS} px"
                )))
            } else {
                Ok(pixels as u32)
            }
        };
        let layout = match *self {
            Layout::Triangular { side } => PixelLayout::Triangular {
                side: px("side", side)?,
            },
            Layout::Rectangular { width, height } => PixelLayout::Rectangular {
                width: px("width", width)?,
                height: px("height", height)?,
            },
        };
        Ok(layout)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Triangular { side: 5.0 }
    }
}

/// Sprinkler spacing in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PixelLayout {
    Triangular { side: u32 },
    Rectangular { width: u32, height: u32 },
}

impl PixelLayout {
    pub fn kind(&self) -> LayoutKind {
        match self {
            PixelLayout::Triangular { .. } => LayoutKind::Triangular,
            PixelLayout::Rectangular { .. } => LayoutKind::Rectangular,
        }
    }

    /// Height of one triangle row in pixels (`round(0.866 × side)`); `None` for rectangles.
    pub fn triangle_height(&self) -> Option<u32> {
        match *self {
            PixelLayout::Triangular { side } => {
                Some((TRIANGLE_HEIGHT_RATIO * f64::from(side)).round() as u32)
            }
            PixelLayout::Rectangular { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_arity_selects_variant() {
        assert_eq!(
            Layout::try_from_spacing(&[5.0]).unwrap(),
            Layout::Triangular { side: 5.0 }
        );
        assert_eq!(
            Layout::try_from_spacing(&[4.0, 6.0]).unwrap(),
            Layout::Rectangular {
                width: 4.0,
                height: 6.0
            }
        );
    }

    #[test]
    fn spacing_with_wrong_arity_is_rejected() {
        for spacing in [&[][..], &[1.0, 2.0, 3.0][..]] {
            let err = Layout::try_from_spacing(spacing).unwrap_err();
            assert!(err.is_config(), "{err}");
        }
    }

    #[test]
    fn non_positive_spacing_is_rejected() {
        assert!(Layout::try_from_spacing(&[0.0]).is_err());
        assert!(Layout::try_from_spacing(&[5.0, -1.0]).is_err());
        assert!(Layout::try_from_spacing(&[f64::NAN]).is_err());
        assert!(Layout::triangular(-2.0).to_pixels(5).is_err());
    }

    #[test]
    fn to_pixels_rounds_and_requires_two_pixels() {
        assert_eq!(
            Layout::rectangular(5.0, 4.2).to_pixels(5).unwrap(),
            PixelLayout::Rectangular {
                width: 25,
                height: 21
            }
        );
        let err = Layout::triangular(0.1).to_pixels(5).unwrap_err();
        assert!(err.to_string().contains("at least 2 px"), "{err}");
    }

    #[test]
    fn triangle_height_uses_rounded_altitude() {
        let layout = PixelLayout::Triangular { side: 25 };
        assert_eq!(layout.triangle_height(), Some(22));
        assert_eq!(
            PixelLayout::Rectangular {
                width: 3,
                height: 3
            }
            .triangle_height(),
            None
        );
        assert_eq!(layout.kind(), LayoutKind::Triangular);
    }
}
