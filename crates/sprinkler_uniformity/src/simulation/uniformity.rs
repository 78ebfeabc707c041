//! Irrigation uniformity statistics.
//!
//! Both metrics are percentages rounded to two decimals and return `None` when they are
//! undefined for the sample: an empty sample, a mean that is zero at the sample's floating
//! point precision, an empty low quarter (DU), or a negative coefficient (CU).
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Distribution and Christiansen uniformity of one sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UniformityMetrics {
    /// Distribution Uniformity of the low quarter, in percent.
    pub du: Option<f64>,
    /// Christiansen Uniformity, in percent.
    pub cu: Option<f64>,
}

impl UniformityMetrics {
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            du: distribution_uniformity(values),
            cu: christiansen_uniformity(values),
        }
    }
}

impl fmt::Display for UniformityMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: Option<f64>| v.map_or_else(|| "n/a".to_owned(), |v| format!("{v:.2}%"));
        write!(f, "DU: {}, CU: {}", show(self.du), show(self.cu))
    }
}

/// Round to two decimals, halves away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mean of a sample whose magnitude is distinguishable from zero, else `None`.
///
/// The threshold scales with the largest magnitude in the sample so that a mean that is
/// only rounding noise is treated as zero.
fn significant_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let scale = values.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    if !mean.is_finite() || mean.abs() <= f64::EPSILON * scale || scale == 0.0 {
        return None;
    }
    Some(mean)
}

/// Quantile `q` in `[0, 1]` of an ascending sample with linear interpolation between the
/// closest ranks.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = position.floor() as usize;
    let hi = position.ceil() as usize;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (position - lo as f64))
}

/// Distribution Uniformity: mean of the values strictly below the 25th percentile divided by
/// the overall mean, in percent.
pub fn distribution_uniformity(values: &[f64]) -> Option<f64> {
    let mean = significant_mean(values)?;
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    let q25 = quantile(&sorted, 0.25)?;

    let low: Vec<f64> = values.iter().copied().filter(|v| *v < q25).collect();
    if low.is_empty() {
        return None;
    }
    let low_mean = low.iter().sum::<f64>() / low.len() as f64;
    let du = round2(100.0 * low_mean / mean);
    du.is_finite().then_some(du)
}

/// Christiansen Uniformity: `100 × (1 − Σ|v − mean| / (n × mean))`, in percent.
pub fn christiansen_uniformity(values: &[f64]) -> Option<f64> {
    let mean = significant_mean(values)?;
    let deviation: f64 = values.iter().map(|v| (v - mean).abs()).sum();
    let cu = round2(100.0 * (1.0 - deviation / (values.len() as f64 * mean)));
    (cu.is_finite() && cu >= 0.0).then_some(cu)
}
