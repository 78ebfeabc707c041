//! PNG heatmaps of evaluation results.
use std::path::Path;

use anyhow::Context;
use image::{Rgb, RgbImage};
use sprinkler_uniformity::prelude::{Evaluation, Grid};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install a formatted subscriber honouring `RUST_LOG`, defaulting to `info` for the library.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sprinkler_uniformity=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Heatmap appearance.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Image pixels per grid cell.
    pub scale: u32,
    /// Rate mapped to the top of the color ramp; the grid maximum when `None`.
    pub max_rate: Option<f64>,
    pub sprinkler_color: [u8; 3],
    pub sprinkler_radius: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 4,
            max_rate: None,
            sprinkler_color: [230, 40, 40],
            sprinkler_radius: 3,
        }
    }
}

impl RenderConfig {
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    pub fn with_max_rate(mut self, max_rate: f64) -> Self {
        self.max_rate = Some(max_rate);
        self
    }
}

const RAMP: [[f64; 3]; 5] = [
    [68.0, 1.0, 84.0],
    [59.0, 82.0, 139.0],
    [33.0, 145.0, 140.0],
    [94.0, 201.0, 98.0],
    [253.0, 231.0, 37.0],
];

fn ramp(t: f64) -> Rgb<u8> {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let position = t * (RAMP.len() - 1) as f64;
    let i = (position.floor() as usize).min(RAMP.len() - 2);
    let f = position - i as f64;
    let (a, b) = (RAMP[i], RAMP[i + 1]);
    Rgb([0, 1, 2].map(|c| (a[c] + (b[c] - a[c]) * f).round() as u8))
}

fn heatmap(grid: &Grid<f64>, config: &RenderConfig) -> RgbImage {
    let scale = config.scale.max(1);
    let max = config
        .max_rate
        .or_else(|| grid.max_value())
        .filter(|m| *m > 0.0)
        .unwrap_or(1.0);
    let mut img = RgbImage::new(grid.width() as u32 * scale, grid.height() as u32 * scale);
    for ((x, y), rate) in grid.indexed_iter() {
        let color = ramp(*rate / max);
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(x as u32 * scale + dx, y as u32 * scale + dy, color);
            }
        }
    }
    img
}

fn save(img: &RgbImage, path: &Path) -> anyhow::Result<()> {
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!("Wrote {} ({}x{}).", path.display(), img.width(), img.height());
    Ok(())
}

/// Render the accumulated zone with the sprinklers drawn on top.
pub fn render_evaluation_to_png(
    evaluation: &Evaluation,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let mut img = heatmap(&evaluation.accumulated_zone, config);
    let scale = config.scale.max(1) as i64;
    let r = config.sprinkler_radius as i64;
    let color = Rgb(config.sprinkler_color);
    for sprinkler in &evaluation.sprinklers {
        let cx = sprinkler.x as i64 * scale + scale / 2;
        let cy = sprinkler.y as i64 * scale + scale / 2;
        for y in (cy - r).max(0)..=(cy + r).min(img.height() as i64 - 1) {
            for x in (cx - r).max(0)..=(cx + r).min(img.width() as i64 - 1) {
                if (x - cx).pow(2) + (y - cy).pow(2) <= r * r {
                    img.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }
    save(&img, path.as_ref())
}

/// Render a bare rate grid, such as the homogeneous plot.
pub fn render_plot_to_png(
    plot: &Grid<f64>,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    if plot.is_empty() {
        anyhow::bail!("cannot render an empty plot to {}", path.as_ref().display());
    }
    save(&heatmap(plot, config), path.as_ref())
}
