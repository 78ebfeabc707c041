//! Representative unit cell of the accumulated zone.
use crate::grid::Grid;
use crate::layout::{LayoutKind, Window};

/// Crop one repeating cell of the lattice from the accumulated zone.
///
/// Triangular layouts use rows `[0, h/2)` and columns `[w/2, w/2 + w)` of a `w × h` tile;
/// rectangular layouts use the first `w × h` block. The crop is clipped to the zone, so a
/// zone smaller than the crop yields a smaller (possibly empty) plot.
pub fn extract_homogeneous_plot(zone: &Grid<f64>, window: &Window) -> Grid<f64> {
    let (w, h) = (window.width(), window.height());
    match window.kind() {
        LayoutKind::Triangular => zone.crop(w / 2..w / 2 + w, 0..h / 2),
        LayoutKind::Rectangular => zone.crop(0..w, 0..h),
    }
}
