//! Full single-sprinkler footprint mirrored from a quadrant.
use glam::UVec2;

use crate::grid::Grid;
use crate::pattern::reconstruct::Quadrant;

/// Precipitation footprint of one omnidirectional sprinkler, `2H × 2W` for an `H × W`
/// quadrant, centred between pixels `(W - 1, H - 1)` and `(W, H)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Footprint {
    rates: Grid<f64>,
    half_size: UVec2,
}

impl Footprint {
    /// Mirror a quadrant into all four quadrants.
    ///
    /// Bottom-right is the quadrant as measured, bottom-left reverses its columns, top-right
    /// its rows, and top-left both, so the result is symmetric about both axes.
    pub fn from_quadrant(quadrant: &Quadrant) -> Self {
        let q = quadrant.rates();
        let (w, h) = (q.width(), q.height());
        let rates = Grid::from_fn(2 * w, 2 * h, |x, y| {
            let qx = if x < w { w - 1 - x } else { x - w };
            let qy = if y < h { h - 1 - y } else { y - h };
            q.get_or(qx, qy, 0.0)
        });
        Self {
            rates,
            half_size: quadrant.size(),
        }
    }

    pub fn rates(&self) -> &Grid<f64> {
        &self.rates
    }

    /// Quadrant size `(W, H)`; the footprint extends this far on each side of its sprinkler.
    pub fn half_size(&self) -> UVec2 {
        self.half_size
    }

    /// Full size `(2W, 2H)`.
    pub fn size(&self) -> UVec2 {
        self.rates.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadrant(width: usize, height: usize) -> Quadrant {
        Quadrant::from_rates(Grid::from_fn(width, height, |x, y| (10 * y + x) as f64)).unwrap()
    }

    #[test]
    fn mirrors_into_four_quadrants() {
        let fp = Footprint::from_quadrant(&quadrant(2, 1));
        assert_eq!(fp.size(), UVec2::new(4, 2));
        assert_eq!(fp.half_size(), UVec2::new(2, 1));
        assert_eq!(fp.rates().row(0), &[1.0, 0.0, 0.0, 1.0]);
        assert_eq!(fp.rates().row(1), &[1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn bottom_right_is_the_quadrant() {
        let q = quadrant(3, 2);
        let fp = Footprint::from_quadrant(&q);
        for y in 0..2 {
            assert_eq!(&fp.rates().row(y + 2)[3..], q.rates().row(y));
        }
    }

    #[test]
    fn point_symmetric() {
        let fp = Footprint::from_quadrant(&quadrant(3, 4));
        let (w, h) = (fp.rates().width(), fp.rates().height());
        for y in 0..h {
            for x in 0..w {
                assert_eq!(fp.rates().get(x, y), fp.rates().get(w - 1 - x, h - 1 - y));
            }
        }
    }

    #[test]
    fn single_pixel_quadrant() {
        let q = Quadrant::from_rates(Grid::from_vec(1, 1, vec![7.0]).unwrap()).unwrap();
        let fp = Footprint::from_quadrant(&q);
        assert_eq!(fp.rates().as_slice(), &[7.0; 4]);
    }
}
