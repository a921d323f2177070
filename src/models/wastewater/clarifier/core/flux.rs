//! Inter-layer settling fluxes with threshold-based limiting.

use super::SettlingLaw;

/// Settling fluxes across the N−1 internal layer boundaries.
///
/// Boundary `j` separates layer `j` from layer `j + 1`; positive fluxes point
/// downward. No flux enters the top layer from above and none leaves the
/// bottom layer through the floor.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlingFluxes {
    boundaries: Vec<f64>,
}

impl SettlingFluxes {
    /// Computes boundary fluxes from per-layer particulate concentrations.
    ///
    /// Above the feed layer, a boundary whose lower layer is at or below the
    /// `threshold` concentration passes the upper layer's full flux.
    /// Every other boundary carries the smaller of the two adjacent layer
    /// fluxes.
    ///
    /// `feed` is the 0-based feed layer index.
    #[must_use]
    pub fn new(x: &[f64], law: &SettlingLaw, x_min: f64, threshold: f64, feed: usize) -> Self {
        let vx: Vec<f64> = x.iter().map(|&xj| law.flux(xj, x_min)).collect();

        let boundaries = (0..x.len().saturating_sub(1))
            .map(|j| {
                if j < feed && x[j + 1] <= threshold {
                    vx[j]
                } else {
                    vx[j].min(vx[j + 1])
                }
            })
            .collect();

        Self { boundaries }
    }

    /// Fluxes across internal boundaries, top to bottom.
    #[must_use]
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Flux settling into layer `j` from the layer above.
    ///
    /// Zero for the top layer and for indices past the bottom.
    #[must_use]
    pub fn settle_in(&self, j: usize) -> f64 {
        j.checked_sub(1)
            .and_then(|k| self.boundaries.get(k))
            .copied()
            .unwrap_or(0.0)
    }

    /// Flux settling out of layer `j` into the layer below.
    ///
    /// Zero for the bottom layer and for indices past it.
    #[must_use]
    pub fn settle_out(&self, j: usize) -> f64 {
        self.boundaries.get(j).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::wastewater::clarifier::core::test_support::reference_law;

    const X_MIN: f64 = 9.12;
    const THRESHOLD: f64 = 3000.0;

    #[test]
    fn boundary_conditions() {
        let law = reference_law();
        let x = [500.0, 800.0, 1500.0, 4000.0, 6000.0];
        let fluxes = SettlingFluxes::new(&x, &law, X_MIN, THRESHOLD, 2);

        assert_eq!(fluxes.boundaries().len(), x.len() - 1);
        assert_relative_eq!(fluxes.settle_in(0), 0.0);
        assert_relative_eq!(fluxes.settle_out(x.len() - 1), 0.0);

        for j in 1..x.len() {
            assert_relative_eq!(fluxes.settle_in(j), fluxes.settle_out(j - 1));
        }
    }

    #[test]
    fn clear_zone_above_feed_is_unlimited() {
        let law = reference_law();
        // Dilute layer over a denser one: the upper flux exceeds the lower.
        let x = [900.0, 100.0, 100.0, 4000.0];
        let fluxes = SettlingFluxes::new(&x, &law, X_MIN, THRESHOLD, 2);

        assert!(law.flux(x[0], X_MIN) > law.flux(x[1], X_MIN));
        assert_relative_eq!(fluxes.boundaries()[0], law.flux(x[0], X_MIN));
        assert_relative_eq!(fluxes.boundaries()[1], law.flux(x[1], X_MIN));
    }

    #[test]
    fn above_feed_over_threshold_is_limited() {
        let law = reference_law();
        let x = [2000.0, 9000.0, 4000.0];
        let fluxes = SettlingFluxes::new(&x, &law, X_MIN, THRESHOLD, 2);

        let vx0 = law.flux(x[0], X_MIN);
        let vx1 = law.flux(x[1], X_MIN);
        assert!(vx1 < vx0);
        assert_relative_eq!(fluxes.boundaries()[0], vx1);
    }

    #[test]
    fn at_and_below_feed_is_always_limited() {
        let law = reference_law();
        // All layers under the threshold: only the exemption above feed applies.
        let x = [900.0, 900.0, 900.0, 100.0, 50.0];
        let fluxes = SettlingFluxes::new(&x, &law, X_MIN, THRESHOLD, 2);

        let vx: Vec<f64> = x.iter().map(|&xj| law.flux(xj, X_MIN)).collect();
        assert_relative_eq!(fluxes.boundaries()[0], vx[0]);
        assert_relative_eq!(fluxes.boundaries()[1], vx[1]);
        for j in 2..x.len() - 1 {
            assert_relative_eq!(fluxes.boundaries()[j], vx[j].min(vx[j + 1]));
        }
        assert!(fluxes.boundaries()[2] < vx[2]);
    }

    #[test]
    fn threshold_is_inclusive() {
        let law = reference_law();
        let x = [1500.0, THRESHOLD, 4000.0];
        let fluxes = SettlingFluxes::new(&x, &law, X_MIN, THRESHOLD, 2);

        let vx0 = law.flux(x[0], X_MIN);
        assert!(law.flux(x[1], X_MIN) < vx0);
        assert_relative_eq!(fluxes.boundaries()[0], vx0);

        let fluxes = SettlingFluxes::new(&x, &law, X_MIN, THRESHOLD - 1e-9, 2);
        assert_relative_eq!(fluxes.boundaries()[0], law.flux(x[1], X_MIN));
    }

    #[test]
    fn out_of_range_layers_exchange_nothing() {
        let law = reference_law();
        let fluxes = SettlingFluxes::new(&[500.0, 4000.0], &law, X_MIN, THRESHOLD, 1);

        assert_relative_eq!(fluxes.settle_in(2), 0.0);
        assert_relative_eq!(fluxes.settle_in(5), 0.0);
        assert_relative_eq!(fluxes.settle_out(5), 0.0);
    }

    #[test]
    fn single_layer_has_no_boundaries() {
        let law = reference_law();
        let fluxes = SettlingFluxes::new(&[4000.0], &law, X_MIN, THRESHOLD, 0);

        assert!(fluxes.boundaries().is_empty());
        assert_relative_eq!(fluxes.settle_in(0), 0.0);
        assert_relative_eq!(fluxes.settle_out(0), 0.0);
    }
}
