//! Bulk flow routing through the clarifier layers.

use std::cmp::Ordering;

/// Advective flow routing around the feed layer.
///
/// The feed layer receives the full influent and splits it: the effluent
/// share rises through the layers above toward the overflow, and the design
/// underflow sinks through the layers below toward the sludge outlet.
/// Flows are in m³/d.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowRouting {
    feed: usize,
    influent: f64,
    underflow: f64,
    effluent: f64,
}

impl FlowRouting {
    /// Creates a routing for the 0-based `feed` layer.
    ///
    /// The effluent flow is `influent - underflow`.
    /// It is negative when the design underflow exceeds the influent.
    #[must_use]
    pub fn new(feed: usize, influent: f64, underflow: f64) -> Self {
        Self {
            feed,
            influent,
            underflow,
            effluent: influent - underflow,
        }
    }

    #[must_use]
    pub fn feed(&self) -> usize {
        self.feed
    }

    #[must_use]
    pub fn influent(&self) -> f64 {
        self.influent
    }

    #[must_use]
    pub fn underflow(&self) -> f64 {
        self.underflow
    }

    #[must_use]
    pub fn effluent(&self) -> f64 {
        self.effluent
    }

    /// Flow leaving layer `j`.
    #[must_use]
    pub fn outflow(&self, j: usize) -> f64 {
        match j.cmp(&self.feed) {
            Ordering::Less => self.effluent,
            Ordering::Equal => self.effluent + self.underflow,
            Ordering::Greater => self.underflow,
        }
    }

    /// Mass entering layer `j` by bulk flow.
    ///
    /// Layers above the feed draw from the layer below, the feed layer from
    /// the influent, and layers below the feed from the layer above.
    /// `layer(k)` returns the concentration carried by layer `k`.
    #[must_use]
    pub fn inflow(&self, j: usize, influent: f64, layer: impl Fn(usize) -> f64) -> f64 {
        match j.cmp(&self.feed) {
            Ordering::Less => self.effluent * layer(j + 1),
            Ordering::Equal => self.influent * influent,
            Ordering::Greater => self.underflow * layer(j - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn splits_at_the_feed_layer() {
        let routing = FlowRouting::new(3, 20_000.0, 2000.0);

        assert_relative_eq!(routing.effluent(), 18_000.0);
        assert_relative_eq!(routing.outflow(0), 18_000.0);
        assert_relative_eq!(routing.outflow(2), 18_000.0);
        assert_relative_eq!(routing.outflow(3), 20_000.0);
        assert_relative_eq!(routing.outflow(4), 2000.0);
        assert_relative_eq!(routing.outflow(9), 2000.0);
    }

    #[test]
    fn inflow_sources() {
        let routing = FlowRouting::new(1, 10.0, 4.0);
        let layers = [1.0, 2.0, 3.0, 4.0];
        let layer = |k: usize| layers[k];

        assert_relative_eq!(routing.inflow(0, 100.0, layer), 6.0 * 2.0);
        assert_relative_eq!(routing.inflow(1, 100.0, layer), 10.0 * 100.0);
        assert_relative_eq!(routing.inflow(2, 100.0, layer), 4.0 * 2.0);
        assert_relative_eq!(routing.inflow(3, 100.0, layer), 4.0 * 3.0);
    }

    #[test]
    fn underflow_larger_than_influent() {
        let routing = FlowRouting::new(0, 1000.0, 2000.0);
        assert_relative_eq!(routing.effluent(), -1000.0);
    }
}
