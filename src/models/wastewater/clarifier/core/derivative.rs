//! Right-hand side of the layered clarifier ODE system.
//!
//! For each layer `j` the particulate aggregate `X[j]` obeys
//!
//! ```text
//! dX[j]/dt = ((Q_in,j · X_src - Q_out,j · X[j]) / A + J_in,j - J_out,j) / h
//! ```
//!
//! and is spread over the particulate constituents in proportion to the
//! influent particulate composition. Soluble mass only moves with the bulk
//! flow.

use nalgebra::{DMatrix, DVector};

use super::{
    ClarifierError, ConstituentPartition, FlowRouting, SettlingFluxes, SettlingLaw,
    config::Parameters,
};

/// Derivative engine bound to one clarifier's parameters.
///
/// Built once per integration and evaluated many times. Evaluation never
/// mutates the engine, so repeated calls with the same arguments return
/// identical results and intermediate Runge–Kutta stages can share it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClarifierOde {
    layers: usize,
    area: f64,
    layer_height: f64,
    routing: FlowRouting,
    law: SettlingLaw,
    threshold: f64,
    non_settleable_fraction: f64,
    partition: ConstituentPartition,
}

impl ClarifierOde {
    /// Binds parameters, partition data, and the influent flow (m³/d).
    ///
    /// # Errors
    ///
    /// Returns [`ClarifierError::FeedLayerOutOfRange`] if the feed layer does
    /// not name one of the layers.
    pub(crate) fn new(
        params: &Parameters,
        partition: ConstituentPartition,
        influent_flow: f64,
    ) -> Result<Self, ClarifierError> {
        let feed = params.feed_index()?;
        let routing = FlowRouting::new(feed, influent_flow, params.underflow);

        log::debug!(
            "clarifier ODE: {} layers, feed index {feed}, Q_in={influent_flow} m3/d, Q_e={} m3/d, Q_s={} m3/d",
            params.layers,
            routing.effluent(),
            routing.underflow(),
        );
        if routing.effluent() < 0.0 {
            log::warn!(
                "clarifier ODE: design underflow {} m3/d exceeds influent {influent_flow} m3/d",
                routing.underflow(),
            );
        }

        Ok(Self {
            layers: params.layers,
            area: params.area,
            layer_height: params.layer_height(),
            routing,
            law: params.law,
            threshold: params.threshold,
            non_settleable_fraction: params.non_settleable_fraction,
            partition,
        })
    }

    /// Number of layers (rows of the state matrix).
    #[must_use]
    pub fn layers(&self) -> usize {
        self.layers
    }

    /// Number of constituents (columns of the state matrix).
    #[must_use]
    pub fn constituents(&self) -> usize {
        self.partition.len()
    }

    #[must_use]
    pub fn routing(&self) -> &FlowRouting {
        &self.routing
    }

    #[must_use]
    pub fn law(&self) -> &SettlingLaw {
        &self.law
    }

    /// Evaluates `dC/dt` for influent concentrations `c_in` and layer state `c`.
    ///
    /// Concentrations are in g/m³ and rates in g/(m³·d). The state may hold
    /// zero or negative trial values.
    ///
    /// # Errors
    ///
    /// Returns [`ClarifierError::InfluentLength`] or
    /// [`ClarifierError::ShapeMismatch`] if the inputs do not match the
    /// clarifier's layers and constituents.
    pub fn derivative(
        &self,
        c_in: &DVector<f64>,
        c: &DMatrix<f64>,
    ) -> Result<DMatrix<f64>, ClarifierError> {
        let (n, m) = (self.layers, self.partition.len());
        if c_in.len() != m {
            return Err(ClarifierError::InfluentLength {
                expected: m,
                found: c_in.len(),
            });
        }
        if c.shape() != (n, m) {
            return Err(ClarifierError::ShapeMismatch {
                expected: (n, m),
                found: c.shape(),
            });
        }

        let c_in = c_in.as_slice();
        let x_in = self.partition.particulate_total(c_in);
        let composition = self.partition.composition(c_in, x_in);
        let x_min = x_in * self.non_settleable_fraction;

        let x: Vec<f64> = c
            .row_iter()
            .map(|row| self.partition.particulate_total(row.iter()))
            .collect();

        let fluxes = SettlingFluxes::new(&x, &self.law, x_min, self.threshold, self.routing.feed());

        let x_dot: Vec<f64> = (0..n)
            .map(|j| {
                let advection =
                    self.routing.inflow(j, x_in, |k| x[k]) - x[j] * self.routing.outflow(j);
                (advection / self.area + fluxes.settle_in(j) - fluxes.settle_out(j))
                    / self.layer_height
            })
            .collect();

        Ok(DMatrix::from_fn(n, m, |j, i| {
            let z = |k: usize| self.partition.soluble(i, c[(k, i)]);
            let z_in = self.partition.soluble(i, c_in[i]);
            let advection = self.routing.inflow(j, z_in, &z) - z(j) * self.routing.outflow(j);

            composition[i] * x_dot[j] + advection / self.area / self.layer_height
        }))
    }
}
