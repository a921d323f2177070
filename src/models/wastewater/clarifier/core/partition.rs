//! Particulate/soluble split of constituent concentrations.

use crate::support::{
    component::ConstituentProperties,
    constraint::{Constrained, NonNegative, UnitInterval},
};

use super::ClarifierError;

/// Per-constituent partition data, in component column order.
///
/// The particulate aggregate of a concentration vector is
/// `Σ c[i] · i_mass[i] · x[i]`; the soluble remainder of constituent `i` is
/// `c[i] · (1 - x[i])`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstituentPartition {
    particulate: Vec<f64>,
    mass_factors: Vec<f64>,
}

impl ConstituentPartition {
    /// Reads partition data from a component property provider.
    ///
    /// # Errors
    ///
    /// Returns [`ClarifierError::InvalidParameter`] if a particulate fraction
    /// lies outside `[0, 1]` or a mass factor is negative.
    pub fn from_properties(props: &impl ConstituentProperties) -> Result<Self, ClarifierError> {
        let mut particulate = Vec::with_capacity(props.len());
        let mut mass_factors = Vec::with_capacity(props.len());

        for i in 0..props.len() {
            let x = Constrained::<f64, UnitInterval>::new(props.particulate_fraction(i))
                .map_err(|source| ClarifierError::InvalidParameter {
                    parameter: "particulate_fraction",
                    source,
                })?;
            let i_mass = Constrained::<f64, NonNegative>::new(props.mass_factor(i)).map_err(
                |source| ClarifierError::InvalidParameter {
                    parameter: "mass_factor",
                    source,
                },
            )?;
            particulate.push(x.into_inner());
            mass_factors.push(i_mass.into_inner());
        }

        Ok(Self {
            particulate,
            mass_factors,
        })
    }

    /// Number of constituents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particulate.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particulate.is_empty()
    }

    /// Aggregate particulate concentration of a concentration vector.
    pub fn particulate_total<'a>(&self, c: impl IntoIterator<Item = &'a f64>) -> f64 {
        c.into_iter()
            .zip(self.mass_factors.iter().zip(&self.particulate))
            .map(|(c, (i_mass, x))| c * i_mass * x)
            .sum()
    }

    /// Fractions used to spread a particulate rate across constituents.
    ///
    /// Returns zeros when the influent carries no particulate mass.
    #[must_use]
    pub fn composition(&self, c_in: &[f64], x_in: f64) -> Vec<f64> {
        if x_in > 0.0 {
            c_in.iter()
                .zip(&self.particulate)
                .map(|(c, x)| c * x / x_in)
                .collect()
        } else {
            vec![0.0; self.len()]
        }
    }

    /// Soluble concentration of constituent `i` given its total `c`.
    #[must_use]
    pub fn soluble(&self, i: usize, c: f64) -> f64 {
        c * (1.0 - self.particulate[i])
    }
}
