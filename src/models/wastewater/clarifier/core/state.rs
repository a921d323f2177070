//! Mapping between the layer state matrix and the clarifier's streams.

use std::fmt;

use nalgebra::{DMatrix, DVector};

use crate::support::component::ConstituentProperties;

/// Builds a state by repeating the influent concentrations in every layer.
#[must_use]
pub fn tile(c_in: &DVector<f64>, layers: usize) -> DMatrix<f64> {
    DMatrix::from_fn(layers, c_in.len(), |_, i| c_in[i])
}

/// A value keyed by the ID of the stream or unit it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Located<T> {
    pub id: String,
    pub value: T,
}

/// Clarifier state split into the conditions of its outlets.
///
/// The effluent leaves from the top layer and the underflow from the bottom
/// layer. The full matrix is kept under the unit's own ID.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedState {
    pub effluent: Located<DVector<f64>>,
    pub underflow: Located<DVector<f64>>,
    pub internal: Located<DMatrix<f64>>,
}

impl LocatedState {
    /// Locates outlet conditions in a state matrix.
    ///
    /// `state` must have at least one row; callers shape-check it first.
    #[must_use]
    pub(crate) fn new(
        unit_id: &str,
        effluent_id: &str,
        underflow_id: &str,
        state: &DMatrix<f64>,
    ) -> Self {
        let bottom = state.nrows() - 1;
        Self {
            effluent: Located {
                id: effluent_id.to_owned(),
                value: state.row(0).transpose(),
            },
            underflow: Located {
                id: underflow_id.to_owned(),
                value: state.row(bottom).transpose(),
            },
            internal: Located {
                id: unit_id.to_owned(),
                value: state.clone(),
            },
        }
    }
}

/// Layer-indexed view of a state matrix for display.
///
/// Rows are numbered from 1 at the top; columns carry constituent IDs.
pub struct StateTable<'a, P> {
    components: &'a P,
    state: &'a DMatrix<f64>,
}

impl<'a, P: ConstituentProperties> StateTable<'a, P> {
    #[must_use]
    pub fn new(components: &'a P, state: &'a DMatrix<f64>) -> Self {
        Self { components, state }
    }
}

impl<P: ConstituentProperties> fmt::Display for StateTable<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>5}", "layer")?;
        for i in 0..self.components.len() {
            write!(f, " {:>12}", self.components.id(i))?;
        }
        for (j, row) in self.state.row_iter().enumerate() {
            write!(f, "\n{:>5}", j + 1)?;
            for c in &row {
                write!(f, " {c:>12.3}")?;
            }
        }
        Ok(())
    }
}
