//! Flat-bottom circular clarifier with a one-dimensional N-layer settling model.
//!
//! [`FlatBottomCircularClarifier`] owns the layer state and maps it to the
//! effluent and underflow streams. [`ClarifierOde`] supplies `dC/dt` for an
//! external integrator and implements [`twine_core::Model`].
//!
//! # Example
//!
//! ```
//! use clarifier_models::models::wastewater::clarifier::{
//!     ClarifierConfig, FlatBottomCircularClarifier,
//! };
//! use clarifier_models::support::{
//!     component::{Component, Components, ParticleSize},
//!     stream::{Influent, WasteStream},
//!     units::PerDay,
//! };
//! use nalgebra::DVector;
//! use uom::si::f64::VolumeRate;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let components = Components::new([Component::new("X_TSS", ParticleSize::Particulate)])?;
//! let influent = WasteStream::new(
//!     "influent",
//!     VolumeRate::from_per_day(20_000.0),
//!     DVector::from_vec(vec![4000.0]),
//! );
//!
//! let mut clarifier =
//!     FlatBottomCircularClarifier::new("C1", components, ClarifierConfig::default())?;
//! let state = clarifier.initialize_state(&influent)?.clone();
//!
//! let ode = clarifier.ode(&influent)?;
//! let rates = ode.derivative(influent.concentrations(), &state)?;
//! assert_eq!(rates.shape(), (10, 1));
//! # Ok(())
//! # }
//! ```
//!
//! Based on Takács, Patry & Nolasco, "A dynamic model of the
//! clarification-thickening process", Water Research 25 (10), 1991.

mod core;

pub use self::core::{
    ClarifierConfig, ClarifierError, ClarifierOde, ConstituentPartition, FlowRouting, Located,
    LocatedState, SettlingFluxes, SettlingLaw, SettlingParameters, StateTable,
};

use nalgebra::{DMatrix, DVector};
use twine_core::Model;
use uom::si::f64::VolumeRate;

use crate::support::{
    component::{Components, ConstituentProperties},
    stream::{Influent, OutletStream},
    units::PerDay,
};

use self::core::{Parameters, tile};

/// A flat-bottom circular clarifier.
///
/// The clarifier has one influent and two outlets: the treated effluent over
/// the weir and the thickened sludge (underflow) from the bottom.
#[derive(Debug, Clone)]
pub struct FlatBottomCircularClarifier<P = Components> {
    id: String,
    effluent_id: String,
    underflow_id: String,
    components: P,
    params: Parameters,
    state: Option<DMatrix<f64>>,
}

/// Streams leaving the clarifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Outlets {
    pub effluent: OutletStream,
    pub underflow: OutletStream,
}

/// Arguments of a single derivative evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct OdeInput {
    /// Influent concentrations, in component column order.
    pub influent: DVector<f64>,
    /// Trial layer state.
    pub state: DMatrix<f64>,
}

impl<P: ConstituentProperties> FlatBottomCircularClarifier<P> {
    /// Creates a clarifier with no state.
    ///
    /// Outlet IDs default to `<id>_effluent` and `<id>_underflow`.
    ///
    /// # Errors
    ///
    /// Returns [`ClarifierError::NoLayers`] or [`ClarifierError::InvalidParameter`]
    /// if the configuration is not physical.
    /// The feed layer is checked later, by [`FlatBottomCircularClarifier::ode`].
    pub fn new(
        id: impl Into<String>,
        components: P,
        config: ClarifierConfig,
    ) -> Result<Self, ClarifierError> {
        let id = id.into();
        Ok(Self {
            effluent_id: format!("{id}_effluent"),
            underflow_id: format!("{id}_underflow"),
            id,
            components,
            params: config.resolve()?,
            state: None,
        })
    }

    /// Overrides the outlet stream IDs.
    #[must_use]
    pub fn with_outlet_ids(
        mut self,
        effluent: impl Into<String>,
        underflow: impl Into<String>,
    ) -> Self {
        self.effluent_id = effluent.into();
        self.underflow_id = underflow.into();
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn components(&self) -> &P {
        &self.components
    }

    /// Number of layers.
    #[must_use]
    pub fn layers(&self) -> usize {
        self.params.layers
    }

    /// Expected state shape, `(layers, constituents)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.params.layers, self.components.len())
    }

    /// Current layer state, if initialized.
    #[must_use]
    pub fn state(&self) -> Option<&DMatrix<f64>> {
        self.state.as_ref()
    }

    /// Replaces the layer state wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`ClarifierError::ShapeMismatch`] and leaves the state untouched
    /// if `state` is not `(layers, constituents)`.
    pub fn set_state(&mut self, state: DMatrix<f64>) -> Result<(), ClarifierError> {
        self.check_shape(&state)?;
        log::debug!("clarifier {}: state replaced", self.id);
        self.state = Some(state);
        Ok(())
    }

    /// Initializes the state from the influent if it is not set yet.
    ///
    /// Every layer starts at the influent concentrations.
    ///
    /// # Errors
    ///
    /// Returns [`ClarifierError::InfluentLength`] if the influent does not
    /// carry one concentration per constituent.
    pub fn initialize_state(
        &mut self,
        influent: &impl Influent,
    ) -> Result<&DMatrix<f64>, ClarifierError> {
        let state = match self.state.take() {
            Some(state) => state,
            None => {
                let c_in = self.checked_influent(influent)?;
                log::debug!(
                    "clarifier {}: initializing {} layers from influent",
                    self.id,
                    self.params.layers
                );
                tile(c_in, self.params.layers)
            }
        };
        Ok(self.state.insert(state))
    }

    /// Locates outlet conditions in a state matrix.
    ///
    /// # Errors
    ///
    /// Returns [`ClarifierError::ShapeMismatch`] if `state` is not
    /// `(layers, constituents)`.
    pub fn locate(&self, state: &DMatrix<f64>) -> Result<LocatedState, ClarifierError> {
        self.check_shape(state)?;
        Ok(LocatedState::new(
            &self.id,
            &self.effluent_id,
            &self.underflow_id,
            state,
        ))
    }

    /// Initializes the state if needed and locates its outlet conditions.
    ///
    /// # Errors
    ///
    /// Returns [`ClarifierError::InfluentLength`] if the state must be
    /// initialized from a mismatched influent.
    pub fn load_state(&mut self, influent: &impl Influent) -> Result<LocatedState, ClarifierError> {
        let state = self.initialize_state(influent)?.clone();
        self.locate(&state)
    }

    /// Layer-indexed view of the current state, if initialized.
    #[must_use]
    pub fn state_table(&self) -> Option<StateTable<'_, P>> {
        self.state
            .as_ref()
            .map(|state| StateTable::new(&self.components, state))
    }

    /// Computes the outlet streams from the current state.
    ///
    /// The underflow leaves at the design rate with the bottom layer's
    /// concentrations; the effluent carries the remaining flow with the top
    /// layer's concentrations. Water is excluded from both.
    ///
    /// # Errors
    ///
    /// Returns [`ClarifierError::InfluentLength`] if the state must be
    /// initialized from a mismatched influent.
    pub fn outlets(&mut self, influent: &impl Influent) -> Result<Outlets, ClarifierError> {
        let located = self.load_state(influent)?;

        let q_in = influent.total_flow().per_day();
        let q_s = self.params.underflow;
        let q_e = q_in - q_s;
        if q_e < 0.0 {
            log::warn!(
                "clarifier {}: design underflow {q_s} m3/d exceeds influent {q_in} m3/d",
                self.id
            );
        }

        Ok(Outlets {
            effluent: OutletStream::from_concentrations(
                located.effluent.id,
                VolumeRate::from_per_day(q_e),
                &self.components,
                &located.effluent.value,
            ),
            underflow: OutletStream::from_concentrations(
                located.underflow.id,
                VolumeRate::from_per_day(q_s),
                &self.components,
                &located.underflow.value,
            ),
        })
    }

    /// Builds the derivative engine for the given influent.
    ///
    /// The influent flow is bound now; influent concentrations are passed to
    /// every [`ClarifierOde::derivative`] call.
    ///
    /// # Errors
    ///
    /// Returns [`ClarifierError::FeedLayerOutOfRange`] if the feed layer is not
    /// between 1 and the layer count, or [`ClarifierError::InvalidParameter`] if
    /// the component properties are out of range.
    pub fn ode(&self, influent: &impl Influent) -> Result<ClarifierOde, ClarifierError> {
        let partition = ConstituentPartition::from_properties(&self.components)?;
        ClarifierOde::new(&self.params, partition, influent.total_flow().per_day())
    }

    fn check_shape(&self, state: &DMatrix<f64>) -> Result<(), ClarifierError> {
        let expected = self.shape();
        if state.shape() == expected {
            Ok(())
        } else {
            Err(ClarifierError::ShapeMismatch {
                expected,
                found: state.shape(),
            })
        }
    }

    fn checked_influent<'a>(
        &self,
        influent: &'a impl Influent,
    ) -> Result<&'a DVector<f64>, ClarifierError> {
        let c_in = influent.concentrations();
        if c_in.len() == self.components.len() {
            Ok(c_in)
        } else {
            Err(ClarifierError::InfluentLength {
                expected: self.components.len(),
                found: c_in.len(),
            })
        }
    }
}

impl Model for ClarifierOde {
    type Input = OdeInput;
    type Output = DMatrix<f64>;
    type Error = ClarifierError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.derivative(&input.influent, &input.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use super::core::test_support::{influent, mixed_components, solids_only};
    use crate::support::component::WATER_ID;

    fn reference_clarifier() -> FlatBottomCircularClarifier {
        FlatBottomCircularClarifier::new("C1", solids_only(), ClarifierConfig::default()).unwrap()
    }

    #[test]
    fn state_is_absent_until_initialized() {
        let mut clarifier = reference_clarifier();
        assert!(clarifier.state().is_none());
        assert!(clarifier.state_table().is_none());

        let state = clarifier.initialize_state(&influent(20_000.0, &[4000.0])).unwrap();
        assert_eq!(state.shape(), (10, 1));
        assert!(state.iter().all(|&c| c == 4000.0));
        assert!(clarifier.state_table().is_some());
    }

    #[test]
    fn initialization_keeps_existing_state() {
        let mut clarifier = reference_clarifier();
        let custom = DMatrix::from_element(10, 1, 123.0);
        clarifier.set_state(custom.clone()).unwrap();

        let state = clarifier.initialize_state(&influent(20_000.0, &[4000.0])).unwrap();
        assert_eq!(state, &custom);
    }

    #[test]
    fn set_state_rejects_wrong_shape_without_mutation() {
        let mut clarifier = reference_clarifier();

        let result = clarifier.set_state(DMatrix::zeros(9, 1));
        assert_eq!(
            result,
            Err(ClarifierError::ShapeMismatch {
                expected: (10, 1),
                found: (9, 1),
            })
        );
        assert!(clarifier.state().is_none());

        clarifier.initialize_state(&influent(20_000.0, &[4000.0])).unwrap();
        let before = clarifier.state().cloned();
        assert!(clarifier.set_state(DMatrix::zeros(10, 2)).is_err());
        assert_eq!(clarifier.state().cloned(), before);
    }

    #[test]
    fn initialization_rejects_mismatched_influent() {
        let mut clarifier = reference_clarifier();
        let result = clarifier.initialize_state(&influent(20_000.0, &[4000.0, 30.0]));

        assert_eq!(
            result.unwrap_err(),
            ClarifierError::InfluentLength {
                expected: 1,
                found: 2,
            }
        );
        assert!(clarifier.state().is_none());
    }

    #[test]
    fn load_state_locates_outlets() {
        let mut clarifier = reference_clarifier().with_outlet_ids("effluent", "sludge");
        let stream = influent(20_000.0, &[4000.0]);
        clarifier.initialize_state(&stream).unwrap();

        let mut state = DMatrix::from_element(10, 1, 4000.0);
        state[(0, 0)] = 15.0;
        state[(9, 0)] = 9000.0;
        clarifier.set_state(state.clone()).unwrap();

        let located = clarifier.load_state(&stream).unwrap();
        assert_eq!(located.effluent.id, "effluent");
        assert_relative_eq!(located.effluent.value[0], 15.0);
        assert_eq!(located.underflow.id, "sludge");
        assert_relative_eq!(located.underflow.value[0], 9000.0);
        assert_eq!(located.internal.id, "C1");
        assert_eq!(located.internal.value, state);
    }

    #[test]
    fn outlets_split_flow_and_drop_water() {
        let mut clarifier =
            FlatBottomCircularClarifier::new("C1", mixed_components(), ClarifierConfig::default())
                .unwrap();
        let stream = influent(20_000.0, &[30.0, 2000.0, 1000.0, 1.0e6]);

        let mut state = tile(stream.concentrations(), 10);
        state[(9, 1)] = 8000.0;
        clarifier.set_state(state).unwrap();

        let outlets = clarifier.outlets(&stream).unwrap();
        assert_eq!(outlets.effluent.id(), "C1_effluent");
        assert_eq!(outlets.underflow.id(), "C1_underflow");
        assert_relative_eq!(outlets.effluent.flow().per_day(), 18_000.0, epsilon = 1e-6);
        assert_relative_eq!(outlets.underflow.flow().per_day(), 2000.0, epsilon = 1e-6);

        assert_eq!(outlets.effluent.concentration(WATER_ID), None);
        assert_eq!(outlets.underflow.concentration(WATER_ID), None);
        assert_eq!(outlets.effluent.concentration("X_I"), Some(2000.0));
        assert_eq!(outlets.underflow.concentration("X_I"), Some(8000.0));
        assert_eq!(outlets.underflow.concentrations().len(), 3);
    }

    #[test]
    fn ode_rejects_out_of_range_feed_layer() {
        for feed_layer in [0, 11] {
            let config = ClarifierConfig {
                feed_layer,
                ..ClarifierConfig::default()
            };
            let clarifier = FlatBottomCircularClarifier::new("C1", solids_only(), config).unwrap();

            assert_eq!(
                clarifier.ode(&influent(20_000.0, &[4000.0])).unwrap_err(),
                ClarifierError::FeedLayerOutOfRange {
                    feed_layer,
                    layers: 10,
                }
            );
        }
    }

    #[test]
    fn ode_binds_influent_flow() {
        let clarifier = reference_clarifier();
        let ode = clarifier.ode(&influent(20_000.0, &[4000.0])).unwrap();

        assert_eq!(ode.layers(), 10);
        assert_eq!(ode.constituents(), 1);
        assert_eq!(ode.routing().feed(), 3);
        assert_relative_eq!(ode.routing().influent(), 20_000.0, epsilon = 1e-6);
        assert_relative_eq!(ode.routing().effluent(), 18_000.0, epsilon = 1e-6);
    }

    #[test]
    fn model_call_matches_derivative() {
        let mut clarifier = reference_clarifier();
        let stream = influent(20_000.0, &[4000.0]);
        let state = clarifier.initialize_state(&stream).unwrap().clone();
        let ode = clarifier.ode(&stream).unwrap();

        let input = OdeInput {
            influent: stream.concentrations().clone(),
            state: state.clone(),
        };
        let via_model = ode.call(&input).unwrap();
        let direct = ode.derivative(stream.concentrations(), &state).unwrap();

        assert_eq!(via_model, direct);
        assert!(via_model[(0, 0)] < 0.0);
        assert!(via_model[(9, 0)] > 0.0);
    }

    #[test]
    fn derivative_does_not_touch_state() {
        let mut clarifier = reference_clarifier();
        let stream = influent(20_000.0, &[4000.0]);
        let before = clarifier.initialize_state(&stream).unwrap().clone();

        let ode = clarifier.ode(&stream).unwrap();
        let trial = DMatrix::from_element(10, 1, 2500.0);
        ode.derivative(stream.concentrations(), &trial).unwrap();

        assert_eq!(clarifier.state(), Some(&before));
    }
}
