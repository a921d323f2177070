//! Stream interfaces for wastewater unit models.
//!
//! A unit model reads its influent through the [`Influent`] trait and reports
//! its outlets as [`OutletStream`]s. Concentrations are in g/m³ and follow the
//! column order of the component set the stream was built against.

use nalgebra::DVector;
use uom::si::f64::VolumeRate;

use crate::support::component::{ConstituentProperties, WATER_ID};

/// Inbound stream contract.
pub trait Influent {
    /// Total volumetric flow rate.
    fn total_flow(&self) -> VolumeRate;

    /// Per-constituent concentrations in g/m³, in component column order.
    fn concentrations(&self) -> &DVector<f64>;
}

/// A stream defined by its total flow and a concentration vector.
#[derive(Debug, Clone, PartialEq)]
pub struct WasteStream {
    id: String,
    flow: VolumeRate,
    concentrations: DVector<f64>,
}

impl WasteStream {
    #[must_use]
    pub fn new(id: impl Into<String>, flow: VolumeRate, concentrations: DVector<f64>) -> Self {
        Self {
            id: id.into(),
            flow,
            concentrations,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Influent for WasteStream {
    fn total_flow(&self) -> VolumeRate {
        self.flow
    }

    fn concentrations(&self) -> &DVector<f64> {
        &self.concentrations
    }
}

/// A stream leaving a unit, with constituent-keyed concentrations.
///
/// Water is carried by the flow rate and never appears as a concentration.
#[derive(Debug, Clone, PartialEq)]
pub struct OutletStream {
    id: String,
    flow: VolumeRate,
    concentrations: Vec<(String, f64)>,
}

impl OutletStream {
    /// Builds an outlet from a concentration row in component column order.
    ///
    /// The water constituent is skipped if the component set has one.
    pub fn from_concentrations<'a>(
        id: impl Into<String>,
        flow: VolumeRate,
        components: &impl ConstituentProperties,
        concentrations: impl IntoIterator<Item = &'a f64>,
    ) -> Self {
        let concentrations = concentrations
            .into_iter()
            .enumerate()
            .take(components.len())
            .filter(|&(i, _)| components.id(i) != WATER_ID)
            .map(|(i, &c)| (components.id(i).to_owned(), c))
            .collect();

        Self {
            id: id.into(),
            flow,
            concentrations,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn flow(&self) -> VolumeRate {
        self.flow
    }

    /// Concentration of the constituent with the given ID, in g/m³.
    #[must_use]
    pub fn concentration(&self, id: &str) -> Option<f64> {
        self.concentrations
            .iter()
            .find_map(|(key, c)| (key == id).then_some(*c))
    }

    /// Constituent-keyed concentrations in component column order.
    #[must_use]
    pub fn concentrations(&self) -> &[(String, f64)] {
        &self.concentrations
    }
}
