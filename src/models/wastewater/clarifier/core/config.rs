use uom::si::{
    area::square_meter,
    f64::{Area, Length, Velocity, VolumeRate},
    length::meter,
};

use crate::support::{
    constraint::{Constrained, Constraint, NonNegative, StrictlyPositive, UnitInterval},
    units::PerDay,
};

use super::{ClarifierError, SettlingLaw};

/// Construction-time configuration of a flat-bottom circular clarifier.
///
/// The defaults reproduce the reference clarifier of Takács et al. (1991):
/// ten layers fed at the fourth, 1500 m² by 4 m, with 2000 m³/d underflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClarifierConfig {
    /// Number of layers modeled.
    pub layers: usize,

    /// Feed layer, counted from 1 at the top.
    ///
    /// Checked against `layers` when the derivative engine is built.
    pub feed_layer: usize,

    /// Clarifier surface area.
    pub surface_area: Area,

    /// Clarifier height.
    pub height: Length,

    /// Design sludge (underflow) rate, WAS plus RAS.
    pub underflow: VolumeRate,

    /// Settling-law coefficients.
    pub settling: SettlingParameters,
}

impl Default for ClarifierConfig {
    fn default() -> Self {
        Self {
            layers: 10,
            feed_layer: 4,
            surface_area: Area::new::<square_meter>(1500.0),
            height: Length::new::<meter>(4.0),
            underflow: VolumeRate::from_per_day(2000.0),
            settling: SettlingParameters::default(),
        }
    }
}

/// Coefficients of the layer settling model.
///
/// Concentrations are in g/m³ and rate coefficients in m³/g.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettlingParameters {
    /// Maximum theoretical (Vesilind) settling velocity.
    pub v_max: Velocity,

    /// Maximum practical settling velocity.
    pub v_max_practical: Velocity,

    /// Hindered-zone settling parameter.
    pub hindered_rate: f64,

    /// Flocculant-zone settling parameter.
    pub flocculant_rate: f64,

    /// Threshold suspended solids concentration.
    pub threshold: f64,

    /// Non-settleable fraction of the influent suspended solids.
    pub non_settleable_fraction: f64,
}

impl Default for SettlingParameters {
    fn default() -> Self {
        Self {
            v_max: Velocity::from_per_day(474.0),
            v_max_practical: Velocity::from_per_day(250.0),
            hindered_rate: 5.76e-4,
            flocculant_rate: 2.86e-3,
            threshold: 3000.0,
            non_settleable_fraction: 2.28e-3,
        }
    }
}

/// Validated parameters resolved to core units (m, m³/d, m/d, g/m³).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Parameters {
    pub layers: usize,
    pub feed_layer: usize,
    pub area: f64,
    pub height: f64,
    pub underflow: f64,
    pub law: SettlingLaw,
    pub threshold: f64,
    pub non_settleable_fraction: f64,
}

impl ClarifierConfig {
    /// Validates the configuration and resolves it to core units.
    ///
    /// # Errors
    ///
    /// Returns [`ClarifierError::NoLayers`] for a zero layer count and
    /// [`ClarifierError::InvalidParameter`] for any other violated bound.
    pub(crate) fn resolve(&self) -> Result<Parameters, ClarifierError> {
        if self.layers == 0 {
            return Err(ClarifierError::NoLayers);
        }

        let s = &self.settling;
        let law = SettlingLaw {
            v_max: checked::<_, NonNegative>("v_max", s.v_max)?.per_day(),
            v_max_practical: checked::<_, NonNegative>("v_max_practical", s.v_max_practical)?
                .per_day(),
            hindered_rate: checked::<_, NonNegative>("hindered_rate", s.hindered_rate)?,
            flocculant_rate: checked::<_, NonNegative>("flocculant_rate", s.flocculant_rate)?,
        };

        Ok(Parameters {
            layers: self.layers,
            feed_layer: self.feed_layer,
            area: checked::<_, StrictlyPositive>("surface_area", self.surface_area)?
                .get::<square_meter>(),
            height: checked::<_, StrictlyPositive>("height", self.height)?.get::<meter>(),
            underflow: checked::<_, NonNegative>("underflow", self.underflow)?.per_day(),
            law,
            threshold: checked::<_, NonNegative>("threshold", s.threshold)?,
            non_settleable_fraction: checked::<_, UnitInterval>(
                "non_settleable_fraction",
                s.non_settleable_fraction,
            )?,
        })
    }
}

impl Parameters {
    /// Height of a single layer.
    pub fn layer_height(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let layers = self.layers as f64;
        self.height / layers
    }

    /// Converts the 1-based feed layer to a 0-based layer index.
    ///
    /// # Errors
    ///
    /// Returns [`ClarifierError::FeedLayerOutOfRange`] unless `1 ≤ feed_layer ≤ layers`.
    pub fn feed_index(&self) -> Result<usize, ClarifierError> {
        self.feed_layer
            .checked_sub(1)
            .filter(|&jf| jf < self.layers)
            .ok_or(ClarifierError::FeedLayerOutOfRange {
                feed_layer: self.feed_layer,
                layers: self.layers,
            })
    }
}

fn checked<T, C: Constraint<T>>(parameter: &'static str, value: T) -> Result<T, ClarifierError> {
    Constrained::<T, C>::new(value)
        .map(Constrained::into_inner)
        .map_err(|source| ClarifierError::InvalidParameter { parameter, source })
}
