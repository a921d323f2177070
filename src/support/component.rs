//! Constituent property model for wastewater streams.
//!
//! Process models track a fixed, ordered set of constituents (soluble
//! substrate, particulate biomass, water, ...). Each constituent carries the
//! attributes the models need: a mass-conversion factor (`i_mass`, mass per
//! unit of the measured quantity) and a particle-size class that decides
//! whether the constituent settles.
//!
//! The column order of every concentration vector and state matrix in this
//! crate follows the order of a [`Components`] set.

mod classification;
mod error;

pub use classification::{Degradability, ParticleSize};
pub use error::ComponentError;

use crate::support::constraint::{Constrained, NonNegative};

/// Identifier conventionally used for the water (solvent) constituent.
pub const WATER_ID: &str = "H2O";

/// Per-constituent attributes consumed by process models.
///
/// Indices run over `0..len()` in the fixed column order shared by all
/// concentration vectors and state matrices.
pub trait ConstituentProperties {
    /// Number of constituents.
    fn len(&self) -> usize;

    /// Returns `true` if there are no constituents.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identifier of the constituent at `index`.
    fn id(&self, index: usize) -> &str;

    /// Mass-conversion factor of the constituent at `index`.
    fn mass_factor(&self, index: usize) -> f64;

    /// Particulate indicator of the constituent at `index`, in `[0, 1]`.
    ///
    /// A value of 1 means fully particulate.
    fn particulate_fraction(&self, index: usize) -> f64;
}

/// A single tracked constituent.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    id: String,
    i_mass: f64,
    particle_size: ParticleSize,
    degradability: Degradability,
    organic: bool,
    measured_as: Option<String>,
}

impl Component {
    /// Creates a component with a mass-conversion factor of 1.
    ///
    /// The component defaults to undegradable and inorganic.
    #[must_use]
    pub fn new(id: impl Into<String>, particle_size: ParticleSize) -> Self {
        Self {
            id: id.into(),
            i_mass: 1.0,
            particle_size,
            degradability: Degradability::Undegradable,
            organic: false,
            measured_as: None,
        }
    }

    /// Sets the mass-conversion factor.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidMassFactor`] if `i_mass` is negative or `NaN`.
    pub fn with_i_mass(mut self, i_mass: f64) -> Result<Self, ComponentError> {
        let i_mass = Constrained::<f64, NonNegative>::new(i_mass).map_err(|source| {
            ComponentError::InvalidMassFactor {
                id: self.id.clone(),
                source,
            }
        })?;
        self.i_mass = i_mass.into_inner();
        Ok(self)
    }

    /// Sets the degradability class.
    #[must_use]
    pub fn with_degradability(mut self, degradability: Degradability) -> Self {
        self.degradability = degradability;
        self
    }

    /// Marks the component as organic or inorganic.
    #[must_use]
    pub fn with_organic(mut self, organic: bool) -> Self {
        self.organic = organic;
        self
    }

    /// Sets the species the component is measured as (e.g., `"COD"`, `"N"`).
    #[must_use]
    pub fn with_measured_as(mut self, measured_as: impl Into<String>) -> Self {
        self.measured_as = Some(measured_as.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn i_mass(&self) -> f64 {
        self.i_mass
    }

    #[must_use]
    pub fn particle_size(&self) -> ParticleSize {
        self.particle_size
    }

    #[must_use]
    pub fn degradability(&self) -> Degradability {
        self.degradability
    }

    #[must_use]
    pub fn organic(&self) -> bool {
        self.organic
    }

    #[must_use]
    pub fn measured_as(&self) -> Option<&str> {
        self.measured_as.as_deref()
    }
}

/// An ordered, duplicate-free set of components.
///
/// # Example
///
/// ```
/// use clarifier_models::support::component::{
///     Component, Components, ConstituentProperties, ParticleSize,
/// };
///
/// let cmps = Components::new([
///     Component::new("S_S", ParticleSize::Soluble),
///     Component::new("X_BH", ParticleSize::Particulate).with_i_mass(0.9).unwrap(),
///     Component::new("H2O", ParticleSize::Soluble),
/// ])
/// .unwrap();
///
/// assert_eq!(cmps.len(), 3);
/// assert_eq!(cmps.index_of("X_BH"), Some(1));
/// assert_eq!(cmps.particulate_fraction(1), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Components {
    components: Vec<Component>,
}

impl Components {
    /// Compiles a component set, preserving the given order.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::DuplicateId`] if two components share an ID.
    pub fn new(components: impl IntoIterator<Item = Component>) -> Result<Self, ComponentError> {
        let components: Vec<Component> = components.into_iter().collect();
        for (i, cmp) in components.iter().enumerate() {
            if components[..i].iter().any(|other| other.id == cmp.id) {
                return Err(ComponentError::DuplicateId(cmp.id.clone()));
            }
        }
        Ok(Self { components })
    }

    /// Returns the position of the component with the given ID.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.components.iter().position(|cmp| cmp.id == id)
    }

    /// Returns the component with the given ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|cmp| cmp.id == id)
    }

    /// Iterates over the components in column order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    /// Returns the component IDs in column order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.components.iter().map(Component::id).collect()
    }
}

impl ConstituentProperties for Components {
    fn len(&self) -> usize {
        self.components.len()
    }

    fn id(&self, index: usize) -> &str {
        &self.components[index].id
    }

    fn mass_factor(&self, index: usize) -> f64 {
        self.components[index].i_mass
    }

    fn particulate_fraction(&self, index: usize) -> f64 {
        self.components[index].particle_size.particulate_fraction()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn asm_subset() -> Components {
        Components::new([
            Component::new("S_S", ParticleSize::Soluble)
                .with_degradability(Degradability::Biological)
                .with_organic(true)
                .with_measured_as("COD"),
            Component::new("X_S", ParticleSize::Particulate)
                .with_degradability(Degradability::Biological)
                .with_organic(true)
                .with_measured_as("COD")
                .with_i_mass(0.75)
                .unwrap(),
            Component::new("S_O2", ParticleSize::DissolvedGas),
            Component::new(WATER_ID, ParticleSize::Soluble),
        ])
        .unwrap()
    }

    #[test]
    fn preserves_order_and_attributes() {
        let cmps = asm_subset();

        assert_eq!(cmps.ids(), vec!["S_S", "X_S", "S_O2", "H2O"]);
        assert_eq!(cmps.id(2), "S_O2");
        assert_relative_eq!(cmps.mass_factor(0), 1.0);
        assert_relative_eq!(cmps.mass_factor(1), 0.75);

        let x_s = cmps.get("X_S").unwrap();
        assert_eq!(x_s.degradability(), Degradability::Biological);
        assert!(x_s.organic());
        assert_eq!(x_s.measured_as(), Some("COD"));
        assert!(cmps.get("X_P").is_none());
    }

    #[test]
    fn only_particulates_settle() {
        let cmps = asm_subset();
        let fractions: Vec<f64> = (0..cmps.len())
            .map(|i| cmps.particulate_fraction(i))
            .collect();
        assert_eq!(fractions, vec![0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = Components::new([
            Component::new("X_I", ParticleSize::Particulate),
            Component::new("X_I", ParticleSize::Colloidal),
        ]);
        assert_eq!(result, Err(ComponentError::DuplicateId("X_I".into())));
    }

    #[test]
    fn rejects_negative_mass_factor() {
        let result = Component::new("X_I", ParticleSize::Particulate).with_i_mass(-0.1);
        assert!(matches!(
            result,
            Err(ComponentError::InvalidMassFactor { ref id, .. }) if id == "X_I"
        ));
    }
}
