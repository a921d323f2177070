use nalgebra::DVector;

use crate::support::{
    component::{Component, Components, ParticleSize, WATER_ID},
    stream::WasteStream,
    units::PerDay,
};
use uom::si::f64::VolumeRate;

use super::SettlingLaw;

/// Settling law with the reference coefficients, in m/d and m³/g.
pub(crate) fn reference_law() -> SettlingLaw {
    SettlingLaw {
        v_max: 474.0,
        v_max_practical: 250.0,
        hindered_rate: 5.76e-4,
        flocculant_rate: 2.86e-3,
    }
}

/// A single particulate constituent standing in for total suspended solids.
pub(crate) fn solids_only() -> Components {
    Components::new([Component::new("X_TSS", ParticleSize::Particulate)]).unwrap()
}

/// Soluble substrate, two particulates, and water.
pub(crate) fn mixed_components() -> Components {
    Components::new([
        Component::new("S_S", ParticleSize::Soluble),
        Component::new("X_I", ParticleSize::Particulate)
            .with_i_mass(0.75)
            .unwrap(),
        Component::new("X_S", ParticleSize::Particulate),
        Component::new(WATER_ID, ParticleSize::Soluble),
    ])
    .unwrap()
}

pub(crate) fn influent(flow_per_day: f64, concentrations: &[f64]) -> WasteStream {
    WasteStream::new(
        "influent",
        VolumeRate::from_per_day(flow_per_day),
        DVector::from_column_slice(concentrations),
    )
}
