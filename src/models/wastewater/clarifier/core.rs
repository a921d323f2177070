//! Layered solids-settling model of a flat-bottom circular clarifier.
//!
//! The clarifier is split into N horizontal layers, numbered from 0 at the
//! top (effluent weir) to N−1 at the bottom (sludge outlet). Each layer holds
//! a concentration for every constituent; together they form the
//! `(N × M)` state matrix advanced by an external ODE integrator.
//!
//! This module supplies the right-hand side of that system:
//!
//! - [`SettlingLaw`]: double-exponential settling velocity of a layer
//! - [`SettlingFluxes`]: limited settling fluxes between adjacent layers
//! - [`FlowRouting`]: bulk flow split at the feed layer
//! - [`ConstituentPartition`]: particulate/soluble split of concentrations
//! - [`ClarifierOde`]: the derivative engine combining all of the above

mod config;
mod derivative;
mod error;
mod flux;
mod partition;
mod routing;
mod settling;
mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{ClarifierConfig, SettlingParameters};
pub use derivative::ClarifierOde;
pub use error::ClarifierError;
pub use flux::SettlingFluxes;
pub use partition::ConstituentPartition;
pub use routing::FlowRouting;
pub use settling::SettlingLaw;
pub use state::{Located, LocatedState, StateTable, tile};

pub(crate) use config::Parameters;
