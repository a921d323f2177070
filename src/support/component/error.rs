use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// Errors that can occur while defining components.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    /// Two components in the same set share an identifier.
    #[error("duplicate component ID `{0}`")]
    DuplicateId(String),

    /// A particle-size label is not one of the recognized classes.
    #[error(
        "unknown particle size `{0}`: must be one of \"Dissolved gas\", \"Soluble\", \"Colloidal\", \"Particulate\""
    )]
    UnknownParticleSize(String),

    /// A mass-conversion factor violates its constraint.
    #[error("invalid i_mass for component `{id}`")]
    InvalidMassFactor {
        id: String,
        #[source]
        source: ConstraintError,
    },
}
