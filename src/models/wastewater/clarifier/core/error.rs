use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// Errors that can occur while configuring or evaluating a clarifier.
///
/// All of these indicate a configuration or programming defect; none are
/// transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClarifierError {
    /// The clarifier was configured with zero layers.
    #[error("clarifier must have at least one layer")]
    NoLayers,

    /// The feed layer does not name one of the clarifier's layers.
    #[error("feed layer {feed_layer} is out of range: must be an integer between 1 and {layers}")]
    FeedLayerOutOfRange {
        /// Configured feed layer, counted from 1.
        feed_layer: usize,
        /// Number of layers.
        layers: usize,
    },

    /// A state matrix does not have one row per layer and one column per constituent.
    #[error("state must be a matrix of shape {expected:?}, got {found:?}")]
    ShapeMismatch {
        /// Expected `(layers, constituents)`.
        expected: (usize, usize),
        /// Shape that was supplied.
        found: (usize, usize),
    },

    /// An influent concentration vector does not match the constituent count.
    #[error("influent has {found} concentrations, expected {expected}")]
    InfluentLength { expected: usize, found: usize },

    /// A physical parameter violates its bound.
    #[error("invalid clarifier parameter `{parameter}`")]
    InvalidParameter {
        parameter: &'static str,
        #[source]
        source: ConstraintError,
    },
}
