//! # Clarifier Models
//!
//! Layered settling models for wastewater clarifiers, built for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! ## Crate layout
//!
//! - [`models`]: Unit models and their [`twine_core::Model`] implementations.
//! - [`support`]: Component definitions, streams, units, and value constraints
//!   shared by the models.
//!
//! ## Stability
//!
//! Modules in [`support`] are public because they're needed to drive the
//! models, but their APIs are not stable. Model-specific utility code stays in
//! each model's private `core` module.

pub mod models;
pub mod support;
