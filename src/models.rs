//! Public Twine models.
//!
//! Models are organized into domain-specific submodules.
//!
//! # Model structure
//!
//! Each model lives in its own module and contains an internal `core` submodule
//! where the computation lives. The `core` module is an implementation detail;
//! the types callers need are re-exported from the model module.
//!
//! The [`twine_core::Model`] implementation is a thin adapter that delegates to
//! the core API.

pub mod wastewater;
