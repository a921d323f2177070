//! Wastewater treatment unit models.

pub mod clarifier;
