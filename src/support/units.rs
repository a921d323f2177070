//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for dimensional inputs such as surface area, height,
//! flow rate, and settling velocity.
//! Wastewater models are conventionally parameterized per day (m³/d, m/d),
//! while [`uom`] stores rates per second, so this module provides conversions
//! between the two.
//!
//! ## Per-day magnitudes
//!
//! The [`PerDay`] trait converts a rate quantity to and from its magnitude in
//! the per-day unit used by the clarifier core:
//!
//! ```
//! use uom::si::{f64::VolumeRate, volume_rate::cubic_meter_per_second};
//! use clarifier_models::support::units::PerDay;
//!
//! let q = VolumeRate::from_per_day(86_400.0);
//! assert!((q.get::<cubic_meter_per_second>() - 1.0).abs() < 1e-12);
//! assert!((q.per_day() - 86_400.0).abs() < 1e-9);
//! ```

mod per_day;

pub use per_day::PerDay;
