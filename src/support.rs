//! Supporting utilities used by models.
//!
//! These modules are public because they are useful on their own, but their
//! APIs are not yet stable.

pub mod component;
pub mod constraint;
pub mod stream;
pub mod units;
