//! Double-exponential settling velocity law.
//!
//! Velocities follow Takács et al. (1991):
//!
//! ```text
//! X* = max(X - X_min, 0)
//! v  = clamp(v_max · (exp(-r_h · X*) - exp(-r_p · X*)), 0, v_max_practical)
//! ```
//!
//! where `X_min` is the non-settleable concentration floor derived from the
//! influent. The law is constituent-independent and applies to the aggregate
//! particulate concentration of a layer.

/// Coefficients of the double-exponential settling law.
///
/// Velocities are in m/d, rate coefficients in m³/g, and concentrations
/// passed to the methods in g/m³.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettlingLaw {
    /// Maximum theoretical (Vesilind) settling velocity.
    pub v_max: f64,
    /// Maximum practical settling velocity.
    pub v_max_practical: f64,
    /// Hindered-zone settling parameter.
    pub hindered_rate: f64,
    /// Flocculant-zone settling parameter.
    pub flocculant_rate: f64,
}

impl SettlingLaw {
    /// Settling velocity of a layer with aggregate particulate concentration `x`.
    ///
    /// The result is never negative and never exceeds `v_max_practical`.
    #[must_use]
    pub fn velocity(&self, x: f64, x_min: f64) -> f64 {
        let x_star = (x - x_min).max(0.0);
        let v = self.v_max
            * ((-self.hindered_rate * x_star).exp() - (-self.flocculant_rate * x_star).exp());
        v.min(self.v_max_practical).max(0.0)
    }

    /// Settling mass flux `x · v` out of a layer, in g/(m²·d).
    ///
    /// This is the flux the layer could deliver to the layer below if nothing
    /// limited it.
    #[must_use]
    pub fn flux(&self, x: f64, x_min: f64) -> f64 {
        x * self.velocity(x, x_min)
    }
}
