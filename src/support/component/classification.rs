use std::{fmt, str::FromStr};

use super::ComponentError;

/// Size class of a constituent.
///
/// Only [`ParticleSize::Particulate`] constituents take part in settling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleSize {
    DissolvedGas,
    Soluble,
    Colloidal,
    Particulate,
}

impl ParticleSize {
    /// Returns the particulate indicator: 1 for particulates, 0 otherwise.
    #[must_use]
    pub fn particulate_fraction(self) -> f64 {
        match self {
            Self::Particulate => 1.0,
            Self::DissolvedGas | Self::Soluble | Self::Colloidal => 0.0,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::DissolvedGas => "Dissolved gas",
            Self::Soluble => "Soluble",
            Self::Colloidal => "Colloidal",
            Self::Particulate => "Particulate",
        }
    }
}

impl fmt::Display for ParticleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ParticleSize {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::DissolvedGas,
            Self::Soluble,
            Self::Colloidal,
            Self::Particulate,
        ]
        .into_iter()
        .find(|size| size.label() == s)
        .ok_or_else(|| ComponentError::UnknownParticleSize(s.to_owned()))
    }
}

/// How a constituent can be degraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Degradability {
    Biological,
    Chemical,
    Undegradable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels() {
        assert_eq!(
            "Dissolved gas".parse::<ParticleSize>(),
            Ok(ParticleSize::DissolvedGas)
        );
        assert_eq!(
            "Particulate".parse::<ParticleSize>(),
            Ok(ParticleSize::Particulate)
        );
        assert_eq!(
            "Sludge".parse::<ParticleSize>(),
            Err(ComponentError::UnknownParticleSize("Sludge".into()))
        );
    }

    #[test]
    fn display_matches_parse() {
        for size in [
            ParticleSize::DissolvedGas,
            ParticleSize::Soluble,
            ParticleSize::Colloidal,
            ParticleSize::Particulate,
        ] {
            assert_eq!(size.to_string().parse::<ParticleSize>(), Ok(size));
        }
    }
}
