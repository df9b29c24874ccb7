//! Bar sampling method definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ConfigError;

/// What a bar's threshold is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMethod {
    /// Fixed number of records per bar.
    Count,
    /// Cumulative traded volume per bar.
    #[default]
    Volume,
    /// Cumulative traded notional (close x volume) per bar.
    Dollar,
}

impl SamplingMethod {
    /// Returns the method as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Volume => "volume",
            Self::Dollar => "dollar",
        }
    }

    /// Returns all available methods.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Count, Self::Volume, Self::Dollar]
    }
}

impl std::fmt::Display for SamplingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SamplingMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "count" | "tick" | "ticks" => Ok(Self::Count),
            "volume" | "vol" => Ok(Self::Volume),
            "dollar" | "notional" | "value" => Ok(Self::Dollar),
            _ => Err(ConfigError::UnknownMethod(s.to_string())),
        }
    }
}
