//! Sampling policies deciding when a window becomes a bar.

use std::num::NonZeroU32;
use std::str::FromStr;

use tickbars_types::{ConfigError, SamplingMethod};

use crate::WindowSnapshot;

/// A strictly positive, finite threshold.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    /// Validates a threshold for `method`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveThreshold`] for zero, negative, NaN or
    /// infinite values.
    pub fn new(method: SamplingMethod, value: f64) -> Result<Self, ConfigError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ConfigError::NonPositiveThreshold {
                method,
                threshold: value,
            })
        }
    }

    /// Returns the threshold value.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

/// Policy deciding when the in-progress window is complete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplingPolicy {
    /// Close after exactly N records.
    Count(NonZeroU32),
    /// Close on the first record that brings cumulative volume to the threshold.
    Volume(Threshold),
    /// Close on the first record that brings cumulative notional to the threshold.
    Dollar(Threshold),
}

impl SamplingPolicy {
    /// Notional threshold used when a dollar policy is requested without one.
    pub const DEFAULT_DOLLAR_THRESHOLD: f64 = 10_000.0;

    /// Creates a policy from a method and a numeric frequency.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the frequency is not positive and finite,
    /// or if a count frequency is fractional or exceeds `u32::MAX`.
    pub fn new(method: SamplingMethod, frequency: f64) -> Result<Self, ConfigError> {
        let threshold = Threshold::new(method, frequency)?;
        match method {
            SamplingMethod::Count => {
                if frequency.fract() != 0.0 || frequency > f64::from(u32::MAX) {
                    return Err(ConfigError::FractionalCount(frequency));
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let n = frequency as u32;
                NonZeroU32::new(n)
                    .map(Self::Count)
                    .ok_or(ConfigError::FractionalCount(frequency))
            }
            SamplingMethod::Volume => Ok(Self::Volume(threshold)),
            SamplingMethod::Dollar => Ok(Self::Dollar(threshold)),
        }
    }

    /// Creates a policy from a method and a textual frequency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonNumericThreshold`] if `frequency` is not a
    /// number, or any error of [`SamplingPolicy::new`].
    pub fn parse(method: SamplingMethod, frequency: &str) -> Result<Self, ConfigError> {
        let value = frequency
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::NonNumericThreshold {
                method,
                value: frequency.to_string(),
            })?;
        Self::new(method, value)
    }

    /// Creates a count policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FractionalCount`] for zero.
    pub fn count(n: u32) -> Result<Self, ConfigError> {
        NonZeroU32::new(n)
            .map(Self::Count)
            .ok_or(ConfigError::FractionalCount(f64::from(n)))
    }

    /// Creates a volume policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveThreshold`] for invalid thresholds.
    pub fn volume(threshold: f64) -> Result<Self, ConfigError> {
        Threshold::new(SamplingMethod::Volume, threshold).map(Self::Volume)
    }

    /// Creates a dollar (notional) policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveThreshold`] for invalid thresholds.
    pub fn dollar(threshold: f64) -> Result<Self, ConfigError> {
        Threshold::new(SamplingMethod::Dollar, threshold).map(Self::Dollar)
    }

    /// Creates a dollar policy with [`Self::DEFAULT_DOLLAR_THRESHOLD`].
    #[must_use]
    pub const fn default_dollar() -> Self {
        Self::Dollar(Threshold(Self::DEFAULT_DOLLAR_THRESHOLD))
    }

    /// Returns the sampling method.
    #[must_use]
    pub const fn method(&self) -> SamplingMethod {
        match self {
            Self::Count(_) => SamplingMethod::Count,
            Self::Volume(_) => SamplingMethod::Volume,
            Self::Dollar(_) => SamplingMethod::Dollar,
        }
    }

    /// Returns the threshold as a number.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        match self {
            Self::Count(n) => f64::from(n.get()),
            Self::Volume(t) | Self::Dollar(t) => t.get(),
        }
    }

    /// Returns true if emitted bars carry cumulative notional.
    #[must_use]
    pub const fn emits_notional(&self) -> bool {
        matches!(self, Self::Dollar(_))
    }

    /// Returns true if the window described by `window` is complete.
    #[must_use]
    pub fn should_flush(&self, window: &WindowSnapshot) -> bool {
        match self {
            Self::Count(n) => window.count == u64::from(n.get()),
            Self::Volume(t) => window.volume >= t.get(),
            Self::Dollar(t) => window.notional >= t.get(),
        }
    }
}

impl std::fmt::Display for SamplingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.method(), self.threshold())
    }
}

/// Parses `"<method>:<frequency>"`, e.g. `"volume:5000"`.
///
/// A bare `"dollar"` uses [`SamplingPolicy::DEFAULT_DOLLAR_THRESHOLD`].
impl FromStr for SamplingPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((method, frequency)) => Self::parse(method.parse()?, frequency),
            None => match s.parse::<SamplingMethod>()? {
                SamplingMethod::Dollar => Ok(Self::default_dollar()),
                method => Err(ConfigError::NonNumericThreshold {
                    method,
                    value: String::new(),
                }),
            },
        }
    }
}
