//! Estimator configuration.
//!
//! Both knobs are fixed when a controller is constructed and are carried over
//! unchanged when it is forked.

use std::fmt;
use std::str::FromStr;

use crate::error::StrandCcError;

/// When the bandwidth estimate is recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingMode {
    /// Recompute on every accepted acknowledgment (Westwood).
    #[default]
    Immediate,
    /// Recompute once per RTT through a one-shot timer (Westwood+).
    Delayed,
}

impl fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingMode::Immediate => write!(f, "Westwood"),
            SamplingMode::Delayed => write!(f, "WestwoodPlus"),
        }
    }
}

impl FromStr for SamplingMode {
    type Err = StrandCcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Westwood" => Ok(SamplingMode::Immediate),
            "WestwoodPlus" => Ok(SamplingMode::Delayed),
            other => Err(StrandCcError::UnknownProtocolType(other.to_string())),
        }
    }
}

/// Filter applied to raw bandwidth samples before they are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Publish raw samples as-is.
    None,
    /// Tustin (bilinear) low-pass approximation.
    #[default]
    Smoothed,
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::None => write!(f, "None"),
            FilterMode::Smoothed => write!(f, "Tustin"),
        }
    }
}

impl FromStr for FilterMode {
    type Err = StrandCcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(FilterMode::None),
            "Tustin" => Ok(FilterMode::Smoothed),
            other => Err(StrandCcError::UnknownFilterType(other.to_string())),
        }
    }
}

/// Configuration for a [`Westwood`](crate::Westwood) controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WestwoodConfig {
    /// Sampling discipline.
    pub sampling: SamplingMode,
    /// Smoothing filter.
    pub filter: FilterMode,
}

impl WestwoodConfig {
    /// Use `sampling` as the sampling discipline.
    pub fn with_sampling(mut self, sampling: SamplingMode) -> Self {
        self.sampling = sampling;
        self
    }

    /// Use `filter` as the smoothing filter.
    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }
}
