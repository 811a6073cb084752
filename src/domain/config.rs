//! Simulation knobs. Every field has a default, so a JSON document only has to
//! name the values it overrides.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::errors::{ConfigResult, ConfigurationError};

pub const DEFAULT_WINDOW_CAPACITY: usize = 80;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 800;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Samples kept in the sliding window.
    pub window_capacity: usize,
    pub tick_interval_ms: u64,
    /// Half-width of the uniform seed band, as a fraction of the base price.
    pub seed_variance: f64,
    /// Half-width of the per-tick step, as a fraction of the base price.
    /// Also the distance a clamped sample is pushed back inside the band.
    pub per_tick_volatility: f64,
    pub band_low: f64,
    pub band_high: f64,
    /// Chance that a flatline tick stays at exactly zero.
    pub flatline_quiet_probability: f64,
    pub flicker_magnitude: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed_variance: 0.02,
            per_tick_volatility: 0.005,
            band_low: 0.8,
            band_high: 1.2,
            flatline_quiet_probability: 0.95,
            flicker_magnitude: 0.01,
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a JSON override document.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.window_capacity == 0 {
            return Err(ConfigurationError::invalid("window_capacity", "must be at least 1").into());
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigurationError::invalid("tick_interval_ms", "must be positive").into());
        }

        let fractions = [
            ("seed_variance", self.seed_variance),
            ("per_tick_volatility", self.per_tick_volatility),
            ("band_low", self.band_low),
            ("band_high", self.band_high),
            ("flicker_magnitude", self.flicker_magnitude),
        ];
        for (name, value) in fractions {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigurationError::invalid(
                    name,
                    format!("must be finite and non-negative, got {}", value),
                )
                .into());
            }
        }

        if self.band_low >= self.band_high {
            return Err(ConfigurationError::invalid(
                "band_low",
                format!("must be below band_high ({} >= {})", self.band_low, self.band_high),
            )
            .into());
        }
        // A reset must land inside the band, otherwise the walk escapes it.
        if self.per_tick_volatility > self.band_high - self.band_low {
            return Err(ConfigurationError::invalid(
                "per_tick_volatility",
                "must not exceed the width of the clamp band",
            )
            .into());
        }
        if 1.0 - self.seed_variance < self.band_low || 1.0 + self.seed_variance > self.band_high {
            return Err(ConfigurationError::invalid(
                "seed_variance",
                format!(
                    "seed band 1 ± {} must fit inside [{}, {}]",
                    self.seed_variance, self.band_low, self.band_high
                ),
            )
            .into());
        }
        if !(0.0..=1.0).contains(&self.flatline_quiet_probability) {
            return Err(ConfigurationError::invalid(
                "flatline_quiet_probability",
                format!("must lie in [0, 1], got {}", self.flatline_quiet_probability),
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::AppError;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_interval(), Duration::from_millis(800));
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = SimulationConfig::from_json(r#"{"window_capacity": 40}"#).unwrap();
        assert_eq!(config.window_capacity, 40);
        assert_eq!(config.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
        assert_eq!(config.band_high, 1.2);
    }

    #[test]
    fn rejects_inverted_band() {
        let err = SimulationConfig::from_json(r#"{"band_low": 1.3}"#).unwrap_err();
        assert!(matches!(
            err,
            AppError::Configuration(ConfigurationError::InvalidParameter { name: "band_low", .. })
        ));
    }

    #[test]
    fn rejects_seed_band_wider_than_clamp_band() {
        let err = SimulationConfig::from_json(r#"{"seed_variance": 0.25}"#).unwrap_err();
        assert!(matches!(
            err,
            AppError::Configuration(ConfigurationError::InvalidParameter { name: "seed_variance", .. })
        ));
        assert!(SimulationConfig::from_json(r#"{"seed_variance": 0.15}"#).is_ok());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SimulationConfig::from_json("{window_capacity").unwrap_err();
        assert!(matches!(err, AppError::Configuration(ConfigurationError::Parse(_))));
    }
}
