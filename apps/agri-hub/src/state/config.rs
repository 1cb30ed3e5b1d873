//! # Configuration State
//!
//! Stores marketplace configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`AGRI_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use agri_core::{Currency, DistanceKm};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid configuration value.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} has invalid value '{value}': {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Marketplace configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Shown in the header and the demo output
    pub marketplace_name: String,

    pub currency: Currency,

    /// Distance used when the buyer hasn't moved the slider
    pub default_distance_km: f64,

    /// Delivery distance slider lower bound (km)
    pub min_distance_km: f64,

    /// Delivery distance slider upper bound (km)
    pub max_distance_km: f64,

    /// Load the demo dataset on start
    pub seed_on_start: bool,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Marketplace: "AgriConnect Hub"
    /// - Currency: INR (₹)
    /// - Distance: 10 km, slider 1..=30 km
    /// - Seed data: on
    fn default() -> Self {
        ConfigState {
            marketplace_name: "AgriConnect Hub".to_string(),
            currency: Currency::Inr,
            default_distance_km: 10.0,
            min_distance_km: 1.0,
            max_distance_km: 30.0,
            seed_on_start: true,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `AGRI_MARKETPLACE_NAME`: Override the marketplace name
    /// - `AGRI_CURRENCY`: Currency code (only "INR" is supported)
    /// - `AGRI_DEFAULT_DISTANCE_KM`: Default delivery distance
    /// - `AGRI_MIN_DISTANCE_KM` / `AGRI_MAX_DISTANCE_KM`: Slider bounds
    /// - `AGRI_SEED`: "true"/"false" (also 1/0, yes/no)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(name) = lookup("AGRI_MARKETPLACE_NAME") {
            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::invalid("AGRI_MARKETPLACE_NAME", name, "must not be empty"));
            }
            config.marketplace_name = name.to_string();
        }

        if let Some(code) = lookup("AGRI_CURRENCY") {
            if !code.trim().eq_ignore_ascii_case(Currency::Inr.code()) {
                return Err(ConfigError::invalid("AGRI_CURRENCY", code, "only INR is supported"));
            }
        }

        if let Some(raw) = lookup("AGRI_DEFAULT_DISTANCE_KM") {
            config.default_distance_km = parse_km("AGRI_DEFAULT_DISTANCE_KM", &raw)?;
        }
        if let Some(raw) = lookup("AGRI_MIN_DISTANCE_KM") {
            config.min_distance_km = parse_km("AGRI_MIN_DISTANCE_KM", &raw)?;
        }
        if let Some(raw) = lookup("AGRI_MAX_DISTANCE_KM") {
            config.max_distance_km = parse_km("AGRI_MAX_DISTANCE_KM", &raw)?;
        }

        if let Some(raw) = lookup("AGRI_SEED") {
            config.seed_on_start = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(ConfigError::invalid("AGRI_SEED", raw, "expected true or false")),
            };
        }

        config.check_bounds()?;
        Ok(config)
    }

    fn check_bounds(&self) -> Result<(), ConfigError> {
        if self.min_distance_km > self.max_distance_km {
            return Err(ConfigError::invalid(
                "AGRI_MIN_DISTANCE_KM",
                self.min_distance_km.to_string(),
                format!("must not exceed the maximum ({} km)", self.max_distance_km),
            ));
        }
        if !(self.min_distance_km..=self.max_distance_km).contains(&self.default_distance_km) {
            return Err(ConfigError::invalid(
                "AGRI_DEFAULT_DISTANCE_KM",
                self.default_distance_km.to_string(),
                format!(
                    "must lie within {}..={} km",
                    self.min_distance_km, self.max_distance_km
                ),
            ));
        }
        Ok(())
    }

    /// Resolves the distance a request should be priced at.
    ///
    /// `None` means the default. A negative or non-finite distance is
    /// rejected the same way the pricing engine rejects it; anything else is
    /// clamped into the slider range.
    pub fn resolve_distance(&self, requested: Option<f64>) -> agri_core::ValidationResult<f64> {
        let Some(km) = requested else {
            return Ok(self.default_distance_km);
        };
        let km = DistanceKm::new(km)?.km();
        Ok(km.clamp(self.min_distance_km, self.max_distance_km))
    }
}

fn parse_km(key: &str, raw: &str) -> Result<f64, ConfigError> {
    let km: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(key, raw, "not a number"))?;
    DistanceKm::new(km)
        .map(|d| d.km())
        .map_err(|e| ConfigError::invalid(key, raw, e.to_string()))
}
