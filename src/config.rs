//! Loading channel parameters from configuration files.
//!
//! A configuration describes the media of one simulated scenario. Either
//! section may be omitted, but not both:
//!
//! ```toml
//! [acoustic]
//! spreading_factor = 1.5
//! shipping_activity = 0.5
//! wind_speed = 0.0
//!
//! [optical]
//! beam_attenuation = 0.1
//! temperature = 300.0
//! sensitivity = 0.5
//! shunt_resistance = 1e7
//! dark_current = 1e-9
//! ambient_current = 1e-9
//! receiver_area = 1e-4
//! transmitter_area = 1e-4
//! bandwidth = 1e7
//! divergence = 0.5
//! ```
//!
//! The same structure is accepted as JSON when the file name ends in `.json`.

use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::channel::{AcousticChannel, OpticalChannel, OpticalParameters};
use crate::error::ConfigError;

/// Acoustic medium parameters as written in a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcousticParameters {
    /// Spreading factor (k): 1.0, 1.5 or 2.0.
    #[serde(alias = "k")]
    pub spreading_factor: f64,
    /// Shipping activity (s) in 0..=1.
    #[serde(alias = "s")]
    pub shipping_activity: f64,
    /// Wind speed (w) in m/s.
    #[serde(alias = "w", default)]
    pub wind_speed: f64,
}

/// Channel parameters for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelConfig {
    #[serde(default)]
    pub acoustic: Option<AcousticParameters>,
    #[serde(default)]
    pub optical: Option<OpticalParameters>,
}

impl ChannelConfig {
    /// Load and validate a configuration file.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("{}", path.display()))
            .map_err(|e| ConfigError::Read(format!("{:#}", e)))?;

        let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json { Self::from_json_str(&data)? } else { Self::from_toml_str(&data)? };

        info!("Loaded channel configuration: {}", path.display());
        Ok(config)
    }

    /// Parse and validate a TOML configuration.
    pub fn from_toml_str(data: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(data).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(data: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(data).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that at least one medium is configured and that every configured
    /// medium builds a valid channel.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.acoustic.is_none() && self.optical.is_none() {
            return Err(ConfigError::Empty);
        }
        if self.acoustic.is_some() {
            self.acoustic_channel()?;
        }
        if self.optical.is_some() {
            self.optical_channel()?;
        }
        Ok(())
    }

    /// Build the acoustic channel described by the `[acoustic]` section.
    pub fn acoustic_channel(&self) -> Result<AcousticChannel, ConfigError> {
        let params = self.acoustic.ok_or(ConfigError::MissingSection("acoustic"))?;
        Ok(AcousticChannel::new(params.spreading_factor, params.shipping_activity, params.wind_speed)?)
    }

    /// Build the optical channel described by the `[optical]` section.
    pub fn optical_channel(&self) -> Result<OpticalChannel, ConfigError> {
        let params = self.optical.ok_or(ConfigError::MissingSection("optical"))?;
        Ok(OpticalChannel::new(params)?)
    }
}
