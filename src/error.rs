//! Error types for channel construction, per-call evaluation and configuration loading.

/// Rejected channel parameters or transmission inputs.
///
/// Formula domain errors (a `log10` of a non-positive distance, for example)
/// are reported here instead of leaking NaN or infinities into the simulator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChannelError {
    #[error("spreading factor {0} is not one of 1.0, 1.5 or 2.0")]
    InvalidSpreadingFactor(f64),

    #[error("shipping activity {0} outside 0..=1")]
    InvalidShippingActivity(f64),

    #[error("wind speed {0} m/s must be non-negative")]
    InvalidWindSpeed(f64),

    #[error("invalid {name} = {value}: {reason}")]
    InvalidParameter { name: &'static str, value: f64, reason: &'static str },

    #[error("invalid transmission {name} = {value}: {reason}")]
    InvalidTransmission { name: &'static str, value: f64, reason: &'static str },

    #[error("distance {0} m must be positive and finite")]
    InvalidDistance(f64),

    #[error("frequency {0} kHz must be positive and finite")]
    InvalidFrequency(f64),

    #[error("packet error threshold {0} outside 0..1")]
    InvalidPerThreshold(f64),
}

/// Failure while loading a channel configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read file: {0}")]
    Read(String),

    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("configuration defines neither [acoustic] nor [optical]")]
    Empty,

    #[error("configuration has no [{0}] section")]
    MissingSection(&'static str),

    #[error("invalid channel configuration: {0}")]
    Invalid(#[from] ChannelError),
}
