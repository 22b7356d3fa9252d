//! Underwater optical wireless channel.
//!
//! Model from Anguita et al., "Optical wireless underwater communication for
//! AUV: Preliminary simulation and experimental results" (OCEANS 2011):
//! - Beer-Lambert attenuation along the water path
//! - Geometric spreading of a beam with divergence half-angle θ
//! - Photodiode shot noise (dark and background current) and thermal noise
//! - BPSK bit error rate under AWGN or Rayleigh fading

use std::f64::consts::{FRAC_PI_2, PI};

use log::warn;
use serde::{Deserialize, Serialize};

use super::constants::{BOLTZMANN, ELECTRON_CHARGE, LIGHT_SPEED};
use super::error_rate::{ber_awgn, ber_rayleigh, packet_error_rate, to_db};
use super::types::OpticalTransmission;
use super::{Channel, check_distance, check_finite};
use crate::error::ChannelError;

/// Physical constants of an optical link: water, receiver photodiode and emitter.
///
/// Every field is required; the channel is built once from a complete record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpticalParameters {
    /// Beam attenuation coefficient (c), in 1/m.
    #[serde(alias = "c")]
    pub beam_attenuation: f64,
    /// Receiver temperature (T), in K.
    #[serde(alias = "T")]
    pub temperature: f64,
    /// Photodiode sensitivity (S), in A/W.
    #[serde(alias = "S")]
    pub sensitivity: f64,
    /// Photodiode shunt resistance (R), in ohms.
    #[serde(alias = "R")]
    pub shunt_resistance: f64,
    /// Photodiode dark current (Id), in A.
    #[serde(alias = "Id")]
    pub dark_current: f64,
    /// Photocurrent generated by ambient light (Il), in A.
    #[serde(alias = "Il")]
    pub ambient_current: f64,
    /// Receiver aperture area (Ar), in m².
    #[serde(alias = "Ar")]
    pub receiver_area: f64,
    /// Transmitter aperture area (At), in m².
    #[serde(alias = "At")]
    pub transmitter_area: f64,
    /// System bandwidth (bw), in Hz.
    #[serde(alias = "bw")]
    pub bandwidth: f64,
    /// Beam divergence half-angle (θ), in radians.
    #[serde(alias = "theta")]
    pub divergence: f64,
}

impl OpticalParameters {
    fn validate(&self) -> Result<(), ChannelError> {
        let non_negative = [
            ("beam_attenuation", self.beam_attenuation),
            ("sensitivity", self.sensitivity),
            ("dark_current", self.dark_current),
            ("ambient_current", self.ambient_current),
            ("receiver_area", self.receiver_area),
            ("transmitter_area", self.transmitter_area),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ChannelError::InvalidParameter {
                    name,
                    value,
                    reason: "must be finite and non-negative",
                });
            }
        }

        // Keeps the thermal noise floor strictly positive
        let positive = [
            ("temperature", self.temperature),
            ("shunt_resistance", self.shunt_resistance),
            ("bandwidth", self.bandwidth),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChannelError::InvalidParameter {
                    name,
                    value,
                    reason: "must be finite and positive",
                });
            }
        }

        if !(self.divergence > 0.0 && self.divergence <= PI) {
            return Err(ChannelError::InvalidParameter {
                name: "divergence",
                value: self.divergence,
                reason: "must be in (0, π]",
            });
        }

        Ok(())
    }
}

/// Optical medium with a fixed emitter/receiver pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OpticalChannel {
    params: OpticalParameters,
}

impl OpticalChannel {
    /// Build a channel from a complete parameter record.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::InvalidParameter`] for non-finite values,
    /// negative physical quantities, a non-positive temperature, shunt
    /// resistance or bandwidth, or a divergence outside `(0, π]`.
    pub fn new(params: OpticalParameters) -> Result<Self, ChannelError> {
        if let Err(err) = params.validate() {
            warn!("Rejected optical channel: {}", err);
            return Err(err);
        }
        Ok(Self { params })
    }

    pub fn parameters(&self) -> &OpticalParameters {
        &self.params
    }

    /// Optical power reaching the photodiode, in W.
    ///
    /// ```text
    /// p = 2 P Ar cos β / (π d² (1 − cos θ) + 2 At) × e^(−c l)
    /// ```
    ///
    /// `d` is the geometric distance and `l` the attenuating path length.
    /// The inclination β must lie within `[−π/2, π/2]`: beyond that the
    /// receiver faces away from the emitter and `cos β` turns negative.
    pub fn received_power(&self, transmission: &OpticalTransmission) -> Result<f64, ChannelError> {
        check_distance(transmission.distance)?;
        if !transmission.path_length.is_finite() || transmission.path_length < 0.0 {
            return Err(ChannelError::InvalidDistance(transmission.path_length));
        }
        check_finite("power", transmission.power)?;
        if !(transmission.inclination.abs() <= FRAC_PI_2) {
            return Err(ChannelError::InvalidTransmission {
                name: "inclination",
                value: transmission.inclination,
                reason: "must be within ±π/2",
            });
        }

        let p = &self.params;
        let spread = PI * transmission.distance.powi(2) * (1.0 - p.divergence.cos()) + 2.0 * p.transmitter_area;
        let captured = 2.0 * transmission.power * p.receiver_area * transmission.inclination.cos() / spread;
        let received = captured * (-p.beam_attenuation * transmission.path_length).exp();
        if !received.is_finite() {
            return Err(ChannelError::InvalidTransmission {
                name: "power",
                value: transmission.power,
                reason: "received power overflows",
            });
        }
        Ok(received)
    }

    /// Thermal (Johnson) noise of the shunt resistance, in A².
    pub fn thermal_noise(&self) -> f64 {
        4.0 * BOLTZMANN * self.params.temperature * self.params.bandwidth / self.params.shunt_resistance
    }

    /// Shot noise of the dark and ambient-light currents, in A².
    pub fn current_noise(&self) -> f64 {
        2.0 * ELECTRON_CHARGE * (self.params.dark_current + self.params.ambient_current) * self.params.bandwidth
    }

    /// Signal to noise ratio in dB.
    pub fn snr_db(&self, transmission: &OpticalTransmission) -> Result<f64, ChannelError> {
        self.snr(transmission).map(to_db)
    }
}

impl Channel for OpticalChannel {
    type Transmission = OpticalTransmission;

    fn propagation_time(&self, distance: f64) -> f64 {
        distance / LIGHT_SPEED
    }

    /// `(S p)² / (shot + thermal)`
    fn snr(&self, transmission: &OpticalTransmission) -> Result<f64, ChannelError> {
        let photocurrent = self.params.sensitivity * self.received_power(transmission)?;
        Ok(photocurrent.powi(2) / (self.current_noise() + self.thermal_noise()))
    }

    fn per(&self, transmission: &OpticalTransmission) -> Result<f64, ChannelError> {
        let snr = self.snr(transmission)?;
        Ok(packet_error_rate(ber_awgn(snr), transmission.packet_size))
    }

    fn per_rayleigh(&self, transmission: &OpticalTransmission) -> Result<f64, ChannelError> {
        let snr = self.snr(transmission)?;
        Ok(packet_error_rate(ber_rayleigh(snr), transmission.packet_size))
    }
}
