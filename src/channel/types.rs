//! Per-transmission inputs and evaluation results.

use serde::{Deserialize, Serialize};

use super::constants::DEFAULT_NOISE_BANDWIDTH;

/// Per-call physical parameters shared by every transmission type.
///
/// The effective distance search only needs to move the receiver, so this is
/// all a channel needs to know about its transmission type generically.
pub trait Transmission: Clone {
    /// Transmitter to receiver distance in meters.
    fn distance(&self) -> f64;

    /// Size of the packet in bytes.
    fn packet_size(&self) -> u32;

    /// The same transmission with the receiver moved to `distance`.
    fn at_distance(&self, distance: f64) -> Self;
}

/// One acoustic packet transmission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcousticTransmission {
    /// Carrier frequency in kHz.
    pub frequency: f64,
    /// Source level in dB re 1 µPa.
    pub power: f64,
    /// Distance in meters.
    pub distance: f64,
    /// Packet size in bytes.
    pub packet_size: u32,
    /// Multiplier applied to the ambient noise level.
    #[serde(default = "default_noise_bandwidth")]
    pub noise_bandwidth: f64,
}

fn default_noise_bandwidth() -> f64 {
    DEFAULT_NOISE_BANDWIDTH
}

impl AcousticTransmission {
    pub fn new(frequency: f64, power: f64, distance: f64, packet_size: u32) -> Self {
        Self {
            frequency,
            power,
            distance,
            packet_size,
            noise_bandwidth: DEFAULT_NOISE_BANDWIDTH,
        }
    }

    pub fn with_noise_bandwidth(mut self, noise_bandwidth: f64) -> Self {
        self.noise_bandwidth = noise_bandwidth;
        self
    }
}

impl Transmission for AcousticTransmission {
    fn distance(&self) -> f64 {
        self.distance
    }

    fn packet_size(&self) -> u32 {
        self.packet_size
    }

    fn at_distance(&self, distance: f64) -> Self {
        Self { distance, ..*self }
    }
}

/// One optical packet transmission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpticalTransmission {
    /// Transmitted optical power, in W.
    pub power: f64,
    /// Geometric distance used for beam spreading, in meters.
    pub distance: f64,
    /// Length of the water path that attenuates the beam, in meters.
    pub path_length: f64,
    /// Angle between the receiver normal and the beam, in radians.
    pub inclination: f64,
    /// Packet size in bytes.
    pub packet_size: u32,
}

impl OpticalTransmission {
    pub fn new(power: f64, distance: f64, path_length: f64, inclination: f64, packet_size: u32) -> Self {
        Self {
            power,
            distance,
            path_length,
            inclination,
            packet_size,
        }
    }

    /// Head-on link where the attenuating path equals the geometric distance.
    pub fn aligned(power: f64, distance: f64, packet_size: u32) -> Self {
        Self::new(power, distance, distance, 0.0, packet_size)
    }
}

impl Transmission for OpticalTransmission {
    fn distance(&self) -> f64 {
        self.distance
    }

    fn packet_size(&self) -> u32 {
        self.packet_size
    }

    /// Path length is scaled with the distance so their ratio (e.g. a slanted
    /// path through a layer) is kept.
    fn at_distance(&self, distance: f64) -> Self {
        let path_length = if self.distance > 0.0 {
            self.path_length * distance / self.distance
        } else {
            distance
        };
        Self {
            distance,
            path_length,
            ..*self
        }
    }
}

/// Link figures for a single transmission, for the simulator's logs and statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinkReport {
    /// Linear signal to noise ratio.
    pub snr: f64,
    /// Signal to noise ratio in dB.
    pub snr_db: f64,
    /// Packet error rate assuming additive white Gaussian noise.
    pub per_awgn: f64,
    /// Packet error rate assuming Rayleigh fading. This one decides `transmit`.
    pub per_rayleigh: f64,
    /// Propagation delay in seconds.
    pub propagation_time: f64,
}
