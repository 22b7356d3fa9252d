//! Physical channel models for underwater links.
//!
//! Each model answers two questions for the simulator: does a single packet
//! survive the medium, and how long does it take to arrive.
//!
//! ## Module Organization
//!
//! - `constants`: Physical constants shared by both media
//! - `error_rate`: BPSK bit error models and packet aggregation
//! - `acoustic`: Stojanovic acoustic model (Thorp absorption, Urick noise)
//! - `optical`: Anguita optical model (Beer-Lambert attenuation, photodiode noise)
//! - `types`: Per-transmission inputs and link reports
//!
//! ## Randomness
//!
//! Channels never own a random generator. The caller passes one into
//! [`Channel::transmit`], which consumes exactly one draw per call so a seeded
//! simulation replays identically.

pub mod acoustic;
pub mod constants;
pub mod error_rate;
pub mod optical;
pub mod types;

pub use acoustic::AcousticChannel;
pub use optical::{OpticalChannel, OpticalParameters};
pub use types::{AcousticTransmission, LinkReport, OpticalTransmission, Transmission};

use log::debug;
use rand::Rng;
use rand::distributions::{Distribution, Standard};

use crate::error::ChannelError;
use constants::EFFECTIVE_DISTANCE_ITERATIONS;

/// A physical medium that packets are sent through.
///
/// Implementations are immutable after construction; every method is a pure
/// function of its arguments apart from the single draw taken by
/// [`Channel::transmit`].
pub trait Channel {
    /// Per-call physical parameters of this medium.
    type Transmission: Transmission;

    /// Time in seconds for a signal to cover `distance` meters.
    fn propagation_time(&self, distance: f64) -> f64;

    /// Linear signal to noise ratio at the receiver.
    fn snr(&self, transmission: &Self::Transmission) -> Result<f64, ChannelError>;

    /// Packet error rate assuming additive white Gaussian noise.
    fn per(&self, transmission: &Self::Transmission) -> Result<f64, ChannelError>;

    /// Packet error rate assuming Rayleigh fading.
    fn per_rayleigh(&self, transmission: &Self::Transmission) -> Result<f64, ChannelError>;

    /// Attempt to deliver one packet.
    ///
    /// Draws a uniform value in `[0, 1)` and reports success when it is not
    /// below the Rayleigh packet error rate. The draw happens before any
    /// computation, so a rejected transmission still advances `rng` by
    /// exactly one value.
    fn transmit<R: Rng + ?Sized>(&self, transmission: &Self::Transmission, rng: &mut R) -> Result<bool, ChannelError> {
        let draw: f64 = Standard.sample(rng);
        let per = self.per_rayleigh(transmission)?;
        let delivered = draw >= per;
        debug!(
            "transmission over {} m, {} bytes: per {:.6}, draw {:.6}, delivered {}",
            transmission.distance(),
            transmission.packet_size(),
            per,
            draw,
            delivered
        );
        Ok(delivered)
    }

    /// Compute every link figure for `transmission` without drawing.
    fn evaluate(&self, transmission: &Self::Transmission) -> Result<LinkReport, ChannelError> {
        let snr = self.snr(transmission)?;
        Ok(LinkReport {
            snr,
            snr_db: error_rate::to_db(snr),
            per_awgn: self.per(transmission)?,
            per_rayleigh: self.per_rayleigh(transmission)?,
            propagation_time: self.propagation_time(transmission.distance()),
        })
    }

    /// Largest distance in `(0, max_distance]` at which the Rayleigh packet
    /// error rate stays at or below `per_threshold`.
    ///
    /// Bisection over the distance of `transmission`; all other parameters
    /// are kept. Returns `None` when no probed distance meets the threshold.
    /// Assumes the error rate does not decrease with distance.
    fn effective_distance(
        &self,
        transmission: &Self::Transmission,
        per_threshold: f64,
        max_distance: f64,
    ) -> Result<Option<f64>, ChannelError> {
        if !(0.0..1.0).contains(&per_threshold) {
            return Err(ChannelError::InvalidPerThreshold(per_threshold));
        }
        if !max_distance.is_finite() || max_distance <= 0.0 {
            return Err(ChannelError::InvalidDistance(max_distance));
        }

        if self.per_rayleigh(&transmission.at_distance(max_distance))? <= per_threshold {
            return Ok(Some(max_distance));
        }

        // Invariant: `high` fails the threshold, `low` meets it (0 stands for "none found")
        let mut low = 0.0;
        let mut high = max_distance;
        for _ in 0..EFFECTIVE_DISTANCE_ITERATIONS {
            let mid = 0.5 * (low + high);
            if mid <= low || mid >= high {
                break;
            }
            if self.per_rayleigh(&transmission.at_distance(mid))? <= per_threshold {
                low = mid;
            } else {
                high = mid;
            }
        }

        Ok((low > 0.0).then_some(low))
    }
}

/// Reject distances the path loss formulas cannot take.
pub(crate) fn check_distance(distance: f64) -> Result<(), ChannelError> {
    if distance.is_finite() && distance > 0.0 {
        Ok(())
    } else {
        Err(ChannelError::InvalidDistance(distance))
    }
}

/// Reject a per-call input that would turn the link figures into NaN or infinity.
pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<(), ChannelError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ChannelError::InvalidTransmission {
            name,
            value,
            reason: "must be finite",
        })
    }
}
