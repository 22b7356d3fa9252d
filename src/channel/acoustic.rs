//! Underwater acoustic channel.
//!
//! Capacity/distance model from Stojanovic, "On the relationship between
//! capacity and distance in an underwater acoustic communication channel"
//! (ACM SIGMOBILE MC2R 11.4, 2007):
//! - Path loss: spreading loss plus Thorp absorption
//! - Ambient noise: turbulence, shipping, wind and thermal sources (Urick)
//! - BPSK bit error rate under AWGN or Rayleigh fading
//!
//! Units:
//! - Distance: meters
//! - Frequency: kHz
//! - Power and noise: dB re 1 µPa
//! - Packet size: bytes

use log::warn;
use serde::Serialize;

use super::constants::{SOUND_SPEED, SPREADING_FACTORS};
use super::error_rate::{ber_awgn, ber_rayleigh, from_db, packet_error_rate};
use super::types::AcousticTransmission;
use super::{Channel, check_distance, check_finite};
use crate::error::ChannelError;

/// Acoustic medium with fixed spreading geometry and surface conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AcousticChannel {
    /// Spreading factor (k): 1.0 cylindrical, 1.5 practical, 2.0 spherical.
    spreading_factor: f64,
    /// Shipping activity (s) between 0 (none) and 1 (heavy).
    shipping_activity: f64,
    /// Wind speed (w) in m/s.
    wind_speed: f64,
}

impl AcousticChannel {
    /// Build a channel, rejecting parameters outside the model's range.
    ///
    /// # Errors
    ///
    /// - `k` not one of 1.0, 1.5, 2.0
    /// - `s` outside `0..=1`
    /// - `w` negative or not finite
    pub fn new(k: f64, s: f64, w: f64) -> Result<Self, ChannelError> {
        let result = Self::validate(k, s, w);
        if let Err(err) = &result {
            warn!("Rejected acoustic channel (k = {}, s = {}, w = {}): {}", k, s, w, err);
        }
        result.map(|()| Self {
            spreading_factor: k,
            shipping_activity: s,
            wind_speed: w,
        })
    }

    fn validate(k: f64, s: f64, w: f64) -> Result<(), ChannelError> {
        if !SPREADING_FACTORS.contains(&k) {
            return Err(ChannelError::InvalidSpreadingFactor(k));
        }
        if !(0.0..=1.0).contains(&s) {
            return Err(ChannelError::InvalidShippingActivity(s));
        }
        if !w.is_finite() || w < 0.0 {
            return Err(ChannelError::InvalidWindSpeed(w));
        }
        Ok(())
    }

    pub fn spreading_factor(&self) -> f64 {
        self.spreading_factor
    }

    pub fn shipping_activity(&self) -> f64 {
        self.shipping_activity
    }

    pub fn wind_speed(&self) -> f64 {
        self.wind_speed
    }

    /// Transmission loss in dB over `distance` meters at `frequency` kHz.
    ///
    /// ```text
    /// TL = 10 × k × log₁₀(d) + d × a(f)
    /// ```
    ///
    /// where `a(f)` is [`AcousticChannel::thorp`].
    pub fn path_loss(&self, distance: f64, frequency: f64) -> Result<f64, ChannelError> {
        check_distance(distance)?;
        check_frequency(frequency)?;
        Ok(10.0 * self.spreading_factor * distance.log10() + distance * Self::thorp(frequency))
    }

    /// Thorp's absorption coefficient in dB/m for `frequency` in kHz.
    ///
    /// Empirical curve fit, kept with its published constants. The two
    /// branches meet at `f² = 0.4` with a step of about 1e-6 dB/m.
    pub fn thorp(frequency: f64) -> f64 {
        let f = frequency * frequency;
        let atten = if f > 0.4 {
            0.11 * f / (1.0 + f) + 44.0 * (f / (4100.0 + frequency)) + 2.75e-4 * f + 0.003
        } else {
            0.002 + 0.11 * (f / (1.0 + f)) + 0.011 * f
        };
        // dB/km -> dB/m
        atten / 1000.0
    }

    /// Ambient noise level in dB re 1 µPa at `frequency` kHz.
    ///
    /// Sum of the linear powers of four sources:
    ///
    /// ```text
    /// turbulence = 17 − 30 log₁₀ f
    /// shipping   = 40 + 20 (s − 0.5) + 26 log₁₀ f − 60 log₁₀(f + 0.03)
    /// wind       = 50 + 7.5 √w + 20 log₁₀ f − 40 log₁₀(f + 0.4)
    /// thermal    = −15 + 20 log₁₀ f
    /// ```
    pub fn noise(&self, frequency: f64) -> Result<f64, ChannelError> {
        check_frequency(frequency)?;
        let log_f = frequency.log10();

        let turbulence = 17.0 - 30.0 * log_f;
        let shipping = 40.0 + 20.0 * (self.shipping_activity - 0.5) + 26.0 * log_f - 60.0 * (frequency + 0.03).log10();
        let wind = 50.0 + 7.5 * self.wind_speed.sqrt() + 20.0 * log_f - 40.0 * (frequency + 0.4).log10();
        let thermal = 20.0 * log_f - 15.0;

        let total = from_db(turbulence) + from_db(shipping) + from_db(wind) + from_db(thermal);
        Ok(10.0 * total.log10())
    }

    /// Signal to noise ratio in dB: `Pt − TL − bw × N(f)`.
    pub fn snr_db(&self, transmission: &AcousticTransmission) -> Result<f64, ChannelError> {
        check_finite("power", transmission.power)?;
        if !(transmission.noise_bandwidth >= 0.0) {
            return Err(ChannelError::InvalidTransmission {
                name: "noise_bandwidth",
                value: transmission.noise_bandwidth,
                reason: "must be non-negative",
            });
        }
        check_finite("noise_bandwidth", transmission.noise_bandwidth)?;
        let path_loss = self.path_loss(transmission.distance, transmission.frequency)?;
        let noise = transmission.noise_bandwidth * self.noise(transmission.frequency)?;
        Ok(transmission.power - path_loss - noise)
    }
}

/// Frequencies enter `log10` in the noise model and `4100 + f` in Thorp's fit.
fn check_frequency(frequency: f64) -> Result<(), ChannelError> {
    if frequency.is_finite() && frequency > 0.0 {
        Ok(())
    } else {
        Err(ChannelError::InvalidFrequency(frequency))
    }
}

impl Channel for AcousticChannel {
    type Transmission = AcousticTransmission;

    fn propagation_time(&self, distance: f64) -> f64 {
        distance / SOUND_SPEED
    }

    fn snr(&self, transmission: &AcousticTransmission) -> Result<f64, ChannelError> {
        self.snr_db(transmission).map(from_db)
    }

    fn per(&self, transmission: &AcousticTransmission) -> Result<f64, ChannelError> {
        let snr = self.snr(transmission)?;
        Ok(packet_error_rate(ber_awgn(snr), transmission.packet_size))
    }

    fn per_rayleigh(&self, transmission: &AcousticTransmission) -> Result<f64, ChannelError> {
        let snr = self.snr(transmission)?;
        Ok(packet_error_rate(ber_rayleigh(snr), transmission.packet_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Transmission;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;
    use rand::{RngCore, SeedableRng};

    fn channel() -> AcousticChannel {
        AcousticChannel::new(2.0, 0.5, 0.0).unwrap()
    }

    #[test]
    fn accepts_every_valid_configuration() {
        for k in SPREADING_FACTORS {
            for s in [0.0, 0.25, 0.5, 1.0] {
                for w in [0.0, 3.5, 20.0] {
                    let ch = AcousticChannel::new(k, s, w).unwrap();
                    assert_eq!(ch.spreading_factor(), k);
                    assert_eq!(ch.shipping_activity(), s);
                    assert_eq!(ch.wind_speed(), w);
                }
            }
        }
    }

    #[test]
    fn rejects_invalid_configuration() {
        assert_eq!(AcousticChannel::new(1.2, 0.5, 0.0), Err(ChannelError::InvalidSpreadingFactor(1.2)));
        assert_eq!(AcousticChannel::new(3.0, 0.5, 0.0), Err(ChannelError::InvalidSpreadingFactor(3.0)));
        assert_eq!(AcousticChannel::new(1.5, -0.1, 0.0), Err(ChannelError::InvalidShippingActivity(-0.1)));
        assert_eq!(AcousticChannel::new(1.5, 1.1, 0.0), Err(ChannelError::InvalidShippingActivity(1.1)));
        assert_eq!(AcousticChannel::new(1.5, 0.5, -1.0), Err(ChannelError::InvalidWindSpeed(-1.0)));
        assert!(AcousticChannel::new(f64::NAN, 0.5, 0.0).is_err());
        assert!(AcousticChannel::new(1.5, f64::NAN, 0.0).is_err());
        assert!(AcousticChannel::new(1.5, 0.5, f64::INFINITY).is_err());
    }

    #[test]
    fn thorp_matches_reference_values() {
        // High branch at 10 kHz: 1.209970501794705 dB/km
        assert!((AcousticChannel::thorp(10.0) - 1.209970501794705e-3).abs() < 1e-15);
        // Low branch at 0.5 kHz: f² = 0.25
        let expected = (0.002 + 0.11 * (0.25 / 1.25) + 0.011 * 0.25) / 1000.0;
        assert_eq!(AcousticChannel::thorp(0.5), expected);
    }

    #[test]
    fn thorp_branches_meet_at_boundary() {
        let boundary = 0.4f64.sqrt();
        let above = AcousticChannel::thorp(boundary * (1.0 + 1e-12));
        let below = AcousticChannel::thorp(boundary * (1.0 - 1e-12));
        // The fitted branches leave a ~1.002e-6 dB/m step
        assert!((above - below).abs() < 2e-6);
    }

    #[test]
    fn path_loss_reference_scenario() {
        let pl = channel().path_loss(1000.0, 10.0).unwrap();
        let expected = 10.0 * 2.0 * 1000f64.log10() + 1000.0 * AcousticChannel::thorp(10.0);
        assert_eq!(pl, expected);
        assert!((pl - 61.20997050179471).abs() < 1e-9);
    }

    #[test]
    fn path_loss_rejects_non_positive_distance() {
        assert_eq!(channel().path_loss(0.0, 10.0), Err(ChannelError::InvalidDistance(0.0)));
        assert_eq!(channel().path_loss(-5.0, 10.0), Err(ChannelError::InvalidDistance(-5.0)));
        assert!(channel().path_loss(f64::NAN, 10.0).is_err());
    }

    #[test]
    fn noise_reference_value() {
        let n = channel().noise(10.0).unwrap();
        assert!((n - 29.354703574234854).abs() < 1e-9);
    }

    #[test]
    fn noise_rises_with_wind_and_shipping() {
        let calm = AcousticChannel::new(1.5, 0.0, 0.0).unwrap();
        let busy = AcousticChannel::new(1.5, 1.0, 0.0).unwrap();
        let windy = AcousticChannel::new(1.5, 0.0, 15.0).unwrap();
        let f = 1.0;
        assert!(busy.noise(f).unwrap() > calm.noise(f).unwrap());
        assert!(windy.noise(f).unwrap() > calm.noise(f).unwrap());
    }

    #[test]
    fn noise_rejects_non_positive_frequency() {
        assert_eq!(channel().noise(0.0), Err(ChannelError::InvalidFrequency(0.0)));
        let tx = AcousticTransmission::new(-1.0, 180.0, 1000.0, 32);
        assert_eq!(channel().per_rayleigh(&tx), Err(ChannelError::InvalidFrequency(-1.0)));
    }

    #[test]
    fn path_loss_rejects_invalid_frequency() {
        let ch = channel();
        assert!(matches!(ch.path_loss(1000.0, f64::NAN), Err(ChannelError::InvalidFrequency(_))));
        assert_eq!(ch.path_loss(1000.0, -4100.0), Err(ChannelError::InvalidFrequency(-4100.0)));
        assert_eq!(ch.path_loss(1000.0, 0.0), Err(ChannelError::InvalidFrequency(0.0)));
    }

    #[test]
    fn non_finite_inputs_are_rejected_not_propagated() {
        let ch = channel();
        let nan_power = AcousticTransmission::new(10.0, f64::NAN, 1000.0, 32);
        assert!(matches!(
            ch.per_rayleigh(&nan_power),
            Err(ChannelError::InvalidTransmission { name: "power", .. })
        ));
        let inf_power = AcousticTransmission::new(10.0, f64::INFINITY, 1000.0, 32);
        assert!(matches!(ch.per(&inf_power), Err(ChannelError::InvalidTransmission { name: "power", .. })));

        let nan_bandwidth = AcousticTransmission::new(10.0, 180.0, 1000.0, 32).with_noise_bandwidth(f64::NAN);
        assert!(matches!(
            ch.per(&nan_bandwidth),
            Err(ChannelError::InvalidTransmission { name: "noise_bandwidth", .. })
        ));
        let negative_bandwidth = AcousticTransmission::new(10.0, 180.0, 1000.0, 32).with_noise_bandwidth(-1.0);
        assert!(ch.snr(&negative_bandwidth).is_err());

        // A bad input surfaces as an error, never as a silent loss
        let mut rng = StepRng::new(u64::MAX, 0);
        assert!(ch.transmit(&nan_power, &mut rng).is_err());
    }

    #[test]
    fn snr_is_linear_form_of_snr_db() {
        let ch = channel();
        let tx = AcousticTransmission::new(10.0, 180.0, 1000.0, 32);
        let snr_db = ch.snr_db(&tx).unwrap();
        let expected = 180.0 - 61.20997050179471 - 2.35 * 29.354703574234854;
        assert!((snr_db - expected).abs() < 1e-9);
        assert!((ch.snr(&tx).unwrap() - 10f64.powf(snr_db / 10.0)).abs() / ch.snr(&tx).unwrap() < 1e-12);
    }

    #[test]
    fn per_reference_values() {
        let ch = channel();
        let tx = AcousticTransmission::new(10.0, 150.0, 1000.0, 32);
        assert!((ch.per_rayleigh(&tx).unwrap() - 0.4856359966561129).abs() < 1e-9);
        let tx = AcousticTransmission::new(10.0, 180.0, 1000.0, 32);
        assert!((ch.per_rayleigh(&tx).unwrap() - 6.689354750272214e-4).abs() < 1e-9);
        // SNR ≈ 9.6e4: erfc(√SNR) underflows to zero
        assert_eq!(ch.per(&tx).unwrap(), 0.0);
    }

    #[test]
    fn per_stays_within_unit_interval() {
        let ch = AcousticChannel::new(1.5, 0.7, 8.0).unwrap();
        for power in [-50.0, 0.0, 100.0, 150.0, 200.0, 300.0] {
            for distance in [1.0, 50.0, 1000.0, 20_000.0] {
                for size in [0, 1, 64, 4096] {
                    let tx = AcousticTransmission::new(12.0, power, distance, size);
                    let per = ch.per(&tx).unwrap();
                    let per_rf = ch.per_rayleigh(&tx).unwrap();
                    assert!((0.0..=1.0).contains(&per), "per {per} out of range");
                    assert!((0.0..=1.0).contains(&per_rf), "per_rayleigh {per_rf} out of range");
                }
            }
        }
    }

    #[test]
    fn per_grows_with_distance() {
        let ch = channel();
        let mut last_awgn = 0.0;
        let mut last_rf = 0.0;
        for distance in [100.0, 500.0, 1000.0, 2000.0, 3000.0, 5000.0, 10_000.0] {
            let tx = AcousticTransmission::new(10.0, 160.0, distance, 32);
            let awgn = ch.per(&tx).unwrap();
            let rf = ch.per_rayleigh(&tx).unwrap();
            assert!(awgn >= last_awgn);
            assert!(rf >= last_rf);
            last_awgn = awgn;
            last_rf = rf;
        }
        assert!(last_rf > 0.99);
    }

    #[test]
    fn per_grows_with_packet_size() {
        let ch = channel();
        let mut last = 0.0;
        for size in [1, 8, 32, 128, 1024] {
            let per = ch.per_rayleigh(&AcousticTransmission::new(10.0, 170.0, 1500.0, size)).unwrap();
            assert!(per >= last);
            last = per;
        }
    }

    #[test]
    fn empty_packet_always_survives() {
        let ch = channel();
        let tx = AcousticTransmission::new(10.0, 0.0, 10_000.0, 0);
        assert_eq!(ch.per(&tx).unwrap(), 0.0);
        assert_eq!(ch.per_rayleigh(&tx).unwrap(), 0.0);
        assert!(ch.transmit(&tx, &mut StepRng::new(0, 0)).unwrap());
    }

    #[test]
    fn propagation_time_uses_sound_speed() {
        let ch = channel();
        assert_eq!(ch.propagation_time(1500.0), 1.0);
        assert_eq!(ch.propagation_time(3000.0), 3000.0 / 1500.0);
        assert_eq!(ch.propagation_time(0.0), 0.0);
    }

    #[test]
    fn transmit_compares_draw_against_per() {
        let ch = channel();
        // per_rayleigh ≈ 0.4856
        let tx = AcousticTransmission::new(10.0, 150.0, 1000.0, 32);
        // Draw 0.0: lost
        assert!(!ch.transmit(&tx, &mut StepRng::new(0, 0)).unwrap());
        // Draw 0.5: delivered
        assert!(ch.transmit(&tx, &mut StepRng::new(1 << 63, 0)).unwrap());
        // Draw just below 1.0: delivered
        assert!(ch.transmit(&tx, &mut StepRng::new(u64::MAX, 0)).unwrap());
    }

    #[test]
    fn transmit_consumes_exactly_one_draw() {
        let ch = channel();
        let mut rng = StepRng::new(0, 1);
        ch.transmit(&AcousticTransmission::new(10.0, 150.0, 1000.0, 32), &mut rng).unwrap();
        assert_eq!(rng.next_u64(), 1);

        // A rejected transmission still advances the stream by one
        let mut rng = StepRng::new(0, 1);
        let bad = AcousticTransmission::new(10.0, 150.0, 0.0, 32);
        assert!(ch.transmit(&bad, &mut rng).is_err());
        assert_eq!(rng.next_u64(), 1);
    }

    #[test]
    fn transmit_is_reproducible_with_same_seed() {
        let ch = channel();
        let tx = AcousticTransmission::new(10.0, 150.0, 1000.0, 32);
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..200).map(|_| ch.transmit(&tx, &mut rng).unwrap()).collect::<Vec<_>>()
        };
        let first = run(42);
        assert_eq!(first, run(42));
        assert!(first.iter().any(|ok| *ok));
        assert!(first.iter().any(|ok| !*ok));
    }

    #[test]
    fn effective_distance_meets_threshold() {
        let ch = channel();
        let tx = AcousticTransmission::new(10.0, 180.0, 1.0, 32);
        let d = ch.effective_distance(&tx, 0.01, 100_000.0).unwrap().unwrap();
        assert!(ch.per_rayleigh(&tx.at_distance(d)).unwrap() <= 0.01);
        assert!(ch.per_rayleigh(&tx.at_distance(d * 1.01)).unwrap() > 0.01);
        assert!(d > 1000.0);
    }

    #[test]
    fn effective_distance_edge_cases() {
        let ch = channel();
        // Strong enough to cover the whole range
        let loud = AcousticTransmission::new(10.0, 400.0, 1.0, 32);
        assert_eq!(ch.effective_distance(&loud, 0.01, 500.0).unwrap(), Some(500.0));
        // Too weak to reach anywhere
        let faint = AcousticTransmission::new(10.0, -1000.0, 1.0, 32);
        assert_eq!(ch.effective_distance(&faint, 0.01, 100_000.0).unwrap(), None);
        assert_eq!(ch.effective_distance(&loud, 1.0, 500.0), Err(ChannelError::InvalidPerThreshold(1.0)));
        assert_eq!(ch.effective_distance(&loud, 0.1, 0.0), Err(ChannelError::InvalidDistance(0.0)));
    }

    #[test]
    fn evaluate_reports_all_figures() {
        let ch = channel();
        let tx = AcousticTransmission::new(10.0, 150.0, 1500.0, 32);
        let report = ch.evaluate(&tx).unwrap();
        assert_eq!(report.per_rayleigh, ch.per_rayleigh(&tx).unwrap());
        assert_eq!(report.per_awgn, ch.per(&tx).unwrap());
        assert_eq!(report.propagation_time, 1.0);
        assert!((report.snr_db - ch.snr_db(&tx).unwrap()).abs() < 1e-9);
    }
}
