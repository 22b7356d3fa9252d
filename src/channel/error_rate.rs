//! BPSK bit error models and packet aggregation.
//!
//! Both channel types share these helpers:
//! - AWGN: `BER = 0.5 × erfc(√SNR)`
//! - Rayleigh fading: `BER = 0.5 × (1 − √(SNR / (1 + SNR)))`
//! - Packet: `PER = 1 − (1 − BER)^(8 × bytes)`, assuming independent bit errors

use super::constants::BITS_PER_BYTE;

/// Bit error probability of coherent BPSK under additive white Gaussian noise.
pub fn ber_awgn(snr: f64) -> f64 {
    0.5 * libm::erfc(snr.sqrt())
}

/// Average bit error probability of BPSK over a Rayleigh fading channel.
pub fn ber_rayleigh(snr: f64) -> f64 {
    if snr == f64::INFINITY {
        return 0.0;
    }
    0.5 * (1.0 - (snr / (1.0 + snr)).sqrt())
}

/// Probability that at least one bit of a `packet_size`-byte packet is corrupted.
///
/// A zero-length packet never fails.
///
/// Evaluated as `−expm1(bits × ln1p(−ber))` so bit error rates far below
/// machine epsilon still yield a non-zero packet error rate.
pub fn packet_error_rate(ber: f64, packet_size: u32) -> f64 {
    debug_assert!(!ber.is_nan(), "bit error rate is NaN");
    if packet_size == 0 {
        return 0.0;
    }
    let bits = BITS_PER_BYTE * packet_size as f64;
    let per = -(bits * (-ber).ln_1p()).exp_m1();
    per.clamp(0.0, 1.0)
}

/// Convert a linear power ratio to decibels.
pub fn to_db(linear: f64) -> f64 {
    10.0 * linear.log10()
}

/// Convert decibels to a linear power ratio.
pub fn from_db(db: f64) -> f64 {
    10f64.powf(db / 10.0)
}
