//! Physical constants shared by the channel models.

/// Speed of sound in sea water, in m/s.
pub const SOUND_SPEED: f64 = 1500.0;

/// Speed of light in water, in m/s.
pub const LIGHT_SPEED: f64 = 2.25e8;

/// Boltzmann constant, in J/K.
pub const BOLTZMANN: f64 = 1.38e-23;

/// Elementary charge, in C.
pub const ELECTRON_CHARGE: f64 = 1.6e-19;

/// Allowed acoustic spreading factors: cylindrical, practical and spherical spreading.
pub const SPREADING_FACTORS: [f64; 3] = [1.0, 1.5, 2.0];

/// Receiver noise bandwidth factor applied to the ambient noise level (dB re 1 µPa)
/// when none is given for an acoustic transmission.
pub const DEFAULT_NOISE_BANDWIDTH: f64 = 2.35;

/// Bits per byte, used when aggregating bit errors over a packet.
pub const BITS_PER_BYTE: f64 = 8.0;

/// Bisection steps used by the effective distance search.
pub const EFFECTIVE_DISTANCE_ITERATIONS: usize = 64;
