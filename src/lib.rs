//! Physical layer models for underwater acoustic and optical links.
//!
//! A discrete-event simulator builds one channel per medium and asks it, for
//! every packet, whether the packet arrives intact and how long it travels:
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use underwater_channels::{AcousticChannel, AcousticTransmission, Channel};
//!
//! let channel = AcousticChannel::new(1.5, 0.5, 5.0).unwrap();
//! let packet = AcousticTransmission::new(10.0, 180.0, 1000.0, 64);
//! let mut rng = StdRng::seed_from_u64(1);
//!
//! let delivered = channel.transmit(&packet, &mut rng).unwrap();
//! let delay = channel.propagation_time(packet.distance);
//! # let _ = (delivered, delay);
//! ```
//!
//! ## Module Organization
//!
//! - `channel`: the [`Channel`] trait and both medium models
//! - `config`: loading channel parameters from TOML or JSON files
//! - `error`: error types

pub mod channel;
pub mod config;
pub mod error;

pub use channel::{
    AcousticChannel, AcousticTransmission, Channel, LinkReport, OpticalChannel, OpticalParameters, OpticalTransmission,
    Transmission,
};
pub use config::{AcousticParameters, ChannelConfig};
pub use error::{ChannelError, ConfigError};
