//! Slow-scan television transmitter.
//!
//! Turns still images into audio that SSTV receivers decode back into the
//! picture. Supports Scottie DX, PD-120 and Robot 36.
//!
//! ```no_run
//! use sstv_tx::modem::sstv::{
//!     EncoderConfig,
//!     Mode,
//!     encode_to_wav,
//!     image::load_rgb_image,
//! };
//!
//! let image = load_rgb_image("picture.png")?;
//! let num_samples = encode_to_wav("picture.wav", &image, Mode::Robot36, EncoderConfig::default())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod modem;
pub mod sink;
pub mod source;

