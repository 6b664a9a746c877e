//! # References
//!
//! - <http://lionel.cordesses.free.fr/gpages/sstv.html>
//! - <http://www.barberdsp.com/downloads/Dayton%20Paper.pdf>
//! - JL Barber, N7CXI: "Proposal for SSTV Mode Specifications"

use std::convert::Infallible;

mod encoder;
pub mod image;
pub mod modes;
pub mod morse;
pub mod scan;
pub mod vis;

pub use encoder::{
    DEFAULT_PADDING_MS,
    DEFAULT_SAMPLE_RATE,
    EncodeError,
    EncoderConfig,
    SstvEncoder,
    encode_to_wav,
};
pub use modes::{
    Mode,
    ModeSpecification,
    UnsupportedMode,
};

pub const LEADER_TONE: f64 = 1900.0;
pub const LEADER_TIME: f64 = 300.0;
pub const LEADER_BREAK_TIME: f64 = 10.0;

pub const CALIBRATION_TIME: f64 = 100.0;

pub const VIS_BIT_TIME: f64 = 30.0;
pub const VIS_LOW_TONE: f64 = 1300.0;
pub const VIS_HIGH_TONE: f64 = 1100.0;

// sync, leader break, vis start/stop
pub const SYNC_TONE: f64 = 1200.0;

pub const PORCH_TONE: f64 = 1500.0;

pub const CHANNEL_LOW_TONE: f64 = 1500.0;
pub const CHANNEL_HIGH_TONE: f64 = 2300.0;

/// Hz per intensity step, maps 0..=255 onto 1500..=2300 Hz.
pub const CHANNEL_FREQUENCY_MULTIPLIER: f64 = 3.1372549;

/// Frequency for a channel intensity.
///
/// Luma and chroma values slightly outside 0..=255 are passed through.
#[inline]
pub fn channel_frequency(value: f64) -> f64 {
    CHANNEL_LOW_TONE + value * CHANNEL_FREQUENCY_MULTIPLIER
}

/// A tone segment. A frequency of 0 is silence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pulse {
    pub frequency: f64,
    pub duration_ms: f64,
}

impl Pulse {
    #[inline]
    pub const fn new(frequency: f64, duration_ms: f64) -> Self {
        Self {
            frequency,
            duration_ms,
        }
    }

    #[inline]
    pub const fn silence(duration_ms: f64) -> Self {
        Self::new(0.0, duration_ms)
    }
}

/// Receives pulses in transmission order.
pub trait EmitPulse {
    type Error;

    fn emit(&mut self, pulse: Pulse) -> Result<(), Self::Error>;

    #[inline]
    fn emit_all<I>(&mut self, pulses: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pulse>,
        Self: Sized,
    {
        for pulse in pulses {
            self.emit(pulse)?;
        }
        Ok(())
    }
}

impl<E> EmitPulse for &mut E
where
    E: EmitPulse + ?Sized,
{
    type Error = E::Error;

    #[inline]
    fn emit(&mut self, pulse: Pulse) -> Result<(), Self::Error> {
        (**self).emit(pulse)
    }
}

impl EmitPulse for Vec<Pulse> {
    type Error = Infallible;

    #[inline]
    fn emit(&mut self, pulse: Pulse) -> Result<(), Self::Error> {
        self.push(pulse);
        Ok(())
    }
}

/// Closing tones sent after the image.
pub const END_OF_TRANSMISSION: [Pulse; 5] = [
    Pulse::new(1500.0, 500.0),
    Pulse::new(1900.0, 100.0),
    Pulse::new(1500.0, 100.0),
    Pulse::new(1900.0, 100.0),
    Pulse::new(1500.0, 100.0),
];
