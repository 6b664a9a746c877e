use std::f64::consts::{
    PI,
    TAU,
};

use crate::sink::WriteSamples;

/// Peak amplitude of the generated sine.
pub const FULL_SCALE: f64 = 32767.0;

/// State carried from one tone to the next.
///
/// `last_amplitude` and `last_cosine` are the sine and cosine of the phase the
/// previous tone would have had at its next sample. The next tone starts from
/// that point, so the waveform never jumps at a frequency change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OscillatorState {
    pub last_amplitude: f64,
    pub last_cosine: f64,
    pub fractional_sample_carry: f64,
}

impl Default for OscillatorState {
    fn default() -> Self {
        Self {
            last_amplitude: 0.0,
            last_cosine: 1.0,
            fractional_sample_carry: 0.0,
        }
    }
}

impl OscillatorState {
    /// Phase (in radians) at which the next tone has to start.
    ///
    /// Picks the arcsine branch that matches the slope of the previous tone:
    /// rising (cosine >= 0) or falling.
    #[inline]
    pub fn phase_offset(&self) -> f64 {
        let amplitude = self.last_amplitude.clamp(-1.0, 1.0);
        if self.last_cosine >= 0.0 {
            amplitude.asin()
        }
        else {
            PI - amplitude.asin()
        }
    }
}

/// Continuous-phase sine oscillator producing 16-bit PCM.
#[derive(Clone, Debug)]
pub struct Oscillator {
    sample_rate: u32,
    state: OscillatorState,
    buffer: Vec<i16>,
}

impl Oscillator {
    pub fn new(sample_rate: u32) -> Self {
        assert!(sample_rate > 0, "sample rate must be non-zero");
        Self {
            sample_rate,
            state: OscillatorState::default(),
            buffer: vec![],
        }
    }

    #[inline]
    pub fn state(&self) -> &OscillatorState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = OscillatorState::default();
    }

    /// Number of samples a tone of `duration_ms` occupies.
    ///
    /// The exact length is truncated and the remainder accumulated. Once the
    /// remainder reaches a full sample it is added to this tone, which keeps
    /// the total length from drifting over thousands of short tones.
    pub fn num_samples(&mut self, duration_ms: f64) -> usize {
        let exact = self.sample_rate as f64 * duration_ms / 1000.0;
        let mut num_samples = exact.trunc();
        self.state.fractional_sample_carry += exact - num_samples;

        if self.state.fractional_sample_carry >= 1.0 {
            let whole = self.state.fractional_sample_carry.trunc();
            num_samples += whole;
            self.state.fractional_sample_carry -= whole;
        }

        num_samples as usize
    }

    /// Synthesizes a tone and appends it to `sink`.
    ///
    /// Returns the number of samples written. A frequency of 0 produces a
    /// constant level held at the current phase.
    pub fn emit<W>(
        &mut self,
        frequency: f64,
        duration_ms: f64,
        sink: &mut W,
    ) -> Result<usize, W::Error>
    where
        W: WriteSamples<i16>,
    {
        let num_samples = self.num_samples(duration_ms);
        let phase_offset = self.state.phase_offset();
        let step = TAU * frequency / self.sample_rate as f64;

        self.buffer.clear();
        self.buffer.extend((0..num_samples).map(|i| {
            let sample = (FULL_SCALE * (step * i as f64 + phase_offset).sin()).round();
            sample.clamp(i16::MIN as f64, i16::MAX as f64) as i16
        }));
        sink.write_samples(&self.buffer)?;

        let end_phase = step * num_samples as f64 + phase_offset;
        self.state.last_amplitude = end_phase.sin();
        self.state.last_cosine = end_phase.cos();

        Ok(num_samples)
    }
}
