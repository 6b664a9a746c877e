use std::path::Path;

use crate::{
    modem::sstv::{
        END_OF_TRANSMISSION,
        EmitPulse,
        Pulse,
        image::FrameBuffer,
        modes::{
            Mode,
            UnsupportedMode,
        },
        morse::CallSign,
        scan::{
            self,
            DimensionError,
        },
        vis::encode_vis,
    },
    sink::{
        WriteSamples,
        file::{
            self,
            WavSink,
        },
    },
    source::Oscillator,
};

pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
pub const DEFAULT_PADDING_MS: f64 = 200.0;

#[derive(Clone, Debug, PartialEq)]
pub struct EncoderConfig {
    pub sample_rate: u32,

    /// Silence before and after the transmission.
    pub padding_ms: f64,

    /// Morse identifier sent ahead of the VIS header.
    pub call_sign: Option<CallSign>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            padding_ms: DEFAULT_PADDING_MS,
            call_sign: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError<E> {
    #[error(transparent)]
    UnsupportedMode(#[from] UnsupportedMode),

    #[error(transparent)]
    Dimensions(#[from] DimensionError),

    #[error("could not write samples")]
    Sink(#[source] E),
}

/// Turns images into SSTV transmissions written to a sample sink.
#[derive(Debug)]
pub struct SstvEncoder<W> {
    sink: W,
    oscillator: Oscillator,
    config: EncoderConfig,
    num_samples: usize,
}

impl<W> SstvEncoder<W>
where
    W: WriteSamples<i16>,
{
    pub fn new(sink: W, config: EncoderConfig) -> Self {
        Self {
            sink,
            oscillator: Oscillator::new(config.sample_rate),
            config,
            num_samples: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    #[inline]
    pub fn sink(&self) -> &W {
        &self.sink
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Encodes one complete transmission and returns the number of samples
    /// written.
    ///
    /// The image is validated before anything is written. If the sink fails,
    /// whatever it received so far is incomplete and should be discarded.
    pub fn encode<F>(
        &mut self,
        frame_buffer: &F,
        mode: Mode,
    ) -> Result<usize, EncodeError<W::Error>>
    where
        F: FrameBuffer + ?Sized,
    {
        scan::check_dimensions(mode, frame_buffer)?;

        tracing::debug!(
            %mode,
            width = frame_buffer.width(),
            height = frame_buffer.height(),
            sample_rate = self.config.sample_rate,
            "encoding image"
        );

        self.oscillator.reset();
        self.num_samples = 0;

        let padding = Pulse::silence(self.config.padding_ms);
        if self.config.padding_ms > 0.0 {
            self.emit(padding).map_err(EncodeError::Sink)?;
        }

        if let Some(call_sign) = self.config.call_sign.clone() {
            tracing::debug!(%call_sign, "sending cw identifier");
            call_sign.encode(self).map_err(EncodeError::Sink)?;
        }

        encode_vis(mode.vis_code(), self).map_err(EncodeError::Sink)?;
        tracing::debug!(
            num_samples = self.num_samples,
            vis_code = %mode.vis_code(),
            "header done"
        );

        scan::encode(mode, frame_buffer, self).map_err(EncodeError::Sink)?;
        tracing::debug!(num_samples = self.num_samples, "image done");

        self.emit_all(END_OF_TRANSMISSION).map_err(EncodeError::Sink)?;
        if self.config.padding_ms > 0.0 {
            self.emit(padding).map_err(EncodeError::Sink)?;
        }

        self.sink.flush().map_err(EncodeError::Sink)?;

        tracing::debug!(
            num_samples = self.num_samples,
            duration = self.num_samples as f64 / self.config.sample_rate as f64,
            "transmission done"
        );

        Ok(self.num_samples)
    }

    /// Like [`encode`](Self::encode), with the mode given by name.
    pub fn encode_by_name<F>(
        &mut self,
        frame_buffer: &F,
        mode: &str,
    ) -> Result<usize, EncodeError<W::Error>>
    where
        F: FrameBuffer + ?Sized,
    {
        let mode = mode.parse::<Mode>()?;
        self.encode(frame_buffer, mode)
    }
}

impl<W> EmitPulse for SstvEncoder<W>
where
    W: WriteSamples<i16>,
{
    type Error = W::Error;

    #[inline]
    fn emit(&mut self, pulse: Pulse) -> Result<(), Self::Error> {
        self.num_samples +=
            self.oscillator
                .emit(pulse.frequency, pulse.duration_ms, &mut self.sink)?;
        Ok(())
    }
}

/// Encodes `frame_buffer` into a wav file at `path`.
pub fn encode_to_wav<F>(
    path: impl AsRef<Path>,
    frame_buffer: &F,
    mode: Mode,
    config: EncoderConfig,
) -> Result<usize, EncodeError<file::Error>>
where
    F: FrameBuffer + ?Sized,
{
    // no file is created for an image that can't be sent
    scan::check_dimensions(mode, frame_buffer)?;

    let sink = WavSink::from_path(path, config.sample_rate).map_err(EncodeError::Sink)?;
    let mut encoder = SstvEncoder::new(sink, config);
    let num_samples = encoder.encode(frame_buffer, mode)?;
    encoder
        .into_inner()
        .finalize()
        .map_err(EncodeError::Sink)?;

    Ok(num_samples)
}

#[cfg(test)]
mod tests {
    use image::{
        Rgb,
        RgbImage,
    };

    use crate::{
        modem::sstv::{
            END_OF_TRANSMISSION,
            EmitPulse,
            Pulse,
            encoder::{
                EncodeError,
                EncoderConfig,
                SstvEncoder,
            },
            modes::Mode,
            scan::{
                self,
                DimensionError,
            },
            vis::vis_pulses,
        },
        sink::{
            NullSink,
            WriteSamples,
        },
        source::Oscillator,
    };

    fn test_image(mode: Mode) -> RgbImage {
        let specification = mode.specification();
        RgbImage::from_fn(
            specification.pixels_per_line as u32,
            specification.num_lines as u32,
            |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8]),
        )
    }

    fn expected_pulses(image: &RgbImage, mode: Mode, config: &EncoderConfig) -> Vec<Pulse> {
        let mut pulses = vec![Pulse::silence(config.padding_ms)];
        if let Some(call_sign) = &config.call_sign {
            pulses.extend(call_sign.pulses());
        }
        pulses.extend(vis_pulses(mode.vis_code()));
        scan::encode(mode, image, &mut pulses).unwrap();
        pulses.extend(END_OF_TRANSMISSION);
        pulses.push(Pulse::silence(config.padding_ms));
        pulses
    }

    #[test]
    fn sample_count_matches_carry_rule() {
        for mode in Mode::ALL {
            let image = test_image(mode);
            let config = EncoderConfig {
                sample_rate: 11025,
                call_sign: Some("DE BG7ZDQ".parse().unwrap()),
                ..Default::default()
            };

            let mut oscillator = Oscillator::new(config.sample_rate);
            let expected = expected_pulses(&image, mode, &config)
                .into_iter()
                .map(|pulse| oscillator.num_samples(pulse.duration_ms))
                .sum::<usize>();

            let mut encoder = SstvEncoder::new(Vec::<i16>::new(), config);
            let num_samples = encoder.encode(&image, mode).unwrap();

            assert_eq!(num_samples, expected, "{mode}");
            assert_eq!(encoder.into_inner().len(), expected, "{mode}");
        }
    }

    #[test]
    fn total_duration_matches_nominal() {
        let mode = Mode::Robot36;
        let image = test_image(mode);
        let config = EncoderConfig::default();
        let nominal_ms = expected_pulses(&image, mode, &config)
            .iter()
            .map(|pulse| pulse.duration_ms)
            .sum::<f64>();

        let mut encoder = SstvEncoder::new(NullSink::default(), config);
        let num_samples = encoder.encode(&image, mode).unwrap();

        let nominal_samples = nominal_ms * 44.1;
        assert!((num_samples as f64 - nominal_samples).abs() <= 1.0);
    }

    #[test]
    fn encodes_are_independent() {
        let mode = Mode::Robot36;
        let image = test_image(mode);

        let mut encoder = SstvEncoder::new(Vec::<i16>::new(), EncoderConfig::default());
        let first = encoder.encode(&image, mode).unwrap();
        let second = encoder.encode(&image, mode).unwrap();
        assert_eq!(first, second);

        let samples = encoder.into_inner();
        assert_eq!(samples.len(), first + second);
        assert_eq!(samples[..first], samples[first..]);
    }

    #[test]
    fn rejects_before_writing() {
        let image = RgbImage::new(320, 239);
        let mut encoder = SstvEncoder::new(Vec::<i16>::new(), EncoderConfig::default());

        let error = encoder.encode(&image, Mode::Robot36).unwrap_err();
        assert!(matches!(
            error,
            EncodeError::Dimensions(DimensionError::UnpairedRows { height: 239, .. })
        ));

        let error = encoder.encode_by_name(&image, "Martin-1").unwrap_err();
        assert!(matches!(error, EncodeError::UnsupportedMode(_)));

        assert!(encoder.into_inner().is_empty());
    }

    #[derive(Debug, Default)]
    struct FailingSink {
        remaining: usize,
    }

    #[derive(Debug, PartialEq)]
    struct Full;

    impl WriteSamples<i16> for FailingSink {
        type Error = Full;

        fn write_samples(&mut self, samples: &[i16]) -> Result<(), Self::Error> {
            self.remaining = self.remaining.checked_sub(samples.len()).ok_or(Full)?;
            Ok(())
        }
    }

    #[test]
    fn sink_failure_aborts() {
        let mode = Mode::ScottieDx;
        let image = test_image(mode);
        let mut encoder = SstvEncoder::new(
            FailingSink { remaining: 100_000 },
            EncoderConfig::default(),
        );
        let error = encoder.encode(&image, mode).unwrap_err();
        assert!(matches!(error, EncodeError::Sink(Full)));
    }

    #[test]
    fn silence_padding_is_flat() {
        let mode = Mode::Pd120;
        let image = test_image(mode);
        let config = EncoderConfig {
            sample_rate: 8000,
            padding_ms: 100.0,
            call_sign: None,
        };
        let mut encoder = SstvEncoder::new(Vec::<i16>::new(), config);
        encoder.encode(&image, mode).unwrap();
        let samples = encoder.into_inner();
        assert!(samples[..800].iter().all(|sample| *sample == 0));
    }

    #[test]
    fn emitting_pulses_counts_samples() {
        let mut encoder = SstvEncoder::new(NullSink::default(), EncoderConfig::default());
        encoder.emit(Pulse::new(1900.0, 10.0)).unwrap();
        encoder.emit(Pulse::new(1200.0, 30.0)).unwrap();
        assert_eq!(encoder.sink().num_samples, 441 + 1323);
    }
}
