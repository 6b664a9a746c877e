use std::{
    fs::File,
    io::{
        BufWriter,
        Seek,
        Write,
    },
    path::Path,
};

use crate::sink::WriteSamples;

#[derive(Debug, thiserror::Error)]
#[error("wav sink error")]
pub enum Error {
    Hound(#[from] hound::Error),
    Closed,
}

/// Mono 16-bit PCM wav file.
///
/// The RIFF header is written with a zero length up front and patched with the
/// real sample count by [`WavSink::finalize`] (or on drop, ignoring errors).
#[derive(derive_more::Debug)]
pub struct WavSink<W>
where
    W: Write + Seek,
{
    #[debug(skip)]
    inner: Option<hound::WavWriter<W>>,
    num_samples: usize,
}

impl<W> WavSink<W>
where
    W: Write + Seek,
{
    #[inline]
    pub fn new(inner: hound::WavWriter<W>) -> Self {
        Self {
            inner: Some(inner),
            num_samples: 0,
        }
    }

    #[inline]
    pub fn from_writer(writer: W, sample_rate: u32) -> Result<Self, Error> {
        Ok(Self::new(hound::WavWriter::new(writer, spec(sample_rate))?))
    }

    #[inline]
    fn writer_mut(&mut self) -> Result<&mut hound::WavWriter<W>, Error> {
        self.inner.as_mut().ok_or(Error::Closed)
    }

    /// Writes the final header and closes the file.
    pub fn finalize(&mut self) -> Result<usize, Error> {
        if let Some(writer) = self.inner.take() {
            writer.finalize()?;
            tracing::debug!(
                num_samples = self.num_samples,
                data_size = self.num_samples * 2,
                "finalized wav file"
            );
        }
        Ok(self.num_samples)
    }
}

impl WavSink<BufWriter<File>> {
    #[inline]
    pub fn from_path(path: impl AsRef<Path>, sample_rate: u32) -> Result<Self, Error> {
        tracing::debug!(path = %path.as_ref().display(), sample_rate, "creating wav file");
        Ok(Self::new(hound::WavWriter::create(
            path,
            spec(sample_rate),
        )?))
    }
}

impl<W> WriteSamples<i16> for WavSink<W>
where
    W: Write + Seek,
{
    type Error = Error;

    fn write_samples(&mut self, samples: &[i16]) -> Result<(), Self::Error> {
        let writer = self.writer_mut()?;
        let mut sample_writer = writer.get_i16_writer(samples.len() as u32);
        for sample in samples {
            sample_writer.write_sample(*sample);
        }
        sample_writer.flush()?;
        self.num_samples += samples.len();
        Ok(())
    }

    #[inline]
    fn flush(&mut self) -> Result<(), Self::Error> {
        self.writer_mut()?.flush()?;
        Ok(())
    }
}

#[inline]
pub fn spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}
