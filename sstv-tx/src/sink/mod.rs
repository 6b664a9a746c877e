use std::convert::Infallible;

pub mod file;

/// Append-only consumer of samples.
pub trait WriteSamples<S> {
    type Error;

    fn write_samples(&mut self, samples: &[S]) -> Result<(), Self::Error>;

    #[inline]
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<W, S> WriteSamples<S> for &mut W
where
    W: WriteSamples<S> + ?Sized,
{
    type Error = W::Error;

    #[inline]
    fn write_samples(&mut self, samples: &[S]) -> Result<(), Self::Error> {
        (**self).write_samples(samples)
    }

    #[inline]
    fn flush(&mut self) -> Result<(), Self::Error> {
        (**self).flush()
    }
}

impl<S> WriteSamples<S> for Vec<S>
where
    S: Copy,
{
    type Error = Infallible;

    #[inline]
    fn write_samples(&mut self, samples: &[S]) -> Result<(), Self::Error> {
        self.extend_from_slice(samples);
        Ok(())
    }
}

/// Sink that only counts samples.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink {
    pub num_samples: usize,
}

impl<S> WriteSamples<S> for NullSink {
    type Error = Infallible;

    #[inline]
    fn write_samples(&mut self, samples: &[S]) -> Result<(), Self::Error> {
        self.num_samples += samples.len();
        Ok(())
    }
}
