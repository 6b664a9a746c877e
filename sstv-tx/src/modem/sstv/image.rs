use std::path::Path;

use image::{
    ImageReader,
    RgbImage,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
    /// Y
    Luma,
    /// R-Y
    ChromaRy,
    /// B-Y
    ChromaBy,
}

impl Channel {
    /// Intensity of this channel for an RGB pixel.
    ///
    /// Luma and chroma use the fixed transform of the YRyBy modes. The result is
    /// not clamped and may leave 0..=255 by a small amount.
    pub fn from_rgb(self, [r, g, b]: [u8; 3]) -> f64 {
        let (r, g, b) = (r as f64, g as f64, b as f64);
        match self {
            Channel::Red => r,
            Channel::Green => g,
            Channel::Blue => b,
            Channel::Luma => 16.0 + 0.003906 * (65.738 * r + 129.057 * g + 25.064 * b),
            Channel::ChromaRy => 128.0 + 0.003906 * (112.439 * r - 94.154 * g - 18.285 * b),
            Channel::ChromaBy => 128.0 + 0.003906 * (-37.945 * r - 74.494 * g + 112.439 * b),
        }
    }
}

/// Read-only RGB pixel buffer.
pub trait FrameBuffer {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn rgb(&self, x: usize, y: usize) -> [u8; 3];

    #[inline]
    fn channel(&self, x: usize, y: usize, channel: Channel) -> f64 {
        channel.from_rgb(self.rgb(x, y))
    }

    /// Mean of a channel over two rows, used for sub-sampled chroma.
    #[inline]
    fn channel_pair_average(&self, x: usize, y0: usize, y1: usize, channel: Channel) -> f64 {
        (self.channel(x, y0, channel) + self.channel(x, y1, channel)) / 2.0
    }
}

impl<F> FrameBuffer for &F
where
    F: FrameBuffer + ?Sized,
{
    #[inline]
    fn width(&self) -> usize {
        (**self).width()
    }

    #[inline]
    fn height(&self) -> usize {
        (**self).height()
    }

    #[inline]
    fn rgb(&self, x: usize, y: usize) -> [u8; 3] {
        (**self).rgb(x, y)
    }
}

impl FrameBuffer for RgbImage {
    #[inline]
    fn width(&self) -> usize {
        RgbImage::width(self) as usize
    }

    #[inline]
    fn height(&self) -> usize {
        RgbImage::height(self) as usize
    }

    #[inline]
    fn rgb(&self, x: usize, y: usize) -> [u8; 3] {
        self.get_pixel(x as u32, y as u32).0
    }
}

#[derive(Debug, thiserror::Error)]
#[error("could not load image: {path}")]
pub struct ImageLoadError {
    pub path: String,
    #[source]
    pub source: image::ImageError,
}

/// Decodes an image file into 8-bit RGB.
pub fn load_rgb_image(path: impl AsRef<Path>) -> Result<RgbImage, ImageLoadError> {
    let path = path.as_ref();
    let load = || -> Result<RgbImage, image::ImageError> {
        Ok(ImageReader::open(path)?
            .with_guessed_format()?
            .decode()?
            .into_rgb8())
    };
    let image = load().map_err(|source| {
        ImageLoadError {
            path: path.display().to_string(),
            source,
        }
    })?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "loaded image"
    );
    Ok(image)
}
