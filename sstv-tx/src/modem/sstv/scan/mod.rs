//! Image body encoders, one per mode.

pub mod pd;
pub mod robot;
pub mod scottie;

use crate::modem::sstv::{
    EmitPulse,
    Pulse,
    channel_frequency,
    image::FrameBuffer,
    modes::Mode,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DimensionError {
    #[error("{mode} scans rows in pairs, but the image has {height} rows")]
    UnpairedRows { mode: Mode, height: usize },

    #[error(
        "{mode} expects a {expected_width}x{expected_height} image, but got {width}x{height}"
    )]
    ImageSize {
        mode: Mode,
        width: usize,
        height: usize,
        expected_width: usize,
        expected_height: usize,
    },
}

/// Checks that `frame_buffer` can be sent with `mode` as is.
///
/// Row pairing is checked first, so an odd height is reported as such even
/// when the size is wrong too.
pub fn check_dimensions<F>(mode: Mode, frame_buffer: &F) -> Result<(), DimensionError>
where
    F: FrameBuffer + ?Sized,
{
    let specification = mode.specification();
    let width = frame_buffer.width();
    let height = frame_buffer.height();

    if height % specification.lines_per_group != 0 {
        return Err(DimensionError::UnpairedRows { mode, height });
    }

    if width != specification.pixels_per_line || height != specification.num_lines {
        return Err(DimensionError::ImageSize {
            mode,
            width,
            height,
            expected_width: specification.pixels_per_line,
            expected_height: specification.num_lines,
        });
    }

    Ok(())
}

/// Emits the image body for `mode`.
///
/// The frame buffer must pass [`check_dimensions`].
pub fn encode<F, E>(mode: Mode, frame_buffer: &F, emitter: &mut E) -> Result<(), E::Error>
where
    F: FrameBuffer + ?Sized,
    E: EmitPulse,
{
    match mode {
        Mode::ScottieDx => scottie::encode(frame_buffer, emitter),
        Mode::Pd120 => pd::encode(frame_buffer, emitter),
        Mode::Robot36 => robot::encode(frame_buffer, emitter),
    }
}

/// One pulse per pixel, frequency taken from `value(x)`.
fn scan_line<E>(
    emitter: &mut E,
    num_pixels: usize,
    pixel_time: f64,
    value: impl Fn(usize) -> f64,
) -> Result<(), E::Error>
where
    E: EmitPulse,
{
    for x in 0..num_pixels {
        emitter.emit(Pulse::new(channel_frequency(value(x)), pixel_time))?;
    }
    Ok(())
}
