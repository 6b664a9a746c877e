use crate::modem::sstv::{
    EmitPulse,
    PORCH_TONE,
    Pulse,
    SYNC_TONE,
    image::{
        Channel,
        FrameBuffer,
    },
    modes::ModeSpecification,
    scan::scan_line,
};

/// PD-120: every sync carries two rows, as Y of the even row, R-Y and B-Y
/// averaged over both rows, and Y of the odd row.
pub fn encode<F, E>(frame_buffer: &F, emitter: &mut E) -> Result<(), E::Error>
where
    F: FrameBuffer + ?Sized,
    E: EmitPulse,
{
    let mode = &ModeSpecification::PD120;
    let sync = Pulse::new(SYNC_TONE, mode.sync_time);
    let porch = Pulse::new(PORCH_TONE, mode.porch_time);
    let width = mode.pixels_per_line;

    for even in (0..mode.num_lines).step_by(2) {
        let odd = even + 1;
        tracing::trace!(even, odd, "pd line pair");

        emitter.emit(sync)?;
        emitter.emit(porch)?;

        scan_line(emitter, width, mode.pixel_time, |x| {
            frame_buffer.channel(x, even, Channel::Luma)
        })?;
        scan_line(emitter, width, mode.chroma_pixel_time, |x| {
            frame_buffer.channel_pair_average(x, even, odd, Channel::ChromaRy)
        })?;
        scan_line(emitter, width, mode.chroma_pixel_time, |x| {
            frame_buffer.channel_pair_average(x, even, odd, Channel::ChromaBy)
        })?;
        scan_line(emitter, width, mode.pixel_time, |x| {
            frame_buffer.channel(x, odd, Channel::Luma)
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use image::{
        Rgb,
        RgbImage,
    };

    use crate::modem::sstv::{
        Pulse,
        channel_frequency,
        image::Channel,
        scan::pd::encode,
    };

    #[test]
    fn pair_layout() {
        // even rows red, odd rows blue
        let image = RgbImage::from_fn(640, 496, |_x, y| {
            if y % 2 == 0 {
                Rgb([255, 0, 0])
            }
            else {
                Rgb([0, 0, 255])
            }
        });
        let mut pulses = vec![];
        encode(&image, &mut pulses).unwrap();

        let group = 2 + 4 * 640;
        assert_eq!(pulses.len(), 248 * group);

        let pair = &pulses[..group];
        assert_eq!(pair[0], Pulse::new(1200.0, 20.0));
        assert_eq!(pair[1], Pulse::new(1500.0, 2.08));
        assert!(pair[2..].iter().all(|pulse| pulse.duration_ms == 0.19));

        let red = [255, 0, 0];
        let blue = [0, 0, 255];
        let y_even = &pair[2..642];
        let ry = &pair[642..1282];
        let by = &pair[1282..1922];
        let y_odd = &pair[1922..2562];

        assert_abs_diff_eq!(
            y_even[0].frequency,
            channel_frequency(Channel::Luma.from_rgb(red)),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            ry[17].frequency,
            channel_frequency(
                (Channel::ChromaRy.from_rgb(red) + Channel::ChromaRy.from_rgb(blue)) / 2.0
            ),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            by[639].frequency,
            channel_frequency(
                (Channel::ChromaBy.from_rgb(red) + Channel::ChromaBy.from_rgb(blue)) / 2.0
            ),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            y_odd[320].frequency,
            channel_frequency(Channel::Luma.from_rgb(blue)),
            epsilon = 1e-9
        );
    }

    #[test]
    fn line_pair_duration() {
        let image = RgbImage::new(640, 496);
        let mut pulses = vec![];
        encode(&image, &mut pulses).unwrap();

        let group = 2 + 4 * 640;
        let duration = pulses[..group]
            .iter()
            .map(|pulse| pulse.duration_ms)
            .sum::<f64>();
        assert_abs_diff_eq!(duration, 508.48, epsilon = 1e-6);
    }
}
