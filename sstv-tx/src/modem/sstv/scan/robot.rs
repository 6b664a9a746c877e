use crate::modem::sstv::{
    CHANNEL_HIGH_TONE,
    EmitPulse,
    LEADER_TONE,
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

pub const CHROMA_PORCH_TIME: f64 = 1.5;

/// Robot 36: every line carries its own luma plus one chroma component
/// averaged over the line pair. Even lines send R-Y, odd lines B-Y; the
/// separator frequency tells the receiver which one follows.
pub fn encode<F, E>(frame_buffer: &F, emitter: &mut E) -> Result<(), E::Error>
where
    F: FrameBuffer + ?Sized,
    E: EmitPulse,
{
    let mode = &ModeSpecification::R36;
    let sync = Pulse::new(SYNC_TONE, mode.sync_time);
    let porch = Pulse::new(PORCH_TONE, mode.porch_time);
    let chroma_porch = Pulse::new(LEADER_TONE, CHROMA_PORCH_TIME);
    let width = mode.pixels_per_line;

    for y in 0..mode.num_lines {
        tracing::trace!(y, "robot line");

        let even = y & !1;
        let odd = even + 1;
        let (separator_tone, chroma) = if y == even {
            (PORCH_TONE, Channel::ChromaRy)
        }
        else {
            (CHANNEL_HIGH_TONE, Channel::ChromaBy)
        };

        emitter.emit(sync)?;
        emitter.emit(porch)?;
        scan_line(emitter, width, mode.pixel_time, |x| {
            frame_buffer.channel(x, y, Channel::Luma)
        })?;

        emitter.emit(Pulse::new(separator_tone, mode.sep_time))?;
        emitter.emit(chroma_porch)?;
        scan_line(emitter, width, mode.chroma_pixel_time, |x| {
            frame_buffer.channel_pair_average(x, even, odd, chroma)
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
        scan::robot::encode,
    };

    const LINE: usize = 2 + 320 + 2 + 320;

    #[test]
    fn line_layout_alternates_chroma() {
        let image = RgbImage::from_pixel(320, 240, Rgb([0, 255, 0]));
        let mut pulses = vec![];
        encode(&image, &mut pulses).unwrap();
        assert_eq!(pulses.len(), 240 * LINE);

        let green = [0, 255, 0];
        for (y, line) in pulses.chunks(LINE).enumerate() {
            assert_eq!(line[0], Pulse::new(1200.0, 9.0));
            assert_eq!(line[1], Pulse::new(1500.0, 3.0));
            assert!(line[2..322].iter().all(|p| p.duration_ms == 0.275));
            assert_eq!(line[323], Pulse::new(1900.0, 1.5));
            assert!(line[324..].iter().all(|p| p.duration_ms == 0.1375));

            let (separator, chroma) = if y % 2 == 0 {
                (1500.0, Channel::ChromaRy)
            }
            else {
                (2300.0, Channel::ChromaBy)
            };
            assert_eq!(line[322], Pulse::new(separator, 4.5));
            assert_abs_diff_eq!(
                line[324].frequency,
                channel_frequency(chroma.from_rgb(green)),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn chroma_averages_within_pair() {
        // rows 0..2 black, 2..4 white: no chroma bleeds across pairs
        let image = RgbImage::from_fn(320, 240, |_x, y| {
            if y % 4 < 2 {
                Rgb([0, 0, 0])
            }
            else {
                Rgb([255, 255, 255])
            }
        });
        let mut pulses = vec![];
        encode(&image, &mut pulses).unwrap();

        let black_by = channel_frequency(Channel::ChromaBy.from_rgb([0, 0, 0]));
        let line_1 = &pulses[LINE..2 * LINE];
        assert_abs_diff_eq!(line_1[324].frequency, black_by, epsilon = 1e-9);

        // the last line must only read its own pair
        let last = &pulses[239 * LINE..];
        assert_eq!(last.len(), LINE);
        let white_y = channel_frequency(Channel::Luma.from_rgb([255, 255, 255]));
        assert_abs_diff_eq!(last[2].frequency, white_y, epsilon = 1e-9);
    }

    #[test]
    fn line_duration() {
        let image = RgbImage::new(320, 240);
        let mut pulses = vec![];
        encode(&image, &mut pulses).unwrap();
        let duration = pulses[..LINE]
            .iter()
            .map(|pulse| pulse.duration_ms)
            .sum::<f64>();
        assert_abs_diff_eq!(duration, 150.0, epsilon = 1e-6);
    }
}
