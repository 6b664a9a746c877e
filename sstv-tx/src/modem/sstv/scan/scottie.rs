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

/// Scottie DX: green, blue and red scans with the sync pulse between blue and
/// red.
pub fn encode<F, E>(frame_buffer: &F, emitter: &mut E) -> Result<(), E::Error>
where
    F: FrameBuffer + ?Sized,
    E: EmitPulse,
{
    let mode = &ModeSpecification::SDX;
    let sync = Pulse::new(SYNC_TONE, mode.sync_time);
    let separator = Pulse::new(PORCH_TONE, mode.sep_time);

    let scan = |emitter: &mut E, y: usize, channel: Channel| {
        scan_line(emitter, mode.pixels_per_line, mode.pixel_time, |x| {
            frame_buffer.channel(x, y, channel)
        })
    };

    // only the first line has a leading sync
    emitter.emit(sync)?;

    for y in 0..mode.num_lines {
        tracing::trace!(y, "scottie line");

        emitter.emit(separator)?;
        scan(emitter, y, Channel::Green)?;
        emitter.emit(separator)?;
        scan(emitter, y, Channel::Blue)?;
        emitter.emit(sync)?;
        emitter.emit(separator)?;
        scan(emitter, y, Channel::Red)?;
    }

    Ok(())
}
