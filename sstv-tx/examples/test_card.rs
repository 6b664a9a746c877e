//! Writes a color-bar test card in every supported mode.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Error;
use image::{
    Rgb,
    RgbImage,
};
use sstv_tx::modem::sstv::{
    EncoderConfig,
    Mode,
    encode_to_wav,
    morse::CallSign,
};

#[derive(Debug, Parser)]
struct Args {
    /// Directory the wav files are written to
    #[clap(default_value = ".")]
    output: PathBuf,

    #[clap(short, long, default_value = "44100")]
    sample_rate: u32,

    /// Morse identifier sent before the picture
    #[clap(short, long)]
    call_sign: Option<String>,
}

fn main() -> Result<(), Error> {
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let call_sign = args
        .call_sign
        .as_deref()
        .map(str::parse::<CallSign>)
        .transpose()?;

    for mode in Mode::ALL {
        let image = test_card(mode);
        let path = args
            .output
            .join(format!("test_card_{}.wav", mode.specification().short_name));

        let config = EncoderConfig {
            sample_rate: args.sample_rate,
            call_sign: call_sign.clone(),
            ..Default::default()
        };
        let num_samples = encode_to_wav(&path, &image, mode, config)?;

        println!(
            "{mode}: {} ({:.1} s)",
            path.display(),
            num_samples as f32 / args.sample_rate as f32
        );
    }

    Ok(())
}

fn test_card(mode: Mode) -> RgbImage {
    let specification = mode.specification();
    let width = specification.pixels_per_line as u32;
    let height = specification.num_lines as u32;
    let bars = [
        [255, 255, 255],
        [255, 255, 0],
        [0, 255, 255],
        [0, 255, 0],
        [255, 0, 255],
        [255, 0, 0],
        [0, 0, 255],
        [0, 0, 0],
    ];

    RgbImage::from_fn(width, height, |x, y| {
        if y < height * 3 / 4 {
            Rgb(bars[(x * 8 / width) as usize])
        }
        else {
            // gray ramp
            let level = (x * 255 / (width - 1)) as u8;
            Rgb([level, level, level])
        }
    })
}
