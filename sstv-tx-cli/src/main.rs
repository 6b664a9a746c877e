pub mod args;
pub mod config;
pub mod files;

use clap::Parser;
use color_eyre::eyre::{
    Error,
    WrapErr,
};
use image::{
    RgbImage,
    imageops::FilterType,
};
use sstv_tx::modem::sstv::{
    Mode,
    encode_to_wav,
    image::load_rgb_image,
};
use tracing_subscriber::EnvFilter;

use crate::{
    args::Args,
    config::Config,
    files::AppFiles,
};

fn main() -> Result<(), Error> {
    let _ = dotenvy::dotenv();
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting sstv-tx");
    let args = Args::parse();
    tracing::debug!(?args);

    let result = run(args);

    if let Err(error) = &result {
        tracing::error!(?error);
    }

    result
}

fn run(args: Args) -> Result<(), Error> {
    let mut config = match &args.config {
        Some(path) => Config::from_path(path)?,
        None => AppFiles::new()?.config()?,
    };
    config.apply_args(&args);
    tracing::debug!(?config);

    let encoder_config = config.encoder_config()?;
    let sample_rate = encoder_config.sample_rate;

    let image = load_rgb_image(&args.image)?;
    let image = if config.resize {
        fit_to_mode(image, args.mode)
    }
    else {
        image
    };

    let num_samples = encode_to_wav(&args.output, &image, args.mode, encoder_config)
        .wrap_err_with(|| format!("Could not encode {}", args.output.display()))?;

    tracing::info!(
        mode = %args.mode,
        output = %args.output.display(),
        num_samples,
        duration = num_samples as f64 / sample_rate as f64,
        "Wrote transmission"
    );

    Ok(())
}

/// Scales the image to the resolution the mode sends.
fn fit_to_mode(image: RgbImage, mode: Mode) -> RgbImage {
    let specification = mode.specification();
    let width = specification.pixels_per_line as u32;
    let height = specification.num_lines as u32;

    if image.dimensions() == (width, height) {
        image
    }
    else {
        tracing::info!(
            from_width = image.width(),
            from_height = image.height(),
            width,
            height,
            "Resizing image"
        );
        image::imageops::resize(&image, width, height, FilterType::Lanczos3)
    }
}
