use std::path::PathBuf;

use clap::Parser;
use sstv_tx::modem::sstv::Mode;

/// Encodes an image as an SSTV transmission into a wav file.
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Args {
    /// Image to send. Any format with a decoder enabled (PNG, JPEG, BMP).
    pub image: PathBuf,

    /// Scottie-DX (SDX), PD-120 (PD120) or Robot-36 (R36)
    pub mode: Mode,

    /// Wav file to write
    pub output: PathBuf,

    /// Config file to use instead of the one in the user's config directory.
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Output sample rate in Hz
    #[clap(short, long)]
    pub sample_rate: Option<u32>,

    /// Silence before and after the transmission, in milliseconds.
    #[clap(short, long)]
    pub padding: Option<f64>,

    /// Send this as morse code before the image, e.g. "DE BG7ZDQ".
    #[clap(long)]
    pub call_sign: Option<String>,

    /// Don't scale the image to the mode's resolution. Images of the wrong
    /// size are rejected.
    #[clap(long)]
    pub no_resize: bool,
}
