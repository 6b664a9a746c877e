use std::path::Path;

use color_eyre::eyre::bail;
use serde::{
    Deserialize,
    Serialize,
};
use sstv_tx::modem::sstv::{
    DEFAULT_PADDING_MS,
    DEFAULT_SAMPLE_RATE,
    EncoderConfig,
};

use crate::{
    Error,
    args::Args,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub sample_rate: u32,
    pub padding_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_sign: Option<String>,
    pub resize: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            padding_ms: DEFAULT_PADDING_MS,
            call_sign: None,
            resize: true,
        }
    }
}

impl Config {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        tracing::debug!(path = %path.as_ref().display(), "Loading config from file");
        Ok(toml::from_str(&std::fs::read_to_string(path)?)?)
    }

    pub fn to_path(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        tracing::debug!(path = %path.as_ref().display(), "Writing config to file");
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Command line arguments take precedence over the file.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(sample_rate) = args.sample_rate {
            self.sample_rate = sample_rate;
        }
        if let Some(padding) = args.padding {
            self.padding_ms = padding;
        }
        if let Some(call_sign) = &args.call_sign {
            self.call_sign = Some(call_sign.clone());
        }
        if args.no_resize {
            self.resize = false;
        }
    }

    pub fn encoder_config(&self) -> Result<EncoderConfig, Error> {
        if self.sample_rate == 0 {
            bail!("Sample rate must be greater than 0");
        }
        if self.padding_ms.is_nan() || self.padding_ms < 0.0 {
            bail!("Padding must not be negative");
        }

        Ok(EncoderConfig {
            sample_rate: self.sample_rate,
            padding_ms: self.padding_ms,
            call_sign: self
                .call_sign
                .as_deref()
                .filter(|call_sign| !call_sign.trim().is_empty())
                .map(str::parse)
                .transpose()?,
        })
    }
}
