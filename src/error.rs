use std::{io, path::PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid opacity: {0}")]
    InvalidOpacity(String),

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Failed to decode {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode {}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid config {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read file")]
    Io(#[from] io::Error),

    #[error("failed to parse TOML")]
    Parse(#[from] toml::de::Error),

    #[error("quality must be between 1 and 100, got {0}")]
    Quality(u8),
}
