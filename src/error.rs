use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("preset index {index} out of range for {len} orientations")]
    PresetOutOfRange { index: usize, len: usize },
    #[error("an orientation set needs at least one preset")]
    EmptyOrientationSet,
    #[error("preset `{name}` is not a valid rotation")]
    DegenerateRotation { name: String },
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
