use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArcadeError {
    /// Datos de niveles inválidos: fatal al arrancar.
    #[error("level data is invalid: {0}")]
    DataIntegrity(String),

    #[error("could not parse level data: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("could not read level file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("level index {index} is out of range (0..{count})")]
    OutOfRange { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, ArcadeError>;
