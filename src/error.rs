use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Failed to open source '{}': {source}", path.display())]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date '{0}', expected MM/DD/YYYY")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, InventoryError>;
