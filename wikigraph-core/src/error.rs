use thiserror::Error;
use wikigraph_dataset::LoadError;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Unknown report format: {0}")]
    UnknownFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;
