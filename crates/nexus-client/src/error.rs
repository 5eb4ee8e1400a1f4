use nexus_store::StoreError;
use thiserror::Error;

/// Errors surfaced by the application state layer.
///
/// Domain outcomes (unknown email, duplicate registration, full event) are
/// not errors; they come back as values. Only storage and configuration
/// failures end up here.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
