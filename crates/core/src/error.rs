use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum PowerError {
    #[error("config error: {0}")]
    Config(String),

    #[error("device provider error: {0}")]
    Provider(String),

    #[error("notification error: {0}")]
    Notify(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = PowerError> = std::result::Result<T, E>;
