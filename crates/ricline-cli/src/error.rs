use thiserror::Error;

/// CLI-level error categories.
///
/// Every variant exits with status 1; the process draws no finer
/// distinction than "the run failed".
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ricline_core::ValidationError),

    #[error(transparent)]
    Config(#[from] ricline_core::ConfigError),

    #[error(transparent)]
    Access(#[from] ricline_core::AccessError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
