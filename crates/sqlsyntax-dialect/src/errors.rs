use thiserror::Error;

/// Errors raised while loading syntax options.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid options: {0}")]
    Invalid(String),
}
