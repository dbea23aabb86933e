use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error("Directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl From<reqwest::Error> for PreferencesError {
    fn from(err: reqwest::Error) -> Self {
        PreferencesError::DirectoryUnavailable(err.to_string())
    }
}

pub type PreferencesResult<T> = Result<T, PreferencesError>;
