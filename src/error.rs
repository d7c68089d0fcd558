use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriggerError {
    #[error("Missing required environment variable(s): {0}")]
    MissingConfig(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed {endpoint} response (HTTP {status}): {source}")]
    MalformedResponse {
        endpoint: &'static str,
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("API request failed with status {status}: {message}")]
    ApiError { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, TriggerError>;
