use thiserror::Error;

#[derive(Error, Debug)]
pub enum AvailabilityError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("WebDriver command '{command}' failed: {message}")]
    WebDriver { command: String, message: String },

    #[error("Timed out after {secs}s waiting for {what}")]
    Timeout { what: String, secs: u64 },

    #[error("Invalid availability window: {reason}")]
    InvalidWindow { reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl AvailabilityError {
    /// True for the WebDriver "no such element" error, which waits treat as "not yet".
    pub fn is_no_such_element(&self) -> bool {
        matches!(self, Self::WebDriver { message, .. } if message.starts_with("no such element"))
    }
}

pub type Result<T> = std::result::Result<T, AvailabilityError>;
