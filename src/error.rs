use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{source_name} returned status {status}")]
    Status {
        source_name: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("Unexpected response shape: {message}")]
    Schema { message: String },

    #[error("Malformed record skipped: {reason}")]
    MalformedRecord { reason: String },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ScrapeError {
    /// Message shown to the end user when the primary source fails.
    pub fn user_message(&self) -> String {
        match self {
            ScrapeError::Network(e) if e.is_timeout() => {
                "The job board did not respond in time. Please try again in a moment.".to_string()
            }
            ScrapeError::Network(_) => {
                "Could not reach the job board. Check your connection and try again.".to_string()
            }
            ScrapeError::Status { source_name, status } => format!(
                "{} is unavailable right now (status {}). Please try again later.",
                source_name,
                status.as_u16()
            ),
            _ => "Could not load job listings right now. Please try again later.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
