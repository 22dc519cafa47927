use thiserror::Error;

pub type Result<T> = std::result::Result<T, FindingError>;

#[derive(Debug, Error)]
pub enum FindingError {
    #[error("Finding client used before init")]
    NotInitialized,

    #[error("Invalid {kind} '{value}', expected one of: {}", valid.join(", "))]
    InvalidArgument {
        kind: &'static str,
        value: String,
        valid: Vec<&'static str>,
    },

    #[error("Empty response for operation {operation}")]
    EmptyResponse { operation: String },

    #[error("Service reported failure: {0}")]
    ServiceFailure(Box<serde_json::Value>),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FindingError {
    /// The normalized response body of a service-reported failure.
    pub fn failure_body(&self) -> Option<&serde_json::Value> {
        match self {
            FindingError::ServiceFailure(body) => Some(body),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Parse(err.to_string())
    }
}
