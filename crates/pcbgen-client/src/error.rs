use thiserror::Error;

/// Failure of a single HTTP call to the board server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("network error: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text shown to the user. Server errors are passed through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Why a user-triggered flow stopped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Please upload a board first.")]
    NoUpload,

    #[error("No files generated yet")]
    NothingGenerated,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl FlowError {
    pub fn is_precondition(&self) -> bool {
        matches!(self, FlowError::NoUpload | FlowError::NothingGenerated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_shows_raw_body() {
        let e = ApiError::Status {
            status: 500,
            body: "Error in rendering the generated board".into(),
        };
        assert_eq!(e.user_message(), "Error in rendering the generated board");
    }

    #[test]
    fn transport_error_is_described() {
        let e = ApiError::Transport("connection refused".into());
        assert_eq!(e.user_message(), "network error: connection refused");
    }

    #[test]
    fn precondition_messages() {
        assert_eq!(FlowError::NoUpload.to_string(), "Please upload a board first.");
        assert_eq!(FlowError::NothingGenerated.to_string(), "No files generated yet");
        assert!(FlowError::NoUpload.is_precondition());
        assert!(!FlowError::Api(ApiError::Decode("x".into())).is_precondition());
    }
}
