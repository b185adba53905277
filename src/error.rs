use thiserror::Error;

/// Failure of a single backend call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with status {status}")]
    Status { status: u16 },

    #[error("Expected a JSON response, got '{content_type}'")]
    NotJson { content_type: String },

    #[error("Unexpected response shape: {0}")]
    Decode(String),
}

impl ApiError {
    /// True when the server answered but the answer was rejected before decoding.
    pub fn is_rejected_response(&self) -> bool {
        matches!(self, ApiError::Status { .. } | ApiError::NotJson { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_includes_code() {
        let err = ApiError::Status { status: 500 };
        assert_eq!(err.to_string(), "Request failed with status 500");
    }

    #[test]
    fn test_rejected_response_classification() {
        assert!(ApiError::Status { status: 404 }.is_rejected_response());
        assert!(ApiError::NotJson {
            content_type: "text/html".into()
        }
        .is_rejected_response());
        assert!(!ApiError::Network("offline".into()).is_rejected_response());
        assert!(!ApiError::Decode("missing field".into()).is_rejected_response());
    }
}
