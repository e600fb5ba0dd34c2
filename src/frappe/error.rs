use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrappeError {
    #[error("Frappe API error: {0}")]
    ApiError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl FrappeError {
    pub fn from_status_code(status: u16, message: String) -> Self {
        match status {
            401 | 403 => FrappeError::AuthenticationError(message),
            404 => FrappeError::NotFound(message),
            // Frappe raises ValidationError as 417
            400 | 417 | 422 => FrappeError::ValidationError(message),
            _ => FrappeError::ApiError(format!("HTTP {}: {}", status, message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_code_401() {
        let error = FrappeError::from_status_code(401, "Unauthorized".to_string());
        match error {
            FrappeError::AuthenticationError(msg) => assert_eq!(msg, "Unauthorized"),
            _ => panic!("Expected AuthenticationError"),
        }
    }

    #[test]
    fn test_from_status_code_403() {
        let error = FrappeError::from_status_code(403, "Forbidden".to_string());
        assert!(matches!(error, FrappeError::AuthenticationError(_)));
    }

    #[test]
    fn test_from_status_code_404() {
        let error = FrappeError::from_status_code(404, "Not found".to_string());
        match error {
            FrappeError::NotFound(msg) => assert_eq!(msg, "Not found"),
            _ => panic!("Expected NotFound"),
        }
    }

    #[test]
    fn test_from_status_code_417() {
        let error = FrappeError::from_status_code(417, "Expectation Failed".to_string());
        assert!(matches!(error, FrappeError::ValidationError(_)));
    }

    #[test]
    fn test_from_status_code_500() {
        let error = FrappeError::from_status_code(500, "Server error".to_string());
        match error {
            FrappeError::ApiError(msg) => assert!(msg.contains("500") && msg.contains("Server error")),
            _ => panic!("Expected ApiError"),
        }
    }
}
