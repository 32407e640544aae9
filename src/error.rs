//! Error types and result aliases for vision-probe.
//!
//! Every fallible step returns [`Result<T>`]. Nothing below the entry point
//! prints or exits; `main` is the only place an error is reported and turned
//! into a process exit code via [`ProbeError::exit_code`].

use thiserror::Error;

/// Failure to recover a JSON object from the model's reply.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("no JSON object found")]
    NoJsonObject,

    #[error("JSON parsing error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("Request to Ollama failed: {0}")]
    NetworkError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected response format from Ollama: {0}")]
    ResponseShapeError(String),

    #[error("Model not available on server: {0}")]
    ModelNotAvailable(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Could not parse the model response: {0}")]
    Extraction(#[from] ExtractionError),
}

impl ProbeError {
    /// Process exit status for this error.
    ///
    /// A reply without recoverable JSON is informational (the raw text has
    /// already been shown), so it exits with 0. Everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProbeError::Extraction(_) => 0,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ProbeError::ConfigError("missing field `model`".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: missing field `model`");
    }

    #[test]
    fn test_network_error_display() {
        let err = ProbeError::NetworkError("HTTP 500 Internal Server Error".to_string());
        assert_eq!(err.to_string(), "Request to Ollama failed: HTTP 500 Internal Server Error");
    }

    #[test]
    fn test_no_json_object_display() {
        let err: ProbeError = ExtractionError::NoJsonObject.into();
        assert_eq!(err.to_string(), "Could not parse the model response: no JSON object found");
    }

    #[test]
    fn test_parse_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let err: ExtractionError = json_err.into();

        match err {
            ExtractionError::Parse(_) => {}
            _ => panic!("Expected Parse"),
        }
        assert!(err.to_string().starts_with("JSON parsing error: "));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: ProbeError = io_err.into();

        match err {
            ProbeError::IoError(_) => {}
            _ => panic!("Expected IoError"),
        }
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ProbeError::Extraction(ExtractionError::NoJsonObject).exit_code(), 0);
        assert_eq!(ProbeError::ConfigError("x".to_string()).exit_code(), 1);
        assert_eq!(ProbeError::ImageError("x".to_string()).exit_code(), 1);
        assert_eq!(ProbeError::NetworkError("x".to_string()).exit_code(), 1);
        assert_eq!(ProbeError::ResponseShapeError("x".to_string()).exit_code(), 1);
        assert_eq!(ProbeError::ModelNotAvailable("x".to_string()).exit_code(), 1);
    }

    #[test]
    fn test_error_debug() {
        let err = ProbeError::ImageError("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("ImageError"));
    }
}
