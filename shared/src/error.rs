use thiserror::Error;

pub const UNSUPPORTED_FILE_MESSAGE: &str =
    "Unsupported file type. Please upload hyperspectral (ENVI/TIFF), sensor (CSV), or image files.";

/// Every failure a client operation can surface. None of them are retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("{}", UNSUPPORTED_FILE_MESSAGE)]
    UnsupportedFileType { filename: String },

    #[error("{0}")]
    UploadFailed(String),

    #[error("Failed to load analysis for ID: {upload_id}")]
    AnalysisUnavailable { upload_id: String },

    #[error("Result not found for ID: {0}")]
    ResultNotFound(String),

    #[error("{detail} (HTTP {status})")]
    Api { status: u16, detail: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::ResultNotFound(_))
            || matches!(self, ClientError::Api { status: 404, .. })
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_file_type_names_accepted_formats() {
        let err = ClientError::UnsupportedFileType {
            filename: "notes.txt".into(),
        };
        let display = err.to_string();
        assert!(display.contains("ENVI/TIFF"));
        assert!(display.contains("CSV"));
        assert!(display.contains("image"));
    }

    #[test]
    fn analysis_unavailable_carries_upload_id() {
        let err = ClientError::AnalysisUnavailable {
            upload_id: "abc-123".into(),
        };
        assert_eq!(err.to_string(), "Failed to load analysis for ID: abc-123");
    }

    #[test]
    fn not_found_covers_both_variants() {
        assert!(ClientError::ResultNotFound("x".into()).is_not_found());
        assert!(
            ClientError::Api {
                status: 404,
                detail: "missing".into()
            }
            .is_not_found()
        );
        assert!(!ClientError::Network("offline".into()).is_not_found());
    }

    #[test]
    fn json_error_becomes_decode() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ClientError = json_error.into();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
