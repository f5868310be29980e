use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a release upload.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Client is in invalid state, {field} {reason}")]
    InvalidClientState {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Missing required parameter {0}")]
    MissingRequiredParameter(&'static str),

    #[error("Invalid parameter")]
    InvalidParameter(#[source] clap::Error),

    #[error("{message}")]
    CredentialResolution {
        message: String,
        #[source]
        source: Option<easy_error::Error>,
    },

    #[error("Failed to prepare endpoint URI '{uri}': {reason}")]
    UriConstruction { uri: String, reason: String },

    #[error("Unable to read file '{}'", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to serialize release metadata")]
    Serialization(#[source] serde_json::Error),

    #[error("Unable to build multipart body")]
    MultipartBody(#[source] reqwest::Error),

    #[error("Upload request failed")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to create release ({status}, error code {code}) - reason: {message}")]
    UploadFailed {
        status: u16,
        code: i64,
        message: String,
    },

    #[error("Upload succeeded but the response could not be parsed")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("Upload failed with status {status} and an unparseable error body: {body}")]
    MalformedErrorResponse {
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ReleaseError {
    pub(crate) fn empty(field: &'static str) -> Self {
        ReleaseError::InvalidClientState {
            field,
            reason: "must not be empty",
        }
    }

    pub(crate) fn credentials(message: impl Into<String>) -> Self {
        ReleaseError::CredentialResolution {
            message: message.into(),
            source: None,
        }
    }
}
