use serde::Deserialize;

/// Success body of an upload; any other fields are ignored
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct UploadedFile {
    pub id: u64,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(rename = "errorCode")]
    pub error_code: i64,
    #[serde(rename = "errorMessage")]
    pub error_message: String,
}
