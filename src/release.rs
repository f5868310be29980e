use crate::api_structs::{ApiError, UploadedFile};
use crate::{config::ClientConfig, error::ReleaseError, metadata::Metadata, output, ReleaseLog};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Duration;

pub const UPLOAD_ENDPOINT: &str = "/api/projects/:projectId/upload-file";

pub struct ReleaseService<'a> {
    config: &'a ClientConfig,
    timeout: Duration,
    log: &'a dyn ReleaseLog,
}

impl<'a> ReleaseService<'a> {
    pub fn new(config: &'a ClientConfig, timeout: Duration, log: &'a dyn ReleaseLog) -> Self {
        ReleaseService {
            config,
            timeout,
            log,
        }
    }

    /// Uploads `file` together with its metadata as one multipart request.
    pub async fn upload(
        &self,
        metadata: &Metadata,
        file: &Path,
    ) -> Result<UploadedFile, ReleaseError> {
        let byte_buf = std::fs::read(file).map_err(|source| ReleaseError::FileRead {
            path: file.to_path_buf(),
            source,
        })?;

        output!(
            self.log,
            "Read addon file '{}' ({} bytes)",
            file.to_string_lossy(),
            byte_buf.len()
        );

        let form = Self::multipart_form(metadata, byte_buf)?;
        let uri = self.config.endpoint_uri(UPLOAD_ENDPOINT)?;

        output!(
            self.log,
            "Uploading '{}' to project {} at {}",
            metadata.display_name,
            self.config.project_id(),
            uri
        );

        // Dropped on return, whichever way the request goes
        let client = self.config.http_client(self.timeout)?;
        let response = client.post(uri).multipart(form).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        let uploaded = interpret_response(status, &body)?;

        output!(self.log, "Upload successful, file id {}", uploaded.id);

        Ok(uploaded)
    }

    fn multipart_form(metadata: &Metadata, byte_buf: Vec<u8>) -> Result<Form, ReleaseError> {
        let json = serde_json::to_string(metadata).map_err(ReleaseError::Serialization)?;
        let file_part = Part::bytes(byte_buf)
            .file_name(metadata.display_name.clone())
            .mime_str("application/octet-stream")
            .map_err(ReleaseError::MultipartBody)?;

        Ok(Form::new()
            .part("metadata", Part::text(json))
            .part("file", file_part))
    }
}

/// Classifies an upload response by status code and parses the matching body shape.
pub fn interpret_response(status: u16, body: &str) -> Result<UploadedFile, ReleaseError> {
    if (200..300).contains(&status) {
        serde_json::from_str::<UploadedFile>(body).map_err(ReleaseError::MalformedResponse)
    } else {
        let api_error = serde_json::from_str::<ApiError>(body).map_err(|source| {
            ReleaseError::MalformedErrorResponse {
                status,
                body: body.to_string(),
                source,
            }
        })?;

        Err(ReleaseError::UploadFailed {
            status,
            code: api_error.error_code,
            message: api_error.error_message,
        })
    }
}
