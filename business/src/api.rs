//! Client for the file service REST API.
//!
//! Every method issues exactly one request and maps non-2xx answers to
//! [`ApiError::Server`] with the service's own message when it sent one.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::BusinessConfig;
use crate::error::ApiError;
use crate::file::{Attachment, FileRecord};
use crate::http::{Client, FormFile, Response};
use crate::pagination::PaginationMetadata;
use crate::query::ListQuery;

/// Multipart field the service reads the upload from.
const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilesResponse {
    pub files: Vec<FileRecord>,
    pub pagination: PaginationMetadata,
}

/// Body of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub file: FileRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, with = "optional_timestamp")]
    pub timestamp: Option<NaiveDateTime>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

mod optional_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize as _, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => s.collect_str(&ts.format("%Y-%m-%dT%H:%M:%S%.f")),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.as_deref().and_then(crate::file::parse_timestamp))
    }
}

#[derive(Debug, Clone)]
pub struct FileApi {
    config: BusinessConfig,
}

impl FileApi {
    pub fn new(config: BusinessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BusinessConfig {
        &self.config
    }

    /// `GET /api/files` with the query's parameters.
    pub async fn list_files(&self, query: &ListQuery) -> Result<ListFilesResponse, ApiError> {
        let pairs = query.to_pairs();
        log::debug!("Listing files with {pairs:?}");

        let response = Client::get(self.config.files_url())
            .query(pairs)
            .timeout(self.config.timeout())
            .send()
            .await?;

        let body: ListFilesResponse = decode(&response, "Failed to list files")?;
        log::debug!(
            "Listed {} file(s), page {}/{}",
            body.files.len(),
            body.pagination.page,
            body.pagination.total_pages
        );
        Ok(body)
    }

    /// `POST /api/files` as `multipart/form-data`.
    pub async fn upload_file(&self, attachment: Attachment) -> Result<UploadResponse, ApiError> {
        log::debug!(
            "Uploading {} ({} bytes, {})",
            attachment.filename,
            attachment.data.len(),
            attachment.mime_type
        );

        let response = Client::post(self.config.files_url())
            .multipart(FormFile {
                field: UPLOAD_FIELD.to_owned(),
                filename: attachment.filename,
                mime_type: attachment.mime_type,
                data: attachment.data,
            })
            .timeout(self.config.timeout())
            .send()
            .await?;

        decode(&response, "Upload failed")
    }

    /// `DELETE /api/files/{name}`. Any 2xx counts as success; the body is ignored.
    pub async fn delete_file(&self, name: &str) -> Result<(), ApiError> {
        log::debug!("Deleting {name}");

        let response = Client::delete(self.config.file_url(name))
            .timeout(self.config.timeout())
            .send()
            .await?;

        ensure_success(&response, "Failed to delete file")
    }

    /// `GET /download/{name}`; returns the raw file bytes.
    pub async fn download_file(&self, name: &str) -> Result<Vec<u8>, ApiError> {
        log::debug!("Downloading {name}");

        let response = Client::get(self.config.download_url(name))
            .timeout(self.config.timeout())
            .send()
            .await?;

        ensure_success(&response, "Failed to download file")?;
        log::debug!(
            "Downloaded {name}: {} bytes ({})",
            response.body.len(),
            response.header("content-type").unwrap_or("unknown type")
        );
        Ok(response.body)
    }

    /// `GET /health`.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let response = Client::get(self.config.health_url())
            .timeout(self.config.timeout())
            .send()
            .await?;

        decode(&response, "Health check failed")
    }
}

fn ensure_success(response: &Response, fallback: &str) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let err = ApiError::from_response(response, fallback);
    log::warn!("Request failed with status {}: {err}", response.status);
    Err(err)
}

fn decode<T: serde::de::DeserializeOwned>(response: &Response, fallback: &str) -> Result<T, ApiError> {
    ensure_success(response, fallback)?;
    Ok(response.json()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_from_service_shape() {
        let body: ListFilesResponse = serde_json::from_str(
            r#"{
                "files": [{"name": "a.txt", "size": 3, "last_modified": "2024-01-01T00:00:00", "type": ".txt"}],
                "pagination": {"total_files": 1, "page": 1, "total_pages": 1, "per_page": 10}
            }"#,
        )
        .expect("Should deserialize");

        assert_eq!(body.files.len(), 1);
        assert_eq!(body.pagination.total_files, 1);
        assert!(!body.pagination.has_next());
    }

    #[test]
    fn test_health_status() {
        let health: HealthStatus =
            serde_json::from_str(r#"{"status": "healthy", "timestamp": "2024-06-01T08:30:00.123456"}"#)
                .expect("Should deserialize");
        assert!(health.is_healthy());
        assert!(health.timestamp.is_some());

        let bare: HealthStatus =
            serde_json::from_str(r#"{"status": "degraded"}"#).expect("Should deserialize");
        assert!(!bare.is_healthy());
        assert_eq!(bare.timestamp, None);
    }
}
