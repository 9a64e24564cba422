//! Upload files command.

use std::path::PathBuf;

use anyhow::{Result, bail};
use fileshelf_business::{FileRecord, FileSession};
use tracing::instrument;

use crate::output::Output;
use crate::utils::attachment_from_path;

/// Uploads `files` one after another.
///
/// A failure does not stop the remaining uploads; the command fails at the
/// end if any file was not uploaded.
#[instrument(skip_all, name = "upload", fields(file_count = files.len()))]
pub async fn run_upload(session: &mut FileSession, files: Vec<PathBuf>) -> Result<()> {
    let out = Output::new();
    if files.len() > 1 {
        out.info(format!(
            "Uploading {} files to {}",
            files.len(),
            session.api().config().api_base_url
        ));
    }
    let (uploaded, failed) = upload_all(session, &out, files).await;

    if failed > 0 {
        bail!("{failed} of {} upload(s) failed", uploaded.len() + failed);
    }
    Ok(())
}

pub async fn upload_all(
    session: &mut FileSession,
    out: &Output,
    files: Vec<PathBuf>,
) -> (Vec<FileRecord>, usize) {
    let mut uploaded = Vec::new();
    let mut failed = 0;

    for path in files {
        let attachment = match attachment_from_path(&path) {
            Ok(attachment) => attachment,
            Err(e) => {
                out.error(format!("{e:#}"));
                failed += 1;
                continue;
            }
        };

        let filename = attachment.filename.clone();
        match session.upload(attachment).await {
            Ok(record) => {
                out.success(format!("Uploaded {} ({})", record.name, record.size_display()));
                uploaded.push(record);
            }
            Err(e) => {
                out.error(format!("Failed to upload {filename}: {e}"));
                failed += 1;
            }
        }
    }

    (uploaded, failed)
}

#[cfg(test)]
mod tests {
    use fileshelf_business::BusinessConfig;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn test_upload_all_continues_after_failure() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let good = dir.path().join("good.txt");
        let taken = dir.path().join("taken.txt");
        std::fs::write(&good, "good").expect("Should write");
        std::fs::write(&taken, "taken").expect("Should write");

        Mock::given(method("POST"))
            .and(path("/api/files"))
            .and(body_string_contains(r#"filename="good.txt""#))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "File uploaded successfully",
                "file": {"name": "good.txt", "size": 4, "last_modified": "2024-01-01T00:00:00", "type": ".txt"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/files"))
            .and(body_string_contains(r#"filename="taken.txt""#))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "error": {"code": "FILE_EXISTS", "message": "File already exists"}
            })))
            .mount(&server)
            .await;

        let mut session = FileSession::new(BusinessConfig::new(server.uri()));
        let (uploaded, failed) = upload_all(
            &mut session,
            &Output::new(),
            vec![taken, dir.path().join("missing.txt"), good],
        )
        .await;

        assert_eq!(failed, 2);
        assert_eq!(uploaded.len(), 1);
        assert_eq!(session.store().total_held(), 1);
    }
}
