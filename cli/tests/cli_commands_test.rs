//! CLI integration tests using mock servers.
//!
//! These tests don't spawn the binary. They drive the same session workflows
//! the commands use against a mocked file service.

use fileshelf_business::{
    Attachment, BusinessConfig, FetchStatus, FileSession, FilterMode, SortBy, SortOrder,
};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

/// Test context for CLI integration tests.
struct CliTestContext {
    mock_server: MockServer,
    session: FileSession,
}

impl CliTestContext {
    async fn new(mode: FilterMode) -> Self {
        let mock_server = MockServer::start().await;
        let config = BusinessConfig::new(mock_server.uri()).with_filter_mode(mode);

        Self {
            session: FileSession::new(config),
            mock_server,
        }
    }

    async fn mount_listing(&self, files: Value, total: u64) {
        Mock::given(method("GET"))
            .and(path("/api/files"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "files": files,
                "pagination": {"page": 1, "per_page": 100, "total_files": total, "total_pages": 1}
            })))
            .mount(&self.mock_server)
            .await;
    }
}

fn file_json(name: &str, size: u64, modified: &str) -> Value {
    let ext = name
        .rsplit_once('.')
        .map(|(_, e)| format!(".{}", e.to_lowercase()))
        .unwrap_or_else(|| "no-extension".to_owned());
    json!({"name": name, "size": size, "last_modified": modified, "type": ext})
}

#[tokio::test]
async fn test_list_filters_and_sorts_locally() {
    let mut t = CliTestContext::new(FilterMode::Client).await;
    t.mount_listing(
        json!([
            file_json("Q1-report.pdf", 3000, "2024-03-31T10:00:00"),
            file_json("holiday.jpg", 900_000, "2024-07-01T08:00:00"),
            file_json("q2-report.pdf", 1000, "2024-06-30T10:00:00"),
            file_json("README", 10, "2023-12-01T00:00:00"),
        ]),
        4,
    )
    .await;

    t.session
        .store_mut()
        .set_search_term("report")
        .set_sort_by(SortBy::Size)
        .set_sort_order(SortOrder::Asc);
    t.session.refresh().await.expect("Should refresh");

    let names: Vec<String> = t
        .session
        .store()
        .visible_files()
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(names, vec!["q2-report.pdf", "Q1-report.pdf"]);
    assert_eq!(t.session.store().pagination_state().total_files, 2);
}

#[tokio::test]
async fn test_list_date_range_in_client_mode() {
    let mut t = CliTestContext::new(FilterMode::Client).await;
    t.mount_listing(
        json!([
            file_json("march.txt", 1, "2024-03-15T12:00:00"),
            file_json("april.txt", 1, "2024-04-01T00:00:00"),
            file_json("may.txt", 1, "2024-05-01T00:00:00"),
        ]),
        3,
    )
    .await;

    t.session
        .store_mut()
        .set_start_date(chrono::NaiveDate::from_ymd_opt(2024, 4, 1))
        .set_end_date(chrono::NaiveDate::from_ymd_opt(2024, 4, 30));
    t.session.refresh().await.expect("Should refresh");

    let visible = t.session.store().visible_files();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "april.txt");
}

#[tokio::test]
async fn test_server_mode_sends_filters() {
    let mut t = CliTestContext::new(FilterMode::Server).await;

    Mock::given(method("GET"))
        .and(path("/api/files"))
        .and(query_param("search", "report"))
        .and(query_param("sort_by", "modified"))
        .and(query_param("sort_order", "desc"))
        .and(query_param("date_from", "2024-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [file_json("report.pdf", 1, "2024-02-01T00:00:00")],
            "pagination": {"page": 1, "per_page": 10, "total_files": 1, "total_pages": 1}
        })))
        .expect(1)
        .mount(&t.mock_server)
        .await;

    t.session
        .store_mut()
        .set_search_term("report")
        .set_sort_by(SortBy::Modified)
        .set_sort_order(SortOrder::Desc)
        .set_start_date(chrono::NaiveDate::from_ymd_opt(2024, 1, 1));
    t.session.refresh().await.expect("Should refresh");

    assert_eq!(t.session.store().visible_files().len(), 1);
    assert_eq!(t.session.status(), &FetchStatus::Loaded);
}

#[tokio::test]
async fn test_upload_then_delete_round() {
    let mut t = CliTestContext::new(FilterMode::Client).await;
    t.mount_listing(json!([file_json("old.txt", 3, "2024-01-01T00:00:00")]), 1)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/files"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "File uploaded successfully",
            "file": file_json("new.txt", 5, "2024-02-01T00:00:00"),
        })))
        .expect(1)
        .mount(&t.mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/files/old.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "File deleted successfully",
            "file": file_json("old.txt", 3, "2024-01-01T00:00:00"),
        })))
        .expect(1)
        .mount(&t.mock_server)
        .await;

    t.session.refresh().await.expect("Should refresh");
    t.session
        .upload(Attachment {
            filename: "new.txt".to_owned(),
            mime_type: "text/plain".to_owned(),
            data: b"hello".to_vec(),
        })
        .await
        .expect("Should upload");
    t.session.delete("old.txt").await.expect("Should delete");

    let names: Vec<String> = t
        .session
        .store()
        .files()
        .iter()
        .map(|f| f.name.clone())
        .collect();
    assert_eq!(names, vec!["new.txt"]);
    assert!(t.session.store().has_optimistic_changes());

    // The next listing is authoritative again.
    t.session.refresh().await.expect("Should refresh");
    assert!(!t.session.store().has_optimistic_changes());
    assert_eq!(t.session.store().total_held(), 1);
}

#[tokio::test]
async fn test_health_check() {
    let t = CliTestContext::new(FilterMode::Client).await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "timestamp": "2024-06-01T08:30:00.000001"
        })))
        .mount(&t.mock_server)
        .await;

    let health = t.session.health().await.expect("Should respond");
    assert!(health.is_healthy());
}
