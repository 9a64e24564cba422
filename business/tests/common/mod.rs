use chrono::{NaiveDate, NaiveDateTime};
use fileshelf_business::{BusinessConfig, FileRecord, FilterMode};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, s))
        .expect("valid timestamp")
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn record(name: &str, size: u64, last_modified: NaiveDateTime) -> FileRecord {
    let file_type = name
        .rsplit_once('.')
        .map(|(_, ext)| format!(".{}", ext.to_lowercase()))
        .unwrap_or_else(|| "no-extension".to_owned());
    FileRecord::new(name, size, last_modified, file_type)
}

/// `n` records named `file00.txt`, `file01.txt`, ... all modified on 2024-01-01.
#[allow(unused)]
pub fn numbered(n: usize) -> Vec<FileRecord> {
    (0..n)
        .map(|i| record(&format!("file{i:02}.txt"), i as u64, at(2024, 1, 1, 0, 0, 0)))
        .collect()
}

#[allow(unused)]
pub fn names(files: &[FileRecord]) -> Vec<&str> {
    files.iter().map(|f| f.name.as_str()).collect()
}

#[allow(unused)]
pub fn config_for(server: &MockServer, mode: FilterMode) -> BusinessConfig {
    BusinessConfig::new(server.uri()).with_filter_mode(mode)
}

/// JSON body of one `GET /api/files` page.
#[allow(unused)]
pub fn page_body(files: &[FileRecord], page: u32, per_page: u32, total_files: u64) -> Value {
    let total_pages = total_files.div_ceil(u64::from(per_page)).max(1);
    json!({
        "files": files,
        "pagination": {
            "page": page,
            "per_page": per_page,
            "total_files": total_files,
            "total_pages": total_pages,
        }
    })
}

#[allow(unused)]
pub fn error_body(code: &str, message: &str) -> Value {
    json!({ "error": { "code": code, "message": message } })
}

#[allow(unused)]
pub async fn mount_list(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}
