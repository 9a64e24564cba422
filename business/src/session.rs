//! Fetch lifecycle around a [`FileStore`].
//!
//! A refresh is split in two halves so that several fetches may be in flight
//! at once: [`FileSession::begin_refresh`] issues a [`PendingFetch`] (and
//! cancels the one before it), the caller runs it, and
//! [`FileSession::finish_refresh`] applies the result only if nothing newer
//! has been applied in the meantime.

use fileshelf_states::{LatestOnly, RequestHandle, RequestId};

use crate::api::{FileApi, HealthStatus, ListFilesResponse};
use crate::config::BusinessConfig;
use crate::error::ApiError;
use crate::file::{Attachment, FileRecord};
use crate::pagination::PaginationMetadata;
use crate::query::ListQuery;
use crate::store::{FileStore, FilterMode};

/// Upper bound on pages walked when collecting the full set.
const MAX_FULL_SET_PAGES: u32 = 10_000;

/// Status of the list fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// What happened to a finished fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The response replaced the held records.
    Applied { files: usize },
    /// A newer fetch made this one irrelevant.
    Discarded(fileshelf_states::Error),
}

#[derive(Debug, Clone)]
enum FetchPlan {
    /// One server page, filters included.
    Page(ListQuery),
    /// Every page of the unfiltered set, starting from this query.
    FullSet(ListQuery),
}

/// A list fetch issued by [`FileSession::begin_refresh`].
#[derive(Debug, Clone)]
pub struct PendingFetch {
    handle: RequestHandle,
    plan: FetchPlan,
}

impl PendingFetch {
    pub fn id(&self) -> RequestId {
        self.handle.id()
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_cancelled()
    }

    /// Performs the fetch, resolving to [`ApiError::Cancelled`] as soon as a
    /// newer fetch supersedes it.
    pub async fn run(&self, api: &FileApi) -> Result<ListFilesResponse, ApiError> {
        let token = self.handle.cancellation_token();

        tokio::select! {
            biased;
            () = token.cancelled() => Err(ApiError::Cancelled),
            result = self.fetch(api) => result,
        }
    }

    async fn fetch(&self, api: &FileApi) -> Result<ListFilesResponse, ApiError> {
        match &self.plan {
            FetchPlan::Page(query) => api.list_files(query).await,
            FetchPlan::FullSet(query) => fetch_full_set(api, query).await,
        }
    }
}

async fn fetch_full_set(api: &FileApi, first: &ListQuery) -> Result<ListFilesResponse, ApiError> {
    let mut query = first.clone();
    let mut page = query.page.unwrap_or(1);
    let mut files = Vec::new();

    let last = loop {
        query.page = Some(page);
        let response = api.list_files(&query).await?;
        let received = response.files.len();
        files.extend(response.files);

        let meta = response.pagination;
        if received == 0 || !meta.has_next() || page >= meta.total_pages || page >= MAX_FULL_SET_PAGES {
            break meta;
        }
        page += 1;
    };

    log::debug!("Collected {} file(s) over {page} page(s)", files.len());

    Ok(ListFilesResponse {
        pagination: PaginationMetadata {
            page: 1,
            per_page: last.per_page,
            total_files: last.total_files.max(files.len() as u64),
            total_pages: 1,
            has_next: Some(false),
            has_prev: Some(false),
        },
        files,
    })
}

/// A store bound to the service it mirrors.
#[derive(Debug)]
pub struct FileSession {
    api: FileApi,
    store: FileStore,
    sequencer: LatestOnly,
    status: FetchStatus,
    /// Status to fall back to once nothing is in flight any more.
    settled: FetchStatus,
}

impl FileSession {
    pub fn new(config: BusinessConfig) -> Self {
        let mut store = FileStore::new(config.filter_mode);
        store.set_items_per_page(config.items_per_page);

        Self {
            api: FileApi::new(config),
            store,
            sequencer: LatestOnly::new(),
            status: FetchStatus::Idle,
            settled: FetchStatus::Idle,
        }
    }

    pub fn api(&self) -> &FileApi {
        &self.api
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Mutable access for filter and page intents.
    pub fn store_mut(&mut self) -> &mut FileStore {
        &mut self.store
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    /// Issues a fetch for the store's current intent, cancelling any fetch
    /// still in flight.
    pub fn begin_refresh(&mut self) -> PendingFetch {
        let handle = self.sequencer.begin();
        let query = self.store.list_query();
        let plan = match self.store.mode() {
            FilterMode::Client => FetchPlan::FullSet(query),
            FilterMode::Server => FetchPlan::Page(query),
        };

        log::debug!("Refresh {} started ({:?})", handle.id(), self.store.mode());
        self.status = FetchStatus::Loading;
        PendingFetch { handle, plan }
    }

    /// Applies `result` if `pending` is still the latest fetch.
    ///
    /// Errors from a superseded fetch are swallowed into
    /// [`RefreshOutcome::Discarded`]; errors from the current one leave the
    /// held records untouched and set [`FetchStatus::Error`].
    pub fn finish_refresh(
        &mut self,
        pending: &PendingFetch,
        result: Result<ListFilesResponse, ApiError>,
    ) -> Result<RefreshOutcome, ApiError> {
        let response = match result {
            Ok(response) => response,
            Err(err) => {
                self.sequencer.abandon(&pending.handle);
                if pending.is_cancelled() || err == ApiError::Cancelled {
                    log::debug!("Refresh {} cancelled", pending.id());
                    self.settle_if_idle();
                    return Ok(RefreshOutcome::Discarded(
                        fileshelf_states::Error::superseded(pending.id()),
                    ));
                }
                log::warn!("Refresh {} failed: {err}", pending.id());
                self.set_settled(FetchStatus::Error(err.to_string()));
                return Err(err);
            }
        };

        match self.sequencer.accept(&pending.handle) {
            Ok(()) => {
                let files = response.files.len();
                self.store.apply_page(response);
                self.set_settled(FetchStatus::Loaded);
                log::debug!("Refresh {} applied {files} file(s)", pending.id());
                Ok(RefreshOutcome::Applied { files })
            }
            Err(reason) => {
                log::debug!("Dropping response: {reason}");
                self.settle_if_idle();
                Ok(RefreshOutcome::Discarded(reason))
            }
        }
    }

    /// Cancels the fetch in flight, if any, and restores the last settled
    /// status. A late `finish_refresh` for it is discarded.
    pub fn cancel_refresh(&mut self) {
        self.sequencer.cancel_in_flight();
        self.settle_if_idle();
    }

    fn set_settled(&mut self, status: FetchStatus) {
        self.settled = status.clone();
        self.status = status;
    }

    fn settle_if_idle(&mut self) {
        if self.status.is_loading() && self.sequencer.in_flight().is_none() {
            self.status = self.settled.clone();
        }
    }

    /// Fetches and applies in one step.
    pub async fn refresh(&mut self) -> Result<RefreshOutcome, ApiError> {
        let pending = self.begin_refresh();
        let result = pending.run(&self.api).await;
        self.finish_refresh(&pending, result)
    }

    /// Uploads one file and appends the confirmed record.
    pub async fn upload(&mut self, attachment: Attachment) -> Result<FileRecord, ApiError> {
        let response = self.api.upload_file(attachment).await?;
        log::info!("{}: {}", response.file.name, response.message);
        self.store.add_file(response.file.clone());
        Ok(response.file)
    }

    /// Deletes one file on the service, then every held record of that name.
    pub async fn delete(&mut self, name: &str) -> Result<(), ApiError> {
        self.api.delete_file(name).await?;
        self.store.delete_file(name);
        Ok(())
    }

    pub async fn download(&self, name: &str) -> Result<Vec<u8>, ApiError> {
        self.api.download_file(name).await
    }

    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.api.health().await
    }
}
