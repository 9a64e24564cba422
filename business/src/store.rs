//! The file list store: held records, filter intent, and page position.
//!
//! `FileStore` is the single source of truth for what the user currently
//! sees. It is an ordinary value owned by whoever drives the view; every
//! mutator returns `&mut Self` so intents can be chained.
//!
//! Two filtering tiers exist and a store uses exactly one of them:
//! - [`FilterMode::Client`]: the store holds the full candidate set and
//!   filters, sorts and paginates locally.
//! - [`FilterMode::Server`]: the store holds one server page; search, sort and
//!   date range travel as query parameters and only the sort is re-applied
//!   to the page locally.
//!
//! Held records form a client cache. Optimistic changes (`add_file`,
//! `delete_file`) are tracked until the next server snapshot, and a server
//! snapshot always replaces them.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::ListFilesResponse;
use crate::file::FileRecord;
use crate::filter::{FilterState, SortBy, SortOrder};
use crate::pagination::{
    DEFAULT_PER_PAGE, MAX_PER_PAGE, PaginationMetadata, PaginationState, clamp_page,
};
use crate::query::{BackendSearchParams, ListQuery};

/// Which tier filters, sorts and paginates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Fetch everything, derive locally.
    #[default]
    Client,
    /// Delegate to the service per request.
    Server,
}

impl FilterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Server => "server",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A local change not yet confirmed by a fresh server snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimisticChange {
    Added(String),
    Removed(String),
}

#[derive(Debug, Clone)]
pub struct FileStore {
    files: Vec<FileRecord>,
    filter: FilterState,
    pagination: Option<PaginationMetadata>,
    current_page: u32,
    items_per_page: u32,
    mode: FilterMode,
    version: u64,
    optimistic: Vec<OptimisticChange>,
    /// Records added since the last snapshot; left out of page counts.
    pending_adds: Vec<FileRecord>,
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(FilterMode::default())
    }
}

impl FileStore {
    pub fn new(mode: FilterMode) -> Self {
        Self {
            files: Vec::new(),
            filter: FilterState::default(),
            pagination: None,
            current_page: 1,
            items_per_page: DEFAULT_PER_PAGE,
            mode,
            version: 0,
            optimistic: Vec::new(),
            pending_adds: Vec::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn total_held(&self) -> usize {
        self.files.len()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Metadata of the last server page, as reported.
    pub fn pagination(&self) -> Option<&PaginationMetadata> {
        self.pagination.as_ref()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    /// Bumped on every change to the held records.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn optimistic_changes(&self) -> &[OptimisticChange] {
        &self.optimistic
    }

    pub fn has_optimistic_changes(&self) -> bool {
        !self.optimistic.is_empty()
    }

    // ------------------------------------------------------------------------
    // Held records
    // ------------------------------------------------------------------------

    /// Replaces the held records with a server snapshot.
    ///
    /// Duplicate names are kept as-is. Pending optimistic changes are dropped.
    pub fn set_files(&mut self, files: Vec<FileRecord>) -> &mut Self {
        if !self.optimistic.is_empty() {
            log::debug!(
                "Server snapshot replaces {} optimistic change(s)",
                self.optimistic.len()
            );
        }
        self.files = files;
        self.optimistic.clear();
        self.pending_adds.clear();
        self.touch()
    }

    /// Appends a record the service just confirmed (after upload).
    ///
    /// Pagination counts are left alone until the next fetch.
    pub fn add_file(&mut self, file: FileRecord) -> &mut Self {
        self.optimistic.push(OptimisticChange::Added(file.name.clone()));
        self.pending_adds.push(file.clone());
        self.files.push(file);
        self.touch()
    }

    /// Removes every record named `name`.
    pub fn delete_file(&mut self, name: &str) -> &mut Self {
        let before = self.files.len();
        self.files.retain(|f| f.name != name);
        self.pending_adds.retain(|f| f.name != name);

        if self.files.len() != before {
            self.optimistic.push(OptimisticChange::Removed(name.to_owned()));
            self.touch();
        }
        self
    }

    /// Applies an accepted list response: records and metadata together.
    pub fn apply_page(&mut self, response: ListFilesResponse) -> &mut Self {
        self.pagination = Some(response.pagination);
        self.set_files(response.files)
    }

    fn touch(&mut self) -> &mut Self {
        self.version += 1;
        self.reclamp()
    }

    // ------------------------------------------------------------------------
    // Filter intent (every change returns to page 1)
    // ------------------------------------------------------------------------

    pub fn set_search_term(&mut self, term: impl Into<String>) -> &mut Self {
        self.filter.search_term = term.into();
        self.reset_page()
    }

    pub fn set_sort_by(&mut self, sort_by: SortBy) -> &mut Self {
        self.filter.sort_by = sort_by;
        self.reset_page()
    }

    pub fn set_sort_order(&mut self, sort_order: SortOrder) -> &mut Self {
        self.filter.sort_order = sort_order;
        self.reset_page()
    }

    pub fn set_start_date(&mut self, date: Option<NaiveDate>) -> &mut Self {
        self.filter.start_date = date;
        self.reset_page()
    }

    pub fn set_end_date(&mut self, date: Option<NaiveDate>) -> &mut Self {
        self.filter.end_date = date;
        self.reset_page()
    }

    pub fn clear_date_range(&mut self) -> &mut Self {
        self.filter.start_date = None;
        self.filter.end_date = None;
        self.reset_page()
    }

    pub fn reset_search_and_sort(&mut self) -> &mut Self {
        self.filter.search_term.clear();
        self.filter.sort_by = SortBy::default();
        self.filter.sort_order = SortOrder::default();
        self.reset_page()
    }

    fn reset_page(&mut self) -> &mut Self {
        self.current_page = 1;
        self
    }

    // ------------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------------

    pub fn set_pagination(&mut self, pagination: Option<PaginationMetadata>) -> &mut Self {
        self.pagination = pagination;
        self.reclamp()
    }

    /// Sets the page size, clamped to `1..=MAX_PER_PAGE`, and returns to page 1.
    pub fn set_items_per_page(&mut self, items_per_page: u32) -> &mut Self {
        self.items_per_page = items_per_page.clamp(1, MAX_PER_PAGE);
        self.reset_page()
    }

    /// Sets the page directly, clamped into the valid range.
    pub fn set_current_page(&mut self, page: u32) -> &mut Self {
        self.current_page = page;
        self.reclamp()
    }

    /// Moves to `page` when `1 <= page <= total_pages`; otherwise does nothing.
    pub fn go_to_page(&mut self, page: u32) -> &mut Self {
        let total_pages = self.pagination_state().total_pages;
        if (1..=total_pages).contains(&page) {
            self.current_page = page;
        } else {
            log::trace!("Ignoring go_to_page({page}), total pages {total_pages}");
        }
        self
    }

    pub fn go_to_next_page(&mut self) -> &mut Self {
        if self.pagination_state().has_next {
            self.current_page += 1;
        }
        self
    }

    pub fn go_to_prev_page(&mut self) -> &mut Self {
        if self.pagination_state().has_prev {
            self.current_page -= 1;
        }
        self
    }

    /// Keeps `current_page` within the known page count. Before the first
    /// server page arrives in server mode the count is unknown and only the
    /// lower bound applies.
    fn reclamp(&mut self) -> &mut Self {
        if self.mode == FilterMode::Server && self.pagination.is_none() {
            self.current_page = self.current_page.max(1);
            return self;
        }
        let total_pages = self.pagination_state().total_pages;
        self.current_page = clamp_page(self.current_page, total_pages);
        self
    }

    /// Page counts for the view, computed for the active tier.
    ///
    /// Client mode counts the filtered set; server mode counts what the
    /// service reported, falling back to the held records before the first
    /// response. Records added since the last snapshot are not counted.
    pub fn pagination_state(&self) -> PaginationState {
        let total_files = match (self.mode, &self.pagination) {
            (FilterMode::Client, _) => {
                let matching = |files: &[FileRecord]| {
                    files.iter().filter(|f| self.filter.matches(f)).count()
                };
                matching(&self.files).saturating_sub(matching(&self.pending_adds)) as u64
            }
            (FilterMode::Server, Some(meta)) => meta.total_files,
            (FilterMode::Server, None) => {
                self.files.len().saturating_sub(self.pending_adds.len()) as u64
            }
        };
        PaginationState::new(self.current_page, self.items_per_page, total_files)
    }

    // ------------------------------------------------------------------------
    // Derivations
    // ------------------------------------------------------------------------

    /// Held records filtered by search and date range, then sorted.
    pub fn filtered_and_sorted_files(&self) -> Vec<FileRecord> {
        self.filter.apply(&self.files)
    }

    /// The records the view should render for the current page.
    pub fn visible_files(&self) -> Vec<FileRecord> {
        match self.mode {
            FilterMode::Client => {
                let all = self.filtered_and_sorted_files();
                self.pagination_state().slice(&all).to_vec()
            }
            FilterMode::Server => {
                let mut page = self.files.clone();
                self.filter.sort(&mut page);
                page
            }
        }
    }

    pub fn backend_search_params(&self) -> BackendSearchParams {
        BackendSearchParams::from_filter(&self.filter)
    }

    /// Query for the next fetch.
    ///
    /// Server mode asks for the current page with all filter parameters.
    /// Client mode asks for the first page of the unfiltered set at the
    /// largest page size; the remaining pages are walked from there.
    pub fn list_query(&self) -> ListQuery {
        match self.mode {
            FilterMode::Client => ListQuery::page(1, MAX_PER_PAGE),
            FilterMode::Server => ListQuery::page(self.current_page, self.items_per_page)
                .with_params(self.backend_search_params()),
        }
    }
}
