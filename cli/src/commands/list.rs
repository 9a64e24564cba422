//! List files command.

use anyhow::{Context as _, Result, bail};
use fileshelf_business::{FileRecord, FileSession, FileStore, FilterMode, RefreshOutcome};
use inquire::Select;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::instrument;

use crate::cli::ListArgs;
use crate::output::Output;
use crate::utils::truncate_str;

const NEXT: &str = "Next page";
const PREV: &str = "Previous page";
const QUIT: &str = "Quit";

#[derive(Tabled)]
struct FileRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Type")]
    file_type: String,
    #[tabled(rename = "Modified")]
    modified: String,
}

impl From<&FileRecord> for FileRow {
    fn from(file: &FileRecord) -> Self {
        Self {
            name: truncate_str(&file.name, 40),
            size: file.size_display(),
            file_type: file.file_type.clone(),
            modified: file.last_modified.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

pub fn render_table(files: &[FileRecord]) -> String {
    let rows: Vec<FileRow> = files.iter().map(FileRow::from).collect();
    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Copies the command-line filter intent into the store.
pub fn apply_args(store: &mut FileStore, args: &ListArgs) -> Result<()> {
    store
        .set_search_term(args.search.clone().unwrap_or_default())
        .set_sort_by(args.sort_by)
        .set_sort_order(args.order)
        .set_start_date(args.from)
        .set_end_date(args.to);

    if store.filter().has_inverted_range() {
        bail!("--from must not be after --to");
    }
    Ok(())
}

/// Fetches the listing and positions it on `page`.
///
/// In server mode a page past the end is corrected to the last page and
/// fetched again.
#[instrument(skip_all, name = "load_page", fields(page))]
pub async fn load_page(session: &mut FileSession, page: u32) -> Result<()> {
    match session.store().mode() {
        FilterMode::Client => {
            refresh(session).await?;
            session.store_mut().set_current_page(page);
        }
        FilterMode::Server => {
            session.store_mut().set_current_page(page);
            refresh(session).await?;

            let reported = session.store().pagination().map(|p| p.page);
            if reported.is_some_and(|p| p != session.store().current_page()) {
                log::debug!("Page {page} is out of range, fetching the last page");
                refresh(session).await?;
            }
        }
    }
    Ok(())
}

async fn refresh(session: &mut FileSession) -> Result<()> {
    match session.refresh().await.context("Failed to fetch file list")? {
        RefreshOutcome::Applied { files } => log::debug!("Received {files} file(s)"),
        RefreshOutcome::Discarded(reason) => log::debug!("Refresh discarded: {reason}"),
    }
    Ok(())
}

fn render(out: &Output, store: &FileStore) {
    let files = store.visible_files();
    if files.is_empty() {
        out.dim("No files found.");
        return;
    }

    out.newline();
    out.print(render_table(&files));
    out.page_summary(&store.pagination_state());
}

#[instrument(skip_all, name = "list", fields(mode = ?session.store().mode(), page = args.page))]
pub async fn run_list(session: &mut FileSession, args: &ListArgs) -> Result<()> {
    let out = Output::new();

    apply_args(session.store_mut(), args)?;
    load_page(session, args.page).await?;

    let shown = session.store().current_page();
    if shown != args.page {
        out.warning(format!("Page {} is out of range, showing page {shown}", args.page));
    }
    render(&out, session.store());

    if args.interactive {
        browse(&out, session).await?;
    }
    Ok(())
}

/// Prompts for next/previous page until the user quits.
async fn browse(out: &Output, session: &mut FileSession) -> Result<()> {
    loop {
        let state = session.store().pagination_state();
        let mut options = Vec::new();
        if state.has_next {
            options.push(NEXT);
        }
        if state.has_prev {
            options.push(PREV);
        }
        if options.is_empty() {
            return Ok(());
        }
        options.push(QUIT);

        let choice = Select::new("Navigate:", options)
            .prompt_skippable()
            .context("Failed to read selection")?;

        let store = session.store_mut();
        match choice {
            Some(NEXT) => store.go_to_next_page(),
            Some(PREV) => store.go_to_prev_page(),
            _ => return Ok(()),
        };

        if store.mode() == FilterMode::Server {
            let page = store.current_page();
            load_page(session, page).await?;
        }
        render(out, session.store());
    }
}
