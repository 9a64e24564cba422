//! Download file command.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use fileshelf_business::FileSession;
use tracing::instrument;

use crate::output::Output;
use crate::utils::download_target;

/// Downloads `name` and writes it to disk, returning the written path.
pub async fn download_to(
    session: &FileSession,
    name: &str,
    output: Option<&Path>,
    force: bool,
) -> Result<PathBuf> {
    let target = download_target(name, output, force)?;

    let bytes = session
        .download(name)
        .await
        .with_context(|| format!("Failed to download {name}"))?;

    std::fs::write(&target, &bytes)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    Ok(target)
}

#[instrument(skip_all, name = "download", fields(name))]
pub async fn run_download(
    session: &FileSession,
    name: &str,
    output: Option<&Path>,
    force: bool,
) -> Result<()> {
    let out = Output::new();
    let target = download_to(session, name, output, force).await?;
    out.success(format!("Saved {name} to {}", target.display()));
    Ok(())
}
