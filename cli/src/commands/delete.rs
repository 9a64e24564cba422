//! Delete file command.

use anyhow::{Context as _, Result, bail};
use fileshelf_business::FileSession;
use inquire::Confirm;
use tracing::instrument;

use crate::output::Output;

#[instrument(skip_all, name = "delete", fields(name, yes))]
pub async fn run_delete(session: &mut FileSession, name: &str, yes: bool) -> Result<()> {
    let out = Output::new();

    if !yes {
        let confirmed = Confirm::new(&format!("Delete {name}?"))
            .with_default(false)
            .prompt_skippable()
            .context("Failed to read confirmation")?
            .unwrap_or(false);

        if !confirmed {
            out.dim("Cancelled.");
            return Ok(());
        }
    }

    if let Err(e) = session.delete(name).await {
        if e.is_not_found() {
            bail!("No file named {name} on the service");
        }
        return Err(e).with_context(|| format!("Failed to delete {name}"));
    }

    out.success(format!("Deleted {name}"));
    Ok(())
}
