//! Service health check command.

use anyhow::{Context as _, Result, bail};
use fileshelf_business::FileSession;
use tracing::instrument;

use crate::output::Output;

#[instrument(skip_all, name = "health")]
pub async fn run_health(session: &FileSession) -> Result<()> {
    let out = Output::new();
    let url = session.api().config().health_url();

    let health = session
        .health()
        .await
        .with_context(|| format!("Service at {url} is unreachable"))?;

    if !health.is_healthy() {
        bail!("Service reported status '{}'", health.status);
    }

    match health.timestamp {
        Some(ts) => out.success(format!("Service is healthy (server time {ts})")),
        None => out.success("Service is healthy"),
    }
    Ok(())
}
