//! Session construction from the config file and command-line flags.

use anyhow::Result;
use fileshelf_business::{BusinessConfig, FileSession};
use tracing::instrument;

use crate::config::{Config, Overrides};

/// Loads the config file and layers `overrides` on top of it.
#[instrument(skip_all, name = "load_config")]
pub fn load_business_config(overrides: &Overrides) -> Result<BusinessConfig> {
    let config = Config::load()?;
    let business = config.business_config(overrides);
    log::debug!(
        "Using {} ({} filtering, {} per page)",
        business.api_base_url,
        business.filter_mode,
        business.items_per_page
    );
    Ok(business)
}

pub fn build_session(overrides: &Overrides) -> Result<FileSession> {
    Ok(FileSession::new(load_business_config(overrides)?))
}
