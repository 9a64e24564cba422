//! Show and edit the saved configuration.

use anyhow::{Context as _, Result};
use fileshelf_business::FilterMode;

use crate::cli::ConfigAction;
use crate::config::{Config, Overrides};
use crate::output::Output;

pub fn run_config(action: Option<&ConfigAction>, overrides: &Overrides) -> Result<()> {
    let out = Output::new();

    match action {
        None | Some(ConfigAction::Show) => {
            let path = Config::config_path()?;
            let effective = Config::load()?.business_config(overrides);

            out.header("Configuration");
            out.labeled("File", path.display());
            out.labeled("Service", &effective.api_base_url);
            out.labeled("Timeout", format!("{}s", effective.timeout_secs));
            out.labeled("Filtering", effective.filter_mode);
            out.labeled("Per page", effective.items_per_page);
        }
        Some(ConfigAction::SetUrl { url }) => {
            let mut config = Config::load()?;
            config.service.api_url = Some(url.trim_end_matches('/').to_owned());
            let path = config.save().context("Failed to save configuration")?;
            out.success(format!("Saved service URL to {}", path.display()));
        }
        Some(ConfigAction::SetMode { mode }) => {
            let mut config = Config::load()?;
            let mode = FilterMode::from(*mode);
            config.service.filter_mode = Some(mode);
            let path = config.save().context("Failed to save configuration")?;
            out.success(format!("Saved {mode} filtering to {}", path.display()));
        }
    }
    Ok(())
}
