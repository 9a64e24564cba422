mod cli;
mod commands;
mod config;
mod context;
mod output;
mod timing;
mod utils;

use anyhow::Result;
use clap::Parser as _;
use tracing::error;

use crate::cli::{Cli, Commands};
use crate::commands::{
    generate_completions, run_config, run_delete, run_download, run_health, run_list, run_upload,
};
use crate::config::Overrides;
use crate::context::build_session;
use crate::output::Output;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    timing::init_tracing(cli.verbose, cli.timing);

    match run(cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:?}");
            Output::new().error(format!("{e:#}"));
            std::process::ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut overrides = Overrides {
        api_url: cli.api_url,
        ..Overrides::default()
    };

    match cli.command {
        Commands::List(args) => {
            overrides.filter_mode = args.mode.map(Into::into);
            overrides.per_page = args.per_page;
            run_list(&mut build_session(&overrides)?, &args).await
        }
        Commands::Upload { files } => run_upload(&mut build_session(&overrides)?, files).await,
        Commands::Download {
            name,
            output,
            force,
        } => run_download(&build_session(&overrides)?, &name, output.as_deref(), force).await,
        Commands::Delete { name, yes } => {
            run_delete(&mut build_session(&overrides)?, &name, yes).await
        }
        Commands::Health => run_health(&build_session(&overrides)?).await,
        Commands::Config { action } => run_config(action.as_ref(), &overrides),
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    }
}
