use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use fileshelf_business::{FilterMode, MAX_PER_PAGE, SortBy, SortOrder};

#[derive(Parser)]
#[command(name = "fileshelf")]
#[command(about = "Browse and manage files on a fileshelf service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the file service (overrides the config file)
    #[arg(long, global = true, env = "FILESHELF_API_URL")]
    pub api_url: Option<String>,

    /// Show timing/latency information
    #[arg(long, global = true)]
    pub timing: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List files with search, date range, sort and paging
    List(ListArgs),
    /// Upload one or more files
    Upload {
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Download a file
    Download {
        /// Name of the file on the service
        name: String,

        /// Where to write the file (defaults to the file name in the current directory)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Overwrite an existing local file
        #[arg(long)]
        force: bool,
    },
    /// Delete a file
    Delete {
        /// Name of the file on the service
        name: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Check that the service is reachable
    Health,
    /// Show or update the saved configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration and where it is stored
    Show,
    /// Save the service URL
    SetUrl { url: String },
    /// Save the default filtering tier
    SetMode {
        #[arg(value_enum)]
        mode: ModeArg,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Case-insensitive name filter
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Sort key: name, size, modified or type
    #[arg(long, default_value = "name")]
    pub sort_by: SortBy,

    /// Sort direction: asc or desc
    #[arg(long, default_value = "asc")]
    pub order: SortOrder,

    /// Only files modified on or after this day (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Only files modified on or before this day (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Page to show
    #[arg(long, short = 'p', default_value = "1")]
    pub page: u32,

    /// Files per page, 1 to 100 (overrides the config file)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PER_PAGE)))]
    pub per_page: Option<u32>,

    /// Where filtering happens (overrides the config file)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Page through results interactively
    #[arg(long, short = 'I')]
    pub interactive: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Fetch everything, filter locally
    Client,
    /// Let the service filter and paginate
    Server,
}

impl From<ModeArg> for FilterMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Client => Self::Client,
            ModeArg::Server => Self::Server,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("Should parse")
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_defaults() {
        let cli = parse(&["fileshelf", "list"]);
        let Commands::List(args) = cli.command else {
            panic!("expected list");
        };

        assert_eq!(args.sort_by, SortBy::Name);
        assert_eq!(args.order, SortOrder::Asc);
        assert_eq!(args.page, 1);
        assert_eq!(args.per_page, None);
        assert_eq!(args.mode, None);
    }

    #[test]
    fn test_list_filters() {
        let cli = parse(&[
            "fileshelf",
            "list",
            "--search",
            "report",
            "--sort-by",
            "size",
            "--order",
            "desc",
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-31",
            "--per-page",
            "20",
            "--mode",
            "server",
        ]);
        let Commands::List(args) = cli.command else {
            panic!("expected list");
        };

        assert_eq!(args.search.as_deref(), Some("report"));
        assert_eq!(args.sort_by, SortBy::Size);
        assert_eq!(args.order, SortOrder::Desc);
        assert_eq!(args.from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(args.to, NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(args.per_page, Some(20));
        assert_eq!(args.mode.map(FilterMode::from), Some(FilterMode::Server));
    }

    #[test]
    fn test_invalid_sort_key_is_rejected() {
        assert!(Cli::try_parse_from(["fileshelf", "list", "--sort-by", "owner"]).is_err());
        assert!(Cli::try_parse_from(["fileshelf", "list", "--from", "01/02/2024"]).is_err());
    }

    #[test]
    fn test_per_page_outside_service_limit_is_rejected() {
        assert!(Cli::try_parse_from(["fileshelf", "list", "--per-page", "0"]).is_err());
        assert!(Cli::try_parse_from(["fileshelf", "list", "--per-page", "250"]).is_err());

        let Commands::List(args) = parse(&["fileshelf", "list", "--per-page", "100"]).command else {
            panic!("expected list");
        };
        assert_eq!(args.per_page, Some(100));
    }

    #[test]
    fn test_upload_requires_files() {
        assert!(Cli::try_parse_from(["fileshelf", "upload"]).is_err());

        let cli = parse(&["fileshelf", "upload", "a.txt", "b.txt"]);
        let Commands::Upload { files } = cli.command else {
            panic!("expected upload");
        };
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&[
            "fileshelf",
            "delete",
            "a.txt",
            "-y",
            "--api-url",
            "http://files:5000",
            "-v",
        ]);

        assert_eq!(cli.api_url.as_deref(), Some("http://files:5000"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Delete { yes: true, .. }));
    }
}
