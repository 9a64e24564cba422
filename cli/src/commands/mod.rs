//! Command implementations for the fileshelf CLI.
//!
//! Each subcommand is implemented in its own module.

pub mod completions;
pub mod config;
pub mod delete;
pub mod download;
pub mod health;
pub mod list;
pub mod upload;

pub use completions::generate_completions;
pub use config::run_config;
pub use delete::run_delete;
pub use download::run_download;
pub use health::run_health;
pub use list::run_list;
pub use upload::run_upload;
