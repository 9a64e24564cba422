//! Shell completions generation command.

use std::io::Write as _;

use clap::CommandFactory as _;
use clap_complete::{Generator, Shell};

use crate::cli::Cli;

pub fn generate_completions(shell: Shell) {
    write_completions(shell, &mut std::io::stdout());
    std::io::stdout().flush().ok();
}

fn write_completions<G: Generator>(generator: G, buf: &mut dyn std::io::Write) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_owned();
    clap_complete::generate(generator, &mut cmd, bin_name, buf);
}
