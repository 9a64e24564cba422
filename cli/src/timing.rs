//! Tracing setup and span timing.
//!
//! Functions annotated with `#[instrument]` get their duration logged when
//! `--timing` is on. Records from the library crates' `log` macros reach the
//! same subscriber through its `log` compatibility layer.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

/// Default level for a run: debug when verbose, info when timing (span close
/// events are logged at INFO), warn otherwise.
pub fn default_level(verbose: bool, timing: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else if timing {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` still refines the filter.
pub fn init_tracing(verbose: bool, timing: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(verbose, timing).into())
        .from_env_lossy();

    let span_events = if timing {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(verbose)
                .with_level(true)
                .with_span_events(span_events)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init();

    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {e}");
    }
}
