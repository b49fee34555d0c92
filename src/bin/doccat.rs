//! doccat CLI binary.

use std::process;

use clap::Parser;
use doccat::cli::{args::*, commands::*};

fn main() {
    // Parse command line arguments using clap
    let args = DoccatArgs::parse();

    init_tracing(args.verbosity());

    // Execute the command
    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Initialize tracing/logging based on the effective verbosity.
fn init_tracing(verbosity: u8) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let default_filter = match verbosity {
        0 => "doccat=error",
        1 => "doccat=warn",
        2 => "doccat=info",
        _ => "doccat=debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
