mod cli;
mod config;
mod error;
mod fetcher;
mod model;
mod output;
mod providers;
mod transform;
mod util;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = cli::run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays usable for `--dry-run` output.
fn init_tracing(verbose: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, env.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// `RUST_LOG` decides the level when set, `info` otherwise. `--verbose`
/// always lets debug output through.
fn log_filter(verbose: bool, env: Option<&str>) -> EnvFilter {
    let filter = match env.filter(|directives| !directives.trim().is_empty()) {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::new("info"),
    };
    if verbose {
        filter.add_directive(Level::DEBUG.into())
    } else {
        filter
    }
}
