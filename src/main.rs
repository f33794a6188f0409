//! Pagepack - multi-page frontend project scaffolding and build orchestration
//!
//! A thin wrapper around an external bundler for multi-page workspaces:
//! - `create` copies the workspace template into a new sub-project
//! - `dev`/`build` discover page entries by naming convention, assemble the
//!   mode-specific bundler configuration and hand off to the bundler process
//!
//! Page scripts live under `src/<project>/js/`, each paired with a same-named
//! HTML template under `src/<project>/views/`.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod bundler;
mod cli;
mod config;
mod process;
mod resolver;
mod scaffold;
mod utils;

pub use cli::Cli;
pub use config::{ProjectDescriptor, Settings};

/// Initialize the logging/tracing system
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pagepack=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pagepack=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    cli.execute().await
}
