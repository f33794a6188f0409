//! Command-line interface for Pagepack
//!
//! Provides the main CLI structure using clap with subcommands for:
//! - `create`: Scaffold a new sub-project from the workspace template
//! - `dev`: Development build with the live-reload dev server
//! - `build`: Production build

mod build;
mod create;
mod dev;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

pub use build::BuildCommand;
pub use create::CreateCommand;
pub use dev::DevCommand;

/// Pagepack - multi-page frontend project scaffolding and build orchestration
#[derive(Parser, Debug)]
#[command(name = "pagepack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Workspace root holding src/, dist/ and the template
    #[arg(short, long, global = true, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a new sub-project from the template
    Create(CreateCommand),

    /// Start a development build with the live-reload dev server
    Dev(DevCommand),

    /// Build a sub-project for production
    Build(BuildCommand),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        print_banner();

        match &self.command {
            Commands::Create(cmd) => cmd.execute(&self.root).await,
            Commands::Dev(cmd) => cmd.execute(&self.root).await,
            Commands::Build(cmd) => cmd.execute(&self.root).await,
        }
    }
}

/// Print the Pagepack banner
fn print_banner() {
    eprintln!(
        "\n{} {} {}\n",
        "📦".cyan(),
        "Pagepack".bold().cyan(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
