//! Production build command

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::info;

use crate::bundler::{self, BundlerConfig};
use crate::config::{Mode, ProjectDescriptor, Settings};
use crate::resolver;

/// Build a sub-project for production
#[derive(Args, Debug)]
pub struct BuildCommand {
    /// Project under the source directory
    pub name: String,
}

impl BuildCommand {
    pub async fn execute(&self, root: &Path) -> Result<()> {
        let start = Instant::now();

        let root = root
            .canonicalize()
            .with_context(|| format!("Workspace root not found: {}", root.display()))?;

        let settings = Settings::load(&root)?;
        let project = ProjectDescriptor::new(&self.name, Mode::Production, root, &settings)?;

        let entries = resolver::resolve_entries(&project)?;
        info!(
            "resolved {} page(s): {}",
            entries.pages.len(),
            entries.page_names().join(", ")
        );

        eprintln!(
            "{} Building {} for production...",
            "→".blue(),
            self.name.cyan()
        );

        let config = BundlerConfig::assemble(&project, entries, &settings);
        bundler::hand_off(&project, &settings, &config).await?;

        eprintln!(
            "\n{} Built {} in {:.2}s, output at {}\n",
            "✓".green().bold(),
            self.name.cyan(),
            start.elapsed().as_secs_f64(),
            project.output_root.display().to_string().dimmed()
        );

        Ok(())
    }
}
