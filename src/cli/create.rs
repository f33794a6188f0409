//! Project creation command

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tokio::process::Command;

use crate::config::Settings;
use crate::process;
use crate::scaffold;

/// Scaffold a new sub-project from the template
#[derive(Args, Debug)]
pub struct CreateCommand {
    /// New project name
    pub name: String,

    /// Answer yes to the "run dev build now?" prompt without asking
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl CreateCommand {
    pub async fn execute(&self, root: &Path) -> Result<()> {
        let settings = Settings::load(root)?;
        let template = root.join(&settings.paths.template);
        let target = root.join(&settings.paths.source).join(&self.name);

        scaffold::scaffold(&template, &target)?;

        eprintln!(
            "{}\n",
            format!("Created project: {}", target.display()).green()
        );

        let run_dev = self.yes
            || confirm(&format!(
                "Run `pagepack dev {}` now? (Y/N) -",
                self.name
            ))?;

        if run_dev {
            self.start_dev(root).await
        } else {
            Ok(())
        }
    }

    /// Launch `pagepack dev <name>` as a subprocess, relaying its output.
    async fn start_dev(&self, root: &Path) -> Result<()> {
        let exe = std::env::current_exe().context("Failed to locate the pagepack executable")?;

        let mut cmd = Command::new(exe);
        cmd.arg("dev")
            .arg(&self.name)
            .arg("--root")
            .arg(root)
            .current_dir(root);

        let spinner = process::build_spinner("Now building...");
        let status = process::run_streaming(cmd, spinner).await?;

        if !status.success() {
            anyhow::bail!("dev build exited with {}", status);
        }

        Ok(())
    }
}

/// Ask a yes/no question on the terminal; EOF counts as no.
fn confirm(message: &str) -> Result<bool> {
    eprint!("{} ", message.cyan());
    io::stderr().flush().ok();

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .context("Failed to read answer")?;

    let answer = answer.trim().to_uppercase();
    Ok(answer == "Y" || answer == "YES")
}
