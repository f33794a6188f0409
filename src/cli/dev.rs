//! Development build command

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::info;

use crate::bundler::{self, BundlerConfig};
use crate::config::{Mode, ProjectDescriptor, Settings};
use crate::resolver;
use crate::utils;

/// Start a development build with the live-reload dev server
#[derive(Args, Debug)]
pub struct DevCommand {
    /// Project under the source directory
    pub name: String,

    /// Override the dev server port
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl DevCommand {
    pub async fn execute(&self, root: &Path) -> Result<()> {
        let root = root
            .canonicalize()
            .with_context(|| format!("Workspace root not found: {}", root.display()))?;

        let mut settings = Settings::load(&root)?;
        if let Some(port) = self.port {
            settings.dev.port = port;
        }

        let project = ProjectDescriptor::new(&self.name, Mode::Development, root, &settings)?;
        let entries = resolver::resolve_entries(&project)?;
        info!(
            "resolved {} page(s): {}",
            entries.pages.len(),
            entries.page_names().join(", ")
        );

        let config = BundlerConfig::assemble(&project, entries, &settings);
        print_server_info(&project, &settings);

        bundler::hand_off(&project, &settings, &config).await
    }
}

/// Info block mirroring the dev server banner: where the build runs and how
/// to reach it.
fn print_server_info(project: &ProjectDescriptor, settings: &Settings) {
    let port = settings.dev.port;

    let mut lines = format!(
        "[Info] Mode       : {mode}\n\
         [Info] Project    : {project}\n\
         [Info] Output     : {output}\n\
         [Info] PublicPath : {public}\n\
         [Info] Visit      : http://localhost:{port}{public}",
        mode = project.mode,
        project = project.source_root.display(),
        output = project.output_root.display(),
        public = project.public_path,
    );

    if let Some(ip) = utils::local_ipv4() {
        lines.push_str(&format!(
            "\n                  : http://{ip}:{port}{public}",
            public = project.public_path
        ));
    }

    eprintln!("{}", lines.green());
}
