//! Bundler configuration assembly and hand-off
//!
//! Builds the complete declarative configuration document consumed by the
//! external bundler, rebuilt from scratch on every invocation, then spawns
//! the bundler as a child process with the mode and project name propagated
//! through its environment.

mod chunk;
mod rules;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::json;
use tracing::{debug, info};

use crate::config::{ProjectDescriptor, Settings};
use crate::process;
use crate::resolver::{HtmlPluginDescriptor, PageEntry, ResolvedEntries};

pub use chunk::{CacheGroup, CacheGroups, Minimizer, Optimization, SplitChunks};
pub use rules::{module_rules, Loader, Rule};

/// Directory under the workspace root holding the serialized config
pub const CONFIG_DIR: &str = ".pagepack";

/// Filename of the serialized config document
pub const CONFIG_FILE: &str = "config.json";

/// The complete configuration document handed to the bundler
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlerConfig {
    pub mode: &'static str,

    /// `source-map` in development, `hidden-source-map` in production
    pub devtool: &'static str,

    pub entry: EntrySection,

    pub output: OutputSection,

    pub module: ModuleSection,

    pub plugins: Vec<PluginSpec>,

    pub optimization: Optimization,

    pub resolve: ResolveSection,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerSection>,

    pub performance: serde_json::Value,
}

/// Entry object keyed by page name, preserving discovery order
#[derive(Debug)]
pub struct EntrySection(pub Vec<PageEntry>);

impl Serialize for EntrySection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for page in &self.0 {
            map.serialize_entry(&page.name, &page.sources)?;
        }
        map.end()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSection {
    pub path: PathBuf,
    pub public_path: String,

    /// `[chunkhash:8]` filenames in production for long-term caching
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct ModuleSection {
    pub rules: Vec<Rule>,
}

/// Plugin instances, serialized as `{"plugin": <name>, ...options}`
#[derive(Debug, Serialize)]
#[serde(tag = "plugin", rename_all = "kebab-case")]
pub enum PluginSpec {
    HtmlWebpackPlugin(HtmlPluginDescriptor),

    /// Pre-build cleanup of the output directory
    CleanWebpackPlugin,

    #[serde(rename_all = "camelCase")]
    MiniCssExtractPlugin {
        filename: &'static str,
        chunk_filename: &'static str,
    },

    HotModuleReplacementPlugin,

    /// Readable module names in HMR update logs
    NamedModulesPlugin,

    /// Suppress emission when compilation fails
    NoEmitOnErrorsPlugin,
}

#[derive(Debug, Serialize)]
pub struct ResolveSection {
    pub extensions: Vec<&'static str>,
    pub alias: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerSection {
    pub port: u16,

    pub host: String,

    /// Hot module replacement, paired with the HMR plugin
    pub hot: bool,

    /// Served file root: the whole output directory, not just this project
    pub content_base: PathBuf,

    /// Render compile errors onto the page
    pub overlay: bool,

    pub no_info: bool,

    /// Reload when files under the content base change (edited HTML included)
    pub watch_content_base: bool,
}

impl BundlerConfig {
    /// Assemble the full configuration for one project.
    pub fn assemble(
        project: &ProjectDescriptor,
        entries: ResolvedEntries,
        settings: &Settings,
    ) -> Self {
        let mode = project.mode;
        let entry_count = entries.pages.len();

        let mut plugins: Vec<PluginSpec> = entries
            .html_plugins
            .into_iter()
            .map(PluginSpec::HtmlWebpackPlugin)
            .collect();

        let dev_server = if mode.is_production() {
            plugins.push(PluginSpec::CleanWebpackPlugin);
            plugins.push(PluginSpec::MiniCssExtractPlugin {
                filename: "static/[name].[contenthash:8].css",
                chunk_filename: "static/[id].[contenthash:8].css",
            });
            None
        } else {
            plugins.push(PluginSpec::HotModuleReplacementPlugin);
            plugins.push(PluginSpec::NamedModulesPlugin);
            plugins.push(PluginSpec::NoEmitOnErrorsPlugin);
            Some(DevServerSection {
                port: settings.dev.port,
                host: settings.dev.host.clone(),
                hot: true,
                content_base: project.root.join(&settings.paths.output),
                overlay: true,
                no_info: true,
                watch_content_base: true,
            })
        };

        Self {
            mode: mode.as_str(),
            devtool: if mode.is_production() {
                "hidden-source-map"
            } else {
                "source-map"
            },
            entry: EntrySection(entries.pages),
            output: OutputSection {
                path: project.output_root.clone(),
                public_path: project.public_path.clone(),
                filename: if mode.is_production() {
                    "static/[name].[chunkhash:8].js".to_string()
                } else {
                    "static/[name].js".to_string()
                },
            },
            module: ModuleSection {
                rules: module_rules(mode),
            },
            plugins,
            optimization: Optimization::assemble(mode, entry_count),
            resolve: ResolveSection {
                extensions: vec![".ts", ".tsx", ".js", ".jsx", ".vue"],
                alias: json!({
                    "vue$": "vue/dist/vue.js",
                    "@": project.source_root,
                }),
            },
            dev_server,
            performance: chunk::performance_hints(mode),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize bundler configuration")
    }

    /// Write the document to `<root>/.pagepack/config.json` and return the
    /// path.
    pub fn write(&self, project: &ProjectDescriptor) -> Result<PathBuf> {
        let dir = project.root.join(CONFIG_DIR);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let path = dir.join(CONFIG_FILE);
        fs::write(&path, self.to_json()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        debug!("wrote bundler configuration to {}", path.display());
        Ok(path)
    }
}

/// Spawn the external bundler for this invocation, relaying its output.
///
/// The child receives `NODE_ENV`, `PROJECT` and `PAGEPACK_CONFIG`; a spinner
/// runs until its first output line.
pub async fn hand_off(
    project: &ProjectDescriptor,
    settings: &Settings,
    config: &BundlerConfig,
) -> Result<()> {
    let config_path = config.write(project)?;

    let command_line = settings.bundler.for_mode(project.mode);
    let mut parts = command_line.split_whitespace();
    let program = parts
        .next()
        .context("Empty bundler command in pagepack.toml")?;

    info!("launching bundler: {}", command_line);

    let mut cmd = tokio::process::Command::new(program);
    cmd.args(parts)
        .current_dir(&project.root)
        .env("NODE_ENV", project.mode.as_str())
        .env("PROJECT", &project.name)
        .env("PAGEPACK_CONFIG", &config_path);

    let spinner = process::build_spinner("Now building...");
    let status = process::run_streaming(cmd, spinner)
        .await
        .with_context(|| format!("Failed to run bundler command: {}", command_line))?;

    if !status.success() {
        anyhow::bail!("bundler exited with {}", status);
    }

    Ok(())
}
