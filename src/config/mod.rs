//! Configuration handling for Pagepack
//!
//! Parses the optional `pagepack.toml` workspace settings file and builds the
//! immutable per-invocation project descriptor from parsed CLI arguments.

mod schema;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use schema::*;

/// Build mode selected by the invoked subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Mode::Production)
    }

    /// Subcommand that selects this mode, for user-facing messages
    pub fn command_name(&self) -> &'static str {
        match self {
            Mode::Development => "dev",
            Mode::Production => "build",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workspace settings (`pagepack.toml`)
///
/// Every section and key is optional; defaults reproduce the conventional
/// layout (`common/template`, `src/`, `dist/`, dev server on 6600).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Filesystem layout
    #[serde(default)]
    pub paths: PathsConfig,

    /// Dev server settings forwarded to the bundler
    #[serde(default)]
    pub dev: DevConfig,

    /// External bundler commands
    #[serde(default)]
    pub bundler: BundlerCommands,
}

impl Settings {
    /// Load settings from `<root>/pagepack.toml`.
    ///
    /// An absent file is not an error; defaults apply.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join("pagepack.toml");

        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        toml::from_str(&content).with_context(|| "Failed to parse pagepack.toml")
    }
}

/// Immutable description of the project being built, constructed once per
/// invocation and passed down to the resolver and the bundler assembly.
#[derive(Debug, Clone)]
pub struct ProjectDescriptor {
    /// Project name, as given on the command line
    pub name: String,

    /// Selected build mode
    pub mode: Mode,

    /// Workspace root the invocation runs in
    pub root: PathBuf,

    /// `<root>/src/<name>`
    pub source_root: PathBuf,

    /// `<root>/dist/<name>`
    pub output_root: PathBuf,

    /// URL prefix bundles are served under
    pub public_path: String,
}

impl ProjectDescriptor {
    /// Build a descriptor, verifying that the project directory exists.
    pub fn new(name: &str, mode: Mode, root: PathBuf, settings: &Settings) -> Result<Self> {
        let source_root = root.join(&settings.paths.source).join(name);

        if !source_root.is_dir() {
            anyhow::bail!(
                "project '{}' does not exist: {} (expected a project directory under {}/)",
                name,
                source_root.display(),
                settings.paths.source,
            );
        }

        let output_root = root.join(&settings.paths.output).join(name);

        Ok(Self {
            name: name.to_string(),
            mode,
            source_root,
            output_root,
            public_path: format!("/{}/", name),
            root,
        })
    }

    /// Directory scanned for page scripts
    pub fn script_dir(&self) -> PathBuf {
        self.source_root.join("js")
    }

    /// Directory holding the per-page HTML templates
    pub fn views_dir(&self) -> PathBuf {
        self.source_root.join("views")
    }

    /// Favicon shared by every page, when the project ships one
    pub fn favicon(&self) -> Option<PathBuf> {
        let path = self.source_root.join("images").join("favicon.jpg");
        path.is_file().then_some(path)
    }
}
