//! Workspace settings schema definitions

use serde::{Deserialize, Serialize};

use super::Mode;

/// Filesystem layout settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Template tree copied by `create`
    #[serde(default = "default_template")]
    pub template: String,

    /// Directory containing the sub-projects
    #[serde(default = "default_source")]
    pub source: String,

    /// Directory bundles are written under
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            source: default_source(),
            output: default_output(),
        }
    }
}

fn default_template() -> String {
    "common/template".to_string()
}

fn default_source() -> String {
    "src".to_string()
}

fn default_output() -> String {
    "dist".to_string()
}

/// Development server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevConfig {
    /// Port the dev server listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bind address; `0.0.0.0` makes the server reachable over the LAN
    #[serde(default = "default_host")]
    pub host: String,
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

fn default_port() -> u16 {
    6600
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Commands used to launch the external bundler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundlerCommands {
    /// Command for `pagepack dev`
    #[serde(default = "default_dev_command")]
    pub dev_command: String,

    /// Command for `pagepack build`
    #[serde(default = "default_build_command")]
    pub build_command: String,
}

impl BundlerCommands {
    /// Command line matching the selected mode
    pub fn for_mode(&self, mode: Mode) -> &str {
        match mode {
            Mode::Development => &self.dev_command,
            Mode::Production => &self.build_command,
        }
    }
}

impl Default for BundlerCommands {
    fn default() -> Self {
        Self {
            dev_command: default_dev_command(),
            build_command: default_build_command(),
        }
    }
}

fn default_dev_command() -> String {
    "webpack-dev-server --color".to_string()
}

fn default_build_command() -> String {
    "webpack --progress --hide-modules".to_string()
}
