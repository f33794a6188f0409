//! Pagepack library
//!
//! Core functionality for the Pagepack build orchestrator.

pub mod bundler;
pub mod cli;
pub mod config;
pub mod process;
pub mod resolver;
pub mod scaffold;
pub mod utils;

pub use bundler::BundlerConfig;
pub use cli::Cli;
pub use config::{Mode, ProjectDescriptor, Settings};
