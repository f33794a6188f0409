//! Optimization section: code splitting and minification policy

use serde::Serialize;
use serde_json::json;

use crate::config::Mode;

/// Stylesheets hoisted into the shared vendor chunk alongside third-party
/// code: only files named exactly `reset` or `common`.
const SHARED_STYLE_TEST: &str = r"[/\\](reset|common)\.(le|c|sc|sa)ss$";

/// `optimization` section of the bundler configuration
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Optimization {
    pub split_chunks: SplitChunks,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimize: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimizer: Option<Vec<Minimizer>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitChunks {
    pub cache_groups: CacheGroups,
}

/// Cache groups producing the shared vendor chunk
///
/// Both groups emit under the `vendor` chunk name. With a single entry both
/// are absent: splitting a one-page project only adds chunk overhead.
#[derive(Debug, Clone, Serialize)]
pub struct CacheGroups {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<CacheGroup>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub common: Option<CacheGroup>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheGroup {
    /// Chunk name; matches the `vendor` entry every HTML descriptor injects
    pub name: &'static str,

    /// Which chunk kinds the group applies to
    pub chunks: &'static str,

    /// Module path pattern captured by the group
    pub test: &'static str,

    pub enforce: bool,
}

/// Production minimizers
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "name", rename_all = "kebab-case")]
pub enum Minimizer {
    /// CSS asset compression
    OptimizeCssAssets,

    /// Script minification; `drop_console` strips every console call
    Uglify { parallel: bool, drop_console: bool },
}

impl Optimization {
    /// Assemble the optimization section for the given mode and entry count.
    pub fn assemble(mode: Mode, entry_count: usize) -> Self {
        let cache_groups = if entry_count > 1 {
            CacheGroups {
                // `initial` rather than `all`: async chunks must keep their
                // own third-party modules or lazy imports fail to resolve.
                vendor: Some(CacheGroup {
                    name: "vendor",
                    chunks: "initial",
                    test: "node_modules",
                    enforce: true,
                }),
                common: Some(CacheGroup {
                    name: "vendor",
                    chunks: "all",
                    test: SHARED_STYLE_TEST,
                    enforce: true,
                }),
            }
        } else {
            CacheGroups {
                vendor: None,
                common: None,
            }
        };

        let (minimize, minimizer) = if mode.is_production() {
            (
                Some(true),
                Some(vec![
                    Minimizer::OptimizeCssAssets,
                    Minimizer::Uglify {
                        parallel: true,
                        drop_console: true,
                    },
                ]),
            )
        } else {
            (None, None)
        };

        Self {
            split_chunks: SplitChunks { cache_groups },
            minimize,
            minimizer,
        }
    }

    pub fn has_vendor_chunk(&self) -> bool {
        self.split_chunks.cache_groups.vendor.is_some()
    }
}

/// `performance` section: bundle size warnings only matter for production
/// artifacts.
pub fn performance_hints(mode: Mode) -> serde_json::Value {
    if mode.is_production() {
        json!({ "hints": "warning" })
    } else {
        json!({ "hints": false })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiple_entries_produce_vendor_groups() {
        let opt = Optimization::assemble(Mode::Production, 3);

        assert!(opt.has_vendor_chunk());
        let common = opt.split_chunks.cache_groups.common.unwrap();
        assert_eq!(common.name, "vendor");
        assert_eq!(common.chunks, "all");
    }

    #[test]
    fn single_entry_skips_splitting() {
        for mode in [Mode::Development, Mode::Production] {
            let opt = Optimization::assemble(mode, 1);
            assert!(!opt.has_vendor_chunk());
            assert!(opt.split_chunks.cache_groups.common.is_none());
        }
    }

    #[test]
    fn minimizers_only_in_production() {
        let prod = Optimization::assemble(Mode::Production, 2);
        assert_eq!(prod.minimize, Some(true));
        assert_eq!(prod.minimizer.as_ref().map(Vec::len), Some(2));

        let dev = Optimization::assemble(Mode::Development, 2);
        assert!(dev.minimize.is_none());
        assert!(dev.minimizer.is_none());
    }
}
