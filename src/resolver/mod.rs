//! Entry resolution
//!
//! Derives bundler entry points and per-page HTML output descriptors from a
//! project's `js/` and `views/` directories by naming convention: every
//! script `js/<page>.(js|ts)x?` must have a matching template
//! `views/<page>.html`.

use std::fs;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::{Mode, ProjectDescriptor};

/// Recognized script filenames: a page name followed by `.js` or `.ts`,
/// optionally with the JSX/TSX component suffix.
static SCRIPT_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+)\.(js|ts)x?$").unwrap());

/// Fatal resolution failures
///
/// Any of these aborts the whole run; no partial entry set is ever produced.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("script directory not found: {0}")]
    MissingScriptDir(PathBuf),

    #[error("failed to read script directory: {0}")]
    ScriptDirUnreadable(#[from] std::io::Error),

    #[error("unrecognized file in script directory: {0} (expected <page>.js, .jsx, .ts or .tsx)")]
    UnrecognizedScript(PathBuf),

    #[error("page '{page}' has no HTML template: {expected}")]
    MissingTemplate { page: String, expected: PathBuf },
}

/// A single bundler entry derived from one script file
#[derive(Debug, Clone, Serialize)]
pub struct PageEntry {
    /// Script filename with the extension stripped
    pub name: String,

    /// Script path first; in development the page's HTML template follows so
    /// that editing it triggers a reload.
    pub sources: Vec<PathBuf>,
}

/// HTML output descriptor, one per page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlPluginDescriptor {
    /// Template the page is rendered from
    pub template: PathBuf,

    /// Output filename under the project's output root
    pub filename: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<PathBuf>,

    /// Chunks injected into the page: the shared vendor chunk plus the
    /// page's own chunk.
    pub chunks: Vec<String>,
}

/// Everything the resolver derives for one project
#[derive(Debug, Clone)]
pub struct ResolvedEntries {
    pub pages: Vec<PageEntry>,
    pub html_plugins: Vec<HtmlPluginDescriptor>,
}

impl ResolvedEntries {
    pub fn page_names(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Scan the project's script directory and pair every script with its HTML
/// template, rebuilding the result from scratch on every call.
///
/// Entry order follows the directory listing order, which is platform
/// dependent; it is deliberately not sorted.
pub fn resolve_entries(project: &ProjectDescriptor) -> Result<ResolvedEntries, ResolveError> {
    let script_dir = project.script_dir();
    let views_dir = project.views_dir();

    if !script_dir.is_dir() {
        return Err(ResolveError::MissingScriptDir(script_dir));
    }

    let favicon = project.favicon();
    let mut pages = Vec::new();
    let mut html_plugins = Vec::new();

    for entry in fs::read_dir(&script_dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();

        let caps = SCRIPT_NAME
            .captures(&file_name)
            .ok_or_else(|| ResolveError::UnrecognizedScript(entry.path()))?;
        let page = caps[1].to_string();

        let template = views_dir.join(format!("{page}.html"));
        if !template.is_file() {
            return Err(ResolveError::MissingTemplate {
                page,
                expected: template,
            });
        }

        debug!("resolved page '{}' from {}", page, file_name);

        let mut sources = vec![entry.path()];
        if project.mode == Mode::Development {
            sources.push(template.clone());
        }

        html_plugins.push(HtmlPluginDescriptor {
            template,
            filename: format!("{page}.html"),
            favicon: favicon.clone(),
            chunks: vec!["vendor".to_string(), page.clone()],
        });
        pages.push(PageEntry {
            name: page,
            sources,
        });
    }

    Ok(ResolvedEntries {
        pages,
        html_plugins,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;

    fn project_at(root: &Path, name: &str, mode: Mode) -> ProjectDescriptor {
        ProjectDescriptor::new(name, mode, root.to_path_buf(), &Settings::default()).unwrap()
    }

    fn write_page(root: &Path, project: &str, page: &str, script_ext: &str) {
        let base = root.join("src").join(project);
        fs::create_dir_all(base.join("js")).unwrap();
        fs::create_dir_all(base.join("views")).unwrap();
        fs::write(base.join("js").join(format!("{page}.{script_ext}")), "").unwrap();
        fs::write(base.join("views").join(format!("{page}.html")), "").unwrap();
    }

    #[test]
    fn one_entry_per_script_file() {
        let dir = tempfile::tempdir().unwrap();
        write_page(dir.path(), "app", "home", "js");
        write_page(dir.path(), "app", "about", "tsx");

        let project = project_at(dir.path(), "app", Mode::Production);
        let resolved = resolve_entries(&project).unwrap();

        assert_eq!(resolved.pages.len(), 2);
        assert_eq!(resolved.html_plugins.len(), 2);

        let mut names = resolved.page_names();
        names.sort();
        assert_eq!(names, vec!["about", "home"]);

        for (page, html) in resolved.pages.iter().zip(&resolved.html_plugins) {
            assert_eq!(html.filename, format!("{}.html", page.name));
            assert_eq!(html.chunks, vec!["vendor".to_string(), page.name.clone()]);
            assert!(html.favicon.is_none());
        }
    }

    #[test]
    fn development_entries_include_template_for_reload() {
        let dir = tempfile::tempdir().unwrap();
        write_page(dir.path(), "app", "home", "js");

        let project = project_at(dir.path(), "app", Mode::Development);
        let resolved = resolve_entries(&project).unwrap();

        let page = &resolved.pages[0];
        assert_eq!(page.sources.len(), 2);
        assert!(page.sources[0].ends_with("js/home.js"));
        assert!(page.sources[1].ends_with("views/home.html"));
    }

    #[test]
    fn production_entries_are_script_only() {
        let dir = tempfile::tempdir().unwrap();
        write_page(dir.path(), "app", "home", "ts");

        let project = project_at(dir.path(), "app", Mode::Production);
        let resolved = resolve_entries(&project).unwrap();

        assert_eq!(resolved.pages[0].sources.len(), 1);
        assert!(resolved.pages[0].sources[0].ends_with("js/home.ts"));
    }

    #[test]
    fn missing_template_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_page(dir.path(), "app", "home", "js");
        fs::write(dir.path().join("src/app/js/orphan.js"), "").unwrap();

        let project = project_at(dir.path(), "app", Mode::Development);
        let err = resolve_entries(&project).unwrap_err();

        assert!(matches!(err, ResolveError::MissingTemplate { ref page, .. } if page == "orphan"));
    }

    #[test]
    fn unrecognized_filename_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_page(dir.path(), "app", "home", "js");
        fs::write(dir.path().join("src/app/js/readme.md"), "").unwrap();

        let project = project_at(dir.path(), "app", Mode::Development);
        let err = resolve_entries(&project).unwrap_err();

        assert!(matches!(err, ResolveError::UnrecognizedScript(_)));
    }

    #[test]
    fn missing_script_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/app")).unwrap();

        let project = project_at(dir.path(), "app", Mode::Development);
        let err = resolve_entries(&project).unwrap_err();

        assert!(matches!(err, ResolveError::MissingScriptDir(_)));
    }

    #[test]
    fn favicon_propagates_to_every_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        write_page(dir.path(), "app", "home", "js");
        write_page(dir.path(), "app", "about", "js");
        fs::create_dir_all(dir.path().join("src/app/images")).unwrap();
        fs::write(dir.path().join("src/app/images/favicon.jpg"), b"jpg").unwrap();

        let project = project_at(dir.path(), "app", Mode::Production);
        let resolved = resolve_entries(&project).unwrap();

        for html in &resolved.html_plugins {
            assert!(html.favicon.is_some());
        }
    }
}
