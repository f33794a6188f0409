//! Project scaffolding
//!
//! Materializes a new sub-project by copying the workspace template tree.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::debug;
use walkdir::WalkDir;

/// Copy the template tree to `target`.
///
/// Refuses when the template is missing or the target already exists; an
/// existing target is left untouched.
pub fn scaffold(template: &Path, target: &Path) -> Result<()> {
    if !template.is_dir() {
        bail!("template directory not found: {}", template.display());
    }

    if target.exists() {
        bail!(
            "{} already exists, pick another project name",
            target.display()
        );
    }

    for entry in WalkDir::new(template) {
        let entry = entry.context("Failed to walk template directory")?;
        let relative = entry
            .path()
            .strip_prefix(template)
            .context("Template entry outside template root")?;
        let dest = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)
                .with_context(|| format!("Failed to create {}", dest.display()))?;
        } else {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::copy(entry.path(), &dest).with_context(|| {
                format!(
                    "Failed to copy {} -> {}",
                    entry.path().display(),
                    dest.display()
                )
            })?;
            debug!("copied {}", relative.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_template(root: &Path) -> std::path::PathBuf {
        let template = root.join("common/template");
        fs::create_dir_all(template.join("js")).unwrap();
        fs::create_dir_all(template.join("views")).unwrap();
        fs::write(template.join("js/index.js"), "console.log('hi');\n").unwrap();
        fs::write(template.join("views/index.html"), "<html></html>\n").unwrap();
        template
    }

    #[test]
    fn copies_the_whole_tree() {
        let dir = tempfile::tempdir().unwrap();
        let template = write_template(dir.path());
        let target = dir.path().join("src/fresh");

        scaffold(&template, &target).unwrap();

        assert_eq!(
            fs::read_to_string(target.join("js/index.js")).unwrap(),
            "console.log('hi');\n"
        );
        assert_eq!(
            fs::read_to_string(target.join("views/index.html")).unwrap(),
            "<html></html>\n"
        );
    }

    #[test]
    fn refuses_existing_target_without_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let template = write_template(dir.path());
        let target = dir.path().join("src/taken");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("keep.txt"), "original").unwrap();

        let err = scaffold(&template, &target).unwrap_err();
        assert!(err.to_string().contains("already exists"));

        // Existing content untouched, nothing copied in.
        assert_eq!(fs::read_to_string(target.join("keep.txt")).unwrap(), "original");
        assert!(!target.join("js").exists());
    }

    #[test]
    fn refuses_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let err = scaffold(
            &dir.path().join("common/template"),
            &dir.path().join("src/fresh"),
        )
        .unwrap_err();

        assert!(err.to_string().contains("template directory not found"));
    }
}
