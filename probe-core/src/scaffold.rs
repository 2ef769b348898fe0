//! Project skeleton for the historical weather web app: creation and verification.

use anyhow::{Context, Result};
use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

/// Directories and placeholder files, relative to a project root.
#[derive(Debug, Clone)]
pub struct Skeleton {
    directories: Vec<PathBuf>,
    files: Vec<(PathBuf, &'static str)>,
}

/// What `create` did, entry by entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub created: Vec<PathBuf>,
    pub existing: Vec<PathBuf>,
}

/// What `verify` found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureReport {
    pub found: Vec<PathBuf>,
    pub missing_directories: Vec<PathBuf>,
    pub missing_files: Vec<PathBuf>,
}

impl StructureReport {
    pub fn is_complete(&self) -> bool {
        self.missing_directories.is_empty() && self.missing_files.is_empty()
    }
}

impl Skeleton {
    pub fn makarasham() -> Self {
        let directories = [
            "client/public",
            "client/src/components",
            "client/src/tests",
            "server/adapters",
            "server/routes",
            "server/utils",
            "server/tests",
        ]
        .into_iter()
        .map(PathBuf::from)
        .collect();

        let files = [
            ("client/src/App.js", "// Main App component\n"),
            ("client/src/index.js", "// Entry point for React\n"),
            ("server/adapters/meteostatAdapter.js", "// Meteostat adapter implementation\n"),
            ("server/routes/weather.js", "// Weather API endpoint implementation\n"),
            ("server/utils/cacheLayer.js", "// Caching abstraction (stub for now)\n"),
            ("server/server.js", "// Main Express server file\n"),
            (".gitignore", "# Node modules\nnode_modules/\n\n# Build files\nbuild/\n\n# Logs\nlogs/\n"),
            (
                "README.md",
                "# makarasham\n\nProject setup for the makarasham historical weather app.\n",
            ),
        ]
        .into_iter()
        .map(|(path, content)| (PathBuf::from(path), content))
        .collect();

        Self { directories, files }
    }

    /// Every directory the skeleton implies, parents included, in sorted order.
    pub fn required_directories(&self) -> Vec<PathBuf> {
        let mut all = BTreeSet::new();
        for dir in &self.directories {
            for ancestor in dir.ancestors() {
                if !ancestor.as_os_str().is_empty() {
                    all.insert(ancestor.to_path_buf());
                }
            }
        }
        all.into_iter().collect()
    }

    pub fn required_files(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|(path, _)| path.as_path())
    }

    /// Create whatever is missing under `root`. Existing files are never touched.
    pub fn create(&self, root: &Path) -> Result<ScaffoldReport> {
        let mut report = ScaffoldReport::default();

        for rel in &self.directories {
            let dir = root.join(rel);
            if dir.is_dir() {
                info!("Directory already exists: {}", dir.display());
                report.existing.push(rel.clone());
            } else {
                fs::create_dir_all(&dir)
                    .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
                info!("Created directory: {}", dir.display());
                report.created.push(rel.clone());
            }

            let gitkeep = rel.join(".gitkeep");
            if write_if_absent(root, &gitkeep, "")? {
                report.created.push(gitkeep);
            }
        }

        for (rel, content) in &self.files {
            if write_if_absent(root, rel, content)? {
                report.created.push(rel.clone());
            } else {
                report.existing.push(rel.clone());
            }
        }

        Ok(report)
    }

    /// Check that every required directory and file is present under `root`.
    /// `.gitignore` counts as a required file like the other skeleton files.
    pub fn verify(&self, root: &Path) -> StructureReport {
        let mut report = StructureReport::default();

        for rel in self.required_directories() {
            if root.join(&rel).is_dir() {
                info!("Found directory: {}", rel.display());
                report.found.push(rel);
            } else {
                info!("Missing directory: {}", rel.display());
                report.missing_directories.push(rel);
            }
        }

        for rel in self.required_files() {
            if root.join(rel).is_file() {
                info!("Found file: {}", rel.display());
                report.found.push(rel.to_path_buf());
            } else {
                info!("Missing file: {}", rel.display());
                report.missing_files.push(rel.to_path_buf());
            }
        }

        report
    }
}

/// Returns `true` when the file was created.
fn write_if_absent(root: &Path, rel: &Path, content: &str) -> Result<bool> {
    let path = root.join(rel);
    if path.exists() {
        info!("File already exists: {}", path.display());
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create parent directory: {}", parent.display()))?;
    }
    fs::write(&path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    info!("Created file: {}", path.display());

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_directories_include_parents() {
        let dirs = Skeleton::makarasham().required_directories();

        for expected in ["client", "client/src", "server", "server/tests", "client/public"] {
            assert!(dirs.contains(&PathBuf::from(expected)), "missing {expected}");
        }
        assert_eq!(dirs.len(), 10);
    }

    #[test]
    fn create_then_verify_is_complete() {
        let tmp = tempfile::tempdir().unwrap();
        let skeleton = Skeleton::makarasham();

        let report = skeleton.create(tmp.path()).unwrap();
        assert!(report.existing.is_empty());
        assert!(report.created.contains(&PathBuf::from("server/server.js")));
        assert!(tmp.path().join("client/public/.gitkeep").is_file());

        let structure = skeleton.verify(tmp.path());
        assert!(structure.is_complete(), "{structure:?}");
        assert_eq!(structure.found.len(), 18);
    }

    #[test]
    fn create_is_idempotent_and_keeps_edits() {
        let tmp = tempfile::tempdir().unwrap();
        let skeleton = Skeleton::makarasham();
        skeleton.create(tmp.path()).unwrap();

        let readme = tmp.path().join("README.md");
        fs::write(&readme, "# edited\n").unwrap();

        let second = skeleton.create(tmp.path()).unwrap();
        assert!(second.created.is_empty());
        assert_eq!(fs::read_to_string(&readme).unwrap(), "# edited\n");
    }

    #[test]
    fn verify_reports_missing_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let skeleton = Skeleton::makarasham();
        skeleton.create(tmp.path()).unwrap();

        fs::remove_dir_all(tmp.path().join("server/routes")).unwrap();
        fs::remove_file(tmp.path().join("client/src/App.js")).unwrap();

        let report = skeleton.verify(tmp.path());
        assert!(!report.is_complete());
        assert_eq!(report.missing_directories, vec![PathBuf::from("server/routes")]);
        assert_eq!(
            report.missing_files,
            vec![PathBuf::from("client/src/App.js"), PathBuf::from("server/routes/weather.js")]
        );
    }

    #[test]
    fn verify_requires_gitignore() {
        let tmp = tempfile::tempdir().unwrap();
        let skeleton = Skeleton::makarasham();
        skeleton.create(tmp.path()).unwrap();

        fs::remove_file(tmp.path().join(".gitignore")).unwrap();

        let report = skeleton.verify(tmp.path());
        assert!(!report.is_complete());
        assert_eq!(report.missing_files, vec![PathBuf::from(".gitignore")]);
    }

    #[test]
    fn verify_on_empty_root_misses_everything() {
        let tmp = tempfile::tempdir().unwrap();
        let report = Skeleton::makarasham().verify(tmp.path());

        assert!(report.found.is_empty());
        assert_eq!(report.missing_directories.len(), 10);
        assert_eq!(report.missing_files.len(), 8);
    }
}
