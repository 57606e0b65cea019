//! Shared helpers for integration tests.

use std::path::{Path, PathBuf};

use contour_core::config::{AnalysisConfig, FileRecord};

/// Resolve `tests/fixtures/{name}` relative to the workspace root.
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir)
        .join("../../tests/fixtures")
        .join(name)
        .canonicalize()
        .unwrap_or_else(|_| {
            Path::new(manifest_dir)
                .join("../../tests/fixtures")
                .join(name)
        })
}

/// Config pointing at a repository root, everything else defaulted.
pub fn config_for(path: &Path) -> AnalysisConfig {
    AnalysisConfig {
        repo_path: path.to_string_lossy().to_string(),
        ..Default::default()
    }
}

/// Build a FileRecord as the walker would, without touching the filesystem.
pub fn record(relpath: &str, content: &str) -> FileRecord {
    FileRecord {
        path: format!("/repo/{relpath}"),
        relpath: relpath.to_string(),
        name: relpath.rsplit('/').next().unwrap_or(relpath).to_string(),
        content: content.to_string(),
    }
}

/// Write a file tree under `root` from (relative path, content) pairs.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
}
