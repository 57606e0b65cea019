//! Depth-first file walk producing bounded-content records.

use std::path::Path;

use walkdir::WalkDir;

use crate::config::{AnalysisConfig, FileRecord};

/// Directory names never descended into.
const NOISE_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "__pycache__",
    ".venv",
    "venv",
    "target",
    "dist",
    "build",
    ".idea",
    ".vscode",
    ".mypy_cache",
    ".pytest_cache",
    ".tox",
    ".eggs",
];

/// Walk outcome: records in traversal order plus degradation counters.
#[derive(Debug, Default)]
pub struct WalkOutput {
    pub records: Vec<FileRecord>,
    pub read_failures: usize,
    pub oversized: usize,
}

/// Walk the repository tree and load file contents.
///
/// Files above `config.max_file_size` keep their record but get empty
/// content; undecodable bytes are replaced rather than rejected; read errors
/// degrade to empty content and the walk continues.
pub fn walk_repository(config: &AnalysisConfig) -> WalkOutput {
    let repo_path = Path::new(&config.repo_path);
    let mut out = WalkOutput::default();

    for entry in WalkDir::new(repo_path)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            if NOISE_DIRS.iter().any(|p| name == *p) {
                return false;
            }
            if config.exclude_patterns.iter().any(|p| name == *p) {
                return false;
            }
            // Skip hidden directories below the repo root.
            if e.depth() > 0 && e.file_type().is_dir() && name.starts_with('.') {
                return false;
            }
            true
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let abs_path = entry.path();
        let relpath = abs_path
            .strip_prefix(repo_path)
            .unwrap_or(abs_path)
            .to_string_lossy()
            .replace('\\', "/");
        let name = entry.file_name().to_string_lossy().to_string();

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        let content = if size > config.max_file_size {
            log::debug!("dropping content of oversized file {relpath} ({size} bytes)");
            out.oversized += 1;
            String::new()
        } else {
            match std::fs::read(abs_path) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    log::warn!("unreadable file {relpath}: {e}");
                    out.read_failures += 1;
                    String::new()
                }
            }
        };

        out.records.push(FileRecord {
            path: abs_path.to_string_lossy().to_string(),
            relpath,
            name,
            content,
        });
    }

    out
}
