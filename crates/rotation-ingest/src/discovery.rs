//! Source file discovery.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use rotation_model::SourceKind;
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// Name patterns of editor lock files and partial downloads.
const ARTIFACT_PATTERNS: [&str; 4] = ["~$*", ".~lock*", "*.tmp", ".*"];

/// The file selected for each source kind, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFiles {
    files: BTreeMap<SourceKind, PathBuf>,
}

impl SourceFiles {
    pub fn get(&self, kind: SourceKind) -> Option<&Path> {
        self.files.get(&kind).map(PathBuf::as_path)
    }

    pub fn insert(&mut self, kind: SourceKind, path: PathBuf) {
        self.files.insert(kind, path);
    }

    /// Kinds without a selected file, in discovery order.
    pub fn missing(&self) -> Vec<SourceKind> {
        SourceKind::ALL
            .into_iter()
            .filter(|kind| !self.files.contains_key(kind))
            .collect()
    }
}

fn compile_pattern(pattern: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .case_insensitive(true)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| IngestError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

fn artifact_globset() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in ARTIFACT_PATTERNS {
        let glob = Glob::new(pattern).map_err(|e| IngestError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| IngestError::InvalidPattern {
        pattern: ARTIFACT_PATTERNS.join(","),
        message: e.to_string(),
    })
}

/// Returns true for lock files, temp files and hidden files.
pub fn is_artifact(file_name: &str) -> bool {
    match artifact_globset() {
        Ok(set) => set.is_match(file_name),
        Err(_) => file_name.starts_with('.') || file_name.starts_with("~$"),
    }
}

/// Creation time, or modification time where the filesystem has no birth time.
fn file_timestamp(path: &Path) -> SystemTime {
    std::fs::metadata(path)
        .and_then(|meta| meta.created().or_else(|_| meta.modified()))
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

/// Lists regular files in `dir` whose name matches `pattern`.
///
/// Lock and temp artifacts are excluded. Returns files sorted by path.
pub fn list_matching_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let matcher = compile_pattern(pattern)?;
    let artifacts = artifact_globset()?;

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();

        // Skip directories
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if artifacts.is_match(name) {
            debug!(file = %name, "skipping lock/temp artifact");
            continue;
        }
        if matcher.is_match(name) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Picks the most recently created file in `dir` matching `pattern`.
///
/// Ties on the timestamp go to the lexicographically greatest path so the
/// choice is reproducible.
pub fn select_latest(dir: &Path, pattern: &str) -> Result<Option<PathBuf>> {
    let files = list_matching_files(dir, pattern)?;
    Ok(files
        .into_iter()
        .map(|path| (file_timestamp(&path), path))
        .max()
        .map(|(_, path)| path))
}

/// Selects the latest file for every source kind.
///
/// `patterns` overrides [`SourceKind::default_pattern`] per kind.
pub fn select_sources(dir: &Path, patterns: &BTreeMap<SourceKind, String>) -> Result<SourceFiles> {
    let mut selected = SourceFiles::default();
    for kind in SourceKind::ALL {
        let pattern = patterns
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_pattern());
        match select_latest(dir, pattern)? {
            Some(path) => {
                info!(source = %kind, file = %path.display(), "source selected");
                selected.insert(kind, path);
            }
            None => info!(source = %kind, pattern, "no file matches"),
        }
    }
    Ok(selected)
}
