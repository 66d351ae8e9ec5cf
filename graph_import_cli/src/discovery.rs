//! Graph file discovery

use log::{debug, info};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension of graph description files
pub const GRAPH_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Descend into subdirectories
    pub recursive: bool,
    /// Stop with an error past this many files
    pub max_files: Option<usize>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            max_files: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Path not found: {path}")]
    NotFound { path: String },

    #[error("No graph files found in directory: {path}")]
    NoFilesFound { path: String },

    #[error("Too many files found: {count} (max: {max})")]
    TooManyFiles { count: usize, max: usize },

    #[error("IO error during directory traversal: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Resolve `path` to the graph files it names, in sorted order
///
/// A file path is returned as-is regardless of its extension.
pub fn discover_graph_files(
    path: &Path,
    config: &DiscoveryConfig,
) -> Result<Vec<PathBuf>, DiscoveryError> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        return Err(DiscoveryError::NotFound {
            path: path.display().to_string(),
        });
    }

    info!(
        "Discovering graph files in {} (recursive: {})",
        path.display(),
        config.recursive
    );

    let walker = WalkDir::new(path)
        .follow_links(false)
        .max_depth(if config.recursive { usize::MAX } else { 1 });

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && is_graph_file(entry.path()) {
            debug!("Found graph file {}", entry.path().display());
            files.push(entry.into_path());
        }
    }

    if files.is_empty() {
        return Err(DiscoveryError::NoFilesFound {
            path: path.display().to_string(),
        });
    }

    if let Some(max) = config.max_files {
        if files.len() > max {
            return Err(DiscoveryError::TooManyFiles {
                count: files.len(),
                max,
            });
        }
    }

    // Sort files for deterministic processing order
    files.sort();
    Ok(files)
}

pub fn is_graph_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(GRAPH_EXTENSION))
        .unwrap_or(false)
}
