//! Ingest many LAS files at once.
//!
//! Each file is parsed independently (in parallel on the rayon pool) and yields its own
//! [`LoadedLog`]; nothing is merged or shared between files.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::error::IngestionResult;

use super::unified::{IngestionOptions, IngestionRequest, LoadedLog};

/// Outcome for one file of a batch.
#[derive(Debug)]
pub struct BatchItem {
    pub path: PathBuf,
    pub result: IngestionResult<LoadedLog>,
}

/// Ingest every `.las` file in `dir` (case-insensitive extension).
///
/// Subdirectories are visited when `options.recursive` is set. Results are sorted by path.
/// Failure to read the directory itself is an error; per-file failures are reported per item.
pub fn ingest_dir(dir: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<Vec<BatchItem>> {
    let max_depth = if options.recursive { usize::MAX } else { 1 };

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir.as_ref()).max_depth(max_depth) {
        let entry = entry?;
        if entry.file_type().is_file() && has_las_extension(entry.path()) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();

    Ok(ingest_paths(paths, options))
}

/// Ingest every file matching a glob pattern such as `logs/**/*.las`. Results are sorted by path.
pub fn ingest_glob(pattern: &str, options: &IngestionOptions) -> IngestionResult<Vec<BatchItem>> {
    let mut paths = Vec::new();
    for entry in glob::glob(pattern)? {
        let path = entry?;
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    Ok(ingest_paths(paths, options))
}

fn ingest_paths(paths: Vec<PathBuf>, options: &IngestionOptions) -> Vec<BatchItem> {
    tracing::debug!(files = paths.len(), "starting batch ingestion");
    paths
        .into_par_iter()
        .map(|path| {
            let request = IngestionRequest {
                path,
                options: options.clone(),
            };
            let result = request.run();
            BatchItem {
                path: request.path,
                result,
            }
        })
        .collect()
}

fn has_las_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("las"))
}

#[cfg(test)]
mod tests {
    use super::has_las_extension;
    use std::path::Path;

    #[test]
    fn las_extension_is_case_insensitive() {
        assert!(has_las_extension(Path::new("a/b/WELL.LAS")));
        assert!(has_las_extension(Path::new("well.las")));
        assert!(!has_las_extension(Path::new("well.csv")));
        assert!(!has_las_extension(Path::new("las")));
    }
}
