use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::error::{Result, TaskError};

/// One discovered artifact: where it was found, its path relative to the
/// source root, and the mirrored location it will be written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRecord {
    pub input_path: PathBuf,
    pub relative_path: PathBuf,
    pub output_path: PathBuf,
}

/// Recursively lists every file under `dir` whose extension matches `ext`,
/// unbounded depth, in sequential walk order. Walk order is whatever the
/// filesystem yields, but it is stable for an unchanged tree.
pub fn files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let walker = WalkBuilder::new(dir)
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| walk_error(dir, e))?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.path();
        if path.extension().is_some_and(|e| e == ext) {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

/// Enumerates every `.class` file under `source_dir`, pairing it with the
/// mirrored output location under `target_dir`. One pass per run.
pub fn scan_artifacts(source_dir: &Path, target_dir: &Path) -> Result<Vec<ArtifactRecord>> {
    let mut records = Vec::new();
    for input_path in files_with_extension(source_dir, "class")? {
        let relative_path = input_path
            .strip_prefix(source_dir)
            .map_err(|_| TaskError::InvalidPath {
                path: input_path.clone(),
                reason: format!("not under source directory {}", source_dir.display()),
            })?
            .to_path_buf();
        let output_path = target_dir.join(&relative_path);
        records.push(ArtifactRecord {
            input_path,
            relative_path,
            output_path,
        });
    }
    Ok(records)
}

fn walk_error(dir: &Path, err: ignore::Error) -> TaskError {
    let context = format!("failed to list {}", dir.display());
    let message = err.to_string();
    match err.into_io_error() {
        Some(io) => TaskError::io(context, io),
        None => TaskError::io(context, std::io::Error::other(message)),
    }
}
