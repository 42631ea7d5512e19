use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::scan::files_with_extension;

/// Delimiter used by the classpath setting, matching what the instrumenter
/// expects regardless of platform.
pub const CLASSPATH_DELIMITER: char = ';';

/// Splits a classpath spec into individual entries. Empty entries are kept
/// as-is; resolution precedence follows the original order.
pub fn split_classpath(spec: &str) -> Vec<PathBuf> {
    spec.split(CLASSPATH_DELIMITER).map(PathBuf::from).collect()
}

/// Builds the full resolution classpath: user entries first, then every jar
/// found recursively under the JDK libs directory. Any I/O error while
/// walking aborts the run; a partial classpath is never used.
pub fn assemble(spec: &str, jdk_libs_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = split_classpath(spec);
    entries.extend(files_with_extension(jdk_libs_dir, "jar")?);
    Ok(entries)
}
