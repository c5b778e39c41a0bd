use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::debug;
use walkdir::WalkDir;

use crate::core::SourceFile;
use crate::utils::{TranscodeError, TranscodeResult};

/// `*` stays within one path segment, `**` spans directories.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Creates `dir` and any missing parents. Safe to call repeatedly and concurrently.
pub fn ensure_dir(dir: impl AsRef<Path>) -> TranscodeResult<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| TranscodeError::destination_unwritable(dir, e))?;
    Ok(dir.to_path_buf())
}

/// Compiles include patterns.
pub fn compile_patterns(patterns: &[String]) -> TranscodeResult<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| TranscodeError::Pattern {
                pattern: p.clone(),
                message: e.to_string(),
            })
        })
        .collect()
}

/// Walks `root` and returns every regular file whose root-relative path
/// matches one of `patterns`, in file-name order.
///
/// Each source is named after its file name; directories below `root` do not
/// appear in output names.
pub fn collect_sources(root: impl AsRef<Path>, patterns: &[String]) -> TranscodeResult<Vec<SourceFile>> {
    let root = root.as_ref();
    let patterns = compile_patterns(patterns)?;
    if patterns.is_empty() {
        return Ok(Vec::new());
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(walk_error)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = relative_string(relative);

        if patterns.iter().any(|p| p.matches_with(&relative, MATCH_OPTIONS)) {
            debug!("Matched source: {}", relative);
            sources.push(SourceFile::from_path(entry.path()));
        }
    }

    Ok(sources)
}

/// Broken links, loops and unreadable directories all fail enumeration.
fn walk_error(err: walkdir::Error) -> TranscodeError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    let message = err.to_string();
    let source = err.into_io_error().unwrap_or_else(|| io::Error::other(message));
    TranscodeError::source_unreadable(path, source)
}

/// Joins path components with `/` so patterns behave the same on every platform.
fn relative_string(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
