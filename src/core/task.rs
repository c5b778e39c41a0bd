//! Units of work handed to the transcoder.

use std::path::{Path, PathBuf};

use crate::core::Density;
use crate::utils::output_name;

/// A matched source file and the name its outputs are derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path used to open the SVG
    pub path: PathBuf,
    /// Name the output file name is derived from (usually the file name)
    pub name: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Builds a source whose name is the path's final component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }
}

/// A single (source, density) rasterization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeJob {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub density: Density,
}

impl TranscodeJob {
    /// Plans the job writing `source` into `<output_dir>/drawable-<density>/`.
    pub fn plan(source: &SourceFile, output_dir: &Path, density: Density) -> Self {
        Self {
            source: source.path.clone(),
            destination: output_dir
                .join(density.directory_name())
                .join(output_name(&source.name)),
            density,
        }
    }
}
