//! Core types for transcoding settings and results.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_DENSITIES, Density, DensityRange};
use crate::utils::{TranscodeError, TranscodeResult};

/// Configuration for one transcoding run.
///
/// Mirrors the build-script DSL: a density range, include patterns, an output
/// root and a base width. Loadable from camelCase JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscodeSettings {
    /// Densities to produce; the default triplet when absent
    #[serde(default)]
    pub densities: Option<DensityRange>,
    /// Glob patterns selecting sources, relative to the project directory
    #[serde(default)]
    pub include: Vec<String>,
    /// Output root receiving the `drawable-*` directories
    #[serde(default, rename = "into")]
    pub output_dir: PathBuf,
    /// Output width in pixels at mdpi
    #[serde(default)]
    pub width: Option<u32>,
    /// Directory the include patterns are rooted at
    #[serde(default)]
    pub project_dir: Option<PathBuf>,
}

impl TranscodeSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> TranscodeResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            TranscodeError::config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&contents).map_err(|e| {
            TranscodeError::config(format!("Invalid settings in {}: {}", path.display(), e))
        })
    }

    /// Sets the density range from an expression such as `mdpi-xhdpi`.
    pub fn densities(mut self, expression: &str) -> TranscodeResult<Self> {
        self.densities = Some(DensityRange::resolve(expression)?);
        Ok(self)
    }

    /// Adds include patterns.
    pub fn include<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn into_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn project_dir(mut self, project_dir: impl Into<PathBuf>) -> Self {
        self.project_dir = Some(project_dir.into());
        self
    }

    /// The configured densities, or [`DEFAULT_DENSITIES`].
    pub fn effective_densities(&self) -> &[Density] {
        self.densities
            .as_ref()
            .map(DensityRange::densities)
            .unwrap_or(&DEFAULT_DENSITIES[..])
    }

    /// Project directory, defaulting to the working directory.
    pub fn effective_project_dir(&self) -> &Path {
        self.project_dir.as_deref().unwrap_or(Path::new("."))
    }
}

/// One PNG written by the transcoder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawableOutput {
    /// Source SVG
    pub source: PathBuf,
    /// Written PNG
    pub path: PathBuf,
    pub density: Density,
    /// Width hint handed to the rasterizer
    pub width: f32,
}

/// Outcome of a completed batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Number of sources transcoded
    pub sources: usize,
    /// Every file written, in completion order
    pub outputs: Vec<DrawableOutput>,
}
