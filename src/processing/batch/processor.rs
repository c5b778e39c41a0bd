use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::{BatchSummary, Density, DrawableOutput, SourceFile, TranscodeJob, TranscodeSettings};
use crate::processing::{Rasterizer, Transcoder};
use crate::utils::{TranscodeResult, ensure_dir, validate_settings};

/// Transcodes sources into every configured density, one after another.
pub struct BatchProcessor<R> {
    transcoder: Transcoder<R>,
    densities: Vec<Density>,
    output_dir: PathBuf,
}

impl<R: Rasterizer> BatchProcessor<R> {
    /// Validates `settings` and prepares a processor.
    ///
    /// Fails with `MissingWidth` before touching the filesystem when no usable
    /// width is configured.
    pub fn new(settings: &TranscodeSettings, rasterizer: R) -> TranscodeResult<Self> {
        let width = validate_settings(settings)?;
        let densities = settings.effective_densities().to_vec();
        debug!(
            "Creating BatchProcessor: width {}, densities [{}]",
            width,
            densities.iter().map(|d| d.qualifier()).collect::<Vec<_>>().join(", ")
        );
        Ok(Self {
            transcoder: Transcoder::new(width, rasterizer),
            densities,
            output_dir: settings.output_dir.clone(),
        })
    }

    pub fn densities(&self) -> &[Density] {
        &self.densities
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn transcoder(&self) -> &Transcoder<R> {
        &self.transcoder
    }

    /// One job per density, in density order.
    pub fn plan(&self, source: &SourceFile) -> Vec<TranscodeJob> {
        self.densities
            .iter()
            .map(|&density| TranscodeJob::plan(source, &self.output_dir, density))
            .collect()
    }

    /// Transcodes one source into every density.
    ///
    /// Stops at the first failing density; outputs written for earlier
    /// densities stay on disk.
    pub fn transcode_all(&self, source: &SourceFile) -> TranscodeResult<Vec<DrawableOutput>> {
        let mut outputs = Vec::with_capacity(self.densities.len());
        for job in self.plan(source) {
            if let Some(dir) = job.destination.parent() {
                ensure_dir(dir)?;
            }
            outputs.push(self.transcoder.run(&job)?);
        }
        Ok(outputs)
    }

    /// Transcodes `sources` in delivery order, aborting on the first failure.
    pub fn process<I>(&self, sources: I) -> TranscodeResult<BatchSummary>
    where
        I: IntoIterator<Item = SourceFile>,
    {
        ensure_dir(&self.output_dir)?;

        let mut summary = BatchSummary::default();
        for source in sources {
            match self.transcode_all(&source) {
                Ok(outputs) => {
                    summary.sources += 1;
                    summary.outputs.extend(outputs);
                }
                Err(e) => {
                    warn!("Transcoding {} failed: {}", source.path.display(), e);
                    return Err(e);
                }
            }
        }

        if summary.sources == 0 {
            info!("No source files matched; nothing to transcode");
        } else {
            info!(
                "Transcoded {} sources into {} drawables",
                summary.sources,
                summary.outputs.len()
            );
        }
        Ok(summary)
    }
}
