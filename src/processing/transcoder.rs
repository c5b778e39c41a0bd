//! Single (source, density) transcoding.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::core::{Density, DrawableOutput, TranscodeJob};
use crate::processing::Rasterizer;
use crate::utils::{RasterError, TranscodeError, TranscodeResult};

/// Width hint for `density` given the mdpi `base_width`.
///
/// mdpi returns the base width unchanged; other buckets multiply in `f64` and
/// narrow to `f32`. Pixel truncation happens later, in the rasterizer.
pub fn target_width(base_width: u32, density: Density) -> f32 {
    if density == Density::BASELINE {
        base_width as f32
    } else {
        (f64::from(base_width) * density.scale()) as f32
    }
}

/// Rasterizes one source at one density.
pub struct Transcoder<R> {
    base_width: u32,
    rasterizer: R,
}

impl<R: Rasterizer> Transcoder<R> {
    pub fn new(base_width: u32, rasterizer: R) -> Self {
        Self {
            base_width,
            rasterizer,
        }
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn target_width(&self, density: Density) -> f32 {
        target_width(self.base_width, density)
    }

    /// Transcodes `source` into `destination` at `density`.
    ///
    /// Both files are closed on every path out of this function. A destination
    /// that was created before a failure is left on disk.
    pub fn transcode(
        &self,
        source: &Path,
        destination: &Path,
        density: Density,
    ) -> TranscodeResult<DrawableOutput> {
        let width = self.target_width(density);

        let mut input = File::open(source)
            .map(BufReader::new)
            .map_err(|e| TranscodeError::source_unreadable(source, e))?;
        let mut output = File::create(destination)
            .map(BufWriter::new)
            .map_err(|e| TranscodeError::destination_unwritable(destination, e))?;

        self.rasterizer
            .rasterize(&mut input, &mut output, width)
            .map_err(|e| translate(e, source, destination))?;
        output
            .flush()
            .map_err(|e| TranscodeError::destination_unwritable(destination, e))?;

        debug!(
            "{} → {} ({}, {} px)",
            source.display(),
            destination.display(),
            density,
            width
        );

        Ok(DrawableOutput {
            source: source.to_path_buf(),
            path: destination.to_path_buf(),
            density,
            width,
        })
    }

    pub fn run(&self, job: &TranscodeJob) -> TranscodeResult<DrawableOutput> {
        self.transcode(&job.source, &job.destination, job.density)
    }
}

/// Maps backend failures onto the transcoder's error taxonomy.
fn translate(err: RasterError, source: &Path, destination: &Path) -> TranscodeError {
    match err {
        RasterError::Read(e) => TranscodeError::source_unreadable(source, e),
        RasterError::Write(e) => TranscodeError::destination_unwritable(destination, e),
        other => TranscodeError::RasterizationFailed {
            path: source.to_path_buf(),
            source: other,
        },
    }
}
