// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod processing;

// Public exports for external consumers
pub use crate::core::{
    BatchSummary, DEFAULT_DENSITIES, Density, DensityRange, DrawableOutput, SourceFile,
    TranscodeJob, TranscodeSettings,
};
pub use processing::{BatchProcessor, Rasterizer, ResvgRasterizer, Transcoder, WorkerPool, target_width};
pub use utils::{
    DensityError, RasterError, TranscodeError, TranscodeResult, collect_sources, output_name,
};

// This library file is used as a public API for consuming this crate as a library.
// The command-line entry point is in main.rs.
