//! Rasterization pipeline.
//!
//! # Architecture
//!
//! - [`Rasterizer`] / [`ResvgRasterizer`]: SVG stream → PNG stream at a width hint.
//! - [`Transcoder`]: one source at one density, with file handling and error translation.
//! - [`BatchProcessor`]: every density for every source, sequential and fail-fast.
//! - [`WorkerPool`]: the same batch spread over a bounded set of blocking workers.

mod batch;
mod rasterizer;
#[cfg(test)]
mod testing;
mod transcoder;

pub use batch::{BatchProcessor, WorkerPool};
pub use rasterizer::{Rasterizer, ResvgRasterizer};
pub use transcoder::{Transcoder, target_width};
