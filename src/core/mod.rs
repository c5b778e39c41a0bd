//! Core domain types.
//!
//! - [`Density`]: the fixed table of Android density buckets
//! - [`DensityRange`]: densities expanded from a `<lower>-<upper>` expression
//! - [`TranscodeSettings`]: configuration for a run
//! - [`SourceFile`] / [`TranscodeJob`]: units of work
//! - [`DrawableOutput`] / [`BatchSummary`]: results

mod density;
mod range;
mod task;
mod types;

pub use density::Density;
pub use range::{DEFAULT_DENSITIES, DensityRange};
pub use task::{SourceFile, TranscodeJob};
pub use types::{BatchSummary, DrawableOutput, TranscodeSettings};
