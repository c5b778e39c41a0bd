pub mod error;
pub mod formats;
pub mod fs;
pub mod validation;

pub use error::{DensityError, RasterError, TranscodeError, TranscodeResult};
pub use formats::{RASTER_EXTENSION, output_name};
pub use fs::{collect_sources, compile_patterns, ensure_dir};
pub use validation::{validate_settings, validate_width};
