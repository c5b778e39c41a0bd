use crate::core::TranscodeSettings;
use crate::utils::{TranscodeError, TranscodeResult, compile_patterns};

/// Validates settings before any file is touched and returns the base width.
pub fn validate_settings(settings: &TranscodeSettings) -> TranscodeResult<u32> {
    let width = validate_width(settings.width)?;

    if settings.output_dir.as_os_str().is_empty() {
        return Err(TranscodeError::config("An output directory must be specified"));
    }

    compile_patterns(&settings.include)?;
    Ok(width)
}

/// Rejects an absent or zero width.
pub fn validate_width(width: Option<u32>) -> TranscodeResult<u32> {
    match width {
        Some(width) if width > 0 => Ok(width),
        _ => Err(TranscodeError::MissingWidth),
    }
}
