/// Extension (without the dot) of every file the transcoder writes.
pub const RASTER_EXTENSION: &str = "png";

/// Derives the output file name for a source name.
///
/// A trailing `.` followed by one or more word characters is replaced with
/// `.png`; names without such a suffix get `.png` appended. Dots earlier in
/// the name are left alone.
pub fn output_name(name: &str) -> String {
    let stem = match name.rfind('.') {
        Some(dot) if is_extension(&name[dot + 1..]) => &name[..dot],
        _ => name,
    };
    format!("{stem}.{RASTER_EXTENSION}")
}

fn is_extension(suffix: &str) -> bool {
    !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
