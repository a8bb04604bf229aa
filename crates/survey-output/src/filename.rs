//! Download file names and MIME types.

use std::sync::LazyLock;

use chrono::{Local, NaiveDateTime};
use regex::Regex;
use survey_model::{ExportFormat, FALLBACK_MIME_TYPE};

/// Base name used when sanitizing leaves nothing meaningful.
pub const DEFAULT_BASE_NAME: &str = "export_data";

/// Anything that is not a Unicode word character or a hyphen.
static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\-]").expect("Invalid filename regex"));

/// Replaces unsafe characters with `_`, falling back to
/// [`DEFAULT_BASE_NAME`] when the result is empty or only underscores.
pub fn sanitize_base_name(base: &str) -> String {
    let safe = UNSAFE_FILENAME_CHARS.replace_all(base, "_");
    if safe.trim_matches('_').is_empty() {
        DEFAULT_BASE_NAME.to_string()
    } else {
        safe.into_owned()
    }
}

/// `<sanitized base>_<YYYYMMDD_HHMMSS>.<ext>` stamped with the local time.
pub fn generate_filename(base: &str, format: ExportFormat) -> String {
    generate_filename_at(base, format, Local::now().naive_local())
}

/// Same as [`generate_filename`] with an explicit timestamp.
pub fn generate_filename_at(base: &str, format: ExportFormat, when: NaiveDateTime) -> String {
    format!(
        "{}_{}.{}",
        sanitize_base_name(base),
        when.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// MIME type for a format selector name; unknown names get
/// `application/octet-stream`.
pub fn mime_type(format: &str) -> &'static str {
    ExportFormat::ALL
        .into_iter()
        .find(|candidate| candidate.as_str() == format)
        .map_or(FALLBACK_MIME_TYPE, ExportFormat::mime_type)
}
