//! Filename template rendering

use crate::core::video::Video;
use regex::Regex;

/// The default filename template.
pub const DEFAULT_TEMPLATE: &str = "$title";

/// Replace characters that are invalid in filenames across platforms with
/// underscores and trim surrounding spaces.
pub fn sanitize_filename(name: &str) -> String {
    let invalid_chars = Regex::new(r#"[<>:"/\\|?*]"#).unwrap();
    invalid_chars.replace_all(name, "_").trim().to_string()
}

/// Render a filename from a template and video metadata.
///
/// Supported placeholders:
///   - `$title`: video title
///   - `$author`: channel name
///   - `$id`: video ID
///   - `$uploadDate`: upload date in YYYY-MM-DD form (empty when unknown)
///   - `$num`: playlist number in brackets `[N]` (empty when not given)
///   - `$numc`: playlist number without brackets
///
/// Placeholder values are sanitized and the container extension is
/// appended.
pub fn apply_template(template: &str, video: &Video, container: &str, number: &str) -> String {
    let mut result = template.to_string();

    // $numc must be replaced before $num or its prefix would be consumed.
    if number.is_empty() {
        result = result.replace("$numc", "");
        result = result.replace("$num", "");
    } else {
        result = result.replace("$numc", number);
        result = result.replace("$num", &format!("[{}]", number));
    }

    result = result.replace("$id", &sanitize_filename(&video.id));
    result = result.replace("$title", &sanitize_filename(&video.title));
    result = result.replace("$author", &sanitize_filename(&video.author.name));

    let upload_date = video.upload_date.as_deref().unwrap_or("");
    result = result.replace("$uploadDate", upload_date);

    format!("{}.{}", result.trim(), container)
}
