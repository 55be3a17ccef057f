//! MIME type detection module
//!
//! Content types are resolved in two steps: the configured override table is
//! consulted first (keyed by lowercased extension), then a built-in
//! extension table, falling back to `application/octet-stream`.

use std::collections::HashMap;
use std::path::Path;

/// Resolve the Content-Type for a file path.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use std::path::Path;
/// use devserve::http::mime::content_type_for;
///
/// let mut overrides = HashMap::new();
/// overrides.insert("js".to_string(), "application/javascript".to_string());
/// assert_eq!(
///     content_type_for(Path::new("app.js"), &overrides),
///     "application/javascript"
/// );
/// assert_eq!(
///     content_type_for(Path::new("movie.mp4"), &overrides),
///     "video/mp4"
/// );
/// ```
pub fn content_type_for(path: &Path, overrides: &HashMap<String, String>) -> String {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    if let Some(ext) = extension.as_deref() {
        if let Some(content_type) = overrides.get(ext) {
            return content_type.clone();
        }
    }

    guess_content_type(extension.as_deref()).to_string()
}

/// Get MIME Content-Type based on file extension alone
pub fn guess_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        // Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",

        // JavaScript/WASM
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",

        // Video
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("ogg" | "ogv") => "video/ogg",

        // Audio
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Documents
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("gz" | "gzip") => "application/gzip",

        // Default
        _ => "application/octet-stream",
    }
}
