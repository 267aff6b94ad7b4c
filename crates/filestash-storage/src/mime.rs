//! Content type inference from item names.

/// MIME type for an item name, by extension.
///
/// Unknown or missing extensions map to `application/octet-stream`.
pub fn content_type_for(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
