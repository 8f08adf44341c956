//! Filesystem-safe name mapping for page and folder titles.

/// Map a title to a filesystem-legal name.
///
/// Every character that is not ASCII alphanumeric, space, underscore, or
/// hyphen is replaced with an underscore; leading and trailing whitespace
/// is trimmed. Total over any input and idempotent.
#[must_use]
pub fn safe_filename(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == ' ' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_owned()
}
