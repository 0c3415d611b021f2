//! SQL-safe identifier sanitization.

/// Strips characters from a string that are not safe in a SQL identifier.
///
/// ASCII letters and digits are kept as-is, spaces become underscores, and
/// every other character (punctuation, non-ASCII, control characters) is
/// dropped rather than replaced. Underscores pass through unchanged, which
/// makes the function idempotent.
///
/// A string made entirely of disallowed characters sanitizes to `""`.
///
/// ```
/// use xlhelper::sql_safe_string;
///
/// assert_eq!(sql_safe_string("Order #123!"), "Order_123");
/// ```
pub fn sql_safe_string(text: &str) -> String {
    text.chars()
        .filter_map(|character| match character {
            ' ' | '_' => Some('_'),
            _ if character.is_ascii_alphanumeric() => Some(character),
            _ => None,
        })
        .collect()
}
