//! Utility functions for SQLite storage operations.

/// Escape character used with `LIKE ... ESCAPE`.
pub const LIKE_ESCAPE: char = '\\';

/// Builds a `LIKE` pattern matching `term` anywhere in the column.
///
/// `%`, `_` and the escape character itself are escaped so user input is
/// matched literally. Use together with `.escape(LIKE_ESCAPE)`.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
