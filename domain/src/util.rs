//! Shared utility functions.

/// Shorten `s` to at most `max_chars` characters for one-line displays and
/// log previews, collapsing newlines and appending `…` when cut.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat: String = s
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut out: String = flat.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
