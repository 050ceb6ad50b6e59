

/// Trims the name, turns URL-style underscores into spaces and collapses runs of whitespace.
pub fn normalize_title(name: &str) -> String {
    name.replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}


#[inline]
pub fn truncate_for_log(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}
