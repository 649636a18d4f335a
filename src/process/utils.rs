use std::path::{Path, PathBuf};

/// Whitespace as the upstream dataset tooling counts it: Unicode white space
/// plus the ASCII information separators `\x1c`..=`\x1f`.
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Flatten a multi-line field onto one line.
///
/// Line breaks become spaces, every whitespace run collapses to a single
/// ASCII space and the ends are trimmed.
pub fn clean_multiline_text(raw: &str) -> String {
    raw.replace(['\n', '\r'], " ")
        .split(is_separator)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `cases.csv` → `cases.jsonl`; a path without an extension gains one.
pub fn default_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    input.as_ref().with_extension("jsonl")
}

/// Cut `s` to at most `max_chars` characters, appending `...` when shortened.
pub fn preview(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
        None => s.to_string(),
    }
}
