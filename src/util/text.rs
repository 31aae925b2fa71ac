// src/util/text.rs

/// First non-empty line of `content`, trimmed and cut to at most `max_chars` characters.
///
/// # Examples
///
/// ```
/// use notesapp::util::text::preview;
///
/// assert_eq!(preview("\n  Buy milk  \nand eggs", 20), "Buy milk");
/// assert_eq!(preview("abcdefgh", 5), "abcd…");
/// ```
pub fn preview(content: &str, max_chars: usize) -> String {
    let line = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");

    if line.chars().count() <= max_chars {
        return line.to_string();
    }

    let mut cut: String = line.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
