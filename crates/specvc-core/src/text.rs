//! Text helpers for example formatting.

/// Escapes text for interpolation into markup.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Hard-wraps text to `width` columns, preserving existing line breaks.
///
/// Long JWT and proof lines would otherwise force horizontal scrolling in the
/// rendered example tabs.
pub fn wrap_columns(text: &str, width: usize) -> String {
    text.lines()
        .flat_map(|line| {
            let chars: Vec<char> = line.chars().collect();
            if chars.is_empty() {
                vec![String::new()]
            } else {
                chars
                    .chunks(width)
                    .map(|chunk| chunk.iter().collect())
                    .collect()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
