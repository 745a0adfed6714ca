// Cleanup of raw model output before field extraction.
// Models decorate responses with markdown and occasionally emit invisible
// Unicode; either can hide an ordinal marker from the line scanner.

use std::sync::LazyLock;

use regex::Regex;

/// Markdown emphasis runs (`*`, `**`, `***`).
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*+").unwrap());

/// Markdown heading prefixes at line start.
static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#{1,6}[ \t]*").unwrap());

/// Clean raw model output: normalize line endings, drop invisible
/// characters, and strip markdown decoration. Content characters,
/// including Arabic script and Arabic-Indic digits, pass through
/// untouched.
pub fn clean_model_output(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n");
    let visible = remove_invisible_chars(&unified);
    let no_emphasis = EMPHASIS.replace_all(&visible, "");
    HEADING.replace_all(&no_emphasis, "").into_owned()
}

/// Remove zero-width and directional formatting characters plus stray
/// control characters. Preserves standard whitespace.
fn remove_invisible_chars(text: &str) -> String {
    text.chars()
        .filter(|c| {
            if *c == ' ' || *c == '\n' || *c == '\t' || *c == '\r' {
                return true;
            }
            if matches!(
                *c,
                '\u{200B}'  // Zero-width space
                | '\u{200C}' // Zero-width non-joiner
                | '\u{200D}' // Zero-width joiner
                | '\u{200E}' // Left-to-right mark
                | '\u{200F}' // Right-to-left mark
                | '\u{202A}'..='\u{202E}' // Directional embedding/override
                | '\u{2060}' // Word joiner
                | '\u{FEFF}' // BOM / zero-width no-break space
            ) {
                return false;
            }
            !c.is_control()
        })
        .collect()
}
