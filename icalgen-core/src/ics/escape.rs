//! TEXT value preparation (RFC 5545 §3.3.11).
//!
//! The icalendar crate escapes TEXT-typed properties itself but only knows
//! about `\n` line breaks and has no notion of control characters, so values
//! are cleaned here before they reach it.

/// Normalize line breaks to `\n` and drop control characters.
///
/// CRLF and lone CR become `\n`. Every other control character except HTAB
/// is removed, since TSAFE-CHAR excludes them.
pub fn clean_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    out.push('\n');
                }
            }
            '\n' | '\t' => out.push(c),
            c if c.is_control() => {}
            _ => out.push(c),
        }
    }

    out
}

/// Escape a cleaned value for a property the crate does not treat as TEXT.
///
/// Same substitutions the crate applies to TEXT values.
pub fn escape_text(value: &str) -> String {
    clean_text(value)
        .replace('\\', "\\\\")
        .replace(',', "\\,")
        .replace(';', "\\;")
        .replace('\n', "\\n")
}
