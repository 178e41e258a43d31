//! Parameter value quoting for `-Dkey=value` tokens
//!
//! Scoped to the superset of characters maven's parameter syntax requires
//! escaping, not a general shell-quoting facility.

/// Quote characters recognized as wrapping a value (straight and curly).
const WRAPPING_QUOTES: &[char] = &['"', '\'', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}'];

/// Characters (besides whitespace) that force a value to be quoted.
const ESCAPE_TRIGGERS: &str = ";&%/!#<>|(){}[]*?$'\"\\";

/// Render a raw parameter value as a shell-safe string.
///
/// An already-wrapped value (same quote character at both ends) is unwrapped
/// first and its quote character reused; otherwise `"` is used. If the
/// unwrapped value contains whitespace or any of the trigger characters, every
/// occurrence of the quote character not already preceded by a backslash is
/// escaped and the whole value is re-wrapped. A value needing no escaping is
/// returned unwrapped and unescaped.
///
/// Not idempotent: quoting an already-quoted-and-escaped value may wrap again.
pub fn quote(raw: &str) -> String {
    let (inner, quote_char) = strip_wrapping(raw);
    if !needs_escaping(inner) {
        return inner.to_string();
    }

    let mut quoted = String::with_capacity(inner.len() + 2);
    quoted.push(quote_char);
    let mut previous = None;
    for c in inner.chars() {
        if c == quote_char && previous != Some('\\') {
            quoted.push('\\');
        }
        quoted.push(c);
        previous = Some(c);
    }
    quoted.push(quote_char);
    quoted
}

/// Strip a single matching pair of wrapping quotes, returning the inner value
/// and the quote character to reuse (`"` when the value was not wrapped).
fn strip_wrapping(raw: &str) -> (&str, char) {
    let mut chars = raw.chars();
    if let (Some(first), Some(last)) = (chars.next(), chars.next_back()) {
        if first == last && WRAPPING_QUOTES.contains(&first) {
            let inner = &raw[first.len_utf8()..raw.len() - last.len_utf8()];
            return (inner, first);
        }
    }
    (raw, '"')
}

fn needs_escaping(value: &str) -> bool {
    value.chars().any(|c| c.is_whitespace() || ESCAPE_TRIGGERS.contains(c))
}
