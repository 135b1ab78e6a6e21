//! Markup-safe normalization of token values.

use std::borrow::Cow;

/// Normalize a value before it is compared, stored or rendered.
///
/// Quote characters (`"` and `'`) are removed, not escaped. Angle brackets
/// become `&lt;` and `&gt;`. Nothing else is touched, so `&` passes through
/// and the function is idempotent.
///
/// All duplicate detection and candidate matching in the tokenizer happens on
/// sanitized strings.
pub fn sanitize(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['"', '\'', '<', '>']) {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        match c {
            '"' | '\'' => {}
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
