use std::borrow::Cow;

const TOKEN_FIELDS: [&str; 2] = ["\"access_token\"", "\"refresh_token\""];

fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    let hay = haystack.as_bytes();
    let nee = needle.as_bytes();
    if nee.is_empty() {
        return Some(0);
    }
    if nee.len() > hay.len() {
        return None;
    }

    (0..=hay.len() - nee.len()).find(|&i| hay[i..i + nee.len()].eq_ignore_ascii_case(nee))
}

fn is_token_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '~' | '+' | '/' | '=')
}

/// Replaces the credential that follows every `Bearer ` marker.
fn redact_bearer(text: &str) -> String {
    const MARKER: &str = "bearer ";
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(idx) = find_ascii_case_insensitive(rest, MARKER) {
        out.push_str(&rest[..idx + MARKER.len()]);
        rest = &rest[idx + MARKER.len()..];

        let consumed: usize = rest
            .chars()
            .take_while(|ch| is_token_char(*ch))
            .map(char::len_utf8)
            .sum();
        if consumed > 0 {
            out.push_str("REDACTED");
        }
        rest = &rest[consumed..];
    }
    out.push_str(rest);
    out
}

/// Replaces the string value of `"access_token"` / `"refresh_token"` JSON fields.
fn redact_token_fields(text: &str) -> String {
    let mut value = text.to_string();
    for field in TOKEN_FIELDS {
        if !value.contains(field) {
            continue;
        }
        let mut out = String::with_capacity(value.len());
        let mut rest = value.as_str();
        while let Some(idx) = rest.find(field) {
            out.push_str(&rest[..idx + field.len()]);
            rest = &rest[idx + field.len()..];

            let Some(open) = rest.find('"') else {
                break;
            };
            // Only a `:` and whitespace may sit between the key and its value.
            if !rest[..open].chars().all(|c| c == ':' || c.is_whitespace()) {
                continue;
            }
            out.push_str(&rest[..=open]);
            rest = &rest[open + 1..];
            let Some(close) = rest.find('"') else {
                break;
            };
            out.push_str("REDACTED");
            rest = &rest[close..];
        }
        out.push_str(rest);
        value = out;
    }
    value
}

/// Strips bearer credentials and token fields from text that may end up in
/// logs or on screen.
pub fn redact_secrets(input: &str) -> Cow<'_, str> {
    let value = redact_token_fields(&redact_bearer(input));
    if value == input {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(value)
    }
}
