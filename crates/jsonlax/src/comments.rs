//! Helpers for comment collection.

use alloc::{
    borrow::Cow,
    string::{String, ToString},
};

/// Normalizes line endings in raw comment bytes: `\r\n` and lone `\r`
/// become `\n`. Comment text is annotation data, so invalid UTF-8 is
/// replaced rather than reported.
pub(crate) fn normalize_eol(raw: &[u8]) -> String {
    let text = match String::from_utf8_lossy(raw) {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    };
    if !text.contains('\r') {
        return text;
    }
    let mut normalized = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            normalized.push('\n');
        } else {
            normalized.push(c);
        }
    }
    normalized
}

pub(crate) fn contains_newline(bytes: &[u8]) -> bool {
    bytes.iter().any(|&c| c == b'\n' || c == b'\r')
}
