//! Shared text helpers.

use std::sync::LazyLock;

use regex::Regex;

use crate::placeholder;

/// Maximum anchor id length in code points.
const MAX_ANCHOR_LEN: usize = 50;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Derive a heading anchor id from its visible text.
///
/// Lowercases, keeps ASCII word characters, whitespace, kana and CJK
/// ideographs, turns each whitespace run into a single `-`, and truncates
/// to 50 code points. Identical headings produce identical ids.
///
/// # Examples
///
/// ```
/// use quill_compose::anchor_id;
///
/// assert_eq!(anchor_id("Hello, World! 123"), "hello-world-123");
/// assert_eq!(anchor_id("はじめに 2024"), "はじめに-2024");
/// ```
#[must_use]
pub fn anchor_id(text: &str) -> String {
    let text = placeholder::strip_tokens(text);
    let mut id = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for c in text.trim().to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                id.push('-');
            }
            in_whitespace = true;
        } else if is_anchor_char(c) {
            id.push(c);
            in_whitespace = false;
        }
    }

    id.chars().take(MAX_ANCHOR_LEN).collect()
}

fn is_anchor_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == '_'
        || matches!(c, '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}' | '\u{4E00}'..='\u{9FAF}')
}

/// Reduce markup to plain text suitable for an attribute value.
pub(crate) fn plain_text(s: &str) -> String {
    let without_tokens = placeholder::strip_tokens(s);
    TAG_RE.replace_all(&without_tokens, "").trim().to_owned()
}
