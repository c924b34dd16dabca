//! Code fence detection.
//!
//! Fences use backticks or tildes (three or more). The closing fence must
//! use the same character and be at least as long as the opening fence.

/// An opened code fence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fence<'a> {
    /// Character used for the fence (backtick or tilde).
    fence_char: char,
    /// Length of the opening fence (minimum length for closing).
    fence_len: usize,
    /// First word of the info string, if any.
    label: Option<&'a str>,
}

impl<'a> Fence<'a> {
    /// Detect an opening fence on a line.
    pub(crate) fn open(line: &'a str) -> Option<Self> {
        let trimmed = line.trim_start();
        let first = trimmed.chars().next()?;
        if first != '`' && first != '~' {
            return None;
        }

        let count = trimmed.chars().take_while(|&c| c == first).count();
        if count < 3 {
            return None;
        }

        let info = trimmed[count..].trim();
        // Backtick fences cannot carry backticks in the info string.
        if first == '`' && info.contains('`') {
            return None;
        }

        Some(Self {
            fence_char: first,
            fence_len: count,
            label: info.split_whitespace().next(),
        })
    }

    /// Check if a line closes this fence.
    ///
    /// The closing fence must use the same character, be at least as long
    /// as the opening one, and carry nothing but trailing whitespace.
    pub(crate) fn closes(&self, line: &str) -> bool {
        let trimmed = line.trim_start();
        let count = trimmed
            .chars()
            .take_while(|&c| c == self.fence_char)
            .count();
        if count < self.fence_len {
            return false;
        }
        trimmed[count * self.fence_char.len_utf8()..]
            .chars()
            .all(char::is_whitespace)
    }

    /// Display label from the info string.
    pub(crate) fn label(&self) -> Option<&'a str> {
        self.label
    }

    /// Whether the fence holds diagram source.
    pub(crate) fn is_diagram(&self) -> bool {
        self.label
            .is_some_and(|label| label.eq_ignore_ascii_case("mermaid"))
    }
}
