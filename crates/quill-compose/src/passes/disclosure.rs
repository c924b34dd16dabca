//! Collapsible disclosure blocks.
//!
//! ```text
//! :::details Summary line
//! body, processed like any other content
//! :::
//! ```

use crate::Locale;
use crate::strings::strings;

const OPEN_MARKER: &str = ":::details";
const CLOSE_MARKER: &str = ":::";
const CLOSE_HTML: &str = "</div></details>";

/// Rewrite disclosure markers into `<details>` markup.
///
/// The open and close tags land on their own lines so the body keeps
/// flowing through the line-based passes. Blocks left open at the end of the
/// document are closed there.
pub(super) fn apply(text: &str, locale: Locale) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut depth = 0usize;

    for line in text.lines() {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix(OPEN_MARKER)
            && (rest.is_empty() || rest.starts_with(char::is_whitespace))
        {
            let summary = match rest.trim() {
                "" => strings(locale).details_summary,
                summary => summary,
            };
            out.push(format!(
                r#"<details class="disclosure"><summary class="disclosure-summary">{summary}</summary><div class="disclosure-body">"#
            ));
            depth += 1;
        } else if trimmed == CLOSE_MARKER && depth > 0 {
            out.push(CLOSE_HTML.to_owned());
            depth -= 1;
        } else {
            out.push(line.to_owned());
        }
    }

    out.extend(std::iter::repeat_n(CLOSE_HTML.to_owned(), depth));
    out.join("\n")
}
