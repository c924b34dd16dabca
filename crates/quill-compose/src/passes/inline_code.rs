//! Inline code spans.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::placeholder::{Placeholders, RegionKind};
use crate::util::escape_html;

static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

/// Render `` `code` `` spans and protect the result.
pub(super) fn apply(text: &str, regions: &mut Placeholders) -> String {
    INLINE_CODE_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let html = format!(r#"<code class="inline-code">{}</code>"#, escape_html(&caps[1]));
            regions.protect(RegionKind::InlineCode, html)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_code_is_escaped() {
        let mut regions = Placeholders::default();
        let text = apply("Use `<div>` here", &mut regions);
        assert_eq!(
            regions.restore(&text),
            r#"Use <code class="inline-code">&lt;div&gt;</code> here"#
        );
    }

    #[test]
    fn test_inline_code_content_is_hidden_from_later_passes() {
        let mut regions = Placeholders::default();
        let text = apply("`**not bold**` and `[a](b)`", &mut regions);
        assert!(!text.contains("**"));
        assert!(!text.contains("]("));
        assert_eq!(regions.len(), 2);
    }

    #[test]
    fn test_unpaired_backtick_is_literal() {
        let mut regions = Placeholders::default();
        assert_eq!(apply("a ` b", &mut regions), "a ` b");
    }
}
