//! Bold emphasis and links.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::util::escape_html;

pub(super) static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*\n]+?)\*\*").unwrap());

pub(super) static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]\n]+)\]\(([^)\s]+)\)").unwrap());

/// Whether a link target stays on this site.
fn is_internal(href: &str) -> bool {
    href.starts_with('#') || (href.starts_with('/') && !href.starts_with("//"))
}

/// Rewrite `**bold**` and `[label](href)`.
pub(super) fn apply(text: &str) -> String {
    let text = BOLD_RE.replace_all(text, "<strong>$1</strong>");
    LINK_RE
        .replace_all(&text, |caps: &Captures<'_>| {
            let label = &caps[1];
            let href = &caps[2];
            let target = if is_internal(href) {
                ""
            } else {
                r#" target="_blank""#
            };
            format!(
                r#"<a class="link" href="{}"{target}>{label}</a>"#,
                escape_html(href)
            )
        })
        .into_owned()
}
