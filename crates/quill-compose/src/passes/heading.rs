//! Level 2 and 3 headings with anchor ids and a self-link control.

use std::sync::LazyLock;

use regex::Regex;

use crate::Locale;
use crate::strings::strings;
use crate::util::{anchor_id, escape_html, plain_text};

use super::inline::{BOLD_RE, LINK_RE};

static MARKDOWN_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{2,3})[ \t]+(.+?)[ \t]*$").unwrap());

static TAGGED_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^<h([23])(?:\s+id="([^"]*)")?\s*>(.*?)</h([23])>\s*$"#).unwrap()
});

/// A recognized heading line.
#[derive(Debug, PartialEq, Eq)]
struct Heading<'a> {
    level: usize,
    text: &'a str,
    explicit_id: Option<&'a str>,
}

impl<'a> Heading<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim();

        if let Some(caps) = MARKDOWN_HEADING_RE.captures(line) {
            return Some(Self {
                level: caps.get(1)?.len(),
                text: caps.get(2)?.as_str(),
                explicit_id: None,
            });
        }

        let caps = TAGGED_HEADING_RE.captures(line)?;
        let open = caps.get(1)?.as_str();
        if open != caps.get(4)?.as_str() {
            return None;
        }
        Some(Self {
            level: if open == "2" { 2 } else { 3 },
            text: caps.get(3)?.as_str().trim(),
            explicit_id: caps.get(2).map(|m| m.as_str()).filter(|id| !id.is_empty()),
        })
    }

    fn render(&self, locale: Locale) -> String {
        let id = escape_html(
            &self
                .explicit_id
                .map_or_else(|| anchor_id(&visible_text(self.text)), str::to_owned),
        );
        let level = self.level;
        let text = self.text;
        let label = strings(locale).anchor_label;
        format!(
            r##"<h{level} id="{id}" class="heading">{text}<a class="heading-anchor" href="#{id}" data-anchor-id="{id}" aria-label="{label}">#</a></h{level}>"##
        )
    }
}

/// Text a reader sees once links, emphasis and tags are rendered.
fn visible_text(source: &str) -> String {
    let text = LINK_RE.replace_all(source, "$1");
    let text = BOLD_RE.replace_all(&text, "$1");
    plain_text(&text)
}

/// Rewrite heading lines.
///
/// Ids are not de-duplicated: two identical headings share one id.
pub(super) fn apply(text: &str, locale: Locale) -> String {
    text.lines()
        .map(|line| match Heading::parse(line) {
            Some(heading) => heading.render(locale),
            None => line.to_owned(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_markdown_heading() {
        assert_eq!(
            apply("## Hello, World! 123", Locale::En),
            r##"<h2 id="hello-world-123" class="heading">Hello, World! 123<a class="heading-anchor" href="#hello-world-123" data-anchor-id="hello-world-123" aria-label="Copy link to this heading">#</a></h2>"##
        );
    }

    #[test]
    fn test_anchor_id_is_locale_independent() {
        let ja = apply("### 概要 Overview", Locale::Ja);
        let en = apply("### 概要 Overview", Locale::En);
        assert!(ja.starts_with(r#"<h3 id="概要-overview""#));
        assert!(en.starts_with(r#"<h3 id="概要-overview""#));
    }

    #[test]
    fn test_only_levels_two_and_three() {
        assert_eq!(apply("# Title", Locale::En), "# Title");
        assert_eq!(apply("#### Deep", Locale::En), "#### Deep");
        assert_eq!(apply("##NoSpace", Locale::En), "##NoSpace");
    }

    #[test]
    fn test_tagged_heading_with_explicit_id() {
        let out = apply(r#"<h2 id="custom">Some Title</h2>"#, Locale::En);
        assert!(out.starts_with(r#"<h2 id="custom" class="heading">Some Title<a"#));
        assert!(out.contains(r##"href="#custom""##));
    }

    #[test]
    fn test_tagged_heading_without_id_derives_one() {
        let out = apply("<h3>Setup Guide</h3>", Locale::En);
        assert!(out.starts_with(r#"<h3 id="setup-guide" class="heading">"#));
    }

    #[test]
    fn test_mismatched_tagged_heading_is_literal() {
        assert_eq!(apply("<h2>Broken</h3>", Locale::En), "<h2>Broken</h3>");
    }

    #[test]
    fn test_duplicate_headings_share_id() {
        let out = apply("## Same\n## Same", Locale::En);
        assert_eq!(out.matches(r#"<h2 id="same""#).count(), 2);
    }

    #[test]
    fn test_heading_text_keeps_inline_markup_source() {
        let out = apply("## The **bold** part", Locale::En);
        assert!(out.contains(r#"id="the-bold-part""#));
        assert!(out.contains(">The **bold** part<a"));
    }

    #[test]
    fn test_anchor_id_ignores_link_target() {
        let out = apply("## See [docs](https://x.example)", Locale::En);
        assert!(out.starts_with(r#"<h2 id="see-docs" class="heading">See [docs](https://x.example)<a"#));
    }

    #[test]
    fn test_anchor_id_ignores_tags() {
        let out = apply("<h3>Setup <em>Guide</em></h3>", Locale::En);
        assert!(out.starts_with(r#"<h3 id="setup-guide" class="heading">"#));
    }
}
