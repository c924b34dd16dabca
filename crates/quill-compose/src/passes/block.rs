//! Quotes, horizontal rules, and lists.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

static RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:-{3,}|\*{3,}|_{3,})$").unwrap());

static UNORDERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*+][ \t]+(.+)$").unwrap());

static ORDERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,9})\.[ \t]+(.+)$").unwrap());

/// A classified source line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Quote(&'a str),
    Rule,
    Unordered(&'a str),
    Ordered(u32, &'a str),
    Other(&'a str),
}

impl<'a> Line<'a> {
    fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix('>') {
            return Self::Quote(rest.trim_start());
        }
        if RULE_RE.is_match(trimmed) {
            return Self::Rule;
        }
        if let Some(caps) = UNORDERED_RE.captures(trimmed)
            && let Some(item) = caps.get(1)
        {
            return Self::Unordered(item.as_str());
        }
        if let Some(caps) = ORDERED_RE.captures(trimmed)
            && let (Some(n), Some(item)) = (caps.get(1), caps.get(2))
            && let Ok(n) = n.as_str().parse()
        {
            return Self::Ordered(n, item.as_str());
        }
        Self::Other(line)
    }
}

/// Open group of consecutive lines of one kind.
enum Group {
    Quote(Vec<String>),
    Unordered(Vec<String>),
    Ordered(Vec<(u32, String)>),
}

impl Group {
    fn render(self) -> String {
        match self {
            Self::Quote(lines) => {
                format!(r#"<blockquote class="quote">{}</blockquote>"#, lines.join("<br>"))
            }
            Self::Unordered(items) => {
                let mut html = String::from(r#"<ul class="list">"#);
                for item in items {
                    let _ = write!(html, "<li>{item}</li>");
                }
                html.push_str("</ul>");
                html
            }
            Self::Ordered(items) => {
                let mut html = String::from(r#"<ol class="list list-ordered">"#);
                for (n, item) in items {
                    let _ = write!(html, r#"<li value="{n}">{item}</li>"#);
                }
                html.push_str("</ol>");
                html
            }
        }
    }
}

/// Rewrite quote, rule, and list lines.
///
/// Consecutive lines of one kind share a single container, emitted on one
/// line so the paragraph pass treats it as a block.
pub(super) fn apply(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut group: Option<Group> = None;

    for line in text.lines() {
        let classified = Line::classify(line);

        group = match (group.take(), classified) {
            (Some(Group::Quote(mut lines)), Line::Quote(rest)) => {
                lines.push(rest.to_owned());
                Some(Group::Quote(lines))
            }
            (Some(Group::Unordered(mut items)), Line::Unordered(item)) => {
                items.push(item.to_owned());
                Some(Group::Unordered(items))
            }
            (Some(Group::Ordered(mut items)), Line::Ordered(n, item)) => {
                items.push((n, item.to_owned()));
                Some(Group::Ordered(items))
            }
            (open, classified) => {
                if let Some(open) = open {
                    out.push(open.render());
                }
                match classified {
                    Line::Quote(rest) => Some(Group::Quote(vec![rest.to_owned()])),
                    Line::Unordered(item) => Some(Group::Unordered(vec![item.to_owned()])),
                    Line::Ordered(n, item) => Some(Group::Ordered(vec![(n, item.to_owned())])),
                    Line::Rule => {
                        out.push(r#"<hr class="divider">"#.to_owned());
                        None
                    }
                    Line::Other(line) => {
                        out.push(line.to_owned());
                        None
                    }
                }
            }
        };
    }

    if let Some(open) = group {
        out.push(open.render());
    }
    out.join("\n")
}
