//! Paragraph grouping.

use crate::placeholder::{Segment, is_block_only, split_blocks};

const BLOCK_TAGS: &[&str] = &[
    "blockquote",
    "details",
    "div",
    "figure",
    "h2",
    "h3",
    "hr",
    "ol",
    "p",
    "pre",
    "table",
    "ul",
];

/// Whether `line` is already block markup.
fn is_block_line(line: &str) -> bool {
    if is_block_only(line) {
        return true;
    }
    let Some(rest) = line.strip_prefix('<') else {
        return false;
    };
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    let name_len = rest
        .bytes()
        .take_while(u8::is_ascii_alphanumeric)
        .count();
    let name = &rest[..name_len];
    let boundary = rest[name_len..]
        .chars()
        .next()
        .is_none_or(|c| c == '>' || c == '/' || c.is_whitespace());
    boundary && BLOCK_TAGS.iter().any(|tag| tag.eq_ignore_ascii_case(name))
}

/// Wrap runs of text lines in `<p>`.
///
/// Blank lines end a paragraph; lines inside one run are joined with
/// `<br>`. Block markup passes through on its own line, and a block token
/// in the middle of a text line splits the paragraph around it.
pub(crate) fn wrap(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            flush(&mut paragraph, &mut out);
        } else if is_block_line(trimmed) {
            flush(&mut paragraph, &mut out);
            out.push(trimmed.to_owned());
        } else {
            for segment in split_blocks(trimmed) {
                match segment {
                    Segment::Text(run) => {
                        let run = run.trim();
                        if !run.is_empty() {
                            paragraph.push(run);
                        }
                    }
                    Segment::Block(token) => {
                        flush(&mut paragraph, &mut out);
                        out.push(token.to_owned());
                    }
                }
            }
        }
    }
    flush(&mut paragraph, &mut out);

    out.join("\n")
}

fn flush(paragraph: &mut Vec<&str>, out: &mut Vec<String>) {
    if !paragraph.is_empty() {
        out.push(format!("<p>{}</p>", paragraph.join("<br>")));
        paragraph.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::{RegionKind, token};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_lines_become_paragraph() {
        assert_eq!(wrap("one\ntwo\n\nthree"), "<p>one<br>two</p>\n<p>three</p>");
    }

    #[test]
    fn test_block_markup_passes_through() {
        let input = "intro\n<hr class=\"divider\">\noutro";
        assert_eq!(wrap(input), "<p>intro</p>\n<hr class=\"divider\">\n<p>outro</p>");
    }

    #[test]
    fn test_inline_markup_is_wrapped() {
        assert_eq!(
            wrap("<strong>bold</strong> start"),
            "<p><strong>bold</strong> start</p>"
        );
        assert_eq!(wrap("<a class=\"link\" href=\"/x\">x</a>"), "<p><a class=\"link\" href=\"/x\">x</a></p>");
    }

    #[test]
    fn test_block_placeholder_is_not_wrapped() {
        let code = token(RegionKind::Code, 0);
        assert_eq!(wrap(&format!("text\n{code}")), format!("<p>text</p>\n{code}"));
    }

    #[test]
    fn test_inline_placeholder_is_wrapped() {
        let inline = token(RegionKind::InlineCode, 0);
        assert_eq!(wrap(&inline), format!("<p>{inline}</p>"));
    }

    #[test]
    fn test_closing_tags_are_blocks() {
        assert_eq!(wrap("</div></details>"), "</div></details>");
    }

    #[test]
    fn test_tag_name_needs_boundary() {
        assert_eq!(wrap("<preview>"), "<p><preview></p>");
    }

    #[test]
    fn test_block_token_mid_line_splits_paragraph() {
        let figure = token(RegionKind::BlockEmbed, 0);
        assert_eq!(
            wrap(&format!("see {figure} here")),
            format!("<p>see</p>\n{figure}\n<p>here</p>")
        );
    }

    #[test]
    fn test_trailing_text_after_diagram() {
        let diagram = token(RegionKind::Diagram, 0);
        assert_eq!(
            wrap(&format!("{diagram} trailing")),
            format!("{diagram}\n<p>trailing</p>")
        );
    }

    #[test]
    fn test_inline_embed_stays_in_paragraph() {
        let track = token(RegionKind::Embed, 0);
        assert_eq!(
            wrap(&format!("listen {track} now")),
            format!("<p>listen {track} now</p>")
        );
    }
}
