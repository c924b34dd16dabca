//! Protected-region extraction.
//!
//! Fenced code blocks and diagram blocks are rendered to their final
//! markup and swapped for placeholders in one left-to-right pass, before
//! any structural pass can mistake a `#` or `|` inside them for markup.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use crate::fence::Fence;
use crate::placeholder::{Placeholders, RegionKind};
use crate::util::escape_html;

const MERMAID_OPEN: &str = "[mermaid]";
const MERMAID_CLOSE: &str = "[/mermaid]";

/// Replace code and diagram blocks with placeholders.
///
/// Unterminated fences and bracket blocks are left as literal text.
pub(crate) fn extract(input: &str, regions: &mut Placeholders) -> String {
    let lines: Vec<&str> = input.lines().collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if let Some(fence) = Fence::open(line)
            && let Some(offset) = lines[i + 1..].iter().position(|l| fence.closes(l))
        {
            let close = i + 1 + offset;
            let body = lines[i + 1..close].join("\n");
            let token = if fence.is_diagram() {
                regions.protect(RegionKind::Diagram, diagram_html(&body))
            } else {
                regions.protect(RegionKind::Code, code_html(fence.label(), &body))
            };
            out.push(token);
            i = close + 1;
            continue;
        }

        if let Some(after) = line.trim_start().strip_prefix(MERMAID_OPEN)
            && let Some((consumed, body, trailing)) = bracket_block(after, &lines[i + 1..])
        {
            let token = regions.protect(RegionKind::Diagram, diagram_html(&body));
            out.push(format!("{token}{trailing}"));
            i += 1 + consumed;
            continue;
        }

        out.push(line.to_owned());
        i += 1;
    }

    out.join("\n")
}

/// Collect a `[mermaid]` … `[/mermaid]` body.
///
/// `first` is the remainder of the opening line. Returns the number of
/// following lines consumed, the diagram source, and any text after the
/// closing marker.
fn bracket_block<'a>(first: &'a str, following: &[&'a str]) -> Option<(usize, String, &'a str)> {
    if let Some(end) = first.find(MERMAID_CLOSE) {
        let trailing = &first[end + MERMAID_CLOSE.len()..];
        return Some((0, first[..end].trim().to_owned(), trailing));
    }

    let offset = following.iter().position(|l| l.contains(MERMAID_CLOSE))?;
    let closing = following[offset];
    let end = closing.find(MERMAID_CLOSE)?;

    let mut parts: Vec<&str> = Vec::with_capacity(offset + 2);
    if !first.trim().is_empty() {
        parts.push(first.trim());
    }
    parts.extend_from_slice(&following[..offset]);
    if !closing[..end].trim().is_empty() {
        parts.push(closing[..end].trim_end());
    }

    Some((
        offset + 1,
        parts.join("\n"),
        &closing[end + MERMAID_CLOSE.len()..],
    ))
}

/// Decorated container for a generic code block.
fn code_html(label: Option<&str>, body: &str) -> String {
    let escaped = escape_html(body);
    match label {
        Some(label) => {
            let label = escape_html(label);
            format!(
                r#"<div class="code-block"><div class="code-label">{label}</div><pre><code class="language-{label}">{escaped}</code></pre></div>"#
            )
        }
        None => format!(
            r#"<div class="code-block"><div class="code-label">code</div><pre><code>{escaped}</code></pre></div>"#
        ),
    }
}

/// Container the deferred diagram renderer picks up after mount.
///
/// The source travels percent-encoded in `data-diagram-source`; the escaped
/// `<pre>` stays visible if rendering fails.
fn diagram_html(source: &str) -> String {
    let encoded = utf8_percent_encode(source, NON_ALPHANUMERIC);
    format!(
        r#"<div class="diagram" data-diagram-source="{encoded}"><pre class="diagram-fallback">{}</pre></div>"#,
        escape_html(source)
    )
}
