//! Placeholder protection.
//!
//! Content that later passes must not reinterpret (fenced code, diagrams,
//! inline code, resolved embeds) is swapped for an opaque token and stored
//! here. [`Placeholders::restore`] puts it back at the end of the pipeline.
//!
//! # Token format
//!
//! ```text
//! U+E000  <kind tag>  <decimal index>  U+E001
//! ```
//!
//! The closing delimiter terminates every token, so the token for index 1
//! can never match inside the token for index 10. Both delimiters are
//! private-use code points that are stripped from author input before
//! extraction, so a document cannot forge a token.

use std::borrow::Cow;

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';

/// What a protected region holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RegionKind {
    /// Fenced code block.
    Code,
    /// Diagram source container.
    Diagram,
    /// Inline code span.
    InlineCode,
    /// Resolved embed that renders inline (track control, merchant card).
    Embed,
    /// Resolved embed that renders as a block (video card, figure).
    BlockEmbed,
}

impl RegionKind {
    fn tag(self) -> char {
        match self {
            Self::Code => 'C',
            Self::Diagram => 'D',
            Self::InlineCode => 'I',
            Self::Embed => 'E',
            Self::BlockEmbed => 'B',
        }
    }

    fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'C' => Some(Self::Code),
            'D' => Some(Self::Diagram),
            'I' => Some(Self::InlineCode),
            'E' => Some(Self::Embed),
            'B' => Some(Self::BlockEmbed),
            _ => None,
        }
    }

    /// Whether the restored content is block-level markup.
    fn is_block(self) -> bool {
        matches!(self, Self::Code | Self::Diagram | Self::BlockEmbed)
    }
}

#[derive(Debug)]
struct Region {
    kind: RegionKind,
    html: String,
}

/// Ordered store of protected regions for one composition.
#[derive(Debug, Default)]
pub(crate) struct Placeholders {
    regions: Vec<Region>,
}

impl Placeholders {
    /// Store `html` and return the token that stands in for it.
    pub(crate) fn protect(&mut self, kind: RegionKind, html: String) -> String {
        let index = self.regions.len();
        let token = token(kind, index);
        debug_assert!(
            self.regions
                .iter()
                .enumerate()
                .map(|(i, r)| self::token(r.kind, i))
                .all(|existing| !existing.contains(&token) && !token.contains(&existing)),
            "placeholder token {token:?} overlaps an existing token"
        );
        self.regions.push(Region { kind, html });
        token
    }

    /// Number of stored regions.
    pub(crate) fn len(&self) -> usize {
        self.regions.len()
    }

    /// Replace every token in `text` with its stored content.
    ///
    /// Runs as a single left-to-right scan. Stored content may itself
    /// contain tokens of earlier regions (an inline code span inside an
    /// image caption); those are expanded recursively. Tokens that do not
    /// resolve are left in place and logged.
    pub(crate) fn restore(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.restore_into(text, usize::MAX, &mut out);
        out
    }

    fn restore_into(&self, text: &str, limit: usize, out: &mut String) {
        let mut rest = text;
        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after = &rest[start + OPEN.len_utf8()..];

            let resolved = parse_token(after).and_then(|(kind, index, len)| {
                self.regions
                    .get(index)
                    .filter(|region| region.kind == kind && index < limit)
                    .map(|region| (index, region, len))
            });

            if let Some((index, region, len)) = resolved {
                self.restore_into(&region.html, index, out);
                rest = &after[len..];
            } else {
                tracing::warn!(offset = start, "Unresolved placeholder token");
                out.push(OPEN);
                rest = after;
            }
        }
        out.push_str(rest);
    }
}

/// Format the token for a region.
pub(crate) fn token(kind: RegionKind, index: usize) -> String {
    format!("{OPEN}{}{index}{CLOSE}", kind.tag())
}

/// Parse `<tag><digits>U+E001` at the start of `s`.
///
/// Returns the kind, index, and number of bytes consumed.
fn parse_token(s: &str) -> Option<(RegionKind, usize, usize)> {
    let tag = s.chars().next()?;
    let kind = RegionKind::from_tag(tag)?;
    let digits_start = tag.len_utf8();
    let digits_len = s[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    let digits_end = digits_start + digits_len;
    if !s[digits_end..].starts_with(CLOSE) {
        return None;
    }
    let index = s[digits_start..digits_end].parse().ok()?;
    Some((kind, index, digits_end + CLOSE.len_utf8()))
}

/// Remove the token delimiters from author input.
pub(crate) fn strip_sentinels(input: &str) -> Cow<'_, str> {
    if input.contains([OPEN, CLOSE]) {
        Cow::Owned(input.chars().filter(|&c| c != OPEN && c != CLOSE).collect())
    } else {
        Cow::Borrowed(input)
    }
}

/// Remove whole tokens from `text`.
pub(crate) fn strip_tokens(text: &str) -> Cow<'_, str> {
    if !text.contains(OPEN) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len_utf8()..];
        rest = match parse_token(after) {
            Some((_, _, len)) => &after[len..],
            None => after,
        };
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// A piece of a line split around block-level tokens.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    /// Text between block tokens, possibly holding inline tokens.
    Text(&'a str),
    /// One block-level token.
    Block(&'a str),
}

/// Split `line` around tokens of block-level regions.
pub(crate) fn split_blocks(line: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut cursor = 0;
    while let Some(found) = line[cursor..].find(OPEN) {
        let start = cursor + found;
        let after = start + OPEN.len_utf8();
        match parse_token(&line[after..]) {
            Some((kind, _, len)) if kind.is_block() => {
                if text_start < start {
                    segments.push(Segment::Text(&line[text_start..start]));
                }
                let end = after + len;
                segments.push(Segment::Block(&line[start..end]));
                text_start = end;
                cursor = end;
            }
            Some((_, _, len)) => cursor = after + len,
            None => cursor = after,
        }
    }
    if text_start < line.len() {
        segments.push(Segment::Text(&line[text_start..]));
    }
    segments
}

/// Whether `line` consists only of tokens for block-level regions.
pub(crate) fn is_block_only(line: &str) -> bool {
    let mut rest = line.trim();
    if rest.is_empty() {
        return false;
    }
    while !rest.is_empty() {
        let Some(after) = rest.strip_prefix(OPEN) else {
            return false;
        };
        match parse_token(after) {
            Some((kind, _, len)) if kind.is_block() => rest = after[len..].trim_start(),
            _ => return false,
        }
    }
    true
}
