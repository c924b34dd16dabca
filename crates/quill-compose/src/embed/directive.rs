//! `[kind:payload]` directive parsing.

use std::sync::LazyLock;

use regex::Regex;

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

static PRODUCT_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z0-9]{10}$").unwrap());

/// A parsed embed directive.
///
/// Borrowed slices point into the directive payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Directive<'a> {
    /// Video thumbnail card.
    Video { id: &'a str },
    /// Image figure.
    Image {
        reference: &'a str,
        caption: Option<&'a str>,
    },
    /// Diagram image figure.
    Diagram {
        reference: &'a str,
        caption: Option<&'a str>,
    },
    /// Playable track control.
    Play { id: &'a str },
    /// Explicit merchant card for an Amazon product id.
    Product { id: &'a str },
}

impl<'a> Directive<'a> {
    /// Parse a directive from its kind and payload.
    ///
    /// Unknown kinds and malformed payloads yield `None`; the caller keeps
    /// the source text as written.
    pub(crate) fn parse(kind: &str, payload: &'a str) -> Option<Self> {
        let payload = payload.trim();
        match kind {
            "video" | "youtube" => VIDEO_ID_RE
                .is_match(payload)
                .then_some(Self::Video { id: payload }),
            "image" => {
                let (reference, caption) = split_reference(payload)?;
                Some(Self::Image { reference, caption })
            }
            "diagram" => {
                let (reference, caption) = split_reference(payload)?;
                Some(Self::Diagram { reference, caption })
            }
            "play" => VIDEO_ID_RE
                .is_match(payload)
                .then_some(Self::Play { id: payload }),
            "product" => PRODUCT_ID_RE
                .is_match(payload)
                .then_some(Self::Product { id: payload }),
            _ => None,
        }
    }

    /// Whether the rendered markup is block-level and must not sit inside
    /// a paragraph.
    pub(crate) fn is_block(self) -> bool {
        matches!(
            self,
            Self::Video { .. } | Self::Image { .. } | Self::Diagram { .. }
        )
    }
}

/// Split `ref` or `ref:caption`.
fn split_reference(payload: &str) -> Option<(&str, Option<&str>)> {
    let (reference, caption) = match payload.split_once(':') {
        Some((reference, caption)) => (reference.trim(), Some(caption.trim())),
        None => (payload, None),
    };
    if reference.is_empty() {
        return None;
    }
    Some((reference, caption.filter(|c| !c.is_empty())))
}
