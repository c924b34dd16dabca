//! Allow-list HTML sanitizer.
//!
//! Everything the pipeline emits goes through [`Sanitizer::clean`] last.
//! Tags, attributes and URL schemes not listed here are removed.

use std::borrow::Cow;
use std::collections::HashSet;

use ammonia::{Builder, UrlRelative};

const ALLOWED_TAGS: &[&str] = &[
    "a",
    "b",
    "blockquote",
    "br",
    "button",
    "code",
    "del",
    "details",
    "div",
    "em",
    "figcaption",
    "figure",
    "h2",
    "h3",
    "h4",
    "hr",
    "i",
    "img",
    "kbd",
    "li",
    "mark",
    "ol",
    "p",
    "pre",
    "s",
    "small",
    "span",
    "strong",
    "sub",
    "summary",
    "sup",
    "table",
    "tbody",
    "td",
    "th",
    "thead",
    "tr",
    "ul",
];

const GENERIC_ATTRIBUTES: &[&str] = &[
    "aria-hidden",
    "aria-label",
    "class",
    "id",
    "lang",
    "role",
    "style",
    "tabindex",
    "title",
    "data-anchor-id",
    "data-callout",
    "data-diagram-source",
    "data-merchant",
    "data-track-id",
    "data-video-id",
];

const ANCHOR_ATTRIBUTES: &[&str] = &["href", "target"];
const IMAGE_ATTRIBUTES: &[&str] = &["src", "alt", "loading", "width", "height"];
const BUTTON_ATTRIBUTES: &[&str] = &["type"];
const LIST_ITEM_ATTRIBUTES: &[&str] = &["value"];
const ORDERED_LIST_ATTRIBUTES: &[&str] = &["start"];
const DETAILS_ATTRIBUTES: &[&str] = &["open"];
const CELL_ATTRIBUTES: &[&str] = &["colspan", "rowspan"];

const STYLE_PROPERTIES: &[&str] = &["text-align", "border-left-color", "background-color"];

const URL_SCHEMES: &[&str] = &["https", "data"];

/// Keep root-relative paths and fragments; drop every other relative URL.
fn keep_root_relative(url: &str) -> Option<Cow<'_, str>> {
    let root_relative =
        url.starts_with('/') && !url.starts_with("//") && !url.starts_with("/\\");
    (root_relative || url.starts_with('#')).then_some(Cow::Borrowed(url))
}

/// Allow `data:` URLs only as image sources.
fn restrict_data_urls<'u>(element: &str, attribute: &str, value: &'u str) -> Option<Cow<'u, str>> {
    let is_data = value
        .trim_start()
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"));
    let is_url = matches!(attribute, "href" | "src");
    if is_url && is_data && !(element == "img" && attribute == "src") {
        return None;
    }
    Some(Cow::Borrowed(value))
}

/// Prepared sanitizer shared by every composition.
pub struct Sanitizer {
    builder: Builder<'static>,
}

impl Sanitizer {
    /// Build the sanitizer with the engine's allow-list.
    #[must_use]
    pub fn new() -> Self {
        let mut builder = Builder::empty();
        builder
            .add_tags(ALLOWED_TAGS)
            .add_clean_content_tags(["script", "style"])
            .add_generic_attributes(GENERIC_ATTRIBUTES)
            .add_tag_attributes("a", ANCHOR_ATTRIBUTES)
            .add_tag_attributes("img", IMAGE_ATTRIBUTES)
            .add_tag_attributes("button", BUTTON_ATTRIBUTES)
            .add_tag_attributes("li", LIST_ITEM_ATTRIBUTES)
            .add_tag_attributes("ol", ORDERED_LIST_ATTRIBUTES)
            .add_tag_attributes("details", DETAILS_ATTRIBUTES)
            .add_tag_attributes("td", CELL_ATTRIBUTES)
            .add_tag_attributes("th", CELL_ATTRIBUTES)
            .filter_style_properties(STYLE_PROPERTIES.iter().copied().collect::<HashSet<_>>())
            .url_schemes(URL_SCHEMES.iter().copied().collect())
            .url_relative(UrlRelative::Custom(Box::new(keep_root_relative)))
            .attribute_filter(restrict_data_urls)
            .link_rel(Some("noopener noreferrer"))
            .strip_comments(true);
        Self { builder }
    }

    /// Sanitize an HTML fragment.
    ///
    /// Cleaning already-clean output returns it unchanged.
    #[must_use]
    pub fn clean(&self, html: &str) -> String {
        self.builder.clean(html).to_string()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Sanitizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sanitizer").finish_non_exhaustive()
    }
}
