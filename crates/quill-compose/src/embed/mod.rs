//! Directive and embed resolution.
//!
//! Directives are parsed into a closed [`Directive`] enum, rendered from the
//! registry, and protected as embed placeholders. Commerce links left by the
//! link pass are then turned into merchant cards.

mod directive;
mod merchant;
mod render;

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::placeholder::{Placeholders, RegionKind};
use crate::{Locale, Registry};

use directive::Directive;

static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(video|youtube|image|diagram|play|product):([^\]\n]+)\]").unwrap()
});

/// What directive rendering needs from the composer.
#[derive(Clone, Copy)]
pub(crate) struct EmbedContext<'a> {
    pub(crate) registry: &'a Registry,
    pub(crate) locale: Locale,
}

/// Resolve every directive in `text`, then enrich commerce links.
pub(crate) fn resolve(text: &str, ctx: EmbedContext<'_>, regions: &mut Placeholders) -> String {
    let text = DIRECTIVE_RE.replace_all(text, |caps: &Captures<'_>| {
        let Some(directive) = Directive::parse(&caps[1], &caps[2]) else {
            tracing::debug!(directive = &caps[0], "Malformed directive left as text");
            return caps[0].to_owned();
        };
        let kind = if directive.is_block() {
            RegionKind::BlockEmbed
        } else {
            RegionKind::Embed
        };
        let html = render::directive(directive, ctx.registry, ctx.locale);
        if html.is_empty() {
            html
        } else {
            regions.protect(kind, html)
        }
    });
    merchant::enrich_links(&text, ctx.locale, regions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resolve_with(text: &str, registry: &Registry) -> (String, Placeholders) {
        let mut regions = Placeholders::default();
        let ctx = EmbedContext {
            registry,
            locale: Locale::En,
        };
        let out = resolve(text, ctx, &mut regions);
        (out, regions)
    }

    #[test]
    fn test_directive_becomes_placeholder() {
        let (out, regions) = resolve_with("[video:abc]", &Registry::new());
        assert_eq!(regions.len(), 1);
        assert!(!out.contains("video"));
        assert!(regions.restore(&out).contains(r#"data-video-id="abc""#));
    }

    #[test]
    fn test_silent_drop_leaves_nothing() {
        let (out, regions) = resolve_with("before [image:unknown-key] after", &Registry::new());
        assert_eq!(out, "before  after");
        assert_eq!(regions.len(), 0);
    }

    #[test]
    fn test_malformed_directive_is_literal() {
        let (out, _) = resolve_with("[video:not valid!]", &Registry::new());
        assert_eq!(out, "[video:not valid!]");
    }

    #[test]
    fn test_unknown_kind_is_literal() {
        let (out, _) = resolve_with("[audio:x]", &Registry::new());
        assert_eq!(out, "[audio:x]");
    }

    #[test]
    fn test_several_directives_keep_order() {
        let registry = Registry::new().with_image("a", "/a.png");
        let (out, regions) = resolve_with("[image:a]\n[video:v1]", &registry);
        let restored = regions.restore(&out);
        let figure = restored.find("<figure").unwrap();
        let video = restored.find("data-video-id").unwrap();
        assert!(figure < video);
    }
}
