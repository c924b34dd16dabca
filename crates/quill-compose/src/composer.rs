//! The composition pipeline.

use crate::embed::{self, EmbedContext};
use crate::passes;
use crate::placeholder::{self, Placeholders};
use crate::{Locale, Registry, Sanitizer, gate, protect};

/// Default sign-in path used by gate prompts.
pub const DEFAULT_SIGN_IN_PATH: &str = "/login";

/// Options that shape composed output independent of the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Target of the sign-in link in gate prompts.
    pub sign_in_path: String,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            sign_in_path: DEFAULT_SIGN_IN_PATH.to_owned(),
        }
    }
}

impl ComposeOptions {
    /// Set the sign-in path.
    #[must_use]
    pub fn with_sign_in_path(mut self, path: impl Into<String>) -> Self {
        self.sign_in_path = path.into();
        self
    }
}

/// Composes documents into sanitized HTML.
///
/// A composer owns a registry snapshot and a prepared sanitizer. It is
/// immutable after construction and can be shared across threads.
///
/// # Example
///
/// ```
/// use quill_compose::{Composer, Locale, Registry};
///
/// let composer = Composer::new(Registry::new());
/// let html = composer.compose("## Intro\nHello **world**", Locale::En, false);
///
/// assert!(html.contains(r#"<h2 id="intro" class="heading">"#));
/// assert!(html.contains("<p>Hello <strong>world</strong></p>"));
/// ```
#[derive(Debug)]
pub struct Composer {
    registry: Registry,
    options: ComposeOptions,
    sanitizer: Sanitizer,
}

impl Composer {
    /// Create a composer with default options.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self::with_options(registry, ComposeOptions::default())
    }

    /// Create a composer with explicit options.
    #[must_use]
    pub fn with_options(registry: Registry, options: ComposeOptions) -> Self {
        Self {
            registry,
            options,
            sanitizer: Sanitizer::new(),
        }
    }

    /// Registry the composer resolves embeds against.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &ComposeOptions {
        &self.options
    }

    /// Compose `document` for `locale`.
    ///
    /// Never fails: malformed markup degrades to literal text and registry
    /// misses follow each directive's fallback. The same inputs always
    /// produce the same output.
    #[must_use]
    pub fn compose(&self, document: &str, locale: Locale, authenticated: bool) -> String {
        let html = self.render(document, locale, authenticated);
        self.sanitizer.clean(&html)
    }

    /// Run every stage before sanitization.
    fn render(&self, document: &str, locale: Locale, authenticated: bool) -> String {
        let document = placeholder::strip_sentinels(document);
        let text = gate::resolve(&document, authenticated, locale, &self.options.sign_in_path);

        let mut regions = Placeholders::default();
        let text = protect::extract(&text, &mut regions);
        let text = passes::apply(&text, locale, &mut regions);
        let ctx = EmbedContext {
            registry: &self.registry,
            locale,
        };
        let text = embed::resolve(&text, ctx, &mut regions);
        let text = passes::paragraph::wrap(&text);

        tracing::debug!(
            locale = %locale,
            authenticated,
            regions = regions.len(),
            "Composed document"
        );
        regions.restore(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_composer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Composer>();
    }

    #[test]
    fn test_default_sign_in_path() {
        let composer = Composer::new(Registry::new());
        assert_eq!(composer.options().sign_in_path, "/login");
    }

    #[test]
    fn test_custom_sign_in_path_reaches_prompt() {
        let options = ComposeOptions::default().with_sign_in_path("/members/join");
        let composer = Composer::with_options(Registry::new(), options);
        let html = composer.compose("[members-only]x[/members-only]", Locale::En, false);
        assert!(html.contains(r#"href="/members/join""#));
    }

    #[test]
    fn test_empty_document() {
        let composer = Composer::new(Registry::new());
        assert_eq!(composer.compose("", Locale::Ja, false), "");
    }

    #[test]
    fn test_forged_token_is_neutralized() {
        let composer = Composer::new(Registry::new());
        let html = composer.compose("a\u{E000}C0\u{E001}b", Locale::En, false);
        assert_eq!(html, "<p>aC0b</p>");
    }

    #[test]
    fn test_stages_run_in_order() {
        let composer = Composer::new(Registry::new());
        let html = composer.render("```\n## not a heading\n```\n## Real", Locale::En, true);
        assert!(html.contains("## not a heading"));
        assert!(html.contains(r#"<h2 id="real""#));
    }
}
