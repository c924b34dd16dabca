//! Bilingual document composition.
//!
//! Turns markdown-like author text, extended with embed directives, emoji
//! callouts, disclosure blocks and members-only regions, into a sanitized
//! HTML fragment that is safe to insert as trusted markup.
//!
//! The pipeline runs in a fixed order:
//!
//! 1. members-only regions are resolved against the viewer's sign-in state
//! 2. fenced code and diagram blocks are rendered and protected
//! 3. structural passes (inline code, disclosures, headings, tables,
//!    quotes/rules/lists, bold/links, callouts)
//! 4. embed directives are resolved from the [`Registry`] and commerce
//!    links become merchant cards
//! 5. paragraphs are grouped, protected regions restored, and the result
//!    passes through an allow-list sanitizer
//!
//! # Example
//!
//! ```
//! use quill_compose::{Localized, Locale, Registry, Track, compose};
//!
//! let registry = Registry::new().with_track(
//!     "shio-to-pixel",
//!     Track::new(Localized::new("塩とピクセル".into(), "Salt and Pixel".into()), "cover"),
//! );
//!
//! let html = compose("[play:shio-to-pixel]", Locale::Ja, false, &registry);
//! assert!(html.contains("塩とピクセル"));
//! ```

mod composer;
mod embed;
mod fence;
mod gate;
mod locale;
mod passes;
mod placeholder;
mod protect;
mod registry;
mod sanitize;
mod strings;
mod util;

pub use composer::{ComposeOptions, Composer, DEFAULT_SIGN_IN_PATH};
pub use gate::{GATE_CLOSE, GATE_OPEN};
pub use locale::{Locale, Localized, ParseLocaleError};
pub use registry::{Registry, Track};
pub use sanitize::Sanitizer;
pub use util::{anchor_id, escape_html};

/// Compose a document with a one-off [`Composer`].
///
/// Prefer building a [`Composer`] once when composing many documents; this
/// helper clones the registry and prepares a fresh sanitizer on every call.
#[must_use]
pub fn compose(document: &str, locale: Locale, authenticated: bool, registry: &Registry) -> String {
    Composer::new(registry.clone()).compose(document, locale, authenticated)
}
