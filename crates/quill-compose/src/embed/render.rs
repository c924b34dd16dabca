//! HTML for each directive kind.

use crate::registry::Registry;
use crate::strings::strings;
use crate::util::{escape_html, plain_text};
use crate::{Locale, Track};

use super::directive::Directive;
use super::merchant::{self, Merchant};

/// Resolve an image reference to a path.
///
/// Root-relative references are used directly; anything else is a registry
/// key.
fn resolve_image<'a>(registry: &'a Registry, reference: &'a str) -> Option<&'a str> {
    if reference.starts_with('/') {
        Some(reference)
    } else {
        registry.image(reference)
    }
}

/// Render a directive.
///
/// An empty string means the directive resolved to nothing and is dropped.
pub(super) fn directive(directive: Directive<'_>, registry: &Registry, locale: Locale) -> String {
    match directive {
        Directive::Video { id } => video(id, locale),
        Directive::Image { reference, caption } => {
            figure("figure", registry, reference, caption).unwrap_or_default()
        }
        Directive::Diagram { reference, caption } => {
            figure("figure figure-diagram", registry, reference, caption).unwrap_or_default()
        }
        Directive::Play { id } => track(id, registry.track(id), registry, locale),
        Directive::Product { id } => {
            let href = format!("https://www.amazon.co.jp/dp/{id}");
            merchant::card(Merchant::Amazon, &href, Merchant::Amazon.name(), Some(id), locale)
        }
    }
}

fn video(id: &str, locale: Locale) -> String {
    let label = strings(locale).play_video;
    format!(
        r#"<div class="video-card" data-video-id="{id}" role="button" tabindex="0" aria-label="{label}"><img class="video-thumbnail" src="https://i.ytimg.com/vi/{id}/hqdefault.jpg" alt="" loading="lazy"><span class="video-play" aria-hidden="true">▶</span></div>"#
    )
}

fn figure(
    class: &str,
    registry: &Registry,
    reference: &str,
    caption: Option<&str>,
) -> Option<String> {
    let Some(src) = resolve_image(registry, reference) else {
        tracing::debug!(key = %reference, "Image not in registry");
        return None;
    };
    let alt = caption.map(plain_text).unwrap_or_default();
    let figcaption = caption
        .map(|c| format!(r#"<figcaption class="figure-caption">{c}</figcaption>"#))
        .unwrap_or_default();
    Some(format!(
        r#"<figure class="{class}"><img src="{}" alt="{}" loading="lazy">{figcaption}</figure>"#,
        escape_html(src),
        escape_html(&alt),
    ))
}

fn track(id: &str, track: Option<&Track>, registry: &Registry, locale: Locale) -> String {
    let (title, artwork) = match track {
        Some(track) => {
            let artwork = resolve_image(registry, &track.artwork);
            if artwork.is_none() {
                tracing::debug!(track = %id, key = %track.artwork, "Track artwork not in registry");
            }
            (track.title(locale), artwork)
        }
        None => {
            tracing::debug!(track = %id, "Track not in registry");
            (strings(locale).track_fallback, None)
        }
    };

    let title = escape_html(title);
    let artwork = artwork
        .map(|src| {
            format!(
                r#"<img class="track-artwork" src="{}" alt="" loading="lazy">"#,
                escape_html(src)
            )
        })
        .unwrap_or_default();
    let missing = if track.is_none() { " track-missing" } else { "" };

    format!(
        r#"<button type="button" class="track-card{missing}" data-track-id="{id}" aria-label="{title}">{artwork}<span class="track-title">{title}</span><span class="track-play" aria-hidden="true">▶</span></button>"#
    )
}
