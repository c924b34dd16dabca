//! Read-only asset registries consulted during embed resolution.

use std::collections::HashMap;

use crate::{Locale, Localized};

/// A playable track known to the site.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    /// Display title per locale.
    pub title: Localized<String>,
    /// Image registry key of the artwork.
    pub artwork: String,
}

impl Track {
    /// Create a track.
    pub fn new(title: Localized<String>, artwork: impl Into<String>) -> Self {
        Self {
            title,
            artwork: artwork.into(),
        }
    }

    /// Title for the given locale.
    #[must_use]
    pub fn title(&self, locale: Locale) -> &str {
        self.title.get(locale)
    }
}

/// Snapshot of the image and track registries.
///
/// The composer never mutates a registry; callers build one up front and
/// hand it over.
///
/// # Example
///
/// ```
/// use quill_compose::{Localized, Registry, Track};
///
/// let registry = Registry::new()
///     .with_image("cover", "/images/cover.png")
///     .with_track(
///         "intro",
///         Track::new(Localized::new("イントロ".into(), "Intro".into()), "cover"),
///     );
///
/// assert_eq!(registry.image("cover"), Some("/images/cover.png"));
/// assert!(registry.track("missing").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Registry {
    images: HashMap<String, String>,
    tracks: HashMap<String, Track>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from already-built maps.
    #[must_use]
    pub fn from_parts(images: HashMap<String, String>, tracks: HashMap<String, Track>) -> Self {
        Self { images, tracks }
    }

    /// Register an image path under a short key.
    #[must_use]
    pub fn with_image(mut self, key: impl Into<String>, path: impl Into<String>) -> Self {
        self.images.insert(key.into(), path.into());
        self
    }

    /// Register a track under its id.
    #[must_use]
    pub fn with_track(mut self, id: impl Into<String>, track: Track) -> Self {
        self.tracks.insert(id.into(), track);
        self
    }

    /// Resolve an image key to its path.
    #[must_use]
    pub fn image(&self, key: &str) -> Option<&str> {
        self.images.get(key).map(String::as_str)
    }

    /// Look up a track by id.
    #[must_use]
    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.get(id)
    }

    /// Number of registered images.
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Number of registered tracks.
    #[must_use]
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }
}
