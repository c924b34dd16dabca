//! CLI command implementations.

pub(crate) mod compose;
pub(crate) mod post;
pub(crate) mod posts;

pub(crate) use compose::ComposeArgs;
pub(crate) use post::PostArgs;
pub(crate) use posts::PostsArgs;

use quill_compose::{ComposeOptions, Composer, Localized, Registry, Track};
use quill_config::Config;

/// Build the image and track registries from `[images]` and `[tracks]`.
fn registry_from_config(config: &Config) -> Registry {
    let images = config
        .images
        .iter()
        .map(|(key, path)| (key.clone(), path.clone()));
    let tracks = config.tracks.iter().map(|(id, track)| {
        let title = Localized::new(track.title.ja.clone(), track.title.en.clone());
        (id.clone(), Track::new(title, track.artwork.clone()))
    });
    Registry::from_parts(images.collect(), tracks.collect())
}

/// Create a composer wired to the loaded configuration.
fn composer_from_config(config: &Config) -> Composer {
    let registry = registry_from_config(config);
    tracing::debug!(
        images = registry.image_count(),
        tracks = registry.track_count(),
        "Registry loaded"
    );
    let options = ComposeOptions::default().with_sign_in_path(config.compose.sign_in_path.clone());
    Composer::with_options(registry, options)
}
