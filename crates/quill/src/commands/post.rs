//! `quill post` command implementation.

use std::path::PathBuf;

use clap::Args;
use quill_compose::{Composer, Locale};
use quill_config::{CliSettings, Config};
use quill_posts::{FsPostStore, PostStore};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the post command.
#[derive(Args)]
pub(crate) struct PostArgs {
    /// Slug of the post to compose.
    slug: String,

    /// Locale to compose for.
    #[arg(short, long, default_value = "ja", env = "QUILL_LANG")]
    lang: Locale,

    /// Compose as a signed-in viewer (reveals members-only sections).
    #[arg(short, long)]
    authenticated: bool,

    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Posts directory (overrides config).
    #[arg(short, long)]
    posts_dir: Option<PathBuf>,
}

impl PostArgs {
    /// Execute the post command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the post can't be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            posts_dir: self.posts_dir,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let composer = super::composer_from_config(&config);
        let store = FsPostStore::new(&config.posts_resolved.dir);

        let page = render_post(&store, &composer, &self.slug, self.lang, self.authenticated)?;
        output.document(&page)?;

        Ok(())
    }
}

/// Compose one stored post: a title comment line followed by the body HTML.
fn render_post(
    store: &dyn PostStore,
    composer: &Composer,
    slug: &str,
    locale: Locale,
    authenticated: bool,
) -> Result<String, CliError> {
    let post = store.get(slug)?;
    let fields = post.fields(locale);
    let html = composer.compose(&fields.body, locale, authenticated);
    Ok(format!(
        "<!-- {} ({}) -->\n{html}",
        fields.title.replace("--", "- -"),
        post.date
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quill_compose::Registry;
    use quill_posts::{MockPostStore, Post, PostFields, StoreErrorKind};

    fn store() -> MockPostStore {
        MockPostStore::new().with_post(Post {
            slug: "hello".to_owned(),
            date: "2024-05-01".to_owned(),
            category: "note".to_owned(),
            ja: PostFields {
                title: "こんにちは".to_owned(),
                excerpt: String::new(),
                body: "## はじめに\n本文".to_owned(),
            },
            en: PostFields {
                title: "Hello".to_owned(),
                excerpt: String::new(),
                body: "## Intro\nBody text".to_owned(),
            },
        })
    }

    #[test]
    fn test_render_post_per_locale() {
        let composer = Composer::new(Registry::new());

        let page = render_post(&store(), &composer, "hello", Locale::En, false).unwrap();

        let (title, html) = page.split_once('\n').unwrap();
        assert_eq!(title, "<!-- Hello (2024-05-01) -->");
        assert!(html.starts_with(r#"<h2 id="intro" class="heading">"#));
        assert!(html.contains("<p>Body text</p>"));
    }

    #[test]
    fn test_render_post_japanese_title() {
        let composer = Composer::new(Registry::new());

        let page = render_post(&store(), &composer, "hello", Locale::Ja, false).unwrap();

        assert!(page.starts_with("<!-- こんにちは (2024-05-01) -->\n"));
    }

    #[test]
    fn test_render_missing_post() {
        let composer = Composer::new(Registry::new());

        let err = render_post(&store(), &composer, "missing", Locale::Ja, false).unwrap_err();

        assert!(matches!(err, CliError::Store(e) if e.kind == StoreErrorKind::NotFound));
    }
}
