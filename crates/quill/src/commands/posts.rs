//! `quill posts` command implementation.

use std::path::PathBuf;

use clap::Args;
use quill_compose::Locale;
use quill_config::{CliSettings, Config};
use quill_posts::{FsPostStore, Post, PostStore};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the posts command.
#[derive(Args)]
pub(crate) struct PostsArgs {
    /// Locale of the listed titles.
    #[arg(short, long, default_value = "ja", env = "QUILL_LANG")]
    lang: Locale,

    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Posts directory (overrides config).
    #[arg(short, long)]
    posts_dir: Option<PathBuf>,
}

impl PostsArgs {
    /// Execute the posts command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the store can't be listed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            posts_dir: self.posts_dir,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let store = FsPostStore::new(&config.posts_resolved.dir);

        let posts = store.list()?;
        if posts.is_empty() {
            output.muted(&format!(
                "No posts in {}",
                config.posts_resolved.dir.display()
            ));
            return Ok(());
        }

        for post in &posts {
            output.document(&listing_line(post, self.lang))?;
        }

        Ok(())
    }
}

/// One tab-separated listing row: slug, date, title.
fn listing_line(post: &Post, locale: Locale) -> String {
    format!("{}\t{}\t{}", post.slug, post.date, post.fields(locale).title)
}
