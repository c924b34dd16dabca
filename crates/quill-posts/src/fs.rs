//! Filesystem post store.
//!
//! Provides [`FsPostStore`] for reading `<dir>/<slug>.yaml` records.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::store::{
    Post, PostFields, PostStore, StoreError, StoreErrorKind, sort_newest_first, validate_slug,
};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Record extension.
const EXTENSION: &str = "yaml";

/// On-disk record; the slug comes from the file name.
#[derive(Debug, Deserialize)]
struct PostRecord {
    date: String,
    #[serde(default)]
    category: String,
    ja: PostFields,
    en: PostFields,
}

/// Filesystem post store.
///
/// ```yaml
/// # posts/shio-to-pixel.yaml
/// date: 2024-05-01
/// category: music
/// ja:
///   title: 塩とピクセル
///   body: |
///     ## はじめに
/// en:
///   title: Salt and Pixel
///   body: |
///     ## Intro
/// ```
#[derive(Debug, Clone)]
pub struct FsPostStore {
    dir: PathBuf,
}

impl FsPostStore {
    /// Create a store reading from `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the store reads from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{slug}.{EXTENSION}"))
    }

    fn read_record(&self, slug: &str, path: &Path) -> Result<Post, StoreError> {
        let content = fs::read_to_string(path)
            .map_err(|e| StoreError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))?;
        let record: PostRecord = serde_yaml::from_str(&content).map_err(|e| {
            StoreError::new(StoreErrorKind::Parse)
                .with_path(path)
                .with_backend(BACKEND)
                .with_source(e)
        })?;
        Ok(Post {
            slug: slug.to_owned(),
            date: record.date,
            category: record.category,
            ja: record.ja,
            en: record.en,
        })
    }
}

impl PostStore for FsPostStore {
    fn get(&self, slug: &str) -> Result<Post, StoreError> {
        validate_slug(slug).map_err(|e| e.with_backend(BACKEND))?;
        let path = self.record_path(slug);
        tracing::debug!(slug, path = %path.display(), "Reading post");
        self.read_record(slug, &path)
    }

    fn list(&self) -> Result<Vec<Post>, StoreError> {
        let entries = fs::read_dir(&self.dir)
            .map_err(|e| StoreError::io(e, Some(self.dir.clone())).with_backend(BACKEND))?;

        let mut posts = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| StoreError::io(e, Some(self.dir.clone())).with_backend(BACKEND))?
                .path();

            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if validate_slug(slug).is_err() {
                tracing::warn!(path = %path.display(), "Skipping post with invalid slug");
                continue;
            }
            posts.push(self.read_record(slug, &path)?);
        }

        sort_newest_first(&mut posts);
        tracing::debug!(dir = %self.dir.display(), count = posts.len(), "Listed posts");
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quill_compose::Locale;

    const RECORD: &str = "date: 2024-05-01\ncategory: music\nja:\n  title: 塩とピクセル\n  excerpt: 短い紹介\n  body: |\n    ## はじめに\n    本文\nen:\n  title: Salt and Pixel\n  body: |\n    ## Intro\n    Body\n";

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_post_store_is_send_sync() {
        assert_send_sync::<FsPostStore>();
    }

    fn create_store() -> (tempfile::TempDir, FsPostStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsPostStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_get_reads_record() {
        let (dir, store) = create_store();
        fs::write(dir.path().join("shio-to-pixel.yaml"), RECORD).unwrap();

        let post = store.get("shio-to-pixel").unwrap();

        assert_eq!(post.slug, "shio-to-pixel");
        assert_eq!(post.date, "2024-05-01");
        assert_eq!(post.category, "music");
        assert_eq!(post.fields(Locale::Ja).title, "塩とピクセル");
        assert_eq!(post.fields(Locale::Ja).excerpt, "短い紹介");
        assert_eq!(post.fields(Locale::En).excerpt, "");
        assert_eq!(post.en.body, "## Intro\nBody\n");
    }

    #[test]
    fn test_get_missing_post() {
        let (_dir, store) = create_store();
        let err = store.get("missing").unwrap_err();
        assert_eq!(err.kind, StoreErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_get_rejects_path_traversal() {
        let (_dir, store) = create_store();
        let err = store.get("../secret").unwrap_err();
        assert_eq!(err.kind, StoreErrorKind::InvalidSlug);
    }

    #[test]
    fn test_get_reports_parse_error() {
        let (dir, store) = create_store();
        fs::write(dir.path().join("broken.yaml"), "date: [unclosed").unwrap();

        let err = store.get("broken").unwrap_err();

        assert_eq!(err.kind, StoreErrorKind::Parse);
        assert!(err.downcast_source::<serde_yaml::Error>().is_some());
        assert_eq!(err.path, Some(dir.path().join("broken.yaml")));
    }

    #[test]
    fn test_list_sorts_newest_first() {
        let (dir, store) = create_store();
        fs::write(dir.path().join("old.yaml"), RECORD.replace("2024-05-01", "2023-01-01")).unwrap();
        fs::write(dir.path().join("new.yaml"), RECORD).unwrap();

        let slugs: Vec<String> = store.list().unwrap().into_iter().map(|p| p.slug).collect();

        assert_eq!(slugs, vec!["new".to_owned(), "old".to_owned()]);
    }

    #[test]
    fn test_list_skips_other_files() {
        let (dir, store) = create_store();
        fs::write(dir.path().join("post.yaml"), RECORD).unwrap();
        fs::write(dir.path().join("notes.md"), "# Notes").unwrap();
        fs::write(dir.path().join("Bad_Slug.yaml"), RECORD).unwrap();

        let posts = store.list().unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "post");
    }

    #[test]
    fn test_list_missing_dir() {
        let store = FsPostStore::new("/nonexistent/posts");
        let err = store.list().unwrap_err();
        assert_eq!(err.kind, StoreErrorKind::NotFound);
    }
}
