//! Post storage for Quill.
//!
//! Provides a [`PostStore`] trait for loading bilingual post records from
//! a backend, so composition never touches storage directly.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`PostStore`] trait with `get()` and `list()` methods
//! - [`FsPostStore`] reading one `<slug>.yaml` file per post
//! - [`MockPostStore`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```no_run
//! use quill_compose::Locale;
//! use quill_posts::{FsPostStore, PostStore};
//!
//! let store = FsPostStore::new("posts");
//! for post in store.list()? {
//!     println!("{} {}", post.date, post.fields(Locale::En).title);
//! }
//! # Ok::<(), quill_posts::StoreError>(())
//! ```

mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod store;

pub use fs::FsPostStore;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockPostStore;
pub use store::{Post, PostFields, PostStore, StoreError, StoreErrorKind, validate_slug};
