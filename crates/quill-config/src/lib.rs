//! Configuration management for Quill.
//!
//! Parses `quill.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `compose.sign_in_path`
//! - every value in `[images]`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the sign-in path used by gate prompts.
    pub sign_in_path: Option<String>,
    /// Override the posts directory.
    pub posts_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quill.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Composition settings.
    pub compose: ComposeConfig,
    /// Post storage settings (paths are relative strings from TOML).
    posts: PostsConfigRaw,
    /// Image registry: short key to path or URL.
    pub images: BTreeMap<String, String>,
    /// Track registry keyed by track id.
    pub tracks: BTreeMap<String, TrackConfig>,

    /// Resolved post storage settings (set after loading).
    #[serde(skip)]
    pub posts_resolved: PostsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Composition configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Target of the call-to-action link in members-only prompts.
    pub sign_in_path: String,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            sign_in_path: "/login".to_owned(),
        }
    }
}

/// Raw posts configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PostsConfigRaw {
    dir: Option<String>,
}

/// Resolved posts configuration with an absolute directory.
#[derive(Debug, Default)]
pub struct PostsConfig {
    /// Directory holding `<slug>.yaml` post records.
    pub dir: PathBuf,
}

/// A track entry in `[tracks.<id>]`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TrackConfig {
    /// Image registry key of the artwork.
    pub artwork: String,
    /// Title per locale.
    pub title: LocalizedTitle,
}

/// Per-locale title.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LocalizedTitle {
    /// Japanese title.
    pub ja: String,
    /// English title.
    pub en: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`images.hero`").
        field: String,
        /// Error message (e.g., "${`ASSET_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a path on this site (`/…`, not `//…`).
fn require_root_relative(value: &str, field: &str) -> Result<(), ConfigError> {
    if !value.starts_with('/') || value.starts_with("//") {
        return Err(ConfigError::Validation(format!(
            "{field} must be a root-relative path starting with /"
        )));
    }
    Ok(())
}

/// Require an image location the sanitizer will keep.
fn require_image_location(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.starts_with("https://") {
        return Ok(());
    }
    require_root_relative(value, field).map_err(|_| {
        ConfigError::Validation(format!(
            "{field} must be a root-relative path or an https:// URL"
        ))
    })
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `quill.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the loaded values are invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate_compose()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(sign_in_path) = &settings.sign_in_path {
            self.compose.sign_in_path.clone_from(sign_in_path);
        }
        if let Some(posts_dir) = &settings.posts_dir {
            self.posts_resolved.dir.clone_from(posts_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            compose: ComposeConfig::default(),
            posts: PostsConfigRaw::default(),
            images: BTreeMap::new(),
            tracks: BTreeMap::new(),
            posts_resolved: PostsConfig {
                dir: base.join("posts"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_compose()?;
        self.validate_images()?;
        self.validate_tracks()?;
        Ok(())
    }

    fn validate_compose(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.compose.sign_in_path, "compose.sign_in_path")?;
        require_root_relative(&self.compose.sign_in_path, "compose.sign_in_path")
    }

    fn validate_images(&self) -> Result<(), ConfigError> {
        for (key, location) in &self.images {
            let field = format!("images.{key}");
            require_non_empty(location, &field)?;
            require_image_location(location, &field)?;
        }
        Ok(())
    }

    fn validate_tracks(&self) -> Result<(), ConfigError> {
        for (id, track) in &self.tracks {
            require_non_empty(&track.artwork, &format!("tracks.{id}.artwork"))?;
            require_non_empty(&track.title.ja, &format!("tracks.{id}.title.ja"))?;
            require_non_empty(&track.title.en, &format!("tracks.{id}.title.en"))?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.compose.sign_in_path =
            expand::expand_env(&self.compose.sign_in_path, "compose.sign_in_path")?;

        for (key, location) in &mut self.images {
            *location = expand::expand_env(location, &format!("images.{key}"))?;
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.posts_resolved = PostsConfig {
            dir: config_dir.join(self.posts.dir.as_deref().unwrap_or("posts")),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FULL: &str = r#"
[compose]
sign_in_path = "/members/login"

[posts]
dir = "content/posts"

[images]
hero = "/images/hero.png"
cover = "https://cdn.example.com/cover.jpg"

[tracks.shio-to-pixel]
artwork = "cover"
title = { ja = "塩とピクセル", en = "Salt and Pixel" }
"#;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/site"));
        assert_eq!(config.compose.sign_in_path, "/login");
        assert_eq!(config.posts_resolved.dir, PathBuf::from("/site/posts"));
        assert!(config.images.is_empty());
        assert!(config.tracks.is_empty());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.compose.sign_in_path, "/login");
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(FULL).unwrap();
        assert_eq!(config.compose.sign_in_path, "/members/login");
        assert_eq!(config.images.len(), 2);
        assert_eq!(
            config.tracks["shio-to-pixel"],
            TrackConfig {
                artwork: "cover".to_owned(),
                title: LocalizedTitle {
                    ja: "塩とピクセル".to_owned(),
                    en: "Salt and Pixel".to_owned(),
                },
            }
        );
    }

    #[test]
    fn test_resolve_paths() {
        let mut config: Config = toml::from_str(FULL).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.posts_resolved.dir,
            PathBuf::from("/project/content/posts")
        );
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quill.toml");
        std::fs::write(&path, FULL).unwrap();

        let config = Config::load(Some(path.as_path()), None).unwrap();

        assert_eq!(config.posts_resolved.dir, dir.path().join("content/posts"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/quill.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quill.toml");
        std::fs::write(&path, "[compose\n").unwrap();

        let err = Config::load(Some(path.as_path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/site"));
        let overrides = CliSettings {
            sign_in_path: Some("/join".to_owned()),
            posts_dir: Some(PathBuf::from("/elsewhere")),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.compose.sign_in_path, "/join");
        assert_eq!(config.posts_resolved.dir, PathBuf::from("/elsewhere"));
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.compose.sign_in_path, "/login");
        assert_eq!(config.posts_resolved.dir, PathBuf::from("/site/posts"));
    }

    #[test]
    fn test_cli_sign_in_path_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quill.toml");
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            sign_in_path: Some("https://evil.example".to_owned()),
            ..Default::default()
        };

        let err = Config::load(Some(path.as_path()), Some(&overrides)).unwrap_err();
        assert!(err.to_string().contains("compose.sign_in_path"));
    }

    #[test]
    fn test_expand_env_vars_images() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("QUILL_TEST_ASSET_ROOT", "https://cdn.test.com");
        }

        let toml = r#"
[images]
hero = "${QUILL_TEST_ASSET_ROOT}/hero.png"
local = "${QUILL_TEST_UNSET_ROOT:-}/local.png"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.images["hero"], "https://cdn.test.com/hero.png");
        assert_eq!(config.images["local"], "/local.png");

        unsafe {
            std::env::remove_var("QUILL_TEST_ASSET_ROOT");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("QUILL_TEST_MISSING_LOGIN");
        }

        let toml = r#"
[compose]
sign_in_path = "${QUILL_TEST_MISSING_LOGIN}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("QUILL_TEST_MISSING_LOGIN"));
        assert!(err.to_string().contains("compose.sign_in_path"));
    }

    #[test]
    fn test_validate_sign_in_path() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.compose.sign_in_path = String::new();
        assert!(config.validate().is_err());

        config.compose.sign_in_path = "//evil.example/login".to_owned();
        assert!(config.validate().is_err());

        config.compose.sign_in_path = "/login".to_owned();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_image_locations() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config
            .images
            .insert("ok".to_owned(), "/images/ok.png".to_owned());
        assert!(config.validate().is_ok());

        config
            .images
            .insert("bad".to_owned(), "http://insecure.example/x.png".to_owned());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("images.bad"));
    }

    #[test]
    fn test_validate_track_titles() {
        let toml = r#"
[tracks.t]
artwork = "cover"
title = { ja = "", en = "Title" }
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tracks.t.title.ja"));
    }
}
