//! `quill compose` command implementation.

use std::path::PathBuf;

use clap::Args;
use quill_compose::Locale;
use quill_config::Config;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the compose command.
#[derive(Args)]
pub(crate) struct ComposeArgs {
    /// Path to the document file.
    file: PathBuf,

    /// Locale to compose for.
    #[arg(short, long, default_value = "ja", env = "QUILL_LANG")]
    lang: Locale,

    /// Compose as a signed-in viewer (reveals members-only sections).
    #[arg(short, long)]
    authenticated: bool,

    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ComposeArgs {
    /// Execute the compose command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the file can't be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        let composer = super::composer_from_config(&config);

        let document = std::fs::read_to_string(&self.file)?;
        output.info(&format!(
            "Composing {} ({})...",
            self.file.display(),
            self.lang
        ));

        let html = composer.compose(&document, self.lang, self.authenticated);
        output.document(&html)?;

        Ok(())
    }
}
