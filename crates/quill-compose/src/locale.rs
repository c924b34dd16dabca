//! Supported locales and per-locale values.

use std::fmt;
use std::str::FromStr;

/// Locale a document is composed for.
///
/// The set is closed: every localized table in the engine is an exhaustive
/// `match` over these variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Locale {
    /// Japanese.
    #[default]
    Ja,
    /// English.
    En,
}

impl Locale {
    /// All supported locales.
    pub const ALL: [Self; 2] = [Self::Ja, Self::En];

    /// Short language tag (`"ja"`, `"en"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown language tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale '{0}' (expected 'ja' or 'en')")]
pub struct ParseLocaleError(String);

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ja" | "ja-jp" => Ok(Self::Ja),
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            _ => Err(ParseLocaleError(s.to_owned())),
        }
    }
}

/// A value present for every [`Locale`].
///
/// Having one field per locale makes a missing translation a type error
/// rather than a runtime lookup miss.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Localized<T> {
    /// Japanese value.
    pub ja: T,
    /// English value.
    pub en: T,
}

impl<T> Localized<T> {
    /// Create a localized value.
    pub fn new(ja: T, en: T) -> Self {
        Self { ja, en }
    }

    /// Value for the given locale.
    pub fn get(&self, locale: Locale) -> &T {
        match locale {
            Locale::Ja => &self.ja,
            Locale::En => &self.en,
        }
    }
}
