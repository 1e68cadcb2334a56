//! Static translation dictionary.
//!
//! # Invariants
//!
//! 1. **Keys are unique**: the builder rejects a second entry for a key.
//! 2. **Primary is always present**: every entry accepted by the builder (or
//!    loaded from a file) defines the [`Language::PRIMARY`] string.
//! 3. **Immutable after build**: a [`Dictionary`] exposes no mutation; share it
//!    behind an `Rc` and hand out translators.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Duplicate key | Same key inserted twice | `I18nError::DuplicateKey` at build |
//! | Empty key | `""` used as a key | `I18nError::EmptyKey` at build |
//! | No primary string | Entry lacks `en` | `I18nError::MissingPrimary` at build |
//! | Missing key | Key not in dictionary | `get` returns `None` |

use std::collections::HashMap;
use std::fmt;

use crate::language::Language;

/// Errors from building or loading a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// A language code was not one of the supported set.
    InvalidLocale(String),
    /// The same key was defined twice.
    DuplicateKey(String),
    /// An entry was defined under the empty key.
    EmptyKey,
    /// An entry does not define the primary language's string.
    MissingPrimary(String),
    /// A dictionary file could not be read.
    Io(String),
    /// A dictionary file could not be parsed.
    ParseError(String),
}

impl fmt::Display for I18nError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLocale(code) => write!(f, "invalid locale: {code}"),
            Self::DuplicateKey(key) => write!(f, "duplicate translation key '{key}'"),
            Self::EmptyKey => f.write_str("translation key must not be empty"),
            Self::MissingPrimary(key) => write!(
                f,
                "translation key '{key}' has no '{}' string",
                Language::PRIMARY
            ),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
            Self::ParseError(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for I18nError {}

/// The strings for one key, one optional slot per [`Language`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationEntry {
    strings: [Option<String>; Language::COUNT],
}

impl TranslationEntry {
    /// Entry with the primary-language string set.
    #[must_use]
    pub fn new(primary: impl Into<String>) -> Self {
        Self::default().with(Language::PRIMARY, primary)
    }

    /// Set the string for `lang`.
    #[must_use]
    pub fn with(mut self, lang: Language, text: impl Into<String>) -> Self {
        self.strings[lang.slot()] = Some(text.into());
        self
    }

    /// Shorthand for the three-language case.
    #[must_use]
    pub fn trilingual(
        en: impl Into<String>,
        fr: impl Into<String>,
        ar: impl Into<String>,
    ) -> Self {
        Self::new(en)
            .with(Language::French, fr)
            .with(Language::Arabic, ar)
    }

    /// The string for exactly `lang`, without fallback.
    #[must_use]
    pub fn get(&self, lang: Language) -> Option<&str> {
        self.strings[lang.slot()].as_deref()
    }

    /// Whether `lang` has its own string.
    #[must_use]
    pub fn has(&self, lang: Language) -> bool {
        self.strings[lang.slot()].is_some()
    }
}

/// Immutable key to [`TranslationEntry`] map.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: HashMap<String, TranslationEntry>,
}

impl Dictionary {
    /// Start building a dictionary.
    #[must_use]
    pub fn builder() -> DictionaryBuilder {
        DictionaryBuilder::default()
    }

    /// Look up an entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TranslationEntry> {
        self.entries.get(key)
    }

    /// Whether `key` is defined.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys, sorted for deterministic output.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Per-language report of which keys carry their own string and which
    /// fall back to the primary language.
    #[must_use]
    pub fn coverage_report(&self) -> CoverageReport {
        let keys = self.keys();
        let total = keys.len();
        let languages = Language::ALL
            .into_iter()
            .map(|language| {
                let falling_back: Vec<String> = keys
                    .iter()
                    .filter(|key| !self.entries[**key].has(language))
                    .map(|key| (*key).to_string())
                    .collect();
                let translated = total - falling_back.len();
                let coverage_percent = if total == 0 {
                    100.0
                } else {
                    (translated as f32 / total as f32) * 100.0
                };
                LanguageCoverage {
                    language,
                    translated,
                    falling_back,
                    coverage_percent,
                }
            })
            .collect();
        CoverageReport {
            total_keys: total,
            languages,
        }
    }
}

/// Collects entries and validates them into a [`Dictionary`].
#[derive(Debug, Default)]
pub struct DictionaryBuilder {
    entries: HashMap<String, TranslationEntry>,
    error: Option<I18nError>,
}

impl DictionaryBuilder {
    /// Add an entry. The first error encountered is reported by [`build`].
    ///
    /// [`build`]: DictionaryBuilder::build
    #[must_use]
    pub fn entry(mut self, key: impl Into<String>, entry: TranslationEntry) -> Self {
        if let Err(err) = self.insert(key, entry) {
            self.error.get_or_insert(err);
        }
        self
    }

    /// Add an entry, reporting problems immediately.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        entry: TranslationEntry,
    ) -> Result<(), I18nError> {
        let key = key.into();
        if key.is_empty() {
            return Err(I18nError::EmptyKey);
        }
        if !entry.has(Language::PRIMARY) {
            return Err(I18nError::MissingPrimary(key));
        }
        if self.entries.contains_key(&key) {
            return Err(I18nError::DuplicateKey(key));
        }
        self.entries.insert(key, entry);
        Ok(())
    }

    /// Finish, returning the first recorded error if any.
    pub fn build(self) -> Result<Dictionary, I18nError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(Dictionary {
                entries: self.entries,
            }),
        }
    }
}

/// Translation coverage for a dictionary.
#[derive(Debug, Clone)]
pub struct CoverageReport {
    /// Number of keys in the dictionary.
    pub total_keys: usize,
    /// One row per supported language, in [`Language::ALL`] order.
    pub languages: Vec<LanguageCoverage>,
}

impl CoverageReport {
    /// The row for `language`.
    #[must_use]
    pub fn for_language(&self, language: Language) -> Option<&LanguageCoverage> {
        self.languages.iter().find(|row| row.language == language)
    }
}

/// Coverage statistics for one language.
#[derive(Debug, Clone)]
pub struct LanguageCoverage {
    /// The language.
    pub language: Language,
    /// Keys that carry a string in this language.
    pub translated: usize,
    /// Keys that will fall back to the primary language, sorted.
    pub falling_back: Vec<String>,
    /// `translated / total` as a percentage (0.0-100.0).
    pub coverage_percent: f32,
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

#[cfg(feature = "catalog-files")]
mod files {
    use std::collections::BTreeMap;
    use std::path::Path;

    use serde::Deserialize;

    use super::{Dictionary, DictionaryBuilder, I18nError, TranslationEntry};
    use crate::language::Language;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct RawEntry {
        en: Option<String>,
        fr: Option<String>,
        ar: Option<String>,
    }

    impl RawEntry {
        fn into_entry(self) -> TranslationEntry {
            let mut entry = TranslationEntry::default();
            for (lang, text) in [
                (Language::English, self.en),
                (Language::French, self.fr),
                (Language::Arabic, self.ar),
            ] {
                if let Some(text) = text {
                    entry = entry.with(lang, text);
                }
            }
            entry
        }
    }

    fn from_raw(raw: BTreeMap<String, RawEntry>) -> Result<Dictionary, I18nError> {
        let mut builder = DictionaryBuilder::default();
        for (key, entry) in raw {
            builder.insert(key, entry.into_entry())?;
        }
        builder.build()
    }

    fn read(path: &Path) -> Result<String, I18nError> {
        std::fs::read_to_string(path)
            .map_err(|e| I18nError::Io(format!("{}: {e}", path.display())))
    }

    impl Dictionary {
        /// Parse a TOML document of `key = { en = "..", fr = "..", ar = ".." }`
        /// tables. Dotted keys must be quoted.
        pub fn from_toml_str(s: &str) -> Result<Self, I18nError> {
            let raw: BTreeMap<String, RawEntry> =
                toml::from_str(s).map_err(|e| I18nError::ParseError(e.to_string()))?;
            from_raw(raw)
        }

        /// Load a TOML dictionary file.
        pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, I18nError> {
            Self::from_toml_str(&read(path.as_ref())?)
        }

        /// Parse a JSON object of `{"key": {"en": "..", ...}}`.
        pub fn from_json_str(s: &str) -> Result<Self, I18nError> {
            let raw: BTreeMap<String, RawEntry> =
                serde_json::from_str(s).map_err(|e| I18nError::ParseError(e.to_string()))?;
            from_raw(raw)
        }

        /// Load a JSON dictionary file.
        pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, I18nError> {
            Self::from_json_str(&read(path.as_ref())?)
        }
    }
}
