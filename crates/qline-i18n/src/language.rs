//! The closed set of languages the site ships.

use std::fmt;
use std::str::FromStr;

use crate::catalog::I18nError;

/// A supported display language.
///
/// The set is closed: every translation entry is a fixed mapping over these
/// three codes. [`Language::PRIMARY`] is the default selection and the
/// fallback for entries that lack the selected language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "catalog-files", derive(serde::Serialize, serde::Deserialize))]
pub enum Language {
    /// English, the primary language.
    #[default]
    #[cfg_attr(feature = "catalog-files", serde(rename = "en"))]
    English,
    /// French.
    #[cfg_attr(feature = "catalog-files", serde(rename = "fr"))]
    French,
    /// Arabic (right-to-left).
    #[cfg_attr(feature = "catalog-files", serde(rename = "ar"))]
    Arabic,
}

impl Language {
    /// Number of supported languages.
    pub const COUNT: usize = 3;

    /// The default language every entry must define.
    pub const PRIMARY: Language = Language::English;

    /// All languages in slot order.
    pub const ALL: [Language; Self::COUNT] = [Language::English, Language::French, Language::Arabic];

    /// Two-letter code (`"en"`, `"fr"`, `"ar"`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::French => "fr",
            Self::Arabic => "ar",
        }
    }

    /// Name of the language written in that language.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::French => "Fran\u{e7}ais",
            Self::Arabic => "\u{627}\u{644}\u{639}\u{631}\u{628}\u{64a}\u{629}",
        }
    }

    /// Whether text in this language runs right-to-left.
    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Arabic)
    }

    /// Parse a language code. Case-insensitive; region subtags are ignored
    /// (`"fr-CA"` parses as French).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let base = code.split(['-', '_']).next().unwrap_or(code);
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(base))
    }

    pub(crate) const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| I18nError::InvalidLocale(s.to_string()))
    }
}
