//! Key resolution against the current language.
//!
//! A [`Translator`] pairs a shared [`Dictionary`] with the currently selected
//! [`Language`]. Resolution never fails: a missing key logs a warning and
//! renders as the key itself, so the page never shows a blank string.
//!
//! Fallback order for a present key: selected language, then
//! [`Language::PRIMARY`], then the key.

use std::cell::Cell;
use std::rc::Rc;

use tracing::warn;

use crate::catalog::Dictionary;
use crate::language::Language;

/// Resolves translation keys for the current language.
///
/// Cloning shares the dictionary but not the language selection.
#[derive(Debug, Clone)]
pub struct Translator {
    dictionary: Rc<Dictionary>,
    language: Cell<Language>,
}

impl Translator {
    /// Translator over `dictionary` starting in the primary language.
    #[must_use]
    pub fn new(dictionary: Rc<Dictionary>) -> Self {
        Self::with_language(dictionary, Language::PRIMARY)
    }

    /// Translator starting in `language`.
    #[must_use]
    pub fn with_language(dictionary: Rc<Dictionary>, language: Language) -> Self {
        Self {
            dictionary,
            language: Cell::new(language),
        }
    }

    /// The currently selected language.
    #[must_use]
    pub fn language(&self) -> Language {
        self.language.get()
    }

    /// Select the language for subsequent lookups.
    pub fn set_language(&self, language: Language) {
        let previous = self.language.replace(language);
        if previous != language {
            tracing::debug!(from = %previous, to = %language, "language changed");
        }
    }

    /// The dictionary this translator reads from.
    #[must_use]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Resolve `key` for the current language.
    ///
    /// Returns the key itself (and emits one warning) when the dictionary
    /// has no such key.
    #[must_use]
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        let Some(entry) = self.dictionary.get(key) else {
            warn!(key, "translation key not found");
            return key;
        };
        entry
            .get(self.language.get())
            .or_else(|| entry.get(Language::PRIMARY))
            .unwrap_or(key)
    }

    /// Alias of [`t`](Self::t).
    #[must_use]
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.t(key)
    }

    /// Resolve `key` and substitute `{name}` tokens from `args`.
    #[must_use]
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        interpolate(self.t(key), args)
    }
}

/// Single-pass `{name}` substitution.
///
/// Tokens without a matching argument, and unterminated `{`, are copied
/// through unchanged. Substituted values are never re-scanned.
#[must_use]
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let name = &after[..close];
        match args.iter().find(|(arg, _)| *arg == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TranslationEntry;

    fn translator() -> Translator {
        let dict = Dictionary::builder()
            .entry(
                "hero.title",
                TranslationEntry::trilingual(
                    "Smart Queue Management",
                    "Gestion intelligente des files",
                    "\u{625}\u{62f}\u{627}\u{631}\u{629} \u{642}\u{627}\u{626}\u{645}\u{629} \u{627}\u{644}\u{627}\u{646}\u{62a}\u{638}\u{627}\u{631} \u{627}\u{644}\u{630}\u{643}\u{64a}\u{629}",
                ),
            )
            .entry("footer.copyright", TranslationEntry::new("All rights reserved"))
            .entry(
                "contact.greeting",
                TranslationEntry::new("Thanks, {name}!").with(Language::French, "Merci, {name} !"),
            )
            .build()
            .expect("valid dictionary");
        Translator::new(Rc::new(dict))
    }

    #[test]
    fn resolves_selected_language() {
        let t = translator();
        assert_eq!(t.t("hero.title"), "Smart Queue Management");
        t.set_language(Language::French);
        assert_eq!(t.t("hero.title"), "Gestion intelligente des files");
        t.set_language(Language::Arabic);
        assert!(t.t("hero.title").starts_with('\u{625}'));
    }

    #[test]
    fn falls_back_to_primary() {
        let t = translator();
        t.set_language(Language::Arabic);
        assert_eq!(t.t("footer.copyright"), "All rights reserved");
    }

    #[test]
    fn missing_key_renders_as_key() {
        let t = translator();
        assert_eq!(t.t("nonexistent.key"), "nonexistent.key");
        assert_eq!(t.resolve(""), "");
    }

    #[test]
    fn set_language_only_affects_later_lookups() {
        let t = translator();
        let before = t.t("hero.title").to_string();
        t.set_language(Language::French);
        assert_eq!(before, "Smart Queue Management");
        assert_eq!(t.language(), Language::French);
    }

    #[test]
    fn clones_select_independently() {
        let a = translator();
        let b = a.clone();
        b.set_language(Language::French);
        assert_eq!(a.language(), Language::English);
        assert_eq!(b.t("hero.title"), "Gestion intelligente des files");
    }

    #[test]
    fn format_substitutes_after_fallback() {
        let t = translator();
        t.set_language(Language::French);
        assert_eq!(t.format("contact.greeting", &[("name", "Amel")]), "Merci, Amel !");
        t.set_language(Language::Arabic);
        assert_eq!(t.format("contact.greeting", &[("name", "Amel")]), "Thanks, Amel!");
    }

    #[test]
    fn interpolate_edge_cases() {
        assert_eq!(interpolate("plain", &[]), "plain");
        assert_eq!(interpolate("{a}{b}", &[("a", "1"), ("b", "2")]), "12");
        assert_eq!(interpolate("x {missing} y", &[]), "x {missing} y");
        assert_eq!(interpolate("open { brace", &[("a", "1")]), "open { brace");
        assert_eq!(interpolate("{}", &[("", "empty")]), "empty");
        assert_eq!(interpolate("{a}", &[("a", "{a}")]), "{a}");
        assert_eq!(interpolate("caf\u{e9} {n}", &[("n", "2")]), "caf\u{e9} 2");
    }
}
