#![forbid(unsafe_code)]

//! Routing table.

use qline_i18n::Translator;

/// One page of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    About,
    Contact,
    Privacy,
    NotFound,
}

impl Page {
    /// Pages shown in the navigation bar, in display order.
    pub const NAV: [Page; 4] = [Page::Home, Page::About, Page::Contact, Page::Privacy];

    /// Route a request path. Query strings, fragments and a trailing slash
    /// are ignored; anything unknown is [`Page::NotFound`].
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Home,
            "/about" => Self::About,
            "/contact" => Self::Contact,
            "/privacy" => Self::Privacy,
            _ => Self::NotFound,
        }
    }

    /// Canonical path. [`Page::NotFound`] has none and reports `"*"`.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::About => "/about",
            Self::Contact => "/contact",
            Self::Privacy => "/privacy",
            Self::NotFound => "*",
        }
    }

    /// Translation key of the page heading.
    #[must_use]
    pub const fn title_key(self) -> &'static str {
        match self {
            Self::Home => "hero.title",
            Self::About => "aboutPage.title",
            Self::Contact => "contactPage.title",
            Self::Privacy => "privacyPage.title",
            Self::NotFound => "notFound.title",
        }
    }

    /// Translation key of the navigation label, if the page is navigable.
    #[must_use]
    pub const fn nav_key(self) -> Option<&'static str> {
        match self {
            Self::Home => Some("nav.home"),
            Self::About => Some("nav.about"),
            Self::Contact => Some("nav.contact"),
            Self::Privacy => Some("nav.privacy"),
            Self::NotFound => None,
        }
    }

    /// Heading in the translator's current language.
    #[must_use]
    pub fn title(self, translator: &Translator) -> &str {
        translator.t(self.title_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_known_paths() {
        assert_eq!(Page::from_path("/"), Page::Home);
        assert_eq!(Page::from_path(""), Page::Home);
        assert_eq!(Page::from_path("/about"), Page::About);
        assert_eq!(Page::from_path("/about/"), Page::About);
        assert_eq!(Page::from_path("/contact?ref=nav"), Page::Contact);
        assert_eq!(Page::from_path("/privacy#cookies"), Page::Privacy);
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(Page::from_path("/pricing"), Page::NotFound);
        assert_eq!(Page::from_path("/about/team"), Page::NotFound);
        assert_eq!(Page::from_path("about"), Page::NotFound);
    }

    #[test]
    fn nav_pages_round_trip_through_paths() {
        for page in Page::NAV {
            assert_eq!(Page::from_path(page.path()), page);
            assert!(page.nav_key().is_some());
        }
        assert_eq!(Page::NotFound.nav_key(), None);
    }
}
