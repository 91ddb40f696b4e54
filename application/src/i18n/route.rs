//! Localized [`Route`] slugs.

use common::Locale;
use serde::Serialize;

/// Page of the site having a localized URL slug.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Route {
    /// Villa listing.
    Villas,

    /// About page.
    About,

    /// Contact page.
    Contact,
}

impl Route {
    /// All the [`Route`]s.
    pub const ALL: [Self; 3] = [Self::Villas, Self::About, Self::Contact];

    /// Returns the key of this [`Route`] used in dictionaries.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Villas => "villas",
            Self::About => "about",
            Self::Contact => "contact",
        }
    }

    /// Returns the slugs of this [`Route`] in the [`Locale`]s it has one.
    const fn slugs(self) -> &'static [(Locale, &'static str)] {
        match self {
            Self::Villas => &[
                (Locale::En, "villas"),
                (Locale::Tr, "villalar"),
                (Locale::De, "villen"),
                (Locale::Ru, "виллы"),
            ],
            Self::About => &[
                (Locale::En, "about"),
                (Locale::Tr, "hakkinda"),
                (Locale::De, "uber"),
                (Locale::Ru, "о-нас"),
            ],
            Self::Contact => &[
                (Locale::En, "contact"),
                (Locale::Tr, "villa-kiralama-iletisim"),
                (Locale::De, "kontakt"),
                (Locale::Ru, "контакты"),
            ],
        }
    }

    /// Returns the slug of this [`Route`] in the provided [`Locale`], falling
    /// back to the English one.
    #[must_use]
    pub fn slug(self, locale: Locale) -> &'static str {
        let find = |locale: Locale| {
            self.slugs().iter().find(|(l, _)| *l == locale)
        };
        find(locale)
            .or_else(|| find(Locale::En))
            .map_or(self.key(), |(_, slug)| slug)
    }

    /// Returns the localized path of this [`Route`].
    #[must_use]
    pub fn path(self, locale: Locale) -> String {
        format!("/{locale}/{}", self.slug(locale))
    }

    /// Looks up the [`Route`] having the provided `slug` in the provided
    /// [`Locale`].
    #[must_use]
    pub fn from_slug(slug: &str, locale: Locale) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|route| route.slug(locale) == slug)
    }
}
