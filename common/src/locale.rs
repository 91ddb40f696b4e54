//! [`Locale`] definitions.

use std::cmp::Ordering;

use strum::{AsRefStr, Display, EnumString};

/// Supported language of the site.
#[derive(
    AsRefStr, Clone, Copy, Debug, Default, Display, EnumString, Eq, Hash,
    PartialEq,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "lowercase")
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Locale {
    /// English.
    #[default]
    En,

    /// Turkish.
    Tr,

    /// German.
    De,

    /// Russian.
    Ru,
}

impl Locale {
    /// All the supported [`Locale`]s.
    pub const ALL: [Self; 4] = [Self::En, Self::Tr, Self::De, Self::Ru];

    /// [`Locale`] used whenever no supported one can be resolved.
    pub const DEFAULT: Self = Self::En;

    /// Resolves the provided locale `code`, falling back to the
    /// [`Locale::DEFAULT`] for unsupported ones.
    #[must_use]
    pub fn resolve(code: &str) -> Self {
        code.parse().unwrap_or(Self::DEFAULT)
    }

    /// Returns the [`Locale`] the provided `path` is prefixed with, if any.
    ///
    /// A path is prefixed if it's either `/{locale}` or starts with
    /// `/{locale}/`.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let rest = path.strip_prefix('/')?;
        let segment = rest.split('/').next()?;
        Self::ALL.into_iter().find(|l| l.as_ref() == segment)
    }

    /// Returns the [`Locale`] the provided `path` is prefixed with, falling
    /// back to the [`Locale::DEFAULT`].
    #[must_use]
    pub fn extract_from_path(path: &str) -> Self {
        Self::from_path(path).unwrap_or(Self::DEFAULT)
    }

    /// Prefixes the provided `path` with this [`Locale`], replacing any
    /// existing locale prefix.
    #[must_use]
    pub fn localize_path(self, path: &str) -> String {
        let rest = match Self::from_path(path) {
            Some(current) => &path[current.as_ref().len() + 1..],
            None if path == "/" => "",
            None => path,
        };
        format!("/{self}{rest}")
    }

    /// Negotiates the best supported [`Locale`] for the provided
    /// `Accept-Language` header value.
    ///
    /// Language ranges are tried in the order of their quality values (ties
    /// keep the header order); each one matches either exactly or by its
    /// primary subtag. Ranges with zero or malformed quality are ignored.
    #[must_use]
    pub fn negotiate(accept_language: &str) -> Self {
        let mut ranges = accept_language
            .split(',')
            .filter_map(|range| {
                let mut parts = range.split(';').map(str::trim);
                let tag = parts.next().filter(|t| !t.is_empty())?;
                let quality = parts
                    .find_map(|p| p.strip_prefix("q="))
                    .map_or(Some(1.0), |q| q.parse::<f32>().ok())?;
                (quality > 0.0).then_some((tag, quality))
            })
            .collect::<Vec<_>>();
        ranges.sort_by(|(_, a), (_, b)| {
            b.partial_cmp(a).unwrap_or(Ordering::Equal)
        });

        ranges
            .into_iter()
            .find_map(|(tag, _)| {
                if tag == "*" {
                    return Some(Self::DEFAULT);
                }
                let primary = tag.split(['-', '_']).next().unwrap_or(tag);
                primary.parse().ok()
            })
            .unwrap_or(Self::DEFAULT)
    }
}

#[cfg(test)]
mod spec {
    use super::Locale;

    #[test]
    fn resolves_with_fallback() {
        assert_eq!(Locale::resolve("tr"), Locale::Tr);
        assert_eq!(Locale::resolve("DE"), Locale::De);
        assert_eq!(Locale::resolve("fr"), Locale::En);
        assert_eq!(Locale::resolve(""), Locale::En);
    }

    #[test]
    fn detects_path_prefix() {
        assert_eq!(Locale::from_path("/ru"), Some(Locale::Ru));
        assert_eq!(Locale::from_path("/ru/villa-kiralama"), Some(Locale::Ru));
        assert_eq!(Locale::from_path("/rus/villa-kiralama"), None);
        assert_eq!(Locale::from_path("/villa-kiralama"), None);
        assert_eq!(Locale::from_path("/"), None);
        assert_eq!(Locale::extract_from_path("/fr/villas"), Locale::En);
    }

    #[test]
    fn localizes_paths() {
        assert_eq!(Locale::De.localize_path("/"), "/de");
        assert_eq!(
            Locale::De.localize_path("/villa-kiralama"),
            "/de/villa-kiralama",
        );
        assert_eq!(
            Locale::De.localize_path("/tr/villa-kiralama"),
            "/de/villa-kiralama",
        );
        assert_eq!(Locale::De.localize_path("/tr"), "/de");
    }

    #[test]
    fn negotiates_accept_language() {
        assert_eq!(Locale::negotiate("tr-TR,tr;q=0.9,en;q=0.8"), Locale::Tr);
        assert_eq!(Locale::negotiate("fr-FR, de;q=0.5, en;q=0.7"), Locale::En);
        assert_eq!(Locale::negotiate("ru;q=0, de"), Locale::De);
        assert_eq!(Locale::negotiate("ja, zh"), Locale::En);
        assert_eq!(Locale::negotiate(""), Locale::En);
        assert_eq!(Locale::negotiate("*"), Locale::En);
    }
}
