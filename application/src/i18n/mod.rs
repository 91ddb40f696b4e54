//! Localization of the site.

pub mod dictionary;
pub mod route;

use std::{collections::HashMap, sync::Arc};

use common::Locale;
use derive_more::{Display, Error};

pub use self::{
    dictionary::{Dictionary, LoadError},
    route::Route,
};

/// [`Dictionary`]s of all the supported [`Locale`]s.
#[derive(Clone, Debug)]
pub struct Dictionaries(HashMap<Locale, Arc<Dictionary>>);

impl Dictionaries {
    /// Loads and validates the [`Dictionary`]s embedded into the binary.
    ///
    /// # Errors
    ///
    /// Errors if any of the [`Dictionary`]s is invalid.
    pub fn load() -> Result<Self, InvalidDictionaryError> {
        Locale::ALL
            .into_iter()
            .map(|locale| {
                Dictionary::parse(source(locale))
                    .map(|dict| (locale, Arc::new(dict)))
                    .map_err(|source| InvalidDictionaryError { locale, source })
            })
            .collect::<Result<_, _>>()
            .map(Self)
    }

    /// Returns the [`Dictionary`] of the provided [`Locale`], falling back to
    /// the [`Locale::DEFAULT`] one.
    #[must_use]
    pub fn get(&self, locale: Locale) -> Arc<Dictionary> {
        self.0
            .get(&locale)
            .or_else(|| self.0.get(&Locale::DEFAULT))
            .cloned()
            .unwrap_or_default()
    }
}

/// Returns the embedded JSON source of the provided [`Locale`]'s
/// [`Dictionary`].
const fn source(locale: Locale) -> &'static str {
    match locale {
        Locale::En => include_str!("dictionaries/en.json"),
        Locale::Tr => include_str!("dictionaries/tr.json"),
        Locale::De => include_str!("dictionaries/de.json"),
        Locale::Ru => include_str!("dictionaries/ru.json"),
    }
}

/// Error of an invalid [`Dictionary`].
#[derive(Debug, Display, Error)]
#[display("invalid `{locale}` dictionary: {source}")]
pub struct InvalidDictionaryError {
    /// [`Locale`] of the invalid [`Dictionary`].
    #[error(not(source))]
    pub locale: Locale,

    /// Reason of the [`Dictionary`] being invalid.
    pub source: LoadError,
}

#[cfg(test)]
mod spec {
    use common::Locale;

    use super::{Dictionaries, Route};

    #[test]
    fn embedded_dictionaries_are_valid() {
        let dicts = Dictionaries::load().unwrap();

        for locale in Locale::ALL {
            let dict = dicts.get(locale);
            for route in Route::ALL {
                let path = format!("pages.{}.title", route.key());
                assert_ne!(dict.resolve(&path, ""), "", "{locale}: {path}");
            }
            assert_ne!(dict.resolve("filters.guestsValue", ""), "");
        }
        assert_eq!(
            dicts.get(Locale::Tr).resolve("filters.region", ""),
            "Bölge",
        );
    }
}
