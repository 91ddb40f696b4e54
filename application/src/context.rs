//! [`Context`]-related definitions.

use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts};
use common::Locale;

use crate::{
    api::RouteError,
    cache::Caches,
    gate,
    i18n::{Dictionaries, Dictionary},
    Error, Service,
};

/// Per-request context of the application.
#[derive(Clone, Debug)]
pub struct Context {
    /// [`Service`] instance.
    service: Service,

    /// [`Locale`] of the current request.
    locale: Locale,

    /// [`Dictionary`] of the [`Context::locale`].
    dictionary: Arc<Dictionary>,

    /// [`Caches`] of API responses.
    caches: Caches,
}

impl Context {
    /// Creates a new [`Context`].
    #[must_use]
    pub fn new(
        service: Service,
        locale: Locale,
        dictionary: Arc<Dictionary>,
        caches: Caches,
    ) -> Self {
        Self {
            service,
            locale,
            dictionary,
            caches,
        }
    }

    /// Returns [`Service`] instance of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Returns [`Locale`] of the current request.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Returns [`Dictionary`] of the current request's [`Locale`].
    #[must_use]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Returns [`Caches`] of API responses.
    #[must_use]
    pub fn caches(&self) -> &Caches {
        &self.caches
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Context
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let service = parts
            .extensions
            .get::<Service>()
            .cloned()
            .ok_or_else(|| Error::internal(&"missing `Service` extension"))?;
        let dictionaries = parts
            .extensions
            .get::<Arc<Dictionaries>>()
            .cloned()
            .ok_or_else(|| {
                Error::internal(&"missing `Dictionaries` extension")
            })?;
        let caches = parts
            .extensions
            .get::<Caches>()
            .cloned()
            .ok_or_else(|| Error::internal(&"missing `Caches` extension"))?;

        // Only API paths may omit the locale prefix.
        let path = parts.uri.path();
        let locale = match Locale::from_path(path) {
            Some(locale) => locale,
            None if path.starts_with("/api/") => {
                gate::negotiate(&parts.headers)
            }
            None => return Err(RouteError::NotFound.into()),
        };

        Ok(Self::new(service, locale, dictionaries.get(locale), caches))
    }
}
