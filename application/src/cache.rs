//! Read-through [`Cache`] of API responses.

use std::{future::Future, hash::Hash, sync::Arc};

use common::Locale;
use derive_more::Debug;

use crate::{api, config, filter::FilterParams, Error};

/// Read-through cache of values computed by some fallible future.
#[derive(Debug)]
pub struct Cache<K, V> {
    /// Underlying [`moka`] cache.
    #[debug(skip)]
    inner: moka::future::Cache<K, V>,
}

impl<K, V> Clone for Cache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates a new empty [`Cache`] according to the provided
    /// [`config::Cache`].
    #[must_use]
    pub fn new(config: config::Cache) -> Self {
        Self {
            inner: moka::future::Cache::builder()
                .max_capacity(config.max_capacity)
                .time_to_live(config.ttl)
                .build(),
        }
    }

    /// Returns the value cached under the provided `key`, computing and
    /// caching it with the provided `init` future if there is none.
    ///
    /// Concurrent misses of the same `key` await a single `init`.
    ///
    /// # Errors
    ///
    /// Errors if the `init` future fails. Nothing is cached then.
    pub async fn get_or_try_insert<F>(
        &self,
        key: K,
        init: F,
    ) -> Result<V, Error>
    where
        F: Future<Output = Result<V, Error>>,
    {
        self.inner
            .try_get_with(key, init)
            .await
            .map_err(|e| (*e).clone())
    }
}

/// [`Cache`]s of all the cached API responses.
#[derive(Clone, Debug)]
pub struct Caches {
    /// Villa listings by the [`Locale`] and [`FilterParams`] they were
    /// requested with.
    pub listings: Cache<(Locale, FilterParams), Arc<api::villas::Listing>>,

    /// [`api::options::Tag`]s.
    pub tags: Cache<(), Arc<Vec<api::options::Tag>>>,

    /// [`api::options::Region`] tree.
    pub regions: Cache<(), Arc<Vec<api::options::Region>>>,
}

impl Caches {
    /// Creates new empty [`Caches`] according to the provided
    /// [`config::Cache`].
    #[must_use]
    pub fn new(config: config::Cache) -> Self {
        Self {
            listings: Cache::new(config),
            tags: Cache::new(config),
            regions: Cache::new(config),
        }
    }
}
