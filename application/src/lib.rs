//! Application provides HTTP JSON API of the villa rental listing on top of
//! the [`Service`].

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod api;
pub mod args;
pub mod cache;
pub mod config;
mod context;
pub mod error;
pub mod filter;
pub mod gate;
pub mod i18n;

#[cfg(test)]
mod fixture;

use std::sync::Arc;

use axum::{middleware, Extension, Router};
// Used in binary.
use axum_client_ip as _;
use futures as _;
use refinery as _;
use tokio as _;
use tower_http as _;
use tracing_subscriber as _;

use self::{cache::Caches, i18n::Dictionaries};

pub use self::{
    args::Args,
    config::Config,
    context::Context,
    error::{AsError, Error},
};

/// [`Database`] the [`Service`] is running on.
///
/// [`Database`]: service::infra::Database
#[cfg(not(test))]
pub type Database = service::infra::Postgres;

/// [`Database`] the [`Service`] is running on.
///
/// [`Database`]: service::infra::Database
#[cfg(test)]
pub type Database = service::infra::Memory;

/// [`Service`] with filled infrastructure dependencies.
///
/// [`Service`]: service::Service
pub type Service = service::Service<Database>;

/// Creates the whole application [`Router`] on top of the provided
/// [`Service`], with the locale gate and the [`Context`] dependencies
/// applied.
#[must_use]
pub fn app(
    service: Service,
    dictionaries: Arc<Dictionaries>,
    caches: Caches,
) -> Router {
    api::router()
        .layer(middleware::from_fn(gate::redirect))
        .layer(Extension(service))
        .layer(Extension(dictionaries))
        .layer(Extension(caches))
}
