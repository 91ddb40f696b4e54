//! HTTP JSON API definitions.

pub mod contact;
pub mod options;
pub mod page;
pub mod villa;
pub mod villas;

use axum::{routing::get, Router};
use common::Locale;
use serde::Serialize;

use crate::{define_error, i18n::Route, Context, Error};

pub use self::villa::Villa;

/// Creates a [`Router`] serving the whole API.
///
/// The returned [`Router`] expects [`Context`] dependencies to be provided as
/// request extensions.
#[must_use]
pub fn router() -> Router {
    Router::new()
        .route("/api/tags", get(options::tags))
        .route("/api/regions", get(options::regions))
        .route("/:locale", get(page::home))
        .route("/:locale/villa-kiralama", get(villas::list))
        .route("/:locale/villa-kiralama/:slug", get(villa::show))
        .route(
            "/:locale/villa-kiralama-iletisim",
            get(page::contact).post(contact::submit),
        )
        .route("/:locale/:page", get(page::show))
        .fallback(not_found)
}

/// Responds to any unknown path.
#[expect(clippy::unused_async, reason = "`async` is required by `axum`")]
async fn not_found() -> Error {
    RouteError::NotFound.into()
}

/// Link to a localized [`Route`].
#[derive(Clone, Debug, Serialize)]
pub struct Link {
    /// [`Route`] this [`Link`] leads to.
    pub route: Route,

    /// Localized label of this [`Link`].
    pub label: String,

    /// Localized path of the [`Route`].
    pub href: String,
}

impl Link {
    /// Returns navigation [`Link`]s to all the [`Route`]s in the [`Context`]
    /// locale.
    #[must_use]
    pub fn navigation(ctx: &Context) -> Vec<Self> {
        Route::ALL
            .into_iter()
            .map(|route| Self {
                route,
                label: ctx
                    .dictionary()
                    .resolve(&format!("nav.{}", route.key()), route.key())
                    .to_owned(),
                href: route.path(ctx.locale()),
            })
            .collect()
    }
}

/// Path of the same page in another [`Locale`].
#[derive(Clone, Debug, Serialize)]
pub struct Alternate {
    /// [`Locale`] of the page.
    pub locale: Locale,

    /// Path of the page.
    pub href: String,
}

impl Alternate {
    /// Returns [`Alternate`]s for every [`Locale`] out of the path `href`
    /// function.
    #[must_use]
    pub fn all(href: impl Fn(Locale) -> String) -> Vec<Self> {
        Locale::ALL
            .into_iter()
            .map(|locale| Self {
                locale,
                href: href(locale),
            })
            .collect()
    }
}

define_error! {
    enum RouteError {
        #[code = "NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Requested page does not exist"]
        NotFound,
    }
}
