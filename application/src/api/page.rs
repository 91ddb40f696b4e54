//! Static localized pages.

use axum::{extract::Path, Json};
use common::Locale;
use serde::Serialize;

use crate::{
    api::{Alternate, Link, RouteError},
    i18n::Route,
    Context, Error,
};

/// Localized page without any dynamic content.
#[derive(Clone, Debug, Serialize)]
pub struct Page {
    /// [`Route`] of this [`Page`], if it's not the home one.
    pub route: Option<Route>,

    /// [`Locale`] of this [`Page`].
    pub locale: Locale,

    /// Localized title.
    pub title: String,

    /// Localized description.
    pub description: String,

    /// Navigation [`Link`]s.
    pub links: Vec<Link>,

    /// This [`Page`] in other [`Locale`]s.
    pub alternates: Vec<Alternate>,
}

impl Page {
    /// Renders the [`Page`] of the provided [`Route`], or the home one.
    fn render(ctx: &Context, route: Option<Route>) -> Self {
        let dict = ctx.dictionary();
        let description = dict
            .resolve("meta.description", "Private villas for your holiday")
            .to_owned();
        let title = match route {
            Some(r) => dict.resolve(&format!("pages.{}.title", r.key()), ""),
            None => dict.resolve("meta.title", "Villa Rentals"),
        }
        .to_owned();

        Self {
            route,
            locale: ctx.locale(),
            title,
            description,
            links: Link::navigation(ctx),
            alternates: Alternate::all(|l| {
                route.map_or_else(|| format!("/{l}"), |r| r.path(l))
            }),
        }
    }
}

/// Responds with the home [`Page`].
#[expect(clippy::unused_async, reason = "`async` is required by `axum`")]
pub async fn home(ctx: Context) -> Json<Page> {
    Json(Page::render(&ctx, None))
}

/// Responds with the contact [`Page`] served under its fixed path.
#[expect(clippy::unused_async, reason = "`async` is required by `axum`")]
pub async fn contact(ctx: Context) -> Json<Page> {
    Json(Page::render(&ctx, Some(Route::Contact)))
}

/// Responds with the [`Page`] of the [`Route`] having the provided localized
/// slug.
///
/// # Errors
///
/// - [`RouteError::NotFound`] - if no [`Route`] has the slug in the current
///   [`Locale`].
#[expect(clippy::unused_async, reason = "`async` is required by `axum`")]
pub async fn show(
    ctx: Context,
    Path((_, slug)): Path<(String, String)>,
) -> Result<Json<Page>, Error> {
    let route =
        Route::from_slug(&slug, ctx.locale()).ok_or(RouteError::NotFound)?;
    Ok(Json(Page::render(&ctx, Some(route))))
}
