//! Locale gate redirecting paths lacking a [`Locale`] prefix.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse as _, Redirect, Response},
};
use common::Locale;
use http::{header, HeaderMap};
use tracing as log;

/// Path prefixes passed through the gate as is.
const EXEMPT_PREFIXES: [&str; 3] = ["/api", "/static", "/_next"];

/// Extensions of static assets passed through the gate as is.
const ASSET_EXTENSIONS: [&str; 8] =
    ["jpg", "jpeg", "png", "gif", "svg", "ico", "css", "js"];

/// Checks whether the provided `path` bypasses the gate.
#[must_use]
pub fn is_exempt(path: &str) -> bool {
    EXEMPT_PREFIXES.iter().any(|p| path.starts_with(p))
        || path
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ASSET_EXTENSIONS.contains(&ext))
}

/// Negotiates the [`Locale`] out of the `Accept-Language` header, if any.
#[must_use]
pub fn negotiate(headers: &HeaderMap) -> Locale {
    headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|h| h.to_str().ok())
        .map_or(Locale::DEFAULT, Locale::negotiate)
}

/// Middleware redirecting (`307`) requests whose path lacks a [`Locale`]
/// prefix to the same path prefixed with the negotiated [`Locale`], keeping
/// the query.
pub async fn redirect(req: Request, next: Next) -> Response {
    let path = req.uri().path();
    if is_exempt(path) || Locale::from_path(path).is_some() {
        return next.run(req).await;
    }

    let locale = negotiate(req.headers());
    let mut target = locale.localize_path(path);
    if let Some(query) = req.uri().query() {
        target.push('?');
        target.push_str(query);
    }
    log::debug!("redirecting `{}` to `{target}`", req.uri());

    Redirect::temporary(&target).into_response()
}
