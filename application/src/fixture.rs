//! Fixtures shared by tests.

use std::sync::Arc;

use axum::{body::Body, Router};
use common::{Date, DateTime, Percent};
use http::{header, Request, StatusCode};
use service::{
    domain::{
        calendar, region, tag,
        villa::{self, Image, SeasonalPrice},
        CalendarEvent, Region, Tag, Villa,
    },
    infra::{memory::Tables, Memory},
};
use tower::ServiceExt as _;

use crate::{cache::Caches, config, i18n::Dictionaries, Service};

/// Creates the whole application [`Router`] on top of a [`Memory`] database
/// filled with the provided [`Tables`].
pub(crate) fn app(tables: Tables) -> Router {
    app_on(Memory::new(tables))
}

/// Creates the whole application [`Router`] on top of the provided [`Memory`]
/// database.
pub(crate) fn app_on(db: Memory) -> Router {
    crate::app(
        Service::new(db),
        Arc::new(Dictionaries::load().unwrap()),
        Caches::new(config::Cache::default()),
    )
}

/// Sends a `GET` request to the provided `uri` and returns the response
/// status along with its JSON body ([`Null`] if there is none).
///
/// [`Null`]: serde_json::Value::Null
pub(crate) async fn get(
    app: &Router,
    uri: &str,
) -> (StatusCode, serde_json::Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

/// Sends a `POST` request with the provided JSON `body` to the provided `uri`
/// and returns the response status along with its JSON body.
pub(crate) async fn post(
    app: &Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let req = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

async fn send(
    app: &Router,
    req: Request<Body>,
) -> (StatusCode, serde_json::Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or_default())
}

/// Creates an [`ACTIVE`] [`Villa`] created `age` seconds after some moment.
///
/// [`ACTIVE`]: villa::Status::Active
pub(crate) fn villa(
    slug: &str,
    region: &str,
    max_guests: u16,
    age: i64,
) -> Villa {
    let created_at =
        DateTime::from_unix_timestamp(1_700_000_000 + age).unwrap();
    Villa {
        id: villa::Id::new(),
        slug: villa::Slug::new(slug).unwrap(),
        title: villa::Title::new(format!("Villa {slug}")).unwrap(),
        description: Some(format!("About {slug}").into()),
        bedrooms: max_guests.div_ceil(2),
        bathrooms: 2,
        max_guests,
        region_id: region_id(region),
        sub_region_id: None,
        deposit: Some("500EUR".parse().unwrap()),
        cleaning_fee: None,
        min_stay_nights: 3,
        check_in_time: villa::CheckTime::new("16:00").unwrap(),
        check_out_time: villa::CheckTime::new("10:00").unwrap(),
        advance_payment_rate: "30".parse::<Percent>().unwrap(),
        is_promoted: false,
        status: villa::Status::Active,
        created_at: created_at.coerce(),
        updated_at: created_at.coerce(),
    }
}

/// Creates a new [`region::Id`].
pub(crate) fn region_id(id: &str) -> region::Id {
    region::Id::new(id).unwrap()
}

/// Creates a new active [`Region`].
pub(crate) fn region(id: &str, name: &str, parent: Option<&str>) -> Region {
    Region {
        id: region_id(id),
        name: name.to_owned().into(),
        slug: id.to_owned(),
        is_main_region: parent.is_none(),
        parent_id: parent.map(region_id),
        is_active: true,
        villa_count: 0,
    }
}

/// Creates a new [`Tag`].
pub(crate) fn tag(id: &str, name: &str) -> Tag {
    Tag {
        id: tag::Id::new(id).unwrap(),
        name: name.to_owned().into(),
    }
}

/// Associates the provided [`Villa`] with the [`Tag`] of the provided ID.
pub(crate) fn villa_tag(villa: &Villa, tag_id: &str) -> tag::VillaTag {
    tag::VillaTag {
        villa_id: villa.id,
        tag_id: tag::Id::new(tag_id).unwrap(),
    }
}

/// Creates a new [`CalendarEvent`] of the provided [`Villa`] on the provided
/// `YYYY-MM-DD` day.
pub(crate) fn event(
    villa: &Villa,
    date: &str,
    status: calendar::Status,
) -> CalendarEvent {
    CalendarEvent {
        villa_id: villa.id,
        date: calendar::check_in_at(Date::parse(date).unwrap()),
        status,
    }
}

/// Creates a new [`Image`] of the provided [`Villa`].
pub(crate) fn image(villa: &Villa, order: u16, is_cover: bool) -> Image {
    Image {
        id: villa::image::Id::new(),
        villa_id: villa.id,
        url: format!("https://cdn.example.com/{}/{order}.jpg", villa.slug)
            .into(),
        title: None,
        alt_text: Some(villa.title.to_string()),
        order,
        is_cover,
    }
}

/// Creates a new summer [`SeasonalPrice`] of the provided [`Villa`] with the
/// provided `nightly` price (like `150EUR`).
pub(crate) fn price(
    villa: &Villa,
    nightly: &str,
    is_active: bool,
) -> SeasonalPrice {
    let day = |d| calendar::check_in_at(Date::parse(d).unwrap());
    SeasonalPrice {
        id: villa::price::Id::new(),
        villa_id: villa.id,
        name: Some("Summer".to_owned()),
        starts_at: day("2025-06-01").coerce(),
        ends_at: day("2025-09-30").coerce(),
        nightly_price: nightly.parse().unwrap(),
        weekly_price: None,
        is_active,
    }
}
