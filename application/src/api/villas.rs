//! Villa listing definitions.

use std::{num::NonZeroU16, sync::Arc};

use axum::{extract::RawQuery, Json};
use common::{pagination, Date};
use serde::Serialize;
use service::{
    domain::{region, tag},
    query::villas,
    Query as _,
};

use crate::{
    api::{Alternate, Link, Villa},
    filter::{ActiveFilter, FilterParams},
    AsError, Context, Error,
};

/// Villa listing page.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Localized title of the page.
    pub title: String,

    /// [`FilterParams`] the listing is filtered with.
    pub filters: Filters,

    /// Canonical URL query of the [`Listing::filters`].
    pub query: String,

    /// Currently applied filters along with the queries removing them.
    pub active_filters: Vec<Chip>,

    /// URL query with every filter cleared.
    pub clear_query: String,

    /// [`Villa`]s on the current page.
    pub items: Vec<Villa>,

    /// Localized message shown when there are no [`Listing::items`].
    pub empty_message: Option<String>,

    /// Pagination metadata.
    pub pagination: pagination::Info,

    /// Navigation [`Link`]s.
    pub links: Vec<Link>,

    /// This page in other locales.
    pub alternates: Vec<Alternate>,
}

impl Listing {
    /// Assembles a new [`Listing`] out of the provided [`FilterParams`] and
    /// the [`villas::Output`] they have selected.
    #[must_use]
    pub fn new(
        ctx: &Context,
        params: &FilterParams,
        output: villas::Output,
    ) -> Self {
        let dict = ctx.dictionary();
        let query = params.encode();
        let pagination::Paginated { items, info } = output;

        Self {
            title: dict.resolve("pages.villas.title", "Villas").to_owned(),
            filters: params.into(),
            active_filters: params
                .active(dict)
                .into_iter()
                .map(|filter| Chip {
                    remove_query: params.clone().remove(filter.key).encode(),
                    filter,
                })
                .collect(),
            clear_query: FilterParams::clear().encode(),
            empty_message: items.is_empty().then(|| {
                dict.resolve("villas.empty", "No villas found").to_owned()
            }),
            items: items
                .into_iter()
                .map(|d| Villa::new(d, ctx.locale()))
                .collect(),
            pagination: info,
            links: Link::navigation(ctx),
            alternates: Alternate::all(|l| {
                format!("{}?{query}", l.localize_path("/villa-kiralama"))
            }),
            query,
        }
    }
}

/// Echo of the decoded [`FilterParams`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    /// Day of a check-in.
    pub check_in: Option<Date>,

    /// Day of a check-out.
    pub check_out: Option<Date>,

    /// Number of guests.
    pub guests: Option<u16>,

    /// ID of the main region.
    pub region_id: Option<region::Id>,

    /// ID of the sub-region.
    pub sub_region_id: Option<region::Id>,

    /// IDs of the required tags.
    pub tag_ids: Vec<tag::Id>,

    /// Requested page number.
    pub page: u32,

    /// Requested page size.
    pub limit: u32,
}

impl From<&FilterParams> for Filters {
    fn from(params: &FilterParams) -> Self {
        Self {
            check_in: params.check_in,
            check_out: params.check_out,
            guests: params.guests.map(NonZeroU16::get),
            region_id: params.region_id.clone(),
            sub_region_id: params.sub_region_id.clone(),
            tag_ids: params.tag_ids.clone(),
            page: params.page.get(),
            limit: params.limit.get(),
        }
    }
}

/// Removable chip of an [`ActiveFilter`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chip {
    /// [`ActiveFilter`] itself.
    #[serde(flatten)]
    pub filter: ActiveFilter,

    /// URL query of the listing without this filter.
    pub remove_query: String,
}

/// Responds with the [`Listing`] of villas matching the [`FilterParams`]
/// decoded from the URL query.
///
/// Malformed parameters are dropped rather than rejected.
#[tracing::instrument(skip_all, fields(locale = %ctx.locale()))]
pub async fn list(
    ctx: Context,
    RawQuery(query): RawQuery,
) -> Result<Json<Arc<Listing>>, Error> {
    let params = FilterParams::decode(query.as_deref().unwrap_or_default());
    let key = (ctx.locale(), params.clone());

    ctx.caches()
        .listings
        .get_or_try_insert(key, async {
            let output = ctx
                .service()
                .execute(villas::List::from(params.clone()))
                .await
                .map_err(AsError::into_error)?;
            Ok(Arc::new(Listing::new(&ctx, &params, output)))
        })
        .await
        .map(Json)
}

#[cfg(test)]
mod spec {
    use http::StatusCode;
    use service::{domain::calendar, infra::memory::Tables};

    use crate::fixture::{self, get};

    /// Three villas in two regions with tags and a calendar.
    fn tables() -> Tables {
        let mut villas = vec![
            fixture::villa("alpha", "bodrum", 4, 0),
            fixture::villa("beta", "bodrum", 8, 1),
            fixture::villa("gamma", "fethiye", 6, 2),
        ];
        villas[0].sub_region_id = Some(fixture::region_id("yalikavak"));
        let tables = Tables {
            regions: vec![
                fixture::region("bodrum", "Bodrum", None),
                fixture::region("yalikavak", "Yalıkavak", Some("bodrum")),
                fixture::region("fethiye", "Fethiye", None),
            ],
            tags: vec![
                fixture::tag("pool", "Pool"),
                fixture::tag("sea", "Sea view"),
            ],
            villa_tags: vec![
                fixture::villa_tag(&villas[0], "pool"),
                fixture::villa_tag(&villas[0], "sea"),
                fixture::villa_tag(&villas[1], "pool"),
                fixture::villa_tag(&villas[2], "sea"),
            ],
            events: vec![fixture::event(
                &villas[1],
                "2025-07-02",
                calendar::Status::Reserved,
            )],
            prices: vec![fixture::price(&villas[2], "120EUR", true)],
            ..Tables::default()
        };
        Tables { villas, ..tables }
    }

    fn slugs(body: &serde_json::Value) -> Vec<&str> {
        body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["slug"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let app = fixture::app(tables());

        let (status, body) = get(&app, "/en/villa-kiralama").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(slugs(&body), ["gamma", "beta", "alpha"]);
        assert_eq!(body["pagination"]["total"], 3);
        assert_eq!(body["pagination"]["totalPages"], 1);
        assert_eq!(body["query"], "page=1&limit=6");
        assert_eq!(body["activeFilters"], serde_json::json!([]));
        assert_eq!(body["emptyMessage"], serde_json::Value::Null);
        assert_eq!(body["items"][0]["minNightlyPrice"]["amount"], "120");
    }

    #[tokio::test]
    async fn intersects_all_the_filters() {
        let app = fixture::app(tables());

        let (_, body) = get(&app, "/en/villa-kiralama?tagIds=pool").await;
        assert_eq!(slugs(&body), ["beta", "alpha"]);
        assert_eq!(body["pagination"]["total"], 2);

        let (_, body) =
            get(&app, "/en/villa-kiralama?tagIds=pool,sea&guests=2").await;
        assert_eq!(slugs(&body), ["alpha"]);

        let (_, body) = get(
            &app,
            "/en/villa-kiralama?checkIn=2025-07-01&checkOut=2025-07-04",
        )
        .await;
        assert_eq!(slugs(&body), ["gamma", "alpha"]);

        let (_, body) =
            get(&app, "/en/villa-kiralama?regionId=bodrum&guests=6").await;
        assert_eq!(slugs(&body), ["beta"]);

        let (_, body) =
            get(&app, "/en/villa-kiralama?subRegionId=yalikavak").await;
        assert_eq!(slugs(&body), ["alpha"]);
    }

    #[tokio::test]
    async fn paginates() {
        let app = fixture::app(tables());

        let (_, body) = get(&app, "/en/villa-kiralama?page=2&limit=2").await;

        assert_eq!(slugs(&body), ["alpha"]);
        assert_eq!(
            body["pagination"],
            serde_json::json!({
                "total": 3,
                "page": 2,
                "limit": 2,
                "totalPages": 2,
            }),
        );
    }

    #[tokio::test]
    async fn caps_page_size() {
        let app = fixture::app(tables());

        let (_, body) = get(&app, "/en/villa-kiralama?limit=500").await;

        assert_eq!(slugs(&body).len(), 3);
        assert_eq!(body["query"], "page=1&limit=500");
        assert_eq!(body["pagination"]["limit"], 100);
        assert_eq!(body["pagination"]["totalPages"], 1);
    }

    #[tokio::test]
    async fn describes_active_filters() {
        let app = fixture::app(tables());

        let (_, body) = get(
            &app,
            "/tr/villa-kiralama?guests=4&regionId=bodrum&tagIds=sea&page=3",
        )
        .await;

        assert_eq!(
            body["filters"]["tagIds"],
            serde_json::json!(["sea"]),
        );
        assert_eq!(
            body["query"],
            "guests=4&regionId=bodrum&tagIds=sea&page=3&limit=6",
        );
        let chips = body["activeFilters"].as_array().unwrap();
        assert_eq!(chips.len(), 3);
        assert_eq!(chips[0]["key"], "guests");
        assert_eq!(chips[0]["label"], "Misafir");
        assert_eq!(
            chips[0]["removeQuery"],
            "regionId=bodrum&tagIds=sea&page=1&limit=6",
        );
        assert_eq!(chips[1]["key"], "regionId");
        assert_eq!(chips[1]["value"], "bodrum");
        assert_eq!(body["clearQuery"], "page=1&limit=6");
        assert_eq!(
            body["alternates"][2]["href"],
            "/de/villa-kiralama?guests=4&regionId=bodrum&tagIds=sea&page=3\
             &limit=6",
        );
    }

    #[tokio::test]
    async fn drops_malformed_params() {
        let app = fixture::app(tables());

        let (status, body) = get(
            &app,
            "/en/villa-kiralama?guests=abc&checkIn=tomorrow&page=-1&limit=0",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["query"], "page=1&limit=6");
        assert_eq!(slugs(&body).len(), 3);
    }

    #[tokio::test]
    async fn localizes_empty_listing() {
        let app = fixture::app(tables());

        let (status, body) =
            get(&app, "/en/villa-kiralama?tagIds=sauna").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"], serde_json::json!([]));
        assert_eq!(body["pagination"]["total"], 0);
        assert!(body["emptyMessage"].is_string());
    }

    #[tokio::test]
    async fn fails_when_store_is_unavailable() {
        let db = service::infra::Memory::new(tables());
        db.set_unavailable(true);
        let app = fixture::app_on(db.clone());

        let (status, body) = get(&app, "/en/villa-kiralama").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "INTERNAL_SERVER_ERROR");

        db.set_unavailable(false);
        let (status, _) = get(&app, "/en/villa-kiralama").await;
        assert_eq!(status, StatusCode::OK);
    }
}
