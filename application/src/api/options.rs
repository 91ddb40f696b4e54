//! Filter options definitions.

use std::sync::Arc;

use axum::Json;
use serde::Serialize;
use service::{
    domain::{self, region, tag},
    query, read, Query as _,
};

use crate::{AsError, Context, Error};

/// Tag option of the listing filters.
#[derive(Clone, Debug, Serialize)]
pub struct Tag {
    /// ID of this [`Tag`].
    pub id: tag::Id,

    /// Name of this [`Tag`].
    pub name: String,

    /// Number of villas having this [`Tag`].
    pub count: u64,
}

impl From<read::tag::WithUsage> for Tag {
    fn from(tag: read::tag::WithUsage) -> Self {
        Self {
            id: tag.tag.id,
            name: tag.tag.name.into(),
            count: tag.usage.into(),
        }
    }
}

/// Region option of the listing filters.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// ID of this [`Region`].
    pub id: region::Id,

    /// Name of this [`Region`].
    pub name: String,

    /// URL slug of this [`Region`].
    pub slug: String,

    /// Number of villas located in this [`Region`].
    pub count: u32,

    /// Sub-regions of this [`Region`], empty for the sub-regions themselves.
    pub sub_regions: Vec<Region>,
}

impl From<domain::Region> for Region {
    fn from(region: domain::Region) -> Self {
        Self {
            id: region.id,
            name: region.name.into(),
            slug: region.slug,
            count: region.villa_count,
            sub_regions: Vec::new(),
        }
    }
}

impl From<read::region::Branch> for Region {
    fn from(branch: read::region::Branch) -> Self {
        Self {
            sub_regions: branch
                .sub_regions
                .into_iter()
                .map(Self::from)
                .collect(),
            ..branch.region.into()
        }
    }
}

/// Responds with all the [`Tag`]s, the most used first.
#[tracing::instrument(skip_all)]
pub async fn tags(ctx: Context) -> Result<Json<Arc<Vec<Tag>>>, Error> {
    ctx.caches()
        .tags
        .get_or_try_insert((), async {
            let tags = ctx
                .service()
                .execute(query::tags::List)
                .await
                .map_err(AsError::into_error)?;
            Ok(Arc::new(tags.into_iter().map(Tag::from).collect()))
        })
        .await
        .map(Json)
}

/// Responds with the tree of active [`Region`]s ordered by name.
#[tracing::instrument(skip_all)]
pub async fn regions(ctx: Context) -> Result<Json<Arc<Vec<Region>>>, Error> {
    ctx.caches()
        .regions
        .get_or_try_insert((), async {
            let tree = ctx
                .service()
                .execute(query::regions::Tree)
                .await
                .map_err(AsError::into_error)?;
            Ok(Arc::new(tree.into_iter().map(Region::from).collect()))
        })
        .await
        .map(Json)
}

#[cfg(test)]
mod spec {
    use http::StatusCode;
    use serde_json::json;
    use service::infra::memory::Tables;

    use crate::fixture::{self, get};

    #[tokio::test]
    async fn lists_tags_with_usage() {
        let villas = [
            fixture::villa("alpha", "bodrum", 4, 0),
            fixture::villa("beta", "bodrum", 4, 1),
        ];
        let app = fixture::app(Tables {
            tags: vec![
                fixture::tag("sea", "Sea view"),
                fixture::tag("pool", "Pool"),
                fixture::tag("sauna", "Sauna"),
            ],
            villa_tags: vec![
                fixture::villa_tag(&villas[0], "pool"),
                fixture::villa_tag(&villas[1], "pool"),
                fixture::villa_tag(&villas[1], "sea"),
            ],
            villas: villas.into(),
            ..Tables::default()
        });

        let (status, body) = get(&app, "/api/tags").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                {"id": "pool", "name": "Pool", "count": 2},
                {"id": "sea", "name": "Sea view", "count": 1},
                {"id": "sauna", "name": "Sauna", "count": 0},
            ]),
        );
    }

    #[tokio::test]
    async fn lists_region_tree() {
        let mut kalkan = fixture::region("kalkan", "Kalkan", Some("kas"));
        kalkan.villa_count = 3;
        let mut hidden = fixture::region("meis", "Meis", None);
        hidden.is_active = false;
        let app = fixture::app(Tables {
            regions: vec![
                fixture::region("kas", "Kaş", None),
                kalkan,
                fixture::region("bodrum", "Bodrum", None),
                fixture::region("gumusluk", "Gümüşlük", Some("bodrum")),
                hidden,
            ],
            ..Tables::default()
        });

        let (status, body) = get(&app, "/api/regions").await;

        assert_eq!(status, StatusCode::OK);
        let tree = body.as_array().unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0]["id"], "bodrum");
        assert_eq!(tree[0]["subRegions"][0]["name"], "Gümüşlük");
        assert_eq!(tree[1]["id"], "kas");
        assert_eq!(tree[1]["subRegions"][0]["count"], 3);
        assert_eq!(tree[1]["subRegions"][0]["subRegions"], json!([]));
    }

    #[tokio::test]
    async fn caches_options() {
        let db = service::infra::Memory::new(Tables {
            tags: vec![fixture::tag("pool", "Pool")],
            ..Tables::default()
        });
        let app = fixture::app_on(db.clone());

        let (_, first) = get(&app, "/api/tags").await;
        db.set_unavailable(true);
        let (status, cached) = get(&app, "/api/tags").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(first, cached);
    }
}
