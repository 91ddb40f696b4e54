//! [`Query`] collection related to a single [`Villa`].

use common::operations::By;
use tracerr::Traced;

use crate::{
    domain::{villa, Villa},
    infra::database,
    read, Service,
};

use super::{villas::Enrich, DatabaseQuery, Query};

/// Queries a [`Villa`] of any [`villa::Status`] by its [`villa::Slug`].
pub type FindBySlug = DatabaseQuery<By<Option<Villa>, villa::Slug>>;

/// [`Query`] of an [`ACTIVE`] [`Villa`]'s [`read::villa::Details`] by its
/// [`villa::Slug`].
///
/// [`ACTIVE`]: villa::Status::Active
#[derive(Clone, Debug)]
pub struct BySlug(pub villa::Slug);

impl<Db> Query<BySlug> for Service<Db>
where
    Self: Query<FindBySlug, Ok = Option<Villa>, Err = Traced<database::Error>>
        + Query<
            Enrich,
            Ok = Vec<read::villa::Details>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Option<read::villa::Details>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        BySlug(slug): BySlug,
    ) -> Result<Self::Ok, Self::Err> {
        let Some(villa) = self
            .execute(FindBySlug::by(slug))
            .await
            .map_err(tracerr::wrap!())?
            .filter(|v| v.status == villa::Status::Active)
        else {
            return Ok(None);
        };

        Ok(self
            .execute(Enrich(vec![villa]))
            .await
            .map_err(tracerr::wrap!())?
            .pop())
    }
}
