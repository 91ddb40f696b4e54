//! [`Query`] collection related to the multiple [`Tag`]s.

use std::collections::HashMap;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{tag, Tag},
    infra::{database, Database},
    read, Service,
};

use super::Query;

/// [`Query`] listing all the [`Tag`]s along with their usage, the most used
/// first.
///
/// Equally used [`Tag`]s are ordered by their names.
#[derive(Clone, Copy, Debug, Default)]
pub struct List;

impl<Db> Query<List> for Service<Db>
where
    Db: Database<
            Select<By<Vec<Tag>, ()>>,
            Ok = Vec<Tag>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashMap<tag::Id, read::tag::UsageCount>, ()>>,
            Ok = HashMap<tag::Id, read::tag::UsageCount>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Vec<read::tag::WithUsage>;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: List) -> Result<Self::Ok, Self::Err> {
        let tags = self
            .database()
            .execute(Select(By::<Vec<Tag>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        let usage = self
            .database()
            .execute(Select(
                By::<HashMap<tag::Id, read::tag::UsageCount>, _>::new(()),
            ))
            .await
            .map_err(tracerr::wrap!())?;

        let mut tags = tags
            .into_iter()
            .map(|tag| read::tag::WithUsage {
                usage: usage.get(&tag.id).copied().unwrap_or_default(),
                tag,
            })
            .collect::<Vec<_>>();
        tags.sort_by(|a, b| {
            b.usage
                .cmp(&a.usage)
                .then_with(|| {
                    AsRef::<str>::as_ref(&a.tag.name)
                        .cmp(AsRef::<str>::as_ref(&b.tag.name))
                })
        });
        Ok(tags)
    }
}
