//! [`Query`] collection related to the multiple [`Region`]s.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::Region,
    infra::{database, Database},
    read, Service,
};

use super::Query;

/// [`Query`] of the [`read::region::Tree`] of active [`Region`]s.
///
/// Main [`Region`]s and sub-regions of each of them are ordered by name.
#[derive(Clone, Copy, Debug, Default)]
pub struct Tree;

impl<Db> Query<Tree> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Region>, ()>>,
        Ok = Vec<Region>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = read::region::Tree;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Tree) -> Result<Self::Ok, Self::Err> {
        let mut regions = self
            .database()
            .execute(Select(By::<Vec<Region>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        regions.retain(|r| r.is_active);
        regions.sort_by(|a, b| {
            AsRef::<str>::as_ref(&a.name).cmp(AsRef::<str>::as_ref(&b.name))
        });

        let (main, subs): (Vec<_>, Vec<_>) =
            regions.into_iter().partition(|r| r.is_main_region);
        Ok(main
            .into_iter()
            .map(|region| read::region::Branch {
                sub_regions: subs
                    .iter()
                    .filter(|s| s.parent_id.as_ref() == Some(&region.id))
                    .cloned()
                    .collect(),
                region,
            })
            .collect())
    }
}

#[cfg(test)]
mod spec {
    use crate::{fixture, infra::memory::Tables, Query as _};

    use super::Tree;

    #[tokio::test]
    async fn builds_active_hierarchy() {
        let mut closed = fixture::region("gocek", "Göcek", Some("fethiye"));
        closed.is_active = false;
        let service = fixture::service(Tables {
            regions: vec![
                fixture::region("kas", "Kaş", None),
                fixture::region("kalkan", "Kalkan", Some("kas")),
                fixture::region("fethiye", "Fethiye", None),
                fixture::region("oludeniz", "Ölüdeniz", Some("fethiye")),
                fixture::region("ovacik", "Ovacık", Some("fethiye")),
                closed,
            ],
            ..Tables::default()
        });

        let tree = service.execute(Tree).await.unwrap();

        let shape = tree
            .iter()
            .map(|b| {
                (
                    b.region.id.to_string(),
                    b.sub_regions
                        .iter()
                        .map(|s| s.id.to_string())
                        .collect::<Vec<_>>(),
                )
            })
            .collect::<Vec<_>>();
        assert_eq!(
            shape,
            [
                (
                    "fethiye".to_owned(),
                    vec!["ovacik".to_owned(), "oludeniz".to_owned()],
                ),
                ("kas".to_owned(), vec!["kalkan".to_owned()]),
            ],
        );
    }
}
