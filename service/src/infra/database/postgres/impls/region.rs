//! [`Region`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::Region,
    infra::{
        database::{self, postgres::Connection as _, Postgres},
        Database,
    },
};

impl Database<Select<By<Vec<Region>, ()>>> for Postgres {
    type Ok = Vec<Region>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Region>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, slug, is_main_region, parent_id, is_active, \
                   villa_count \
            FROM regions";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Region {
                id: row.get("id"),
                name: row.get("name"),
                slug: row.get("slug"),
                is_main_region: row.get("is_main_region"),
                parent_id: row.get("parent_id"),
                is_active: row.get("is_active"),
                villa_count: u32::try_from(row.get::<_, i32>("villa_count"))
                    .unwrap_or_default(),
            })
            .collect())
    }
}
