//! [`Tag`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Select};
use itertools::Itertools as _;
use tracerr::Traced;

use crate::{
    domain::{tag, villa, Tag},
    infra::{
        database::{self, postgres::Connection as _, Postgres},
        Database,
    },
    read,
};

impl Database<Select<By<Vec<tag::VillaTag>, Vec<tag::Id>>>> for Postgres {
    type Ok = Vec<tag::VillaTag>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<tag::VillaTag>, Vec<tag::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        if ids.is_empty() {
            return Ok(vec![]);
        }

        const SQL: &str = "\
            SELECT villa_id, tag_id \
            FROM villa_tags \
            WHERE tag_id = ANY($1::VARCHAR[])";
        Ok(self
            .query(SQL, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| tag::VillaTag {
                villa_id: row.get("villa_id"),
                tag_id: row.get("tag_id"),
            })
            .collect())
    }
}

impl Database<Select<By<HashMap<villa::Id, Vec<Tag>>, Vec<villa::Id>>>>
    for Postgres
{
    type Ok = HashMap<villa::Id, Vec<Tag>>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<villa::Id, Vec<Tag>>, Vec<villa::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        const SQL: &str = "\
            SELECT vt.villa_id, t.id, t.name \
            FROM villa_tags AS vt \
            INNER JOIN tags AS t \
                    ON t.id = vt.tag_id \
            WHERE vt.villa_id = ANY($1::UUID[]) \
            ORDER BY t.name, t.id";
        Ok(self
            .query(SQL, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                (
                    row.get::<_, villa::Id>("villa_id"),
                    Tag {
                        id: row.get("id"),
                        name: row.get("name"),
                    },
                )
            })
            .into_group_map())
    }
}

impl Database<Select<By<Vec<Tag>, ()>>> for Postgres {
    type Ok = Vec<Tag>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Tag>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name \
            FROM tags";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Tag {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }
}

impl Database<Select<By<HashMap<tag::Id, read::tag::UsageCount>, ()>>>
    for Postgres
{
    type Ok = HashMap<tag::Id, read::tag::UsageCount>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<HashMap<tag::Id, read::tag::UsageCount>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT tag_id, COUNT(*)::INT8 AS usage \
            FROM villa_tags \
            GROUP BY tag_id";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                let usage = u64::try_from(row.get::<_, i64>("usage"))
                    .unwrap_or_default();
                (row.get("tag_id"), usage.into())
            })
            .collect())
    }
}
