//! [`Villa`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::{
    money::Currency,
    operations::{By, Select},
    Money,
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use rust_decimal::Decimal;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        villa::{self, Image, SeasonalPrice},
        Villa,
    },
    infra::{
        database::{self, postgres::Connection as _, Postgres},
        Database,
    },
    read,
};

/// Columns of the `villas` table making up a [`Villa`].
const VILLA_COLUMNS: &str = "\
    id, slug, title, description, \
    bedrooms, bathrooms, max_guests, \
    region_id, sub_region_id, \
    deposit_amount, deposit_currency, \
    cleaning_fee_amount, cleaning_fee_currency, \
    min_stay_nights, check_in_time, check_out_time, \
    advance_payment_rate, is_promoted, status, \
    created_at, updated_at";

/// Builds a [`Villa`] out of the provided [`Row`] with [`VILLA_COLUMNS`].
fn villa_from_row(row: &Row) -> Villa {
    let money = |amount: &str, currency: &str| {
        Option::zip(
            row.get::<_, Option<Decimal>>(amount),
            row.get::<_, Option<Currency>>(currency),
        )
        .map(|(amount, currency)| Money { amount, currency })
    };
    let small = |column: &str| small_int(row.get(column));

    Villa {
        id: row.get("id"),
        slug: row.get("slug"),
        title: row.get("title"),
        description: row.get("description"),
        bedrooms: small("bedrooms"),
        bathrooms: small("bathrooms"),
        max_guests: small("max_guests"),
        region_id: row.get("region_id"),
        sub_region_id: row.get("sub_region_id"),
        deposit: money("deposit_amount", "deposit_currency"),
        cleaning_fee: money("cleaning_fee_amount", "cleaning_fee_currency"),
        min_stay_nights: small("min_stay_nights"),
        check_in_time: row.get("check_in_time"),
        check_out_time: row.get("check_out_time"),
        advance_payment_rate: row.get("advance_payment_rate"),
        is_promoted: row.get("is_promoted"),
        status: row.get("status"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Narrows the provided `INT4` column value to a [`u16`], saturating at its
/// bounds.
fn small_int(value: i32) -> u16 {
    u16::try_from(value.max(0)).unwrap_or(u16::MAX)
}

/// Renders the provided [`read::villa::list::Filter`] as SQL conditions,
/// pushing its parameters into the provided `ps`.
fn filter_conditions<'a>(
    filter: &'a read::villa::list::Filter,
    min_guests: Option<&'a i32>,
    ps: &mut Vec<&'a (dyn ToSql + Sync)>,
) -> String {
    let read::villa::list::Filter {
        status,
        region_id,
        sub_region_id,
        min_guests: _,
        ids,
    } = filter;

    ps.push(status);
    let status_idx = ps.len();
    let region_idx = region_id.as_ref().map(|id| {
        ps.push(id);
        ps.len()
    });
    let sub_region_idx = sub_region_id.as_ref().map(|id| {
        ps.push(id);
        ps.len()
    });
    let guests_idx = min_guests.map(|g| {
        ps.push(g);
        ps.len()
    });
    let ids_idx = ids.as_ref().map(|ids| {
        ps.push(ids);
        ps.len()
    });

    format!(
        "status = ${status_idx}::VARCHAR \
         {region} \
         {sub_region} \
         {guests} \
         {ids}",
        region = region_idx.into_iter().format_with("", |idx, f| {
            f(&format_args!("AND region_id = ${idx}::VARCHAR"))
        }),
        sub_region = sub_region_idx.into_iter().format_with("", |idx, f| {
            f(&format_args!("AND sub_region_id = ${idx}::VARCHAR"))
        }),
        guests = guests_idx.into_iter().format_with("", |idx, f| {
            f(&format_args!("AND max_guests >= ${idx}::INT4"))
        }),
        ids = ids_idx.into_iter().format_with("", |idx, f| {
            f(&format_args!("AND id = ANY(${idx}::UUID[])"))
        }),
    )
}

impl Database<Select<By<Vec<villa::Id>, read::villa::list::Filter>>>
    for Postgres
{
    type Ok = Vec<villa::Id>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<villa::Id>, read::villa::list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        if filter.ids.as_ref().is_some_and(Vec::is_empty) {
            return Ok(vec![]);
        }

        let min_guests = filter.min_guests.map(i32::from);
        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];
        let conditions =
            filter_conditions(&filter, min_guests.as_ref(), &mut ps);

        let sql = format!(
            "SELECT id \
             FROM villas \
             WHERE {conditions}",
        );
        Ok(self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| row.get("id"))
            .collect())
    }
}

impl Database<Select<By<read::villa::list::Page, read::villa::list::Selector>>>
    for Postgres
{
    type Ok = read::villa::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::villa::list::Page, read::villa::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::villa::list::Selector { arguments, filter } =
            by.into_inner();
        if filter.ids.as_ref().is_some_and(Vec::is_empty) {
            return Ok(read::villa::list::Page::empty(arguments));
        }

        let limit = i64::from(arguments.limit().get());
        let offset = i64::try_from(arguments.offset()).unwrap_or(i64::MAX);
        let min_guests = filter.min_guests.map(i32::from);

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit, &offset];
        let conditions =
            filter_conditions(&filter, min_guests.as_ref(), &mut ps);

        let sql = format!(
            "SELECT {VILLA_COLUMNS} \
             FROM villas \
             WHERE {conditions} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1::INT8 \
             OFFSET $2::INT8",
        );
        let rows = self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?;

        Ok(read::villa::list::Page::new(
            arguments,
            rows.iter().map(villa_from_row),
        ))
    }
}

impl
    Database<
        Select<By<read::villa::list::TotalCount, read::villa::list::Filter>>,
    > for Postgres
{
    type Ok = read::villa::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::villa::list::TotalCount, read::villa::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        if filter.ids.as_ref().is_some_and(Vec::is_empty) {
            return Ok(read::villa::list::TotalCount::default());
        }

        let min_guests = filter.min_guests.map(i32::from);
        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];
        let conditions =
            filter_conditions(&filter, min_guests.as_ref(), &mut ps);

        let sql = format!(
            "SELECT COUNT(*)::INT8 \
             FROM villas \
             WHERE {conditions}",
        );
        let row = self
            .query_opt(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?;
        Ok(row
            .map(|r| u64::try_from(r.get::<_, i64>(0)).unwrap_or_default())
            .unwrap_or_default()
            .into())
    }
}

impl Database<Select<By<Option<Villa>, villa::Slug>>> for Postgres {
    type Ok = Option<Villa>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Villa>, villa::Slug>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let slug: villa::Slug = by.into_inner();

        let sql = format!(
            "SELECT {VILLA_COLUMNS} \
             FROM villas \
             WHERE slug = $1::VARCHAR \
             LIMIT 1",
        );
        Ok(self
            .query_opt(&sql, &[&slug])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(villa_from_row))
    }
}

impl Database<Select<By<HashMap<villa::Id, Vec<Image>>, Vec<villa::Id>>>>
    for Postgres
{
    type Ok = HashMap<villa::Id, Vec<Image>>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<villa::Id, Vec<Image>>, Vec<villa::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        const SQL: &str = "\
            SELECT id, villa_id, url, title, alt_text, sort_order, is_cover \
            FROM villa_images \
            WHERE villa_id = ANY($1::UUID[]) \
            ORDER BY sort_order, id";
        Ok(self
            .query(SQL, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Image {
                id: row.get("id"),
                villa_id: row.get("villa_id"),
                url: row.get("url"),
                title: row.get("title"),
                alt_text: row.get("alt_text"),
                order: small_int(row.get("sort_order")),
                is_cover: row.get("is_cover"),
            })
            .into_group_map_by(|i| i.villa_id))
    }
}

impl
    Database<
        Select<By<HashMap<villa::Id, Vec<SeasonalPrice>>, Vec<villa::Id>>>,
    > for Postgres
{
    type Ok = HashMap<villa::Id, Vec<SeasonalPrice>>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<HashMap<villa::Id, Vec<SeasonalPrice>>, Vec<villa::Id>>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        const SQL: &str = "\
            SELECT id, villa_id, name, starts_at, ends_at, \
                   nightly_amount, weekly_amount, currency, \
                   is_active \
            FROM seasonal_prices \
            WHERE villa_id = ANY($1::UUID[]) \
            ORDER BY starts_at, id";
        Ok(self
            .query(SQL, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                let currency = row.get("currency");
                SeasonalPrice {
                    id: row.get("id"),
                    villa_id: row.get("villa_id"),
                    name: row.get("name"),
                    starts_at: row.get("starts_at"),
                    ends_at: row.get("ends_at"),
                    nightly_price: Money {
                        amount: row.get("nightly_amount"),
                        currency,
                    },
                    weekly_price: row
                        .get::<_, Option<Decimal>>("weekly_amount")
                        .map(|amount| Money { amount, currency }),
                    is_active: row.get("is_active"),
                }
            })
            .into_group_map_by(|p| p.villa_id))
    }
}

#[cfg(test)]
mod spec {
    use super::small_int;

    #[test]
    fn narrows_small_ints_saturating() {
        assert_eq!(small_int(0), 0);
        assert_eq!(small_int(12), 12);
        assert_eq!(small_int(65_535), u16::MAX);
        assert_eq!(small_int(-3), 0);
        assert_eq!(small_int(i32::MIN), 0);
        assert_eq!(small_int(70_000), u16::MAX);
    }
}
