//! [`CalendarEvent`]-related [`Database`] implementations.

use std::ops::Range;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{calendar, CalendarEvent},
    infra::{
        database::{self, postgres::Connection as _, Postgres},
        Database,
    },
};

impl Database<Select<By<Vec<CalendarEvent>, Range<calendar::EventDateTime>>>>
    for Postgres
{
    type Ok = Vec<CalendarEvent>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<CalendarEvent>, Range<calendar::EventDateTime>>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let Range { start, end } = by.into_inner();

        const SQL: &str = "\
            SELECT villa_id, date, status \
            FROM calendar_events \
            WHERE date >= $1::TIMESTAMPTZ \
              AND date < $2::TIMESTAMPTZ";
        Ok(self
            .query(SQL, &[&start, &end])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| CalendarEvent {
                villa_id: row.get("villa_id"),
                date: row.get("date"),
                status: row.get("status"),
            })
            .collect())
    }
}
