//! [`Query`] collection related to the multiple [`Villa`]s.

use std::{
    collections::{HashMap, HashSet},
    iter,
    ops::Range,
};

use common::{
    operations::{By, Select},
    pagination::{self, Page},
    Date,
};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        calendar, region, tag,
        villa::{self, Image, SeasonalPrice},
        CalendarEvent, Tag, Villa,
    },
    infra::{database, Database},
    read, Service,
};

use super::Query;

/// [`Query`] listing [`ACTIVE`] [`Villa`]s matching the provided filters.
///
/// [`ACTIVE`]: villa::Status::Active
#[derive(Clone, Debug)]
pub struct List {
    /// Day of a check-in.
    ///
    /// Availability is checked only if both [`List::check_in`] and
    /// [`List::check_out`] are provided.
    pub check_in: Option<Date>,

    /// Day of a check-out.
    pub check_out: Option<Date>,

    /// Number of guests the [`Villa`]s must accommodate.
    pub guests: Option<u16>,

    /// ID of the main region the [`Villa`]s must be located in.
    pub region_id: Option<region::Id>,

    /// ID of the sub-region the [`Villa`]s must be located in.
    pub sub_region_id: Option<region::Id>,

    /// IDs of the [`Tag`]s the [`Villa`]s must have all at once.
    pub tag_ids: Vec<tag::Id>,

    /// Requested [`read::villa::list::Arguments`].
    pub arguments: read::villa::list::Arguments,
}

/// Output of the [`List`] [`Query`].
pub type Output = pagination::Paginated<read::villa::Details>;

impl<Db> Query<List> for Service<Db>
where
    Db: Database<
            Select<By<Vec<tag::VillaTag>, Vec<tag::Id>>>,
            Ok = Vec<tag::VillaTag>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<villa::Id>, read::villa::list::Filter>>,
            Ok = Vec<villa::Id>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<CalendarEvent>, Range<calendar::EventDateTime>>>,
            Ok = Vec<CalendarEvent>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::villa::list::Page, read::villa::list::Selector>>,
            Ok = read::villa::list::Page,
            Err = Traced<database::Error>,
        > + Database<
            Select<
                By<read::villa::list::TotalCount, read::villa::list::Filter>,
            >,
            Ok = read::villa::list::TotalCount,
            Err = Traced<database::Error>,
        >,
    Self: Query<
        Enrich,
        Ok = Vec<read::villa::Details>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Output;
    type Err = Traced<database::Error>;

    async fn execute(&self, query: List) -> Result<Self::Ok, Self::Err> {
        let List {
            check_in,
            check_out,
            guests,
            region_id,
            sub_region_id,
            tag_ids,
            arguments,
        } = query;

        let mut filter = read::villa::list::Filter {
            region_id,
            sub_region_id,
            min_guests: guests,
            ..read::villa::list::Filter::new(villa::Status::Active)
        };

        // IDs of the `Villa`s left after the filtering which can't be
        // expressed as a single store predicate, intersected with the simple
        // predicates of the `filter`.
        let mut narrowed: Option<Vec<villa::Id>> = None;

        if !tag_ids.is_empty() {
            let rows = self
                .database()
                .execute(Select(By::<Vec<tag::VillaTag>, _>::new(
                    tag_ids.clone(),
                )))
                .await
                .map_err(tracerr::wrap!())?;
            let tagged = villas_with_all_tags(&tag_ids, &rows);
            log::debug!(
                "{} `Villa`s have all of {} `Tag`s",
                tagged.len(),
                tag_ids.len(),
            );
            if tagged.is_empty() {
                return Ok(nothing(arguments));
            }
            narrowed = Some(tagged);
        }

        if let Some((check_in, check_out)) = check_in.zip(check_out) {
            let nights = nights(check_in, check_out);
            if nights.is_empty() {
                log::debug!(
                    "no bookable nights between `{check_in}` and \
                     `{check_out}`",
                );
                return Ok(nothing(arguments));
            }

            let universe = self
                .database()
                .execute(Select(By::<Vec<villa::Id>, _>::new(
                    read::villa::list::Filter {
                        ids: narrowed.take(),
                        ..filter.clone()
                    },
                )))
                .await
                .map_err(tracerr::wrap!())?;
            let range = calendar::check_in_at(check_in)
                ..calendar::check_in_at(check_out);
            let events = self
                .database()
                .execute(Select(By::<Vec<CalendarEvent>, _>::new(range)))
                .await
                .map_err(tracerr::wrap!())?;

            let available = available_villas(universe, &nights, &events);
            log::debug!(
                "{} `Villa`s are available for {} nights from `{check_in}`",
                available.len(),
                nights.len(),
            );
            if available.is_empty() {
                return Ok(nothing(arguments));
            }
            narrowed = Some(available);
        } else if let Some(tagged) = narrowed.take() {
            let matching = self
                .database()
                .execute(Select(By::<Vec<villa::Id>, _>::new(
                    read::villa::list::Filter {
                        ids: Some(tagged),
                        ..filter.clone()
                    },
                )))
                .await
                .map_err(tracerr::wrap!())?;
            if matching.is_empty() {
                return Ok(nothing(arguments));
            }
            narrowed = Some(matching);
        }

        let total = if let Some(ids) = &narrowed {
            u64::try_from(ids.len()).unwrap_or(u64::MAX)
        } else {
            self.database()
                .execute(Select(
                    By::<read::villa::list::TotalCount, _>::new(filter.clone()),
                ))
                .await
                .map_err(tracerr::wrap!())?
                .into()
        };

        filter.ids = narrowed;
        let page = self
            .database()
            .execute(Select(By::<read::villa::list::Page, _>::new(
                read::villa::list::Selector { arguments, filter },
            )))
            .await
            .map_err(tracerr::wrap!())?;
        log::debug!(
            "selected {} `Villa`s of {total} for page {}",
            page.items.len(),
            arguments.page(),
        );

        let items = self
            .execute(Enrich(page.items))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(Page::new(arguments, items).with_total(total))
    }
}

/// [`Query`] enriching [`Villa`]s with their [`Image`]s, [`SeasonalPrice`]s
/// and [`Tag`]s.
#[derive(Clone, Debug)]
pub struct Enrich(pub Vec<Villa>);

impl<Db> Query<Enrich> for Service<Db>
where
    Db: Database<
            Select<By<HashMap<villa::Id, Vec<Image>>, Vec<villa::Id>>>,
            Ok = HashMap<villa::Id, Vec<Image>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashMap<villa::Id, Vec<SeasonalPrice>>, Vec<villa::Id>>>,
            Ok = HashMap<villa::Id, Vec<SeasonalPrice>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashMap<villa::Id, Vec<Tag>>, Vec<villa::Id>>>,
            Ok = HashMap<villa::Id, Vec<Tag>>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Vec<read::villa::Details>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Enrich(villas): Enrich,
    ) -> Result<Self::Ok, Self::Err> {
        if villas.is_empty() {
            return Ok(vec![]);
        }
        let ids = villas.iter().map(|v| v.id).collect::<Vec<_>>();

        let mut images = self
            .database()
            .execute(Select(By::<HashMap<villa::Id, Vec<Image>>, _>::new(
                ids.clone(),
            )))
            .await
            .map_err(tracerr::wrap!())?;
        let mut prices = self
            .database()
            .execute(Select(
                By::<HashMap<villa::Id, Vec<SeasonalPrice>>, _>::new(
                    ids.clone(),
                ),
            ))
            .await
            .map_err(tracerr::wrap!())?;
        let mut tags = self
            .database()
            .execute(Select(By::<HashMap<villa::Id, Vec<Tag>>, _>::new(ids)))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(villas
            .into_iter()
            .map(|villa| {
                let prices = prices.remove(&villa.id).unwrap_or_default();
                read::villa::Details {
                    images: images.remove(&villa.id).unwrap_or_default(),
                    min_nightly_price: SeasonalPrice::min_nightly(&prices),
                    prices,
                    tags: tags.remove(&villa.id).unwrap_or_default(),
                    villa,
                }
            })
            .collect())
    }
}

/// Returns an empty [`Output`] for the provided [`Arguments`].
///
/// [`Arguments`]: read::villa::list::Arguments
fn nothing(arguments: read::villa::list::Arguments) -> Output {
    Page::empty(arguments).with_total(0)
}

/// Returns the IDs of the [`Villa`]s associated with every one of the
/// `selected` [`Tag`]s, according to the provided association `rows`.
fn villas_with_all_tags(
    selected: &[tag::Id],
    rows: &[tag::VillaTag],
) -> Vec<villa::Id> {
    let selected = selected.iter().collect::<HashSet<_>>();

    let mut matched = HashMap::<villa::Id, HashSet<&tag::Id>>::new();
    for row in rows.iter().filter(|r| selected.contains(&r.tag_id)) {
        _ = matched.entry(row.villa_id).or_default().insert(&row.tag_id);
    }

    let mut ids = matched
        .into_iter()
        .filter_map(|(id, tags)| (tags.len() == selected.len()).then_some(id))
        .collect::<Vec<_>>();
    ids.sort_unstable();
    ids
}

/// Maximum number of nights a single stay may last.
pub const MAX_STAY_NIGHTS: i64 = 365;

/// Enumerates the nights of a stay, one [`Date`] per night starting from the
/// `check_in`.
///
/// No nights are returned if the `check_out` isn't after the `check_in`, or
/// if the stay lasts longer than [`MAX_STAY_NIGHTS`].
fn nights(check_in: Date, check_out: Date) -> Vec<Date> {
    let count = check_in.days_until(check_out);
    if count > MAX_STAY_NIGHTS {
        return vec![];
    }
    let count = usize::try_from(count).unwrap_or(0);
    iter::successors(Some(check_in), |d| d.next_day())
        .take(count)
        .collect()
}

/// Filters the `universe` of [`Villa`]s leaving only the ones available for
/// all the provided `nights`.
///
/// Every night starts available and becomes unavailable once any
/// non-[`AVAILABLE`] [`CalendarEvent`] exists for it, regardless of any other
/// [`CalendarEvent`]s of the same night.
///
/// [`AVAILABLE`]: calendar::Status::Available
fn available_villas(
    universe: Vec<villa::Id>,
    nights: &[Date],
    events: &[CalendarEvent],
) -> Vec<villa::Id> {
    let unavailable = events
        .iter()
        .filter(|e| e.status != calendar::Status::Available)
        .map(|e| (e.villa_id, e.date.date()))
        .collect::<HashSet<_>>();

    universe
        .into_iter()
        .filter(|id| nights.iter().all(|n| !unavailable.contains(&(*id, *n))))
        .collect()
}

#[cfg(test)]
mod spec {
    use common::pagination::Arguments;

    use crate::{
        domain::{
            calendar::{self, Status},
            region, tag, villa,
        },
        fixture,
        infra::memory::Tables,
        Query as _,
    };

    use super::{available_villas, nights, villas_with_all_tags, List};

    fn list(page: u32, limit: u32) -> List {
        List {
            check_in: None,
            check_out: None,
            guests: None,
            region_id: None,
            sub_region_id: None,
            tag_ids: vec![],
            arguments: Arguments::try_new(page, limit).unwrap(),
        }
    }

    fn tag_ids(ids: &[&str]) -> Vec<tag::Id> {
        ids.iter().map(|id| tag::Id::new(*id).unwrap()).collect()
    }

    #[test]
    fn enumerates_nights() {
        let dates =
            nights(fixture::date("2025-07-30"), fixture::date("2025-08-02"));

        assert_eq!(
            dates,
            [
                fixture::date("2025-07-30"),
                fixture::date("2025-07-31"),
                fixture::date("2025-08-01"),
            ],
        );
        assert!(nights(fixture::date("2025-07-30"), fixture::date("2025-07-30"))
            .is_empty());
        assert!(nights(fixture::date("2025-07-30"), fixture::date("2025-07-01"))
            .is_empty());
    }

    #[test]
    fn limits_stay_length() {
        let year =
            nights(fixture::date("2025-01-01"), fixture::date("2026-01-01"));
        assert_eq!(year.len(), 365);

        assert!(nights(fixture::date("2024-01-01"), fixture::date("2025-01-01"))
            .is_empty());
        assert!(nights(fixture::date("0001-01-01"), fixture::date("9999-12-31"))
            .is_empty());
    }

    #[test]
    fn requires_all_selected_tags() {
        let full = fixture::villa("full", "r1", 4, 0);
        let partial = fixture::villa("partial", "r1", 4, 1);
        let rows = [
            fixture::villa_tag(&full, "pool"),
            fixture::villa_tag(&full, "sea-view"),
            fixture::villa_tag(&full, "jacuzzi"),
            fixture::villa_tag(&partial, "pool"),
            fixture::villa_tag(&partial, "sea-view"),
            fixture::villa_tag(&partial, "garden"),
        ];

        assert_eq!(
            villas_with_all_tags(
                &tag_ids(&["pool", "sea-view", "jacuzzi"]),
                &rows,
            ),
            [full.id],
        );
    }

    #[test]
    fn duplicated_association_rows_are_counted_once() {
        let villa = fixture::villa("dup", "r1", 4, 0);
        let rows = [
            fixture::villa_tag(&villa, "pool"),
            fixture::villa_tag(&villa, "pool"),
        ];

        let ids = tag_ids(&["pool", "garden"]);
        assert!(villas_with_all_tags(&ids, &rows).is_empty());
    }

    #[test]
    fn unavailability_is_not_overridden() {
        let villa = fixture::villa("mixed", "r1", 4, 0);
        let nights = [fixture::date("2025-07-01"), fixture::date("2025-07-02")];
        let events = [
            fixture::event(&villa, "2025-07-02", calendar::Status::Blocked),
            fixture::event(&villa, "2025-07-02", calendar::Status::Available),
        ];

        assert!(available_villas(vec![villa.id], &nights, &events).is_empty());
    }

    #[tokio::test]
    async fn lists_intersection_of_simple_predicates() {
        let mut villas = vec![];
        for (i, guests) in [2, 4, 6, 8, 3, 5].into_iter().enumerate() {
            let age = i64::try_from(i).unwrap();
            villas.push(fixture::villa(&format!("r1-{i}"), "r1", guests, age));
        }
        for i in 0..4 {
            villas.push(fixture::villa(&format!("r2-{i}"), "r2", 10, 10 + i));
        }
        let mut inactive = fixture::villa("r1-inactive", "r1", 10, 100);
        inactive.status = villa::Status::Inactive;
        villas.push(inactive);
        let service = fixture::service(Tables {
            villas,
            ..Tables::default()
        });

        let out = service
            .execute(List {
                region_id: region::Id::new("r1"),
                guests: Some(4),
                ..list(1, 6)
            })
            .await
            .unwrap();

        let slugs = out
            .items
            .iter()
            .map(|d| d.villa.slug.to_string())
            .collect::<Vec<_>>();
        assert_eq!(slugs, ["r1-5", "r1-3", "r1-2", "r1-1"]);
        assert_eq!(out.info.total, 4);
        assert_eq!(out.info.total_pages, 1);

        let out = service
            .execute(List {
                region_id: region::Id::new("r1"),
                guests: Some(4),
                ..list(2, 3)
            })
            .await
            .unwrap();

        assert_eq!(out.items.len(), 1);
        assert_eq!(out.items[0].villa.slug.to_string(), "r1-1");
        assert_eq!(out.info.total, 4);
        assert_eq!(out.info.page, 2);
        assert_eq!(out.info.total_pages, 2);
    }

    #[tokio::test]
    async fn excludes_villas_missing_some_tag() {
        let full = fixture::villa("full", "r1", 4, 0);
        let partial = fixture::villa("partial", "r1", 4, 1);
        let service = fixture::service(Tables {
            villa_tags: vec![
                fixture::villa_tag(&full, "pool"),
                fixture::villa_tag(&full, "sea-view"),
                fixture::villa_tag(&full, "jacuzzi"),
                fixture::villa_tag(&partial, "pool"),
                fixture::villa_tag(&partial, "sea-view"),
            ],
            tags: vec![
                fixture::tag("pool", "Pool"),
                fixture::tag("sea-view", "Sea view"),
                fixture::tag("jacuzzi", "Jacuzzi"),
            ],
            villas: vec![full.clone(), partial],
            ..Tables::default()
        });

        let out = service
            .execute(List {
                tag_ids: tag_ids(&["pool", "sea-view", "jacuzzi"]),
                ..list(1, 6)
            })
            .await
            .unwrap();

        assert_eq!(out.items.len(), 1);
        assert_eq!(out.items[0].villa.id, full.id);
        assert_eq!(out.items[0].tags.len(), 3);
        assert_eq!(out.info.total, 1);
    }

    #[tokio::test]
    async fn no_tagged_villas_means_empty_result() {
        let service = fixture::service(Tables {
            villas: vec![fixture::villa("plain", "r1", 4, 0)],
            ..Tables::default()
        });

        let out = service
            .execute(List {
                tag_ids: tag_ids(&["pool"]),
                ..list(1, 6)
            })
            .await
            .unwrap();

        assert!(out.items.is_empty());
        assert_eq!(out.info.total, 0);
        assert_eq!(out.info.total_pages, 0);
    }

    #[tokio::test]
    async fn checks_availability_night_by_night() {
        let free = fixture::villa("free", "r1", 4, 0);
        let open = fixture::villa("open", "r1", 4, 1);
        let blocked = fixture::villa("blocked", "r1", 4, 2);
        let leaving = fixture::villa("leaving", "r1", 4, 3);
        let service = fixture::service(Tables {
            events: vec![
                fixture::event(&open, "2025-07-01", Status::Available),
                fixture::event(&open, "2025-07-02", Status::Available),
                fixture::event(&blocked, "2025-07-02", Status::Blocked),
                // Check-out day itself isn't a night of the stay.
                fixture::event(&leaving, "2025-07-04", Status::Reserved),
                fixture::event(&leaving, "2025-06-30", Status::Reserved),
            ],
            villas: vec![free.clone(), open.clone(), blocked, leaving.clone()],
            ..Tables::default()
        });

        let out = service
            .execute(List {
                check_in: Some(fixture::date("2025-07-01")),
                check_out: Some(fixture::date("2025-07-04")),
                ..list(1, 6)
            })
            .await
            .unwrap();

        let mut ids = out.items.iter().map(|d| d.villa.id).collect::<Vec<_>>();
        ids.sort_unstable();
        let mut expected = vec![free.id, open.id, leaving.id];
        expected.sort_unstable();
        assert_eq!(ids, expected);
        assert_eq!(out.info.total, 3);
    }

    #[tokio::test]
    async fn non_positive_stay_means_empty_result() {
        let service = fixture::service(Tables {
            villas: vec![fixture::villa("free", "r1", 4, 0)],
            ..Tables::default()
        });

        for check_out in ["2025-07-01", "2025-06-20"] {
            let out = service
                .execute(List {
                    check_in: Some(fixture::date("2025-07-01")),
                    check_out: Some(fixture::date(check_out)),
                    region_id: region::Id::new("r1"),
                    ..list(1, 6)
                })
                .await
                .unwrap();

            assert!(out.items.is_empty());
            assert_eq!(out.info.total, 0);
        }
    }

    #[tokio::test]
    async fn counts_narrowed_villas_with_simple_predicates() {
        let mut villas = vec![];
        let mut villa_tags = vec![];
        for (i, region) in ["r1", "r2", "r2", "r2", "r2"].iter().enumerate() {
            let age = i64::try_from(i).unwrap();
            let villa = fixture::villa(&format!("pool-{i}"), region, 4, age);
            villa_tags.push(fixture::villa_tag(&villa, "pool"));
            villas.push(villa);
        }
        let service = fixture::service(Tables {
            villa_tags,
            villas,
            ..Tables::default()
        });

        let out = service
            .execute(List {
                region_id: region::Id::new("r1"),
                tag_ids: tag_ids(&["pool"]),
                ..list(1, 1)
            })
            .await
            .unwrap();

        assert_eq!(out.items.len(), 1);
        assert_eq!(out.items[0].villa.slug.to_string(), "pool-0");
        assert_eq!(out.info.total, 1);
        assert_eq!(out.info.total_pages, 1);

        let out = service
            .execute(List {
                check_in: Some(fixture::date("2025-07-01")),
                check_out: Some(fixture::date("2025-07-04")),
                region_id: region::Id::new("r2"),
                ..list(1, 6)
            })
            .await
            .unwrap();

        assert_eq!(out.items.len(), 4);
        assert_eq!(out.info.total, 4);
    }

    #[tokio::test]
    async fn single_date_is_ignored() {
        let service = fixture::service(Tables {
            villas: vec![fixture::villa("free", "r1", 4, 0)],
            ..Tables::default()
        });

        let out = service
            .execute(List {
                check_in: Some(fixture::date("2025-07-01")),
                ..list(1, 6)
            })
            .await
            .unwrap();

        assert_eq!(out.items.len(), 1);
    }

    #[tokio::test]
    async fn intersects_tags_with_availability() {
        let tagged_free = fixture::villa("tagged-free", "r1", 4, 0);
        let tagged_busy = fixture::villa("tagged-busy", "r1", 4, 1);
        let untagged_free = fixture::villa("untagged-free", "r1", 4, 2);
        let service = fixture::service(Tables {
            villa_tags: vec![
                fixture::villa_tag(&tagged_free, "pool"),
                fixture::villa_tag(&tagged_busy, "pool"),
            ],
            events: vec![fixture::event(
                &tagged_busy,
                "2025-08-10",
                calendar::Status::Reserved,
            )],
            villas: vec![tagged_free.clone(), tagged_busy, untagged_free],
            ..Tables::default()
        });

        let out = service
            .execute(List {
                check_in: Some(fixture::date("2025-08-09")),
                check_out: Some(fixture::date("2025-08-12")),
                tag_ids: tag_ids(&["pool"]),
                ..list(1, 6)
            })
            .await
            .unwrap();

        assert_eq!(out.items.len(), 1);
        assert_eq!(out.items[0].villa.id, tagged_free.id);
        assert_eq!(out.info.total, 1);
    }

    #[tokio::test]
    async fn enriches_listed_villas() {
        let villa = fixture::villa("rich", "r1", 4, 0);
        let service = fixture::service(Tables {
            images: vec![
                fixture::image(&villa, 2, false),
                fixture::image(&villa, 1, false),
            ],
            prices: vec![
                fixture::price(&villa, 400, true),
                fixture::price(&villa, 150, false),
                fixture::price(&villa, 250, true),
            ],
            villas: vec![villa],
            ..Tables::default()
        });

        let out = service.execute(list(1, 6)).await.unwrap();

        let details = &out.items[0];
        assert_eq!(details.images.len(), 2);
        assert_eq!(details.cover().map(|i| i.order), Some(1));
        assert_eq!(details.prices.len(), 3);
        assert_eq!(details.min_nightly_price, Some(fixture::eur(250)));
    }

    #[tokio::test]
    async fn store_failure_aborts_composition() {
        let villa = fixture::villa("free", "r1", 4, 0);
        let service = fixture::service(Tables {
            villa_tags: vec![fixture::villa_tag(&villa, "pool")],
            villas: vec![villa],
            ..Tables::default()
        });
        service.database().set_unavailable(true);

        let res = service
            .execute(List {
                check_in: Some(fixture::date("2025-08-09")),
                check_out: Some(fixture::date("2025-08-12")),
                tag_ids: tag_ids(&["pool"]),
                ..list(1, 6)
            })
            .await;
        assert!(res.is_err());

        assert!(service.execute(list(1, 6)).await.is_err());
    }
}
