//! In-memory [`Database`] implementation.

use std::{
    collections::HashMap,
    ops::Range,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, PoisonError, RwLock,
    },
};

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error as StdError};
use tracerr::Traced;

use crate::{
    domain::{
        calendar, contact, tag,
        villa::{self, Image, SeasonalPrice},
        CalendarEvent, ContactMessage, Region, Tag, Villa,
    },
    infra::{database, Database},
    read,
};

/// Rows stored in a [`Memory`] database.
#[derive(Clone, Debug, Default)]
pub struct Tables {
    /// Stored [`Villa`]s.
    pub villas: Vec<Villa>,

    /// Stored [`Region`]s.
    pub regions: Vec<Region>,

    /// Stored [`Tag`]s.
    pub tags: Vec<Tag>,

    /// Stored [`tag::VillaTag`] associations.
    pub villa_tags: Vec<tag::VillaTag>,

    /// Stored [`CalendarEvent`]s.
    pub events: Vec<CalendarEvent>,

    /// Stored [`SeasonalPrice`]s.
    pub prices: Vec<SeasonalPrice>,

    /// Stored [`Image`]s.
    pub images: Vec<Image>,

    /// Stored [`ContactMessage`]s.
    pub messages: Vec<ContactMessage>,
}

/// [`Database`] keeping everything in memory.
///
/// Clones share the same [`Tables`].
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// Shared [`Tables`].
    tables: Arc<RwLock<Tables>>,

    /// Indicator whether every operation should fail.
    unavailable: Arc<AtomicBool>,
}

impl Memory {
    /// Creates a new [`Memory`] database filled with the provided [`Tables`].
    #[must_use]
    pub fn new(tables: Tables) -> Self {
        Self {
            tables: Arc::new(RwLock::new(tables)),
            unavailable: Arc::default(),
        }
    }

    /// Makes every following operation fail (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    /// Returns a copy of the currently stored [`Tables`].
    #[must_use]
    pub fn snapshot(&self) -> Tables {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reads the [`Tables`] with the provided function.
    fn read<T>(
        &self,
        f: impl FnOnce(&Tables) -> T,
    ) -> Result<T, Traced<database::Error>> {
        self.check()?;
        Ok(f(&self.tables.read().unwrap_or_else(PoisonError::into_inner)))
    }

    /// Modifies the [`Tables`] with the provided function.
    fn write<T>(
        &self,
        f: impl FnOnce(&mut Tables) -> T,
    ) -> Result<T, Traced<database::Error>> {
        self.check()?;
        Ok(f(&mut self
            .tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)))
    }

    /// Checks whether this [`Memory`] database is available.
    fn check(&self) -> Result<(), Traced<database::Error>> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(tracerr::new!(database::Error::from(
                Error::Unavailable
            )));
        }
        Ok(())
    }
}

/// [`Memory`] database error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// [`Memory`] database was made unavailable.
    #[display("`Memory` database is unavailable")]
    Unavailable,
}

/// Groups the rows belonging to the provided [`Villa`]s by their IDs.
fn group_by_villa<T: Clone>(
    rows: &[T],
    ids: &[villa::Id],
    villa_id: impl Fn(&T) -> villa::Id,
) -> HashMap<villa::Id, Vec<T>> {
    let mut grouped = HashMap::<_, Vec<_>>::new();
    for row in rows.iter().filter(|r| ids.contains(&villa_id(r))) {
        grouped.entry(villa_id(row)).or_default().push(row.clone());
    }
    grouped
}

impl Database<Select<By<Vec<tag::VillaTag>, Vec<tag::Id>>>> for Memory {
    type Ok = Vec<tag::VillaTag>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<tag::VillaTag>, Vec<tag::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        self.read(|t| {
            t.villa_tags
                .iter()
                .filter(|vt| ids.contains(&vt.tag_id))
                .cloned()
                .collect()
        })
    }
}

impl Database<Select<By<Vec<villa::Id>, read::villa::list::Filter>>>
    for Memory
{
    type Ok = Vec<villa::Id>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<villa::Id>, read::villa::list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        self.read(|t| {
            t.villas
                .iter()
                .filter(|v| filter.matches(v))
                .map(|v| v.id)
                .collect()
        })
    }
}

impl Database<Select<By<Vec<CalendarEvent>, Range<calendar::EventDateTime>>>>
    for Memory
{
    type Ok = Vec<CalendarEvent>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<CalendarEvent>, Range<calendar::EventDateTime>>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let range = by.into_inner();
        self.read(|t| {
            t.events
                .iter()
                .filter(|e| range.contains(&e.date))
                .copied()
                .collect()
        })
    }
}

impl Database<Select<By<read::villa::list::Page, read::villa::list::Selector>>>
    for Memory
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
        let offset = usize::try_from(arguments.offset()).unwrap_or(usize::MAX);
        let limit =
            usize::try_from(arguments.limit().get()).unwrap_or(usize::MAX);

        self.read(|t| {
            let mut villas = t
                .villas
                .iter()
                .filter(|v| filter.matches(v))
                .cloned()
                .collect::<Vec<_>>();
            villas.sort_by(|a, b| {
                b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
            });
            read::villa::list::Page::new(
                arguments,
                villas.into_iter().skip(offset).take(limit),
            )
        })
    }
}

impl
    Database<
        Select<By<read::villa::list::TotalCount, read::villa::list::Filter>>,
    > for Memory
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
        self.read(|t| {
            let count = t.villas.iter().filter(|v| filter.matches(v)).count();
            u64::try_from(count).unwrap_or(u64::MAX).into()
        })
    }
}

impl Database<Select<By<Option<Villa>, villa::Slug>>> for Memory {
    type Ok = Option<Villa>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Villa>, villa::Slug>>,
    ) -> Result<Self::Ok, Self::Err> {
        let slug = by.into_inner();
        self.read(|t| t.villas.iter().find(|v| v.slug == slug).cloned())
    }
}

impl Database<Select<By<HashMap<villa::Id, Vec<Image>>, Vec<villa::Id>>>>
    for Memory
{
    type Ok = HashMap<villa::Id, Vec<Image>>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<villa::Id, Vec<Image>>, Vec<villa::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        self.read(|t| {
            let mut images = group_by_villa(&t.images, &ids, |i| i.villa_id);
            for list in images.values_mut() {
                list.sort_by_key(|i| i.order);
            }
            images
        })
    }
}

impl
    Database<
        Select<By<HashMap<villa::Id, Vec<SeasonalPrice>>, Vec<villa::Id>>>,
    > for Memory
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
        self.read(|t| {
            let mut prices = group_by_villa(&t.prices, &ids, |p| p.villa_id);
            for list in prices.values_mut() {
                list.sort_by_key(|p| p.starts_at);
            }
            prices
        })
    }
}

impl Database<Select<By<HashMap<villa::Id, Vec<Tag>>, Vec<villa::Id>>>>
    for Memory
{
    type Ok = HashMap<villa::Id, Vec<Tag>>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<villa::Id, Vec<Tag>>, Vec<villa::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        self.read(|t| {
            let mut tags = HashMap::<_, Vec<Tag>>::new();
            let rows =
                t.villa_tags.iter().filter(|vt| ids.contains(&vt.villa_id));
            for vt in rows {
                let tag = t.tags.iter().find(|tag| tag.id == vt.tag_id);
                if let Some(tag) = tag {
                    tags.entry(vt.villa_id).or_default().push(tag.clone());
                }
            }
            for list in tags.values_mut() {
                list.sort_by(|a, b| {
                    AsRef::<str>::as_ref(&a.name)
                        .cmp(AsRef::<str>::as_ref(&b.name))
                });
            }
            tags
        })
    }
}

impl Database<Select<By<Vec<Tag>, ()>>> for Memory {
    type Ok = Vec<Tag>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Tag>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.read(|t| t.tags.clone())
    }
}

impl Database<Select<By<HashMap<tag::Id, read::tag::UsageCount>, ()>>>
    for Memory
{
    type Ok = HashMap<tag::Id, read::tag::UsageCount>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<HashMap<tag::Id, read::tag::UsageCount>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.read(|t| {
            let mut counts = HashMap::<_, u64>::new();
            for vt in &t.villa_tags {
                *counts.entry(vt.tag_id.clone()).or_default() += 1;
            }
            counts.into_iter().map(|(id, c)| (id, c.into())).collect()
        })
    }
}

impl Database<Select<By<Vec<Region>, ()>>> for Memory {
    type Ok = Vec<Region>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Region>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.read(|t| t.regions.clone())
    }
}

impl Database<Insert<ContactMessage>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(message): Insert<contact::Message>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|t| t.messages.push(message))
    }
}
