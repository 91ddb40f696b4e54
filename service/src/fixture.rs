//! Fixtures shared by tests.

use common::{money::Currency, Date, DateTime, Money, Percent};
use rust_decimal::Decimal;

use crate::{
    domain::{
        calendar, region, tag,
        villa::{self, Image, SeasonalPrice},
        CalendarEvent, Region, Tag, Villa,
    },
    infra::{memory::Tables, Memory},
    Service,
};

/// Creates a new [`Service`] on top of a [`Memory`] database filled with the
/// provided [`Tables`].
pub(crate) fn service(tables: Tables) -> Service<Memory> {
    Service::new(Memory::new(tables))
}

/// Creates an [`ACTIVE`] [`Villa`] created `age` seconds after some moment.
///
/// [`ACTIVE`]: villa::Status::Active
pub(crate) fn villa(
    slug: &str,
    region: &str,
    max_guests: u16,
    age: i64,
) -> Villa {
    let created_at =
        DateTime::from_unix_timestamp(1_700_000_000 + age).unwrap();
    Villa {
        id: villa::Id::new(),
        slug: villa::Slug::new(slug).unwrap(),
        title: villa::Title::new(format!("Villa {slug}")).unwrap(),
        description: None,
        bedrooms: max_guests.div_ceil(2),
        bathrooms: 1,
        max_guests,
        region_id: region::Id::new(region).unwrap(),
        sub_region_id: None,
        deposit: None,
        cleaning_fee: Some(eur(50)),
        min_stay_nights: 3,
        check_in_time: villa::CheckTime::new("16:00").unwrap(),
        check_out_time: villa::CheckTime::new("10:00").unwrap(),
        advance_payment_rate: Percent::new(Decimal::from(30)).unwrap(),
        is_promoted: false,
        status: villa::Status::Active,
        created_at: created_at.coerce(),
        updated_at: created_at.coerce(),
    }
}

/// Creates a new [`Region`].
pub(crate) fn region(id: &str, name: &str, parent: Option<&str>) -> Region {
    Region {
        id: region::Id::new(id).unwrap(),
        name: name.to_owned().into(),
        slug: id.to_owned(),
        is_main_region: parent.is_none(),
        parent_id: parent.map(|p| region::Id::new(p).unwrap()),
        is_active: true,
        villa_count: 0,
    }
}

/// Creates a new [`Tag`].
pub(crate) fn tag(id: &str, name: &str) -> Tag {
    Tag {
        id: tag::Id::new(id).unwrap(),
        name: name.to_owned().into(),
    }
}

/// Associates the provided [`Villa`] with the [`Tag`] of the provided ID.
pub(crate) fn villa_tag(villa: &Villa, tag_id: &str) -> tag::VillaTag {
    tag::VillaTag {
        villa_id: villa.id,
        tag_id: tag::Id::new(tag_id).unwrap(),
    }
}

/// Creates a new [`CalendarEvent`] for the provided [`Villa`] and day.
pub(crate) fn event(
    villa: &Villa,
    date: &str,
    status: calendar::Status,
) -> CalendarEvent {
    CalendarEvent {
        villa_id: villa.id,
        date: calendar::check_in_at(self::date(date)),
        status,
    }
}

/// Parses a [`Date`] out of the provided `YYYY-MM-DD` string.
pub(crate) fn date(date: &str) -> Date {
    Date::parse(date).unwrap()
}

/// Creates a new [`Image`] of the provided [`Villa`].
pub(crate) fn image(villa: &Villa, order: u16, is_cover: bool) -> Image {
    Image {
        id: villa::image::Id::new(),
        villa_id: villa.id,
        url: format!("https://cdn.example.com/{}/{order}.jpg", villa.slug)
            .into(),
        title: None,
        alt_text: Some(villa.title.to_string()),
        order,
        is_cover,
    }
}

/// Creates a new [`SeasonalPrice`] of the provided [`Villa`].
pub(crate) fn price(
    villa: &Villa,
    nightly: i64,
    is_active: bool,
) -> SeasonalPrice {
    SeasonalPrice {
        id: villa::price::Id::new(),
        villa_id: villa.id,
        name: None,
        starts_at: calendar::check_in_at(date("2025-06-01")).coerce(),
        ends_at: calendar::check_in_at(date("2025-09-30")).coerce(),
        nightly_price: eur(nightly),
        weekly_price: None,
        is_active,
    }
}

/// Creates the provided amount of euros.
pub(crate) fn eur(amount: i64) -> Money {
    Money {
        amount: Decimal::from(amount),
        currency: Currency::Eur,
    }
}
