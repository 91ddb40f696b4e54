//! [`Villa`]-related definitions.

use axum::{extract::Path, Json};
use common::{Date, DateTime, Locale, Money, Percent};
use serde::Serialize;
use service::{
    domain::{self, region, villa},
    query,
    read::villa::Details,
    Query as _,
};

use crate::{
    api::{Alternate, Link},
    define_error, AsError, Context, Error,
};

/// Villa as displayed on the listing and detail pages.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Villa {
    /// ID of this [`Villa`].
    pub id: villa::Id,

    /// URL slug of this [`Villa`].
    pub slug: String,

    /// Title of this [`Villa`].
    pub title: String,

    /// Description of this [`Villa`].
    pub description: Option<String>,

    /// Number of bedrooms.
    pub bedrooms: u16,

    /// Number of bathrooms.
    pub bathrooms: u16,

    /// Maximum number of guests.
    pub max_guests: u16,

    /// ID of the main region.
    pub region_id: region::Id,

    /// ID of the sub-region.
    pub sub_region_id: Option<region::Id>,

    /// Refundable deposit.
    pub deposit: Option<Money>,

    /// One-off cleaning fee.
    pub cleaning_fee: Option<Money>,

    /// Minimum number of nights of a stay.
    pub min_stay_nights: u16,

    /// Check-in time in `HH:MM` format.
    pub check_in_time: String,

    /// Check-out time in `HH:MM` format.
    pub check_out_time: String,

    /// Share of the total price paid in advance.
    pub advance_payment_rate: Percent,

    /// Indicator whether this [`Villa`] is promoted.
    pub is_promoted: bool,

    /// Publication status of this [`Villa`].
    pub status: String,

    /// [`DateTime`] this [`Villa`] was listed at.
    pub created_at: DateTime,

    /// Cover [`Image`] of this [`Villa`].
    pub cover: Option<Image>,

    /// Gallery of this [`Villa`].
    pub images: Vec<Image>,

    /// Seasonal [`Price`]s of this [`Villa`].
    pub prices: Vec<Price>,

    /// [`Tag`]s of this [`Villa`].
    pub tags: Vec<Tag>,

    /// Minimum nightly price among the active [`Price`]s.
    pub min_nightly_price: Option<Money>,

    /// Localized path of this [`Villa`]'s detail page.
    pub href: String,
}

impl Villa {
    /// Creates a new [`Villa`] out of the provided [`Details`] linking to its
    /// detail page in the provided [`Locale`].
    #[must_use]
    pub fn new(details: Details, locale: Locale) -> Self {
        let cover = details.cover().cloned().map(Image::from);
        let Details {
            villa,
            images,
            prices,
            tags,
            min_nightly_price,
        } = details;

        Self {
            href: path(locale, &villa.slug),
            id: villa.id,
            slug: villa.slug.to_string(),
            title: villa.title.to_string(),
            description: villa.description.map(Into::into),
            bedrooms: villa.bedrooms,
            bathrooms: villa.bathrooms,
            max_guests: villa.max_guests,
            region_id: villa.region_id,
            sub_region_id: villa.sub_region_id,
            deposit: villa.deposit,
            cleaning_fee: villa.cleaning_fee,
            min_stay_nights: villa.min_stay_nights,
            check_in_time: villa.check_in_time.to_string(),
            check_out_time: villa.check_out_time.to_string(),
            advance_payment_rate: villa.advance_payment_rate,
            is_promoted: villa.is_promoted,
            status: villa.status.to_string(),
            created_at: villa.created_at.coerce(),
            cover,
            images: images.into_iter().map(Image::from).collect(),
            prices: prices.into_iter().map(Price::from).collect(),
            tags: tags.into_iter().map(Tag::from).collect(),
            min_nightly_price,
        }
    }
}

/// Image of a [`Villa`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// ID of this [`Image`].
    pub id: villa::image::Id,

    /// URL of this [`Image`].
    pub url: String,

    /// Title of this [`Image`].
    pub title: Option<String>,

    /// Alternative text of this [`Image`].
    pub alt_text: Option<String>,

    /// Indicator whether this [`Image`] is the cover.
    pub is_cover: bool,
}

impl From<villa::Image> for Image {
    fn from(image: villa::Image) -> Self {
        Self {
            id: image.id,
            url: image.url.into(),
            title: image.title,
            alt_text: image.alt_text,
            is_cover: image.is_cover,
        }
    }
}

/// Seasonal price of a [`Villa`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Name of the season.
    pub name: Option<String>,

    /// First day of the season.
    pub starts_at: Date,

    /// Last day of the season.
    pub ends_at: Date,

    /// Price of a single night.
    pub nightly_price: Money,

    /// Price of a whole week.
    pub weekly_price: Option<Money>,

    /// Indicator whether this [`Price`] is currently offered.
    pub is_active: bool,
}

impl From<villa::SeasonalPrice> for Price {
    fn from(price: villa::SeasonalPrice) -> Self {
        Self {
            name: price.name,
            starts_at: price.starts_at.date(),
            ends_at: price.ends_at.date(),
            nightly_price: price.nightly_price,
            weekly_price: price.weekly_price,
            is_active: price.is_active,
        }
    }
}

/// Tag of a [`Villa`].
#[derive(Clone, Debug, Serialize)]
pub struct Tag {
    /// ID of this [`Tag`].
    pub id: domain::tag::Id,

    /// Name of this [`Tag`].
    pub name: String,
}

impl From<domain::Tag> for Tag {
    fn from(tag: domain::Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name.into(),
        }
    }
}

/// Detail page of a single [`Villa`].
#[derive(Clone, Debug, Serialize)]
pub struct Page {
    /// [`Villa`] itself.
    pub villa: Villa,

    /// Navigation [`Link`]s.
    pub links: Vec<Link>,

    /// This page in other [`Locale`]s.
    pub alternates: Vec<Alternate>,
}

/// Responds with the detail [`Page`] of the [`Villa`] with the provided slug.
///
/// # Errors
///
/// - [`VillaError::NotExists`] - if no listed [`Villa`] has the slug.
#[tracing::instrument(
    skip_all,
    fields(locale = %ctx.locale(), slug = %slug),
)]
pub async fn show(
    ctx: Context,
    Path((_, slug)): Path<(String, String)>,
) -> Result<Json<Page>, Error> {
    let slug = villa::Slug::new(slug).ok_or(VillaError::NotExists)?;
    let details = ctx
        .service()
        .execute(query::villa::BySlug(slug))
        .await
        .map_err(AsError::into_error)?
        .ok_or(VillaError::NotExists)?;

    let alternates = Alternate::all(|l| path(l, &details.villa.slug));
    Ok(Json(Page {
        villa: Villa::new(details, ctx.locale()),
        links: Link::navigation(&ctx),
        alternates,
    }))
}

/// Returns the detail page path of the [`Villa`] with the provided slug.
fn path(locale: Locale, slug: &villa::Slug) -> String {
    format!("/{locale}/villa-kiralama/{slug}")
}

define_error! {
    enum VillaError {
        #[code = "VILLA_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "Villa with the provided slug does not exist"]
        NotExists,
    }
}
