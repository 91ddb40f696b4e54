//! [`Villa`] definitions.

pub mod image;
pub mod price;

use std::sync::LazyLock;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money, Percent};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::region;

pub use self::{image::Image, price::SeasonalPrice};

/// Villa offered for rent.
#[derive(Clone, Debug)]
pub struct Villa {
    /// ID of this [`Villa`].
    pub id: Id,

    /// [`Slug`] of this [`Villa`] used in URLs.
    pub slug: Slug,

    /// [`Title`] of this [`Villa`].
    pub title: Title,

    /// Free-form description of this [`Villa`], if any.
    pub description: Option<Description>,

    /// Number of bedrooms in this [`Villa`].
    pub bedrooms: u16,

    /// Number of bathrooms in this [`Villa`].
    pub bathrooms: u16,

    /// Maximum number of guests this [`Villa`] accommodates.
    pub max_guests: u16,

    /// ID of the main [`Region`] this [`Villa`] is located in.
    ///
    /// [`Region`]: crate::domain::Region
    pub region_id: region::Id,

    /// ID of the sub-[`Region`] this [`Villa`] is located in, if any.
    ///
    /// [`Region`]: crate::domain::Region
    pub sub_region_id: Option<region::Id>,

    /// Refundable deposit, if required.
    pub deposit: Option<Money>,

    /// One-time cleaning fee, if any.
    pub cleaning_fee: Option<Money>,

    /// Minimum number of nights of a stay.
    pub min_stay_nights: u16,

    /// Time of a check-in.
    pub check_in_time: CheckTime,

    /// Time of a check-out.
    pub check_out_time: CheckTime,

    /// Part of the total price to be paid in advance.
    pub advance_payment_rate: Percent,

    /// Indicator whether this [`Villa`] is promoted in listings.
    pub is_promoted: bool,

    /// [`Status`] of this [`Villa`].
    pub status: Status,

    /// [`DateTime`] when this [`Villa`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Villa`] was updated last time.
    pub updated_at: UpdateDateTime,
}

/// ID of a [`Villa`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// URL slug of a [`Villa`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Slug(String);

impl Slug {
    /// Creates a new [`Slug`] if the given `slug` is valid.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Option<Self> {
        let slug = slug.into();
        Self::check(&slug).then_some(Self(slug))
    }

    /// Checks whether the given `slug` is a valid [`Slug`].
    fn check(slug: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Slug`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid regex")
        });

        let slug = slug.as_ref();
        slug.len() <= 256 && REGEX.is_match(slug)
    }
}

impl FromStr for Slug {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Slug`")
    }
}

/// Title of a [`Villa`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 512
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Description of a [`Villa`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, Hash, Into, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Description(String);

/// Time of a day in `HH:MM` format a check-in or check-out happens at.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct CheckTime(String);

impl CheckTime {
    /// Creates a new [`CheckTime`] if the given `time` is valid.
    #[must_use]
    pub fn new(time: impl Into<String>) -> Option<Self> {
        let time = time.into();
        Self::check(&time).then_some(Self(time))
    }

    /// Checks whether the given `time` is a valid [`CheckTime`].
    fn check(time: impl AsRef<str>) -> bool {
        /// Regular expression checking [`CheckTime`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid regex")
        });

        REGEX.is_match(time.as_ref())
    }
}

impl FromStr for CheckTime {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `CheckTime`")
    }
}

define_kind! {
    #[doc = "Publication status of a [`Villa`]."]
    enum Status {
        #[doc = "[`Villa`] is listed."]
        Active,

        #[doc = "[`Villa`] is temporarily hidden."]
        Inactive,

        #[doc = "[`Villa`] awaits moderation."]
        Pending,

        #[doc = "[`Villa`] is removed."]
        Deleted,
    }
}

/// [`DateTime`] when a [`Villa`] was created.
pub type CreationDateTime = DateTimeOf<(Villa, unit::Creation)>;

/// [`DateTime`] when a [`Villa`] was updated.
pub type UpdateDateTime = DateTimeOf<(Villa, unit::Update)>;

#[cfg(test)]
mod spec {
    use super::{CheckTime, Slug, Status};

    #[test]
    fn validates_slugs() {
        assert!(Slug::new("villa-mavi-kalkan").is_some());
        assert!(Slug::new("villa2").is_some());
        assert!(Slug::new("Villa-Mavi").is_none());
        assert!(Slug::new("villa--mavi").is_none());
        assert!(Slug::new("-villa").is_none());
        assert!(Slug::new("").is_none());
    }

    #[test]
    fn validates_check_times() {
        assert!(CheckTime::new("16:00").is_some());
        assert!(CheckTime::new("09:30").is_some());
        assert!(CheckTime::new("24:00").is_none());
        assert!(CheckTime::new("9:30").is_none());
    }

    #[test]
    fn status_is_screaming_snake_case() {
        assert_eq!(Status::Active.to_string(), "ACTIVE");
        assert_eq!("DELETED".parse::<Status>(), Ok(Status::Deleted));
    }
}
