//! [`Region`] definitions.

use std::str::FromStr;

use derive_more::{AsRef, Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::Villa;

/// Geographical region [`Villa`]s are located in.
///
/// Main regions own sub-regions via their [`Region::parent_id`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Region {
    /// ID of this [`Region`].
    pub id: Id,

    /// [`Name`] of this [`Region`].
    pub name: Name,

    /// URL slug of this [`Region`].
    pub slug: String,

    /// Indicator whether this is a main [`Region`].
    pub is_main_region: bool,

    /// ID of the main [`Region`] this sub-[`Region`] belongs to.
    pub parent_id: Option<Id>,

    /// Indicator whether this [`Region`] is offered in filters.
    pub is_active: bool,

    /// Number of [`Villa`]s located in this [`Region`].
    pub villa_count: u32,
}

/// ID of a [`Region`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`Id`].
    fn check(id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        id.trim() == id && !id.is_empty() && id.len() <= 128
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `region::Id`")
    }
}

/// Name of a [`Region`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, Hash, Into, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);
