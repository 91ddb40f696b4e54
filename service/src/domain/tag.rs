//! [`Tag`] definitions.

use std::str::FromStr;

use derive_more::{AsRef, Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::Villa;
use crate::domain::villa;

/// Named attribute of a [`Villa`] (pool, sea view, etc).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tag {
    /// ID of this [`Tag`].
    pub id: Id,

    /// [`Name`] of this [`Tag`].
    pub name: Name,
}

/// Association of a [`Tag`] with a [`Villa`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct VillaTag {
    /// ID of the tagged [`Villa`].
    pub villa_id: villa::Id,

    /// ID of the [`Tag`].
    pub tag_id: Id,
}

/// ID of a [`Tag`].
///
/// Opaque for the service, so any non-empty string without separators is
/// accepted.
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
        !id.is_empty()
            && id.len() <= 128
            && !id.contains(',')
            && !id.chars().any(char::is_whitespace)
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `tag::Id`")
    }
}

/// Name of a [`Tag`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, Hash, Into, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);
