//! [`Image`] of a [`Villa`] definitions.

use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Villa;
use crate::domain::villa;

/// Image of a [`Villa`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Image {
    /// ID of this [`Image`].
    pub id: Id,

    /// ID of the [`Villa`] this [`Image`] belongs to.
    pub villa_id: villa::Id,

    /// [`Url`] this [`Image`] is served from.
    pub url: Url,

    /// Title of this [`Image`], if any.
    pub title: Option<String>,

    /// Alternative text of this [`Image`], if any.
    pub alt_text: Option<String>,

    /// Position of this [`Image`] in a gallery.
    pub order: u16,

    /// Indicator whether this [`Image`] is explicitly chosen as a cover.
    pub is_cover: bool,
}

impl Image {
    /// Picks the cover out of the provided [`Image`]s.
    ///
    /// The one explicitly flagged as a cover wins, otherwise the first one by
    /// its order is taken.
    #[must_use]
    pub fn cover(images: &[Self]) -> Option<&Self> {
        images
            .iter()
            .find(|i| i.is_cover)
            .or_else(|| images.iter().min_by_key(|i| i.order))
    }
}

/// ID of an [`Image`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
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

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

/// URL of an [`Image`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, Hash, Into, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Url(String);

#[cfg(test)]
mod spec {
    use crate::domain::villa;

    use super::{Id, Image};

    fn image(order: u16, is_cover: bool) -> Image {
        Image {
            id: Id::new(),
            villa_id: villa::Id::new(),
            url: format!("https://cdn.example.com/{order}.jpg").into(),
            title: None,
            alt_text: None,
            order,
            is_cover,
        }
    }

    #[test]
    fn flagged_cover_wins() {
        let images = [image(0, false), image(3, true), image(1, false)];

        assert_eq!(Image::cover(&images).map(|i| i.order), Some(3));
    }

    #[test]
    fn falls_back_to_first_by_order() {
        let images = [image(2, false), image(1, false), image(5, false)];

        assert_eq!(Image::cover(&images).map(|i| i.order), Some(1));
        assert!(Image::cover(&[]).is_none());
    }
}
