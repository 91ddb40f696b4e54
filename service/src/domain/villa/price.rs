//! [`SeasonalPrice`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf, Money};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Villa;
use crate::domain::villa;

/// Price of a [`Villa`] scoped to some season.
///
/// Prices never affect availability, they're only displayed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SeasonalPrice {
    /// ID of this [`SeasonalPrice`].
    pub id: Id,

    /// ID of the [`Villa`] this [`SeasonalPrice`] applies to.
    pub villa_id: villa::Id,

    /// Name of the season, if any.
    pub name: Option<String>,

    /// First day of the season.
    pub starts_at: DayDateTime,

    /// Last day of the season.
    pub ends_at: DayDateTime,

    /// Price of a single night.
    pub nightly_price: Money,

    /// Price of a whole week, if offered.
    pub weekly_price: Option<Money>,

    /// Indicator whether this [`SeasonalPrice`] is currently offered.
    pub is_active: bool,
}

impl SeasonalPrice {
    /// Returns the minimum nightly price among the active
    /// [`SeasonalPrice`]s, which is the "starting from" price of a [`Villa`].
    #[must_use]
    pub fn min_nightly<'a>(
        prices: impl IntoIterator<Item = &'a Self>,
    ) -> Option<Money> {
        prices
            .into_iter()
            .filter(|p| p.is_active)
            .map(|p| p.nightly_price)
            .min_by(|a, b| a.amount.cmp(&b.amount))
    }
}

/// ID of a [`SeasonalPrice`].
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

/// [`DateTime`] of a day bounding a [`SeasonalPrice`].
pub type DayDateTime = DateTimeOf<(SeasonalPrice, unit::Day)>;
