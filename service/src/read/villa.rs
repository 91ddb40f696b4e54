//! [`Villa`]-related read definitions.

use common::Money;

use crate::domain::{
    villa::{Image, SeasonalPrice},
    Tag, Villa,
};

/// [`Villa`] along with everything displayed next to it.
#[derive(Clone, Debug)]
pub struct Details {
    /// The [`Villa`] itself.
    pub villa: Villa,

    /// [`Image`]s of the [`Villa`] ordered for a gallery.
    pub images: Vec<Image>,

    /// [`SeasonalPrice`]s of the [`Villa`] ordered by their start.
    pub prices: Vec<SeasonalPrice>,

    /// [`Tag`]s of the [`Villa`] ordered by name.
    pub tags: Vec<Tag>,

    /// Minimum nightly price among the active [`SeasonalPrice`]s.
    pub min_nightly_price: Option<Money>,
}

impl Details {
    /// Returns the cover [`Image`] of the [`Villa`], if it has any.
    #[must_use]
    pub fn cover(&self) -> Option<&Image> {
        Image::cover(&self.images)
    }
}

pub mod list {
    //! [`Villa`] list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::{region, villa, Villa};

    define_pagination!(Node, Filter);

    /// Node in a [`Page`].
    pub type Node = Villa;

    /// Filter for [`Selector`] with predicates expressible directly in a
    /// store query.
    #[derive(Clone, Debug)]
    pub struct Filter {
        /// [`villa::Status`] of the [`Villa`]s.
        pub status: villa::Status,

        /// ID of the main region the [`Villa`]s are located in.
        pub region_id: Option<region::Id>,

        /// ID of the sub-region the [`Villa`]s are located in.
        pub sub_region_id: Option<region::Id>,

        /// Minimum capacity of the [`Villa`]s.
        pub min_guests: Option<u16>,

        /// IDs the [`Villa`]s must be among.
        ///
        /// [`Some`] empty list matches nothing.
        pub ids: Option<Vec<villa::Id>>,
    }

    impl Filter {
        /// Creates a new [`Filter`] matching all the [`Villa`]s of the
        /// provided [`villa::Status`].
        #[must_use]
        pub fn new(status: villa::Status) -> Self {
            Self {
                status,
                region_id: None,
                sub_region_id: None,
                min_guests: None,
                ids: None,
            }
        }

        /// Checks whether the provided [`Villa`] matches this [`Filter`].
        #[must_use]
        pub fn matches(&self, villa: &Villa) -> bool {
            villa.status == self.status
                && self
                    .region_id
                    .as_ref()
                    .map_or(true, |id| &villa.region_id == id)
                && self
                    .sub_region_id
                    .as_ref()
                    .map_or(true, |id| villa.sub_region_id.as_ref() == Some(id))
                && self.min_guests.map_or(true, |g| villa.max_guests >= g)
                && self.ids.as_ref().map_or(true, |ids| ids.contains(&villa.id))
        }
    }

    /// Total count of [`Villa`] list items.
    #[derive(
        Clone, Copy, Debug, Default, Eq, From, Hash, Into, Ord, PartialEq,
        PartialOrd,
    )]
    pub struct TotalCount(u64);
}
