//! Abstractions for offset pagination.

use std::num::NonZeroU32;

/// Pagination arguments: a 1-based page number and a page size.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Arguments {
    /// Number of the requested page, starting from `1`.
    page: NonZeroU32,

    /// Maximum number of items on a page.
    limit: NonZeroU32,
}

impl Arguments {
    /// Number of the first page.
    pub const FIRST_PAGE: NonZeroU32 = NonZeroU32::MIN;

    /// Creates new [`Arguments`].
    #[must_use]
    pub const fn new(page: NonZeroU32, limit: NonZeroU32) -> Self {
        Self { page, limit }
    }

    /// Creates new [`Arguments`] out of raw numbers.
    ///
    /// [`None`] is returned if any of the numbers is zero or doesn't fit.
    pub fn try_new<Num>(page: Num, limit: Num) -> Option<Self>
    where
        Num: TryInto<u32>,
    {
        Some(Self {
            page: NonZeroU32::new(page.try_into().ok()?)?,
            limit: NonZeroU32::new(limit.try_into().ok()?)?,
        })
    }

    /// Returns the requested page number.
    #[must_use]
    pub const fn page(&self) -> NonZeroU32 {
        self.page
    }

    /// Returns the requested page size.
    #[must_use]
    pub const fn limit(&self) -> NonZeroU32 {
        self.limit
    }

    /// Returns the number of items to skip before the requested page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.get() - 1) * u64::from(self.limit.get())
    }
}

/// Page of items fetched with some [`Arguments`], not yet knowing the total.
#[derive(Clone, Debug)]
pub struct Page<I> {
    /// Items on this [`Page`].
    pub items: Vec<I>,

    /// [`Arguments`] this [`Page`] was fetched with.
    pub arguments: Arguments,
}

impl<I> Page<I> {
    /// Creates a new [`Page`] out of the provided items.
    #[must_use]
    pub fn new(
        arguments: Arguments,
        items: impl IntoIterator<Item = I>,
    ) -> Self {
        Self {
            items: items.into_iter().collect(),
            arguments,
        }
    }

    /// Creates an empty [`Page`].
    #[must_use]
    pub fn empty(arguments: Arguments) -> Self {
        Self {
            items: Vec::new(),
            arguments,
        }
    }

    /// Attaches the `total` number of items to this [`Page`].
    #[must_use]
    pub fn with_total(self, total: u64) -> Paginated<I> {
        Paginated {
            info: Info::new(total, &self.arguments),
            items: self.items,
        }
    }

    /// Maps the items of this [`Page`].
    #[must_use]
    pub fn map<T>(self, f: impl FnMut(I) -> T) -> Page<T> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            arguments: self.arguments,
        }
    }
}

/// Pagination metadata of a [`Paginated`] list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct Info {
    /// Total number of items across all pages.
    pub total: u64,

    /// Number of the current page.
    pub page: u32,

    /// Page size.
    pub limit: u32,

    /// Total number of pages.
    pub total_pages: u64,
}

impl Info {
    /// Calculates new [`Info`] for the provided `total` and [`Arguments`].
    #[must_use]
    pub fn new(total: u64, arguments: &Arguments) -> Self {
        let limit = arguments.limit().get();
        Self {
            total,
            page: arguments.page().get(),
            limit,
            total_pages: total.div_ceil(u64::from(limit)),
        }
    }
}

/// Page of items along with its pagination [`Info`].
#[derive(Clone, Debug)]
pub struct Paginated<I> {
    /// Items on the current page.
    pub items: Vec<I>,

    /// Pagination [`Info`].
    pub info: Info,
}

/// Pagination selector.
#[derive(Clone, Debug)]
pub struct Selector<F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty) => {
        #[doc = "A [`Page`] of nodes."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "A [`Page`] along with its total."]
        pub type Paginated = $crate::pagination::Paginated<$node>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter>;
    };
}
