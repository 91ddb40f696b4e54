//! [`Tag`]-related read definitions.

use derive_more::{From, Into};

use crate::domain::Tag;
#[cfg(doc)]
use crate::domain::Villa;

/// Number of [`Villa`]s a [`Tag`] is associated with.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct UsageCount(u64);

/// [`Tag`] along with its [`UsageCount`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithUsage {
    /// The [`Tag`] itself.
    pub tag: Tag,

    /// [`UsageCount`] of the [`Tag`].
    pub usage: UsageCount,
}
