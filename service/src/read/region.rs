//! [`Region`]-related read definitions.

use crate::domain::Region;

/// Main [`Region`] along with its sub-regions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Branch {
    /// Main [`Region`].
    pub region: Region,

    /// Sub-regions of the main [`Region`].
    pub sub_regions: Vec<Region>,
}

/// Hierarchy of [`Region`]s offered in filters.
pub type Tree = Vec<Branch>;
