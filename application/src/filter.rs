//! [`FilterParams`] of the villa listing and their URL query codec.

use std::{
    collections::HashMap,
    num::{NonZeroU16, NonZeroU32},
};

use common::{pagination::Arguments, Date};
use itertools::Itertools as _;
use serde::Serialize;
use service::{
    domain::{region, tag},
    query::villas,
};
use url::form_urlencoded;

use crate::i18n::Dictionary;

/// Page size used when none is requested.
pub const DEFAULT_LIMIT: NonZeroU32 = match NonZeroU32::new(6) {
    Some(limit) => limit,
    None => panic!("zero limit"),
};

/// Maximum page size the villa listing is queried with.
pub const MAX_LIMIT: NonZeroU32 = match NonZeroU32::new(100) {
    Some(limit) => limit,
    None => panic!("zero limit"),
};

/// Filters of the villa listing.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct FilterParams {
    /// Day of a check-in.
    pub check_in: Option<Date>,

    /// Day of a check-out.
    pub check_out: Option<Date>,

    /// Number of guests.
    pub guests: Option<NonZeroU16>,

    /// ID of the main region.
    pub region_id: Option<region::Id>,

    /// ID of the sub-region.
    pub sub_region_id: Option<region::Id>,

    /// IDs of the required tags, without duplicates.
    pub tag_ids: Vec<tag::Id>,

    /// Requested page number.
    pub page: NonZeroU32,

    /// Requested page size.
    ///
    /// Queries are capped with [`MAX_LIMIT`] when converted into a
    /// [`villas::List`].
    pub limit: NonZeroU32,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            check_in: None,
            check_out: None,
            guests: None,
            region_id: None,
            sub_region_id: None,
            tag_ids: Vec::new(),
            page: Arguments::FIRST_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl FilterParams {
    /// Decodes [`FilterParams`] out of the provided URL `query`.
    ///
    /// Never fails: malformed values are treated as absent ones.
    #[must_use]
    pub fn decode(query: &str) -> Self {
        let mut params = HashMap::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            _ = params.entry(key).or_insert(value);
        }
        let get = |key: &str| {
            params
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        let positive = |key: &str| {
            get(key)
                .and_then(parse_int)
                .and_then(|n| u32::try_from(n).ok())
                .and_then(NonZeroU32::new)
        };

        Self {
            check_in: get("checkIn").and_then(Date::parse),
            check_out: get("checkOut").and_then(Date::parse),
            guests: positive("guests")
                .and_then(|g| u16::try_from(g.get()).ok())
                .and_then(NonZeroU16::new),
            region_id: get("regionId").and_then(region::Id::new),
            sub_region_id: get("subRegionId").and_then(region::Id::new),
            tag_ids: get("tagIds")
                .map(|ids| {
                    ids.split(',')
                        .filter_map(|id| tag::Id::new(id.trim()))
                        .unique()
                        .collect()
                })
                .unwrap_or_default(),
            page: positive("page").unwrap_or(Arguments::FIRST_PAGE),
            limit: positive("limit").unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Encodes these [`FilterParams`] into a URL query, omitting the absent
    /// values.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(date) = self.check_in {
            _ = query.append_pair("checkIn", &date.to_string());
        }
        if let Some(date) = self.check_out {
            _ = query.append_pair("checkOut", &date.to_string());
        }
        if let Some(guests) = self.guests {
            _ = query.append_pair("guests", &guests.to_string());
        }
        if let Some(id) = &self.region_id {
            _ = query.append_pair("regionId", id.as_ref());
        }
        if let Some(id) = &self.sub_region_id {
            _ = query.append_pair("subRegionId", id.as_ref());
        }
        if !self.tag_ids.is_empty() {
            _ = query.append_pair("tagIds", &self.tag_ids.iter().join(","));
        }
        _ = query.append_pair("page", &self.page.to_string());
        _ = query.append_pair("limit", &self.limit.to_string());
        query.finish()
    }

    /// Removes the filter of the provided [`FilterKey`] along with the ones
    /// depending on it, and returns to the first page.
    ///
    /// Removing [`FilterKey::Page`] or [`FilterKey::Limit`] resets it to the
    /// default.
    #[must_use]
    pub fn remove(mut self, key: FilterKey) -> Self {
        match key {
            FilterKey::CheckIn | FilterKey::CheckOut => {
                self.check_in = None;
                self.check_out = None;
            }
            FilterKey::Guests => self.guests = None,
            FilterKey::RegionId => {
                self.region_id = None;
                self.sub_region_id = None;
            }
            FilterKey::SubRegionId => self.sub_region_id = None,
            FilterKey::TagIds => self.tag_ids.clear(),
            FilterKey::Page => {}
            FilterKey::Limit => self.limit = DEFAULT_LIMIT,
        }
        self.page = Arguments::FIRST_PAGE;
        self
    }

    /// Returns the default [`FilterParams`] having nothing filtered.
    #[must_use]
    pub fn clear() -> Self {
        Self::default()
    }

    /// Lists the currently applied filters labeled with the provided
    /// [`Dictionary`].
    ///
    /// The date range is listed once, under [`FilterKey::CheckIn`], and only
    /// when both of its ends are set.
    #[must_use]
    pub fn active(&self, dict: &Dictionary) -> Vec<ActiveFilter> {
        let mut active = Vec::new();
        let mut push = |key, path, default, value| {
            active.push(ActiveFilter {
                key,
                label: dict.resolve(path, default).to_owned(),
                value,
            });
        };

        if let (Some(from), Some(to)) = (self.check_in, self.check_out) {
            push(
                FilterKey::CheckIn,
                "filters.dateRange",
                "Dates",
                format!("{from} - {to}"),
            );
        }
        if let Some(guests) = self.guests {
            push(
                FilterKey::Guests,
                "filters.guests",
                "Guests",
                dict.format(
                    "filters.guestsValue",
                    "{count} guests",
                    &[("count", &guests)],
                ),
            );
        }
        if let Some(id) = &self.region_id {
            push(
                FilterKey::RegionId,
                "filters.region",
                "Region",
                id.to_string(),
            );
        }
        if let Some(id) = &self.sub_region_id {
            push(
                FilterKey::SubRegionId,
                "filters.subRegion",
                "Sub-region",
                id.to_string(),
            );
        }
        if !self.tag_ids.is_empty() {
            push(
                FilterKey::TagIds,
                "filters.tags",
                "Features",
                dict.format(
                    "filters.tagsValue",
                    "{count} selected",
                    &[("count", &self.tag_ids.len())],
                ),
            );
        }
        active
    }
}

impl From<FilterParams> for villas::List {
    fn from(params: FilterParams) -> Self {
        let FilterParams {
            check_in,
            check_out,
            guests,
            region_id,
            sub_region_id,
            tag_ids,
            page,
            limit,
        } = params;

        Self {
            check_in,
            check_out,
            guests: guests.map(NonZeroU16::get),
            region_id,
            sub_region_id,
            tag_ids,
            arguments: Arguments::new(page, limit.min(MAX_LIMIT)),
        }
    }
}

/// Key of a single filter in [`FilterParams`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKey {
    /// [`FilterParams::check_in`].
    CheckIn,

    /// [`FilterParams::check_out`].
    CheckOut,

    /// [`FilterParams::guests`].
    Guests,

    /// [`FilterParams::region_id`].
    RegionId,

    /// [`FilterParams::sub_region_id`].
    SubRegionId,

    /// [`FilterParams::tag_ids`].
    TagIds,

    /// [`FilterParams::page`].
    Page,

    /// [`FilterParams::limit`].
    Limit,
}

/// Filter currently applied to the villa listing.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ActiveFilter {
    /// [`FilterKey`] removing this filter.
    pub key: FilterKey,

    /// Localized label of this filter.
    pub label: String,

    /// Human-readable value of this filter.
    pub value: String,
}

/// Parses the leading integer of the provided string the way JavaScript's
/// `parseInt()` does: `"4abc"` is `4`, while `"abc"` is nothing.
fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let n = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -n } else { n })
}

#[cfg(test)]
mod spec {
    use std::num::{NonZeroU16, NonZeroU32};

    use common::Date;
    use service::{
        domain::{region, tag},
        query::villas,
    };

    use crate::i18n::Dictionary;

    use super::{
        parse_int, FilterKey, FilterParams, DEFAULT_LIMIT, MAX_LIMIT,
    };

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn nz(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn guests(n: u16) -> Option<NonZeroU16> {
        NonZeroU16::new(n)
    }

    fn full() -> FilterParams {
        FilterParams {
            check_in: Some(date("2025-07-01")),
            check_out: Some(date("2025-07-08")),
            guests: guests(4),
            region_id: Some(region::Id::new("kas").unwrap()),
            sub_region_id: Some(region::Id::new("kalkan").unwrap()),
            tag_ids: vec![
                tag::Id::new("pool").unwrap(),
                tag::Id::new("sea-view").unwrap(),
            ],
            page: nz(2),
            limit: nz(12),
        }
    }

    #[test]
    fn parses_ints_like_javascript() {
        assert_eq!(parse_int("4abc"), Some(4));
        assert_eq!(parse_int("  7"), Some(7));
        assert_eq!(parse_int("3.9"), Some(3));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("+5"), Some(5));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("99999999999999999999"), None);
    }

    #[test]
    fn decodes_absent_as_defaults() {
        assert_eq!(FilterParams::decode(""), FilterParams::default());

        let params = FilterParams::decode("");
        assert_eq!(params.page.get(), 1);
        assert_eq!(params.limit, DEFAULT_LIMIT);
        assert_eq!(params.limit.get(), 6);
    }

    #[test]
    fn decodes_all_fields() {
        let params = FilterParams::decode(
            "checkIn=2025-07-01&checkOut=2025-07-08T00:00:00.000Z&guests=4\
             &regionId=kas&subRegionId=kalkan&tagIds=pool%2Csea-view\
             &page=2&limit=12",
        );

        assert_eq!(params, full());
    }

    #[test]
    fn decodes_leniently() {
        let params = FilterParams::decode(
            "checkIn=yesterday&guests=4abc&regionId=&tagIds=pool,,pool, spa\
             &page=abc&limit=0",
        );

        assert_eq!(params.check_in, None);
        assert_eq!(params.guests, guests(4));
        assert_eq!(params.region_id, None);
        assert_eq!(
            params.tag_ids,
            [tag::Id::new("pool").unwrap(), tag::Id::new("spa").unwrap()],
        );
        assert_eq!(params.page.get(), 1);
        assert_eq!(params.limit, DEFAULT_LIMIT);

        assert_eq!(FilterParams::decode("guests=0").guests, None);
        assert_eq!(FilterParams::decode("guests=-2").guests, None);
        assert_eq!(FilterParams::decode("guests=abc").guests, None);
        assert_eq!(FilterParams::decode("page=-1").page.get(), 1);
        assert_eq!(FilterParams::decode("guests=70000").guests, None);
        assert_eq!(FilterParams::decode("limit=5000").limit.get(), 5000);
        assert_eq!(
            FilterParams::decode("guests=2&guests=5").guests,
            guests(2),
        );
    }

    #[test]
    fn encodes_only_defined_fields() {
        assert_eq!(FilterParams::default().encode(), "page=1&limit=6");
        assert_eq!(
            full().encode(),
            "checkIn=2025-07-01&checkOut=2025-07-08&guests=4&regionId=kas\
             &subRegionId=kalkan&tagIds=pool%2Csea-view&page=2&limit=12",
        );
    }

    #[test]
    fn decoding_restores_encoded() {
        let cases = [
            full(),
            FilterParams::default(),
            FilterParams {
                guests: guests(2),
                tag_ids: vec![tag::Id::new("pet-friendly").unwrap()],
                ..FilterParams::default()
            },
            FilterParams {
                check_in: Some(date("2024-12-30")),
                region_id: Some(region::Id::new("Fethiye Merkez").unwrap()),
                ..FilterParams::default()
            },
            FilterParams {
                guests: guests(1),
                page: nz(u32::MAX),
                limit: nz(500),
                ..FilterParams::default()
            },
            FilterParams {
                guests: guests(u16::MAX),
                limit: nz(1),
                ..FilterParams::default()
            },
            FilterParams {
                check_in: Some(date("2025-07-08")),
                check_out: Some(date("2025-07-01")),
                limit: MAX_LIMIT,
                ..FilterParams::default()
            },
        ];

        for params in cases {
            assert_eq!(FilterParams::decode(&params.encode()), params);
        }
    }

    #[test]
    fn removing_region_clears_sub_region() {
        let params = full().remove(FilterKey::RegionId);

        assert_eq!(params.region_id, None);
        assert_eq!(params.sub_region_id, None);
        assert_eq!(params.page.get(), 1);
        assert_eq!(params.guests, guests(4));
    }

    #[test]
    fn removing_date_clears_range() {
        for key in [FilterKey::CheckIn, FilterKey::CheckOut] {
            let params = full().remove(key);

            assert_eq!(params.check_in, None);
            assert_eq!(params.check_out, None);
            assert_eq!(params.page.get(), 1);
            assert_eq!(params.limit.get(), 12);
        }
    }

    #[test]
    fn removing_pagination_resets_it() {
        assert_eq!(full().remove(FilterKey::Page).page.get(), 1);

        let params = full().remove(FilterKey::Limit);
        assert_eq!(params.limit, DEFAULT_LIMIT);
        assert_eq!(params.tag_ids.len(), 2);
    }

    #[test]
    fn clears_everything() {
        assert_eq!(FilterParams::clear(), FilterParams::default());
    }

    #[test]
    fn lists_active_filters() {
        let dict = Dictionary::parse(
            r#"{"version": 1, "filters": {
                "dateRange": "Tarih",
                "guests": "Misafir",
                "guestsValue": "{count} kişi"
            }}"#,
        )
        .unwrap();

        let active = full().active(&dict);
        let keys = active.iter().map(|f| f.key).collect::<Vec<_>>();
        assert_eq!(
            keys,
            [
                FilterKey::CheckIn,
                FilterKey::Guests,
                FilterKey::RegionId,
                FilterKey::SubRegionId,
                FilterKey::TagIds,
            ],
        );
        assert_eq!(active[0].label, "Tarih");
        assert_eq!(active[0].value, "2025-07-01 - 2025-07-08");
        assert_eq!(active[1].value, "4 kişi");
        assert_eq!(active[2].label, "Region");
        assert_eq!(active[4].value, "2 selected");

        let half_range = FilterParams {
            check_in: Some(date("2025-07-01")),
            ..FilterParams::default()
        };
        assert!(half_range.active(&dict).is_empty());
    }

    #[test]
    fn converts_into_query() {
        let query = villas::List::from(full());

        assert_eq!(query.guests, Some(4));
        assert_eq!(query.tag_ids.len(), 2);
        assert_eq!(query.arguments.page().get(), 2);
        assert_eq!(query.arguments.offset(), 12);
    }

    #[test]
    fn caps_queried_page_size() {
        let params = FilterParams {
            page: nz(3),
            limit: nz(500),
            ..FilterParams::default()
        };

        let query = villas::List::from(params);

        assert_eq!(query.arguments.limit(), MAX_LIMIT);
        assert_eq!(query.arguments.offset(), 200);
    }
}
