//! Availability calendar definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Date, DateTimeOf};

#[cfg(doc)]
use crate::domain::Villa;
use crate::domain::villa;

/// UTC hour every calendar day of a [`Villa`] starts at.
pub const CHECK_IN_HOUR: u8 = 14;

/// Record of a single calendar day of a [`Villa`].
///
/// A [`Villa`] has at most one [`Event`] per day. A day without any [`Event`]
/// is considered available.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Event {
    /// ID of the [`Villa`] this [`Event`] belongs to.
    pub villa_id: villa::Id,

    /// Day this [`Event`] describes, at the [`CHECK_IN_HOUR`].
    pub date: EventDateTime,

    /// [`Status`] of the day.
    pub status: Status,
}

define_kind! {
    #[doc = "Status of a calendar day of a [`Villa`]."]
    enum Status {
        #[doc = "Day can be booked."]
        Available,

        #[doc = "Day is booked by somebody."]
        Reserved,

        #[doc = "Day is closed by the owner."]
        Blocked,
    }
}

/// [`DateTime`] of a calendar day.
pub type EventDateTime = DateTimeOf<(Event, unit::Day)>;

/// Returns the [`EventDateTime`] of the provided [`Date`] at the
/// [`CHECK_IN_HOUR`].
#[expect(clippy::missing_panics_doc, reason = "infallible")]
#[must_use]
pub fn check_in_at(date: Date) -> EventDateTime {
    date.at_utc_hour(CHECK_IN_HOUR).expect("valid hour")
}
