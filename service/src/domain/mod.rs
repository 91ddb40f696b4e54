//! Domain definitions.

pub mod calendar;
pub mod contact;
pub mod region;
pub mod tag;
pub mod villa;

pub use self::{
    calendar::Event as CalendarEvent, contact::Message as ContactMessage,
    region::Region, tag::Tag, villa::Villa,
};
