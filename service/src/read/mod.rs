//! Read entities definitions.

pub mod region;
pub mod tag;
pub mod villa;
