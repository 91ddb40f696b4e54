//! [`Command`] definition.

pub mod submit_contact_message;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::submit_contact_message::SubmitContactMessage;
