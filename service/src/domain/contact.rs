//! Contact [`Message`] definitions.

use std::sync::LazyLock;

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf, Locale};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message left by a visitor via the contact form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Message {
    /// ID of this [`Message`].
    pub id: Id,

    /// [`Name`] of the sender.
    pub name: Name,

    /// [`Email`] to reply to.
    pub email: Email,

    /// [`Phone`] of the sender, if provided.
    pub phone: Option<Phone>,

    /// [`Subject`] of this [`Message`].
    pub subject: Subject,

    /// [`Body`] of this [`Message`].
    pub body: Body,

    /// [`Locale`] the sender used the site in.
    pub locale: Locale,

    /// [`DateTime`] when this [`Message`] was received.
    pub created_at: CreationDateTime,
}

/// ID of a [`Message`].
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

/// Defines a trimmed non-empty text field of a [`Message`] limited by the
/// provided number of characters.
macro_rules! define_text {
    ($(#[doc = $doc:literal])* $name:ident, $max:literal) => {
        $(#[doc = $doc])*
        #[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
        #[as_ref(str, String)]
        #[cfg_attr(
            feature = "postgres",
            derive(FromSql, ToSql),
            postgres(transparent)
        )]
        pub struct $name(String);

        impl $name {
            /// Maximum number of characters.
            pub const MAX_LEN: usize = $max;

            #[doc = concat!("Creates a new [`", stringify!($name), "`] out of \
                             the given `text` trimming it, if it's valid.")]
            #[must_use]
            pub fn new(text: impl AsRef<str>) -> Option<Self> {
                let text = text.as_ref().trim();
                let len = text.chars().count();
                (len > 0 && len <= Self::MAX_LEN)
                    .then(|| Self(text.to_owned()))
            }
        }

        impl FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s).ok_or(concat!("invalid `", stringify!($name), "`"))
            }
        }
    };
}

define_text! {
    /// Name of a [`Message`] sender.
    Name, 128
}

define_text! {
    /// Subject of a [`Message`].
    Subject, 256
}

define_text! {
    /// Text of a [`Message`].
    Body, 4096
}

/// Email address of a [`Message`] sender.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl AsRef<str>) -> Option<Self> {
        let address = address.as_ref().trim();
        Self::check(address).then(|| Self(address.to_owned()))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(
                "^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+\
                 @[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\
                 (?:\\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
            )
            .expect("valid regex")
        });

        let address = address.as_ref();
        address.len() <= 254 && REGEX.is_match(address)
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Phone number of a [`Message`] sender.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl AsRef<str>) -> Option<Self> {
        let number = number.as_ref().trim();
        Self::check(number).then(|| Self(number.to_owned()))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\+?[0-9][0-9 ()-]{5,22}[0-9]$").expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// [`DateTime`] when a [`Message`] was received.
pub type CreationDateTime = DateTimeOf<(Message, unit::Creation)>;
