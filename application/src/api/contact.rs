//! Contact form definitions.

use axum::{extract::rejection::JsonRejection, Json};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, submit_contact_message::ExecutionError},
    domain::contact,
    Command as _,
};

use crate::{define_error, AsError, Context, Error};

/// Contact form as submitted by a visitor.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// Name of the sender.
    pub name: String,

    /// Email address of the sender.
    pub email: String,

    /// Phone number of the sender.
    #[serde(default)]
    pub phone: Option<String>,

    /// Subject of the message.
    pub subject: String,

    /// Text of the message.
    pub message: String,
}

/// Acknowledgement of an accepted contact form.
#[derive(Clone, Debug, Serialize)]
pub struct Submitted {
    /// ID of the stored message.
    pub id: contact::Id,

    /// Localized confirmation shown to the sender.
    pub message: String,
}

/// Accepts the contact form [`Input`] sent from the contact page.
///
/// # Errors
///
/// Possible error codes:
/// - `BAD_REQUEST` - the body is not a JSON [`Input`];
/// - `INVALID_NAME`, `INVALID_EMAIL`, `INVALID_PHONE`, `INVALID_SUBJECT`,
///   `INVALID_MESSAGE` - the respective field is invalid.
#[tracing::instrument(skip_all, fields(locale = %ctx.locale()))]
pub async fn submit(
    ctx: Context,
    input: Result<Json<Input>, JsonRejection>,
) -> Result<(StatusCode, Json<Submitted>), Error> {
    let Json(input) = input.map_err(AsError::into_error)?;

    let message = ctx
        .service()
        .execute(command::SubmitContactMessage {
            name: input.name,
            email: input.email,
            phone: input.phone,
            subject: input.subject,
            message: input.message,
            locale: ctx.locale(),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((
        StatusCode::CREATED,
        Json(Submitted {
            id: message.id,
            message: ctx
                .dictionary()
                .resolve("contact.success", "Thank you! We got your message.")
                .to_owned(),
        }),
    ))
}

impl AsError for ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INVALID_NAME"]
                #[status = BAD_REQUEST]
                #[message = "Name must be 1 to 128 characters long"]
                InvalidName,

                #[code = "INVALID_EMAIL"]
                #[status = BAD_REQUEST]
                #[message = "Email address is malformed"]
                InvalidEmail,

                #[code = "INVALID_PHONE"]
                #[status = BAD_REQUEST]
                #[message = "Phone number is malformed"]
                InvalidPhone,

                #[code = "INVALID_SUBJECT"]
                #[status = BAD_REQUEST]
                #[message = "Subject must be 1 to 256 characters long"]
                InvalidSubject,

                #[code = "INVALID_MESSAGE"]
                #[status = BAD_REQUEST]
                #[message = "Message must be 1 to 4096 characters long"]
                InvalidMessage,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvalidName => Some(Error::InvalidName.into()),
            Self::InvalidEmail => Some(Error::InvalidEmail.into()),
            Self::InvalidPhone => Some(Error::InvalidPhone.into()),
            Self::InvalidSubject => Some(Error::InvalidSubject.into()),
            Self::InvalidMessage => Some(Error::InvalidMessage.into()),
        }
    }
}
