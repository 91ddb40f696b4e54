//! [`Command`] for submitting a new [`ContactMessage`].

use common::{operations::Insert, DateTime, Locale};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{contact, ContactMessage},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for submitting a new [`ContactMessage`].
///
/// Fields are raw user input validated on execution.
#[derive(Clone, Debug)]
pub struct SubmitContactMessage {
    /// [`contact::Name`] of the sender.
    pub name: String,

    /// [`contact::Email`] of the sender.
    pub email: String,

    /// [`contact::Phone`] of the sender, if any.
    ///
    /// Blank value is treated as absent.
    pub phone: Option<String>,

    /// [`contact::Subject`] of the message.
    pub subject: String,

    /// [`contact::Body`] of the message.
    pub message: String,

    /// [`Locale`] the message was sent from.
    pub locale: Locale,
}

impl<Db> Command<SubmitContactMessage> for Service<Db>
where
    Db: Database<Insert<ContactMessage>, Err = Traced<database::Error>>,
{
    type Ok = ContactMessage;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SubmitContactMessage,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SubmitContactMessage {
            name,
            email,
            phone,
            subject,
            message,
            locale,
        } = cmd;

        let name = contact::Name::new(name)
            .ok_or_else(|| tracerr::new!(E::InvalidName))?;
        let email = contact::Email::new(email)
            .ok_or_else(|| tracerr::new!(E::InvalidEmail))?;
        let phone = phone
            .filter(|p| !p.trim().is_empty())
            .map(|p| {
                contact::Phone::new(p)
                    .ok_or_else(|| tracerr::new!(E::InvalidPhone))
            })
            .transpose()?;
        let subject = contact::Subject::new(subject)
            .ok_or_else(|| tracerr::new!(E::InvalidSubject))?;
        let body = contact::Body::new(message)
            .ok_or_else(|| tracerr::new!(E::InvalidMessage))?;

        let message = ContactMessage {
            id: contact::Id::new(),
            name,
            email,
            phone,
            subject,
            body,
            locale,
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(message.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        log::info!("`ContactMessage({})` received", message.id);

        Ok(message)
    }
}

/// Error of [`SubmitContactMessage`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Provided [`contact::Name`] is invalid.
    #[display("Invalid `contact::Name`")]
    InvalidName,

    /// Provided [`contact::Email`] is invalid.
    #[display("Invalid `contact::Email`")]
    InvalidEmail,

    /// Provided [`contact::Phone`] is invalid.
    #[display("Invalid `contact::Phone`")]
    InvalidPhone,

    /// Provided [`contact::Subject`] is invalid.
    #[display("Invalid `contact::Subject`")]
    InvalidSubject,

    /// Provided [`contact::Body`] is invalid.
    #[display("Invalid `contact::Body`")]
    InvalidMessage,
}
