//! [`ContactMessage`]-related [`Database`] implementations.

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::{contact, ContactMessage},
    infra::{
        database::{self, postgres::Connection as _, Postgres},
        Database,
    },
};

impl Database<Insert<ContactMessage>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(message): Insert<ContactMessage>,
    ) -> Result<Self::Ok, Self::Err> {
        let contact::Message {
            id,
            name,
            email,
            phone,
            subject,
            body,
            locale,
            created_at,
        } = message;
        let locale: &str = locale.as_ref();

        const SQL: &str = "\
            INSERT INTO contact_messages (\
                id, name, email, phone, subject, message, locale, created_at\
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::VARCHAR, $6::TEXT, $7::VARCHAR, $8::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &email,
                &phone,
                &subject,
                &body,
                &locale,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
