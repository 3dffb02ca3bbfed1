use chrono::{SecondsFormat, SubsecRound, Utc};
use rusqlite::params;
use uuid::Uuid;

use contactform_shared::{ContactRecord, Field, NewContact};

use crate::database::Database;
use crate::error::Result;

impl Database {
    /// Insert a validated contact, assigning its id and timestamps.
    ///
    /// Every call creates a new row; identical contacts are not merged.
    pub fn insert_contact(&self, contact: NewContact) -> Result<ContactRecord> {
        let id = Uuid::new_v4();
        // Stored with millisecond precision, so stamp with the same precision.
        let now = Utc::now().trunc_subsecs(3);
        let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);

        self.conn().execute(
            "INSERT INTO contacts
                 (id, name, number, email, address, state, city, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                id.to_string(),
                contact.get(Field::Name),
                contact.get(Field::Number),
                contact.get(Field::Email),
                contact.get(Field::Address),
                contact.get(Field::State),
                contact.get(Field::City),
                stamp,
                stamp,
            ],
        )?;

        Ok(contact.into_record(id, now))
    }
}

/// Read-back queries. The service itself only ever inserts; these exist so
/// tests here and in dependent crates can inspect what was written.
#[cfg(any(test, feature = "test-util"))]
mod read {
    use chrono::{DateTime, Utc};
    use rusqlite::params;
    use uuid::Uuid;

    use contactform_shared::ContactRecord;

    use crate::database::Database;
    use crate::error::{Result, StoreError};

    impl Database {
        pub fn get_contact(&self, id: Uuid) -> Result<ContactRecord> {
            self.conn()
                .query_row(
                    "SELECT id, name, number, email, address, state, city, created_at, updated_at
                     FROM contacts WHERE id = ?1",
                    params![id.to_string()],
                    row_to_contact,
                )
                .map_err(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                    other => StoreError::Sqlite(other),
                })
        }

        pub fn count_contacts(&self) -> Result<u64> {
            let n: i64 = self
                .conn()
                .query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
            Ok(n as u64)
        }
    }

    fn row_to_contact(row: &rusqlite::Row<'_>) -> rusqlite::Result<ContactRecord> {
        let id_str: String = row.get(0)?;
        let created_str: String = row.get(7)?;
        let updated_str: String = row.get(8)?;

        let id = Uuid::parse_str(&id_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(ContactRecord {
            id,
            name: row.get(1)?,
            number: row.get(2)?,
            email: row.get(3)?,
            address: row.get(4)?,
            state: row.get(5)?,
            city: row.get(6)?,
            created_at: parse_timestamp(7, &created_str)?,
            updated_at: parse_timestamp(8, &updated_str)?,
        })
    }

    fn parse_timestamp(idx: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
            })
    }
}
