//! v001 -- Initial schema creation.
//!
//! Creates the `contacts` collection.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Contacts
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS contacts (
    id         TEXT PRIMARY KEY NOT NULL,   -- UUID v4
    name       TEXT NOT NULL CHECK (length(name) > 0),
    number     TEXT NOT NULL CHECK (length(number) > 0),
    email      TEXT NOT NULL CHECK (length(email) > 0),
    address    TEXT NOT NULL CHECK (length(address) > 0),
    state      TEXT NOT NULL CHECK (length(state) > 0),
    city       TEXT NOT NULL CHECK (length(city) > 0),
    created_at TEXT NOT NULL,               -- RFC 3339
    updated_at TEXT NOT NULL                -- RFC 3339
);

CREATE INDEX IF NOT EXISTS idx_contacts_created_at
    ON contacts(created_at);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
