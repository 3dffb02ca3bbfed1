//! Database connection management.
//!
//! The [`Database`] struct owns a [`rusqlite::Connection`] and guarantees that
//! migrations are run before any other operation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use rusqlite::Connection;

use crate::error::{Result, StoreError};
use crate::migrations;

/// Where a database lives, parsed from a connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// Private in-memory database, gone when the handle is dropped.
    Memory,
    /// A database file on disk.
    File(PathBuf),
}

impl StoreLocation {
    /// Parse a connection string.
    ///
    /// Accepted forms:
    /// - `sqlite::memory:` or `:memory:`
    /// - `sqlite://<path>` / `sqlite:<path>`
    /// - a bare filesystem path
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(StoreError::InvalidUrl("empty connection string".into()));
        }

        if url == ":memory:" || url == "sqlite::memory:" {
            return Ok(Self::Memory);
        }

        if let Some(rest) = url.strip_prefix("sqlite:") {
            let path = rest.strip_prefix("//").unwrap_or(rest);
            if path.is_empty() {
                return Err(StoreError::InvalidUrl(url.to_string()));
            }
            return Ok(Self::File(PathBuf::from(path)));
        }

        // Anything else with a scheme (mongodb://, postgres://, ...) is not ours.
        if url.contains("://") {
            return Err(StoreError::InvalidUrl(url.to_string()));
        }

        Ok(Self::File(PathBuf::from(url)))
    }
}

/// Wrapper around a [`rusqlite::Connection`].
pub struct Database {
    conn: Connection,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("path", &self.path())
            .finish()
    }
}

impl Database {
    /// Open the database named by a connection string.
    pub fn connect(url: &str) -> Result<Self> {
        match StoreLocation::parse(url)? {
            StoreLocation::Memory => Self::open_in_memory(),
            StoreLocation::File(path) => Self::open_at(&path),
        }
    }

    /// Open (or create) the default application database.
    ///
    /// The database file is placed in the platform-appropriate data directory:
    /// - Linux:   `~/.local/share/contactform/contactform.db`
    /// - macOS:   `~/Library/Application Support/com.contactform.contactform/contactform.db`
    /// - Windows: `{FOLDERID_RoamingAppData}\contactform\contactform\data\contactform.db`
    pub fn open_default() -> Result<Self> {
        let project_dirs = ProjectDirs::from("com", "contactform", "contactform")
            .ok_or(StoreError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Self::open_at(&data_dir.join("contactform.db"))
    }

    /// Open (or create) a database at an explicit path.
    ///
    /// The parent directory must already exist.
    pub fn open_at(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "opening database");

        let conn = Connection::open(path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.busy_timeout(Duration::from_secs(5))?;

        Self::init(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        migrations::run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Return a reference to the underlying `rusqlite::Connection`.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn
            .path()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        let db = Database::open_at(&path).expect("should open");
        assert!(db.path().is_some());
        assert!(path.exists());
    }

    #[test]
    fn connect_accepts_sqlite_urls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.db");

        let db = Database::connect(&format!("sqlite://{}", path.display())).unwrap();
        assert!(db.path().is_some());

        let mem = Database::connect("sqlite::memory:").unwrap();
        assert!(mem.path().is_none());
    }

    #[test]
    fn connect_fails_when_directory_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("contacts.db");

        let err = Database::connect(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, StoreError::Sqlite(_)));
    }

    #[test]
    fn parse_locations() {
        assert_eq!(StoreLocation::parse(":memory:").unwrap(), StoreLocation::Memory);
        assert_eq!(
            StoreLocation::parse("sqlite:data/c.db").unwrap(),
            StoreLocation::File(PathBuf::from("data/c.db"))
        );
        assert_eq!(
            StoreLocation::parse("sqlite:///var/lib/c.db").unwrap(),
            StoreLocation::File(PathBuf::from("/var/lib/c.db"))
        );
        assert_eq!(
            StoreLocation::parse("./c.db").unwrap(),
            StoreLocation::File(PathBuf::from("./c.db"))
        );
        assert!(matches!(
            StoreLocation::parse("mongodb://localhost:27017/contacts"),
            Err(StoreError::InvalidUrl(_))
        ));
        assert!(matches!(StoreLocation::parse("  "), Err(StoreError::InvalidUrl(_))));
    }
}
