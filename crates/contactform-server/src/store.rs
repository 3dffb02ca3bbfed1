//! Store handle injected into the HTTP layer.
//!
//! The handle is built once in `main`, before the listener binds. If the
//! database could not be opened it is kept in an unavailable state instead
//! (when the init policy allows it), and every write reports that failure.

use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{error, info};

use contactform_shared::{ContactRecord, NewContact};
use contactform_store::{Database, StoreError};

use crate::error::ServerError;

/// Behaviour when the store cannot be opened at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreInitPolicy {
    /// Keep serving; every write fails until the process is restarted.
    Degrade,
    /// Exit with an error.
    FailFast,
}

impl FromStr for StoreInitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degrade" => Ok(Self::Degrade),
            "fail-fast" | "fail_fast" | "failfast" => Ok(Self::FailFast),
            other => Err(format!("expected `degrade` or `fail-fast`, got `{other}`")),
        }
    }
}

enum Backend {
    Ready(Arc<Mutex<Database>>),
    Unavailable(String),
}

pub struct ContactStore {
    backend: Backend,
}

impl std::fmt::Debug for ContactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactStore")
            .field("ready", &self.is_ready())
            .finish()
    }
}

impl ContactStore {
    pub fn ready(db: Database) -> Self {
        Self {
            backend: Backend::Ready(Arc::new(Mutex::new(db))),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            backend: Backend::Unavailable(reason.into()),
        }
    }

    /// Open the configured database and apply the init policy on failure.
    ///
    /// `None` selects the platform default location.
    pub fn open(url: Option<&str>, policy: StoreInitPolicy) -> Result<Self, StoreError> {
        let opened = match url {
            Some(url) => Database::connect(url),
            None => Database::open_default(),
        };

        match opened {
            Ok(db) => {
                info!(path = ?db.path(), "Database connected");
                Ok(Self::ready(db))
            }
            Err(e) => {
                error!(error = %e, ?policy, "Database connection error");
                match policy {
                    StoreInitPolicy::FailFast => Err(e),
                    StoreInitPolicy::Degrade => Ok(Self::unavailable(e.to_string())),
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.backend, Backend::Ready(_))
    }

    /// Persist a validated contact.
    ///
    /// SQLite calls block, so the write runs on the blocking pool and the
    /// connection lock is never held across an `.await`.
    pub async fn insert(&self, contact: NewContact) -> Result<ContactRecord, ServerError> {
        let db = match &self.backend {
            Backend::Ready(db) => Arc::clone(db),
            Backend::Unavailable(reason) => {
                return Err(ServerError::StoreUnavailable(reason.clone()))
            }
        };

        let record = tokio::task::spawn_blocking(move || lock(&db).insert_contact(contact))
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))??;

        Ok(record)
    }

    /// Run a closure against the open database, if there is one.
    #[cfg(test)]
    pub fn with_db<T>(&self, f: impl FnOnce(&Database) -> T) -> Option<T> {
        match &self.backend {
            Backend::Ready(db) => Some(f(&lock(db))),
            Backend::Unavailable(_) => None,
        }
    }
}

// A panic mid-insert leaves no partial state behind (each insert is a single
// statement), so a poisoned lock is still safe to reuse.
fn lock(db: &Mutex<Database>) -> MutexGuard<'_, Database> {
    db.lock().unwrap_or_else(PoisonError::into_inner)
}
