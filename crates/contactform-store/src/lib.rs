//! # contactform-store
//!
//! Persistent storage for contact submissions, backed by SQLite.
//!
//! The crate exposes a synchronous `Database` handle that wraps a
//! `rusqlite::Connection`. Opening a handle runs the schema migrations, so a
//! handle that exists is ready to accept writes.

pub mod contacts;
pub mod database;
pub mod migrations;

mod error;

pub use database::{Database, StoreLocation};
pub use error::{Result, StoreError};
