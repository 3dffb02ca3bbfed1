//! # contactform-shared
//!
//! Types and rules shared by the form client and the submission service:
//! the field list, the wire payload, the persisted record shape, the
//! contact schema and the region list used by the state selector.

pub mod constants;
pub mod error;
pub mod regions;
pub mod schema;
pub mod types;

pub use error::{ContactError, FieldError};
pub use schema::{ContactDraft, NewContact};
pub use types::{ContactForm, ContactRecord, Field};
