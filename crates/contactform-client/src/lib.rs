//! # contactform-client
//!
//! Form client for the contact submission service: form state with a
//! client-side completeness gate, an HTTP transport, and a terminal
//! rendering of the form.

pub mod api;
pub mod error;
pub mod form;
pub mod logging;
pub mod terminal;

pub use api::{ContactApi, HttpContactApi};
pub use error::ClientError;
pub use form::{ContactFormController, FormState, SubmissionStatus, SubmitOutcome};
pub use logging::{init_logging, Verbosity};
pub use terminal::Terminal;
