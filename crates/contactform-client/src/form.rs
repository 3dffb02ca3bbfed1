//! Form state and the submit cycle.
//!
//! [`ContactFormController`] owns the field values, the status line and the
//! in-flight flag. At most one submission is outstanding at a time; the flag
//! is cleared by a guard when the request settles, including when the
//! submit future is dropped before it completes.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use contactform_shared::constants::{MSG_FILL_ALL_DETAILS, MSG_SUBMIT_SUCCESS};
use contactform_shared::{ContactError, ContactForm, ContactRecord, Field};

use crate::api::ContactApi;

/// The status line shown above the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Error(String),
    Success(String),
}

impl SubmissionStatus {
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Error(m) | Self::Success(m) => Some(m),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub values: ContactForm,
    pub status: SubmissionStatus,
    pub in_flight: bool,
}

/// What a call to [`ContactFormController::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server stored the contact.
    Submitted(ContactRecord),
    /// A field was blank; no request was made.
    Incomplete,
    /// The request was made and failed; carries the message shown.
    Failed(String),
    /// Another submission was still pending; nothing was done.
    AlreadyInFlight,
}

pub struct ContactFormController<A> {
    api: Arc<A>,
    state: Arc<Mutex<FormState>>,
}

impl<A> Clone for ContactFormController<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
        }
    }
}

impl<A> std::fmt::Debug for ContactFormController<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactFormController")
            .field("state", &*lock(&self.state))
            .finish_non_exhaustive()
    }
}

/// Clears the in-flight flag when dropped.
struct InFlightGuard<'a> {
    state: &'a Mutex<FormState>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).in_flight = false;
    }
}

fn lock(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<A: ContactApi> ContactFormController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api: Arc::new(api),
            state: Arc::new(Mutex::new(FormState::default())),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn snapshot(&self) -> FormState {
        lock(&self.state).clone()
    }

    /// Replace one field's value. No validation happens here.
    pub fn change(&self, field: Field, value: impl Into<String>) {
        lock(&self.state).values.set(field, value);
    }

    /// Like [`Self::change`], addressing the field by its wire name.
    pub fn change_by_name(&self, name: &str, value: impl Into<String>) -> Result<(), ContactError> {
        let field: Field = name.parse()?;
        self.change(field, value);
        Ok(())
    }

    /// Whether the submit action is currently enabled.
    pub fn can_submit(&self) -> bool {
        !lock(&self.state).in_flight
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let payload = {
            let mut state = lock(&self.state);
            if state.in_flight {
                return SubmitOutcome::AlreadyInFlight;
            }

            state.status = SubmissionStatus::Idle;

            if !state.values.is_complete() {
                state.status = SubmissionStatus::Error(MSG_FILL_ALL_DETAILS.to_string());
                return SubmitOutcome::Incomplete;
            }

            state.in_flight = true;
            state.values.clone()
        };

        let _guard = InFlightGuard { state: &self.state };

        match self.api.create_contact(&payload).await {
            Ok(record) => {
                info!(id = %record.id, "Form submitted");
                let mut state = lock(&self.state);
                state.status = SubmissionStatus::Success(MSG_SUBMIT_SUCCESS.to_string());
                state.values = ContactForm::default();
                SubmitOutcome::Submitted(record)
            }
            Err(e) => {
                warn!(error = %e, "Error submitting form");
                let message = e.user_message();
                lock(&self.state).status = SubmissionStatus::Error(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}
