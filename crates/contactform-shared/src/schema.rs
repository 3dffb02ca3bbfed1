//! Contact schema: the server-side shape check applied before persisting.
//!
//! Every field is required and trimmed; `email` is lowercased as well.
//! Scalar JSON values are cast to text the way a document store would, so
//! `{"number": 12345}` is accepted as `"12345"`. There is no format
//! checking: any non-blank text is valid.

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{ContactError, FieldError};
use crate::types::{ContactForm, ContactRecord, Field};

/// A create-contact request body before validation.
///
/// Fields are kept as raw JSON so that absent, `null` and wrongly typed
/// values can all be reported against the field that carried them. A draft
/// is only ever built from a JSON object; see the `TryFrom<Value>` impl.
#[derive(Debug, Clone, Default)]
pub struct ContactDraft {
    pub name: Option<Value>,
    pub number: Option<Value>,
    pub email: Option<Value>,
    pub address: Option<Value>,
    pub state: Option<Value>,
    pub city: Option<Value>,
}

impl TryFrom<Value> for ContactDraft {
    type Error = ContactError;

    /// Pick the six fields out of a JSON object. Arrays and scalars are
    /// rejected outright rather than matched to fields by position.
    fn try_from(body: Value) -> Result<Self, Self::Error> {
        let mut map = match body {
            Value::Object(map) => map,
            other => return Err(ContactError::NotAnObject(json_kind(&other))),
        };

        let mut take = |field: Field| map.remove(field.as_str());
        Ok(Self {
            name: take(Field::Name),
            number: take(Field::Number),
            email: take(Field::Email),
            address: take(Field::Address),
            state: take(Field::State),
            city: take(Field::City),
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl ContactDraft {
    fn raw(&self, field: Field) -> Option<&Value> {
        match field {
            Field::Name => self.name.as_ref(),
            Field::Number => self.number.as_ref(),
            Field::Email => self.email.as_ref(),
            Field::Address => self.address.as_ref(),
            Field::State => self.state.as_ref(),
            Field::City => self.city.as_ref(),
        }
    }

    /// Apply the schema, collecting every violation rather than stopping at
    /// the first one.
    pub fn normalize(&self) -> Result<NewContact, ContactError> {
        let mut values: [String; 6] = Default::default();
        let mut errors = Vec::new();

        for (slot, field) in values.iter_mut().zip(Field::ALL) {
            match cast_text(field, self.raw(field)) {
                Ok(text) => *slot = text,
                Err(e) => errors.push(e),
            }
        }

        if !errors.is_empty() {
            return Err(ContactError::Validation(errors));
        }

        let [name, number, email, address, state, city] = values;
        Ok(NewContact {
            name,
            number,
            email,
            address,
            state,
            city,
        })
    }
}

impl From<&ContactForm> for ContactDraft {
    fn from(form: &ContactForm) -> Self {
        let text = |field: Field| Some(Value::String(form.get(field).to_string()));
        Self {
            name: text(Field::Name),
            number: text(Field::Number),
            email: text(Field::Email),
            address: text(Field::Address),
            state: text(Field::State),
            city: text(Field::City),
        }
    }
}

fn cast_text(field: Field, raw: Option<&Value>) -> Result<String, FieldError> {
    let text = match raw {
        None | Some(Value::Null) => return Err(FieldError::Required(field)),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => {
            return Err(FieldError::Cast {
                field,
                value: other.to_string(),
            })
        }
    };

    if text.is_empty() {
        return Err(FieldError::Required(field));
    }

    if field == Field::Email {
        Ok(text.to_lowercase())
    } else {
        Ok(text)
    }
}

/// A contact that passed the schema and is ready to be inserted.
///
/// Only [`ContactDraft::normalize`] builds one, so holders can rely on every
/// field being trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    name: String,
    number: String,
    email: String,
    address: String,
    state: String,
    city: String,
}

impl NewContact {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Number => &self.number,
            Field::Email => &self.email,
            Field::Address => &self.address,
            Field::State => &self.state,
            Field::City => &self.city,
        }
    }

    /// Attach the store-assigned identifier and timestamps.
    pub fn into_record(self, id: Uuid, at: DateTime<Utc>) -> ContactRecord {
        ContactRecord {
            id,
            name: self.name,
            number: self.number,
            email: self.email,
            address: self.address,
            state: self.state,
            city: self.city,
            created_at: at,
            updated_at: at,
        }
    }
}
