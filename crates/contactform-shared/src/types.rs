use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ContactError;

/// One of the six user-supplied contact fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Number,
    Email,
    Address,
    State,
    City,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Number,
        Field::Email,
        Field::Address,
        Field::State,
        Field::City,
    ];

    /// Wire / storage name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Number => "number",
            Self::Email => "email",
            Self::Address => "address",
            Self::State => "state",
            Self::City => "city",
        }
    }

    /// Human-readable label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Number => "Phone Number",
            Self::Email => "Email",
            Self::Address => "Address",
            Self::State => "State",
            Self::City => "City",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ContactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ContactError::UnknownField(s.to_string()))
    }
}

/// The values a user has typed into the form, posted as-is to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub number: String,
    pub email: String,
    pub address: String,
    pub state: String,
    pub city: String,
}

impl ContactForm {
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

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Number => &mut self.number,
            Field::Email => &mut self.email,
            Field::Address => &mut self.address,
            Field::State => &mut self.state,
            Field::City => &mut self.city,
        };
        *slot = value.into();
    }

    /// Fields whose trimmed value is empty, in form order.
    pub fn blank_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.blank_fields().is_empty()
    }
}

/// A persisted contact, as returned by `POST /api/contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub number: String,
    pub email: String,
    pub address: String,
    pub state: String,
    pub city: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
