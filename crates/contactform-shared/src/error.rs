use thiserror::Error;

use crate::types::Field;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("Contact validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("Request body must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Unknown form field: {0}")]
    UnknownField(String),
}

/// A single schema violation on one field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Path `{0}` is required.")]
    Required(Field),

    #[error("Cast to string failed for value `{value}` at path `{field}`")]
    Cast { field: Field, value: String },
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            Self::Required(field) => *field,
            Self::Cast { field, .. } => *field,
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field(), e))
        .collect::<Vec<_>>()
        .join(", ")
}
