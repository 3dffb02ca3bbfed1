use thiserror::Error;

use contactform_shared::constants::MSG_SUBMIT_FALLBACK;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("Server rejected the submission ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },

    /// The request never reached the server or the response never came back.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success status whose body was not a contact record.
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Text to show the user: the server's own message when it sent one,
    /// otherwise the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            _ => MSG_SUBMIT_FALLBACK.to_string(),
        }
    }
}
