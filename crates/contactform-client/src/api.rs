//! Transport to the submission service.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use contactform_shared::constants::CONTACT_API_PATH;
use contactform_shared::{ContactForm, ContactRecord};

use crate::error::ClientError;

/// Anything that can create a contact from the form's values.
#[async_trait]
pub trait ContactApi: Send + Sync {
    async fn create_contact(&self, form: &ContactForm) -> Result<ContactRecord, ClientError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Posts the form as JSON to `{base_url}/api/contact`.
///
/// No timeout is configured: a submission waits for as long as the
/// transport does.
#[derive(Debug, Clone)]
pub struct HttpContactApi {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpContactApi {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), CONTACT_API_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContactApi for HttpContactApi {
    async fn create_contact(&self, form: &ContactForm) -> Result<ContactRecord, ClientError> {
        let resp = self.client.post(&self.endpoint).json(form).send().await?;
        let status = resp.status();

        if status.is_success() {
            let record: ContactRecord = resp
                .json()
                .await
                .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
            debug!(id = %record.id, "Contact accepted by server");
            return Ok(record);
        }

        let message = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .filter(|m| !m.is_empty());

        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
