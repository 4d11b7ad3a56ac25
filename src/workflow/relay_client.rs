//! Workflow side of the relay: POST the email, read back the folder.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::WorkflowError;
use crate::mail::EmailContent;
use crate::relay::{ClassificationRequest, ClassificationResult};

/// Anything that can turn an email into a folder name.
#[async_trait]
pub trait ClassifyClient: Send + Sync {
    async fn classify(&self, email: &EmailContent) -> Result<String, WorkflowError>;
}

/// Calls the relay's `/classify` route over HTTP.
pub struct HttpRelayClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRelayClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Overrides the HTTP client (custom timeouts or proxies).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl ClassifyClient for HttpRelayClient {
    async fn classify(&self, email: &EmailContent) -> Result<String, WorkflowError> {
        let request = ClassificationRequest {
            subject: email.subject.clone(),
            body: email.body.clone(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint = %self.endpoint, error = %e, "Relay unreachable");
                WorkflowError::ApiRequestFailed
            })?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Relay returned an error status");
            return Err(WorkflowError::ApiRequestFailed);
        }

        let result: ClassificationResult = response
            .json()
            .await
            .map_err(|e| WorkflowError::InvalidResponse(e.to_string()))?;

        debug!(folder = %result.folder, "Relay classified email");
        Ok(result.folder)
    }
}
