//! Mail REST API client: folder listing, creation, deletion and message moves.
//!
//! Paths follow the `users/{mailbox}/...` layout. Only the first page of
//! folders is read.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use tracing::{debug, warn};

use super::types::{AccessToken, MailFolder, MoveOperation};
use crate::error::WorkflowError;

/// Characters left as-is in a path segment (RFC 3986 unreserved).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Deserialize)]
struct FolderPage {
    #[serde(default)]
    value: Vec<MailFolder>,
}

/// Client for one mailbox on the mail REST API.
pub struct GraphClient {
    client: reqwest::Client,
    base_url: String,
    mailbox: String,
}

impl GraphClient {
    pub fn new(base_url: impl Into<String>, mailbox: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            mailbox: mailbox.into(),
        }
    }

    /// Overrides the HTTP client (custom timeouts or proxies).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn folders_url(&self) -> String {
        format!(
            "{}/users/{}/mailFolders",
            self.base_url,
            encode(&self.mailbox)
        )
    }

    fn folder_url(&self, folder_id: &str) -> String {
        format!("{}/{}", self.folders_url(), encode(folder_id))
    }

    fn move_url(&self, rest_id: &str) -> String {
        format!(
            "{}/users/{}/messages/{}/move",
            self.base_url,
            encode(&self.mailbox),
            encode(rest_id)
        )
    }

    /// List the mailbox's folders (first page only).
    pub async fn list_folders(&self, token: &AccessToken) -> Result<Vec<MailFolder>, WorkflowError> {
        let response = self
            .client
            .get(self.folders_url())
            .header(AUTHORIZATION, token.bearer())
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Folder listing request failed");
                WorkflowError::ListFolders
            })?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Folder listing rejected");
            return Err(WorkflowError::ListFolders);
        }

        let page: FolderPage = response.json().await.map_err(|e| {
            warn!(error = %e, "Folder listing body unreadable");
            WorkflowError::ListFolders
        })?;
        debug!(count = page.value.len(), "Listed folders");
        Ok(page.value)
    }

    /// Create a folder with the given display name and return it.
    pub async fn create_folder(
        &self,
        token: &AccessToken,
        display_name: &str,
    ) -> Result<MailFolder, WorkflowError> {
        let response = self
            .client
            .post(self.folders_url())
            .header(AUTHORIZATION, token.bearer())
            .json(&serde_json::json!({ "displayName": display_name }))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Folder creation request failed");
                WorkflowError::CreateFolder
            })?;

        if !response.status().is_success() {
            warn!(status = %response.status(), folder = display_name, "Folder creation rejected");
            return Err(WorkflowError::CreateFolder);
        }

        response.json::<MailFolder>().await.map_err(|e| {
            warn!(error = %e, "Created folder body unreadable");
            WorkflowError::CreateFolder
        })
    }

    /// Delete a folder by id.
    pub async fn delete_folder(&self, token: &AccessToken, folder_id: &str) -> Result<(), WorkflowError> {
        let response = self
            .client
            .delete(self.folder_url(folder_id))
            .header(AUTHORIZATION, token.bearer())
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Folder deletion request failed");
                WorkflowError::DeleteFolder
            })?;

        if !response.status().is_success() {
            warn!(status = %response.status(), folder_id, "Folder deletion rejected");
            return Err(WorkflowError::DeleteFolder);
        }
        Ok(())
    }

    /// Move a message into a folder.
    pub async fn move_message(&self, token: &AccessToken, op: &MoveOperation) -> Result<(), WorkflowError> {
        let response = self
            .client
            .post(self.move_url(op.rest_id.as_str()))
            .header(AUTHORIZATION, token.bearer())
            .json(&serde_json::json!({ "destinationId": op.destination_folder_id }))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Move request failed");
                WorkflowError::MoveFailed
            })?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Move rejected");
            return Err(WorkflowError::MoveFailed);
        }
        Ok(())
    }
}

fn encode(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}
