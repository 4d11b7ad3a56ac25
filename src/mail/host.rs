//! Host mail client integration.
//!
//! The workflow reads the open email and obtains REST credentials through
//! this trait, so it runs the same against a real client binding or a test
//! double.

use async_trait::async_trait;

use super::types::{AccessToken, EmailContent, RestId};
use crate::error::HostError;

#[async_trait]
pub trait MailHost: Send + Sync {
    /// Subject of the currently selected email.
    fn subject(&self) -> String;

    /// Plain-text rendering of the body.
    async fn body_text(&self) -> Result<String, HostError>;

    /// Host-internal identifier of the current item.
    fn item_id(&self) -> String;

    /// Address of the signed-in mailbox.
    fn user_email(&self) -> String;

    /// A REST-scoped bearer token. Requested fresh for every move.
    async fn rest_token(&self) -> Result<AccessToken, HostError>;

    fn convert_to_rest_id(&self, item_id: &str) -> RestId {
        RestId::from_item_id(item_id)
    }

    /// Subject (sync) then body (async).
    async fn read_email(&self) -> Result<EmailContent, HostError> {
        let subject = self.subject();
        let body = self.body_text().await?;
        Ok(EmailContent { subject, body })
    }
}
