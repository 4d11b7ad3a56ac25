//! Mail-side value types. None of these outlive a single routing attempt.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Subject and plain-text body of the email being organized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
}

/// Short-lived REST bearer credential from the host mail client.
#[derive(Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0.expose_secret())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// Message identifier in the REST API's format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RestId(pub String);

impl RestId {
    /// Convert a host (EWS-style) item id into the REST form.
    ///
    /// The REST form is URL-safe base64: `/` becomes `-` and `+` becomes `_`.
    pub fn from_item_id(item_id: &str) -> Self {
        Self(
            item_id
                .chars()
                .map(|c| match c {
                    '/' => '-',
                    '+' => '_',
                    other => other,
                })
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A mailbox folder as the REST API reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailFolder {
    pub id: String,
    pub display_name: String,
}

/// A single move of one message into one folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOperation {
    pub rest_id: RestId,
    pub destination_folder_id: String,
}
